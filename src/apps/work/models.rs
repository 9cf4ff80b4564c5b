use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use upow_core::{Error, Result};
use upow_db::Timestamp;
use validator::Validate;

pub const WORK_ENTRIES_COLLECTION: &str = "workEntries";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Project,
	Task,
	Contribution,
}

/// Proof links attached to an entry. Every link is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProofLinks {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	#[validate(url(message = "repo must be an absolute URL"))]
	#[validate(custom(function = "validate_web_scheme", message = "repo must be an http or https link"))]
	pub repo: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	#[validate(url(message = "demo must be an absolute URL"))]
	#[validate(custom(function = "validate_web_scheme", message = "demo must be an http or https link"))]
	pub demo: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	#[validate(url(message = "doc must be an absolute URL"))]
	#[validate(custom(function = "validate_web_scheme", message = "doc must be an http or https link"))]
	pub doc: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	#[validate(url(message = "image must be an absolute URL"))]
	#[validate(custom(function = "validate_web_scheme", message = "image must be an http or https link"))]
	pub image: Option<String>,
}

impl ProofLinks {
	/// Trim every link and drop the empty ones
	pub fn normalized(self) -> Self {
		let clean = |link: Option<String>| {
			link.map(|l| l.trim().to_string())
				.filter(|l| !l.is_empty())
		};
		Self {
			repo: clean(self.repo),
			demo: clean(self.demo),
			doc: clean(self.doc),
			image: clean(self.image),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.repo.is_none() && self.demo.is_none() && self.doc.is_none() && self.image.is_none()
	}
}

/// Proof links are rendered as anchors, so only web links are accepted
fn validate_web_scheme(link: &str) -> std::result::Result<(), validator::ValidationError> {
	let scheme = link.split_once(':').map(|(scheme, _)| scheme.to_ascii_lowercase());
	match scheme.as_deref() {
		Some("http" | "https") => Ok(()),
		_ => Err(validator::ValidationError::new("web_scheme")),
	}
}

/// Stored status tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
	Pending,
	Validated,
}

impl EntryStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			EntryStatus::Pending => "pending",
			EntryStatus::Validated => "validated",
		}
	}
}

/// Validation state of an entry. The validator fields exist exactly when the
/// entry is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStatus {
	Pending,
	Validated {
		validator_id: String,
		/// Name of the validator at validation time
		validator_name: String,
		validated_at: DateTime<Utc>,
	},
}

impl ValidationStatus {
	pub fn is_validated(&self) -> bool {
		matches!(self, ValidationStatus::Validated { .. })
	}

	pub fn status(&self) -> EntryStatus {
		match self {
			ValidationStatus::Pending => EntryStatus::Pending,
			ValidationStatus::Validated { .. } => EntryStatus::Validated,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkEntry {
	pub id: String,
	/// Owning profile, fixed at creation
	pub user_id: String,
	pub title: String,
	pub description: String,
	pub category: Category,
	pub proof_links: ProofLinks,
	/// When the work happened
	pub date: NaiveDate,
	pub status: ValidationStatus,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating an entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkEntryDraft {
	#[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
	pub title: String,

	#[validate(length(
		min = 1,
		max = 5000,
		message = "Description must be between 1 and 5000 characters"
	))]
	pub description: String,

	pub category: Category,

	#[serde(default)]
	#[validate(nested)]
	pub proof_links: ProofLinks,

	pub date: NaiveDate,
}

impl WorkEntryDraft {
	pub(crate) fn normalized(self) -> Self {
		Self {
			title: self.title.trim().to_string(),
			description: self.description.trim().to_string(),
			proof_links: self.proof_links.normalized(),
			..self
		}
	}
}

/// Owner edit. Absent fields are left alone. `proofLinks`, when present,
/// replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkEntryPatch {
	#[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
	pub title: Option<String>,

	#[validate(length(
		min = 1,
		max = 5000,
		message = "Description must be between 1 and 5000 characters"
	))]
	pub description: Option<String>,

	pub category: Option<Category>,

	#[validate(nested)]
	pub proof_links: Option<ProofLinks>,

	pub date: Option<NaiveDate>,
}

impl WorkEntryPatch {
	pub(crate) fn normalized(self) -> Self {
		Self {
			title: self.title.map(|t| t.trim().to_string()),
			description: self.description.map(|d| d.trim().to_string()),
			proof_links: self.proof_links.map(ProofLinks::normalized),
			..self
		}
	}
}

/// Entry counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStats {
	pub total: usize,
	pub validated: usize,
	pub pending: usize,
}

impl EntryStats {
	pub fn from_entries(entries: &[WorkEntry]) -> Self {
		let validated = entries.iter().filter(|e| e.status.is_validated()).count();
		Self {
			total: entries.len(),
			validated,
			pending: entries.len() - validated,
		}
	}
}

/// Stored form of a [`WorkEntry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WorkEntryDocument {
	pub id: String,
	pub user_id: String,
	pub title: String,
	pub description: String,
	pub category: Category,
	#[serde(default)]
	pub proof_links: ProofLinks,
	pub date: Timestamp,
	pub status: EntryStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validator_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validator_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validated_at: Option<Timestamp>,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}

impl From<&WorkEntry> for WorkEntryDocument {
	fn from(entry: &WorkEntry) -> Self {
		let (validator_id, validator_name, validated_at) = match &entry.status {
			ValidationStatus::Pending => (None, None, None),
			ValidationStatus::Validated {
				validator_id,
				validator_name,
				validated_at,
			} => (
				Some(validator_id.clone()),
				Some(validator_name.clone()),
				Some(Timestamp::from(*validated_at)),
			),
		};

		Self {
			id: entry.id.clone(),
			user_id: entry.user_id.clone(),
			title: entry.title.clone(),
			description: entry.description.clone(),
			category: entry.category,
			proof_links: entry.proof_links.clone(),
			date: Timestamp::from_date(entry.date),
			status: entry.status.status(),
			validator_id,
			validator_name,
			validated_at,
			created_at: entry.created_at.into(),
			updated_at: entry.updated_at.into(),
		}
	}
}

impl TryFrom<WorkEntryDocument> for WorkEntry {
	type Error = Error;

	/// Fails when the validation fields disagree with `status`
	fn try_from(document: WorkEntryDocument) -> Result<Self> {
		let corrupt = |what: &str| {
			Error::Internal(format!("work entry {} has {}", document.id, what))
		};

		let status = match (
			document.status,
			&document.validator_id,
			&document.validator_name,
			document.validated_at,
		) {
			(EntryStatus::Pending, None, None, None) => ValidationStatus::Pending,
			(EntryStatus::Validated, Some(validator_id), Some(validator_name), Some(at)) => {
				ValidationStatus::Validated {
					validator_id: validator_id.clone(),
					validator_name: validator_name.clone(),
					validated_at: at
						.to_datetime()
						.ok_or_else(|| corrupt("an invalid validatedAt"))?,
				}
			}
			_ => return Err(corrupt("inconsistent validation fields")),
		};

		let date = document
			.date
			.to_date()
			.ok_or_else(|| corrupt("an invalid date"))?;
		let created_at = document
			.created_at
			.to_datetime()
			.ok_or_else(|| corrupt("an invalid createdAt"))?;
		let updated_at = document
			.updated_at
			.to_datetime()
			.ok_or_else(|| corrupt("an invalid updatedAt"))?;

		Ok(Self {
			id: document.id,
			user_id: document.user_id,
			title: document.title,
			description: document.description,
			category: document.category,
			proof_links: document.proof_links,
			date,
			status,
			created_at,
			updated_at,
		})
	}
}
