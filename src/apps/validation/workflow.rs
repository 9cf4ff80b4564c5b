use crate::apps::profile::models::Profile;
use crate::apps::profile::store::ProfileStore;
use crate::apps::work::models::WorkEntry;
use crate::apps::work::store::{NOT_FOUND_MESSAGE, WorkEntryStore};
use chrono::Utc;
use std::sync::Arc;
use upow_core::{Error, Result};

/// An entry about to be validated, with its owner
#[derive(Debug, Clone)]
pub struct ValidationPreview {
	pub entry: WorkEntry,
	/// `None` if the owner's profile is missing
	pub owner: Option<Profile>,
}

pub struct ValidationWorkflow {
	entries: Arc<WorkEntryStore>,
	profiles: Arc<ProfileStore>,
}

/// Preconditions, checked in order: the entry exists, it belongs to someone
/// else, it is still pending.
fn check_preconditions(entry: Option<WorkEntry>, validator_id: &str) -> Result<WorkEntry> {
	let entry = entry.ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
	if entry.user_id == validator_id {
		return Err(Error::SelfValidation);
	}
	if entry.status.is_validated() {
		return Err(Error::AlreadyValidated);
	}
	Ok(entry)
}

impl ValidationWorkflow {
	pub fn new(entries: Arc<WorkEntryStore>, profiles: Arc<ProfileStore>) -> Self {
		Self { entries, profiles }
	}

	/// Run the validation checks without writing anything
	pub async fn review(&self, entry_id: &str, validator_id: &str) -> Result<ValidationPreview> {
		let entry = check_preconditions(self.entries.find(entry_id).await?, validator_id)?;
		let owner = self.profiles.find(&entry.user_id).await?;
		Ok(ValidationPreview { entry, owner })
	}

	/// Mark the entry validated by `validator_id`.
	///
	/// `validator_name` is stored as given and is not updated if the
	/// validator renames later. When two validators race, the store's
	/// compare-and-swap on `status == pending` lets exactly one through; the
	/// other gets `AlreadyValidated`.
	pub async fn validate(
		&self,
		entry_id: &str,
		validator_id: &str,
		validator_name: &str,
	) -> Result<WorkEntry> {
		check_preconditions(self.entries.find(entry_id).await?, validator_id)?;

		let validator_name = validator_name.trim();
		if validator_name.is_empty() {
			return Err(Error::Validation("Validator name is required.".to_string()));
		}

		let swapped = self
			.entries
			.mark_validated(entry_id, validator_id, validator_name, Utc::now())
			.await?;
		if !swapped {
			// lost the race, or the entry vanished in between
			return match self.entries.find(entry_id).await? {
				None => Err(Error::NotFound(NOT_FOUND_MESSAGE.to_string())),
				Some(_) => Err(Error::AlreadyValidated),
			};
		}

		tracing::info!(entry_id, validator_id, "work entry validated");
		self.entries.get(entry_id).await
	}
}
