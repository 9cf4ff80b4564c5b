use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use upow_core::{Error, Result};
use upow_db::Timestamp;
use validator::Validate;

pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
	/// Same as the identity uid
	pub id: String,
	pub name: String,
	pub email: String,
	pub role: Option<String>,
	pub bio: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Settings update. Absent fields are left alone; an empty `role` or `bio`
/// clears it. Values are trimmed before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileSettings {
	#[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
	pub name: Option<String>,

	#[validate(length(max = 100, message = "Role must be at most 100 characters"))]
	pub role: Option<String>,

	#[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
	pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileDocument {
	pub id: String,
	pub name: String,
	pub email: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}

impl From<&Profile> for ProfileDocument {
	fn from(profile: &Profile) -> Self {
		Self {
			id: profile.id.clone(),
			name: profile.name.clone(),
			email: profile.email.clone(),
			role: profile.role.clone(),
			bio: profile.bio.clone(),
			created_at: profile.created_at.into(),
			updated_at: profile.updated_at.into(),
		}
	}
}

impl TryFrom<ProfileDocument> for Profile {
	type Error = Error;

	fn try_from(document: ProfileDocument) -> Result<Self> {
		let (Some(created_at), Some(updated_at)) = (
			document.created_at.to_datetime(),
			document.updated_at.to_datetime(),
		) else {
			return Err(Error::Internal(format!(
				"profile {} has an invalid timestamp",
				document.id
			)));
		};
		Ok(Self {
			id: document.id,
			name: document.name,
			email: document.email,
			role: document.role,
			bio: document.bio,
			created_at,
			updated_at,
		})
	}
}

impl ProfileSettings {
	pub(crate) fn trimmed(self) -> Self {
		let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
		Self {
			name: trim(self.name),
			role: trim(self.role),
			bio: trim(self.bio),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.name.is_none() && self.role.is_none() && self.bio.is_none()
	}
}
