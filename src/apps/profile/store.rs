use super::models::{Profile, ProfileDocument, ProfileSettings, USERS_COLLECTION};
use crate::apps::validation_error;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use upow_core::{Error, Result};
use upow_db::{Document, DocumentBackend, Filter, Timestamp, from_document, to_document};
use validator::Validate;

const NOT_FOUND_MESSAGE: &str = "Profile not found.";

/// Profile persistence in the `users` collection
pub struct ProfileStore {
	store: Arc<dyn DocumentBackend>,
}

impl ProfileStore {
	pub fn new(store: Arc<dyn DocumentBackend>) -> Self {
		Self { store }
	}

	/// Create the profile for a freshly registered identity
	pub async fn create(&self, id: &str, name: &str, email: &str) -> Result<Profile> {
		let name = name.trim();
		ProfileSettings {
			name: Some(name.to_string()),
			..Default::default()
		}
		.validate()
		.map_err(validation_error)?;

		let now = Utc::now();
		let profile = Profile {
			id: id.to_string(),
			name: name.to_string(),
			email: email.to_string(),
			role: None,
			bio: None,
			created_at: now,
			updated_at: now,
		};

		let document = to_document(&ProfileDocument::from(&profile))?;
		self.store.insert_one(USERS_COLLECTION, id, document).await?;
		tracing::info!(profile_id = %id, "profile created");

		// re-read so timestamps carry the stored precision
		self.get(id).await
	}

	pub async fn find(&self, id: &str) -> Result<Option<Profile>> {
		let Some(document) = self.store.find_by_id(USERS_COLLECTION, id).await? else {
			return Ok(None);
		};
		let document: ProfileDocument = from_document(document)?;
		Profile::try_from(document).map(Some)
	}

	pub async fn get(&self, id: &str) -> Result<Profile> {
		self.find(id)
			.await?
			.ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.to_string()))
	}

	/// Apply a settings update on behalf of `caller`.
	///
	/// Only the owner may update a profile. The write is conditioned on the
	/// stored id so a profile can never be recreated through an update.
	pub async fn update_settings(
		&self,
		caller: &str,
		id: &str,
		patch: ProfileSettings,
	) -> Result<Profile> {
		if caller != id {
			return Err(Error::Unauthorized(
				"You can only update your own profile.".to_string(),
			));
		}

		let patch = patch.trimmed();
		patch.validate().map_err(validation_error)?;

		let mut update = Document::new();
		if let Some(name) = patch.name {
			update.insert("name".to_string(), Value::from(name));
		}
		for (field, value) in [("role", patch.role), ("bio", patch.bio)] {
			match value {
				Some(value) if value.is_empty() => {
					update.insert(field.to_string(), Value::Null);
				}
				Some(value) => {
					update.insert(field.to_string(), Value::from(value));
				}
				None => {}
			}
		}
		update.insert(
			"updatedAt".to_string(),
			serde_json::to_value(Timestamp::now())?,
		);

		let result = self
			.store
			.update_one(USERS_COLLECTION, id, &Filter::new().eq("id", caller), update)
			.await?;
		if result.matched_count == 0 {
			return Err(Error::NotFound(NOT_FOUND_MESSAGE.to_string()));
		}

		tracing::info!(profile_id = %id, "profile settings updated");
		self.get(id).await
	}
}
