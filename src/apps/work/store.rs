use super::models::{
	EntryStatus, ValidationStatus, WORK_ENTRIES_COLLECTION, WorkEntry, WorkEntryDocument,
	WorkEntryDraft, WorkEntryPatch,
};
use crate::apps::validation_error;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use upow_core::{Error, Result};
use upow_db::{
	Document, DocumentBackend, Filter, FindOptions, SortOrder, Timestamp, from_document,
	to_document,
};
use validator::Validate;

pub const NOT_FOUND_MESSAGE: &str = "Work entry not found. Please check the ID and try again.";
const NOT_OWNER_MESSAGE: &str = "You can only modify your own work entries.";

fn not_found() -> Error {
	Error::NotFound(NOT_FOUND_MESSAGE.to_string())
}

/// Work entry persistence in the `workEntries` collection.
///
/// Owner-only operations are conditional writes on `userId`, so a caller
/// that does not own the entry never changes it.
pub struct WorkEntryStore {
	store: Arc<dyn DocumentBackend>,
}

impl WorkEntryStore {
	pub fn new(store: Arc<dyn DocumentBackend>) -> Self {
		Self { store }
	}

	/// New pending entry owned by `owner`
	pub async fn create(&self, owner: &str, draft: WorkEntryDraft) -> Result<WorkEntry> {
		let draft = draft.normalized();
		draft.validate().map_err(validation_error)?;

		let now = Utc::now();
		let entry = WorkEntry {
			id: uuid::Uuid::new_v4().to_string(),
			user_id: owner.to_string(),
			title: draft.title,
			description: draft.description,
			category: draft.category,
			proof_links: draft.proof_links,
			date: draft.date,
			status: ValidationStatus::Pending,
			created_at: now,
			updated_at: now,
		};

		let document = to_document(&WorkEntryDocument::from(&entry))?;
		if let Err(e) = self
			.store
			.insert_one(WORK_ENTRIES_COLLECTION, &entry.id, document)
			.await
		{
			tracing::error!(owner, error = %e, "failed to create work entry");
			return Err(e.into());
		}
		tracing::info!(entry_id = %entry.id, owner, "work entry created");

		self.get(&entry.id).await
	}

	pub async fn find(&self, id: &str) -> Result<Option<WorkEntry>> {
		let Some(document) = self.store.find_by_id(WORK_ENTRIES_COLLECTION, id).await? else {
			return Ok(None);
		};
		Self::decode(document).map(Some)
	}

	pub async fn get(&self, id: &str) -> Result<WorkEntry> {
		self.find(id).await?.ok_or_else(not_found)
	}

	/// Entries of `owner`, most recent `date` first
	pub async fn list_by_owner(&self, owner: &str) -> Result<Vec<WorkEntry>> {
		let documents = self
			.store
			.find_many(
				WORK_ENTRIES_COLLECTION,
				&Filter::new().eq("userId", owner),
				&FindOptions::new()
					.sort("date", SortOrder::Descending)
					.sort("createdAt", SortOrder::Descending),
			)
			.await?;

		documents.into_iter().map(Self::decode).collect()
	}

	/// Merge `patch` into the entry if `caller` owns it
	pub async fn update(&self, caller: &str, id: &str, patch: WorkEntryPatch) -> Result<WorkEntry> {
		let patch = patch.normalized();
		patch.validate().map_err(validation_error)?;

		let mut update = Document::new();
		if let Some(title) = patch.title {
			update.insert("title".to_string(), Value::from(title));
		}
		if let Some(description) = patch.description {
			update.insert("description".to_string(), Value::from(description));
		}
		if let Some(category) = patch.category {
			update.insert("category".to_string(), serde_json::to_value(category)?);
		}
		if let Some(proof_links) = patch.proof_links {
			update.insert("proofLinks".to_string(), serde_json::to_value(proof_links)?);
		}
		if let Some(date) = patch.date {
			update.insert(
				"date".to_string(),
				serde_json::to_value(Timestamp::from_date(date))?,
			);
		}
		update.insert(
			"updatedAt".to_string(),
			serde_json::to_value(Timestamp::now())?,
		);

		let result = self
			.store
			.update_one(
				WORK_ENTRIES_COLLECTION,
				id,
				&Filter::new().eq("userId", caller),
				update,
			)
			.await?;
		if result.matched_count == 0 {
			return Err(self.explain_rejected_write(caller, id).await);
		}

		tracing::info!(entry_id = %id, "work entry updated");
		self.get(id).await
	}

	/// Delete the entry if `caller` owns it
	pub async fn delete(&self, caller: &str, id: &str) -> Result<()> {
		let result = self
			.store
			.delete_one(
				WORK_ENTRIES_COLLECTION,
				id,
				&Filter::new().eq("userId", caller),
			)
			.await?;
		if result.deleted_count == 0 {
			return Err(self.explain_rejected_write(caller, id).await);
		}

		tracing::info!(entry_id = %id, "work entry deleted");
		Ok(())
	}

	/// Flip a pending entry to validated.
	///
	/// Returns `false` without writing when the stored entry is missing or no
	/// longer pending.
	pub async fn mark_validated(
		&self,
		id: &str,
		validator_id: &str,
		validator_name: &str,
		at: DateTime<Utc>,
	) -> Result<bool> {
		let at = serde_json::to_value(Timestamp::from(at))?;
		let mut update = Document::new();
		update.insert(
			"status".to_string(),
			serde_json::to_value(EntryStatus::Validated)?,
		);
		update.insert("validatorId".to_string(), Value::from(validator_id));
		update.insert("validatorName".to_string(), Value::from(validator_name));
		update.insert("validatedAt".to_string(), at.clone());
		update.insert("updatedAt".to_string(), at);

		let result = self
			.store
			.update_one(
				WORK_ENTRIES_COLLECTION,
				id,
				&Filter::new().eq("status", EntryStatus::Pending.as_str()),
				update,
			)
			.await?;
		Ok(result.matched_count == 1)
	}

	/// NotFound when the entry is gone, Unauthorized when someone else owns it
	async fn explain_rejected_write(&self, caller: &str, id: &str) -> Error {
		match self.find(id).await {
			Ok(None) => not_found(),
			Ok(Some(entry)) => {
				tracing::warn!(entry_id = %id, caller, owner = %entry.user_id, "rejected write by non-owner");
				Error::Unauthorized(NOT_OWNER_MESSAGE.to_string())
			}
			Err(e) => e,
		}
	}

	fn decode(document: Document) -> Result<WorkEntry> {
		let document: WorkEntryDocument = from_document(document)?;
		WorkEntry::try_from(document)
	}
}
