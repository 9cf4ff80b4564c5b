use crate::backend::DocumentBackend;
use crate::document::{
	DeleteResult, Document, Filter, FindOptions, UpdateResult, validate_field_name,
};
use crate::error::{NoSQLError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

type Collection = BTreeMap<String, Document>;

/// Process-local backend. Each write holds the lock for the whole
/// check-and-write, which makes conditional writes atomic.
#[derive(Debug, Default)]
pub struct MemoryBackend {
	collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
	fn backend_name(&self) -> &'static str {
		"memory"
	}

	async fn insert_one(&self, collection: &str, id: &str, document: Document) -> Result<()> {
		let mut collections = self.collections.write();
		let docs = collections.entry(collection.to_string()).or_default();
		if docs.contains_key(id) {
			return Err(NoSQLError::DuplicateKey {
				collection: collection.to_string(),
				id: id.to_string(),
			});
		}
		docs.insert(id.to_string(), document);
		Ok(())
	}

	async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
		let collections = self.collections.read();
		Ok(collections
			.get(collection)
			.and_then(|docs| docs.get(id))
			.cloned())
	}

	async fn find_many(
		&self,
		collection: &str,
		filter: &Filter,
		options: &FindOptions,
	) -> Result<Vec<Document>> {
		filter.validate()?;
		options.validate()?;

		let mut matched: Vec<Document> = {
			let collections = self.collections.read();
			collections
				.get(collection)
				.map(|docs| {
					docs.values()
						.filter(|doc| filter.matches(doc))
						.cloned()
						.collect()
				})
				.unwrap_or_default()
		};

		// stable: ties keep id order from the BTreeMap
		matched.sort_by(|a, b| options.compare(a, b));
		if let Some(limit) = options.limit {
			matched.truncate(limit);
		}
		Ok(matched)
	}

	async fn update_one(
		&self,
		collection: &str,
		id: &str,
		conditions: &Filter,
		update: Document,
	) -> Result<UpdateResult> {
		conditions.validate()?;
		for field in update.keys() {
			validate_field_name(field)?;
		}

		let mut collections = self.collections.write();
		let Some(document) = collections
			.get_mut(collection)
			.and_then(|docs| docs.get_mut(id))
		else {
			return Ok(UpdateResult { matched_count: 0 });
		};
		if !conditions.matches(document) {
			return Ok(UpdateResult { matched_count: 0 });
		}

		for (field, value) in update {
			if value == Value::Null {
				document.remove(&field);
			} else {
				document.insert(field, value);
			}
		}
		Ok(UpdateResult { matched_count: 1 })
	}

	async fn delete_one(
		&self,
		collection: &str,
		id: &str,
		conditions: &Filter,
	) -> Result<DeleteResult> {
		conditions.validate()?;

		let mut collections = self.collections.write();
		let Some(docs) = collections.get_mut(collection) else {
			return Ok(DeleteResult { deleted_count: 0 });
		};
		let satisfied = docs.get(id).is_some_and(|doc| conditions.matches(doc));
		if !satisfied {
			return Ok(DeleteResult { deleted_count: 0 });
		}
		docs.remove(id);
		Ok(DeleteResult { deleted_count: 1 })
	}
}
