use crate::document::{DeleteResult, Document, Filter, FindOptions, UpdateResult};
use crate::error::{NoSQLError, Result};
use crate::memory::MemoryBackend;
use crate::sqlite::SqliteBackend;
use async_trait::async_trait;
use std::sync::Arc;

/// Single-document operations over named collections.
///
/// Implementations guarantee that each call is atomic with respect to the
/// document it touches, including the precondition check of
/// [`update_one`](Self::update_one) and [`delete_one`](Self::delete_one).
#[async_trait]
pub trait DocumentBackend: Send + Sync {
	fn backend_name(&self) -> &'static str;

	/// Insert a new document. Fails with `DuplicateKey` if `id` is taken.
	async fn insert_one(&self, collection: &str, id: &str, document: Document) -> Result<()>;

	async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;

	/// Documents matching `filter`, ordered by `options.sort` then by id
	async fn find_many(
		&self,
		collection: &str,
		filter: &Filter,
		options: &FindOptions,
	) -> Result<Vec<Document>>;

	/// Set top-level fields on the document if it exists and satisfies
	/// `conditions`. A `null` value removes the field.
	async fn update_one(
		&self,
		collection: &str,
		id: &str,
		conditions: &Filter,
		update: Document,
	) -> Result<UpdateResult>;

	/// Delete the document if it exists and satisfies `conditions`
	async fn delete_one(
		&self,
		collection: &str,
		id: &str,
		conditions: &Filter,
	) -> Result<DeleteResult>;
}

/// Open the backend described by a settings `database_url`.
///
/// - `memory` selects [`MemoryBackend`]
/// - `sqlite::memory:` or `sqlite://path` selects [`SqliteBackend`]
pub async fn connect(database_url: &str) -> Result<Arc<dyn DocumentBackend>> {
	if database_url == "memory" {
		return Ok(Arc::new(MemoryBackend::new()));
	}
	if database_url.starts_with("sqlite:") {
		return Ok(Arc::new(SqliteBackend::connect(database_url).await?));
	}
	Err(NoSQLError::ConfigError(format!(
		"unsupported database url: {}",
		database_url
	)))
}
