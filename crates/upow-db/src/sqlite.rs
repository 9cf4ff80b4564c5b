//! SQLite backend storing every collection in a single `documents` table.
//!
//! Bodies are JSON text; filters, sorting and field updates use SQLite's
//! JSON1 functions so each operation is a single statement.

use crate::backend::DocumentBackend;
use crate::document::{
	DeleteResult, Document, Filter, FindOptions, SortOrder, UpdateResult, validate_field_name,
};
use crate::error::{NoSQLError, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS documents (
	collection TEXT NOT NULL,
	id TEXT NOT NULL,
	body TEXT NOT NULL,
	PRIMARY KEY (collection, id)
)";

#[derive(Debug, Clone)]
pub struct SqliteBackend {
	pool: SqlitePool,
}

fn json_path(field: &str) -> Result<String> {
	validate_field_name(field)?;
	Ok(format!("$.\"{}\"", field))
}

/// ` AND json_extract(body, ?) IS json_extract(?, '$')` per condition, with binds
fn where_conditions(conditions: &Filter) -> Result<(String, Vec<String>)> {
	let mut sql = String::new();
	let mut binds = Vec::new();
	for (field, value) in conditions.conditions() {
		sql.push_str(" AND json_extract(body, ?) IS json_extract(?, '$')");
		binds.push(json_path(field)?);
		binds.push(serde_json::to_string(value)?);
	}
	Ok((sql, binds))
}

impl SqliteBackend {
	/// Connect and create the schema if needed.
	///
	/// `sqlite::memory:` uses a single long-lived connection so every caller
	/// sees the same database.
	pub async fn connect(url: &str) -> Result<Self> {
		let in_memory = url.contains(":memory:");
		let options = SqliteConnectOptions::from_str(url)?
			.create_if_missing(true)
			.busy_timeout(Duration::from_secs(5));

		let mut pool_options = SqlitePoolOptions::new();
		pool_options = if in_memory {
			pool_options
				.max_connections(1)
				.min_connections(1)
				.idle_timeout(None)
				.max_lifetime(None)
		} else {
			pool_options.max_connections(5)
		};

		let pool = pool_options.connect_with(options).await?;
		let backend = Self { pool };
		backend.migrate().await?;
		tracing::info!(url, "connected to sqlite document store");
		Ok(backend)
	}

	pub async fn migrate(&self) -> Result<()> {
		sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
		Ok(())
	}

	fn parse_body(body: &str) -> Result<Document> {
		match serde_json::from_str::<Value>(body)? {
			Value::Object(map) => Ok(map),
			_ => Err(NoSQLError::SerializationError(
				"stored body is not an object".to_string(),
			)),
		}
	}
}

#[async_trait]
impl DocumentBackend for SqliteBackend {
	fn backend_name(&self) -> &'static str {
		"sqlite"
	}

	async fn insert_one(&self, collection: &str, id: &str, document: Document) -> Result<()> {
		let body = serde_json::to_string(&document)?;
		let result = sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
			.bind(collection)
			.bind(id)
			.bind(body)
			.execute(&self.pool)
			.await;

		match result {
			Ok(_) => Ok(()),
			Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
				Err(NoSQLError::DuplicateKey {
					collection: collection.to_string(),
					id: id.to_string(),
				})
			}
			Err(e) => Err(e.into()),
		}
	}

	async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
		let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
			.bind(collection)
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		row.map(|row| Self::parse_body(&row.try_get::<String, _>("body")?))
			.transpose()
	}

	async fn find_many(
		&self,
		collection: &str,
		filter: &Filter,
		options: &FindOptions,
	) -> Result<Vec<Document>> {
		let (conditions_sql, mut binds) = where_conditions(filter)?;
		let mut sql = format!(
			"SELECT body FROM documents WHERE collection = ?{}",
			conditions_sql
		);

		let mut order_terms = Vec::new();
		for (field, order) in &options.sort {
			binds.push(json_path(field)?);
			let direction = match order {
				SortOrder::Ascending => "ASC",
				SortOrder::Descending => "DESC",
			};
			order_terms.push(format!("json_extract(body, ?) {}", direction));
		}
		order_terms.push("id ASC".to_string());
		sql.push_str(" ORDER BY ");
		sql.push_str(&order_terms.join(", "));
		if options.limit.is_some() {
			sql.push_str(" LIMIT ?");
		}

		let mut query = sqlx::query(&sql).bind(collection);
		for bind in binds {
			query = query.bind(bind);
		}
		if let Some(limit) = options.limit {
			query = query.bind(i64::try_from(limit).unwrap_or(i64::MAX));
		}

		let rows = query.fetch_all(&self.pool).await?;
		rows.iter()
			.map(|row| Self::parse_body(&row.try_get::<String, _>("body")?))
			.collect()
	}

	async fn update_one(
		&self,
		collection: &str,
		id: &str,
		conditions: &Filter,
		update: Document,
	) -> Result<UpdateResult> {
		let mut set_args = Vec::new();
		let mut remove_args = Vec::new();
		let mut binds = Vec::new();
		let mut remove_binds = Vec::new();
		for (field, value) in &update {
			if value.is_null() {
				remove_args.push("?");
				remove_binds.push(json_path(field)?);
			} else {
				set_args.push("?, json(?)");
				binds.push(json_path(field)?);
				binds.push(serde_json::to_string(value)?);
			}
		}

		let mut expression = "body".to_string();
		if !set_args.is_empty() {
			expression = format!("json_set({}, {})", expression, set_args.join(", "));
		}
		if !remove_args.is_empty() {
			expression = format!("json_remove({}, {})", expression, remove_args.join(", "));
			binds.extend(remove_binds);
		}

		let (conditions_sql, condition_binds) = where_conditions(conditions)?;
		let sql = format!(
			"UPDATE documents SET body = {} WHERE collection = ? AND id = ?{}",
			expression, conditions_sql
		);

		let mut query = sqlx::query(&sql);
		for bind in binds {
			query = query.bind(bind);
		}
		query = query.bind(collection).bind(id);
		for bind in condition_binds {
			query = query.bind(bind);
		}

		let result = query.execute(&self.pool).await?;
		Ok(UpdateResult {
			matched_count: result.rows_affected(),
		})
	}

	async fn delete_one(
		&self,
		collection: &str,
		id: &str,
		conditions: &Filter,
	) -> Result<DeleteResult> {
		let (conditions_sql, condition_binds) = where_conditions(conditions)?;
		let sql = format!(
			"DELETE FROM documents WHERE collection = ? AND id = ?{}",
			conditions_sql
		);

		let mut query = sqlx::query(&sql).bind(collection).bind(id);
		for bind in condition_binds {
			query = query.bind(bind);
		}

		let result = query.execute(&self.pool).await?;
		Ok(DeleteResult {
			deleted_count: result.rows_affected(),
		})
	}
}
