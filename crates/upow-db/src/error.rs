//! Document store error types

/// Result type for document store operations
pub type Result<T> = std::result::Result<T, NoSQLError>;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum NoSQLError {
	#[error("Connection error: {0}")]
	ConnectionError(String),

	#[error("Execution error: {0}")]
	ExecutionError(String),

	/// A document with the same id already exists in the collection
	#[error("Duplicate key: {collection}/{id}")]
	DuplicateKey { collection: String, id: String },

	#[error("Serialization error: {0}")]
	SerializationError(String),

	#[error("Invalid operation: {0}")]
	InvalidOperation(String),

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

impl From<serde_json::Error> for NoSQLError {
	fn from(error: serde_json::Error) -> Self {
		NoSQLError::SerializationError(error.to_string())
	}
}

impl From<sqlx::Error> for NoSQLError {
	fn from(error: sqlx::Error) -> Self {
		match error {
			sqlx::Error::Io(_)
			| sqlx::Error::PoolTimedOut
			| sqlx::Error::PoolClosed
			| sqlx::Error::WorkerCrashed => NoSQLError::ConnectionError(error.to_string()),
			sqlx::Error::Configuration(_) => NoSQLError::ConfigError(error.to_string()),
			other => NoSQLError::ExecutionError(other.to_string()),
		}
	}
}

impl From<NoSQLError> for upow_core::Error {
	fn from(error: NoSQLError) -> Self {
		match error {
			NoSQLError::DuplicateKey { .. } => upow_core::Error::Conflict(error.to_string()),
			NoSQLError::SerializationError(_) | NoSQLError::InvalidOperation(_) => {
				upow_core::Error::Internal(error.to_string())
			}
			_ => upow_core::Error::BackendUnavailable(error.to_string()),
		}
	}
}
