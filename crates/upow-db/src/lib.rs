//! Document store used by the upow service.
//!
//! Records live in named collections (`users`, `workEntries`, `credentials`)
//! as JSON documents keyed by id. The [`DocumentBackend`] trait is the only
//! thing the rest of the service depends on; [`MemoryBackend`] and
//! [`SqliteBackend`] implement it.
//!
//! Writes target exactly one document. `update_one` and `delete_one` take a
//! [`Filter`] of preconditions that must hold on the stored document at write
//! time, which gives callers an atomic compare-and-swap.

pub mod backend;
pub mod document;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod timestamp;

pub use backend::{DocumentBackend, connect};
pub use document::{
	DeleteResult, Document, Filter, FindOptions, SortOrder, UpdateResult, from_document,
	to_document,
};
pub use error::{NoSQLError, Result};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use timestamp::Timestamp;
