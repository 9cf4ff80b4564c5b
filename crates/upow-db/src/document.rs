//! Document, filter and query option types

use crate::error::{NoSQLError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cmp::Ordering;

/// A stored record: a JSON object
pub type Document = serde_json::Map<String, Value>;

/// Serialize a value that must be a JSON object
pub fn to_document<T: Serialize>(value: &T) -> Result<Document> {
	match serde_json::to_value(value)? {
		Value::Object(map) => Ok(map),
		other => Err(NoSQLError::SerializationError(format!(
			"expected an object, got {}",
			other
		))),
	}
}

pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
	Ok(serde_json::from_value(Value::Object(document))?)
}

/// Field names are restricted so they can be embedded in JSON paths
pub(crate) fn validate_field_name(field: &str) -> Result<()> {
	if !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
		Ok(())
	} else {
		Err(NoSQLError::InvalidOperation(format!(
			"invalid field name: {:?}",
			field
		)))
	}
}

/// Conjunction of top-level field equality conditions.
///
/// A condition on a missing field only matches `Value::Null`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use upow_db::Filter;
///
/// let filter = Filter::new().eq("userId", "u-1").eq("status", "pending");
/// let doc = json!({"userId": "u-1", "status": "pending"});
///
/// assert!(filter.matches(doc.as_object().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
	conditions: Vec<(String, Value)>,
}

impl Filter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.conditions.push((field.into(), value.into()));
		self
	}

	pub fn conditions(&self) -> &[(String, Value)] {
		&self.conditions
	}

	pub fn is_empty(&self) -> bool {
		self.conditions.is_empty()
	}

	pub fn matches(&self, document: &Document) -> bool {
		self.conditions
			.iter()
			.all(|(field, expected)| document.get(field).unwrap_or(&Value::Null) == expected)
	}

	pub(crate) fn validate(&self) -> Result<()> {
		self.conditions
			.iter()
			.try_for_each(|(field, _)| validate_field_name(field))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
	Ascending,
	Descending,
}

#[derive(Debug, Clone, Default)]
pub struct FindOptions {
	pub sort: Vec<(String, SortOrder)>,
	pub limit: Option<usize>,
}

impl FindOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
		self.sort.push((field.into(), order));
		self
	}

	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	pub(crate) fn validate(&self) -> Result<()> {
		self.sort
			.iter()
			.try_for_each(|(field, _)| validate_field_name(field))
	}

	/// Ordering of two documents under the sort keys
	pub(crate) fn compare(&self, a: &Document, b: &Document) -> Ordering {
		for (field, order) in &self.sort {
			let ordering = compare_values(a.get(field), b.get(field));
			let ordering = match order {
				SortOrder::Ascending => ordering,
				SortOrder::Descending => ordering.reverse(),
			};
			if ordering != Ordering::Equal {
				return ordering;
			}
		}
		Ordering::Equal
	}
}

/// null < bool < number < string < everything else
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	fn rank(value: Option<&Value>) -> u8 {
		match value {
			None | Some(Value::Null) => 0,
			Some(Value::Bool(_)) => 1,
			Some(Value::Number(_)) => 2,
			Some(Value::String(_)) => 3,
			Some(_) => 4,
		}
	}

	match (a, b) {
		(Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
		(Some(Value::Number(x)), Some(Value::Number(y))) => {
			match (x.as_i64(), y.as_i64()) {
				(Some(x), Some(y)) => x.cmp(&y),
				_ => x
					.as_f64()
					.partial_cmp(&y.as_f64())
					.unwrap_or(Ordering::Equal),
			}
		}
		(Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
		_ => rank(a).cmp(&rank(b)),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
	/// Documents that existed and satisfied the preconditions
	pub matched_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
	pub deleted_count: u64,
}
