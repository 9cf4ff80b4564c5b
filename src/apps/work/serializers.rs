//! Work entry serializers

use super::models::{Category, EntryStats, EntryStatus, ProofLinks, ValidationStatus, WorkEntry};
use crate::apps::profile::serializers::ProfileResponse;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Work entry on the wire. Validator fields are present only when validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntryResponse {
	pub id: String,
	pub user_id: String,
	pub title: String,
	pub description: String,
	pub category: Category,
	pub proof_links: ProofLinks,
	pub date: NaiveDate,
	pub status: EntryStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validator_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validator_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validated_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<&WorkEntry> for WorkEntryResponse {
	fn from(entry: &WorkEntry) -> Self {
		let (validator_id, validator_name, validated_at) = match &entry.status {
			ValidationStatus::Pending => (None, None, None),
			ValidationStatus::Validated {
				validator_id,
				validator_name,
				validated_at,
			} => (
				Some(validator_id.clone()),
				Some(validator_name.clone()),
				Some(*validated_at),
			),
		};

		Self {
			id: entry.id.clone(),
			user_id: entry.user_id.clone(),
			title: entry.title.clone(),
			description: entry.description.clone(),
			category: entry.category,
			proof_links: entry.proof_links.clone(),
			date: entry.date,
			status: entry.status.status(),
			validator_id,
			validator_name,
			validated_at,
			created_at: entry.created_at,
			updated_at: entry.updated_at,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryListResponse {
	pub entries: Vec<WorkEntryResponse>,
	pub stats: EntryStats,
}

impl EntryListResponse {
	pub fn new(entries: &[WorkEntry]) -> Self {
		Self {
			entries: entries.iter().map(WorkEntryResponse::from).collect(),
			stats: EntryStats::from_entries(entries),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
	pub profile: ProfileResponse,
	pub entries: Vec<WorkEntryResponse>,
	pub stats: EntryStats,
	pub share_url: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn entry(status: ValidationStatus) -> WorkEntry {
		let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
		WorkEntry {
			id: "e-1".to_string(),
			user_id: "u-1".to_string(),
			title: "Built auth".to_string(),
			description: "Login and signup".to_string(),
			category: Category::Project,
			proof_links: ProofLinks::default(),
			date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
			status,
			created_at: at,
			updated_at: at,
		}
	}

	#[test]
	fn test_pending_entry_has_no_validator_fields() {
		let value = serde_json::to_value(WorkEntryResponse::from(&entry(
			ValidationStatus::Pending,
		)))
		.unwrap();

		assert_eq!(value["status"], "pending");
		assert_eq!(value["date"], "2024-05-01");
		assert_eq!(value["proofLinks"], serde_json::json!({}));
		assert!(value.get("validatorId").is_none());
		assert!(value.get("validatorName").is_none());
		assert!(value.get("validatedAt").is_none());
	}

	#[test]
	fn test_validated_entry_carries_validator_snapshot() {
		let validated_at = Utc.with_ymd_and_hms(2024, 5, 3, 8, 0, 0).unwrap();
		let value = serde_json::to_value(WorkEntryResponse::from(&entry(
			ValidationStatus::Validated {
				validator_id: "u-2".to_string(),
				validator_name: "Bea".to_string(),
				validated_at,
			},
		)))
		.unwrap();

		assert_eq!(value["status"], "validated");
		assert_eq!(value["validatorId"], "u-2");
		assert_eq!(value["validatorName"], "Bea");
		assert!(value.get("validatedAt").is_some());
	}
}
