//! Peer validation workflow tests

use crate::apps::profile::models::ProfileSettings;
use crate::apps::work::models::{
	Category, EntryStatus, ProofLinks, ValidationStatus, WorkEntry, WorkEntryDocument,
	WorkEntryPatch,
};
use crate::test_utils::{create_entry, create_user, memory_state, state_for};
use proptest::prelude::*;
use rstest::rstest;
use upow_core::Error;
use upow_db::Timestamp;

fn validator_of(entry: &WorkEntry) -> (&str, &str) {
	match &entry.status {
		ValidationStatus::Validated {
			validator_id,
			validator_name,
			..
		} => (validator_id.as_str(), validator_name.as_str()),
		ValidationStatus::Pending => panic!("entry {} is still pending", entry.id),
	}
}

#[rstest]
#[tokio::test]
async fn test_peer_validates_entry(#[values("memory", "sqlite")] backend: &str) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	let validated = state
		.validation
		.validate(&entry.id, &bea.profile.id, &bea.profile.name)
		.await
		.unwrap();

	assert_eq!(validated.status.status(), EntryStatus::Validated);
	assert_eq!(validator_of(&validated), (bea.profile.id.as_str(), "Bea"));
	// only the status and validation timestamps move
	assert_eq!(
		WorkEntry {
			status: entry.status.clone(),
			updated_at: entry.updated_at,
			..validated.clone()
		},
		entry
	);

	let stored = state.entries.get(&entry.id).await.unwrap();
	assert_eq!(stored, validated);
}

#[rstest]
#[tokio::test]
async fn test_owner_cannot_validate_own_entry(#[values("memory", "sqlite")] backend: &str) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	let result = state
		.validation
		.validate(&entry.id, &alice.profile.id, &alice.profile.name)
		.await;

	assert!(matches!(result, Err(Error::SelfValidation)));
	assert_eq!(
		state.entries.get(&entry.id).await.unwrap().status,
		ValidationStatus::Pending
	);
}

#[rstest]
#[tokio::test]
async fn test_second_validation_is_rejected() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let cal = create_user(&state, "Cal").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	state
		.validation
		.validate(&entry.id, &bea.profile.id, "Bea")
		.await
		.unwrap();
	let result = state
		.validation
		.validate(&entry.id, &cal.profile.id, "Cal")
		.await;

	assert!(matches!(result, Err(Error::AlreadyValidated)));
	let stored = state.entries.get(&entry.id).await.unwrap();
	assert_eq!(validator_of(&stored), (bea.profile.id.as_str(), "Bea"));
}

#[rstest]
#[tokio::test]
async fn test_unknown_entry_is_not_found() {
	let state = memory_state();
	let bea = create_user(&state, "Bea").await;

	assert!(matches!(
		state.validation.validate("xyz", &bea.profile.id, "Bea").await,
		Err(Error::NotFound(_))
	));
	assert!(matches!(
		state.validation.review("xyz", &bea.profile.id).await,
		Err(Error::NotFound(_))
	));
}

#[rstest]
#[tokio::test]
async fn test_unknown_entry_wins_over_blank_name() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	assert!(matches!(
		state.validation.validate("xyz", &bea.profile.id, "").await,
		Err(Error::NotFound(_))
	));
	assert!(matches!(
		state.validation.validate(&entry.id, &alice.profile.id, "").await,
		Err(Error::SelfValidation)
	));
}

#[rstest]
#[tokio::test]
async fn test_self_check_precedes_already_validated() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;
	state
		.validation
		.validate(&entry.id, &bea.profile.id, "Bea")
		.await
		.unwrap();

	let result = state
		.validation
		.validate(&entry.id, &alice.profile.id, "Alice")
		.await;

	assert!(matches!(result, Err(Error::SelfValidation)));
}

#[rstest]
#[tokio::test]
async fn test_blank_validator_name_is_rejected() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	let result = state
		.validation
		.validate(&entry.id, &bea.profile.id, "   ")
		.await;

	assert!(matches!(result, Err(Error::Validation(_))));
	assert!(!state.entries.get(&entry.id).await.unwrap().status.is_validated());
}

#[rstest]
#[tokio::test]
async fn test_review_returns_entry_and_owner() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	let preview = state
		.validation
		.review(&entry.id, &bea.profile.id)
		.await
		.unwrap();

	assert_eq!(preview.entry, entry);
	assert_eq!(preview.owner, Some(alice.profile.clone()));
	// review writes nothing
	assert_eq!(
		state.entries.get(&entry.id).await.unwrap().status,
		ValidationStatus::Pending
	);
	assert!(matches!(
		state.validation.review(&entry.id, &alice.profile.id).await,
		Err(Error::SelfValidation)
	));
}

#[rstest]
#[tokio::test]
async fn test_concurrent_validations_have_one_winner(
	#[values("memory", "sqlite")] backend: &str,
) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let cal = create_user(&state, "Cal").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	let (first, second) = tokio::join!(
		state.validation.validate(&entry.id, &bea.profile.id, "Bea"),
		state.validation.validate(&entry.id, &cal.profile.id, "Cal"),
	);

	let (winner, loser) = match (first, second) {
		(Ok(winner), Err(loser)) | (Err(loser), Ok(winner)) => (winner, loser),
		(first, second) => panic!("expected one winner, got {:?} and {:?}", first, second),
	};
	assert!(matches!(loser, Error::AlreadyValidated));

	let stored = state.entries.get(&entry.id).await.unwrap();
	assert_eq!(stored, winner);
}

#[rstest]
#[tokio::test]
async fn test_validator_name_is_a_snapshot() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;
	state
		.validation
		.validate(&entry.id, &bea.profile.id, &bea.profile.name)
		.await
		.unwrap();

	state
		.profiles
		.update_settings(
			&bea.profile.id,
			&bea.profile.id,
			ProfileSettings {
				name: Some("Beatrice".to_string()),
				..Default::default()
			},
		)
		.await
		.unwrap();

	let stored = state.entries.get(&entry.id).await.unwrap();
	assert_eq!(validator_of(&stored).1, "Bea");
}

#[rstest]
#[tokio::test]
async fn test_owner_edit_keeps_validation() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bea = create_user(&state, "Bea").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;
	let validated = state
		.validation
		.validate(&entry.id, &bea.profile.id, "Bea")
		.await
		.unwrap();

	let updated = state
		.entries
		.update(
			&alice.profile.id,
			&entry.id,
			WorkEntryPatch {
				description: Some("More detail".to_string()),
				..Default::default()
			},
		)
		.await
		.unwrap();

	assert_eq!(updated.status, validated.status);
}

fn document(
	status: EntryStatus,
	validator_id: Option<String>,
	validator_name: Option<String>,
	validated_at: Option<Timestamp>,
) -> WorkEntryDocument {
	WorkEntryDocument {
		id: "e-1".to_string(),
		user_id: "u-1".to_string(),
		title: "Built auth".to_string(),
		description: "Details".to_string(),
		category: Category::Task,
		proof_links: ProofLinks::default(),
		date: Timestamp::from_micros(0),
		status,
		validator_id,
		validator_name,
		validated_at,
		created_at: Timestamp::from_micros(0),
		updated_at: Timestamp::from_micros(0),
	}
}

proptest! {
	/// Validator fields are present exactly when the status is validated
	#[test]
	fn test_stored_status_must_agree_with_validator_fields(
		validated in any::<bool>(),
		validator_id in proptest::option::of("[a-z0-9]{1,12}"),
		validator_name in proptest::option::of("[A-Za-z ]{1,20}"),
		validated_at in proptest::option::of(0i64..4_000_000_000_000_000),
	) {
		let status = if validated { EntryStatus::Validated } else { EntryStatus::Pending };
		let all_present =
			validator_id.is_some() && validator_name.is_some() && validated_at.is_some();
		let none_present =
			validator_id.is_none() && validator_name.is_none() && validated_at.is_none();

		let result = WorkEntry::try_from(document(
			status,
			validator_id,
			validator_name,
			validated_at.map(Timestamp::from_micros),
		));

		let consistent = if validated { all_present } else { none_present };
		prop_assert_eq!(result.is_ok(), consistent);
		if let Ok(entry) = result {
			prop_assert_eq!(entry.status.is_validated(), validated);
		}
	}
}
