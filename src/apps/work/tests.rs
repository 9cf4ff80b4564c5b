//! Work entry store tests

use super::models::{Category, ProofLinks, ValidationStatus, WorkEntryPatch};
use super::store::NOT_FOUND_MESSAGE;
use crate::test_utils::{create_entry, create_user, date, draft, memory_state, state_for};
use rstest::rstest;
use upow_core::Error;

#[rstest]
#[tokio::test]
async fn test_create_entry_is_pending(#[values("memory", "sqlite")] backend: &str) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;

	let entry = state
		.entries
		.create(&alice.profile.id, draft("Built auth", Category::Project))
		.await
		.unwrap();

	assert_eq!(entry.user_id, alice.profile.id);
	assert_eq!(entry.title, "Built auth");
	assert_eq!(entry.category, Category::Project);
	assert_eq!(entry.status, ValidationStatus::Pending);
	assert_eq!(entry.date, date(2024, 5, 1));
	assert_eq!(state.entries.get(&entry.id).await.unwrap(), entry);
}

#[rstest]
#[tokio::test]
async fn test_entry_without_proof_links_has_empty_set(
	#[values("memory", "sqlite")] backend: &str,
) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;

	let mut input = draft("Fixed a bug", Category::Task);
	input.proof_links = ProofLinks {
		repo: Some(String::new()),
		demo: Some("  ".to_string()),
		..Default::default()
	};
	let entry = state.entries.create(&alice.profile.id, input).await.unwrap();

	let stored = state.entries.get(&entry.id).await.unwrap();
	assert!(stored.proof_links.is_empty());
}

#[rstest]
#[case("", "description")]
#[case("title", "")]
#[case("   ", "description")]
#[tokio::test]
async fn test_create_rejects_blank_fields(#[case] title: &str, #[case] description: &str) {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;

	let mut input = draft(title, Category::Task);
	input.description = description.to_string();
	let result = state.entries.create(&alice.profile.id, input).await;

	assert!(matches!(result, Err(Error::Validation(_))));
	assert!(
		state
			.entries
			.list_by_owner(&alice.profile.id)
			.await
			.unwrap()
			.is_empty()
	);
}

#[rstest]
#[tokio::test]
async fn test_create_rejects_relative_proof_link() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;

	let mut input = draft("Demo", Category::Project);
	input.proof_links.demo = Some("demo.example.com".to_string());

	assert!(matches!(
		state.entries.create(&alice.profile.id, input).await,
		Err(Error::Validation(_))
	));
}

#[rstest]
#[tokio::test]
async fn test_list_by_owner_orders_by_date_desc(#[values("memory", "sqlite")] backend: &str) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;
	let bob = create_user(&state, "Bob").await;

	for (title, day) in [("first", 1), ("third", 20), ("second", 10)] {
		let mut input = draft(title, Category::Task);
		input.date = date(2024, 3, day);
		state.entries.create(&alice.profile.id, input).await.unwrap();
	}
	create_entry(&state, &bob.profile.id, "not alice's").await;

	let titles: Vec<_> = state
		.entries
		.list_by_owner(&alice.profile.id)
		.await
		.unwrap()
		.into_iter()
		.map(|entry| entry.title)
		.collect();

	assert_eq!(titles, vec!["third", "second", "first"]);
}

#[rstest]
#[tokio::test]
async fn test_owner_can_update_fields(#[values("memory", "sqlite")] backend: &str) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	let updated = state
		.entries
		.update(
			&alice.profile.id,
			&entry.id,
			WorkEntryPatch {
				title: Some("Built auth v2".to_string()),
				category: Some(Category::Contribution),
				proof_links: Some(ProofLinks {
					repo: Some("https://github.com/alice/auth".to_string()),
					..Default::default()
				}),
				date: Some(date(2024, 6, 2)),
				..Default::default()
			},
		)
		.await
		.unwrap();

	assert_eq!(updated.title, "Built auth v2");
	assert_eq!(updated.description, entry.description);
	assert_eq!(updated.category, Category::Contribution);
	assert_eq!(
		updated.proof_links.repo.as_deref(),
		Some("https://github.com/alice/auth")
	);
	assert_eq!(updated.date, date(2024, 6, 2));
	assert_eq!(updated.user_id, alice.profile.id);
	assert_eq!(updated.status, ValidationStatus::Pending);
	assert_eq!(updated.created_at, entry.created_at);
}

#[rstest]
#[tokio::test]
async fn test_non_owner_cannot_update_or_delete(#[values("memory", "sqlite")] backend: &str) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;
	let bob = create_user(&state, "Bob").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	let update = state
		.entries
		.update(
			&bob.profile.id,
			&entry.id,
			WorkEntryPatch {
				title: Some("Stolen".to_string()),
				..Default::default()
			},
		)
		.await;
	let delete = state.entries.delete(&bob.profile.id, &entry.id).await;

	assert!(matches!(update, Err(Error::Unauthorized(_))));
	assert!(matches!(delete, Err(Error::Unauthorized(_))));
	assert_eq!(state.entries.get(&entry.id).await.unwrap(), entry);
}

#[rstest]
#[tokio::test]
async fn test_owner_can_delete() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;

	state.entries.delete(&alice.profile.id, &entry.id).await.unwrap();

	match state.entries.get(&entry.id).await {
		Err(Error::NotFound(message)) => assert_eq!(message, NOT_FOUND_MESSAGE),
		other => panic!("expected NotFound, got {:?}", other),
	}
	assert!(matches!(
		state.entries.delete(&alice.profile.id, &entry.id).await,
		Err(Error::NotFound(_))
	));
}

#[rstest]
#[tokio::test]
async fn test_update_unknown_entry_is_not_found() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;

	let result = state
		.entries
		.update(&alice.profile.id, "xyz", WorkEntryPatch::default())
		.await;

	assert!(matches!(result, Err(Error::NotFound(_))));
}

#[rstest]
#[tokio::test]
async fn test_mark_validated_only_swaps_pending() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let entry = create_entry(&state, &alice.profile.id, "Built auth").await;
	let now = chrono::Utc::now();

	assert!(state.entries.mark_validated(&entry.id, "v-1", "Bea", now).await.unwrap());
	assert!(!state.entries.mark_validated(&entry.id, "v-2", "Cal", now).await.unwrap());
	assert!(!state.entries.mark_validated("xyz", "v-2", "Cal", now).await.unwrap());

	match state.entries.get(&entry.id).await.unwrap().status {
		ValidationStatus::Validated {
			validator_id,
			validator_name,
			..
		} => {
			assert_eq!(validator_id, "v-1");
			assert_eq!(validator_name, "Bea");
		}
		ValidationStatus::Pending => panic!("entry should be validated"),
	}
}
