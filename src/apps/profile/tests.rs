//! Profile store tests

use super::models::ProfileSettings;
use crate::test_utils::{
	TestContext, create_entry, create_user, memory_state, state_for, test_context,
};
use rstest::rstest;
use upow_core::Error;

#[rstest]
#[tokio::test]
async fn test_sign_up_creates_profile(#[values("memory", "sqlite")] backend: &str) {
	let state = state_for(backend).await;
	let alice = create_user(&state, "Alice").await;

	let profile = state.profiles.get(&alice.session.identity.uid).await.unwrap();
	assert_eq!(profile.id, alice.session.identity.uid);
	assert_eq!(profile.name, "Alice");
	assert_eq!(profile.email, "alice@example.com");
	assert!(profile.role.is_none());
}

#[rstest]
#[tokio::test]
async fn test_update_settings_sets_and_clears_fields() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let id = alice.profile.id.as_str();

	let updated = state
		.profiles
		.update_settings(
			id,
			id,
			ProfileSettings {
				name: Some("  Alice A. ".to_string()),
				role: Some("Engineer".to_string()),
				bio: Some("Builds things".to_string()),
			},
		)
		.await
		.unwrap();
	assert_eq!(updated.name, "Alice A.");
	assert_eq!(updated.role.as_deref(), Some("Engineer"));
	assert!(updated.updated_at >= updated.created_at);

	let cleared = state
		.profiles
		.update_settings(
			id,
			id,
			ProfileSettings {
				role: Some(String::new()),
				..Default::default()
			},
		)
		.await
		.unwrap();
	assert!(cleared.role.is_none());
	assert_eq!(cleared.bio.as_deref(), Some("Builds things"));
	assert_eq!(cleared.name, "Alice A.");
}

#[rstest]
#[tokio::test]
async fn test_update_settings_is_owner_only() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let bob = create_user(&state, "Bob").await;

	let result = state
		.profiles
		.update_settings(
			&bob.profile.id,
			&alice.profile.id,
			ProfileSettings {
				name: Some("Mallory".to_string()),
				..Default::default()
			},
		)
		.await;

	assert!(matches!(result, Err(Error::Unauthorized(_))));
	let unchanged = state.profiles.get(&alice.profile.id).await.unwrap();
	assert_eq!(unchanged.name, "Alice");
}

#[rstest]
#[case(Some(String::new()), None, None)]
#[case(Some("   ".to_string()), None, None)]
#[case(Some("n".repeat(101)), None, None)]
#[case(None, Some("r".repeat(101)), None)]
#[case(None, None, Some("b".repeat(1001)))]
#[tokio::test]
async fn test_update_settings_limits(
	#[case] name: Option<String>,
	#[case] role: Option<String>,
	#[case] bio: Option<String>,
) {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	let id = alice.profile.id.as_str();

	let result = state
		.profiles
		.update_settings(
			id,
			id,
			ProfileSettings { name, role, bio },
		)
		.await;

	assert!(matches!(result, Err(Error::Validation(_))));
}

#[rstest]
#[tokio::test]
async fn test_missing_profile_is_not_found() {
	let state = memory_state();
	assert!(matches!(
		state.profiles.get("nobody").await,
		Err(Error::NotFound(_))
	));
	assert!(state.profiles.find("nobody").await.unwrap().is_none());
}

#[rstest]
#[tokio::test]
async fn test_share_url_points_at_public_page() {
	let state = memory_state();
	let alice = create_user(&state, "Alice").await;
	create_entry(&state, &alice.profile.id, "Built auth").await;

	assert_eq!(
		state.share_url(&alice.profile.id),
		format!("https://upow.test/profile/{}", alice.profile.id)
	);
}

#[rstest]
#[tokio::test]
async fn test_settings_view_updates_own_profile(
	#[future] test_context: TestContext,
) {
	let context = test_context.await;
	let alice = create_user(&context.state, "Alice").await;
	context.client.set_token(alice.session.token.clone()).await;

	let response = context
		.client
		.patch("/api/me/", &serde_json::json!({ "role": "Engineer", "bio": "Builds things" }))
		.await
		.unwrap();

	assert_eq!(response.status_code(), 200, "{}", response.text());
	let body: serde_json::Value = response.json();
	assert_eq!(body["role"], "Engineer");
	assert_eq!(body["email"], "alice@example.com");

	let response = context
		.client
		.patch("/api/me/", &serde_json::json!({ "email": "new@example.com" }))
		.await
		.unwrap();
	assert_eq!(response.status_code(), 400);
}

#[rstest]
#[tokio::test]
async fn test_public_profile_view_hides_email(
	#[future] test_context: TestContext,
) {
	let context = test_context.await;
	let alice = create_user(&context.state, "Alice").await;
	create_entry(&context.state, &alice.profile.id, "Built auth").await;

	let anonymous = context.new_client();
	let response = anonymous
		.get(&format!("/profile/{}/", alice.profile.id))
		.await
		.unwrap();

	assert_eq!(response.status_code(), 200);
	let page: serde_json::Value = response.json();
	assert_eq!(page["profile"]["name"], "Alice");
	assert!(page["profile"].get("email").is_none());
	assert_eq!(page["entries"].as_array().map(Vec::len), Some(1));
	assert_eq!(page["validatedCount"], 0);
	assert_eq!(
		page["shareUrl"],
		format!("https://upow.test/profile/{}", alice.profile.id)
	);

	let response = anonymous.get("/profile/nobody/").await.unwrap();
	assert_eq!(response.status_code(), 404);
}
