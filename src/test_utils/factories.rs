//! Record factories for tests.

use crate::apps::auth::accounts::{self, SignedIn};
use crate::apps::auth::serializers::SignUpRequest;
use crate::apps::work::models::{Category, ProofLinks, WorkEntry, WorkEntryDraft};
use crate::config::state::AppState;
use chrono::NaiveDate;

pub const TEST_PASSWORD: &str = "password123";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Sign up `name` with `{name}@example.com`
pub async fn create_user(state: &AppState, name: &str) -> SignedIn {
	accounts::sign_up(
		state.auth.as_ref(),
		&state.profiles,
		SignUpRequest {
			name: name.to_string(),
			email: format!("{}@example.com", name.to_lowercase()),
			password: TEST_PASSWORD.to_string(),
		},
	)
	.await
	.expect("sign up succeeds")
}

pub fn draft(title: &str, category: Category) -> WorkEntryDraft {
	WorkEntryDraft {
		title: title.to_string(),
		description: format!("Details about {}", title),
		category,
		proof_links: ProofLinks::default(),
		date: date(2024, 5, 1),
	}
}

pub async fn create_entry(state: &AppState, owner: &str, title: &str) -> WorkEntry {
	state
		.entries
		.create(owner, draft(title, Category::Project))
		.await
		.expect("entry is created")
}
