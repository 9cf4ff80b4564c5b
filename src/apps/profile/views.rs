//! Profile view handlers

use super::models::ProfileSettings;
use super::serializers::{ProfileResponse, PublicProfilePage, PublicProfileResponse};
use crate::apps::work::models::EntryStats;
use crate::apps::work::serializers::WorkEntryResponse;
use crate::config::state::AppState;
use std::sync::Arc;
use upow_auth::CurrentUser;
use upow_core::{Request, Response, Result};

/// Current user's profile
///
/// GET /api/me/
pub async fn me(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let profile = state.profiles.get(&user.id).await?;
	Response::ok().with_json(&ProfileResponse::from(&profile))
}

/// Update name, role or bio of the current user's profile
///
/// PATCH /api/me/
/// Request body (all fields optional):
/// ```json
/// { "name": "Alice", "role": "Engineer", "bio": "" }
/// ```
/// An empty role or bio clears it.
pub async fn update_me(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let patch: ProfileSettings = request.json()?;

	let profile = state
		.profiles
		.update_settings(&user.id, &user.id, patch)
		.await?;
	Response::ok().with_json(&ProfileResponse::from(&profile))
}

/// Public profile page
///
/// GET /profile/{id}/
/// Success response: 200 OK with profile, entries, validated count and share URL
/// Error responses:
/// - 404 Not Found: Profile not found
pub async fn public_profile(state: Arc<AppState>, request: Request) -> Result<Response> {
	let id = request.path_param("id")?;
	let profile = state.profiles.get(id).await?;
	let entries = state.entries.list_by_owner(&profile.id).await?;

	let page = PublicProfilePage {
		profile: PublicProfileResponse::from(&profile),
		validated_count: EntryStats::from_entries(&entries).validated,
		share_url: state.share_url(&profile.id),
		entries: entries.iter().map(WorkEntryResponse::from).collect(),
	};
	Response::ok().with_json(&page)
}
