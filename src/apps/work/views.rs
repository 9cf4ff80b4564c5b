//! Work entry view handlers

use super::models::{WorkEntryDraft, WorkEntryPatch};
use super::serializers::{DashboardResponse, EntryListResponse, WorkEntryResponse};
use crate::apps::profile::serializers::ProfileResponse;
use crate::config::state::AppState;
use std::sync::Arc;
use upow_auth::CurrentUser;
use upow_core::{Request, Response, Result};

/// Create a work entry owned by the caller
///
/// POST /api/entries/
/// Request body:
/// ```json
/// {
///   "title": "Built auth",
///   "description": "Sign-in and sign-up flows",
///   "category": "project",
///   "proofLinks": { "repo": "https://github.com/me/app" },
///   "date": "2024-05-01"
/// }
/// ```
/// Success response: 201 Created with the entry
/// Error responses:
/// - 401 Unauthorized: Not authenticated
/// - 422 Unprocessable Entity: Validation errors
pub async fn create_entry(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let draft: WorkEntryDraft = request.json()?;

	let entry = state.entries.create(&user.id, draft).await?;
	Response::created().with_json(&WorkEntryResponse::from(&entry))
}

/// Caller's entries, most recent first, with counts
///
/// GET /api/entries/
pub async fn list_own_entries(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let entries = state.entries.list_by_owner(&user.id).await?;
	Response::ok().with_json(&EntryListResponse::new(&entries))
}

/// GET /api/entries/{id}/
pub async fn fetch_entry(state: Arc<AppState>, request: Request) -> Result<Response> {
	let id = request.path_param("id")?;
	let entry = state.entries.get(id).await?;
	Response::ok().with_json(&WorkEntryResponse::from(&entry))
}

/// Edit an entry. Owner only.
///
/// PATCH /api/entries/{id}/
/// Error responses:
/// - 401 Unauthorized: Not authenticated
/// - 403 Forbidden: Caller does not own the entry
/// - 404 Not Found: Entry not found
/// - 422 Unprocessable Entity: Validation errors
pub async fn update_entry(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let id = request.path_param("id")?;
	let patch: WorkEntryPatch = request.json()?;

	let entry = state.entries.update(&user.id, id, patch).await?;
	Response::ok().with_json(&WorkEntryResponse::from(&entry))
}

/// Delete an entry. Owner only.
///
/// DELETE /api/entries/{id}/
/// Success response: 204 No Content
pub async fn delete_entry(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let id = request.path_param("id")?;

	state.entries.delete(&user.id, id).await?;
	Ok(Response::no_content())
}

/// Entries of any user, most recent first
///
/// GET /api/users/{id}/entries/
pub async fn list_user_entries(state: Arc<AppState>, request: Request) -> Result<Response> {
	let id = request.path_param("id")?;
	let profile = state.profiles.get(id).await?;
	let entries = state.entries.list_by_owner(&profile.id).await?;
	Response::ok().with_json(&EntryListResponse::new(&entries))
}

/// Profile, entries and counts of the caller
///
/// GET /api/dashboard/
pub async fn dashboard(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let profile = state.profiles.get(&user.id).await?;
	let entries = state.entries.list_by_owner(&user.id).await?;
	let list = EntryListResponse::new(&entries);

	Response::ok().with_json(&DashboardResponse {
		profile: ProfileResponse::from(&profile),
		entries: list.entries,
		stats: list.stats,
		share_url: state.share_url(&profile.id),
	})
}
