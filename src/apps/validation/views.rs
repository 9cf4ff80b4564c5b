//! Validation view handlers

use super::serializers::ValidationPreviewResponse;
use crate::apps::work::serializers::WorkEntryResponse;
use crate::config::state::AppState;
use std::sync::Arc;
use upow_auth::CurrentUser;
use upow_core::{Request, Response, Result};

/// Preview an entry before validating it
///
/// GET /api/entries/{id}/validation/
/// Error responses:
/// - 404 Not Found: Entry not found
/// - 409 Conflict: Own entry, or already validated
pub async fn review(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let id = request.path_param("id")?;

	let preview = state.validation.review(id, &user.id).await?;
	Response::ok().with_json(&ValidationPreviewResponse::from(&preview))
}

/// Validate an entry as the caller. The caller's current profile name is
/// recorded as the validator name.
///
/// POST /api/entries/{id}/validation/
/// Success response: 200 OK with the validated entry
/// Error responses:
/// - 401 Unauthorized: Not authenticated
/// - 404 Not Found: Entry not found
/// - 409 Conflict: Own entry, or already validated
pub async fn validate(state: Arc<AppState>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let id = request.path_param("id")?;
	let validator = state.profiles.get(&user.id).await?;

	let entry = state
		.validation
		.validate(id, &validator.id, &validator.name)
		.await?;
	Response::ok().with_json(&WorkEntryResponse::from(&entry))
}
