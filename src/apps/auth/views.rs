//! Auth view handlers

use super::accounts::{self, SignedIn};
use super::serializers::{AuthResponse, SignInRequest, SignUpRequest};
use crate::apps::profile::serializers::ProfileResponse;
use crate::config::state::AppState;
use std::sync::Arc;
use upow_auth::CurrentUser;
use upow_core::{Error, Request, Response, Result};

fn auth_response(signed_in: &SignedIn) -> AuthResponse {
	AuthResponse {
		token: signed_in.session.token.clone(),
		profile: ProfileResponse::from(&signed_in.profile),
	}
}

/// Register and sign in
///
/// POST /api/auth/signup/
/// Request body:
/// ```json
/// { "name": "Alice", "email": "alice@example.com", "password": "secret1" }
/// ```
/// Success response: 201 Created with token and profile
/// Error responses:
/// - 409 Conflict: Email already registered
/// - 422 Unprocessable Entity: Validation errors
pub async fn sign_up(state: Arc<AppState>, request: Request) -> Result<Response> {
	let body: SignUpRequest = request.json()?;
	let signed_in = accounts::sign_up(state.auth.as_ref(), &state.profiles, body).await?;
	Response::created().with_json(&auth_response(&signed_in))
}

/// POST /api/auth/signin/
/// Success response: 200 OK with token and profile
/// Error responses:
/// - 401 Unauthorized: Wrong email or password
pub async fn sign_in(state: Arc<AppState>, request: Request) -> Result<Response> {
	let body: SignInRequest = request.json()?;
	let signed_in = accounts::sign_in(state.auth.as_ref(), &state.profiles, body).await?;
	Response::ok().with_json(&auth_response(&signed_in))
}

/// Revoke the bearer token of this request
///
/// POST /api/auth/signout/
/// Success response: 204 No Content
pub async fn sign_out(state: Arc<AppState>, request: Request) -> Result<Response> {
	CurrentUser::from_request(&request)?;
	let token = request
		.bearer_token()
		.ok_or_else(|| Error::Authentication("Authentication required".to_string()))?;

	state.auth.sign_out(token).await?;
	Ok(Response::no_content())
}
