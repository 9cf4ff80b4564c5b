//! URL configuration for auth application

use super::views;
use crate::config::state::{AppState, view};
use std::sync::Arc;
use upow_core::{Method, Result};
use upow_urls::Router;

/// Mounted under `/api/auth/`
pub fn routes(state: &Arc<AppState>) -> Result<Router> {
	Router::new()
		.named_route(
			Method::POST,
			"/signup/",
			"auth:signup",
			view(state, views::sign_up),
		)?
		.named_route(
			Method::POST,
			"/signin/",
			"auth:signin",
			view(state, views::sign_in),
		)?
		.named_route(
			Method::POST,
			"/signout/",
			"auth:signout",
			view(state, views::sign_out),
		)
}
