//! URL configuration for profile application

use super::views;
use crate::config::state::{AppState, view};
use std::sync::Arc;
use upow_core::{Method, Result};
use upow_urls::Router;

/// Mounted under `/api/`
pub fn api_routes(state: &Arc<AppState>) -> Result<Router> {
	Router::new()
		.named_route(Method::GET, "/me/", "profile:me", view(state, views::me))?
		.named_route(
			Method::PATCH,
			"/me/",
			"profile:update",
			view(state, views::update_me),
		)
}

/// Mounted at the root
pub fn public_routes(state: &Arc<AppState>) -> Result<Router> {
	Router::new().named_route(
		Method::GET,
		"/profile/{id}/",
		"profile:public",
		view(state, views::public_profile),
	)
}
