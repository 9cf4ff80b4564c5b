//! URL configuration for validation application

use super::views;
use crate::config::state::{AppState, view};
use std::sync::Arc;
use upow_core::{Method, Result};
use upow_urls::Router;

/// Mounted under `/api/`
pub fn routes(state: &Arc<AppState>) -> Result<Router> {
	Router::new()
		.named_route(
			Method::GET,
			"/entries/{id}/validation/",
			"validation:review",
			view(state, views::review),
		)?
		.named_route(
			Method::POST,
			"/entries/{id}/validation/",
			"validation:validate",
			view(state, views::validate),
		)
}
