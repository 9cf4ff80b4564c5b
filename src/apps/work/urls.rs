//! URL configuration for work entry application

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
			"/dashboard/",
			"work:dashboard",
			view(state, views::dashboard),
		)?
		.named_route(
			Method::GET,
			"/entries/",
			"work:list",
			view(state, views::list_own_entries),
		)?
		.named_route(
			Method::POST,
			"/entries/",
			"work:create",
			view(state, views::create_entry),
		)?
		.named_route(
			Method::GET,
			"/entries/{id}/",
			"work:detail",
			view(state, views::fetch_entry),
		)?
		.named_route(
			Method::PATCH,
			"/entries/{id}/",
			"work:update",
			view(state, views::update_entry),
		)?
		.named_route(
			Method::DELETE,
			"/entries/{id}/",
			"work:delete",
			view(state, views::delete_entry),
		)?
		.named_route(
			Method::GET,
			"/users/{id}/entries/",
			"work:user-entries",
			view(state, views::list_user_entries),
		)
}
