//! URL configuration for the upow service
//!
//! The `url_patterns` routes URLs to handlers.

use crate::apps;
use crate::config::state::{AppState, view};
use serde_json::json;
use std::sync::Arc;
use upow_core::{Method, Request, Response, Result};
use upow_urls::Router;

/// Liveness probe
///
/// GET /health/
pub async fn health(state: Arc<AppState>, _request: Request) -> Result<Response> {
	Response::ok().with_json(&json!({
		"status": "ok",
		"backend": state.store.backend_name(),
	}))
}

pub fn url_patterns(state: Arc<AppState>) -> Result<Router> {
	Router::new()
		.named_route(Method::GET, "/health/", "health", view(&state, health))?
		.include("/api/auth/", apps::auth::urls::routes(&state)?)?
		.include("/api/", apps::profile::urls::api_routes(&state)?)?
		.include("/api/", apps::work::urls::routes(&state)?)?
		.include("/api/", apps::validation::urls::routes(&state)?)?
		.include("", apps::profile::urls::public_routes(&state)?)
}
