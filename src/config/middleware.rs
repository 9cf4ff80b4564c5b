//! Server middleware

use crate::config::state::AppState;
use std::sync::Arc;
use upow_auth::JwtAuthenticationMiddleware;
use upow_core::Middleware;
use upow_middleware::{LoggingMiddleware, RequestIdMiddleware};

/// Middleware stack, outermost first:
/// - Request ID for log correlation
/// - Logging of method, path, status and latency
/// - Bearer token authentication
pub fn create_middleware_stack(state: &AppState) -> Vec<Arc<dyn Middleware>> {
	vec![
		Arc::new(RequestIdMiddleware::new()),
		Arc::new(LoggingMiddleware::new()),
		Arc::new(JwtAuthenticationMiddleware::new(state.auth.clone())),
	]
}
