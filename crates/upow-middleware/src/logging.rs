use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use upow_core::{Handler, Middleware, Request, Response, Result};

/// Logs method, path, status and duration of every request
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let start = Instant::now();
		let method = request.method.to_string();
		let path = request.path().to_string();

		let result = next.handle(request).await;

		let elapsed_ms = start.elapsed().as_millis() as u64;
		match &result {
			Ok(response) => {
				tracing::info!(
					method = %method,
					path = %path,
					status = response.status.as_u16(),
					elapsed_ms,
					"request completed"
				);
			}
			Err(err) => {
				tracing::warn!(
					method = %method,
					path = %path,
					status = err.status_code(),
					error = %err,
					elapsed_ms,
					"request failed"
				);
			}
		}

		result
	}
}
