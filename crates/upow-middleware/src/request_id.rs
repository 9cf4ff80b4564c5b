use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;
use upow_core::{Handler, Middleware, Request, Response, Result};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id stored in request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Tags every request with an id.
///
/// An incoming `X-Request-Id` header is reused, otherwise a UUID v4 is
/// generated. The id is echoed on the response and recorded on a tracing
/// span wrapping the rest of the chain.
#[derive(Debug, Default)]
pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Middleware for RequestIdMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let request_id = request
			.headers
			.get(REQUEST_ID_HEADER)
			.and_then(|value| value.to_str().ok())
			.filter(|value| !value.is_empty() && value.len() <= 128)
			.map(str::to_string)
			.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

		request.extensions.insert(RequestId(request_id.clone()));

		let span = tracing::info_span!("request", request_id = %request_id);
		let response = next.handle(request).instrument(span).await?;
		Ok(response.with_header(REQUEST_ID_HEADER, &request_id))
	}
}
