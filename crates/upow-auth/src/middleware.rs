use crate::provider::AuthProvider;
use async_trait::async_trait;
use std::sync::Arc;
use upow_core::{AuthState, Handler, Middleware, Request, Response, Result};

/// Resolves `Authorization: Bearer` tokens into an [`AuthState`].
///
/// Requests without a valid token continue as anonymous; views that need an
/// identity reject them through [`CurrentUser`](crate::CurrentUser).
pub struct JwtAuthenticationMiddleware {
	provider: Arc<dyn AuthProvider>,
}

impl JwtAuthenticationMiddleware {
	pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
		Self { provider }
	}
}

#[async_trait]
impl Middleware for JwtAuthenticationMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let state = match request.bearer_token() {
			Some(token) => match self.provider.verify(token).await {
				Ok(identity) => AuthState::authenticated(identity.uid, identity.email),
				Err(e) => {
					tracing::debug!(error = %e, "bearer token rejected");
					AuthState::anonymous()
				}
			},
			None => AuthState::anonymous(),
		};

		request.extensions.insert(state);
		next.handle(request).await
	}
}
