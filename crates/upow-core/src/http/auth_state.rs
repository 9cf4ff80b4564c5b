//! Authentication state stored in request extensions.

use super::Extensions;

/// Identity attached to a request by the authentication middleware.
///
/// Handlers read it back through [`AuthState::from_extensions`] or a
/// higher-level extractor such as `upow_auth::CurrentUser`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
	/// Authenticated identity uid. Empty when anonymous.
	pub user_id: String,
	pub email: String,
	pub is_authenticated: bool,
}

impl AuthState {
	pub fn authenticated(user_id: impl Into<String>, email: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			email: email.into(),
			is_authenticated: true,
		}
	}

	pub fn anonymous() -> Self {
		Self {
			user_id: String::new(),
			email: String::new(),
			is_authenticated: false,
		}
	}

	/// Read the state placed by the middleware, defaulting to anonymous
	pub fn from_extensions(extensions: &Extensions) -> Self {
		extensions.get::<AuthState>().unwrap_or_else(Self::anonymous)
	}
}
