use upow_core::{AuthState, Error, Request, Result};

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
	pub id: String,
	pub email: String,
}

impl CurrentUser {
	/// Fails with `Authentication` unless the middleware authenticated the
	/// request.
	pub fn from_request(request: &Request) -> Result<Self> {
		let state = AuthState::from_extensions(&request.extensions);
		if !state.is_authenticated {
			return Err(Error::Authentication("Authentication required".to_string()));
		}
		Ok(Self {
			id: state.user_id,
			email: state.email,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_anonymous_request_is_rejected() {
		let request = Request::builder().build().unwrap();
		let result = CurrentUser::from_request(&request);

		assert!(matches!(result, Err(Error::Authentication(_))));
	}

	#[test]
	fn test_authenticated_request() {
		let request = Request::builder().build().unwrap();
		request
			.extensions
			.insert(AuthState::authenticated("u-1", "a@example.com"));

		let user = CurrentUser::from_request(&request).unwrap();
		assert_eq!(user.id, "u-1");
	}
}
