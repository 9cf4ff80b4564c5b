//! Applications
//!
//! - `auth`: sign-up, sign-in, sign-out and the client-side session
//! - `profile`: profiles and the public profile page
//! - `work`: work entries with proof links
//! - `validation`: peer validation of work entries

pub mod auth;
pub mod profile;
pub mod validation;
pub mod work;

/// Turn validator errors into the service error
pub(crate) fn validation_error(errors: validator::ValidationErrors) -> upow_core::Error {
	upow_core::Error::Validation(format!("Validation failed: {}", errors))
}
