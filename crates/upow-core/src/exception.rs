//! Error taxonomy shared across the service.
//!
//! Every store, workflow and view returns [`Result<T>`]. The HTTP layer turns an
//! [`Error`] into a JSON response through `impl From<Error> for Response`, using
//! [`Error::status_code`], [`Error::kind`] and [`Error::user_message`].

use thiserror::Error;

/// Message shown whenever an upstream provider call fails.
pub const BACKEND_UNAVAILABLE_MESSAGE: &str =
	"The service is temporarily unavailable. Please try again.";

const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// Referenced record does not exist
	#[error("{0}")]
	NotFound(String),

	/// Caller is authenticated but does not own the record
	#[error("{0}")]
	Unauthorized(String),

	/// Missing, invalid, expired or revoked credentials
	#[error("{0}")]
	Authentication(String),

	#[error("You cannot validate your own work entries.")]
	SelfValidation,

	#[error("This work entry has already been validated.")]
	AlreadyValidated,

	/// Request payload failed field validation
	#[error("{0}")]
	Validation(String),

	#[error("{0}")]
	Conflict(String),

	/// An upstream provider call failed. The detail is for logs only.
	#[error("Backend unavailable: {0}")]
	BackendUnavailable(String),

	#[error("{0}")]
	Http(String),

	#[error("Method not allowed")]
	MethodNotAllowed,

	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// HTTP status code for this error
	///
	/// # Examples
	///
	/// ```
	/// use upow_core::Error;
	///
	/// assert_eq!(Error::NotFound("missing".into()).status_code(), 404);
	/// assert_eq!(Error::SelfValidation.status_code(), 409);
	/// ```
	pub fn status_code(&self) -> u16 {
		match self {
			Error::NotFound(_) => 404,
			Error::Unauthorized(_) => 403,
			Error::Authentication(_) => 401,
			Error::SelfValidation | Error::AlreadyValidated | Error::Conflict(_) => 409,
			Error::Validation(_) => 422,
			Error::BackendUnavailable(_) => 503,
			Error::Http(_) | Error::Serialization(_) => 400,
			Error::MethodNotAllowed => 405,
			Error::Internal(_) => 500,
		}
	}

	/// Stable machine-readable identifier, emitted as `code` in error bodies
	pub fn kind(&self) -> &'static str {
		match self {
			Error::NotFound(_) => "not_found",
			Error::Unauthorized(_) => "unauthorized",
			Error::Authentication(_) => "authentication_failed",
			Error::SelfValidation => "self_validation",
			Error::AlreadyValidated => "already_validated",
			Error::Validation(_) => "validation_error",
			Error::Conflict(_) => "conflict",
			Error::BackendUnavailable(_) => "backend_unavailable",
			Error::Http(_) => "bad_request",
			Error::MethodNotAllowed => "method_not_allowed",
			Error::Serialization(_) => "invalid_body",
			Error::Internal(_) => "internal_error",
		}
	}

	/// Message safe to show to an end user.
	///
	/// Provider and internal failures collapse to fixed strings so that
	/// upstream details never reach the client.
	pub fn user_message(&self) -> String {
		match self {
			Error::BackendUnavailable(_) => BACKEND_UNAVAILABLE_MESSAGE.to_string(),
			Error::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
			other => other.to_string(),
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(error: serde_json::Error) -> Self {
		Error::Serialization(error.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Error::NotFound("x".into()), 404, "not_found")]
	#[case(Error::Unauthorized("x".into()), 403, "unauthorized")]
	#[case(Error::Authentication("x".into()), 401, "authentication_failed")]
	#[case(Error::SelfValidation, 409, "self_validation")]
	#[case(Error::AlreadyValidated, 409, "already_validated")]
	#[case(Error::Validation("x".into()), 422, "validation_error")]
	#[case(Error::BackendUnavailable("x".into()), 503, "backend_unavailable")]
	#[case(Error::MethodNotAllowed, 405, "method_not_allowed")]
	#[case(Error::Internal("x".into()), 500, "internal_error")]
	fn test_status_and_kind(
		#[case] error: Error,
		#[case] status: u16,
		#[case] kind: &str,
	) {
		assert_eq!(error.status_code(), status);
		assert_eq!(error.kind(), kind);
	}

	#[rstest]
	fn test_backend_detail_is_hidden_from_users() {
		let error = Error::BackendUnavailable("connection refused: 10.0.0.3:5432".into());

		assert_eq!(error.user_message(), BACKEND_UNAVAILABLE_MESSAGE);
		assert!(error.to_string().contains("connection refused"));
	}

	#[rstest]
	fn test_policy_messages() {
		assert_eq!(
			Error::SelfValidation.user_message(),
			"You cannot validate your own work entries."
		);
		assert_eq!(
			Error::AlreadyValidated.user_message(),
			"This work entry has already been validated."
		);
	}
}
