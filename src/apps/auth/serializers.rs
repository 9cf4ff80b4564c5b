//! Auth serializers

use crate::apps::profile::serializers::ProfileResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request data for sign-up
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
	#[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
	pub name: String,

	#[validate(email(message = "Invalid email format"))]
	pub email: String,

	#[validate(length(min = 6, message = "Password must be at least 6 characters"))]
	pub password: String,
}

/// Request data for sign-in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
	#[validate(length(min = 1, message = "Email cannot be empty"))]
	pub email: String,

	#[validate(length(min = 1, message = "Password cannot be empty"))]
	pub password: String,
}

/// Response for a successful sign-up or sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
	/// Bearer token for API authentication
	pub token: String,
	pub profile: ProfileResponse,
}
