//! Sign-up and sign-in flows shared by the HTTP views and [`Session`](super::session::Session)

use super::serializers::{SignInRequest, SignUpRequest};
use crate::apps::profile::models::Profile;
use crate::apps::profile::store::ProfileStore;
use crate::apps::validation_error;
use upow_auth::{AuthProvider, AuthSession};
use upow_core::Result;
use validator::Validate;

/// A signed-in identity and its profile
#[derive(Debug, Clone)]
pub struct SignedIn {
	pub session: AuthSession,
	pub profile: Profile,
}

/// Register the account, create its profile and sign in
pub async fn sign_up(
	auth: &dyn AuthProvider,
	profiles: &ProfileStore,
	request: SignUpRequest,
) -> Result<SignedIn> {
	let request = SignUpRequest {
		name: request.name.trim().to_string(),
		email: request.email.trim().to_string(),
		..request
	};
	request.validate().map_err(validation_error)?;

	let identity = auth.create_account(&request.email, &request.password).await?;
	let profile = match profiles
		.create(&identity.uid, &request.name, &identity.email)
		.await
	{
		Ok(profile) => profile,
		Err(e) => {
			tracing::error!(uid = %identity.uid, error = %e, "account created without a profile");
			return Err(e);
		}
	};

	let session = auth.sign_in(&identity.email, &request.password).await?;
	Ok(SignedIn { session, profile })
}

pub async fn sign_in(
	auth: &dyn AuthProvider,
	profiles: &ProfileStore,
	request: SignInRequest,
) -> Result<SignedIn> {
	request.validate().map_err(validation_error)?;

	let session = auth.sign_in(&request.email, &request.password).await?;
	let profile = profiles.get(&session.identity.uid).await?;
	Ok(SignedIn { session, profile })
}
