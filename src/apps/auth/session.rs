//! Client-side session.
//!
//! Holds the signed-in identity, its token and profile, and publishes every
//! change on a watch channel so a UI can follow sign-in and sign-out.

use super::accounts::{self, SignedIn};
use super::serializers::{SignInRequest, SignUpRequest};
use crate::apps::profile::models::Profile;
use crate::apps::profile::store::ProfileStore;
use std::sync::Arc;
use tokio::sync::watch;
use upow_auth::{AuthProvider, Identity};
use upow_core::Result;

#[derive(Debug, Clone)]
pub struct SessionState {
	pub identity: Identity,
	pub token: String,
	pub profile: Profile,
}

impl From<SignedIn> for SessionState {
	fn from(signed_in: SignedIn) -> Self {
		Self {
			identity: signed_in.session.identity,
			token: signed_in.session.token,
			profile: signed_in.profile,
		}
	}
}

pub struct Session {
	auth: Arc<dyn AuthProvider>,
	profiles: Arc<ProfileStore>,
	state: watch::Sender<Option<SessionState>>,
}

impl Session {
	pub fn new(auth: Arc<dyn AuthProvider>, profiles: Arc<ProfileStore>) -> Self {
		let (state, _) = watch::channel(None);
		Self {
			auth,
			profiles,
			state,
		}
	}

	pub async fn sign_up(&self, request: SignUpRequest) -> Result<SessionState> {
		let signed_in = accounts::sign_up(self.auth.as_ref(), &self.profiles, request).await?;
		Ok(self.replace(signed_in.into()))
	}

	pub async fn sign_in(&self, request: SignInRequest) -> Result<SessionState> {
		let signed_in = accounts::sign_in(self.auth.as_ref(), &self.profiles, request).await?;
		Ok(self.replace(signed_in.into()))
	}

	/// Revoke the current token and clear the session. Signing out while
	/// signed out does nothing.
	pub async fn sign_out(&self) -> Result<()> {
		let Some(current) = self.current() else {
			return Ok(());
		};
		self.auth.sign_out(&current.token).await?;
		self.state.send_replace(None);
		Ok(())
	}

	/// Re-read the profile, e.g. after a settings update
	pub async fn refresh_profile(&self) -> Result<Option<Profile>> {
		let Some(mut current) = self.current() else {
			return Ok(None);
		};
		current.profile = self.profiles.get(&current.identity.uid).await?;
		let profile = current.profile.clone();
		self.state.send_replace(Some(current));
		Ok(Some(profile))
	}

	pub fn current(&self) -> Option<SessionState> {
		self.state.borrow().clone()
	}

	pub fn is_signed_in(&self) -> bool {
		self.state.borrow().is_some()
	}

	pub fn subscribe(&self) -> watch::Receiver<Option<SessionState>> {
		self.state.subscribe()
	}

	fn replace(&self, state: SessionState) -> SessionState {
		self.state.send_replace(Some(state.clone()));
		state
	}
}
