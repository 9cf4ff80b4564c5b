//! Credential provider.
//!
//! Credentials live in the `credentials` collection keyed by the normalized
//! email, so the store's duplicate-key check enforces email uniqueness.

use crate::hasher::{Argon2Hasher, PasswordHasher};
use crate::jwt::JwtAuth;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use upow_core::{Error, Result};
use upow_db::{DocumentBackend, NoSQLError, Timestamp, from_document, to_document};

pub const CREDENTIALS_COLLECTION: &str = "credentials";
pub const MIN_PASSWORD_LENGTH: usize = 6;

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub uid: String,
	pub email: String,
}

#[derive(Debug, Clone)]
pub struct AuthSession {
	pub identity: Identity,
	pub token: String,
}

/// Identity lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
	SignedUp(Identity),
	SignedIn(Identity),
	SignedOut(Identity),
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
	/// Register a new account. The email is trimmed and lower-cased.
	async fn create_account(&self, email: &str, password: &str) -> Result<Identity>;

	async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

	/// Revoke the token. Later `verify` calls with it fail.
	async fn sign_out(&self, token: &str) -> Result<()>;

	/// Identity behind a bearer token
	async fn verify(&self, token: &str) -> Result<Identity>;

	fn subscribe(&self) -> broadcast::Receiver<IdentityEvent>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialDocument {
	uid: String,
	email: String,
	password_hash: String,
	created_at: Timestamp,
}

pub fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

/// [`AuthProvider`] backed by a [`DocumentBackend`]
pub struct DocumentAuthProvider {
	store: Arc<dyn DocumentBackend>,
	jwt: JwtAuth,
	hasher: Arc<dyn PasswordHasher>,
	/// Revoked token ids with their expiry, pruned once expired
	revoked: Mutex<HashMap<String, i64>>,
	events: broadcast::Sender<IdentityEvent>,
}

impl DocumentAuthProvider {
	pub fn new(store: Arc<dyn DocumentBackend>, jwt: JwtAuth) -> Self {
		let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
		Self {
			store,
			jwt,
			hasher: Arc::new(Argon2Hasher::new()),
			revoked: Mutex::new(HashMap::new()),
			events,
		}
	}

	pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
		self.hasher = hasher;
		self
	}

	fn publish(&self, event: IdentityEvent) {
		// no subscribers is fine
		let _ = self.events.send(event);
	}

	async fn find_credential(&self, email: &str) -> Result<Option<CredentialDocument>> {
		let document = self.store.find_by_id(CREDENTIALS_COLLECTION, email).await?;
		document
			.map(|document| from_document(document).map_err(Error::from))
			.transpose()
	}
}

#[async_trait]
impl AuthProvider for DocumentAuthProvider {
	async fn create_account(&self, email: &str, password: &str) -> Result<Identity> {
		let email = normalize_email(email);
		if email.is_empty() {
			return Err(Error::Validation("Email is required.".to_string()));
		}
		if password.chars().count() < MIN_PASSWORD_LENGTH {
			return Err(Error::Validation(format!(
				"Password must be at least {} characters.",
				MIN_PASSWORD_LENGTH
			)));
		}

		let credential = CredentialDocument {
			uid: uuid::Uuid::new_v4().to_string(),
			email: email.clone(),
			password_hash: self.hasher.hash(password)?,
			created_at: Timestamp::now(),
		};

		match self
			.store
			.insert_one(CREDENTIALS_COLLECTION, &email, to_document(&credential)?)
			.await
		{
			Ok(()) => {}
			Err(NoSQLError::DuplicateKey { .. }) => {
				return Err(Error::Conflict(
					"An account with this email already exists.".to_string(),
				));
			}
			Err(e) => return Err(e.into()),
		}

		let identity = Identity {
			uid: credential.uid,
			email,
		};
		tracing::info!(uid = %identity.uid, "account created");
		self.publish(IdentityEvent::SignedUp(identity.clone()));
		Ok(identity)
	}

	async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
		let email = normalize_email(email);
		let Some(credential) = self.find_credential(&email).await? else {
			return Err(Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()));
		};
		if !self.hasher.verify(password, &credential.password_hash)? {
			tracing::warn!(uid = %credential.uid, "password mismatch");
			return Err(Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()));
		}

		let (token, _) = self.jwt.generate_token(&credential.uid, &credential.email)?;
		let identity = Identity {
			uid: credential.uid,
			email: credential.email,
		};
		self.publish(IdentityEvent::SignedIn(identity.clone()));
		Ok(AuthSession { identity, token })
	}

	async fn sign_out(&self, token: &str) -> Result<()> {
		let claims = self.jwt.verify_token(token)?;
		{
			let now = chrono::Utc::now().timestamp();
			let mut revoked = self.revoked.lock();
			revoked.retain(|_, exp| *exp >= now);
			revoked.insert(claims.jti.clone(), claims.exp);
		}

		self.publish(IdentityEvent::SignedOut(Identity {
			uid: claims.sub,
			email: claims.email,
		}));
		Ok(())
	}

	async fn verify(&self, token: &str) -> Result<Identity> {
		let claims = self.jwt.verify_token(token)?;
		if self.revoked.lock().contains_key(&claims.jti) {
			return Err(Error::Authentication("Token has been revoked".to_string()));
		}
		Ok(Identity {
			uid: claims.sub,
			email: claims.email,
		})
	}

	fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
		self.events.subscribe()
	}
}
