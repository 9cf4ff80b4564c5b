//! Authentication for upow.
//!
//! - [`PasswordHasher`] / [`Argon2Hasher`] for credential storage
//! - [`JwtAuth`] for signed bearer tokens
//! - [`AuthProvider`] with the store-backed [`DocumentAuthProvider`]
//! - [`JwtAuthenticationMiddleware`] and the [`CurrentUser`] extractor for
//!   HTTP handlers

pub mod extract;
pub mod hasher;
pub mod jwt;
pub mod middleware;
pub mod provider;

pub use extract::CurrentUser;
pub use hasher::{Argon2Hasher, PasswordHasher};
pub use jwt::{Claims, JwtAuth};
pub use middleware::JwtAuthenticationMiddleware;
pub use provider::{
	AuthProvider, AuthSession, CREDENTIALS_COLLECTION, DocumentAuthProvider, Identity,
	IdentityEvent, MIN_PASSWORD_LENGTH, normalize_email,
};
