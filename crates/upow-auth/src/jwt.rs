use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use upow_core::{Error, Result};

const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
	/// Identity uid
	pub sub: String,
	pub email: String,
	pub exp: i64,
	pub iat: i64,
	/// Token id, used for revocation
	pub jti: String,
}

impl Claims {
	/// # Examples
	///
	/// ```
	/// use chrono::Duration;
	/// use upow_auth::Claims;
	///
	/// let claims = Claims::new("user-1", "a@example.com", Duration::hours(24)).unwrap();
	///
	/// assert_eq!(claims.sub, "user-1");
	/// assert!(claims.exp > claims.iat);
	/// assert!(!claims.is_expired());
	/// ```
	/// Fails when `now + expires_in` is out of range
	pub fn new(
		user_id: impl Into<String>,
		email: impl Into<String>,
		expires_in: Duration,
	) -> Result<Self> {
		let now = Utc::now();
		let expires_at = now
			.checked_add_signed(expires_in)
			.ok_or_else(|| Error::Internal(format!("token lifetime {} is out of range", expires_in)))?;
		Ok(Self {
			sub: user_id.into(),
			email: email.into(),
			iat: now.timestamp(),
			exp: expires_at.timestamp(),
			jti: uuid::Uuid::new_v4().to_string(),
		})
	}

	pub fn is_expired(&self) -> bool {
		Utc::now().timestamp() > self.exp
	}
}

/// HS256 token issuer and verifier
pub struct JwtAuth {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	ttl: Duration,
}

impl JwtAuth {
	pub fn new(secret: &[u8], ttl: Duration) -> Self {
		Self {
			encoding_key: EncodingKey::from_secret(secret),
			decoding_key: DecodingKey::from_secret(secret),
			validation: Validation::default(),
			ttl,
		}
	}

	pub fn encode(&self, claims: &Claims) -> Result<String> {
		encode(&Header::default(), claims, &self.encoding_key)
			.map_err(|e| Error::Internal(format!("token encoding failed: {}", e)))
	}

	pub fn decode(&self, token: &str) -> Result<Claims> {
		decode::<Claims>(token, &self.decoding_key, &self.validation)
			.map(|data| data.claims)
			.map_err(|e| {
				tracing::debug!(error = %e, "rejected bearer token");
				Error::Authentication(INVALID_TOKEN_MESSAGE.to_string())
			})
	}

	/// Issue a token for the identity, valid for the configured ttl
	pub fn generate_token(&self, user_id: &str, email: &str) -> Result<(String, Claims)> {
		let claims = Claims::new(user_id, email, self.ttl)?;
		let token = self.encode(&claims)?;
		Ok((token, claims))
	}

	/// Verifies signature and expiry.
	///
	/// The decoder allows some clock leeway, so expiry is checked again
	/// against the exact `exp`.
	pub fn verify_token(&self, token: &str) -> Result<Claims> {
		let claims = self.decode(token)?;

		if claims.is_expired() {
			return Err(Error::Authentication(INVALID_TOKEN_MESSAGE.to_string()));
		}

		Ok(claims)
	}
}

impl std::fmt::Debug for JwtAuth {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JwtAuth").field("ttl", &self.ttl).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn jwt() -> JwtAuth {
		JwtAuth::new(b"test-secret", Duration::hours(1))
	}

	#[rstest]
	fn test_generate_and_verify() {
		let auth = jwt();
		let (token, issued) = auth.generate_token("user-1", "a@example.com").unwrap();

		let claims = auth.verify_token(&token).unwrap();
		assert_eq!(claims, issued);
		assert_eq!(claims.email, "a@example.com");
	}

	#[rstest]
	fn test_expired_token_is_rejected() {
		let auth = jwt();
		let claims = Claims::new("user-1", "a@example.com", Duration::hours(-2)).unwrap();
		let token = auth.encode(&claims).unwrap();

		assert!(matches!(
			auth.verify_token(&token),
			Err(Error::Authentication(_))
		));
	}

	#[rstest]
	#[case("garbage")]
	#[case("a.b.c")]
	#[case("")]
	fn test_malformed_tokens_are_rejected(#[case] token: &str) {
		assert!(matches!(
			jwt().verify_token(token),
			Err(Error::Authentication(_))
		));
	}

	#[rstest]
	fn test_foreign_signature_is_rejected() {
		let other = JwtAuth::new(b"another-secret", Duration::hours(1));
		let (token, _) = other.generate_token("user-1", "a@example.com").unwrap();

		assert!(jwt().verify_token(&token).is_err());
	}

	#[rstest]
	fn test_each_token_has_its_own_id() {
		let auth = jwt();
		let (_, first) = auth.generate_token("user-1", "a@example.com").unwrap();
		let (_, second) = auth.generate_token("user-1", "a@example.com").unwrap();

		assert_ne!(first.jti, second.jti);
	}

	#[rstest]
	fn test_out_of_range_lifetime_is_an_error() {
		let auth = JwtAuth::new(b"test-secret", Duration::MAX);

		assert!(matches!(
			auth.generate_token("user-1", "a@example.com"),
			Err(Error::Internal(_))
		));
	}
}
