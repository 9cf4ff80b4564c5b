use upow_core::{Error, Result};

/// Password hasher trait
///
/// # Examples
///
/// ```
/// use upow_auth::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::new();
/// let hash = hasher.hash("my_secure_password").unwrap();
///
/// assert!(hasher.verify("my_secure_password", &hash).unwrap());
/// assert!(!hasher.verify("wrong_password", &hash).unwrap());
/// ```
pub trait PasswordHasher: Send + Sync {
	/// Hashes a password into a PHC string
	fn hash(&self, password: &str) -> Result<String>;

	/// `Ok(false)` on mismatch, `Err` only when `hash` cannot be parsed
	fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id password hasher
///
/// [`Argon2Hasher::new`] uses the crate's default cost parameters. Hashes
/// embed their parameters, so verification works regardless of the
/// parameters of the hasher doing it.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
	params: argon2::Params,
}

impl Argon2Hasher {
	pub fn new() -> Self {
		Self {
			params: argon2::Params::default(),
		}
	}

	/// Custom cost: memory in KiB, iterations, parallelism
	pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
		let params = argon2::Params::new(m_cost, t_cost, p_cost, None)
			.map_err(|e| Error::Internal(format!("invalid argon2 parameters: {}", e)))?;
		Ok(Self { params })
	}

	fn argon2(&self) -> argon2::Argon2<'static> {
		argon2::Argon2::new(
			argon2::Algorithm::Argon2id,
			argon2::Version::V0x13,
			self.params.clone(),
		)
	}
}

impl Default for Argon2Hasher {
	fn default() -> Self {
		Self::new()
	}
}

impl PasswordHasher for Argon2Hasher {
	fn hash(&self, password: &str) -> Result<String> {
		use argon2::password_hash::{PasswordHasher as _, SaltString};
		use rand::RngCore;

		let mut salt_bytes = [0u8; 16];
		rand::thread_rng().fill_bytes(&mut salt_bytes);

		let salt = SaltString::encode_b64(&salt_bytes)
			.map_err(|e| Error::Internal(format!("salt encoding failed: {}", e)))?;

		self.argon2()
			.hash_password(password.as_bytes(), &salt)
			.map(|hash| hash.to_string())
			.map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))
	}

	fn verify(&self, password: &str, hash: &str) -> Result<bool> {
		use argon2::password_hash::{PasswordHash, PasswordVerifier};

		let parsed_hash = PasswordHash::new(hash)
			.map_err(|e| Error::Internal(format!("stored hash is malformed: {}", e)))?;

		Ok(self
			.argon2()
			.verify_password(password.as_bytes(), &parsed_hash)
			.is_ok())
	}
}
