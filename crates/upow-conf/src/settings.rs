//! Typed settings for the upow service.

use crate::builder::SettingsBuilder;
use crate::sources::{DefaultSource, EnvSource, SourceError, TomlFileSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::path::Path;

/// Secret shipped in the defaults; refused when `debug` is off.
pub const INSECURE_SECRET_KEY: &str = "insecure-dev-secret-change-me";

/// Longest accepted session token lifetime: one year
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

pub const ENV_PREFIX: &str = "UPOW_";

/// Environment variable selecting the settings profile
pub const PROFILE_ENV_VAR: &str = "UPOW_ENV";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error(transparent)]
	Source(#[from] SourceError),

	#[error("Invalid setting '{key}': {message}")]
	Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub debug: bool,
	pub bind_address: String,
	/// `memory`, `sqlite::memory:` or `sqlite://path/to/file.db`
	pub database_url: String,
	/// HS256 signing key for session tokens
	pub secret_key: String,
	pub token_ttl_hours: i64,
	/// Origin used to build shareable public profile links
	pub public_base_url: String,
	pub log_level: String,
	pub log_format: LogFormat,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			debug: true,
			bind_address: "127.0.0.1:8000".to_string(),
			database_url: "memory".to_string(),
			secret_key: INSECURE_SECRET_KEY.to_string(),
			token_ttl_hours: 24,
			public_base_url: "http://localhost:8000".to_string(),
			log_level: "info".to_string(),
			log_format: LogFormat::Pretty,
		}
	}
}

impl Settings {
	/// Load settings from `settings_dir` for the profile named by `UPOW_ENV`.
	///
	/// Priority order (highest to lowest):
	/// 1. Environment variables with `UPOW_` prefix
	/// 2. Profile TOML file (e.g. `production.toml`)
	/// 3. Base TOML file (`base.toml`)
	/// 4. Default values
	pub fn load(settings_dir: &Path) -> Result<Self, SettingsError> {
		let profile = std::env::var(PROFILE_ENV_VAR).unwrap_or_else(|_| "local".to_string());
		Self::load_profile(settings_dir, &profile)
	}

	pub fn load_profile(settings_dir: &Path, profile: &str) -> Result<Self, SettingsError> {
		let defaults = serde_json::to_value(Settings::default()).map_err(SourceError::from)?;
		let default_source = match defaults {
			Value::Object(map) => map
				.into_iter()
				.fold(DefaultSource::new(), |source, (k, v)| source.with_value(k, v)),
			_ => DefaultSource::new(),
		};

		let settings: Settings = SettingsBuilder::new()
			.add_source(default_source)
			.add_source(TomlFileSource::new(settings_dir.join("base.toml")).with_priority(40))
			.add_source(
				TomlFileSource::new(settings_dir.join(format!("{}.toml", profile)))
					.with_priority(60),
			)
			.add_source(EnvSource::new(ENV_PREFIX))
			.build_typed()?;

		settings.validate()?;
		tracing::debug!(profile, "settings loaded");
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.debug && (self.secret_key.is_empty() || self.secret_key == INSECURE_SECRET_KEY) {
			return Err(SettingsError::Invalid {
				key: "secret_key",
				message: "a unique secret is required when debug is off".to_string(),
			});
		}
		if self.secret_key.is_empty() {
			return Err(SettingsError::Invalid {
				key: "secret_key",
				message: "must not be empty".to_string(),
			});
		}
		if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
			return Err(SettingsError::Invalid {
				key: "token_ttl_hours",
				message: format!("must be between 1 and {}", MAX_TOKEN_TTL_HOURS),
			});
		}
		if self.bind_address.parse::<SocketAddr>().is_err() {
			return Err(SettingsError::Invalid {
				key: "bind_address",
				message: format!("'{}' is not a socket address", self.bind_address),
			});
		}
		Ok(())
	}

	pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
		self.bind_address
			.parse()
			.map_err(|_| SettingsError::Invalid {
				key: "bind_address",
				message: format!("'{}' is not a socket address", self.bind_address),
			})
	}

	/// Settings as JSON with the secret masked, for display
	pub fn redacted(&self) -> Value {
		let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
		if let Some(secret) = value.get_mut("secret_key") {
			*secret = Value::from("********");
		}
		value
	}
}
