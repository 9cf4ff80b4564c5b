//! Settings loading for the upow service

use std::path::{Path, PathBuf};
use upow_conf::{Settings, SettingsError};

/// Environment variable overriding the settings directory
pub const SETTINGS_DIR_ENV_VAR: &str = "UPOW_SETTINGS_DIR";

/// `$UPOW_SETTINGS_DIR`, else `settings/` next to the crate manifest
pub fn settings_dir() -> PathBuf {
	std::env::var_os(SETTINGS_DIR_ENV_VAR)
		.map(PathBuf::from)
		.unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("settings"))
}

/// Load settings for the profile selected by `UPOW_ENV`
pub fn get_settings() -> Result<Settings, SettingsError> {
	Settings::load(&settings_dir())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[serial(env)]
	fn test_shipped_local_profile_loads() {
		let settings = Settings::load_profile(&settings_dir(), "local").unwrap();

		assert!(settings.debug);
		assert_eq!(settings.database_url, "memory");
		assert_eq!(settings.public_base_url, "http://localhost:8000");
	}

	#[rstest]
	#[serial(env)]
	fn test_production_profile_requires_a_secret() {
		let result = Settings::load_profile(&settings_dir(), "production");
		assert!(matches!(result, Err(SettingsError::Invalid { key: "secret_key", .. })));
	}
}
