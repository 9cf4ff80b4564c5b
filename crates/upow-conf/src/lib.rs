//! Configuration for upow.
//!
//! Settings are assembled from several [`ConfigSource`]s merged in priority
//! order: built-in defaults, then `settings/base.toml`, then
//! `settings/{profile}.toml`, then `UPOW_`-prefixed environment variables.
//! The profile comes from `UPOW_ENV` and defaults to `local`.

pub mod builder;
pub mod settings;
pub mod sources;

pub use builder::SettingsBuilder;
pub use settings::{LogFormat, MAX_TOKEN_TTL_HOURS, Settings, SettingsError};
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
