//! Tracing subscriber setup for the `manage` binary

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use upow_conf::{LogFormat, Settings};

/// Filter used when `RUST_LOG` is unset
pub fn default_directives(level: &str) -> String {
	format!("upow={level},upow_auth={level},upow_db={level},upow_server={level},upow_middleware={level},warn")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured `log_level`.
pub fn init_logging(settings: &Settings) -> anyhow::Result<()> {
	let filter = match std::env::var("RUST_LOG") {
		Ok(directives) => EnvFilter::try_new(directives)?,
		Err(_) => EnvFilter::try_new(default_directives(&settings.log_level))?,
	};

	let subscriber = tracing_subscriber::registry().with(filter);

	match settings.log_format {
		LogFormat::Json => subscriber
			.with(
				fmt::layer()
					.json()
					.with_current_span(true)
					.with_span_list(false)
					.with_target(true),
			)
			.try_init()?,
		LogFormat::Pretty => subscriber
			.with(fmt::layer().with_target(true).with_line_number(true))
			.try_init()?,
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_directives_parse() {
		for level in ["trace", "debug", "info", "warn", "error"] {
			assert!(EnvFilter::try_new(default_directives(level)).is_ok());
		}
	}
}
