//! Management CLI for the upow service.
//!
//! `manage runserver` serves the API; `manage check` validates and prints the
//! loaded settings.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use upow::config::logging::init_logging;
use upow::config::middleware::create_middleware_stack;
use upow::config::settings::get_settings;
use upow::config::state::AppState;
use upow::config::urls::url_patterns;
use upow_auth::IdentityEvent;
use upow_server::{HttpServer, ShutdownCoordinator, shutdown_signal};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Parser)]
#[command(name = "manage", version, about = "Universal Proof of Work management commands")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Start the HTTP server
	Runserver {
		/// Address to bind, overriding `bind_address` from settings
		#[arg(long)]
		addr: Option<SocketAddr>,
	},
	/// Validate settings and print them with secrets masked
	Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let settings = get_settings().context("failed to load settings")?;
	init_logging(&settings)?;

	match cli.command {
		Command::Check => {
			println!("{}", serde_json::to_string_pretty(&settings.redacted())?);
			Ok(())
		}
		Command::Runserver { addr } => {
			let addr = match addr {
				Some(addr) => addr,
				None => settings.socket_addr()?,
			};
			runserver(settings, addr).await
		}
	}
}

async fn runserver(settings: upow_conf::Settings, addr: SocketAddr) -> anyhow::Result<()> {
	let state = Arc::new(
		AppState::from_settings(settings)
			.await
			.context("failed to open the document store")?,
	);
	tokio::spawn(audit_identity_events(state.clone()));

	let router = url_patterns(state.clone()).context("failed to build routes")?;
	let server = create_middleware_stack(&state)
		.into_iter()
		.fold(HttpServer::new(Arc::new(router)), |server, middleware| {
			server.with_middleware(middleware)
		});

	let coordinator = ShutdownCoordinator::new(SHUTDOWN_TIMEOUT);
	let signal_coordinator = coordinator.clone();
	tokio::spawn(async move {
		shutdown_signal().await;
		signal_coordinator.shutdown();
	});

	server.listen_with_shutdown(addr, coordinator).await
		.map_err(|e| anyhow::anyhow!(e))?;
	tracing::info!("server stopped");
	Ok(())
}

/// Log sign-ups, sign-ins and sign-outs until the provider goes away
async fn audit_identity_events(state: Arc<AppState>) {
	let mut events = state.auth.subscribe();
	loop {
		match events.recv().await {
			Ok(IdentityEvent::SignedUp(identity)) => {
				tracing::info!(uid = %identity.uid, "account created")
			}
			Ok(IdentityEvent::SignedIn(identity)) => {
				tracing::info!(uid = %identity.uid, "signed in")
			}
			Ok(IdentityEvent::SignedOut(identity)) => {
				tracing::info!(uid = %identity.uid, "signed out")
			}
			Err(RecvError::Lagged(skipped)) => {
				tracing::warn!(skipped, "identity audit fell behind")
			}
			Err(RecvError::Closed) => break,
		}
	}
}
