//! Graceful shutdown coordination.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, broadcast};

/// Broadcasts a shutdown request to the accept loop and every open connection.
#[derive(Clone)]
pub struct ShutdownCoordinator {
	shutdown_tx: broadcast::Sender<()>,
	shutting_down: Arc<AtomicBool>,
	completed: Arc<Notify>,
	timeout: Duration,
}

impl ShutdownCoordinator {
	/// `timeout` bounds how long [`wait_for_shutdown`](Self::wait_for_shutdown) waits.
	pub fn new(timeout: Duration) -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		Self {
			shutdown_tx,
			shutting_down: Arc::new(AtomicBool::new(false)),
			completed: Arc::new(Notify::new()),
			timeout,
		}
	}

	pub fn subscribe(&self) -> broadcast::Receiver<()> {
		self.shutdown_tx.subscribe()
	}

	/// Request shutdown. Calling it more than once has no further effect.
	pub fn shutdown(&self) {
		if !self.shutting_down.swap(true, Ordering::SeqCst) {
			tracing::info!("shutdown requested");
			// No receivers simply means nothing is running yet
			let _ = self.shutdown_tx.send(());
		}
	}

	pub fn is_shutting_down(&self) -> bool {
		self.shutting_down.load(Ordering::SeqCst)
	}

	/// Called by the server once it has stopped accepting connections
	pub fn notify_shutdown_complete(&self) {
		self.completed.notify_waiters();
		self.completed.notify_one();
	}

	/// Wait until the server reports completion or the timeout elapses.
	///
	/// Returns `false` on timeout.
	pub async fn wait_for_shutdown(&self) -> bool {
		let completed = tokio::time::timeout(self.timeout, self.completed.notified()).await;
		if completed.is_err() {
			tracing::warn!(timeout = ?self.timeout, "graceful shutdown timed out");
		}
		completed.is_ok()
	}
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "failed to install Ctrl-C handler");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(e) => {
				tracing::error!(error = %e, "failed to install SIGTERM handler");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_subscribers_receive_shutdown() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		let mut rx = coordinator.subscribe();

		coordinator.shutdown();
		coordinator.shutdown();

		assert!(rx.recv().await.is_ok());
		assert!(coordinator.is_shutting_down());
	}

	#[rstest]
	#[tokio::test]
	async fn test_wait_times_out_without_completion() {
		let coordinator = ShutdownCoordinator::new(Duration::from_millis(20));

		assert!(!coordinator.wait_for_shutdown().await);
	}

	#[rstest]
	#[tokio::test]
	async fn test_wait_observes_completion() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		let notifier = coordinator.clone();
		tokio::spawn(async move {
			tokio::time::sleep(Duration::from_millis(10)).await;
			notifier.notify_shutdown_complete();
		});

		assert!(coordinator.wait_for_shutdown().await);
	}
}
