//! HTTP server for upow.
//!
//! ```rust,ignore
//! use upow_server::{HttpServer, ShutdownCoordinator, shutdown_signal};
//!
//! let coordinator = ShutdownCoordinator::new(Duration::from_secs(30));
//! let server = HttpServer::new(router).with_middleware(logging);
//!
//! tokio::select! {
//!     result = server.listen_with_shutdown(addr, coordinator.clone()) => result?,
//!     _ = shutdown_signal() => coordinator.shutdown(),
//! }
//! ```

pub mod http;
pub mod shutdown;

pub use http::HttpServer;
pub use shutdown::{ShutdownCoordinator, shutdown_signal};

/// Error type returned by the server loop
pub type ServerError = Box<dyn std::error::Error + Send + Sync>;
