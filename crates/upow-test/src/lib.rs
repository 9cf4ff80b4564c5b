//! Testing utilities for upow services.
//!
//! [`TestServerGuard`] runs a real server on an ephemeral port and
//! [`APIClient`] talks to it over HTTP.

pub mod client;
pub mod response;
pub mod server;

pub use client::{APIClient, ClientError, ClientResult};
pub use response::TestResponse;
pub use server::{TestServerGuard, test_server_guard};
