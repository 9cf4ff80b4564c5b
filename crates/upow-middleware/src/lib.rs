//! Middleware shared by upow services.

pub mod logging;
pub mod request_id;

pub use logging::LoggingMiddleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware};
