//! Project configuration: settings, shared state, logging, middleware and
//! the root URL table.

pub mod logging;
pub mod middleware;
pub mod settings;
pub mod state;
pub mod urls;
