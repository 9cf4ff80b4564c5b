//! URL routing.
//!
//! A [`Router`] holds an ordered list of [`Route`]s, each pairing an HTTP method
//! and a [`PathPattern`] such as `/api/entries/{id}/` with a handler. Routers
//! are handlers themselves, so they can be wrapped in middleware or served
//! directly.

pub mod pattern;
pub mod route;
pub mod router;

pub use pattern::PathPattern;
pub use route::Route;
pub use router::Router;
