//! Core building blocks for the upow service.
//!
//! This crate holds the pieces every other crate agrees on:
//!
//! - [`exception`]: the shared [`Error`] type and [`Result`] alias
//! - [`http`]: [`Request`], [`Response`], request [`Extensions`] and [`AuthState`]
//! - [`types`]: the [`Handler`] / [`Middleware`] abstractions and [`MiddlewareChain`]

pub mod exception;
pub mod http;
pub mod types;

pub use exception::{Error, Result};
pub use hyper::{Method, StatusCode};
pub use http::{AuthState, Extensions, Request, RequestBuilder, Response};
pub use types::{FnHandler, Handler, Middleware, MiddlewareChain, handler_fn};
