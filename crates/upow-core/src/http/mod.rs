//! HTTP request and response types.

mod auth_state;
mod extensions;
mod request;
mod response;

pub use auth_state::AuthState;
pub use extensions::Extensions;
pub use request::{Request, RequestBuilder};
pub use response::Response;
