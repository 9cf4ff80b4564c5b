//! Auth application
//!
//! Sign-up creates the credential and the profile and signs the new user in.
//! [`session::Session`] keeps the signed-in state for a client.

pub mod accounts;
pub mod serializers;
pub mod session;
pub mod urls;
pub mod views;
