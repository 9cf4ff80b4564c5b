//! Profile application
//!
//! A profile is created at sign-up with the identity's uid as its id, is only
//! changed by its owner and is never deleted.

pub mod models;
pub mod serializers;
pub mod store;
pub mod urls;
pub mod views;

#[cfg(test)]
mod tests;
