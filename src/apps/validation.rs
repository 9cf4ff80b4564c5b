//! Peer validation of work entries
//!
//! Anyone signed in may validate someone else's pending entry, once.

pub mod serializers;
pub mod urls;
pub mod views;
pub mod workflow;

#[cfg(test)]
mod tests;
