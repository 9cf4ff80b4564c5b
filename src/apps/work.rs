//! Work entry application
//!
//! Entries are owned by the profile that created them. Only the owner may
//! edit or delete an entry, and the store enforces that with conditional
//! writes. Validation state is managed by the `validation` app.

pub mod models;
pub mod serializers;
pub mod store;
pub mod urls;
pub mod views;

#[cfg(test)]
mod tests;
