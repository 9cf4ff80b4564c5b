//! Universal Proof of Work
//!
//! People record work entries (projects, tasks, contributions) with proof
//! links, and other signed-in people validate them. Each profile has a public
//! page listing its entries and how many of them were validated.

pub mod apps;
pub mod config;

#[cfg(test)]
pub mod test_utils;
