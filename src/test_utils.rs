//! Test utilities: state and server fixtures, record factories

pub mod factories;
pub mod fixtures;

pub use factories::*;
pub use fixtures::*;
