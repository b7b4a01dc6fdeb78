//! CLI command implementations.

pub mod catalog;
pub mod customers;
pub mod orders;
