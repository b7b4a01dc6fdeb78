//! Sura Core - Shared types library.
//!
//! This crate provides common types used across all Sura components:
//! - `storefront` - Public-facing boutique storefront
//! - `cli` - Command-line tools for inspecting orders, customers, and the catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no filesystem access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
