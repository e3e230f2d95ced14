//! # shelf_core
//!
//! Core domain logic for Shelf: users, access tokens and the product catalogue.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod products;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
