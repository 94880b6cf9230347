//! KuchoStore Core - Shared types library.
//!
//! This crate provides the domain types used across all KuchoStore
//! components:
//! - `storefront` - Cart, checkout, catalog, and session/auth logic
//! - `integration-tests` - Cross-module scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! HTTP clients, no async. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, products, users, and money formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
