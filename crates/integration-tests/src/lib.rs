//! Cross-module scenario tests for KuchoStore.
//!
//! The unit tests in each crate cover single modules; the tests under
//! `tests/` here exercise whole user flows across the cart, checkout,
//! quantity field, and auth gate without any live HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kuchostore-integration-tests
//! ```
