//! KuchoStore storefront session library.
//!
//! Owns the in-memory state of one browser session: the shopping cart, the
//! checkout summary derived from it, the catalog the pages render, and the
//! session/auth gate. Pages and UI controllers call into this crate; it
//! performs no rendering and exposes no routes.
//!
//! # Architecture
//!
//! - [`cart`] - Authoritative in-memory cart with replace-quantity semantics
//! - [`checkout`] - Pure totals over cart state and order confirmation
//! - [`catalog`] - Product list providers (static seed or remote API)
//! - [`audit`] - Client for the audit-log sink
//! - [`auth`] - Bearer-token session gate and auth endpoint client
//! - [`session`] - The owned root object injected into UI controllers
//!
//! All cart mutation flows through `&mut self`: there is exactly one writer
//! per session, so no locking is needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod audit;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod quantity;
pub mod session;

pub use error::{Result, StoreError};
