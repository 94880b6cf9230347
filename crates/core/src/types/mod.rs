//! Core types for KuchoStore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod product;
pub mod user;

pub use email::{Email, EmailError};
pub use id::*;
pub use product::{CartItem, Category, Product};
pub use user::User;
