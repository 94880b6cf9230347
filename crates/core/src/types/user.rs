//! User domain type.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::id::UserId;

/// An authenticated storefront user, as returned by the profile endpoint.
///
/// The cart never references a user; this type only personalizes pages and
/// supplies the user id attached to confirmed-order audit records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// The user's email address.
    pub email: Email,
    /// Display name, if the user has set one.
    pub name: Option<String>,
    /// Phone number, if the user has set one.
    #[serde(default)]
    pub phone: Option<String>,
}
