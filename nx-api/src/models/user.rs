//! User entity models.
//!
//! The user concept has two wire shapes: the user-admin endpoint returns a
//! properties-based record keyed by `id`, while the login endpoint returns
//! a flat record keyed by `username` with group membership. They are kept
//! as two types distinguished by which fields the server populates.

use serde::{Deserialize, Serialize};

/// A user as returned by the user-admin endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// Account username (wire field `id`).
    #[serde(rename = "id", default)]
    pub username: String,

    /// Wire entity type discriminator ("user").
    #[serde(rename = "entity-type", default)]
    pub entity_type: String,

    /// Whether the account has administrator rights.
    #[serde(rename = "isAdministrator", default)]
    pub is_administrator: bool,

    /// Whether this is the anonymous account.
    #[serde(rename = "isAnonymous", default)]
    pub is_anonymous: bool,

    /// Dynamic account properties (firstName, email, ...).
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// The authenticated user as returned by the login endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account username.
    #[serde(default)]
    pub username: String,

    /// Wire entity type discriminator ("login").
    #[serde(rename = "entity-type", default)]
    pub entity_type: String,

    /// Whether the account has administrator rights.
    #[serde(rename = "isAdministrator", default)]
    pub is_administrator: bool,

    /// Groups the account belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
}
