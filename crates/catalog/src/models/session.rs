//! Session-related types.
//!
//! Types stored in the session for authentication state. Sessions are
//! established by the external auth provider; this service only reads them.

use serde::{Deserialize, Serialize};

use stallside_core::{Phone, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user. The
/// phone number is the key used to resolve the caller's vendor account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's phone number.
    pub phone: Phone,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
