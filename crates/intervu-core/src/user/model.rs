//! User identity domain models.
//!
//! Two representations exist on purpose: `UserAccount` lives on the
//! directory side and carries the secret; `UserSession` is the client-held
//! identity and never contains a secret field at all, so a serialized
//! session cannot leak one.

use serde::{Deserialize, Serialize};

/// Role assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular practice user.
    Standard,
    /// Administrator with access to the management screens.
    Admin,
}

/// The authenticated identity record held by the client.
///
/// At most one `UserSession` exists at a time; absence means the user is
/// unauthenticated. Created on successful login or registration, destroyed
/// on logout, and rehydrated once at startup from the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Unique user identifier
    pub id: String,
    /// Human-readable display name
    pub display_name: String,
    /// Email address the user authenticated with
    pub email: String,
    /// Assigned role
    pub role: UserRole,
}

impl UserSession {
    /// Returns true if this session belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// A directory-side account record.
///
/// The secret never leaves the directory boundary except as a boolean
/// match result; callers receive the stripped [`UserSession`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique user identifier
    pub id: String,
    /// Human-readable display name
    pub display_name: String,
    /// Email address
    pub email: String,
    /// Plain secret (simulated; a real directory would store a hash)
    pub secret: String,
    /// Assigned role
    pub role: UserRole,
}

impl UserAccount {
    /// Strips the secret, producing the client-held session record.
    pub fn strip(&self) -> UserSession {
        UserSession {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}
