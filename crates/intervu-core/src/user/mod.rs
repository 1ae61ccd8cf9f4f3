//! User domain module.
//!
//! This module contains the user identity models and the read-only
//! directory trait that authentication is checked against.

mod directory;
mod model;

// Re-export public API
pub use directory::UserDirectory;
pub use model::{UserAccount, UserRole, UserSession};
