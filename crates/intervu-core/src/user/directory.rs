//! User directory trait.
//!
//! Defines the read-only interface the session manager authenticates
//! against. Concrete backends (seeded demo data, a real identity service)
//! live outside this crate.

use super::model::UserAccount;
use crate::error::Result;
use async_trait::async_trait;

/// A read-only directory of user accounts.
///
/// This core never mutates the directory; registration synthesizes a new
/// session without inserting a directory record (the directory is an
/// external collaborator).
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds an account by exact (email, secret) match.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserAccount))`: Credentials match an account
    /// - `Ok(None)`: No account matches
    /// - `Err(_)`: Error occurred during lookup
    async fn find_by_credentials(&self, email: &str, secret: &str) -> Result<Option<UserAccount>>;

    /// Checks whether an account with the given email exists.
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
}
