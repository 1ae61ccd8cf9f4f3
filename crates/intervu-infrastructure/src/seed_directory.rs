//! Seeded user directory.
//!
//! An in-memory, read-only account directory preloaded with the demo
//! users. A real identity service replaces this behind the same trait.

use async_trait::async_trait;
use intervu_core::error::Result;
use intervu_core::user::{UserAccount, UserDirectory, UserRole};

/// Read-only directory backed by a fixed account list.
pub struct SeededUserDirectory {
    accounts: Vec<UserAccount>,
}

impl SeededUserDirectory {
    /// Creates a directory over an explicit account list.
    pub fn new(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    /// The built-in demo accounts.
    pub fn with_demo_accounts() -> Self {
        Self::new(vec![
            UserAccount {
                id: "user-1".to_string(),
                display_name: "Alex Johnson".to_string(),
                email: "alex@example.com".to_string(),
                secret: "password123".to_string(),
                role: UserRole::Standard,
            },
            UserAccount {
                id: "user-2".to_string(),
                display_name: "Sam Rivera".to_string(),
                email: "sam@example.com".to_string(),
                secret: "password123".to_string(),
                role: UserRole::Standard,
            },
            UserAccount {
                id: "user-3".to_string(),
                display_name: "Jordan Chen".to_string(),
                email: "jordan@example.com".to_string(),
                secret: "password123".to_string(),
                role: UserRole::Standard,
            },
            UserAccount {
                id: "admin-1".to_string(),
                display_name: "Morgan Lee".to_string(),
                email: "admin@example.com".to_string(),
                secret: "admin123".to_string(),
                role: UserRole::Admin,
            },
        ])
    }
}

#[async_trait]
impl UserDirectory for SeededUserDirectory {
    async fn find_by_credentials(&self, email: &str, secret: &str) -> Result<Option<UserAccount>> {
        // Exact match on both fields, like the product it simulates.
        Ok(self
            .accounts
            .iter()
            .find(|a| a.email == email && a.secret == secret)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.accounts.iter().any(|a| a.email == email))
    }
}
