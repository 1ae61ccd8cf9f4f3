//! Session store trait.
//!
//! Defines the interface for persisting exactly one serialized session
//! record, decoupling the session manager from the storage mechanism
//! (JSON file, in-memory, remote).

use crate::error::Result;
use crate::user::UserSession;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The record written to durable storage.
///
/// Wraps the secret-free [`UserSession`] with a save timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// The persisted client identity
    pub session: UserSession,
    /// When the record was last written (ISO 8601)
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    /// Wraps a session with the current timestamp.
    pub fn new(session: UserSession) -> Self {
        Self {
            session,
            saved_at: Utc::now(),
        }
    }
}

/// Durable key-value persistence for exactly one session record.
///
/// # Implementation Notes
///
/// A present-but-unparsable record must be reported as a
/// `Serialization` error, not silently discarded: deleting the corrupt
/// record is the session manager's self-heal decision, and keeping it
/// here lets tests observe the distinction.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored session record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StoredSession))`: A valid record exists
    /// - `Ok(None)`: No record is stored
    /// - `Err(_)`: The record exists but cannot be read or parsed
    async fn load(&self) -> Result<Option<StoredSession>>;

    /// Saves the session record, replacing any existing one.
    async fn save(&self, record: &StoredSession) -> Result<()>;

    /// Removes the stored record. Removing a missing record is not an error.
    async fn clear(&self) -> Result<()>;
}
