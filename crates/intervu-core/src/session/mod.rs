//! Client session lifecycle module.
//!
//! # Module Structure
//!
//! - `store`: durable persistence trait for the single session record
//! - `manager`: the session manager owning authentication state

mod manager;
mod store;

// Re-export public API
pub use manager::{AuthState, SessionConfig, SessionManager};
pub use store::{SessionStore, StoredSession};
