pub mod access;
pub mod error;
pub mod interview;
pub mod results;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{IntervuError, Result};
