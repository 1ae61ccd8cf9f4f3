//! Concrete collaborators for the Intervu core.
//!
//! File-backed session persistence, the seeded demo user directory,
//! the question bank, and the seeded report repository.

pub mod paths;
pub mod question_bank;
pub mod report_repository;
pub mod seed_directory;
pub mod session_store;
pub mod transcript;

pub use question_bank::QuestionBank;
pub use report_repository::SeededReportRepository;
pub use seed_directory::SeededUserDirectory;
pub use session_store::{JsonFileSessionStore, MemorySessionStore};
