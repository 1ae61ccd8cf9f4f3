//! Unified path management for intervu data files.
//!
//! All persisted data lives under the platform data directory so the
//! layout is consistent across Linux, macOS, and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for intervu.
///
/// # Directory Structure
///
/// ```text
/// ~/.local/share/intervu/      # Data directory (platform equivalent)
/// └── session.json             # The single persisted session record
/// ```
pub struct IntervuPaths;

impl IntervuPaths {
    /// Returns the intervu data directory.
    ///
    /// Resolution order: the platform data dir (`$XDG_DATA_HOME` on
    /// Linux), then `$HOME/.local/share` as a fallback.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        if let Some(mut dir) = dirs::data_dir() {
            dir.push("intervu");
            return Ok(dir);
        }
        if let Some(mut home) = dirs::home_dir() {
            home.push(".local/share/intervu");
            return Ok(home);
        }
        Err(PathError::HomeDirNotFound)
    }

    /// Returns the path to the persisted session record.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_file_lives_under_data_dir() {
        let file = IntervuPaths::session_file().unwrap();
        assert!(file.ends_with("intervu/session.json") || file.ends_with("session.json"));
        assert!(file.starts_with(IntervuPaths::data_dir().unwrap()));
    }
}
