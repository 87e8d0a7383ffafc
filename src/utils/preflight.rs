//! Preflight validation checks for early failure detection.

use std::path::Path;

use anyhow::{bail, Result};

/// Validates that the repository path exists before any command is run.
///
/// Only existence is checked; whether the path is actually a repository is
/// left to the log command.
pub fn check_repository_path(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Repository path '{}' does not exist", path.display());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn existing_path_passes() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_repository_path(dir.path()).is_ok());
    }

    #[test]
    fn missing_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = check_repository_path(&missing).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(err.to_string().contains("nope"));
    }
}
