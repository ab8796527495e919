//! Produced-artifact validation.

use std::path::Path;

/// True iff `path` names a regular file with a size strictly greater than
/// zero.
///
/// The transcoder can exit zero yet leave nothing usable behind, so
/// eligibility for distribution is decided here rather than from the exit
/// status alone.
pub fn is_valid_artifact(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_valid_artifact(&dir.path().join("missing.mp4")));
    }

    #[test]
    fn empty_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp4");
        std::fs::write(&path, b"").unwrap();
        assert!(!is_valid_artifact(&path));
    }

    #[test]
    fn directory_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_valid_artifact(dir.path()));
    }

    #[test]
    fn nonempty_file_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");
        std::fs::write(&path, b"frames").unwrap();
        assert!(is_valid_artifact(&path));
    }
}
