//! Top-level output directory: created before `build`, emptied by `clean`.

use std::fs;
use std::path::Path;

use crate::error::{io_err, RunError};

/// Create `dir` and any missing parents. Idempotent.
pub fn ensure_output_dir(dir: &Path) -> Result<(), RunError> {
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    tracing::debug!(dir = %dir.display(), "output directory ready");
    Ok(())
}

/// Remove everything inside `dir`, keeping `dir` itself.
///
/// Returns the number of top-level entries removed. A missing directory is
/// treated as already clear. Symlinks are removed, never followed.
pub fn clear_output_dir(dir: &Path) -> Result<usize, RunError> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| io_err(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
        }
        removed += 1;
    }

    tracing::info!(dir = %dir.display(), removed, "cleared output directory");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_creates_nested_dir_and_is_idempotent() {
        let root = TempDir::new().expect("tempdir");
        let dir = root.path().join("out").join("bin");
        ensure_output_dir(&dir).expect("first");
        ensure_output_dir(&dir).expect("second");
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_fails_when_a_file_is_in_the_way() {
        let root = TempDir::new().expect("tempdir");
        let dir = root.path().join("bin");
        fs::write(&dir, "not a directory").expect("write");
        let err = ensure_output_dir(&dir).unwrap_err();
        assert!(matches!(err, RunError::Io { .. }), "got: {err}");
    }

    #[test]
    fn clear_keeps_directory_but_drops_contents() {
        let root = TempDir::new().expect("tempdir");
        let dir = root.path().join("bin");
        fs::create_dir_all(dir.join("nested")).expect("mkdir");
        fs::write(dir.join("api"), "binary").expect("write");
        fs::write(dir.join("nested").join("worker"), "binary").expect("write");

        let removed = clear_output_dir(&dir).expect("clear");
        assert_eq!(removed, 2);
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).expect("read").count(), 0);
    }

    #[test]
    fn clear_missing_directory_is_noop() {
        let root = TempDir::new().expect("tempdir");
        assert_eq!(clear_output_dir(&root.path().join("bin")).expect("clear"), 0);
    }

    #[cfg(unix)]
    #[test]
    fn clear_does_not_follow_symlinks() {
        let root = TempDir::new().expect("tempdir");
        let dir = root.path().join("bin");
        let outside = root.path().join("keep");
        fs::create_dir_all(&dir).expect("mkdir");
        fs::create_dir_all(&outside).expect("mkdir");
        fs::write(outside.join("precious"), "data").expect("write");
        std::os::unix::fs::symlink(&outside, dir.join("link")).expect("symlink");

        clear_output_dir(&dir).expect("clear");
        assert!(outside.join("precious").exists());
        assert!(!dir.join("link").exists());
    }
}
