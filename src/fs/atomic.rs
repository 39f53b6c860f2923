//! Output writes for generated artifacts.
//!
//! Atomic writes follow this pattern:
//! 1. Write content to `.{filename}.tmp` in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! `rename` replaces the destination on both POSIX and Windows, and is atomic
//! when source and destination share a filesystem, which a sibling temp file
//! guarantees.
//!
//! Parent directories are never created here. The output layout belongs to
//! the project, and a missing directory is reported as a write failure.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write generated content to `path`, creating or replacing the file.
///
/// With `atomic` set, the content is staged in a temp file and renamed into
/// place; otherwise the file is written directly.
pub fn write_output<P: AsRef<Path>>(path: P, content: &[u8], atomic: bool) -> io::Result<()> {
    let path = path.as_ref();
    if atomic {
        atomic_write(path, content)
    } else {
        fs::write(path, content)
    }
}

/// Atomically write bytes to a file.
///
/// On failure the temp file is removed and the target is left untouched.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let temp_path = generate_temp_path(path)?;

    if let Err(e) = write_and_sync(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    sync_parent_dir(path);
    Ok(())
}

/// Persist the directory entry after a rename. Best effort.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> io::Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid output path '{}'", target.display()),
        )
    })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("flow.mmd");

        atomic_write(&file_path, b"graph TD\n  A --> B").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "graph TD\n  A --> B");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("flow.mmd");
        fs::write(&file_path, "original content").unwrap();

        atomic_write(&file_path, b"new content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn test_atomic_write_temp_file_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("image.png");

        atomic_write(&file_path, b"content").unwrap();

        // Temp file should be renamed to target
        assert!(!temp_dir.path().join(".image.png.tmp").exists());
    }

    #[test]
    fn test_atomic_write_missing_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing").join("image.png");

        assert!(atomic_write(&file_path, b"content").is_err());
        assert!(!temp_dir.path().join("missing").exists());
    }

    #[test]
    fn test_generate_temp_path() {
        let target = Path::new("/some/path/diagram.png");
        let temp = generate_temp_path(target).unwrap();

        assert_eq!(temp, PathBuf::from("/some/path/.diagram.png.tmp"));
    }

    #[test]
    fn test_write_output_binary_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("binary.png");
        let binary_content: Vec<u8> = (0..256).map(|i| i as u8).collect();

        write_output(&file_path, &binary_content, true).unwrap();

        assert_eq!(fs::read(&file_path).unwrap(), binary_content);
    }

    #[test]
    fn test_write_output_direct() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("direct.mmd");

        write_output(&file_path, b"", false).unwrap();

        assert!(file_path.exists());
        assert!(fs::read(&file_path).unwrap().is_empty());
    }

    #[test]
    fn test_write_output_direct_missing_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing").join("direct.mmd");

        assert!(write_output(&file_path, b"x", false).is_err());
    }
}
