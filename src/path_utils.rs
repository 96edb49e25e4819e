//! Path utilities for output directory handling.
//!
//! Generated archive names contain spaces, parentheses and `#`, and tree
//! layouts can nest deeply, so every output path goes through
//! [`normalize_path`] before files are created. Directory creation is
//! idempotent: an existing directory is fine, anything else is surfaced.

use crate::error::{Error, Result};

use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Maximum path length for Windows without long path support
const WINDOWS_MAX_PATH: usize = 260;

/// Windows long path prefix
const WINDOWS_LONG_PATH_PREFIX: &str = r"\\?\";

/// Converts a path to a string with fallback to lossy conversion.
pub fn path_to_string_lossy(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Rejects characters that most file systems or zip readers choke on.
pub fn validate_path(path: &Path) -> Result<()> {
    let path_str = path_to_string_lossy(path);

    // The long path prefix itself contains a question mark
    let path_to_check = path_str
        .strip_prefix(WINDOWS_LONG_PATH_PREFIX)
        .unwrap_or(&path_str);

    if path_to_check
        .chars()
        .any(|c| matches!(c, '<' | '>' | '"' | '|' | '?' | '*'))
    {
        return Err(Error::InvalidPath(
            path.to_path_buf(),
            "Path contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Prefixes long absolute paths on Windows so deep tree layouts stay writable.
fn prepare_long_path(path: &Path) -> PathBuf {
    let path_str = path_to_string_lossy(path);

    if cfg!(windows)
        && path_str.len() > WINDOWS_MAX_PATH
        && !path_str.starts_with(WINDOWS_LONG_PATH_PREFIX)
    {
        PathBuf::from(format!("{}{}", WINDOWS_LONG_PATH_PREFIX, path_str))
    } else {
        path.to_path_buf()
    }
}

/// Validates a path and resolves it to its canonical form when it exists.
///
/// Paths that do not exist yet are returned as given.
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    validate_path(path)?;

    match path.canonicalize() {
        Ok(canonical) => Ok(prepare_long_path(&canonical)),
        Err(e) if path.exists() => Err(Error::InvalidPath(
            path.to_path_buf(),
            format!("Cannot access path: {}", e),
        )),
        Err(_) => Ok(path.to_path_buf()),
    }
}

/// Creates a single directory, treating an existing directory as success.
///
/// Returns `true` when the directory was created by this call. A non-directory
/// entry at `path`, a missing parent, or a permission problem is an error.
pub async fn ensure_dir(path: &Path) -> Result<bool> {
    validate_path(path)?;

    match fs::create_dir(path).await {
        Ok(()) => {
            debug!("Created directory {}", path_to_string_lossy(path));
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            if fs::metadata(path).await?.is_dir() {
                Ok(false)
            } else {
                Err(Error::InvalidPath(
                    path.to_path_buf(),
                    "Path exists and is not a directory".to_string(),
                ))
            }
        }
        Err(e) => Err(Error::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to create directory '{}': {}",
                path_to_string_lossy(path),
                e
            ),
        ))),
    }
}

/// Creates `path` and any missing parents, one [`ensure_dir`] at a time.
pub async fn ensure_dir_all(path: &Path) -> Result<()> {
    let mut missing = Vec::new();
    let mut current = Some(path);
    while let Some(dir) = current {
        if dir.as_os_str().is_empty() || fs::metadata(dir).await.is_ok() {
            break;
        }
        missing.push(dir);
        current = dir.parent();
    }

    for dir in missing.into_iter().rev() {
        ensure_dir(dir).await?;
    }
    // Surfaces a file sitting where the directory should be
    ensure_dir(path).await?;
    Ok(())
}
