//! Atomic file operations for crash-safe persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{PersistenceError, Result};

/// Writes data to a file atomically.
///
/// Data goes to a temporary file in the target directory which is then
/// renamed over the target, so readers never see a partial write.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    // Same directory so the rename stays on one filesystem
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut temp_file =
        tempfile::NamedTempFile::new_in(dir).map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file
        .write_all(data)
        .and_then(|_| temp_file.flush())
        .map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file
        .persist(path)
        .map_err(|e| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}

/// Writes JSON data to a file atomically.
pub fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Reads and deserializes JSON from a file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| PersistenceError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

/// Reads JSON from a file, returning None if the file doesn't exist.
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}

/// Reads every `*.json` file in `dir`.
///
/// A missing directory yields an empty list. Files that fail to parse are
/// skipped with a warning.
pub fn read_json_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|source| PersistenceError::ReadError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PersistenceError::ReadError {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            match read_json::<T>(&path) {
                Ok(item) => items.push(item),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable file"),
            }
        }
    }

    Ok(items)
}

/// Returns `id` if it is safe to use as a single path component.
///
/// Ids arrive from request paths, so separators and `..` are refused and
/// reported as a missing record.
pub fn checked_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return Err(PersistenceError::not_found(kind, id));
    }
    Ok(id)
}

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| PersistenceError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Removes a file. Returns whether it existed.
pub fn remove_file(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|source| PersistenceError::WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Removes a directory tree if present.
pub fn remove_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| PersistenceError::WriteError {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
