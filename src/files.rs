//! File helpers shared by the generators and validators.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{KbError, Result};

/// Read a whole text file into memory.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| KbError::io(path, e))
}

/// Write `contents` to `path` through a temp file in the same directory.
///
/// The destination is replaced only after the full contents are on disk, so an
/// interrupted run never leaves a truncated page behind.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| KbError::io(&dir, e))?;

    let mut temp_file = NamedTempFile::new_in(&dir).map_err(|e| KbError::io(&dir, e))?;
    let written = temp_file
        .write_all(contents.as_bytes())
        .and_then(|_| temp_file.flush());
    written.map_err(|e| KbError::io(temp_file.path(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| KbError::io(path, e.error))?;
    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Hex encoded MD5 digest of a file's contents.
pub fn md5_hex(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| KbError::io(path, e))?;
    let mut hasher = Md5::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| KbError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Path of `path` relative to `root`, with `/` separators.
///
/// Paths outside `root` are returned unchanged (still `/` separated).
pub fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a user supplied relative path (`a\b`, `./a/b`) to the form
/// produced by [`relative_key`].
pub fn normalize_key(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Every regular file below `root`, sorted by path.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            KbError::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
