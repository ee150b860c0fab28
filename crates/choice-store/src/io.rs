//! Atomic replacement of document files

use fs2::FileExt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::{Error, Result};

/// Replace the document at `path` with `content`.
///
/// Returns `Ok(false)` without touching the file when it already holds
/// exactly `content`. Otherwise the text is staged in a temp file beside the
/// target, given the target's permissions, and renamed over it, so readers
/// see either the old document or the new one. A failed save removes the
/// staged file. The advisory lock covers the staged file only and does not
/// serialize competing writers.
pub fn replace_document(path: &Path, content: &[u8]) -> Result<bool> {
    let current = match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(Error::io(path, e)),
    };
    if current.as_deref() == Some(content) {
        tracing::debug!(path = %path.display(), "Document unchanged, not rewritten");
        return Ok(false);
    }

    // Staging beside the target keeps the rename on one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut staged = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;

    let lock_failed = || Error::LockFailed {
        path: path.to_path_buf(),
    };
    staged.as_file().lock_exclusive().map_err(|_| lock_failed())?;

    staged
        .as_file_mut()
        .write_all(content)
        .map_err(|e| Error::io(staged.path(), e))?;
    if current.is_some() {
        let permissions = fs::metadata(path)
            .map_err(|e| Error::io(path, e))?
            .permissions();
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::io(staged.path(), e))?;
    }
    staged
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(staged.path(), e))?;
    FileExt::unlock(staged.as_file()).map_err(|_| lock_failed())?;

    staged.persist(path).map_err(|e| Error::io(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Replaced document");
    Ok(true)
}

/// Read text content from a file, treating a missing file as `None`.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
