//! Advisory file locking and atomic writes shared by the stores.

use std::fs::{self, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use roster_core::Result;
use roster_core::error::{CacheError, Error};

pub(crate) fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Cache(CacheError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

pub(crate) fn corrupt(path: &Path, err: impl ToString) -> Error {
    Error::Cache(CacheError::Corrupt {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum LockMode {
    Shared,
    Exclusive,
}

/// Run `f` while holding an advisory lock on `lock_path`.
pub(crate) fn with_lock<T>(
    lock_path: &Path,
    mode: LockMode,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
    }

    let lock_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| map_io(lock_path, e))?;

    match mode {
        LockMode::Shared => FileExt::lock_shared(&lock_file),
        LockMode::Exclusive => FileExt::lock_exclusive(&lock_file),
    }
    .map_err(|e| map_io(lock_path, e))?;

    let result = f();
    let unlocked = FileExt::unlock(&lock_file).map_err(|e| map_io(lock_path, e));

    // The operation's own error wins over an unlock failure.
    let value = result?;
    unlocked?;
    Ok(value)
}

/// Replace `path` with `content` via a sibling temp file and rename.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| map_io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| map_io(path, e))?;
    Ok(())
}
