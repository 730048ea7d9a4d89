use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::store::StoreError;

/// Exclusive advisory lock on `<store>.lock`, held until dropped.
///
/// Only invocations of this tool take the lock; other writers are not
/// coordinated.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    file: File,
}

impl StoreLock {
    pub fn acquire(store_path: &Path) -> Result<Self, StoreError> {
        let path = lock_path(store_path);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StoreError::lock(&path, e))?;
        tracing::debug!(lock = %path.display(), "waiting for store lock");
        file.lock().map_err(|e| StoreError::lock(&path, e))?;
        tracing::debug!(lock = %path.display(), "store lock acquired");
        Ok(Self { path, file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            tracing::warn!(lock = %self.path.display(), "failed to release store lock: {err}");
        }
    }
}

pub fn lock_path(store_path: &Path) -> PathBuf {
    let mut name = OsString::from(store_path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}
