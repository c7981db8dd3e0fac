//! Opening files for locking.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use lockapi_core::error::{LockError, LockOp, LockResult};

/// Builder for opening a file that is about to be locked.
///
/// Lock operations work on handles the caller already owns; this is a
/// convenience for obtaining one with the access every backend needs
/// (read + write). Opening never locks.
///
/// # Example
///
/// ```rust,no_run
/// use lockapi_file::LockFileOptions;
///
/// let file = LockFileOptions::new()
///     .create_parent_dirs(true)
///     .open("/tmp/locks/resource.lock")?;
/// # Ok::<(), lockapi_core::LockError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LockFileOptions {
    create: bool,
    truncate: bool,
    create_parent_dirs: bool,
}

impl LockFileOptions {
    /// Creates options that create the file if missing and keep its
    /// contents.
    pub fn new() -> Self {
        Self {
            create: true,
            truncate: false,
            create_parent_dirs: false,
        }
    }

    /// Sets whether a missing file is created.
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Sets whether an existing file is truncated on open.
    ///
    /// Truncation is not coordinated with the lock: it happens even while
    /// another handle holds it.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Sets whether missing parent directories are created.
    pub fn create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Opens `path` for reading and writing.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Io`] with [`LockOp::Open`] if a parent directory
    /// cannot be created or the file cannot be opened.
    pub fn open(&self, path: impl AsRef<Path>) -> LockResult<File> {
        let path = path.as_ref();

        if self.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| LockError::io(LockOp::Open, e))?;
            }
        }

        let mut options = OpenOptions::new();
        options
            .read(true)
            .write(true)
            .create(self.create)
            .truncate(self.truncate);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        options
            .open(path)
            .map_err(|e| LockError::io(LockOp::Open, e))
    }
}

impl Default for LockFileOptions {
    fn default() -> Self {
        Self::new()
    }
}
