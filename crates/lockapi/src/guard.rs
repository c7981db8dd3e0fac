//! Scoped lock guard.

use std::fmt;

use lockapi_core::{LockResult, LockableHandle};
use tracing::warn;

use crate::{lock_file, try_lock_file, unlock_file};

/// Holds the exclusive lock on a borrowed handle.
///
/// Dropping the guard releases the lock; call [`release`](Self::release) to
/// see the unlock error instead of having it logged. The guard only wraps
/// the three calls: the lock still lives in the OS and is also released
/// when the handle is closed.
///
/// # Example
///
/// ```rust,no_run
/// use lockapi::{FileLockGuard, LockFileOptions};
///
/// let file = LockFileOptions::new().open("/tmp/my-resource.lock")?;
/// let guard = FileLockGuard::acquire(&file)?;
/// // Critical section
/// guard.release()?;
/// # Ok::<(), lockapi::LockError>(())
/// ```
#[must_use = "dropping the guard releases the lock immediately"]
pub struct FileLockGuard<'a, H: LockableHandle + ?Sized> {
    handle: &'a H,
    released: bool,
}

impl<'a, H: LockableHandle + ?Sized> FileLockGuard<'a, H> {
    /// Locks `handle` without waiting.
    ///
    /// Fails with `LockError::WouldBlock` if the lock is held elsewhere.
    pub fn try_acquire(handle: &'a H) -> LockResult<Self> {
        try_lock_file(handle)?;
        Ok(Self::held(handle))
    }

    /// Locks `handle`, blocking until the lock is granted.
    pub fn acquire(handle: &'a H) -> LockResult<Self> {
        lock_file(handle)?;
        Ok(Self::held(handle))
    }

    fn held(handle: &'a H) -> Self {
        Self {
            handle,
            released: false,
        }
    }

    /// Returns the locked handle.
    pub fn handle(&self) -> &'a H {
        self.handle
    }

    /// Releases the lock, reporting any unlock error.
    pub fn release(mut self) -> LockResult<()> {
        self.released = true;
        unlock_file(self.handle)
    }
}

impl<H: LockableHandle + ?Sized> Drop for FileLockGuard<'_, H> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = unlock_file(self.handle) {
            warn!(error = %e, "failed to release file lock on drop");
        }
    }
}

impl<H: LockableHandle + ?Sized> fmt::Debug for FileLockGuard<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLockGuard")
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LockError, LockFileOptions};
    use std::fs::File;
    use tempfile::TempDir;

    fn open_twice() -> (TempDir, File, File) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guard.lock");
        let first = LockFileOptions::new().open(&path).unwrap();
        let second = LockFileOptions::new().open(&path).unwrap();
        (dir, first, second)
    }

    #[test]
    fn test_drop_releases_lock() {
        let (_dir, first, second) = open_twice();

        {
            let _guard = FileLockGuard::acquire(&first).unwrap();
            assert!(matches!(try_lock_file(&second), Err(LockError::WouldBlock)));
        }

        try_lock_file(&second).unwrap();
        unlock_file(&second).unwrap();
    }

    #[test]
    fn test_explicit_release() {
        let (_dir, first, second) = open_twice();

        let guard = FileLockGuard::try_acquire(&first).unwrap();
        assert!(std::ptr::eq(guard.handle(), &first));
        guard.release().unwrap();

        let guard = FileLockGuard::try_acquire(&second).unwrap();
        guard.release().unwrap();
    }

    #[test]
    fn test_try_acquire_while_held() {
        let (_dir, first, second) = open_twice();

        let _guard = FileLockGuard::try_acquire(&first).unwrap();
        let err = FileLockGuard::try_acquire(&second).unwrap_err();
        assert!(err.is_would_block());
    }
}
