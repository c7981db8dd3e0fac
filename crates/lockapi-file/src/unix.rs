//! POSIX backend built on `flock(2)`.

use std::io;
use std::os::fd::{AsFd, AsRawFd};

use lockapi_core::error::{LockError, LockOp, LockResult};
use lockapi_core::handle::LockableHandle;
use lockapi_core::traits::LockBackend;

/// Whole-file advisory locking through `flock(2)`.
///
/// `flock` locks belong to the open file description, so two handles opened
/// separately on the same path contend with each other even inside one
/// process, while duplicated descriptors share a single lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixBackend;

impl PosixBackend {
    fn flock<H: LockableHandle + ?Sized>(handle: &H, operation: libc::c_int) -> io::Result<()> {
        let fd = AsFd::as_fd(handle).as_raw_fd();
        // SAFETY: `fd` is borrowed from a handle that stays open for the
        // whole call, and `flock` does not retain it.
        let rc = unsafe { libc::flock(fd, operation) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl LockBackend for PosixBackend {
    const NAME: &'static str = "flock";

    fn try_lock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
        Self::flock(handle, libc::LOCK_EX | libc::LOCK_NB).map_err(|e| {
            if e.raw_os_error() == Some(libc::EWOULDBLOCK) {
                LockError::WouldBlock
            } else {
                LockError::io(LockOp::TryLock, e)
            }
        })
    }

    fn lock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
        Self::flock(handle, libc::LOCK_EX).map_err(|e| LockError::io(LockOp::Lock, e))
    }

    fn unlock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
        Self::flock(handle, libc::LOCK_UN).map_err(|e| LockError::io(LockOp::Unlock, e))
    }
}
