//! Fallback for targets without advisory file locks.

use std::io;

use lockapi_core::error::{LockError, LockOp, LockResult};
use lockapi_core::handle::LockableHandle;
use lockapi_core::traits::LockBackend;

/// Backend that fails every operation with `ErrorKind::Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

fn unsupported(op: LockOp) -> LockError {
    LockError::io(
        op,
        io::Error::new(
            io::ErrorKind::Unsupported,
            "advisory file locks are not supported on this platform",
        ),
    )
}

impl LockBackend for UnsupportedBackend {
    const NAME: &'static str = "unsupported";

    fn try_lock<H: LockableHandle + ?Sized>(_handle: &H) -> LockResult<()> {
        Err(unsupported(LockOp::TryLock))
    }

    fn lock<H: LockableHandle + ?Sized>(_handle: &H) -> LockResult<()> {
        Err(unsupported(LockOp::Lock))
    }

    fn unlock<H: LockableHandle + ?Sized>(_handle: &H) -> LockResult<()> {
        Err(unsupported(LockOp::Unlock))
    }
}
