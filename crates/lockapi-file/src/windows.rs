//! Windows backend built on `LockFileEx` / `UnlockFileEx`.

use std::io;
use std::os::windows::io::{AsHandle, AsRawHandle};

use lockapi_core::error::{LockError, LockOp, LockResult};
use lockapi_core::handle::LockableHandle;
use lockapi_core::traits::LockBackend;
use windows_sys::Win32::Foundation::{ERROR_LOCK_VIOLATION, ERROR_NOT_LOCKED, HANDLE};
use windows_sys::Win32::Storage::FileSystem::{
    LockFileEx, UnlockFileEx, LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY,
    LOCK_FILE_FLAGS,
};
use windows_sys::Win32::System::IO::OVERLAPPED;

// Range length of u64::MAX bytes, passed as low/high halves.
const WHOLE_FILE_LEN_LOW: u32 = u32::MAX;
const WHOLE_FILE_LEN_HIGH: u32 = u32::MAX;

/// Whole-file advisory locking through `LockFileEx`.
///
/// The locked range starts at offset 0 and spans the largest representable
/// length, so it covers the file regardless of its size. Windows locks
/// belong to the handle: two handles on the same path contend even inside
/// one process.
///
/// Handles opened for overlapped I/O are not supported; `LockFileEx` reports
/// `ERROR_IO_PENDING` for them, which surfaces as [`LockError::Io`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsBackend;

impl WindowsBackend {
    fn raw_handle<H: LockableHandle + ?Sized>(handle: &H) -> HANDLE {
        AsHandle::as_handle(handle).as_raw_handle() as HANDLE
    }

    /// Overlapped block selecting offset 0 with no completion event.
    fn whole_file_overlapped() -> OVERLAPPED {
        // SAFETY: OVERLAPPED is plain old data; all zeroes is a valid value.
        unsafe { std::mem::zeroed() }
    }

    fn lock_file_ex<H: LockableHandle + ?Sized>(
        handle: &H,
        flags: LOCK_FILE_FLAGS,
    ) -> io::Result<()> {
        let mut overlapped = Self::whole_file_overlapped();
        // SAFETY: the handle stays open for the whole call and `overlapped`
        // outlives it; the handle is synchronous so the call completes
        // before returning.
        let ok = unsafe {
            LockFileEx(
                Self::raw_handle(handle),
                flags,
                0,
                WHOLE_FILE_LEN_LOW,
                WHOLE_FILE_LEN_HIGH,
                &mut overlapped,
            )
        };
        if ok == 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }

    fn unlock_file_ex<H: LockableHandle + ?Sized>(handle: &H) -> io::Result<()> {
        // Must match the range passed to LockFileEx.
        let mut overlapped = Self::whole_file_overlapped();
        // SAFETY: as in `lock_file_ex`.
        let ok = unsafe {
            UnlockFileEx(
                Self::raw_handle(handle),
                0,
                WHOLE_FILE_LEN_LOW,
                WHOLE_FILE_LEN_HIGH,
                &mut overlapped,
            )
        };
        if ok == 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

fn is_os_error(err: &io::Error, code: u32) -> bool {
    err.raw_os_error() == Some(code as i32)
}

impl LockBackend for WindowsBackend {
    const NAME: &'static str = "LockFileEx";

    fn try_lock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
        Self::lock_file_ex(handle, LOCKFILE_EXCLUSIVE_LOCK | LOCKFILE_FAIL_IMMEDIATELY).map_err(
            |e| {
                if is_os_error(&e, ERROR_LOCK_VIOLATION) {
                    LockError::WouldBlock
                } else {
                    LockError::io(LockOp::TryLock, e)
                }
            },
        )
    }

    fn lock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
        Self::lock_file_ex(handle, LOCKFILE_EXCLUSIVE_LOCK)
            .map_err(|e| LockError::io(LockOp::Lock, e))
    }

    fn unlock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
        match Self::unlock_file_ex(handle) {
            Ok(()) => Ok(()),
            // Releasing an unlocked handle succeeds, as flock(LOCK_UN) does.
            Err(e) if is_os_error(&e, ERROR_NOT_LOCKED) => Ok(()),
            Err(e) => Err(LockError::io(LockOp::Unlock, e)),
        }
    }
}
