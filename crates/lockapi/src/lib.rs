//! Portable exclusive advisory file locking for Rust.
//!
//! Three calls on a handle you already opened, with the same observable
//! behaviour on every platform:
//!
//! - [`try_lock_file`] acquires the lock or fails at once with
//!   [`LockError::WouldBlock`]
//! - [`lock_file`] blocks the calling thread until the lock is granted
//! - [`unlock_file`] releases it
//!
//! The lock is held by the operating system, so it is contested by every
//! other handle and every other process that locks the same file, and it is
//! released implicitly when the handle is closed or the process exits.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lockapi::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = LockFileOptions::new().open("/tmp/my-resource.lock")?;
//!
//!     match try_lock_file(&file) {
//!         Ok(()) => println!("lock acquired"),
//!         Err(LockError::WouldBlock) => {
//!             println!("busy, waiting...");
//!             lock_file(&file)?;
//!         }
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     // Critical section - we have exclusive access
//!
//!     unlock_file(&file)?;
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - **Unix**: `flock(2)` with `LOCK_EX`, `LOCK_EX | LOCK_NB` and `LOCK_UN`
//! - **Windows**: `LockFileEx` / `UnlockFileEx` over the whole file, with
//!   `LOCKFILE_FAIL_IMMEDIATELY` for the non-blocking variant
//!
//! The backend is chosen at compile time ([`NativeBackend`]); the functions
//! here only forward to it.
//!
//! # Errors
//!
//! Every failure is one of two kinds:
//!
//! - [`LockError::WouldBlock`]: only from [`try_lock_file`], when another
//!   handle holds the lock
//! - [`LockError::Io`]: anything else the OS reported, with the original
//!   [`std::io::Error`] and the failed [`LockOp`] attached
//!
//! Unlocking a handle that holds no lock succeeds on every platform.
//!
//! # Crate Organization
//!
//! This is a meta-crate that re-exports types from:
//! - `lockapi-core`: error types and the [`LockBackend`] trait
//! - `lockapi-file`: the native backends and [`LockFileOptions`]

pub mod guard;

pub use lockapi_core::*;
pub use lockapi_file::*;

pub use guard::FileLockGuard;

use tracing::instrument;

/// Exclusively locks the file behind `handle` without waiting.
///
/// Returns `Err(LockError::WouldBlock)` immediately if the lock is held
/// through another handle, in this process or another one. Never retries.
#[instrument(level = "trace", skip_all, fields(backend = NativeBackend::NAME))]
pub fn try_lock_file<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
    NativeBackend::try_lock(handle)
}

/// Exclusively locks the file behind `handle`, blocking until the lock can
/// be obtained or the OS reports an error.
///
/// There is no timeout. Never returns `LockError::WouldBlock`.
#[instrument(level = "trace", skip_all, fields(backend = NativeBackend::NAME))]
pub fn lock_file<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
    NativeBackend::lock(handle)
}

/// Releases the lock held through `handle`.
///
/// Succeeds if the handle holds no lock.
#[instrument(level = "trace", skip_all, fields(backend = NativeBackend::NAME))]
pub fn unlock_file<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()> {
    NativeBackend::unlock(handle)
}
