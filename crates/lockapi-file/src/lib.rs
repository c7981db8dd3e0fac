//! Native backends for exclusive advisory file locks.
//!
//! Each supported platform gets one [`LockBackend`] implementation, and
//! [`NativeBackend`] names the one compiled for the current target:
//!
//! - **Unix**: [`PosixBackend`], `flock(2)` with `LOCK_EX` / `LOCK_NB` / `LOCK_UN`
//! - **Windows**: [`WindowsBackend`], `LockFileEx` / `UnlockFileEx` over the whole file
//! - anything else: `UnsupportedBackend`, which fails every call
//!
//! [`LockBackend`]: lockapi_core::LockBackend

pub mod options;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

#[cfg(not(any(unix, windows)))]
pub mod unsupported;

pub use options::LockFileOptions;

#[cfg(unix)]
pub use unix::PosixBackend;

#[cfg(windows)]
pub use windows::WindowsBackend;

#[cfg(not(any(unix, windows)))]
pub use unsupported::UnsupportedBackend;

/// The backend compiled for the current target.
#[cfg(unix)]
pub type NativeBackend = PosixBackend;

/// The backend compiled for the current target.
#[cfg(windows)]
pub type NativeBackend = WindowsBackend;

/// The backend compiled for the current target.
#[cfg(not(any(unix, windows)))]
pub type NativeBackend = UnsupportedBackend;
