//! The handle bound accepted by lock operations.

/// An already-open file handle that lock operations can borrow.
///
/// Blanket-implemented for everything that exposes a borrowed OS handle, so
/// `File`, `&File`, `OwnedFd` / `OwnedHandle` and friends all qualify. Lock
/// operations only borrow the handle for the duration of one call; opening
/// and closing it stays with the caller.
#[cfg(unix)]
pub trait LockableHandle: std::os::fd::AsFd {}

#[cfg(unix)]
impl<T: std::os::fd::AsFd + ?Sized> LockableHandle for T {}

/// An already-open file handle that lock operations can borrow.
///
/// Blanket-implemented for everything that exposes a borrowed OS handle, so
/// `File`, `&File`, `OwnedFd` / `OwnedHandle` and friends all qualify. Lock
/// operations only borrow the handle for the duration of one call; opening
/// and closing it stays with the caller.
#[cfg(windows)]
pub trait LockableHandle: std::os::windows::io::AsHandle {}

#[cfg(windows)]
impl<T: std::os::windows::io::AsHandle + ?Sized> LockableHandle for T {}

/// Any value; no target without unix or windows handles can lock files.
#[cfg(not(any(unix, windows)))]
pub trait LockableHandle {}

#[cfg(not(any(unix, windows)))]
impl<T: ?Sized> LockableHandle for T {}
