//! Core trait implemented once per platform.

use crate::error::LockResult;
use crate::handle::LockableHandle;

/// Exclusive whole-file advisory locking on top of one native primitive.
///
/// Backends hold no state: every function performs exactly one OS call
/// against the borrowed handle and returns. Who holds the lock is tracked by
/// the operating system alone, which also releases it when the handle is
/// closed or the process exits.
///
/// # Example
///
/// ```rust,ignore
/// fn with_lock<B: LockBackend>(file: &File) -> LockResult<()> {
///     match B::try_lock(file) {
///         Ok(()) => {}
///         Err(LockError::WouldBlock) => B::lock(file)?,
///         Err(e) => return Err(e),
///     }
///     do_work(file);
///     B::unlock(file)
/// }
/// ```
pub trait LockBackend {
    /// Name of the native primitive, recorded in tracing spans.
    const NAME: &'static str;

    /// Attempts to acquire an exclusive lock without waiting.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Lock acquired
    /// * `Err(LockError::WouldBlock)` - Lock is held through another handle
    /// * `Err(LockError::Io)` - Any other OS failure
    fn try_lock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()>;

    /// Acquires an exclusive lock, suspending the calling thread until the
    /// OS grants it.
    ///
    /// There is no timeout and no cancellation. This never returns
    /// `LockError::WouldBlock`; an interrupted wait is reported as
    /// `LockError::Io` and is not retried.
    fn lock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()>;

    /// Releases the lock held through `handle`.
    ///
    /// Releasing a handle that holds no lock succeeds on every platform.
    fn unlock<H: LockableHandle + ?Sized>(handle: &H) -> LockResult<()>;
}
