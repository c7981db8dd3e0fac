//! Core traits and types for portable advisory file locks.

pub mod error;
pub mod handle;
pub mod prelude;
pub mod traits;

pub use error::{LockError, LockOp, LockResult};
pub use handle::LockableHandle;
pub use traits::LockBackend;
