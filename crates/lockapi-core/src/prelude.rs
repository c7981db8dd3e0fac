//! Convenience prelude for file lock types.

pub use crate::error::{LockError, LockOp, LockResult};
pub use crate::handle::LockableHandle;
pub use crate::traits::LockBackend;
