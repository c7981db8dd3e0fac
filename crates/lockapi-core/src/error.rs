//! Error types for file lock operations.

use std::fmt;
use std::io;

use thiserror::Error;

/// The operation that produced a [`LockError::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockOp {
    /// Non-blocking exclusive lock attempt.
    TryLock,
    /// Blocking exclusive lock acquisition.
    Lock,
    /// Lock release.
    Unlock,
    /// Opening the file that is about to be locked.
    Open,
}

impl LockOp {
    /// Returns the operation name as it appears in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockOp::TryLock => "try_lock",
            LockOp::Lock => "lock",
            LockOp::Unlock => "unlock",
            LockOp::Open => "open",
        }
    }
}

impl fmt::Display for LockOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during lock operations.
///
/// There are exactly two kinds, and callers should branch on the variant
/// alone. The wrapped [`io::Error`] is kept for diagnostics only.
#[derive(Error, Debug)]
pub enum LockError {
    /// The file is exclusively locked through another handle.
    ///
    /// Only the non-blocking variant produces this.
    #[error("file is already locked by another handle")]
    WouldBlock,

    /// Any other failure reported by the operating system.
    #[error("{op} failed: {source}")]
    Io {
        /// The operation that failed.
        op: LockOp,
        /// The error as reported by the operating system.
        #[source]
        source: io::Error,
    },
}

impl LockError {
    /// Wraps an OS error raised by `op`.
    pub fn io(op: LockOp, source: io::Error) -> Self {
        LockError::Io { op, source }
    }

    /// Captures the calling thread's last OS error for `op`.
    pub fn last_os_error(op: LockOp) -> Self {
        Self::io(op, io::Error::last_os_error())
    }

    /// Returns `true` for [`LockError::WouldBlock`].
    pub fn is_would_block(&self) -> bool {
        matches!(self, LockError::WouldBlock)
    }

    /// Returns the failed operation, if this is an I/O error.
    pub fn op(&self) -> Option<LockOp> {
        match self {
            LockError::WouldBlock => None,
            LockError::Io { op, .. } => Some(*op),
        }
    }

    /// Returns the platform error code, if the OS supplied one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            LockError::WouldBlock => None,
            LockError::Io { source, .. } => source.raw_os_error(),
        }
    }
}

impl From<LockError> for io::Error {
    fn from(err: LockError) -> Self {
        match err {
            LockError::WouldBlock => io::Error::new(io::ErrorKind::WouldBlock, LockError::WouldBlock),
            LockError::Io { source, .. } => source,
        }
    }
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_would_block_has_no_os_details() {
        let err = LockError::WouldBlock;
        assert!(err.is_would_block());
        assert_eq!(err.op(), None);
        assert_eq!(err.raw_os_error(), None);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_keeps_os_code_and_origin() {
        let err = LockError::io(LockOp::Unlock, io::Error::from_raw_os_error(9));
        assert!(!err.is_would_block());
        assert_eq!(err.op(), Some(LockOp::Unlock));
        assert_eq!(err.raw_os_error(), Some(9));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("unlock failed: "));
    }

    #[test]
    fn test_conversion_into_io_error() {
        let would_block: io::Error = LockError::WouldBlock.into();
        assert_eq!(would_block.kind(), io::ErrorKind::WouldBlock);

        let original = io::Error::from_raw_os_error(13);
        let kind = original.kind();
        let converted: io::Error = LockError::io(LockOp::Lock, original).into();
        assert_eq!(converted.kind(), kind);
        assert_eq!(converted.raw_os_error(), Some(13));
    }

    #[test]
    fn test_op_display() {
        assert_eq!(LockOp::TryLock.to_string(), "try_lock");
        assert_eq!(LockOp::Lock.to_string(), "lock");
        assert_eq!(LockOp::Unlock.to_string(), "unlock");
        assert_eq!(LockOp::Open.to_string(), "open");
    }
}
