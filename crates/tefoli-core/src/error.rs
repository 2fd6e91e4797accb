//! Error types for the delegation machinery

use thiserror::Error;

/// Errors raised while wiring a wrapper to its delegate.
///
/// Native and theory failures never appear here; they are returned to the
/// caller in the native error type, unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DelegateError {
    /// The wrapper was built before a delegate was bound.
    #[error("wrapper used before its delegate was bound")]
    MissingDelegate,

    /// A second delegate was bound to a shell that already had one.
    #[error("delegate is already bound")]
    AlreadyBound,
}
