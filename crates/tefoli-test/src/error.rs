//! Errors raised by the mock solver and theory.

use tefoli_core::DelegateError;
use thiserror::Error;

/// Error type of [`MockControl`](crate::MockControl) and everything derived
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// Raised by the mock solver.
    #[error("solver error: {0}")]
    Native(String),

    /// Raised by the mock theory.
    #[error("theory error: {0}")]
    Theory(String),

    /// Raised while wiring a wrapper.
    #[error(transparent)]
    Delegate(#[from] DelegateError),
}
