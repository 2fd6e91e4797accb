//! Yielding and asynchronous solve calls.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use super::Model;

/// Outcome of a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveResult {
    /// `Some(true)` if a model was found, `Some(false)` if the problem is
    /// unsatisfiable, `None` if the search stopped before deciding.
    pub satisfiable: Option<bool>,
    /// The search space was fully explored.
    pub exhausted: bool,
    /// The search was interrupted.
    pub interrupted: bool,
}

impl SolveResult {
    /// A satisfiable result.
    pub fn satisfiable(exhausted: bool) -> Self {
        Self {
            satisfiable: Some(true),
            exhausted,
            interrupted: false,
        }
    }

    /// An unsatisfiable result.
    pub fn unsatisfiable() -> Self {
        Self {
            satisfiable: Some(false),
            exhausted: true,
            interrupted: false,
        }
    }

    /// Returns true if a model was found.
    pub fn is_satisfiable(&self) -> bool {
        self.satisfiable == Some(true)
    }

    /// Returns true if the problem has no model.
    pub fn is_unsatisfiable(&self) -> bool {
        self.satisfiable == Some(false)
    }

    /// Returns true if the search stopped before deciding.
    pub fn is_unknown(&self) -> bool {
        self.satisfiable.is_none()
    }
}

impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.satisfiable {
            Some(true) => f.write_str("SAT"),
            Some(false) => f.write_str("UNSAT"),
            None => f.write_str("UNKNOWN"),
        }
    }
}

/// Control over a running solve call.
///
/// `enter` and `exit` bracket the use of the handle; `exit` releases the
/// native search and must be called on every path once `enter` succeeded.
pub trait SolveHandle {
    /// Error raised by the native solver.
    type Error: StdError + Send + Sync + 'static;

    /// Blocks until the search finishes and returns its result.
    fn get(&mut self) -> Result<SolveResult, Self::Error>;

    /// Waits for the next result, at most `timeout` (forever if `None`).
    ///
    /// Returns true if a result is ready.
    fn wait(&mut self, timeout: Option<Duration>) -> bool;

    /// Continues the search after a model was reported.
    fn resume(&mut self) -> Result<(), Self::Error>;

    /// Stops the running search.
    fn cancel(&mut self) -> Result<(), Self::Error>;

    /// Acquires the handle's scope.
    fn enter(&mut self) -> Result<(), Self::Error>;

    /// Releases the handle's scope and the native search.
    fn exit(&mut self) -> Result<(), Self::Error>;
}

/// A solve handle that yields models one at a time.
pub trait ModelStream: SolveHandle {
    /// The native model type.
    type Model: Model<Error = Self::Error>;

    /// Advances to the next model.
    ///
    /// Returns `None` once the search is over. The model stays valid until
    /// the next call.
    fn next_model(&mut self) -> Result<Option<&Self::Model>, Self::Error>;
}
