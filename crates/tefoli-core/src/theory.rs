//! The contract of a theory extension.
//!
//! A theory contributes values beyond the solver's own atoms, for example the
//! integer assignment of a difference logic extension. It is implemented
//! outside this workspace (typically over a native library); the wrappers only
//! rely on the operations below.
//!
//! # Thread safety
//!
//! One theory instance is shared, through a [`TheoryHandle`], by a controller
//! wrapper and every handle and model derived from it. The solver may call
//! [`Theory::on_model`] and [`Theory::assignment`] from several solver threads
//! at once, so all methods take `&self` and implementations synchronise their
//! own state, keyed by thread id where it is per-thread.

use std::fmt;
use std::sync::Arc;

use tefoli_config::TheoryConfig;

use crate::native::{OptionSink, SolveControl, Statistics, Symbol};

/// Shared handle to a theory, one per controller lineage.
pub type TheoryHandle<T> = Arc<T>;

/// A finite, lazily produced sequence of `(name, value)` pairs.
///
/// Calling [`Theory::assignment`] again starts a fresh sequence.
pub type Assignment<'a> = Box<dyn Iterator<Item = (Symbol, Symbol)> + 'a>;

/// Index of a symbol in a theory's own symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolIndex(pub u32);

impl fmt::Display for SymbolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A theory extension for the controller type `C`.
///
/// Failures are reported in the controller's own error type, so they reach
/// callers exactly as the extension raised them.
pub trait Theory<C: SolveControl>: Send + Sync {
    /// Creates an unregistered instance of the theory named in `config`.
    fn load(config: &TheoryConfig) -> Result<Self, C::Error>
    where
        Self: Sized;

    /// Sets a tunable; only meaningful before [`Theory::register`].
    fn configure(&self, key: &str, value: &str) -> Result<(), C::Error>;

    /// Attaches the theory to a controller. Called once per controller.
    fn register(&self, control: &mut C) -> Result<(), C::Error>;

    /// Updates the theory after a grounding pass.
    fn prepare(&self, control: &mut C) -> Result<(), C::Error>;

    /// Looks `symbol` up in the theory's symbol table as of the last
    /// [`Theory::prepare`].
    fn lookup_symbol(&self, symbol: &Symbol) -> Option<SymbolIndex>;

    /// Returns the values computed for the current model of `thread_id`.
    fn assignment(&self, thread_id: u32) -> Assignment<'_>;

    /// Bookkeeping for every model the solver produces.
    fn on_model(&self, model: &C::Model) -> Result<(), C::Error>;

    /// Bookkeeping for every statistics update; may add entries.
    fn on_statistics(
        &self,
        step: &mut Statistics,
        accumulated: &mut Statistics,
    ) -> Result<(), C::Error>;

    /// Registers the theory's command-line options.
    fn register_options(&self, options: &mut dyn OptionSink) -> Result<(), C::Error>;

    /// Checks the option values received so far.
    fn validate_options(&self) -> Result<(), C::Error>;
}
