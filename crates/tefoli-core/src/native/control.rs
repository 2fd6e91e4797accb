//! The solving controller.

use std::error::Error as StdError;
use std::fmt;

use super::{Model, ModelStream, SolveResult, Statistics, Symbol};

/// A program part to ground, e.g. `base` with no parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Part {
    /// Name of the program block.
    pub name: String,
    /// Values for the block's parameters.
    pub params: Vec<Symbol>,
}

impl Part {
    /// Creates a part.
    pub fn new(name: impl Into<String>, params: Vec<Symbol>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// The `base` part every program has.
    pub fn base() -> Self {
        Self::new("base", Vec::new())
    }
}

/// An assumption restricting a solve call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Assumption {
    /// A program literal (negative for negated literals).
    Literal(i32),
    /// An atom with the truth value it is assumed to have.
    Atom(Symbol, bool),
}

/// How `solve` delivers its models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveMode {
    /// Return a handle that yields models one by one.
    pub yielding: bool,
    /// Return a handle immediately and search in the background.
    pub asynchronous: bool,
}

impl SolveMode {
    /// Blocking solve; models only reach the `on_model` callback.
    pub const BLOCKING: Self = Self {
        yielding: false,
        asynchronous: false,
    };

    /// Yield models through a handle.
    pub const YIELD: Self = Self {
        yielding: true,
        asynchronous: false,
    };

    /// Search asynchronously behind a handle.
    pub const ASYNC: Self = Self {
        yielding: false,
        asynchronous: true,
    };

    /// Returns true if the solve call returns a handle.
    pub const fn is_streaming(&self) -> bool {
        self.yielding || self.asynchronous
    }
}

/// Called for every model; returning `Ok(false)` stops the search.
///
/// The solver may call it concurrently from several threads.
pub type ModelCallback<M, E> = Box<dyn Fn(&M) -> Result<bool, E> + Send + Sync>;

/// Called with the per-step and the accumulated statistics after a search.
pub type StatisticsCallback<E> =
    Box<dyn Fn(&mut Statistics, &mut Statistics) -> Result<(), E> + Send + Sync>;

/// Called once with the final result.
pub type FinishCallback<E> = Box<dyn FnOnce(SolveResult) -> Result<(), E> + Send>;

/// Callbacks handed to a native solve call.
pub struct SolveCallbacks<M, E> {
    pub on_model: Option<ModelCallback<M, E>>,
    pub on_statistics: Option<StatisticsCallback<E>>,
    pub on_finish: Option<FinishCallback<E>>,
}

impl<M, E> SolveCallbacks<M, E> {
    /// Creates an empty set of callbacks.
    pub fn new() -> Self {
        Self {
            on_model: None,
            on_statistics: None,
            on_finish: None,
        }
    }

    /// Sets the model callback.
    pub fn on_model<F>(mut self, callback: F) -> Self
    where
        F: Fn(&M) -> Result<bool, E> + Send + Sync + 'static,
    {
        self.on_model = Some(Box::new(callback));
        self
    }

    /// Sets the statistics callback.
    pub fn on_statistics<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Statistics, &mut Statistics) -> Result<(), E> + Send + Sync + 'static,
    {
        self.on_statistics = Some(Box::new(callback));
        self
    }

    /// Sets the finish callback.
    pub fn on_finish<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(SolveResult) -> Result<(), E> + Send + 'static,
    {
        self.on_finish = Some(Box::new(callback));
        self
    }
}

impl<M, E> Default for SolveCallbacks<M, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, E> fmt::Debug for SolveCallbacks<M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveCallbacks")
            .field("on_model", &self.on_model.is_some())
            .field("on_statistics", &self.on_statistics.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}

/// What a solve call returns: a final result, or a handle when yielding or
/// solving asynchronously.
#[derive(Debug)]
pub enum SolveOutcome<H> {
    /// The search ran to completion.
    Finished(SolveResult),
    /// The search continues behind a handle.
    Handle(H),
}

impl<H> SolveOutcome<H> {
    /// Returns the final result, if the search completed.
    pub fn result(&self) -> Option<SolveResult> {
        match self {
            SolveOutcome::Finished(result) => Some(*result),
            SolveOutcome::Handle(_) => None,
        }
    }

    /// Returns the handle, if one was produced.
    pub fn into_handle(self) -> Option<H> {
        match self {
            SolveOutcome::Finished(_) => None,
            SolveOutcome::Handle(handle) => Some(handle),
        }
    }

    /// Converts the handle, leaving a finished result untouched.
    pub fn map_handle<G>(self, f: impl FnOnce(H) -> G) -> SolveOutcome<G> {
        match self {
            SolveOutcome::Finished(result) => SolveOutcome::Finished(result),
            SolveOutcome::Handle(handle) => SolveOutcome::Handle(f(handle)),
        }
    }
}

/// The solving controller: program loading, grounding and configuration.
pub trait Control {
    /// Error raised by the native solver.
    type Error: StdError + Send + Sync + 'static;

    /// Loads a program file; `"-"` reads standard input.
    fn load(&mut self, file: &str) -> Result<(), Self::Error>;

    /// Adds program text to the block `name` with the given parameters.
    fn add(&mut self, name: &str, parameters: &[&str], program: &str) -> Result<(), Self::Error>;

    /// Grounds the given parts.
    fn ground(&mut self, parts: &[Part]) -> Result<(), Self::Error>;

    /// Sets a solver configuration entry.
    fn configure(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Returns true if the program is known to be unsatisfiable.
    fn is_conflicting(&self) -> bool;

    /// Interrupts a running search.
    fn interrupt(&self);
}

/// A controller that can search for models.
pub trait SolveControl: Control {
    /// The native model type.
    type Model: Model<Error = Self::Error>;

    /// The native handle returned by yielding and asynchronous solving.
    type Handle: ModelStream<Model = Self::Model, Error = Self::Error>;

    /// Starts a search.
    ///
    /// Returns [`SolveOutcome::Handle`] exactly when `mode` is streaming.
    fn solve(
        &mut self,
        assumptions: &[Assumption],
        callbacks: SolveCallbacks<Self::Model, Self::Error>,
        mode: SolveMode,
    ) -> Result<SolveOutcome<Self::Handle>, Self::Error>;
}

/// A controller that can be created from command-line style arguments.
pub trait CreateControl: Control + Sized {
    /// Creates a fresh controller.
    fn create(arguments: &[String]) -> Result<Self, Self::Error>;
}
