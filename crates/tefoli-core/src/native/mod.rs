//! The external solver's object model, as consumed by the wrappers.
//!
//! The solver itself is foreign: a binding crate implements these traits for
//! its own controller, solve handle and model types. Only the value
//! vocabulary ([`Symbol`], [`Statistics`], [`ShowType`], ...) is concrete.
//!
//! - [`Control`] / [`SolveControl`] / [`CreateControl`]: the solving controller
//! - [`SolveHandle`] / [`ModelStream`]: a yielding or asynchronous solve
//! - [`Model`]: one produced solution
//! - [`OptionSink`]: where a host collects command-line options

mod control;
mod handle;
mod model;
mod options;
mod statistics;
mod symbol;

pub use control::{
    Assumption, Control, CreateControl, FinishCallback, ModelCallback, Part, SolveCallbacks,
    SolveControl, SolveMode, SolveOutcome, StatisticsCallback,
};
pub use handle::{ModelStream, SolveHandle, SolveResult};
pub use model::{Model, ShowType};
pub use options::OptionSink;
pub use statistics::Statistics;
pub use symbol::Symbol;
