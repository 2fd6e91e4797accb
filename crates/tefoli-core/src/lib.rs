//! Tefoli Core - delegation machinery and the solver object model
//!
//! This crate provides the pieces every wrapper is built from:
//! - [`delegate`]: transparent delegation (`Delegate`, two-phase `Shell`
//!   construction and the `forward!` pass-through generator)
//! - [`native`]: the traits through which the external solver is consumed,
//!   plus its value vocabulary (symbols, statistics, solve modes)
//! - [`theory`]: the contract of the auxiliary theory extension
//! - [`error`]: errors raised by the delegation machinery itself

pub mod delegate;
pub mod error;
pub mod native;
pub mod theory;

pub use delegate::{Bound, Delegate, DelegateMut, NativeRef, Shell};
pub use error::DelegateError;
pub use native::{
    Assumption, Control, CreateControl, FinishCallback, Model, ModelCallback, ModelStream,
    OptionSink, Part, ShowType, SolveCallbacks, SolveControl, SolveHandle, SolveMode,
    SolveOutcome, SolveResult, Statistics, StatisticsCallback, Symbol,
};
pub use theory::{Assignment, SymbolIndex, Theory, TheoryHandle};
