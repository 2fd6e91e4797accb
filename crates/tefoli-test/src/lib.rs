//! Shared test fixtures for tefoli crates.
//!
//! An in-memory stand-in for the external solver and a recording theory, so
//! the wrappers can be exercised without a native library.
//!
//! - [`control`] - [`MockControl`], a controller over plain facts
//! - [`handle`] - [`MockHandle`], the yielding solve handle
//! - [`model`] - [`MockModel`]
//! - [`theory`] - [`MockTheory`], which records every hook it receives
//! - [`options`] - [`RecordingOptions`], an option sink
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tefoli-test = { workspace = true }
//! ```
//!
//! Then build a controller over a small program:
//!
//! ```
//! use tefoli_core::{Control, Part, Symbol};
//! use tefoli_test::MockControl;
//!
//! let mut control = MockControl::new();
//! control.add("base", &[], "a. b.").unwrap();
//! control.ground(&[Part::base()]).unwrap();
//! assert_eq!(control.grounded(), &[Symbol::id("a"), Symbol::id("b")]);
//! ```

pub mod control;
pub mod error;
pub mod handle;
pub mod model;
pub mod options;
pub mod theory;

pub use control::MockControl;
pub use error::MockError;
pub use handle::MockHandle;
pub use model::MockModel;
pub use options::{RecordedOption, RecordingOptions};
pub use theory::{MockTheory, TheoryEvent};

/// The program used throughout the tests: two facts and a difference
/// constraint the mock solver ignores.
pub const DL_PROGRAM: &str = "a. b.\n&diff{ a - b } <= -5.\n";
