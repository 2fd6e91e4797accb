//! Tefoli - theory extensions layered over an existing solver object model
//!
//! Wrap a native controller once; grounding, solving and every model it
//! produces then carry the values of a difference logic theory.
//!
//! # Example
//!
//! ```rust
//! use tefoli::prelude::*;
//! use tefoli_test::{MockControl, MockTheory, DL_PROGRAM};
//!
//! let mut native = MockControl::with_program(DL_PROGRAM).unwrap();
//! let mut control = ControlDl::<MockControl, MockTheory>::builder()
//!     .adopt(&mut native)
//!     .build()
//!     .unwrap();
//! control.ground(&[Part::base()]).unwrap();
//!
//! let mut handle = control
//!     .solve(&[], SolveCallbacksDl::new(), SolveMode::YIELD)
//!     .unwrap()
//!     .into_handle()
//!     .unwrap();
//! handle
//!     .scoped(|handle| {
//!         while let Some(model) = handle.next_model()? {
//!             for symbol in model.symbols(Selection::from(ShowType::SHOWN).with_dl())? {
//!                 println!("{}", symbol);
//!             }
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//! ```

pub mod logging;

// Delegation core
pub use tefoli_core::delegate;
pub use tefoli_core::{forward, Bound, Delegate, DelegateError, DelegateMut, NativeRef, Shell};

// Native object model
pub use tefoli_core::native;
pub use tefoli_core::{
    Assumption, Control, CreateControl, Model, ModelStream, OptionSink, Part, ShowType,
    SolveCallbacks, SolveControl, SolveHandle, SolveMode, SolveOutcome, SolveResult, Statistics,
    Symbol,
};

// Theory contract
pub use tefoli_core::{Assignment, SymbolIndex, Theory, TheoryHandle};

// Configuration
pub use tefoli_config::{ApplicationConfig, ConfigError, PropagateConfig, PropagateMode, TheoryConfig};

// Wrappers
pub use tefoli_dl::{
    ApplicationDl, ControlDl, ControlDlBuilder, MainHook, ModelDl, ScopeState, Selection,
    SolveCallbacksDl, SolveHandleDl, SolveScope,
};

pub mod prelude {
    pub use super::{
        ApplicationDl, ControlDl, ModelDl, Selection, SolveCallbacksDl, SolveHandleDl,
    };
    pub use super::{
        Control, Model, Part, ShowType, SolveControl, SolveHandle, SolveMode, SolveOutcome,
        Symbol, Theory,
    };
    pub use super::{ApplicationConfig, TheoryConfig};
}
