//! Tefoli DL - difference logic for an existing solver object model
//!
//! Wraps a native controller, its solve handles and its models so that the
//! values assigned by a difference logic theory travel with them:
//! - [`ControlDl`]: registers the theory, prepares it after grounding and
//!   routes every model and statistics update through its hooks
//! - [`SolveHandleDl`]: yields [`ModelDl`] values from a streaming search
//! - [`ModelDl`]: reports `dl(name, value)` symbols next to the native ones
//! - [`ApplicationDl`]: entry points for a solver host
//!
//! Each wrapper implements the native trait of the type it wraps and forwards
//! everything it does not override, so native errors reach the caller
//! unchanged.

pub mod application;
pub mod control;
pub mod handle;
pub mod model;

pub use application::{ApplicationDl, MainHook};
pub use control::{ControlDl, ControlDlBuilder, ModelDlCallback, SolveCallbacksDl};
pub use handle::{ScopeState, SolveHandleDl, SolveScope};
pub use model::{ModelDl, Selection};
