//! Solve handles that yield [`ModelDl`] values.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use tefoli_core::{
    forward, Delegate, DelegateMut, Model, ModelStream, SolveControl, SolveHandle, SolveResult,
    TheoryHandle,
};
use tracing::{debug, trace, warn};

use crate::ModelDl;

/// Where a [`SolveHandleDl`] is in its scope protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// Created, not yet entered or advanced.
    Idle,
    /// Entered or advanced at least once.
    Active,
    /// `exit` was called, from either of the other states.
    Closed,
}

/// A yielding or asynchronous solve handle of `C` whose models carry the
/// theory `T`.
///
/// Produced by [`ControlDl::solve`](crate::ControlDl::solve). Models are
/// obtained with [`SolveHandleDl::next_model`]; once it returns `None` the
/// handle stays exhausted. Use [`SolveHandleDl::scoped`] to make sure the
/// native search is released.
pub struct SolveHandleDl<C: SolveControl, T> {
    handle: C::Handle,
    theory: TheoryHandle<T>,
    state: ScopeState,
    exhausted: bool,
}

impl<C: SolveControl, T> SolveHandleDl<C, T> {
    /// Wraps a native handle.
    pub fn new(handle: C::Handle, theory: TheoryHandle<T>) -> Self {
        Self {
            handle,
            theory,
            state: ScopeState::Idle,
            exhausted: false,
        }
    }

    /// Returns the native handle.
    pub fn handle(&self) -> &C::Handle {
        &self.handle
    }

    /// Returns the theory shared with the controller.
    pub fn theory(&self) -> &TheoryHandle<T> {
        &self.theory
    }

    /// Returns where the handle is in its scope protocol.
    pub fn state(&self) -> ScopeState {
        self.state
    }

    /// Returns true once the stream reported its end.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Advances to the next model and wraps it.
    ///
    /// The model borrows the handle until the next advance. A closed or
    /// exhausted handle returns `None` without touching the native handle.
    pub fn next_model(&mut self) -> Result<Option<ModelDl<'_, C, T>>, C::Error> {
        if self.exhausted || self.state == ScopeState::Closed {
            return Ok(None);
        }
        if self.state == ScopeState::Idle {
            self.state = ScopeState::Active;
        }
        match self.handle.next_model()? {
            Some(model) => {
                trace!(number = model.number(), thread_id = model.thread_id(), "yielded model");
                Ok(Some(ModelDl::new(model, Arc::clone(&self.theory))))
            }
            None => {
                debug!("solve handle exhausted");
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    /// Enters the handle, runs `body` on it and exits it again.
    ///
    /// `exit` runs whatever `body` returns. An error from `body` takes
    /// precedence; otherwise an error from `exit` is returned.
    ///
    /// ```rust
    /// use tefoli_core::{Control, Part, SolveMode};
    /// use tefoli_dl::{ControlDl, Selection, SolveCallbacksDl};
    /// use tefoli_test::{MockControl, MockTheory, DL_PROGRAM};
    ///
    /// let mut control = ControlDl::<MockControl, MockTheory>::builder()
    ///     .control(MockControl::with_program(DL_PROGRAM).unwrap())
    ///     .build()
    ///     .unwrap();
    /// control.ground(&[Part::base()]).unwrap();
    /// let mut handle = control
    ///     .solve(&[], SolveCallbacksDl::new(), SolveMode::YIELD)
    ///     .unwrap()
    ///     .into_handle()
    ///     .unwrap();
    ///
    /// let models = handle
    ///     .scoped(|handle| {
    ///         let mut models = Vec::new();
    ///         while let Some(model) = handle.next_model()? {
    ///             models.push(model.symbols(Selection::dl())?);
    ///         }
    ///         Ok(models)
    ///     })
    ///     .unwrap();
    /// assert_eq!(models.len(), 1);
    /// ```
    pub fn scoped<R, F>(&mut self, body: F) -> Result<R, C::Error>
    where
        F: FnOnce(&mut Self) -> Result<R, C::Error>,
    {
        self.enter()?;
        let result = body(self);
        let exited = if self.state == ScopeState::Closed {
            Ok(())
        } else {
            self.exit()
        };
        match (result, exited) {
            (Ok(value), exited) => exited.map(|()| value),
            (Err(error), Ok(())) => Err(error),
            (Err(error), Err(exit_error)) => {
                warn!(error = %exit_error, "failed to exit solve handle after an error");
                Err(error)
            }
        }
    }

    /// Enters the handle and returns a guard that exits it when dropped.
    ///
    /// Dropping the guard cannot report a failing `exit`; the error is only
    /// logged. Use [`SolveScope::close`] or [`SolveHandleDl::scoped`] when the
    /// error matters.
    pub fn scope(&mut self) -> Result<SolveScope<'_, C, T>, C::Error> {
        self.enter()?;
        Ok(SolveScope { handle: self })
    }
}

impl<C: SolveControl, T> Delegate for SolveHandleDl<C, T> {
    type Target = C::Handle;

    fn wrapped(&self) -> &C::Handle {
        &self.handle
    }
}

impl<C: SolveControl, T> DelegateMut for SolveHandleDl<C, T> {
    fn wrapped_mut(&mut self) -> &mut C::Handle {
        &mut self.handle
    }
}

impl<C: SolveControl, T> SolveHandle for SolveHandleDl<C, T> {
    type Error = C::Error;

    forward! { SolveHandle =>
        fn get(&mut self) -> Result<SolveResult, C::Error>;
        fn wait(&mut self, timeout: Option<Duration>) -> bool;
        fn resume(&mut self) -> Result<(), C::Error>;
        fn cancel(&mut self) -> Result<(), C::Error>;
    }

    fn enter(&mut self) -> Result<(), C::Error> {
        self.handle.enter()?;
        self.state = ScopeState::Active;
        debug!("entered solve handle");
        Ok(())
    }

    /// Exits the native handle; the wrapper is closed even if that fails.
    ///
    /// A handle that was never entered or advanced is closed as well.
    fn exit(&mut self) -> Result<(), C::Error> {
        let result = self.handle.exit();
        self.state = ScopeState::Closed;
        debug!(ok = result.is_ok(), "exited solve handle");
        result
    }
}

impl<C: SolveControl, T> fmt::Debug for SolveHandleDl<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveHandleDl")
            .field("state", &self.state)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

/// An entered [`SolveHandleDl`]; exits the handle when dropped.
///
/// An error from the implicit exit on drop is logged and then lost. Call
/// [`SolveScope::close`] to receive it instead, or use
/// [`SolveHandleDl::scoped`].
pub struct SolveScope<'h, C: SolveControl, T> {
    handle: &'h mut SolveHandleDl<C, T>,
}

impl<C: SolveControl, T> SolveScope<'_, C, T> {
    /// Exits the handle now.
    pub fn close(mut self) -> Result<(), C::Error> {
        self.handle.exit()
    }
}

impl<C: SolveControl, T> Deref for SolveScope<'_, C, T> {
    type Target = SolveHandleDl<C, T>;

    fn deref(&self) -> &Self::Target {
        &*self.handle
    }
}

impl<C: SolveControl, T> DerefMut for SolveScope<'_, C, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.handle
    }
}

impl<C: SolveControl, T> Drop for SolveScope<'_, C, T> {
    fn drop(&mut self) {
        if self.handle.state == ScopeState::Closed {
            return;
        }
        if let Err(error) = self.handle.exit() {
            warn!(%error, "failed to exit solve handle");
        }
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
