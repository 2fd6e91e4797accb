//! The controller wrapper.
//!
//! [`ControlDl`] registers a theory with a native controller and keeps it in
//! step: grounding prepares the theory, and solving routes every model and
//! statistics update through the theory's hooks before the caller sees them.

use std::fmt;
use std::sync::Arc;

use tefoli_config::TheoryConfig;
use tefoli_core::{
    forward, Assumption, Control, CreateControl, Delegate, DelegateError, DelegateMut,
    FinishCallback, Model, ModelCallback, NativeRef, Part, Shell, SolveCallbacks, SolveControl,
    SolveMode, SolveOutcome, SolveResult, Statistics, StatisticsCallback, Symbol, SymbolIndex,
    Theory, TheoryHandle,
};
use tracing::{debug, trace};

use crate::{ModelDl, SolveHandleDl};

/// Model callback of [`ControlDl::solve`], receiving wrapped models.
pub type ModelDlCallback<C, T> =
    Box<dyn Fn(&ModelDl<'_, C, T>) -> Result<bool, <C as Control>::Error> + Send + Sync>;

/// Callbacks handed to [`ControlDl::solve`].
///
/// Statistics and finish callbacks see the native values; the model callback
/// sees a [`ModelDl`].
pub struct SolveCallbacksDl<C: SolveControl, T> {
    pub on_model: Option<ModelDlCallback<C, T>>,
    pub on_statistics: Option<StatisticsCallback<C::Error>>,
    pub on_finish: Option<FinishCallback<C::Error>>,
}

impl<C: SolveControl, T> SolveCallbacksDl<C, T> {
    /// Creates an empty set of callbacks.
    pub fn new() -> Self {
        Self {
            on_model: None,
            on_statistics: None,
            on_finish: None,
        }
    }

    /// Sets the model callback; returning `Ok(false)` stops the search.
    pub fn on_model<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ModelDl<'_, C, T>) -> Result<bool, C::Error> + Send + Sync + 'static,
    {
        self.on_model = Some(Box::new(callback));
        self
    }

    /// Sets the statistics callback.
    pub fn on_statistics<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Statistics, &mut Statistics) -> Result<(), C::Error> + Send + Sync + 'static,
    {
        self.on_statistics = Some(Box::new(callback));
        self
    }

    /// Sets the finish callback.
    pub fn on_finish<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(SolveResult) -> Result<(), C::Error> + Send + 'static,
    {
        self.on_finish = Some(Box::new(callback));
        self
    }
}

impl<C: SolveControl, T> Default for SolveCallbacksDl<C, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SolveControl, T> fmt::Debug for SolveCallbacksDl<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveCallbacksDl")
            .field("on_model", &self.on_model.is_some())
            .field("on_statistics", &self.on_statistics.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}

/// A native controller with a registered theory.
///
/// Every [`Control`] operation except `ground` is forwarded unchanged.
/// `solve` is an inherent method since it hands out wrapped models and
/// handles.
///
/// # Example
///
/// ```
/// use tefoli_core::{Control, Part, SolveMode, SolveOutcome};
/// use tefoli_dl::{ControlDl, SolveCallbacksDl};
/// use tefoli_test::{MockControl, MockTheory, DL_PROGRAM};
///
/// let mut native = MockControl::with_program(DL_PROGRAM).unwrap();
/// let mut control = ControlDl::<MockControl, MockTheory>::builder()
///     .adopt(&mut native)
///     .build()
///     .unwrap();
///
/// control.ground(&[Part::base()]).unwrap();
/// assert!(control.adjust().is_some());
///
/// let outcome = control
///     .solve(&[], SolveCallbacksDl::new(), SolveMode::BLOCKING)
///     .unwrap();
/// assert!(matches!(outcome, SolveOutcome::Finished(r) if r.is_satisfiable()));
/// ```
pub struct ControlDl<'a, C: SolveControl, T> {
    control: NativeRef<'a, C>,
    theory: TheoryHandle<T>,
    adjust: Option<SymbolIndex>,
}

impl<'a, C: SolveControl, T: Theory<C>> ControlDl<'a, C, T> {
    /// Starts building a controller wrapper.
    pub fn builder() -> ControlDlBuilder<'a, C, T> {
        ControlDlBuilder::new()
    }

    /// Creates a fresh native controller and registers a default theory.
    pub fn new(arguments: &[String]) -> Result<Self, C::Error>
    where
        C: CreateControl,
        C::Error: From<DelegateError>,
    {
        Self::builder().control(C::create(arguments)?).build()
    }
}

impl<C: SolveControl, T> ControlDl<'_, C, T> {
    /// Returns the native controller.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// Returns the native controller mutably.
    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    /// Returns true if the native controller belongs to the caller.
    pub fn is_adopted(&self) -> bool {
        self.control.is_adopted()
    }

    /// Returns the registered theory.
    pub fn theory(&self) -> &TheoryHandle<T> {
        &self.theory
    }

    /// Returns the theory's index of the number `0`, as of the last `ground`.
    ///
    /// `None` before the first grounding pass. The theory only finishes its
    /// own initialisation while grounding, so the value is recomputed after
    /// every `ground`.
    pub fn adjust(&self) -> Option<SymbolIndex> {
        self.adjust
    }
}

impl<C, T> ControlDl<'_, C, T>
where
    C: SolveControl + 'static,
    T: Theory<C> + 'static,
{
    /// Starts a search.
    ///
    /// The theory's `on_model` and `on_statistics` hooks run for every model
    /// and statistics update, before the matching caller callback and also
    /// when the caller supplied none. A failing hook skips the caller
    /// callback and its error is returned. Streaming modes return a
    /// [`SolveHandleDl`]; a blocking search returns the native result.
    pub fn solve(
        &mut self,
        assumptions: &[Assumption],
        callbacks: SolveCallbacksDl<C, T>,
        mode: SolveMode,
    ) -> Result<SolveOutcome<SolveHandleDl<C, T>>, C::Error> {
        let SolveCallbacksDl {
            on_model,
            on_statistics,
            on_finish,
        } = callbacks;

        let theory = Arc::clone(&self.theory);
        let model_hook: ModelCallback<C::Model, C::Error> = Box::new(move |model: &C::Model| {
            theory.on_model(model)?;
            trace!(number = model.number(), thread_id = model.thread_id(), "model");
            match &on_model {
                Some(callback) => callback(&ModelDl::new(model, Arc::clone(&theory))),
                None => Ok(true),
            }
        });

        let theory = Arc::clone(&self.theory);
        let statistics_hook: StatisticsCallback<C::Error> =
            Box::new(move |step: &mut Statistics, accumulated: &mut Statistics| {
                theory.on_statistics(step, accumulated)?;
                trace!(entries = accumulated.len(), "statistics");
                match &on_statistics {
                    Some(callback) => callback(step, accumulated),
                    None => Ok(()),
                }
            });

        let native_callbacks = SolveCallbacks {
            on_model: Some(model_hook),
            on_statistics: Some(statistics_hook),
            on_finish,
        };

        debug!(
            assumptions = assumptions.len(),
            yielding = mode.yielding,
            asynchronous = mode.asynchronous,
            "solving"
        );
        let outcome = self.control.solve(assumptions, native_callbacks, mode)?;

        let theory = Arc::clone(&self.theory);
        Ok(outcome.map_handle(|handle| SolveHandleDl::new(handle, theory)))
    }
}

impl<C: SolveControl, T> Delegate for ControlDl<'_, C, T> {
    type Target = C;

    fn wrapped(&self) -> &C {
        &self.control
    }
}

impl<C: SolveControl, T> DelegateMut for ControlDl<'_, C, T> {
    fn wrapped_mut(&mut self) -> &mut C {
        &mut self.control
    }
}

impl<C: SolveControl, T: Theory<C>> Control for ControlDl<'_, C, T> {
    type Error = C::Error;

    forward! { Control =>
        fn load(&mut self, file: &str) -> Result<(), C::Error>;
        fn add(&mut self, name: &str, parameters: &[&str], program: &str) -> Result<(), C::Error>;
        fn configure(&mut self, key: &str, value: &str) -> Result<(), C::Error>;
        fn is_conflicting(&self) -> bool;
        fn interrupt(&self);
    }

    /// Grounds, prepares the theory and refreshes [`ControlDl::adjust`].
    fn ground(&mut self, parts: &[Part]) -> Result<(), C::Error> {
        self.control.ground(parts)?;
        self.theory.prepare(&mut self.control)?;
        // Only valid once the theory initialised itself during grounding.
        self.adjust = self.theory.lookup_symbol(&Symbol::number(0));
        debug!(parts = parts.len(), adjust = ?self.adjust, "grounded");
        Ok(())
    }
}

impl<C: SolveControl, T> fmt::Debug for ControlDl<'_, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlDl")
            .field("adopted", &self.control.is_adopted())
            .field("adjust", &self.adjust)
            .finish()
    }
}

/// Builds a [`ControlDl`].
///
/// The theory is resolved first: the supplied one, or one loaded from the
/// [`TheoryConfig`] (default: `clingodl` with `propagate=full,1`) and
/// configured with its tunables. The native controller is then bound and the
/// theory registered with it exactly once.
pub struct ControlDlBuilder<'a, C: SolveControl, T> {
    controls: Vec<NativeRef<'a, C>>,
    theory: Option<TheoryHandle<T>>,
    config: TheoryConfig,
}

impl<'a, C: SolveControl, T: Theory<C>> ControlDlBuilder<'a, C, T> {
    /// Creates a builder with the default theory configuration.
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            theory: None,
            config: TheoryConfig::default(),
        }
    }

    /// Wraps a controller the wrapper takes ownership of.
    pub fn control(mut self, control: C) -> Self {
        self.controls.push(NativeRef::Owned(control));
        self
    }

    /// Wraps a controller owned by the caller.
    pub fn adopt(mut self, control: &'a mut C) -> Self {
        self.controls.push(NativeRef::Adopted(control));
        self
    }

    /// Uses an already configured theory.
    pub fn theory(mut self, theory: TheoryHandle<T>) -> Self {
        self.theory = Some(theory);
        self
    }

    /// Sets the configuration a theory is loaded with when none is supplied.
    pub fn config(mut self, config: TheoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the wrapper.
    ///
    /// # Errors
    ///
    /// [`DelegateError::MissingDelegate`] without a controller,
    /// [`DelegateError::AlreadyBound`] with more than one, and any error of
    /// the theory's `load`, `configure` or `register`.
    pub fn build(self) -> Result<ControlDl<'a, C, T>, C::Error>
    where
        C::Error: From<DelegateError>,
    {
        let theory = match self.theory {
            Some(theory) => theory,
            None => {
                let theory = T::load(&self.config)?;
                for (key, value) in self.config.tunables() {
                    theory.configure(&key, &value)?;
                }
                debug!(theory = %self.config.name, library = %self.config.library, "loaded theory");
                Arc::new(theory)
            }
        };

        let mut shell = Shell::new(theory);
        for control in self.controls {
            shell = shell.bind(control)?;
        }
        let (mut control, theory) = shell.build()?.into_parts();

        theory.register(&mut control)?;
        debug!(adopted = control.is_adopted(), "registered theory");

        Ok(ControlDl {
            control,
            theory,
            adjust: None,
        })
    }
}

impl<C: SolveControl, T: Theory<C>> Default for ControlDlBuilder<'_, C, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
