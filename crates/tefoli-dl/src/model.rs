//! Models extended with difference logic values.

use std::fmt;
use std::sync::Arc;

use tefoli_core::{
    forward, Delegate, Model, ShowType, SolveControl, Symbol, Theory, TheoryHandle,
};

/// Which symbols [`ModelDl::symbols`] reports.
///
/// Converts from a plain [`ShowType`], leaving the difference logic values
/// out.
///
/// ```
/// use tefoli_core::ShowType;
/// use tefoli_dl::Selection;
///
/// let selection = Selection::from(ShowType::ATOMS).with_dl();
/// assert!(selection.show.atoms && selection.dl);
/// assert!(!Selection::from(ShowType::ATOMS).dl);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Native filter flags.
    pub show: ShowType,
    /// Also report one `dl(name, value)` symbol per assigned value.
    pub dl: bool,
}

impl Selection {
    /// Creates a selection.
    pub const fn new(show: ShowType, dl: bool) -> Self {
        Self { show, dl }
    }

    /// Selects only the difference logic values.
    pub const fn dl() -> Self {
        Self::new(ShowType::NONE, true)
    }

    /// Adds the difference logic values to this selection.
    pub fn with_dl(self) -> Self {
        Self { dl: true, ..self }
    }
}

impl From<ShowType> for Selection {
    fn from(show: ShowType) -> Self {
        Self::new(show, false)
    }
}

/// A model of `C` that also reports the values assigned by the theory `T`.
///
/// Borrows the native model for as long as the solver keeps it alive.
pub struct ModelDl<'m, C: SolveControl, T> {
    model: &'m C::Model,
    theory: TheoryHandle<T>,
}

impl<'m, C: SolveControl, T> ModelDl<'m, C, T> {
    /// Wraps `model`.
    pub fn new(model: &'m C::Model, theory: TheoryHandle<T>) -> Self {
        Self { model, theory }
    }

    /// Returns the native model.
    pub fn model(&self) -> &'m C::Model {
        self.model
    }

    /// Returns the theory shared with the controller that produced this model.
    pub fn theory(&self) -> &TheoryHandle<T> {
        &self.theory
    }
}

impl<C: SolveControl, T: Theory<C>> ModelDl<'_, C, T> {
    /// Returns the selected symbols.
    ///
    /// With [`Selection::dl`] set, the `dl(name, value)` symbols of the
    /// theory's assignment for this model's thread come first, followed by
    /// the native symbols in the solver's order. Nothing is de-duplicated.
    pub fn symbols(&self, selection: impl Into<Selection>) -> Result<Vec<Symbol>, C::Error> {
        let selection = selection.into();
        let mut symbols = Vec::new();
        if selection.dl {
            symbols.extend(
                self.theory
                    .assignment(self.model.thread_id())
                    .map(|(name, value)| Symbol::function("dl", vec![name, value])),
            );
        }
        symbols.extend(self.model.symbols(selection.show)?);
        Ok(symbols)
    }
}

impl<C: SolveControl, T> Delegate for ModelDl<'_, C, T> {
    type Target = C::Model;

    fn wrapped(&self) -> &C::Model {
        self.model
    }
}

impl<C: SolveControl, T> Model for ModelDl<'_, C, T> {
    type Error = C::Error;

    forward! { Model =>
        fn symbols(&self, show: ShowType) -> Result<Vec<Symbol>, C::Error>;
        fn contains(&self, atom: &Symbol) -> Result<bool, C::Error>;
        fn number(&self) -> u64;
        fn thread_id(&self) -> u32;
        fn cost(&self) -> Result<Vec<i64>, C::Error>;
        fn optimality_proven(&self) -> Result<bool, C::Error>;
    }
}

impl<C: SolveControl, T> Clone for ModelDl<'_, C, T> {
    fn clone(&self) -> Self {
        Self {
            model: self.model,
            theory: Arc::clone(&self.theory),
        }
    }
}

impl<C: SolveControl, T> fmt::Debug for ModelDl<'_, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDl")
            .field("number", &self.model.number())
            .field("thread_id", &self.model.thread_id())
            .finish()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
