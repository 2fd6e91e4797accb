//! Produced solutions.

use std::error::Error as StdError;
use std::ops::BitOr;

use super::Symbol;

/// Filter flags selecting which symbols of a model are reported.
///
/// Flags combine with `|`.
///
/// # Examples
///
/// ```
/// use tefoli_core::native::ShowType;
///
/// let show = ShowType::ATOMS | ShowType::TERMS;
/// assert!(show.atoms && show.terms);
/// assert!(!show.shown);
/// assert!(ShowType::NONE.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ShowType {
    /// All atoms of the model.
    pub atoms: bool,
    /// All terms of the model.
    pub terms: bool,
    /// Atoms and terms selected by show statements.
    pub shown: bool,
    /// Values contributed by theory extensions known to the solver itself.
    pub theory: bool,
    /// The complement of the selection.
    pub complement: bool,
}

impl ShowType {
    /// Selects nothing.
    pub const NONE: Self = Self {
        atoms: false,
        terms: false,
        shown: false,
        theory: false,
        complement: false,
    };

    /// Selects all atoms.
    pub const ATOMS: Self = Self {
        atoms: true,
        ..Self::NONE
    };

    /// Selects all terms.
    pub const TERMS: Self = Self {
        terms: true,
        ..Self::NONE
    };

    /// Selects shown atoms and terms.
    pub const SHOWN: Self = Self {
        shown: true,
        ..Self::NONE
    };

    /// Selects solver-native theory values.
    pub const THEORY: Self = Self {
        theory: true,
        ..Self::NONE
    };

    /// Selects the complement.
    pub const COMPLEMENT: Self = Self {
        complement: true,
        ..Self::NONE
    };

    /// Returns the union of two selections.
    pub const fn union(self, other: Self) -> Self {
        Self {
            atoms: self.atoms || other.atoms,
            terms: self.terms || other.terms,
            shown: self.shown || other.shown,
            theory: self.theory || other.theory,
            complement: self.complement || other.complement,
        }
    }

    /// Returns true if no flag is set.
    pub const fn is_empty(&self) -> bool {
        !(self.atoms || self.terms || self.shown || self.theory || self.complement)
    }
}

impl BitOr for ShowType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// One solution produced by a solve call.
///
/// Models are owned by the solver; callers only ever see them borrowed,
/// for the duration of a callback or until the stream advances.
pub trait Model {
    /// Error raised by the native solver.
    type Error: StdError + Send + Sync + 'static;

    /// Returns the symbols selected by `show`, in the solver's order.
    fn symbols(&self, show: ShowType) -> Result<Vec<Symbol>, Self::Error>;

    /// Returns true if the atom is true in this model.
    fn contains(&self, atom: &Symbol) -> Result<bool, Self::Error>;

    /// Returns the running number of this model, starting at 1.
    fn number(&self) -> u64;

    /// Returns the id of the solver thread that found this model.
    fn thread_id(&self) -> u32;

    /// Returns the cost vector for optimization problems.
    fn cost(&self) -> Result<Vec<i64>, Self::Error>;

    /// Returns true if the model is known to be optimal.
    fn optimality_proven(&self) -> Result<bool, Self::Error>;
}
