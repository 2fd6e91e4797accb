//! Models produced by the mock solver.

use tefoli_core::{Model, ShowType, Symbol};

use crate::MockError;

/// A model holding every grounded atom.
#[derive(Debug, Clone, PartialEq)]
pub struct MockModel {
    symbols: Vec<Symbol>,
    number: u64,
    thread_id: u32,
    cost: Vec<i64>,
}

impl MockModel {
    /// Creates a model found by `thread_id` as the `number`th model.
    pub fn new(symbols: Vec<Symbol>, number: u64, thread_id: u32) -> Self {
        Self {
            symbols,
            number,
            thread_id,
            cost: Vec::new(),
        }
    }

    /// Sets the cost vector.
    pub fn with_cost(mut self, cost: Vec<i64>) -> Self {
        self.cost = cost;
        self
    }
}

impl Model for MockModel {
    type Error = MockError;

    fn symbols(&self, show: ShowType) -> Result<Vec<Symbol>, MockError> {
        if show.atoms || show.shown {
            Ok(self.symbols.clone())
        } else {
            Ok(Vec::new())
        }
    }

    fn contains(&self, atom: &Symbol) -> Result<bool, MockError> {
        Ok(self.symbols.contains(atom))
    }

    fn number(&self) -> u64 {
        self.number
    }

    fn thread_id(&self) -> u32 {
        self.thread_id
    }

    fn cost(&self) -> Result<Vec<i64>, MockError> {
        Ok(self.cost.clone())
    }

    fn optimality_proven(&self) -> Result<bool, MockError> {
        Ok(!self.cost.is_empty())
    }
}
