//! A theory that records the hooks it receives.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tefoli_config::{PropagateMode, TheoryConfig};
use tefoli_core::{Assignment, Model, OptionSink, Statistics, Symbol, SymbolIndex, Theory};

use crate::{MockControl, MockError, MockModel};

const OPTION_GROUP: &str = "Clingo.DL Options";

/// A hook call observed by [`MockTheory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TheoryEvent {
    Configured { key: String, value: String },
    Registered,
    Prepared,
    Model { thread_id: u32, number: u64 },
    Statistics,
    OptionsRegistered,
    OptionsValidated,
}

/// A difference logic theory stand-in.
///
/// The values it assigns are fixed up front; they become visible for a
/// solver thread once [`Theory::on_model`] saw a model of that thread, as
/// with a real propagator. The symbol table holds the grounded atoms followed
/// by the number `0`, rebuilt on every [`Theory::prepare`].
#[derive(Debug)]
pub struct MockTheory {
    name: String,
    values: Vec<(Symbol, Symbol)>,
    assignments: Mutex<BTreeMap<u32, Vec<(Symbol, Symbol)>>>,
    symbols: Mutex<Vec<Symbol>>,
    configuration: Mutex<BTreeMap<String, String>>,
    events: Mutex<Vec<TheoryEvent>>,
    failing_on_model: bool,
}

impl MockTheory {
    /// Creates a theory named `name` assigning nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            assignments: Mutex::new(BTreeMap::new()),
            symbols: Mutex::new(Vec::new()),
            configuration: Mutex::new(BTreeMap::new()),
            events: Mutex::new(Vec::new()),
            failing_on_model: false,
        }
    }

    /// Assigns `value` to the atom `name` in every model.
    pub fn with_value(mut self, name: Symbol, value: i32) -> Self {
        self.values.push((name, Symbol::number(value)));
        self
    }

    /// The assignment of the difference constraint `&diff{ a - b } <= -5`:
    /// `a = 0`, `b = 5`.
    pub fn with_dl_assignment(self) -> Self {
        self.with_value(Symbol::id("a"), 0).with_value(Symbol::id("b"), 5)
    }

    /// Makes [`Theory::on_model`] fail.
    pub fn failing_on_model(mut self) -> Self {
        self.failing_on_model = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns every hook call so far, in order.
    pub fn events(&self) -> Vec<TheoryEvent> {
        lock(&self.events).clone()
    }

    /// Counts the hook calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&TheoryEvent) -> bool) -> usize {
        lock(&self.events).iter().filter(|e| predicate(e)).count()
    }

    /// Returns a configured tunable.
    pub fn configuration(&self, key: &str) -> Option<String> {
        lock(&self.configuration).get(key).cloned()
    }

    fn record(&self, event: TheoryEvent) {
        lock(&self.events).push(event);
    }
}

impl Default for MockTheory {
    fn default() -> Self {
        Self::new("clingodl")
    }
}

impl Theory<MockControl> for MockTheory {
    fn load(config: &TheoryConfig) -> Result<Self, MockError> {
        if config.library.is_empty() {
            return Err(MockError::Theory(format!(
                "no library for theory {}",
                config.name
            )));
        }
        Ok(Self::new(config.name.clone()).with_dl_assignment())
    }

    fn configure(&self, key: &str, value: &str) -> Result<(), MockError> {
        lock(&self.configuration).insert(key.to_string(), value.to_string());
        self.record(TheoryEvent::Configured {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn register(&self, control: &mut MockControl) -> Result<(), MockError> {
        control.register_propagator(self.name.clone());
        self.record(TheoryEvent::Registered);
        Ok(())
    }

    fn prepare(&self, control: &mut MockControl) -> Result<(), MockError> {
        let mut symbols = lock(&self.symbols);
        symbols.clear();
        symbols.extend(control.grounded().iter().cloned());
        symbols.push(Symbol::number(0));
        drop(symbols);
        self.record(TheoryEvent::Prepared);
        Ok(())
    }

    fn lookup_symbol(&self, symbol: &Symbol) -> Option<SymbolIndex> {
        lock(&self.symbols)
            .iter()
            .position(|s| s == symbol)
            .map(|index| SymbolIndex(index as u32))
    }

    fn assignment(&self, thread_id: u32) -> Assignment<'_> {
        let pairs = lock(&self.assignments)
            .get(&thread_id)
            .cloned()
            .unwrap_or_default();
        Box::new(pairs.into_iter())
    }

    fn on_model(&self, model: &MockModel) -> Result<(), MockError> {
        self.record(TheoryEvent::Model {
            thread_id: model.thread_id(),
            number: model.number(),
        });
        if self.failing_on_model {
            return Err(MockError::Theory("on_model failed".into()));
        }
        lock(&self.assignments).insert(model.thread_id(), self.values.clone());
        Ok(())
    }

    fn on_statistics(
        &self,
        step: &mut Statistics,
        accumulated: &mut Statistics,
    ) -> Result<(), MockError> {
        step.add("DifferenceLogic.Propagations", 1.0);
        accumulated.add("DifferenceLogic.Propagations", 1.0);
        self.record(TheoryEvent::Statistics);
        Ok(())
    }

    fn register_options(&self, options: &mut dyn OptionSink) -> Result<(), MockError> {
        options.add(
            OPTION_GROUP,
            "propagate",
            "Set propagation mode [no]",
            "<mode>",
        );
        options.add_flag(OPTION_GROUP, "rdl", "Enable support for real numbers");
        self.record(TheoryEvent::OptionsRegistered);
        Ok(())
    }

    fn validate_options(&self) -> Result<(), MockError> {
        self.record(TheoryEvent::OptionsValidated);
        let Some(value) = self.configuration("propagate") else {
            return Ok(());
        };
        let mode = value.split(',').next().unwrap_or_default();
        let known = [
            PropagateMode::No,
            PropagateMode::Inverse,
            PropagateMode::Partial,
            PropagateMode::PartialPlus,
            PropagateMode::Zero,
            PropagateMode::Full,
        ]
        .iter()
        .any(|m| m.as_str() == mode);
        if known {
            Ok(())
        } else {
            Err(MockError::Theory(format!("invalid propagate mode: {}", value)))
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
