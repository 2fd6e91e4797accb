//! An in-memory solving controller.
//!
//! Programs are lists of facts such as `a. p(1,x).`; rules, directives and
//! theory atoms (`&diff{...}`) are accepted and ignored, and the empty
//! constraint `:- .` makes the program conflicting. Every grounded fact is
//! true in every model. One model is produced per solver thread.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tefoli_core::{
    Assumption, Control, CreateControl, Part, SolveCallbacks, SolveControl, SolveMode,
    SolveOutcome, SolveResult, Statistics, Symbol,
};

use crate::{MockError, MockHandle, MockModel};

/// A controller over plain facts.
#[derive(Debug)]
pub struct MockControl {
    arguments: Vec<String>,
    programs: BTreeMap<String, Vec<Symbol>>,
    conflicting: bool,
    grounded: Vec<Symbol>,
    loaded: Vec<String>,
    configuration: BTreeMap<String, String>,
    propagators: Vec<String>,
    threads: u32,
    ground_calls: usize,
    solve_calls: usize,
    last_assumptions: Vec<Assumption>,
    ground_failure: Option<String>,
    failing_exit: bool,
    interrupted: AtomicBool,
}

impl Default for MockControl {
    fn default() -> Self {
        Self {
            arguments: Vec::new(),
            programs: BTreeMap::new(),
            conflicting: false,
            grounded: Vec::new(),
            loaded: Vec::new(),
            configuration: BTreeMap::new(),
            propagators: Vec::new(),
            threads: 1,
            ground_calls: 0,
            solve_calls: 0,
            last_assumptions: Vec::new(),
            ground_failure: None,
            failing_exit: false,
            interrupted: AtomicBool::new(false),
        }
    }
}

impl MockControl {
    /// Creates a single-threaded controller with an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller over `program` in the `base` part.
    pub fn with_program(program: &str) -> Result<Self, MockError> {
        let mut control = Self::new();
        control.add("base", &[], program)?;
        Ok(control)
    }

    /// Searches with `threads` solver threads, each finding one model.
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Makes every following `ground` call fail with `message`.
    pub fn with_ground_failure(mut self, message: impl Into<String>) -> Self {
        self.ground_failure = Some(message.into());
        self
    }

    /// Makes `exit` fail on every handle this controller returns.
    pub fn with_failing_exit(mut self) -> Self {
        self.failing_exit = true;
        self
    }

    /// Returns the arguments the controller was created with.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Returns the atoms grounded so far, in grounding order.
    pub fn grounded(&self) -> &[Symbol] {
        &self.grounded
    }

    /// Returns the files loaded so far.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    /// Returns a configuration entry.
    pub fn configuration(&self, key: &str) -> Option<&str> {
        self.configuration.get(key).map(String::as_str)
    }

    /// Attaches a propagator, as a theory does on registration.
    pub fn register_propagator(&mut self, name: impl Into<String>) {
        self.propagators.push(name.into());
    }

    /// Returns the attached propagators.
    pub fn propagators(&self) -> &[String] {
        &self.propagators
    }

    pub fn ground_calls(&self) -> usize {
        self.ground_calls
    }

    pub fn solve_calls(&self) -> usize {
        self.solve_calls
    }

    pub fn last_assumptions(&self) -> &[Assumption] {
        &self.last_assumptions
    }

    /// Returns true once `interrupt` was called.
    pub fn was_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn models(&self, assumptions: &[Assumption]) -> Vec<MockModel> {
        if self.conflicting {
            return Vec::new();
        }
        let consistent = assumptions.iter().all(|assumption| match assumption {
            Assumption::Atom(atom, value) => self.grounded.contains(atom) == *value,
            Assumption::Literal(_) => true,
        });
        if !consistent {
            return Vec::new();
        }
        (0..self.threads)
            .map(|thread_id| {
                MockModel::new(self.grounded.clone(), u64::from(thread_id) + 1, thread_id)
            })
            .collect()
    }
}

impl Control for MockControl {
    type Error = MockError;

    fn load(&mut self, file: &str) -> Result<(), MockError> {
        if file != "-" {
            let program = std::fs::read_to_string(file)
                .map_err(|e| MockError::Native(format!("{}: {}", file, e)))?;
            self.add("base", &[], &program)?;
        }
        self.loaded.push(file.to_string());
        Ok(())
    }

    fn add(&mut self, name: &str, _parameters: &[&str], program: &str) -> Result<(), MockError> {
        let mut facts = Vec::new();
        for statement in program.split('.') {
            let statement = statement.trim();
            if statement == ":-" {
                self.conflicting = true;
                continue;
            }
            if statement.is_empty()
                || statement.starts_with('&')
                || statement.starts_with('#')
                || statement.starts_with('%')
                || statement.contains(":-")
            {
                continue;
            }
            facts.push(parse_fact(statement)?);
        }
        self.programs
            .entry(name.to_string())
            .or_default()
            .extend(facts);
        Ok(())
    }

    fn ground(&mut self, parts: &[Part]) -> Result<(), MockError> {
        if let Some(message) = &self.ground_failure {
            return Err(MockError::Native(message.clone()));
        }
        self.ground_calls += 1;
        for part in parts {
            let Some(facts) = self.programs.get(&part.name) else {
                continue;
            };
            for fact in facts {
                if !self.grounded.contains(fact) {
                    self.grounded.push(fact.clone());
                }
            }
        }
        Ok(())
    }

    fn configure(&mut self, key: &str, value: &str) -> Result<(), MockError> {
        self.configuration
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn is_conflicting(&self) -> bool {
        self.conflicting
    }

    fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}

impl SolveControl for MockControl {
    type Model = MockModel;
    type Handle = MockHandle;

    fn solve(
        &mut self,
        assumptions: &[Assumption],
        callbacks: SolveCallbacks<MockModel, MockError>,
        mode: SolveMode,
    ) -> Result<SolveOutcome<MockHandle>, MockError> {
        self.solve_calls += 1;
        self.last_assumptions = assumptions.to_vec();
        let models = self.models(assumptions);

        if mode.is_streaming() {
            return Ok(SolveOutcome::Handle(MockHandle::new(
                models,
                callbacks,
                self.failing_exit,
            )));
        }

        let SolveCallbacks {
            on_model,
            on_statistics,
            on_finish,
        } = callbacks;

        let mut found = 0usize;
        let mut exhausted = true;
        if let Some(on_model) = &on_model {
            if models.len() > 1 {
                // One worker per solver thread; the callback runs concurrently.
                let outcomes: Vec<Result<bool, MockError>> = thread::scope(|scope| {
                    let workers: Vec<_> = models
                        .iter()
                        .map(|model| scope.spawn(move || on_model(model)))
                        .collect();
                    workers
                        .into_iter()
                        .map(|worker| {
                            worker.join().unwrap_or_else(|_| {
                                Err(MockError::Native("solver thread panicked".into()))
                            })
                        })
                        .collect()
                });
                for outcome in outcomes {
                    exhausted &= outcome?;
                    found += 1;
                }
            } else {
                for model in &models {
                    found += 1;
                    if !on_model(model)? {
                        exhausted = false;
                        break;
                    }
                }
            }
        } else {
            found = models.len();
        }

        let result = if models.is_empty() {
            SolveResult::unsatisfiable()
        } else {
            SolveResult::satisfiable(exhausted)
        };

        if let Some(on_statistics) = &on_statistics {
            let (mut step, mut accumulated) = solving_statistics(found);
            on_statistics(&mut step, &mut accumulated)?;
        }
        if let Some(on_finish) = on_finish {
            on_finish(result)?;
        }
        Ok(SolveOutcome::Finished(result))
    }
}

impl CreateControl for MockControl {
    /// Accepts `--parallel-mode=N`; other arguments are recorded only.
    fn create(arguments: &[String]) -> Result<Self, MockError> {
        let mut control = Self::new();
        for argument in arguments {
            if let Some(threads) = argument.strip_prefix("--parallel-mode=") {
                let threads: u32 = threads
                    .parse()
                    .map_err(|_| MockError::Native(format!("invalid argument: {}", argument)))?;
                control = control.with_threads(threads);
            }
        }
        control.arguments = arguments.to_vec();
        Ok(control)
    }
}

/// Step and accumulated statistics after a search that found `models`.
pub(crate) fn solving_statistics(models: usize) -> (Statistics, Statistics) {
    let mut step = Statistics::new();
    step.set("solving.solvers.models", models as f64);
    let mut accumulated = Statistics::new();
    accumulated.set("summary.models.enumerated", models as f64);
    (step, accumulated)
}

fn parse_fact(statement: &str) -> Result<Symbol, MockError> {
    let invalid = || MockError::Native(format!("parsing failed: {}", statement));
    match statement.split_once('(') {
        None => {
            if !is_identifier(statement) {
                return Err(invalid());
            }
            Ok(Symbol::id(statement))
        }
        Some((name, rest)) => {
            let name = name.trim();
            let arguments = rest.trim().strip_suffix(')').ok_or_else(invalid)?;
            if !is_identifier(name) {
                return Err(invalid());
            }
            let arguments = arguments
                .split(',')
                .map(|argument| parse_term(argument.trim()).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Symbol::function(name, arguments))
        }
    }
}

fn parse_term(term: &str) -> Option<Symbol> {
    if let Ok(value) = term.parse::<i32>() {
        return Some(Symbol::number(value));
    }
    if let Some(value) = term.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        return Some(Symbol::string(value));
    }
    is_identifier(term).then(|| Symbol::id(term))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facts() {
        let mut control = MockControl::new();
        control
            .add("base", &[], "a. p(1,x). q(\"s\").\n&diff{ a - b } <= -5.\nr :- a.")
            .unwrap();
        control.ground(&[Part::base()]).unwrap();

        assert_eq!(
            control.grounded(),
            &[
                Symbol::id("a"),
                Symbol::function("p", vec![Symbol::number(1), Symbol::id("x")]),
                Symbol::function("q", vec![Symbol::string("s")]),
            ]
        );
    }

    #[test]
    fn test_parse_error() {
        let mut control = MockControl::new();
        let err = control.add("base", &[], "A.").unwrap_err();

        assert!(matches!(err, MockError::Native(_)));
    }

    #[test]
    fn test_ground_only_named_parts() {
        let mut control = MockControl::new();
        control.add("base", &[], "a.").unwrap();
        control.add("step", &["t"], "b.").unwrap();

        control.ground(&[Part::base()]).unwrap();
        assert_eq!(control.grounded(), &[Symbol::id("a")]);

        control.ground(&[Part::new("step", vec![Symbol::number(1)])]).unwrap();
        assert_eq!(control.grounded(), &[Symbol::id("a"), Symbol::id("b")]);
        assert_eq!(control.ground_calls(), 2);
    }

    #[test]
    fn test_conflicting_program_is_unsat() {
        let mut control = MockControl::with_program("a. :- .").unwrap();
        control.ground(&[Part::base()]).unwrap();
        assert!(control.is_conflicting());

        let outcome = control
            .solve(&[], SolveCallbacks::new(), SolveMode::BLOCKING)
            .unwrap();
        assert_eq!(outcome.result(), Some(SolveResult::unsatisfiable()));
    }

    #[test]
    fn test_create_with_threads() {
        let args = vec!["--parallel-mode=3".to_string(), "-q".to_string()];
        let control = MockControl::create(&args).unwrap();

        assert_eq!(control.threads, 3);
        assert_eq!(control.arguments(), &args[..]);
        assert!(MockControl::create(&["--parallel-mode=x".to_string()]).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let mut control = MockControl::new();
        control.load("-").unwrap();

        assert!(control.load("/nonexistent/program.lp").is_err());
        assert_eq!(control.loaded(), &["-".to_string()]);
    }
}
