//! The yielding solve handle of the mock solver.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use tefoli_core::{ModelStream, SolveCallbacks, SolveHandle, SolveResult};

use crate::control::solving_statistics;
use crate::{MockError, MockModel};

/// Yields precomputed models one at a time.
///
/// The model callback runs on every advance, the statistics and finish
/// callbacks once the stream ends. Counters record how the handle was used.
pub struct MockHandle {
    pending: VecDeque<MockModel>,
    current: Option<MockModel>,
    callbacks: SolveCallbacks<MockModel, MockError>,
    found: usize,
    satisfiable: bool,
    stopped: bool,
    finished: bool,
    cancelled: bool,
    failing_exit: bool,
    advances: usize,
    enters: usize,
    exits: usize,
}

impl MockHandle {
    /// Creates a handle over `models`.
    pub fn new(
        models: Vec<MockModel>,
        callbacks: SolveCallbacks<MockModel, MockError>,
        failing_exit: bool,
    ) -> Self {
        Self {
            satisfiable: !models.is_empty(),
            pending: models.into(),
            current: None,
            callbacks,
            found: 0,
            stopped: false,
            finished: false,
            cancelled: false,
            failing_exit,
            advances: 0,
            enters: 0,
            exits: 0,
        }
    }

    /// Number of `next_model` calls received.
    pub fn advances(&self) -> usize {
        self.advances
    }

    pub fn enters(&self) -> usize {
        self.enters
    }

    pub fn exits(&self) -> usize {
        self.exits
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Returns true once the statistics and finish callbacks ran.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn result(&self) -> SolveResult {
        SolveResult {
            satisfiable: if self.cancelled && !self.satisfiable {
                None
            } else {
                Some(self.satisfiable)
            },
            exhausted: !self.stopped && !self.cancelled,
            interrupted: self.cancelled,
        }
    }

    fn finish(&mut self) -> Result<(), MockError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if let Some(on_statistics) = &self.callbacks.on_statistics {
            let (mut step, mut accumulated) = solving_statistics(self.found);
            on_statistics(&mut step, &mut accumulated)?;
        }
        if let Some(on_finish) = self.callbacks.on_finish.take() {
            on_finish(self.result())?;
        }
        Ok(())
    }
}

impl fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHandle")
            .field("pending", &self.pending.len())
            .field("advances", &self.advances)
            .field("finished", &self.finished)
            .finish()
    }
}

impl SolveHandle for MockHandle {
    type Error = MockError;

    fn get(&mut self) -> Result<SolveResult, MockError> {
        while self.next_model()?.is_some() {}
        Ok(self.result())
    }

    fn wait(&mut self, _timeout: Option<Duration>) -> bool {
        true
    }

    fn resume(&mut self) -> Result<(), MockError> {
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), MockError> {
        self.cancelled = true;
        self.pending.clear();
        Ok(())
    }

    fn enter(&mut self) -> Result<(), MockError> {
        self.enters += 1;
        Ok(())
    }

    fn exit(&mut self) -> Result<(), MockError> {
        self.exits += 1;
        if self.failing_exit {
            return Err(MockError::Native("exit failed".into()));
        }
        Ok(())
    }
}

impl ModelStream for MockHandle {
    type Model = MockModel;

    fn next_model(&mut self) -> Result<Option<&MockModel>, MockError> {
        self.advances += 1;
        self.current = None;
        let Some(model) = self.pending.pop_front() else {
            self.finish()?;
            return Ok(None);
        };
        self.found += 1;
        if let Some(on_model) = &self.callbacks.on_model {
            if !on_model(&model)? {
                self.stopped = true;
                self.pending.clear();
            }
        }
        Ok(Some(&*self.current.insert(model)))
    }
}
