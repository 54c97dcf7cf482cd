//! Host-facing interpreter driver.
//!
//! Folds the evaluator's per-node reports into the coarse events a host
//! cares about, so a driver is a plain `match` loop: render writes,
//! answer reads, stop on `Finished` or `EvaluationError`.

use psc_ir::{StringInterner, Type, Value};

use crate::evaluator::{Evaluator, StepReport};
use crate::program::Program;
use crate::EvalError;

/// A host-visible execution event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// First call to `run_to_event()`; nothing has executed yet.
    Started,
    /// The program wrote a value.
    Write(Value),
    /// The program wants one input value of the given type.
    Read { ty: Type },
    /// Still waiting on input from an earlier `Read`.
    Paused,
    /// Input accepted; execution will continue.
    Resumed,
    /// The program ran to completion (or was aborted).
    Finished,
    /// The program halted on a runtime error.
    EvaluationError(EvalError),
}

/// Drives an [`Evaluator`] from event to event.
pub struct Interpreter<'a> {
    evaluator: Evaluator<'a>,
    started: bool,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: Program, interner: &'a StringInterner) -> Self {
        Interpreter {
            evaluator: Evaluator::new(program, interner),
            started: false,
        }
    }

    /// Step until something host-visible happens.
    pub fn run_to_event(&mut self) -> Event {
        if !self.started {
            self.started = true;
            return Event::Started;
        }
        if self.evaluator.awaiting_input() {
            return Event::Paused;
        }
        loop {
            match self.evaluator.step() {
                StepReport::Continue => {}
                StepReport::Write(value) => return Event::Write(value),
                StepReport::Read { ty } => return Event::Read { ty },
                StepReport::Done => return Event::Finished,
                StepReport::Error(error) => return Event::EvaluationError(error),
            }
        }
    }

    /// Answer the outstanding read request.
    pub fn provide_input(&mut self, value: Value) -> Event {
        self.evaluator.input(value);
        Event::Resumed
    }

    /// Stop the run; the next event is `Finished`.
    pub fn abort(&mut self) {
        self.evaluator.abort();
    }

    /// Inspect the machine between events.
    pub fn evaluator(&self) -> &Evaluator<'a> {
        &self.evaluator
    }
}
