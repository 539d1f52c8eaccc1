// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::FailurePolicy;
use crate::traits::{CiReporter, TraceSink};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One recorded failure: the target it came from and the message.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub target: String,
    pub message: String,
}

/// Mutable state shared by every worker for the duration of one run.
///
/// All three fields sit behind a single mutex (see [`RunContext`]);
/// their mutations are tiny compared to target work, so one lock
/// covering them keeps the invariants simple: a target is marked
/// executed and timed in the same critical section.
#[derive(Default)]
pub struct ExecutionState {
    /// Case-folded names whose bodies ran, successfully or not
    executed: HashSet<String>,
    /// `(folded name, elapsed)` in completion order
    timings: Vec<(String, Duration)>,
    /// Failures in recording order
    errors: Vec<FailureRecord>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_executed(&self, key: &str) -> bool {
        self.executed.contains(key)
    }

    pub fn executed_count(&self) -> usize {
        self.executed.len()
    }

    /// Mark a body as having run: timing row plus executed-set entry in
    /// one step.
    pub fn record_run(&mut self, key: String, elapsed: Duration) {
        self.timings.push((key.clone(), elapsed));
        self.executed.insert(key);
    }

    pub fn record_failure(&mut self, target: &str, message: impl Into<String>) {
        self.errors.push(FailureRecord {
            target: target.to_string(),
            message: message.into(),
        });
    }

    pub fn errors(&self) -> &[FailureRecord] {
        &self.errors
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }
}

/// Everything a worker needs to run one target: the shared state and
/// the collaborators, all cheaply cloneable.
#[derive(Clone)]
pub struct RunContext {
    pub state: Arc<Mutex<ExecutionState>>,
    pub sink: Arc<dyn TraceSink>,
    pub ci: Arc<dyn CiReporter>,
    pub policy: FailurePolicy,
    pub print_stack_trace: bool,
}

impl RunContext {
    /// Lock the shared state. A poisoned lock is recovered: the state
    /// is only ever mutated through small, panic-free methods, so the
    /// data is intact even if a holder panicked.
    pub fn lock_state(&self) -> MutexGuard<'_, ExecutionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_run_marks_executed_and_timed_together() {
        let mut state = ExecutionState::new();
        state.record_run("compile".into(), Duration::from_millis(12));

        assert!(state.is_executed("compile"));
        assert_eq!(state.timings().len(), 1);
        assert_eq!(state.timings()[0].0, "compile");
    }

    #[test]
    fn timings_preserve_completion_order() {
        let mut state = ExecutionState::new();
        state.record_run("b".into(), Duration::from_millis(1));
        state.record_run("a".into(), Duration::from_millis(2));

        let order: Vec<&str> = state.timings().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn failures_accumulate_in_order() {
        let mut state = ExecutionState::new();
        assert!(!state.has_errors());
        state.record_failure("compile", "type error");
        state.record_failure("test", "2 tests failed");
        assert!(state.has_errors());
        assert_eq!(state.errors()[0].target, "compile");
        assert_eq!(state.errors()[1].target, "test");
    }
}
