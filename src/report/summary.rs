// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::state::ExecutionState;
use crate::registry::TargetRegistry;
use crate::traits::TraceSink;
use std::time::Duration;

const MIN_NAME_WIDTH: usize = 8;

/// Print the build time table: one row per executed target in
/// completion order, a Total row, and the final status. On failure the
/// numbered error list follows.
pub fn write_task_time_summary(
    registry: &TargetRegistry,
    sink: &dyn TraceSink,
    state: &ExecutionState,
    total: Duration,
) {
    sink.trace_header("Build Time Report");

    let rows: Vec<(String, Duration)> = state
        .timings()
        .iter()
        .map(|(key, elapsed)| {
            let display = registry
                .get(key)
                .map(|t| t.name.clone())
                .unwrap_or_else(|_| key.clone());
            (display, *elapsed)
        })
        .collect();

    let width = rows
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH);

    sink.log(&format!("{:<width$}   Duration", "Target"));
    sink.log(&format!("{:<width$}   --------", "------"));
    for (name, elapsed) in &rows {
        sink.log(&format!("{:<width$}   {:?}", name, elapsed));
    }
    sink.log(&format!("{:<width$}   {:?}", "Total:", total));

    if state.has_errors() {
        sink.log(&format!("{:<width$}   Failure", "Status:"));
        sink.trace_error("Errors:");
        for (index, record) in state.errors().iter().enumerate() {
            sink.trace_error(&format!(
                "{}) {}: {}",
                index + 1,
                record.target,
                record.message
            ));
        }
    } else {
        sink.log(&format!("{:<width$}   Ok", "Status:"));
    }
    sink.trace_line();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl TraceSink for RecordingSink {
        fn log(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }
        fn trace(&self, _: &str) {}
        fn trace_error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
        fn trace_line(&self) {}
        fn trace_header(&self, _: &str) {}
        fn trace_start_target(&self, _: &str, _: Option<&str>, _: &str) {}
        fn trace_end_target(&self, _: &str) {}
        fn close_all_open_tags(&self) {}
    }

    fn registry_with(names: &[&str]) -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        for name in names {
            registry.define(name, || Ok(())).unwrap();
        }
        registry
    }

    #[test]
    fn rows_use_display_names_in_completion_order() {
        let registry = registry_with(&["Compile", "Test"]);
        let mut state = ExecutionState::new();
        state.record_run("test".into(), Duration::from_millis(5));
        state.record_run("compile".into(), Duration::from_millis(9));

        let sink = RecordingSink::default();
        write_task_time_summary(&registry, &sink, &state, Duration::from_millis(20));

        let lines = sink.lines.lock().unwrap().clone();
        let test_row = lines.iter().position(|l| l.starts_with("Test")).unwrap();
        let compile_row = lines.iter().position(|l| l.starts_with("Compile")).unwrap();
        assert!(test_row < compile_row);
        assert!(lines.iter().any(|l| l.starts_with("Status:") && l.ends_with("Ok")));
    }

    #[test]
    fn columns_align_to_widest_name_with_minimum_width() {
        let registry = registry_with(&["ab", "a_rather_long_target_name"]);
        let mut state = ExecutionState::new();
        state.record_run("ab".into(), Duration::from_millis(1));
        state.record_run("a_rather_long_target_name".into(), Duration::from_millis(1));

        let sink = RecordingSink::default();
        write_task_time_summary(&registry, &sink, &state, Duration::from_millis(2));

        let lines = sink.lines.lock().unwrap().clone();
        let header = lines.iter().find(|l| l.starts_with("Target")).unwrap();
        let duration_column = header.find("Duration").unwrap();
        assert_eq!(duration_column, "a_rather_long_target_name".len() + 3);

        // Minimum width applies when every name is short.
        let small = registry_with(&["ab"]);
        let mut small_state = ExecutionState::new();
        small_state.record_run("ab".into(), Duration::from_millis(1));
        let sink = RecordingSink::default();
        write_task_time_summary(&small, &sink, &small_state, Duration::from_millis(1));
        let lines = sink.lines.lock().unwrap().clone();
        let header = lines.iter().find(|l| l.starts_with("Target")).unwrap();
        assert_eq!(header.find("Duration").unwrap(), 8 + 3);
    }

    #[test]
    fn failure_prints_numbered_error_list() {
        let registry = registry_with(&["Compile"]);
        let mut state = ExecutionState::new();
        state.record_run("compile".into(), Duration::from_millis(3));
        state.record_failure("Compile", "type error");
        state.record_failure("Compile", "missing semicolon");

        let sink = RecordingSink::default();
        write_task_time_summary(&registry, &sink, &state, Duration::from_millis(3));

        let lines = sink.lines.lock().unwrap().clone();
        assert!(lines.iter().any(|l| l.starts_with("Status:") && l.ends_with("Failure")));

        let errors = sink.errors.lock().unwrap().clone();
        assert_eq!(errors[0], "Errors:");
        assert_eq!(errors[1], "1) Compile: type error");
        assert_eq!(errors[2], "2) Compile: missing semicolon");
    }
}
