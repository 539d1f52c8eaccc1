// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The text-emission collaborator consumed by the engine.
//!
//! The engine never writes to stdout or a log file directly; every
//! listing, trace, and summary line goes through a [`TraceSink`]. The
//! production sink routes through `tracing`; tests substitute a
//! recording sink to assert on output.

use crate::observability::messages::target::{TargetCompleted, TargetStarted};
use crate::observability::messages::StructuredLog;
use std::sync::Mutex;

/// Text sink for build output and trace events.
///
/// `trace_start_target` opens a scope for the named target which is
/// closed by `trace_end_target`; `close_all_open_tags` closes every
/// scope still open, and is invoked when an error is about to be
/// recorded so the emitted log nests correctly.
pub trait TraceSink: Send + Sync {
    /// An ordinary output line.
    fn log(&self, message: &str);

    /// A verbose diagnostic line.
    fn trace(&self, message: &str);

    /// An error line.
    fn trace_error(&self, message: &str);

    /// A horizontal separator.
    fn trace_line(&self);

    /// A section header.
    fn trace_header(&self, header: &str);

    /// A target is about to run.
    fn trace_start_target(&self, name: &str, description: Option<&str>, dependencies: &str);

    /// The named target completed successfully.
    fn trace_end_target(&self, name: &str);

    /// Close every scope still open.
    fn close_all_open_tags(&self);
}

/// [`TraceSink`] implementation backed by `tracing`.
///
/// Keeps a stack of open target scopes so `close_all_open_tags` can
/// emit the missing end events when a failure interrupts nesting.
#[derive(Default)]
pub struct TracingSink {
    open_targets: Mutex<Vec<String>>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn trace(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn trace_error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn trace_line(&self) {
        tracing::info!("{}", "-".repeat(70));
    }

    fn trace_header(&self, header: &str) {
        tracing::info!("{}", "-".repeat(70));
        tracing::info!("{}", header);
        tracing::info!("{}", "-".repeat(70));
    }

    fn trace_start_target(&self, name: &str, description: Option<&str>, dependencies: &str) {
        TargetStarted {
            name,
            description: description.unwrap_or(""),
            dependencies,
        }
        .log();
        if let Ok(mut open) = self.open_targets.lock() {
            open.push(name.to_string());
        }
    }

    fn trace_end_target(&self, name: &str) {
        TargetCompleted { name }.log();
        if let Ok(mut open) = self.open_targets.lock() {
            if let Some(position) = open.iter().rposition(|n| n == name) {
                open.remove(position);
            }
        }
    }

    fn close_all_open_tags(&self) {
        let drained: Vec<String> = match self.open_targets.lock() {
            Ok(mut open) => open.drain(..).rev().collect(),
            Err(_) => Vec::new(),
        };
        for name in drained {
            tracing::debug!(target_name = %name, "Closing interrupted target scope");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_target_closes_matching_scope() {
        let sink = TracingSink::new();
        sink.trace_start_target("compile", None, "[]");
        sink.trace_start_target("test", None, "[compile]");
        sink.trace_end_target("test");
        assert_eq!(*sink.open_targets.lock().unwrap(), vec!["compile".to_string()]);
    }

    #[test]
    fn close_all_open_tags_drains_the_stack() {
        let sink = TracingSink::new();
        sink.trace_start_target("compile", None, "[]");
        sink.trace_start_target("test", None, "[compile]");
        sink.close_all_open_tags();
        assert!(sink.open_targets.lock().unwrap().is_empty());
    }
}
