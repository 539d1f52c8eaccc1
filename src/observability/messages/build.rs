// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for build run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start and mode selection
//! * Run completion and failure
//! * Lifecycle hook dispatch

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A build run started for the requested root target.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BuildStarted<'a> {
    pub root: &'a str,
    pub mode: &'a str,
    pub workers: usize,
}

impl Display for BuildStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting build of '{}' in {} mode: workers={}",
            self.root, self.mode, self.workers
        )
    }
}

impl StructuredLog for BuildStarted<'_> {
    fn log(&self) {
        tracing::info!(
            root = self.root,
            mode = self.mode,
            workers = self.workers,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "build_run",
            span_name = name,
            root = self.root,
            mode = self.mode,
            workers = self.workers,
        )
    }
}

/// A build run finished; `succeeded` distinguishes Ok from Failure.
///
/// # Log Level
/// `info!` on success, `error!` on failure
pub struct BuildFinished<'a> {
    pub root: &'a str,
    pub executed: usize,
    pub error_count: usize,
    pub duration: std::time::Duration,
}

impl BuildFinished<'_> {
    pub fn succeeded(&self) -> bool {
        self.error_count == 0
    }
}

impl Display for BuildFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Build of '{}' finished: {} targets in {:?}, {} error(s)",
            self.root, self.executed, self.duration, self.error_count
        )
    }
}

impl StructuredLog for BuildFinished<'_> {
    fn log(&self) {
        if self.succeeded() {
            tracing::info!(
                root = self.root,
                executed = self.executed,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        } else {
            tracing::error!(
                root = self.root,
                executed = self.executed,
                error_count = self.error_count,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "build_finished",
            span_name = name,
            root = self.root,
            executed = self.executed,
            error_count = self.error_count,
        )
    }
}

/// Lifecycle hooks of one kind are about to run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct HooksDispatched<'a> {
    pub kind: &'a str,
    pub count: usize,
}

impl Display for HooksDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Running {} activated {} target(s)", self.count, self.kind)
    }
}

impl StructuredLog for HooksDispatched<'_> {
    fn log(&self) {
        tracing::info!(kind = self.kind, count = self.count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "hooks_dispatched",
            span_name = name,
            kind = self.kind,
            count = self.count,
        )
    }
}
