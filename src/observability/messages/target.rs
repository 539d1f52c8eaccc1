// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-target execution events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A target's body is about to run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TargetStarted<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub dependencies: &'a str,
}

impl Display for TargetStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "Starting target '{}' {}", self.name, self.dependencies)
        } else {
            write!(
                f,
                "Starting target '{}' ({}) {}",
                self.name, self.description, self.dependencies
            )
        }
    }
}

impl StructuredLog for TargetStarted<'_> {
    fn log(&self) {
        tracing::info!(
            target_name = self.name,
            dependencies = self.dependencies,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "target_execution",
            span_name = name,
            target_name = self.name,
            dependencies = self.dependencies,
        )
    }
}

/// A target's body completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TargetCompleted<'a> {
    pub name: &'a str,
}

impl Display for TargetCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Finished target '{}'", self.name)
    }
}

impl StructuredLog for TargetCompleted<'_> {
    fn log(&self) {
        tracing::info!(target_name = self.name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "target_completed",
            span_name = name,
            target_name = self.name,
        )
    }
}

/// A target's body raised an error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct TargetFailed<'a> {
    pub name: &'a str,
    pub message: &'a str,
}

impl Display for TargetFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Target '{}' failed: {}", self.name, self.message)
    }
}

impl StructuredLog for TargetFailed<'_> {
    fn log(&self) {
        tracing::error!(
            target_name = self.name,
            error = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "target_failed",
            span_name = name,
            target_name = self.name,
            error = self.message,
        )
    }
}
