// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Distinguishes infrastructure failures from test failures.
///
/// Both kinds are recorded and reported identically; the only
/// difference is that test failures are not forwarded to the CI error
/// side channel, since a red test is a user-visible result rather than
/// an infrastructure fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    Failure,
    TestFailure,
}

/// An error raised by a target body during execution.
///
/// Build errors never propagate out of the engine's single-target run;
/// they are caught, recorded, and reported in the final summary. A
/// build error may carry a list of sub-error causes (e.g. one entry
/// per failed compilation unit); each cause is recorded as its own
/// error line in addition to the outer message.
#[derive(Debug, Clone)]
pub struct BuildError {
    message: String,
    kind: BuildErrorKind,
    causes: Vec<String>,
}

impl BuildError {
    /// An ordinary build failure.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: BuildErrorKind::Failure,
            causes: Vec::new(),
        }
    }

    /// A test failure. Reported like any other failure but suppressed
    /// on the CI error side channel.
    pub fn test_failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: BuildErrorKind::TestFailure,
            causes: Vec::new(),
        }
    }

    /// Attach structured sub-errors to this failure.
    pub fn with_causes(mut self, causes: Vec<String>) -> Self {
        self.causes = causes;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> BuildErrorKind {
        self.kind
    }

    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BuildError {}
