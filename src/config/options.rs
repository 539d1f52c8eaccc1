// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// How the engine reacts to the first recorded error.
///
/// # Variants
/// * `FailFast` - subsequently scheduled normal targets skip their body
/// * `ContinueOnError` - normal targets keep running; errors are still
///   collected and the build still fails
///
/// Lifecycle hooks are exempt from the short-circuit under either
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    FailFast,
    ContinueOnError,
}

/// File-configurable runner options.
///
/// Typically loaded from a YAML file next to the build script; every
/// field is optional. Runtime parameters (`parallel-jobs`,
/// `single-target`, `list`) come from the host's parameter lookup, not
/// from this file.
///
/// # Example
/// ```yaml
/// failure_policy: continue_on_error
/// print_stack_trace_on_error: true
/// max_workers: 8
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunnerOptions {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Append a captured backtrace to recorded error messages.
    #[serde(default)]
    pub print_stack_trace_on_error: bool,
    /// Upper bound on the worker pool, whatever `parallel-jobs` says.
    #[serde(default)]
    pub max_workers: Option<usize>,
}

impl RunnerOptions {
    /// Clamp a requested worker count to the configured bound. A
    /// request of 0 auto-detects the CPU count.
    pub fn effective_workers(&self, requested: usize) -> usize {
        let requested = if requested == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            requested
        };
        match self.max_workers {
            Some(cap) => requested.min(cap.max(1)),
            None => requested,
        }
        .max(1)
    }
}

/// Errors from loading a runner options file.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse options file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load runner options from a YAML file.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<RunnerOptions, OptionsError> {
    let display = path.as_ref().display().to_string();
    let content = fs::read_to_string(&path).map_err(|source| OptionsError::Io {
        path: display.clone(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| OptionsError::Parse {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_fail_fast_without_stack_traces() {
        let options = RunnerOptions::default();
        assert_eq!(options.failure_policy, FailurePolicy::FailFast);
        assert!(!options.print_stack_trace_on_error);
        assert!(options.max_workers.is_none());
    }

    #[test]
    fn parse_full_options() {
        let yaml = r#"
failure_policy: continue_on_error
print_stack_trace_on_error: true
max_workers: 8
"#;
        let options: RunnerOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.failure_policy, FailurePolicy::ContinueOnError);
        assert!(options.print_stack_trace_on_error);
        assert_eq!(options.max_workers, Some(8));
    }

    #[test]
    fn partial_file_uses_defaults() {
        let options: RunnerOptions = serde_yaml::from_str("max_workers: 2\n").unwrap();
        assert_eq!(options.failure_policy, FailurePolicy::FailFast);
        assert_eq!(options.max_workers, Some(2));
    }

    #[test]
    fn load_options_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "failure_policy: continue_on_error").unwrap();

        let options = load_options(file.path()).unwrap();
        assert_eq!(options.failure_policy, FailurePolicy::ContinueOnError);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_options("/does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, OptionsError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "failure_policy: [not, a, policy]").unwrap();

        let err = load_options(file.path()).unwrap_err();
        assert!(matches!(err, OptionsError::Parse { .. }));
    }

    #[test]
    fn effective_workers_clamps_and_autodetects() {
        let capped = RunnerOptions {
            max_workers: Some(2),
            ..Default::default()
        };
        assert_eq!(capped.effective_workers(8), 2);

        let open = RunnerOptions::default();
        assert_eq!(open.effective_workers(8), 8);
        assert!(open.effective_workers(0) >= 1);
    }
}
