// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! External collaborators the engine consumes but does not implement:
//! CI failure signaling, child-process cleanup, and build-parameter
//! lookup. Each is a small trait object so hosts can supply their own
//! integration; the provided implementations cover the common cases.

use std::collections::HashMap;

/// Worker-pool size; values above 1 select parallel execution, 0 means
/// auto-detect the CPU count.
pub const PARALLEL_JOBS_PARAM: &str = "parallel-jobs";
/// Presence flag: run only the requested target, skipping dependencies.
pub const SINGLE_TARGET_PARAM: &str = "single-target";
/// Presence flag: the host is in list mode.
pub const LIST_PARAM: &str = "list";

/// Side channel for signaling infrastructure failures to a CI system.
/// Test-failure errors are user-visible results and are not sent here.
pub trait CiReporter: Send + Sync {
    fn send_ci_error(&self, message: &str);
}

/// A [`CiReporter`] for hosts without a CI integration.
pub struct NullCiReporter;

impl CiReporter for NullCiReporter {
    fn send_ci_error(&self, _message: &str) {}
}

/// Reaps child processes spawned by target bodies. Invoked exactly once
/// during teardown.
pub trait ProcessReaper: Send + Sync {
    fn kill_all_created_processes(&self);
}

/// A [`ProcessReaper`] for hosts whose targets spawn no processes.
pub struct NullProcessReaper;

impl ProcessReaper for NullProcessReaper {
    fn kill_all_created_processes(&self) {}
}

/// String-keyed build parameter lookup supplied by the host.
pub trait BuildParams: Send + Sync {
    /// Whether the parameter is present at all.
    fn has_build_param(&self, name: &str) -> bool;

    /// The parameter's value, or `default` when absent.
    fn environ_var_or_default(&self, name: &str, default: &str) -> String;

    /// Whether the host requested list mode.
    fn list_requested(&self) -> bool {
        self.has_build_param(LIST_PARAM)
    }
}

/// [`BuildParams`] backed by process environment variables.
pub struct EnvParams;

impl BuildParams for EnvParams {
    fn has_build_param(&self, name: &str) -> bool {
        std::env::var(name).is_ok()
    }

    fn environ_var_or_default(&self, name: &str, default: &str) -> String {
        std::env::var(name).unwrap_or_else(|_| default.to_string())
    }
}

/// [`BuildParams`] backed by an in-memory map. Useful for embedding and
/// for tests.
#[derive(Default)]
pub struct MapParams(pub HashMap<String, String>);

impl MapParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }
}

impl BuildParams for MapParams {
    fn has_build_param(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    fn environ_var_or_default(&self, name: &str, default: &str) -> String {
        self.0
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}
