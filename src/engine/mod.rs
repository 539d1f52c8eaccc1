// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod hooks;
pub mod parallel;
pub mod runner;
pub mod sequential;
pub mod single;
pub mod state;

pub use hooks::{HookKind, LifecycleHooks};
pub use parallel::LevelParallelExecutor;
pub use runner::{BuildReport, BuildRunner, FAILURE_EXIT_CODE};
pub use sequential::SequentialExecutor;
pub use state::{ExecutionState, FailureRecord, RunContext};
