// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The top-level driver tying registration, planning, execution,
//! lifecycle hooks, and reporting together.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::RunnerOptions;
use crate::engine::hooks::{HookKind, LifecycleHooks};
use crate::engine::parallel::LevelParallelExecutor;
use crate::engine::sequential::SequentialExecutor;
use crate::engine::single::run_single_target;
use crate::engine::state::{ExecutionState, FailureRecord, RunContext};
use crate::errors::{BuildError, DefinitionError};
use crate::observability::messages::build::{BuildFinished, BuildStarted, HooksDispatched};
use crate::observability::messages::StructuredLog;
use crate::registry::{Target, TargetRegistry};
use crate::report::{list_targets, print_dependency_graph, write_task_time_summary};
use crate::traits::collaborators::{PARALLEL_JOBS_PARAM, SINGLE_TARGET_PARAM};
use crate::traits::{
    BuildExecutor, BuildParams, CiReporter, EnvParams, NullCiReporter, NullProcessReaper,
    ProcessReaper, TraceSink, TracingSink,
};

/// Process exit code reported when any error was recorded.
pub const FAILURE_EXIT_CODE: i32 = 42;

const LIST_TARGETS_FLAG: &str = "--listTargets";
const LIST_TARGETS_SHORT: &str = "-lt";

/// The outcome of one [`BuildRunner::run`] invocation.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// 0 on clean completion, [`FAILURE_EXIT_CODE`] otherwise
    pub exit_code: i32,
    pub total_duration: Duration,
    /// `(folded name, elapsed)` rows in completion order
    pub timings: Vec<(String, Duration)>,
    pub errors: Vec<FailureRecord>,
}

impl BuildReport {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Whether the named target's body ran in this build.
    pub fn was_executed(&self, name: &str) -> bool {
        let key = Target::fold_name(name);
        self.timings.iter().any(|(k, _)| *k == key)
    }

    fn listing_only() -> Self {
        Self {
            exit_code: 0,
            total_duration: Duration::ZERO,
            timings: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// A build engine instance: target registry, lifecycle hook tables,
/// options, and the external collaborators.
///
/// All state is owned by the value; `reset` swaps in a fresh registry
/// and hook tables while keeping the collaborators, and dropping the
/// runner drops everything. Registration happens before
/// [`run`](Self::run); the registry is read-only during execution.
pub struct BuildRunner {
    registry: TargetRegistry,
    hooks: LifecycleHooks,
    options: RunnerOptions,
    sink: Arc<dyn TraceSink>,
    ci: Arc<dyn CiReporter>,
    reaper: Arc<dyn ProcessReaper>,
    params: Arc<dyn BuildParams>,
}

impl Default for BuildRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildRunner {
    /// A runner with default collaborators: tracing-backed sink,
    /// environment-backed parameters, no CI integration, no process
    /// reaping.
    pub fn new() -> Self {
        Self {
            registry: TargetRegistry::new(),
            hooks: LifecycleHooks::new(),
            options: RunnerOptions::default(),
            sink: Arc::new(TracingSink::new()),
            ci: Arc::new(NullCiReporter),
            reaper: Arc::new(NullProcessReaper),
            params: Arc::new(EnvParams),
        }
    }

    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_ci_reporter(mut self, ci: Arc<dyn CiReporter>) -> Self {
        self.ci = ci;
        self
    }

    pub fn with_process_reaper(mut self, reaper: Arc<dyn ProcessReaper>) -> Self {
        self.reaper = reaper;
        self
    }

    pub fn with_params(mut self, params: Arc<dyn BuildParams>) -> Self {
        self.params = params;
        self
    }

    /// Set the description attached to the next registered target.
    pub fn describe(&mut self, text: impl Into<String>) -> Result<(), DefinitionError> {
        self.registry.describe(text)
    }

    /// Register a target.
    pub fn define<F>(&mut self, name: &str, body: F) -> Result<(), DefinitionError>
    where
        F: Fn() -> Result<(), BuildError> + Send + Sync + 'static,
    {
        self.registry.define(name, body)
    }

    /// Append `dependency` to `target`'s dependency list.
    pub fn depend_on(&mut self, target: &str, dependency: &str) -> Result<(), DefinitionError> {
        self.registry.depend_on(target, dependency)
    }

    /// Prepend `dependency` to `target`'s dependency list.
    pub fn depend_on_first(
        &mut self,
        target: &str,
        dependency: &str,
    ) -> Result<(), DefinitionError> {
        self.registry.depend_on_first(target, dependency)
    }

    /// Register a target that also runs after a failed build, once
    /// activated.
    pub fn register_build_failure_target<F>(
        &mut self,
        name: &str,
        body: F,
    ) -> Result<(), DefinitionError>
    where
        F: Fn() -> Result<(), BuildError> + Send + Sync + 'static,
    {
        self.registry.define(name, body)?;
        self.hooks.register(HookKind::BuildFailure, name);
        Ok(())
    }

    /// Register a target that also runs after every build, once
    /// activated.
    pub fn register_final_target<F>(&mut self, name: &str, body: F) -> Result<(), DefinitionError>
    where
        F: Fn() -> Result<(), BuildError> + Send + Sync + 'static,
    {
        self.registry.define(name, body)?;
        self.hooks.register(HookKind::Final, name);
        Ok(())
    }

    pub fn activate_build_failure_target(&mut self, name: &str) -> Result<(), DefinitionError> {
        self.hooks.activate(HookKind::BuildFailure, name)
    }

    pub fn activate_final_target(&mut self, name: &str) -> Result<(), DefinitionError> {
        self.hooks.activate(HookKind::Final, name)
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Whether the host requested list mode.
    pub fn list_mode(&self) -> bool {
        self.params.list_requested()
    }

    /// Discard all targets, hooks, and pending state, keeping the
    /// collaborators.
    pub fn reset(&mut self) {
        self.registry = TargetRegistry::new();
        self.hooks = LifecycleHooks::new();
    }

    /// Execute the named target after its transitive dependencies.
    ///
    /// `--listTargets` / `-lt` print the target list and return without
    /// running anything. A pending description is a configuration error
    /// and is returned to the caller. Everything else, including lookup
    /// failures mid-run, lands in the report: teardown always runs the
    /// activated hooks, invokes the process reaper once, prints the
    /// time summary, and yields exit code 42 iff any error was
    /// recorded.
    pub async fn run(&self, target_name: &str) -> Result<BuildReport, DefinitionError> {
        if target_name == LIST_TARGETS_FLAG || target_name == LIST_TARGETS_SHORT {
            list_targets(&self.registry, self.sink.as_ref());
            return Ok(BuildReport::listing_only());
        }
        if let Some(description) = self.registry.pending_description() {
            return Err(DefinitionError::DanglingDescription {
                description: description.to_string(),
            });
        }

        let total_timer = Instant::now();
        let ctx = RunContext {
            state: Arc::new(Mutex::new(ExecutionState::new())),
            sink: self.sink.clone(),
            ci: self.ci.clone(),
            policy: self.options.failure_policy,
            print_stack_trace: self.options.print_stack_trace_on_error,
        };

        let requested_jobs: usize = self
            .params
            .environ_var_or_default(PARALLEL_JOBS_PARAM, "1")
            .trim()
            .parse()
            .unwrap_or(1);
        let single_target = self.params.has_build_param(SINGLE_TARGET_PARAM);
        let workers = if requested_jobs == 1 {
            1
        } else {
            self.options.effective_workers(requested_jobs)
        };
        let mode = if single_target {
            "single-target"
        } else if workers > 1 {
            "parallel"
        } else {
            "sequential"
        };
        BuildStarted {
            root: target_name,
            mode,
            workers,
        }
        .log();

        let main_result = self
            .execute_main(&ctx, target_name, single_target, workers)
            .await;
        if let Err(error) = main_result {
            ctx.lock_state()
                .record_failure(target_name, error.to_string());
        }

        // Teardown runs whether the main phase completed or failed
        // early.
        self.run_lifecycle_hooks(&ctx);
        self.reaper.kill_all_created_processes();
        let total = total_timer.elapsed();

        let state = ctx.lock_state();
        write_task_time_summary(&self.registry, self.sink.as_ref(), &state, total);
        let exit_code = if state.has_errors() {
            FAILURE_EXIT_CODE
        } else {
            0
        };
        BuildFinished {
            root: target_name,
            executed: state.executed_count(),
            error_count: state.errors().len(),
            duration: total,
        }
        .log();

        Ok(BuildReport {
            exit_code,
            total_duration: total,
            timings: state.timings().to_vec(),
            errors: state.errors().to_vec(),
        })
    }

    async fn execute_main(
        &self,
        ctx: &RunContext,
        root: &str,
        single_target: bool,
        workers: usize,
    ) -> Result<(), DefinitionError> {
        if single_target {
            let target = self.registry.get(root)?.clone();
            run_single_target(ctx, &target, false);
            return Ok(());
        }
        if workers > 1 {
            LevelParallelExecutor::new(workers)
                .execute(&self.registry, ctx, root)
                .await
        } else {
            print_dependency_graph(&self.registry, self.sink.as_ref(), false, root)?;
            SequentialExecutor.execute(&self.registry, ctx, root).await
        }
    }

    fn run_lifecycle_hooks(&self, ctx: &RunContext) {
        if ctx.lock_state().has_errors() {
            self.dispatch_hooks(ctx, HookKind::BuildFailure);
        }
        self.dispatch_hooks(ctx, HookKind::Final);
    }

    fn dispatch_hooks(&self, ctx: &RunContext, kind: HookKind) {
        let names = self.hooks.activated(kind);
        if names.is_empty() {
            return;
        }
        let kind_label = kind.to_string();
        HooksDispatched {
            kind: &kind_label,
            count: names.len(),
        }
        .log();
        for name in names {
            if let Ok(target) = self.registry.get(&name) {
                let target = target.clone();
                run_single_target(ctx, &target, true);
            }
        }
    }
}
