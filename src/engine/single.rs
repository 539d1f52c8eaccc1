// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Running one target: short-circuit checks, timing, error capture.

use crate::config::FailurePolicy;
use crate::engine::state::RunContext;
use crate::errors::BuildErrorKind;
use crate::observability::messages::target::TargetFailed;
use crate::observability::messages::StructuredLog;
use crate::registry::Target;
use std::backtrace::Backtrace;
use std::time::Instant;

/// Run one target's body, recording the outcome into the shared state.
///
/// Skips without any side effect when the target already ran in this
/// build, or when an error has been recorded and the fail-fast policy
/// applies. Lifecycle hooks pass `exempt_from_short_circuit` so they
/// run even in the failed state.
///
/// A failing body never propagates: its message (and each structured
/// sub-error) is appended to the error list, emitted on the sink, and
/// forwarded to the CI side channel unless the error is a test
/// failure. The timing row and executed-set entry are recorded in one
/// critical section whether the body succeeded or not.
pub fn run_single_target(ctx: &RunContext, target: &Target, exempt_from_short_circuit: bool) {
    {
        let state = ctx.lock_state();
        if state.is_executed(&target.key()) {
            return;
        }
        let short_circuit = !exempt_from_short_circuit
            && ctx.policy == FailurePolicy::FailFast
            && state.has_errors();
        if short_circuit {
            return;
        }
    }

    ctx.sink.trace_start_target(
        &target.name,
        target.description.as_deref(),
        &target.pretty_dependencies(),
    );

    let started = Instant::now();
    let outcome = (target.body)();
    let elapsed = started.elapsed();

    match outcome {
        Ok(()) => {
            ctx.lock_state().record_run(target.key(), elapsed);
            ctx.sink.trace_end_target(&target.name);
        }
        Err(error) => {
            ctx.sink.close_all_open_tags();

            let mut message = error.message().to_string();
            if ctx.print_stack_trace {
                message.push('\n');
                message.push_str(&Backtrace::force_capture().to_string());
            }

            {
                let mut state = ctx.lock_state();
                for cause in error.causes() {
                    state.record_failure(&target.name, cause.clone());
                }
                state.record_failure(&target.name, message.clone());
                state.record_run(target.key(), elapsed);
            }

            TargetFailed {
                name: &target.name,
                message: &message,
            }
            .log();
            ctx.sink
                .trace_error(&format!("Target '{}' failed: {}", target.name, message));
            if error.kind() != BuildErrorKind::TestFailure {
                ctx.ci.send_ci_error(&message);
            }
        }
    }
}
