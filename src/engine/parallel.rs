// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Level-by-level parallel executor.
//!
//! Execution proceeds over the max-distance level partition: all
//! targets of a level are dispatched to blocking worker tasks, bounded
//! by a semaphore of the configured pool size, and the level is joined
//! completely before the next one starts. The strict barrier means no
//! live dependency tracking is needed during execution; the partition
//! already guarantees that everything a target depends on sits in a
//! deeper, finished level.
//!
//! A failure inside a level does not interrupt the bodies already
//! running; remaining targets skip themselves through the shared
//! short-circuit check when the fail-fast policy applies.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::engine::single::run_single_target;
use crate::engine::state::RunContext;
use crate::errors::DefinitionError;
use crate::plan::level_partition;
use crate::registry::TargetRegistry;
use crate::traits::BuildExecutor;

/// Executor running independent targets of each level concurrently on
/// a bounded blocking-worker pool.
pub struct LevelParallelExecutor {
    max_concurrency: usize,
}

impl LevelParallelExecutor {
    /// Create an executor with the given worker pool size (at least 1).
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }
}

#[async_trait]
impl BuildExecutor for LevelParallelExecutor {
    async fn execute(
        &self,
        registry: &TargetRegistry,
        ctx: &RunContext,
        root: &str,
    ) -> Result<(), DefinitionError> {
        let levels = level_partition(registry, root)?;
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));

        for level in levels {
            let mut tasks = Vec::with_capacity(level.len());
            for name in level {
                let target = registry.get(&name)?.clone();
                let worker_ctx = ctx.clone();

                let permit = match semaphore.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed while executing.
                    Err(_) => break,
                };
                let task = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    run_single_target(&worker_ctx, &target, false);
                });
                tasks.push((name, task));
            }

            // Barrier: the level must finish before the next begins.
            for (name, task) in tasks {
                if let Err(join_error) = task.await {
                    ctx.sink.close_all_open_tags();
                    ctx.lock_state()
                        .record_failure(&name, format!("worker panicked: {}", join_error));
                }
            }
        }
        Ok(())
    }
}
