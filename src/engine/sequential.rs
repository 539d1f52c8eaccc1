// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::single::run_single_target;
use crate::engine::state::RunContext;
use crate::errors::DefinitionError;
use crate::plan::sequential_order;
use crate::registry::TargetRegistry;
use crate::traits::BuildExecutor;

/// Single-threaded executor: runs the depth-first linear order, each
/// dependency before its dependents, the root last. Targets already
/// executed or short-circuited by an earlier failure are skipped
/// inside the single-target run.
pub struct SequentialExecutor;

#[async_trait]
impl BuildExecutor for SequentialExecutor {
    async fn execute(
        &self,
        registry: &TargetRegistry,
        ctx: &RunContext,
        root: &str,
    ) -> Result<(), DefinitionError> {
        let order = sequential_order(registry, root)?;
        for name in order {
            let target = registry.get(&name)?.clone();
            run_single_target(ctx, &target, false);
        }
        Ok(())
    }
}
