// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::state::RunContext;
use crate::errors::DefinitionError;
use crate::registry::TargetRegistry;

/// Execution strategy for a build.
///
/// - `registry`: the target registry, read-only during execution
/// - `ctx`: shared run state and collaborators
/// - `root`: the requested target
///
/// An `Err` means planning failed (e.g. an unresolved name); target
/// body failures are recorded into the run state, never returned here.
#[async_trait]
pub trait BuildExecutor: Send + Sync {
    async fn execute(
        &self,
        registry: &TargetRegistry,
        ctx: &RunContext,
        root: &str,
    ) -> Result<(), DefinitionError>;
}
