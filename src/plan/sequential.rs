// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::DefinitionError;
use crate::registry::TargetRegistry;
use std::collections::HashSet;

/// Compute the linear execution order for `root`: a depth-first
/// traversal that descends into each dependency in list order before
/// emitting the node itself, skipping anything already emitted.
///
/// The result contains each reachable target exactly once, every
/// dependency precedes its dependents, and `root` is last. Names are
/// returned in their registered casing.
pub fn sequential_order(
    registry: &TargetRegistry,
    root: &str,
) -> Result<Vec<String>, DefinitionError> {
    fn visit(
        registry: &TargetRegistry,
        name: &str,
        emitted: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) -> Result<(), DefinitionError> {
        let target = registry.get(name)?;
        let key = target.key();
        if emitted.contains(&key) {
            return Ok(());
        }
        for dependency in &target.dependencies {
            visit(registry, dependency, emitted, order)?;
        }
        if emitted.insert(key) {
            order.push(target.name.clone());
        }
        Ok(())
    }

    let mut emitted = HashSet::new();
    let mut order = Vec::new();
    visit(registry, root, &mut emitted, &mut order)?;
    Ok(order)
}
