// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Level partition for parallel execution.
//!
//! Each target reachable from the root is assigned its maximum distance
//! in edges from the root along any path; targets sharing a distance
//! form a level. Levels are emitted deepest first, so when a level
//! starts every dependency of every target in it sits in a strictly
//! deeper, already-completed level. This needs no live dependency
//! tracking during execution; the price is that two unrelated targets
//! can be serialized merely because one is reachable through a longer
//! path.

use crate::errors::DefinitionError;
use crate::registry::TargetRegistry;
use std::collections::{HashMap, VecDeque};

/// Partition the targets reachable from `root` into levels by maximum
/// distance from the root, deepest level first and the root's own
/// singleton level last. A target reachable at several depths is placed
/// at its maximum depth only. Within a level, names are sorted by their
/// case-folded form for stable output; execution order inside a level
/// carries no guarantee.
pub fn level_partition(
    registry: &TargetRegistry,
    root: &str,
) -> Result<Vec<Vec<String>>, DefinitionError> {
    let mut depths: HashMap<String, usize> = HashMap::new();
    let mut display: HashMap<String, String> = HashMap::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    queue.push_back((root.to_string(), 0));

    // Relaxation over the acyclic graph: a node is re-expanded only
    // when its known depth increases, so the loop terminates.
    while let Some((name, depth)) = queue.pop_front() {
        let target = registry.get(&name)?;
        let key = target.key();
        let improved = depths.get(&key).map_or(true, |&known| depth > known);
        if improved {
            depths.insert(key.clone(), depth);
            display.insert(key, target.name.clone());
            for dependency in &target.dependencies {
                queue.push_back((dependency.clone(), depth + 1));
            }
        }
    }

    let deepest = depths.values().copied().max().unwrap_or(0);
    let mut levels: Vec<Vec<String>> = vec![Vec::new(); deepest + 1];
    let mut keyed: Vec<(&String, &usize)> = depths.iter().collect();
    keyed.sort_by(|a, b| a.0.cmp(b.0));
    for (key, depth) in keyed {
        levels[deepest - depth].push(display[key].clone());
    }
    Ok(levels)
}
