// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dependency edge insertion with incremental cycle prevention.
//!
//! Edges live inside each target's ordered `dependencies` list, so the
//! graph and the registry are the same structure viewed two ways. Every
//! insertion walks the transitive dependencies of the new prerequisite
//! first and is rejected if the walk reaches the dependent target, so
//! the graph is acyclic at all times; a rejected insertion leaves the
//! graph unchanged. The walk resolves each visited name through the
//! registry, so an unresolved name aborts the insertion with the
//! registry's own miss diagnostic.

use crate::errors::DefinitionError;
use crate::registry::store::TargetRegistry;
use crate::registry::target::Target;
use std::collections::HashSet;

enum EdgePosition {
    First,
    Last,
}

impl TargetRegistry {
    /// Append `dependency` to the end of `target`'s dependency list.
    pub fn depend_on(&mut self, target: &str, dependency: &str) -> Result<(), DefinitionError> {
        self.insert_edge(target, dependency, EdgePosition::Last)
    }

    /// Prepend `dependency` to the front of `target`'s dependency list,
    /// so it is visited first in sequential order.
    pub fn depend_on_first(
        &mut self,
        target: &str,
        dependency: &str,
    ) -> Result<(), DefinitionError> {
        self.insert_edge(target, dependency, EdgePosition::First)
    }

    fn insert_edge(
        &mut self,
        target: &str,
        dependency: &str,
        position: EdgePosition,
    ) -> Result<(), DefinitionError> {
        let target_key = self.get(target)?.key();
        let dependency_name = self.get(dependency)?.name.clone();
        self.ensure_acyclic(target, dependency)?;

        // target_key resolved above, so the entry is present
        if let Some(entry) = self.get_mut(&target_key) {
            match position {
                EdgePosition::First => entry.dependencies.insert(0, dependency_name),
                EdgePosition::Last => entry.dependencies.push(dependency_name),
            }
        }
        Ok(())
    }

    /// Walk the transitive dependencies of `dependency`; reject if any
    /// visited node is `target` itself. The starting node counts as
    /// visited, so a self-edge is cyclic.
    fn ensure_acyclic(&self, target: &str, dependency: &str) -> Result<(), DefinitionError> {
        let target_key = Target::fold_name(target);
        let mut seen: HashSet<String> = HashSet::new();
        let mut stack = vec![dependency.to_string()];

        while let Some(name) = stack.pop() {
            let node = self.get(&name)?;
            if node.key() == target_key {
                return Err(DefinitionError::CyclicDependency {
                    target: self.get(target)?.name.clone(),
                    dependency: node.name.clone(),
                });
            }
            if seen.insert(node.key()) {
                stack.extend(node.dependencies.iter().cloned());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        for name in names {
            registry.define(name, || Ok(())).unwrap();
        }
        registry
    }

    #[test]
    fn depend_on_appends_in_order() {
        let mut registry = registry_with(&["all", "compile", "test"]);
        registry.depend_on("all", "compile").unwrap();
        registry.depend_on("all", "test").unwrap();
        assert_eq!(
            registry.get("all").unwrap().dependencies,
            vec!["compile".to_string(), "test".to_string()]
        );
    }

    #[test]
    fn depend_on_first_prepends() {
        let mut registry = registry_with(&["all", "compile", "clean"]);
        registry.depend_on("all", "compile").unwrap();
        registry.depend_on_first("all", "clean").unwrap();
        assert_eq!(
            registry.get("all").unwrap().dependencies,
            vec!["clean".to_string(), "compile".to_string()]
        );
    }

    #[test]
    fn edges_are_case_insensitive_and_store_registered_case() {
        let mut registry = registry_with(&["All", "Compile"]);
        registry.depend_on("ALL", "compile").unwrap();
        assert_eq!(
            registry.get("all").unwrap().dependencies,
            vec!["Compile".to_string()]
        );
    }

    #[test]
    fn self_edge_is_rejected_as_cyclic() {
        let mut registry = registry_with(&["compile"]);
        let err = registry.depend_on("compile", "compile").unwrap_err();
        assert!(matches!(err, DefinitionError::CyclicDependency { .. }));
    }

    #[test]
    fn reverse_edge_is_rejected_and_graph_unchanged() {
        let mut registry = registry_with(&["A", "B"]);
        registry.depend_on("A", "B").unwrap();

        let err = registry.depend_on("B", "A").unwrap_err();
        assert_eq!(
            err,
            DefinitionError::CyclicDependency {
                target: "B".into(),
                dependency: "A".into(),
            }
        );
        assert_eq!(registry.get("A").unwrap().dependencies, vec!["B".to_string()]);
        assert!(registry.get("B").unwrap().dependencies.is_empty());
    }

    #[test]
    fn transitive_cycle_is_detected() {
        let mut registry = registry_with(&["A", "B", "C"]);
        registry.depend_on("A", "B").unwrap();
        registry.depend_on("B", "C").unwrap();
        let err = registry.depend_on("C", "A").unwrap_err();
        assert!(matches!(err, DefinitionError::CyclicDependency { .. }));
    }

    #[test]
    fn unknown_dependency_aborts_insertion() {
        let mut registry = registry_with(&["A"]);
        let err = registry.depend_on("A", "ghost").unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownTarget { .. }));
        assert!(registry.get("A").unwrap().dependencies.is_empty());
    }

    #[test]
    fn unknown_transitive_dependency_aborts_insertion() {
        // B's list mentions a name that was never registered; the cycle
        // walk resolves it and surfaces the registry diagnostic.
        let mut registry = registry_with(&["A", "B", "X"]);
        registry.depend_on("A", "B").unwrap();
        registry
            .get_mut(&Target::fold_name("B"))
            .unwrap()
            .dependencies
            .push("ghost".to_string());

        let err = registry.depend_on("X", "A").unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownTarget { ref name, .. } if name == "ghost"));
        assert!(registry.get("X").unwrap().dependencies.is_empty());
    }
}
