// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::hooks::HookKind;
use std::fmt;

/// Errors raised while a build is being described: target registration,
/// edge insertion, and hook activation. These fail the configuration
/// phase and are returned to the caller rather than recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionError {
    /// A target with the same case-folded name already exists
    DuplicateTarget {
        /// The name as given by the caller
        name: String,
    },
    /// `describe` was called twice without an intervening registration
    DescriptionAlreadySet {
        /// The description still waiting for its target
        pending: String,
    },
    /// A run was requested while a description was still pending
    DanglingDescription {
        /// The orphaned description text
        description: String,
    },
    /// A lookup named a target that was never defined
    UnknownTarget {
        /// The name that failed to resolve
        name: String,
        /// Every registered target name, original case
        known: Vec<String>,
    },
    /// Inserting the edge would make the dependency graph cyclic
    CyclicDependency {
        /// The target the edge was being added to
        target: String,
        /// The dependency whose transitive closure reaches the target
        dependency: String,
    },
    /// Activation was requested for a hook that was never registered
    UnknownHook { kind: HookKind, name: String },
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::DuplicateTarget { name } => {
                write!(f, "Duplicate target name: '{}'", name)
            }
            DefinitionError::DescriptionAlreadySet { pending } => {
                write!(
                    f,
                    "A description is already pending ('{}'); register a target before describing another",
                    pending
                )
            }
            DefinitionError::DanglingDescription { description } => {
                write!(
                    f,
                    "Dangling description '{}': no target was registered after describe",
                    description
                )
            }
            DefinitionError::UnknownTarget { name, known } => {
                write!(
                    f,
                    "Target '{}' is not defined. Known targets: {}",
                    name,
                    if known.is_empty() {
                        "<none>".to_string()
                    } else {
                        known.join(", ")
                    }
                )
            }
            DefinitionError::CyclicDependency { target, dependency } => {
                write!(
                    f,
                    "Cyclic dependency between '{}' and '{}'",
                    target, dependency
                )
            }
            DefinitionError::UnknownHook { kind, name } => {
                write!(f, "No {} target '{}' has been registered", kind, name)
            }
        }
    }
}

impl std::error::Error for DefinitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_target_lists_every_known_name() {
        let err = DefinitionError::UnknownTarget {
            name: "deploy".into(),
            known: vec!["Clean".into(), "Compile".into()],
        };
        assert_eq!(
            err.to_string(),
            "Target 'deploy' is not defined. Known targets: Clean, Compile"
        );
    }

    #[test]
    fn unknown_target_with_empty_registry() {
        let err = DefinitionError::UnknownTarget {
            name: "deploy".into(),
            known: vec![],
        };
        assert!(err.to_string().ends_with("Known targets: <none>"));
    }

    #[test]
    fn cyclic_dependency_names_both_endpoints() {
        let err = DefinitionError::CyclicDependency {
            target: "A".into(),
            dependency: "B".into(),
        };
        assert_eq!(err.to_string(), "Cyclic dependency between 'A' and 'B'");
    }
}
