// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{BuildError, DefinitionError};
use crate::registry::target::{Target, TargetBody};
use std::collections::HashMap;
use std::sync::Arc;

/// The registry of build targets, keyed by case-folded name.
///
/// Names are compared case-insensitively everywhere; the original
/// casing is preserved on the stored [`Target`] for display. The
/// registry also owns the pending-description slot: a description set
/// with [`describe`](Self::describe) is attached to the next target
/// registered and cleared by that registration.
///
/// The registry is mutated only while a build is being described.
/// Executors treat it as read-only.
#[derive(Default)]
pub struct TargetRegistry {
    targets: HashMap<String, Target>,
    pending_description: Option<String>,
}

impl TargetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target under `name` with the given body and no
    /// dependencies. Consumes the pending description, if any.
    pub fn define<F>(&mut self, name: &str, body: F) -> Result<(), DefinitionError>
    where
        F: Fn() -> Result<(), BuildError> + Send + Sync + 'static,
    {
        self.define_boxed(name, Arc::new(body))
    }

    /// `define` for callers that already hold a shared body.
    pub fn define_boxed(
        &mut self,
        name: &str,
        body: Arc<TargetBody>,
    ) -> Result<(), DefinitionError> {
        let key = Target::fold_name(name);
        if self.targets.contains_key(&key) {
            return Err(DefinitionError::DuplicateTarget {
                name: name.to_string(),
            });
        }
        let target = Target {
            name: name.to_string(),
            description: self.pending_description.take(),
            dependencies: Vec::new(),
            body,
        };
        self.targets.insert(key, target);
        Ok(())
    }

    /// Set the description for the next target to be registered.
    /// Fails if a description is already pending.
    pub fn describe(&mut self, text: impl Into<String>) -> Result<(), DefinitionError> {
        if let Some(pending) = &self.pending_description {
            return Err(DefinitionError::DescriptionAlreadySet {
                pending: pending.clone(),
            });
        }
        self.pending_description = Some(text.into());
        Ok(())
    }

    /// The description waiting for its target, if any.
    pub fn pending_description(&self) -> Option<&str> {
        self.pending_description.as_deref()
    }

    /// Case-insensitive lookup. A miss enumerates every registered name
    /// in the returned error so the caller can diagnose typos.
    pub fn get(&self, name: &str) -> Result<&Target, DefinitionError> {
        self.targets
            .get(&Target::fold_name(name))
            .ok_or_else(|| DefinitionError::UnknownTarget {
                name: name.to_string(),
                known: self.names(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(&Target::fold_name(name))
    }

    /// All registered names in their original casing, sorted by folded
    /// name for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut keys: Vec<&String> = self.targets.keys().collect();
        keys.sort();
        keys.iter()
            .map(|k| self.targets[*k].name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Target> {
        self.targets.get_mut(key)
    }
}
