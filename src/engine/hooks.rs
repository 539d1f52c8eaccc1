// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::DefinitionError;
use crate::registry::Target;
use std::collections::BTreeMap;
use std::fmt;

/// The two lifecycle hook classes.
///
/// Build-failure targets run after the main build only when at least
/// one error was recorded; final targets run after every build. Both
/// run only if activated, and both are exempt from the error
/// short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    BuildFailure,
    Final,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::BuildFailure => write!(f, "build-failure"),
            HookKind::Final => write!(f, "final"),
        }
    }
}

/// Activation registries for both hook classes, keyed by case-folded
/// target name. The `BTreeMap` gives the ascending-name dispatch order
/// structurally rather than by sorting at run time.
#[derive(Default)]
pub struct LifecycleHooks {
    build_failure: BTreeMap<String, bool>,
    finals: BTreeMap<String, bool>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: HookKind) -> &BTreeMap<String, bool> {
        match kind {
            HookKind::BuildFailure => &self.build_failure,
            HookKind::Final => &self.finals,
        }
    }

    fn table_mut(&mut self, kind: HookKind) -> &mut BTreeMap<String, bool> {
        match kind {
            HookKind::BuildFailure => &mut self.build_failure,
            HookKind::Final => &mut self.finals,
        }
    }

    /// Record a hook registration, deactivated until
    /// [`activate`](Self::activate) is called.
    pub fn register(&mut self, kind: HookKind, name: &str) {
        self.table_mut(kind).insert(Target::fold_name(name), false);
    }

    /// Flip a hook's activation flag. Fails if no hook of that kind was
    /// registered under the name.
    pub fn activate(&mut self, kind: HookKind, name: &str) -> Result<(), DefinitionError> {
        match self.table_mut(kind).get_mut(&Target::fold_name(name)) {
            Some(flag) => {
                *flag = true;
                Ok(())
            }
            None => Err(DefinitionError::UnknownHook {
                kind,
                name: name.to_string(),
            }),
        }
    }

    pub fn is_registered(&self, kind: HookKind, name: &str) -> bool {
        self.table(kind).contains_key(&Target::fold_name(name))
    }

    /// Case-folded names of activated hooks, in ascending name order.
    pub fn activated(&self, kind: HookKind) -> Vec<String> {
        self.table(kind)
            .iter()
            .filter(|(_, &active)| active)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
