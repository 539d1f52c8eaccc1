use crate::errors::BuildError;
use std::fmt;
use std::sync::Arc;

/// The work a target performs when it runs. Bodies are opaque blocking
/// code; the engine only observes their success or failure.
pub type TargetBody = dyn Fn() -> Result<(), BuildError> + Send + Sync;

/// A named, parameter-free unit of work with an ordered list of
/// dependencies on other targets.
///
/// The `Arc`-wrapped body makes targets cheap to clone, so executors can
/// hand owned copies to worker tasks without sharing the registry
/// itself across threads.
#[derive(Clone)]
pub struct Target {
    /// Original-case name, used for display
    pub name: String,
    /// Optional one-line description shown in listings
    pub description: Option<String>,
    /// Names of prerequisite targets, in insertion order
    pub dependencies: Vec<String>,
    /// The target's effect
    pub body: Arc<TargetBody>,
}

impl Target {
    /// Case-fold a target name for comparison and map keys.
    ///
    /// Uses `str::to_lowercase`, a deterministic, locale-independent
    /// Unicode fold; ASCII names fold to plain ASCII lowercase.
    pub fn fold_name(name: &str) -> String {
        name.to_lowercase()
    }

    /// This target's case-folded name.
    pub fn key(&self) -> String {
        Self::fold_name(&self.name)
    }

    /// The dependency list rendered for start-target traces and
    /// listings, e.g. `[compile; test]`.
    pub fn pretty_dependencies(&self) -> String {
        format!("[{}]", self.dependencies.join("; "))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_target(name: &str, dependencies: Vec<String>) -> Target {
        Target {
            name: name.to_string(),
            description: None,
            dependencies,
            body: Arc::new(|| Ok(())),
        }
    }

    #[test]
    fn fold_is_case_insensitive_for_ascii() {
        assert_eq!(Target::fold_name("Clean"), Target::fold_name("cLEAN"));
    }

    #[test]
    fn fold_handles_non_ascii_names() {
        assert_eq!(Target::fold_name("Größe"), "größe");
    }

    #[test]
    fn pretty_dependencies_joins_with_semicolons() {
        let t = noop_target("all", vec!["compile".into(), "test".into()]);
        assert_eq!(t.pretty_dependencies(), "[compile; test]");
    }

    #[test]
    fn pretty_dependencies_empty_list() {
        let t = noop_target("clean", vec![]);
        assert_eq!(t.pretty_dependencies(), "[]");
    }
}
