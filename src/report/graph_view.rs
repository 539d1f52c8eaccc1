// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::DefinitionError;
use crate::plan::sequential_order;
use crate::registry::TargetRegistry;
use crate::traits::TraceSink;
use std::collections::HashSet;

/// Render the dependency tree of `root` with one `<== name` line per
/// node, indented by depth, followed by the linearized sequential
/// order. In non-verbose mode each target is printed at its first
/// visit only; verbose mode prints every traversal visit, expanding
/// shared subtrees repeatedly.
pub fn print_dependency_graph(
    registry: &TargetRegistry,
    sink: &dyn TraceSink,
    verbose: bool,
    root: &str,
) -> Result<(), DefinitionError> {
    fn render(
        registry: &TargetRegistry,
        sink: &dyn TraceSink,
        verbose: bool,
        name: &str,
        depth: usize,
        seen: &mut HashSet<String>,
    ) -> Result<(), DefinitionError> {
        let target = registry.get(name)?;
        let first_visit = seen.insert(target.key());
        if verbose || first_visit {
            sink.log(&format!("{}<== {}", "   ".repeat(depth), target.name));
            for dependency in &target.dependencies {
                render(registry, sink, verbose, dependency, depth + 1, seen)?;
            }
        }
        Ok(())
    }

    let root_name = registry.get(root)?.name.clone();
    sink.trace_header(&format!("Dependency graph for target '{}':", root_name));
    let mut seen = HashSet::new();
    render(registry, sink, verbose, root, 0, &mut seen)?;

    sink.log("The resulting target order is:");
    for name in sequential_order(registry, root)? {
        sink.log(&format!(" - {}", name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl RecordingSink {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl TraceSink for RecordingSink {
        fn log(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
        fn trace(&self, _: &str) {}
        fn trace_error(&self, _: &str) {}
        fn trace_line(&self) {}
        fn trace_header(&self, header: &str) {
            self.0.lock().unwrap().push(header.to_string());
        }
        fn trace_start_target(&self, _: &str, _: Option<&str>, _: &str) {}
        fn trace_end_target(&self, _: &str) {}
        fn close_all_open_tags(&self) {}
    }

    fn diamond() -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        for name in ["A", "B", "C", "D"] {
            registry.define(name, || Ok(())).unwrap();
        }
        registry.depend_on("A", "B").unwrap();
        registry.depend_on("A", "C").unwrap();
        registry.depend_on("B", "D").unwrap();
        registry.depend_on("C", "D").unwrap();
        registry
    }

    #[test]
    fn shortened_mode_prints_each_target_once() {
        let registry = diamond();
        let sink = RecordingSink::default();
        print_dependency_graph(&registry, &sink, false, "A").unwrap();

        let lines = sink.lines();
        let d_lines = lines.iter().filter(|l| l.trim_start() == "<== D").count();
        assert_eq!(d_lines, 1);
        assert!(lines.contains(&"<== A".to_string()));
        assert!(lines.contains(&"   <== B".to_string()));
        assert!(lines.contains(&"      <== D".to_string()));
    }

    #[test]
    fn verbose_mode_prints_every_visit() {
        let registry = diamond();
        let sink = RecordingSink::default();
        print_dependency_graph(&registry, &sink, true, "A").unwrap();

        let d_lines = sink
            .lines()
            .iter()
            .filter(|l| l.trim_start() == "<== D")
            .count();
        assert_eq!(d_lines, 2);
    }

    #[test]
    fn linearized_order_follows_the_tree() {
        let registry = diamond();
        let sink = RecordingSink::default();
        print_dependency_graph(&registry, &sink, false, "A").unwrap();

        let lines = sink.lines();
        let marker = lines
            .iter()
            .position(|l| l == "The resulting target order is:")
            .unwrap();
        let order: Vec<&str> = lines[marker + 1..]
            .iter()
            .map(|l| l.trim_start_matches(" - "))
            .collect();
        assert_eq!(order, vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn unknown_root_fails() {
        let registry = diamond();
        let sink = RecordingSink::default();
        let err = print_dependency_graph(&registry, &sink, false, "ghost").unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownTarget { .. }));
    }
}
