// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::registry::TargetRegistry;
use crate::traits::TraceSink;

/// Print every registered target with its description and literal
/// dependency list. No bodies run.
pub fn list_targets(registry: &TargetRegistry, sink: &dyn TraceSink) {
    sink.log("The following targets are available:");
    for name in registry.names() {
        if let Ok(target) = registry.get(&name) {
            match &target.description {
                Some(description) => sink.log(&format!("   {} - {}", target.name, description)),
                None => sink.log(&format!("   {}", target.name)),
            }
            sink.log(&format!("      depends on: {}", target.pretty_dependencies()));
        }
    }
}
