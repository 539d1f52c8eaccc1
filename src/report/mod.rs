// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod graph_view;
mod listing;
mod summary;

pub use graph_view::print_dependency_graph;
pub use listing::list_targets;
pub use summary::write_task_time_summary;
