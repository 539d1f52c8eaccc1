// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod graph;
mod store;
mod target;

pub use store::TargetRegistry;
pub use target::{Target, TargetBody};
