// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod levels;
mod sequential;

pub use levels::level_partition;
pub use sequential::sequential_order;
