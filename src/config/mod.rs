// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod options;

pub use options::{load_options, FailurePolicy, OptionsError, RunnerOptions};
