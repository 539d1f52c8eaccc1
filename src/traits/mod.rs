// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod collaborators;
pub mod executor;
pub mod sink;

pub use collaborators::{BuildParams, CiReporter, EnvParams, MapParams, NullCiReporter,
    NullProcessReaper, ProcessReaper};
pub use executor::BuildExecutor;
pub use sink::{TraceSink, TracingSink};
