// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod build;
mod definition;

pub use build::{BuildError, BuildErrorKind};
pub use definition::DefinitionError;
