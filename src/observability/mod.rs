// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display`
//! implementation plus the [`messages::StructuredLog`] trait, keeping
//! log text out of the engine code and the emitted fields queryable.
//!
//! Messages are organized by subsystem:
//! * `messages::build` - build run lifecycle events
//! * `messages::target` - per-target execution events

pub mod messages;
