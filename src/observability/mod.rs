// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the builder and engine.
//!
//! Message types live under [`messages`], one module per subsystem, rather
//! than scattering `tracing::info!("...")` format strings through the
//! scheduler itself. Each message type implements `Display` for a
//! human-readable line and carries a small `log()` method that emits it at
//! the appropriate level with its fields as structured `tracing` key-values.

pub mod messages;
