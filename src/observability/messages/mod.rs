// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Organized by subsystem, mirroring the crate's module layout:
//!
//! * [`builder`] — task declaration and linearization events
//! * [`engine`] — worker lifecycle and run events
//!
//! Each message type is a plain struct implementing `Display` for a
//! human-readable line, with a `log()` method that emits it through
//! `tracing` at the level appropriate to that event (e.g. `PlanBuilt` is
//! `info!`, `CycleDetected` is `warn!`). There is deliberately no shared
//! trait here and no span machinery: a four-module scheduler has no
//! subsystem boundaries worth a distributed trace, just events worth a log
//! line.

pub mod builder;
pub mod engine;
