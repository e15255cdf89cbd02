// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for worker lifecycle and run events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

/// An [`crate::engine::Engine`] finished spawning its worker pool.
///
/// # Log Level
/// `info!`
pub struct EngineStarted {
    pub worker_count: usize,
}

impl Display for EngineStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "engine started with {} background workers", self.worker_count)
    }
}

impl EngineStarted {
    pub fn log(&self) {
        tracing::info!(worker_count = self.worker_count, "{}", self);
    }
}

/// `run()` installed a plan and is about to start dispatching it.
///
/// # Log Level
/// `info!`
pub struct RunStarted {
    pub entry_count: usize,
}

impl Display for RunStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "run started: {} entries", self.entry_count)
    }
}

impl RunStarted {
    pub fn log(&self) {
        tracing::info!(entry_count = self.entry_count, "{}", self);
    }
}

/// `run()` observed every entry's completion event.
///
/// # Log Level
/// `info!`
pub struct RunCompleted {
    pub entry_count: usize,
    pub elapsed: Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "run completed: {} entries in {:?}",
            self.entry_count, self.elapsed
        )
    }
}

impl RunCompleted {
    pub fn log(&self) {
        tracing::info!(
            entry_count = self.entry_count,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "{}",
            self
        );
    }
}

/// A worker thread observed the should-exit flag and is returning.
///
/// # Log Level
/// `debug!`
pub struct WorkerExiting {
    pub worker_id: usize,
}

impl Display for WorkerExiting {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "worker {} exiting", self.worker_id)
    }
}

impl WorkerExiting {
    pub fn log(&self) {
        tracing::debug!(worker_id = self.worker_id, "{}", self);
    }
}

/// A task body panicked; the entry was still marked complete.
///
/// # Log Level
/// `error!`
pub struct TaskPanicked {
    pub entry_index: usize,
}

impl Display for TaskPanicked {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "task at entry {} panicked", self.entry_index)
    }
}

impl TaskPanicked {
    pub fn log(&self) {
        tracing::error!(entry_index = self.entry_index, "{}", self);
    }
}
