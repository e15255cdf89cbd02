// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for task declaration and linearization events.

use std::fmt::{Display, Formatter};

use crate::errors::BuilderError;

/// A `build()` call produced a valid [`crate::plan::Plan`].
///
/// # Log Level
/// `info!`
pub struct PlanBuilt {
    pub task_count: usize,
    pub entry_point_count: usize,
}

impl Display for PlanBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "built plan with {} tasks ({} entry points)",
            self.task_count, self.entry_point_count
        )
    }
}

impl PlanBuilt {
    pub fn log(&self) {
        tracing::info!(
            task_count = self.task_count,
            entry_point_count = self.entry_point_count,
            "{}",
            self
        );
    }
}

/// `add()` rejected a name that was already registered.
///
/// # Log Level
/// `warn!`
pub struct DuplicateNameRejected<'a> {
    pub error: &'a BuilderError,
}

impl Display for DuplicateNameRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl DuplicateNameRejected<'_> {
    pub fn log(&self) {
        tracing::warn!("{}", self);
    }
}

/// `build()` found a dependency naming a task that was never added.
///
/// # Log Level
/// `warn!`
pub struct UnknownDependencyDetected<'a> {
    pub error: &'a BuilderError,
}

impl Display for UnknownDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl UnknownDependencyDetected<'_> {
    pub fn log(&self) {
        tracing::warn!("{}", self);
    }
}

/// `build()` exhausted the roots buffer with tasks still unprocessed.
///
/// # Log Level
/// `warn!`
pub struct CycleDetected<'a> {
    pub error: &'a BuilderError,
}

impl Display for CycleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl CycleDetected<'_> {
    pub fn log(&self) {
        tracing::warn!("{}", self);
    }
}
