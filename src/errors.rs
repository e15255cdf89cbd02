// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced while building a [`crate::plan::Plan`].
//!
//! All three variants are raised only from [`crate::builder::Builder::add`]
//! or [`crate::builder::Builder::build`]; the executor itself cannot fail in
//! this sense once it has been handed a valid `Plan`.

use thiserror::Error;

/// Errors produced while declaring tasks or linearizing them into a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// `add` was called twice with the same task name.
    #[error("task '{name}' was already added to this builder")]
    DuplicateName {
        /// The name that was added more than once.
        name: String,
    },

    /// A task declared a dependency that was never `add`ed.
    #[error("task '{dependent}' depends on unknown task '{missing}'")]
    UnknownDependency {
        /// The dependency name that no task was ever registered under.
        missing: String,
        /// One task that names `missing` as a dependency. If more than one
        /// task references the same missing name, only the first one found
        /// during validation is reported.
        dependent: String,
    },

    /// The declared dependency graph contains a directed cycle.
    #[error("cycle detected among tasks: {}", .remaining.join(", "))]
    Cycle {
        /// The names still unprocessed at the point the cycle was detected.
        /// Not necessarily the minimal cycle, but always a superset of it.
        remaining: Vec<String>,
    },
}
