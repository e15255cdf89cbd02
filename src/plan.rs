// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The linearized, index-addressed output of a [`crate::builder::Builder`].

use std::sync::Arc;

/// A no-argument task body. `Arc` rather than a bare `Box` so a [`Plan`] can
/// be handed to [`crate::engine::Engine::run`] more than once without
/// consuming the bodies it carries.
pub type TaskBody = Arc<dyn Fn() + Send + Sync>;

/// One entry in a [`Plan`]: a body plus the indices of its predecessors.
///
/// `predecessors` are guaranteed by [`Plan`]'s invariant to be strictly less
/// than this entry's own position in the plan. `body` is `None` only for
/// plan entries constructed outside [`crate::builder::Builder`]; the engine
/// tolerates an absent body by treating it as a no-op that still signals
/// completion, exercised by the engine's own unit tests, though the public
/// builder API always supplies one.
pub struct PlanEntry {
    pub(crate) body: Option<TaskBody>,
    pub(crate) predecessors: Vec<usize>,
}

impl PlanEntry {
    pub(crate) fn new(body: Option<TaskBody>, predecessors: Vec<usize>) -> Self {
        PlanEntry { body, predecessors }
    }
}

/// An immutable, topologically ordered sequence of [`PlanEntry`] values.
///
/// For every entry at position `i`, every value in its `predecessors` lies
/// in `[0, i)`. This is what lets [`crate::engine::Engine`] dispatch
/// strictly left-to-right and still be certain that, for any entry it
/// claims, every one of its predecessors is either already running or will
/// be claimed by some thread before the run can deadlock.
///
/// A `Plan` is cheap to clone (it is just a `Vec` of small entries behind no
/// extra indirection) and may be passed to `run` any number of times: the
/// plan itself is never mutated by execution, only the runtime dispatch the
/// engine builds from it for the duration of one run.
pub struct Plan {
    pub(crate) entries: Vec<PlanEntry>,
}

impl Plan {
    pub(crate) fn new(entries: Vec<PlanEntry>) -> Self {
        Plan { entries }
    }

    /// The number of entries in this plan.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if this plan has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
