// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The executor: a fixed worker pool plus a wait-free dispatch cursor that
//! runs a [`Plan`] to completion.
//!
//! `Engine::run` blocks the calling thread until every entry in the plan has
//! been observed complete. The calling thread is not just a spectator: it
//! joins the worker pool in claiming and executing entries for the duration
//! of the run.

use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::completion::{CompletionEvent, DefaultEvent};
use crate::observability::messages::engine as messages;
use crate::plan::{Plan, TaskBody};

/// Worker-count configuration for an [`Engine`].
///
/// The only tunable the engine has. [`EngineConfig::default`] mirrors how
/// this codebase's executor factory derives a concurrency default: the
/// number of available parallelism units, minus one since the caller's own
/// thread always participates in every run.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub worker_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let available = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        EngineConfig {
            worker_count: available.saturating_sub(1),
        }
    }
}

struct RuntimeEntry<S: CompletionEvent> {
    body: Option<TaskBody>,
    predecessors: Vec<usize>,
    done: S,
    panic: Mutex<Option<Box<dyn Any + Send + 'static>>>,
}

/// The runtime snapshot of a [`Plan`] for one `run`. Built fresh on every
/// `run` call, published once before workers are notified, and never
/// mutated afterwards: workers only ever read through a cloned `Arc`,
/// never a raw pointer into a vector the caller could still be mutating.
struct Dispatch<S: CompletionEvent> {
    entries: Vec<RuntimeEntry<S>>,
}

impl<S: CompletionEvent> Dispatch<S> {
    fn from_plan(plan: &Plan) -> Self {
        let entries = plan
            .entries
            .iter()
            .map(|entry| RuntimeEntry {
                body: entry.body.clone(),
                predecessors: entry.predecessors.clone(),
                done: S::default(),
                panic: Mutex::new(None),
            })
            .collect();
        Dispatch { entries }
    }

    fn empty() -> Self {
        Dispatch {
            entries: Vec::new(),
        }
    }

    /// The first panic payload recorded, in entry order, if any task body
    /// panicked during this dispatch's run.
    fn take_first_panic(&self) -> Option<Box<dyn Any + Send + 'static>> {
        for entry in &self.entries {
            let mut guard = entry.panic.lock().unwrap();
            if guard.is_some() {
                return guard.take();
            }
        }
        None
    }
}

struct Shared<S: CompletionEvent> {
    dispatch: Mutex<Arc<Dispatch<S>>>,
    cursor: AtomicUsize,
    has_work: S,
    should_exit: AtomicBool,
}

/// A fixed pool of worker threads that executes [`Plan`]s handed to it via
/// [`run`](Engine::run).
///
/// `S` is the [`CompletionEvent`] implementation backing every per-entry
/// completion signal and the engine-wide has-work signal; it defaults to
/// whichever implementation the `atomic-wait` Cargo feature selects (see
/// [`crate::completion`]).
///
/// An `Engine` must not be dropped while a `run` is in flight on another
/// thread. This is a caller invariant, not something the type system
/// enforces.
pub struct Engine<S: CompletionEvent = DefaultEvent> {
    shared: Arc<Shared<S>>,
    workers: Vec<JoinHandle<()>>,
}

impl<S: CompletionEvent + 'static> Engine<S> {
    /// Spawns `worker_count` background worker threads. `worker_count == 0`
    /// is legal: every task then runs on the calling thread during `run`.
    pub fn new(worker_count: usize) -> Self {
        let shared = Arc::new(Shared {
            dispatch: Mutex::new(Arc::new(Dispatch::empty())),
            cursor: AtomicUsize::new(0),
            has_work: S::default(),
            should_exit: AtomicBool::new(false),
        });

        let workers = (1..=worker_count)
            .map(|id| {
                let shared = shared.clone();
                thread::Builder::new()
                    .name(format!("dagwood-worker-{id}"))
                    .spawn(move || Self::worker_loop(shared, id))
                    .expect("failed to spawn dagwood worker thread")
            })
            .collect();

        messages::EngineStarted { worker_count }.log();
        Engine { shared, workers }
    }

    /// Equivalent to `Engine::new(config.worker_count)`.
    pub fn from_config(config: EngineConfig) -> Self {
        Self::new(config.worker_count)
    }

    /// Runs `plan` to completion, blocking the calling thread until every
    /// entry's completion event has been observed.
    ///
    /// If any task body panicked during the run, the first panic (in plan
    /// order) is resumed from this call once every entry has drained — a
    /// panicking body can never cause `run` to hang, but it is never
    /// silently swallowed either.
    pub fn run(&self, plan: &Plan) {
        let dispatch = Arc::new(Dispatch::from_plan(plan));
        let len = dispatch.entries.len();

        *self.shared.dispatch.lock().unwrap() = dispatch.clone();
        self.shared.cursor.store(0, Ordering::SeqCst);
        self.shared.has_work.set();
        messages::RunStarted { entry_count: len }.log();
        let started_at = Instant::now();

        loop {
            let i = self.shared.cursor.fetch_add(1, Ordering::SeqCst);
            if i < len {
                Self::execute_one(&dispatch, i);
            } else {
                // Only the caller's thread clears the has-work signal.
                self.shared.has_work.clear();
                break;
            }
        }

        for entry in &dispatch.entries {
            entry.done.await_done();
        }

        messages::RunCompleted {
            entry_count: len,
            elapsed: started_at.elapsed(),
        }
        .log();

        if let Some(panic) = dispatch.take_first_panic() {
            std::panic::resume_unwind(panic);
        }
    }

    fn worker_loop(shared: Arc<Shared<S>>, id: usize) {
        loop {
            shared.has_work.await_done();
            if shared.should_exit.load(Ordering::Acquire) {
                messages::WorkerExiting { worker_id: id }.log();
                return;
            }

            let dispatch = shared.dispatch.lock().unwrap().clone();
            let i = shared.cursor.fetch_add(1, Ordering::SeqCst);
            if i < dispatch.entries.len() {
                Self::execute_one(&dispatch, i);
            }
        }
    }

    fn execute_one(dispatch: &Dispatch<S>, i: usize) {
        let entry = &dispatch.entries[i];
        for &p in &entry.predecessors {
            dispatch.entries[p].done.await_done();
        }

        if let Some(body) = entry.body.clone() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| body()));
            if let Err(payload) = outcome {
                messages::TaskPanicked { entry_index: i }.log();
                *entry.panic.lock().unwrap() = Some(payload);
            }
        }

        entry.done.set();
    }
}

impl<S: CompletionEvent> Drop for Engine<S> {
    fn drop(&mut self) {
        self.shared.should_exit.store(true, Ordering::Release);
        *self.shared.dispatch.lock().unwrap() = Arc::new(Dispatch::empty());
        self.shared.cursor.store(0, Ordering::SeqCst);
        self.shared.has_work.set();

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
