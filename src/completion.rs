// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One-shot, multi-waiter completion signals.
//!
//! The engine needs exactly one primitive: something a thread can `set` once
//! (idempotently) and any number of other threads can `await`, with a
//! `clear` used only for the engine-wide has-work signal. This module models
//! that as the [`CompletionEvent`] trait so the backing implementation is a
//! swappable concern rather than baked into the engine, with two
//! implementations selected via Cargo feature:
//!
//! * `condvar` (default) — a mutex-guarded boolean plus a [`Condvar`].
//! * `atomic-wait` — a raw `AtomicU32` plus OS-level wait/wake via the
//!   `atomic-wait` crate.
//!
//! Both satisfy the same contract: `set` is safe to call before any `await`
//! ever runs, `await` may be called concurrently from many threads, and
//! `clear` is only meaningful when no thread is currently awaiting.

use std::sync::{Condvar, Mutex};

/// A one-shot, multi-waiter, manual-reset completion signal.
pub trait CompletionEvent: Default + Send + Sync {
    /// Blocks the calling thread until [`set`](Self::set) has been observed.
    /// Returns immediately if already signaled.
    fn await_done(&self);

    /// Transitions to signaled and wakes every thread parked in
    /// [`await_done`](Self::await_done). Idempotent.
    fn set(&self);

    /// Transitions back to not-signaled. Only safe when no thread is
    /// currently awaiting this event.
    fn clear(&self);

    /// Non-blocking check of the current state.
    fn is_done(&self) -> bool;
}

/// Condition-variable-backed [`CompletionEvent`].
///
/// `set` takes the mutex before flipping the flag so there is no window
/// where a waiter has observed `false` but has not yet parked on the
/// condvar; without the lock, a `set` landing in that window would be lost.
#[derive(Default)]
pub struct CondvarEvent {
    done: Mutex<bool>,
    cvar: Condvar,
}

impl CompletionEvent for CondvarEvent {
    fn await_done(&self) {
        let mut done = self.done.lock().unwrap();
        while !*done {
            done = self.cvar.wait(done).unwrap();
        }
    }

    fn set(&self) {
        let mut done = self.done.lock().unwrap();
        *done = true;
        self.cvar.notify_all();
    }

    fn clear(&self) {
        *self.done.lock().unwrap() = false;
    }

    fn is_done(&self) -> bool {
        *self.done.lock().unwrap()
    }
}

#[cfg(feature = "atomic-wait")]
mod atomic_backed {
    use super::CompletionEvent;
    use std::sync::atomic::{AtomicU32, Ordering};

    const NOT_DONE: u32 = 0;
    const DONE: u32 = 1;

    /// Futex-backed [`CompletionEvent`], built on the `atomic-wait` crate's
    /// `wait`/`wake_all`. Avoids a mutex entirely; the atomic itself is both
    /// the state and the wait queue key.
    pub struct AtomicEvent {
        state: AtomicU32,
    }

    impl Default for AtomicEvent {
        fn default() -> Self {
            AtomicEvent {
                state: AtomicU32::new(NOT_DONE),
            }
        }
    }

    impl CompletionEvent for AtomicEvent {
        fn await_done(&self) {
            while self.state.load(Ordering::Acquire) == NOT_DONE {
                atomic_wait::wait(&self.state, NOT_DONE);
            }
        }

        fn set(&self) {
            self.state.store(DONE, Ordering::Release);
            atomic_wait::wake_all(&self.state);
        }

        fn clear(&self) {
            self.state.store(NOT_DONE, Ordering::Release);
        }

        fn is_done(&self) -> bool {
            self.state.load(Ordering::Acquire) == DONE
        }
    }
}

#[cfg(feature = "atomic-wait")]
pub use atomic_backed::AtomicEvent;

/// The [`CompletionEvent`] implementation used when no explicit type
/// parameter is given to [`crate::engine::Engine`]. Selected by Cargo
/// feature, never at runtime.
#[cfg(not(feature = "atomic-wait"))]
pub type DefaultEvent = CondvarEvent;

#[cfg(feature = "atomic-wait")]
pub type DefaultEvent = AtomicEvent;
