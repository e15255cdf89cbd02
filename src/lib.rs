// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! An in-process DAG task scheduler.
//!
//! Declare named tasks and their dependencies with a [`Builder`], turn the
//! declaration into a linearized [`Plan`] with [`Builder::build`], and run
//! it across a fixed worker pool with an [`Engine`]:
//!
//! ```
//! use dagwood::{Builder, Engine};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//!
//! let a = counter.clone();
//! let b = counter.clone();
//! let plan = Builder::new()
//!     .add("a", Vec::<String>::new(), move || { a.fetch_add(1, Ordering::SeqCst); })
//!     .unwrap()
//!     .add("b", vec!["a"], move || { b.fetch_add(10, Ordering::SeqCst); })
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let engine: Engine = Engine::new(2);
//! engine.run(&plan);
//! assert_eq!(counter.load(Ordering::SeqCst), 11);
//! ```
//!
//! See [`builder`] for the linearization algorithm, [`engine`] for the
//! dispatch-cursor execution model and the completion-event contract, and
//! [`errors`] for what can go wrong while declaring tasks.

pub mod builder;
pub mod completion;
pub mod engine;
pub mod errors;
pub mod observability;
pub mod plan;

pub use builder::Builder;
pub use completion::{CompletionEvent, DefaultEvent};
pub use engine::{Engine, EngineConfig};
pub use errors::BuilderError;
pub use plan::Plan;
