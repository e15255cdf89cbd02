// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns a name-keyed dependency declaration into a linearized,
//! index-addressed [`Plan`].
//!
//! `Builder` works entirely in a name world: tasks are added by name, with
//! dependencies given as names too, in whatever order the caller likes.
//! [`Builder::build`] resolves that name world down to a dense index world
//! via Kahn's topological sort, so the executor never has to do a hash
//! lookup once a run is underway.

use std::collections::HashMap;

use crate::errors::BuilderError;
use crate::observability::messages::builder as messages;
use crate::plan::{Plan, PlanEntry, TaskBody};

struct Declaration {
    name: String,
    deps: Vec<String>,
    body: TaskBody,
}

/// Accumulates task declarations and linearizes them into a [`Plan`].
///
/// Declaration order is preserved and used to break ties among tasks that
/// become ready at the same point during linearization. Not strictly
/// required, but free given the index map `add` already maintains, and it
/// makes fixtures reproducible.
#[derive(Default)]
pub struct Builder {
    declarations: Vec<Declaration>,
    index_by_name: HashMap<String, usize>,
}

impl Builder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Builder::default()
    }

    /// Registers a task named `name` with predecessor names `deps` and a
    /// no-argument body.
    ///
    /// Fails with [`BuilderError::DuplicateName`] if `name` was already
    /// added. Names in `deps` need not have been added yet: forward
    /// references are permitted and resolved at [`build`](Self::build) time.
    /// A self-dependency (`name` appearing in its own `deps`) is accepted
    /// here and will surface as [`BuilderError::Cycle`] at build time.
    pub fn add<I, D>(
        mut self,
        name: impl Into<String>,
        deps: I,
        body: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, BuilderError>
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        let name = name.into();
        if self.index_by_name.contains_key(&name) {
            let err = BuilderError::DuplicateName { name };
            messages::DuplicateNameRejected { error: &err }.log();
            return Err(err);
        }

        let deps = deps.into_iter().map(Into::into).collect();
        self.index_by_name
            .insert(name.clone(), self.declarations.len());
        self.declarations.push(Declaration {
            name,
            deps,
            body: std::sync::Arc::new(body),
        });

        Ok(self)
    }

    /// Validates the declared graph and linearizes it into a [`Plan`].
    ///
    /// Fails with [`BuilderError::UnknownDependency`] if any declared
    /// dependency names a task that was never [`add`](Self::add)ed, or with
    /// [`BuilderError::Cycle`] if the declared graph contains a directed
    /// cycle (including a self-dependency).
    pub fn build(self) -> Result<Plan, BuilderError> {
        let Builder {
            declarations,
            index_by_name,
        } = self;
        let total = declarations.len();

        // Reverse adjacency: for every task, which tasks depend on it.
        // Built alongside forward-adjacency validation so an unknown
        // dependency is caught before any linearization work happens.
        let mut forward: Vec<Vec<usize>> = Vec::with_capacity(total);
        let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); total];
        for (i, decl) in declarations.iter().enumerate() {
            let mut forward_indices = Vec::with_capacity(decl.deps.len());
            for dep in &decl.deps {
                let dep_index = match index_by_name.get(dep) {
                    Some(&idx) => idx,
                    None => {
                        let err = BuilderError::UnknownDependency {
                            missing: dep.clone(),
                            dependent: decl.name.clone(),
                        };
                        messages::UnknownDependencyDetected { error: &err }.log();
                        return Err(err);
                    }
                };
                forward_indices.push(dep_index);
                reverse[dep_index].push(i);
            }
            forward.push(forward_indices);
        }

        // Kahn's algorithm: seed the roots buffer with every task that has
        // no predecessors, then grow it as predecessor counts drop to zero.
        // `remaining[i]` counts down from `forward[i].len()`; when it hits
        // zero, task `i` is appended to `roots`.
        let mut remaining: Vec<usize> = forward.iter().map(Vec::len).collect();
        let mut roots: Vec<usize> = (0..total).filter(|&i| remaining[i] == 0).collect();

        let mut final_index = vec![usize::MAX; total];
        let mut entries = Vec::with_capacity(total);
        let mut processed = 0;

        while processed < total {
            if processed >= roots.len() {
                let unprocessed: Vec<String> = (0..total)
                    .filter(|&i| final_index[i] == usize::MAX)
                    .map(|i| declarations[i].name.clone())
                    .collect();
                let err = BuilderError::Cycle {
                    remaining: unprocessed,
                };
                messages::CycleDetected { error: &err }.log();
                return Err(err);
            }

            let n = roots[processed];
            processed += 1;

            let predecessor_indices: Vec<usize> = forward[n]
                .iter()
                .map(|&dep| final_index[dep])
                .collect();

            final_index[n] = entries.len();
            entries.push(PlanEntry::new(
                Some(declarations[n].body.clone()),
                predecessor_indices,
            ));

            for &m in &reverse[n] {
                remaining[m] -= 1;
                if remaining[m] == 0 {
                    roots.push(m);
                }
            }
        }

        let entry_point_count = forward.iter().filter(|deps| deps.is_empty()).count();
        let plan = Plan::new(entries);
        messages::PlanBuilt {
            task_count: plan.len(),
            entry_point_count,
        }
        .log();
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn noop() {}

    #[test]
    fn empty_builder_builds_empty_plan() {
        let plan = Builder::new().build().unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = Builder::new()
            .add("a", Vec::<String>::new(), noop)
            .unwrap()
            .add("a", Vec::<String>::new(), noop)
            .unwrap_err();
        assert_eq!(
            err,
            BuilderError::DuplicateName {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let err = Builder::new()
            .add("a", vec!["ghost"], noop)
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuilderError::UnknownDependency {
                missing: "ghost".to_string(),
                dependent: "a".to_string(),
            }
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let err = Builder::new()
            .add("a", vec!["a"], noop)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::Cycle { .. }));
    }

    #[test]
    fn two_node_cycle_is_detected() {
        let err = Builder::new()
            .add("a", vec!["b"], noop)
            .unwrap()
            .add("b", vec!["a"], noop)
            .unwrap()
            .build()
            .unwrap_err();
        match err {
            BuilderError::Cycle { remaining } => {
                assert_eq!(remaining.len(), 2);
                assert!(remaining.contains(&"a".to_string()));
                assert!(remaining.contains(&"b".to_string()));
            }
            other => panic!("expected Cycle, got {other:?}"),
        }
    }

    #[test]
    fn forward_references_are_allowed() {
        // "a" depends on "b" which is added after "a".
        let plan = Builder::new()
            .add("a", vec!["b"], noop)
            .unwrap()
            .add("b", Vec::<String>::new(), noop)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(plan.len(), 2);
        // "b" must end up before "a" regardless of declaration order.
        let b_index = plan
            .entries
            .iter()
            .position(|e| e.predecessors.is_empty())
            .unwrap();
        let a_index = plan
            .entries
            .iter()
            .position(|e| !e.predecessors.is_empty())
            .unwrap();
        assert!(b_index < a_index);
        assert_eq!(plan.entries[a_index].predecessors, vec![b_index]);
    }

    #[test]
    fn diamond_respects_topological_invariant() {
        let plan = Builder::new()
            .add("a", Vec::<String>::new(), noop)
            .unwrap()
            .add("b", vec!["a"], noop)
            .unwrap()
            .add("c", vec!["a"], noop)
            .unwrap()
            .add("d", vec!["b", "c"], noop)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(plan.len(), 4);
        for (i, entry) in plan.entries.iter().enumerate() {
            for &p in &entry.predecessors {
                assert!(p < i, "predecessor {p} must precede entry {i}");
            }
        }
    }

    #[test]
    fn build_is_deterministic_for_an_unchanged_builder() {
        let make = || {
            Builder::new()
                .add("a", Vec::<String>::new(), noop)
                .unwrap()
                .add("b", vec!["a"], noop)
                .unwrap()
                .add("c", vec!["a"], noop)
                .unwrap()
        };
        let first = make().build().unwrap();
        let second = make().build().unwrap();

        let shape = |plan: &Plan| -> Vec<Vec<usize>> {
            plan.entries.iter().map(|e| e.predecessors.clone()).collect()
        };
        assert_eq!(shape(&first), shape(&second));
    }

    #[test]
    fn bodies_run_through_the_plan() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let plan = Builder::new()
            .add("a", Vec::<String>::new(), move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap()
            .build()
            .unwrap();

        for entry in &plan.entries {
            if let Some(body) = &entry.body {
                body();
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
