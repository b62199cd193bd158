//! Progress reporting for running searches.
//!
//! Every strategy reports one [`StepEvent`] per expansion (per visit for
//! the depth-limited family, per round for bidirectional search). The
//! event borrows the strategy's state for the duration of the call, so an
//! observer that wants to keep anything must copy it out.
//!
//! Returning [`ControlFlow::Break`] from [`StepObserver::on_step`] aborts the
//! run; the strategy then reports [`SearchOutcome::Cancelled`].
//!
//! [`SearchOutcome::Cancelled`]: crate::algorithms::common::SearchOutcome::Cancelled

use crate::grid::Position;
use crate::runner::Algorithm;
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::ControlFlow;

/// Snapshot of a search after one expansion.
#[derive(Debug, Clone, Copy)]
pub struct StepEvent<'a> {
    pub algorithm: Algorithm,
    /// Cells waiting to be expanded, in the strategy's own order.
    pub frontier: &'a [Position],
    pub explored: &'a FxHashSet<Position>,
}

pub trait StepObserver {
    fn on_step(&mut self, event: &StepEvent<'_>) -> ControlFlow<()>;
}

impl<O: StepObserver + ?Sized> StepObserver for &mut O {
    fn on_step(&mut self, event: &StepEvent<'_>) -> ControlFlow<()> {
        (**self).on_step(event)
    }
}

/// Observer backed by a closure; see [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnObserver<F>(F);

/// Wraps a closure as a [`StepObserver`].
pub fn from_fn<F>(f: F) -> FnObserver<F>
where
    F: FnMut(&StepEvent<'_>) -> ControlFlow<()>,
{
    FnObserver(f)
}

impl<F> StepObserver for FnObserver<F>
where
    F: FnMut(&StepEvent<'_>) -> ControlFlow<()>,
{
    fn on_step(&mut self, event: &StepEvent<'_>) -> ControlFlow<()> {
        (self.0)(event)
    }
}

/// Ignores every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _event: &StepEvent<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Numbers cells in the order they first appear in the explored set.
///
/// Indices start at 1. Cells that join the explored set in the same step
/// are numbered in row-major order so the numbering is deterministic.
#[derive(Debug, Default, Clone)]
pub struct VisitOrder {
    order: FxHashMap<Position, usize>,
    counter: usize,
}

impl VisitOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.order.get(&pos).copied()
    }

    pub fn as_map(&self) -> &FxHashMap<Position, usize> {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl StepObserver for VisitOrder {
    fn on_step(&mut self, event: &StepEvent<'_>) -> ControlFlow<()> {
        let mut fresh: Vec<Position> = event
            .explored
            .iter()
            .filter(|pos| !self.order.contains_key(pos))
            .copied()
            .collect();
        fresh.sort_unstable();
        for pos in fresh {
            self.counter += 1;
            self.order.insert(pos, self.counter);
        }
        ControlFlow::Continue(())
    }
}

/// Owned copy of a [`StepEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStep {
    pub frontier: Vec<Position>,
    pub explored: FxHashSet<Position>,
}

/// Keeps a copy of every step.
#[derive(Debug, Default, Clone)]
pub struct StepRecorder {
    pub steps: Vec<RecordedStep>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepObserver for StepRecorder {
    fn on_step(&mut self, event: &StepEvent<'_>) -> ControlFlow<()> {
        self.steps.push(RecordedStep {
            frontier: event.frontier.to_vec(),
            explored: event.explored.clone(),
        });
        ControlFlow::Continue(())
    }
}

/// Stops the search once `limit` steps have been reported.
#[derive(Debug, Clone, Copy)]
pub struct StepBudget {
    limit: usize,
    seen: usize,
}

impl StepBudget {
    pub fn new(limit: usize) -> Self {
        StepBudget { limit, seen: 0 }
    }

    pub fn steps_seen(&self) -> usize {
        self.seen
    }
}

impl StepObserver for StepBudget {
    fn on_step(&mut self, _event: &StepEvent<'_>) -> ControlFlow<()> {
        self.seen += 1;
        if self.seen >= self.limit {
            tracing::debug!("Step budget of {} exhausted", self.limit);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Forwards each step to two observers; breaks if either one does.
#[derive(Debug, Clone)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: StepObserver, B: StepObserver> StepObserver for Tee<A, B> {
    fn on_step(&mut self, event: &StepEvent<'_>) -> ControlFlow<()> {
        let first = self.0.on_step(event);
        let second = self.1.on_step(event);
        if first.is_break() || second.is_break() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
