use crate::algorithms::common::{reconstruct_path, ParentMap, SearchAlgorithm, SearchOutcome};
use crate::grid::Grid;
use crate::observer::{StepEvent, StepObserver};
use crate::runner::Algorithm;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Breadth-first search over a FIFO queue.
///
/// A cell's parent is fixed the first time it is enqueued, which makes the
/// returned path shortest in number of moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl SearchAlgorithm for BreadthFirst {
    fn find_path(&mut self, grid: &Grid, observer: &mut dyn StepObserver) -> SearchOutcome {
        let mut queue = VecDeque::from([grid.start]);
        let mut parents = ParentMap::default();
        parents.insert(grid.start, None);
        let mut explored = FxHashSet::default();

        while let Some(current) = queue.pop_front() {
            if current == grid.goal {
                return SearchOutcome::Found(reconstruct_path(&parents, grid.start, grid.goal));
            }

            for neighbor in grid.get_neighbors(current) {
                if !parents.contains_key(&neighbor) {
                    parents.insert(neighbor, Some(current));
                    queue.push_back(neighbor);
                }
            }
            explored.insert(current);

            let event = StepEvent {
                algorithm: Algorithm::Bfs,
                frontier: queue.make_contiguous(),
                explored: &explored,
            };
            tracing::trace!("BFS expanded {}, frontier {}", current, event.frontier.len());
            if observer.on_step(&event).is_break() {
                return SearchOutcome::Cancelled;
            }
        }

        SearchOutcome::Exhausted
    }
}
