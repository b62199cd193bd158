use crate::algorithms::common::{reconstruct_path, ParentMap, SearchAlgorithm, SearchOutcome};
use crate::grid::{Grid, Position};
use crate::observer::{StepEvent, StepObserver};
use crate::runner::Algorithm;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Cost of a single move; every edge on the grid weighs the same.
const STEP_COST: usize = 1;

/// Uniform-cost (Dijkstra) search.
///
/// The heap is keyed on `(cost, cell)`, so equal costs pop in row-major
/// cell order.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformCost;

impl UniformCost {
    pub fn new() -> Self {
        UniformCost
    }
}

impl SearchAlgorithm for UniformCost {
    fn find_path(&mut self, grid: &Grid, observer: &mut dyn StepObserver) -> SearchOutcome {
        let mut queue = BinaryHeap::from([Reverse((0, grid.start))]);
        let mut parents = ParentMap::default();
        parents.insert(grid.start, None);
        let mut costs: FxHashMap<Position, usize> = FxHashMap::default();
        costs.insert(grid.start, 0);
        let mut explored = FxHashSet::default();

        while let Some(Reverse((cost, current))) = queue.pop() {
            if current == grid.goal {
                tracing::trace!("UCS reached goal at cost {}", cost);
                return SearchOutcome::Found(reconstruct_path(&parents, grid.start, grid.goal));
            }

            explored.insert(current);
            for neighbor in grid.get_neighbors(current) {
                let new_cost = cost + STEP_COST;
                let improves = costs.get(&neighbor).map_or(true, |&known| new_cost < known);
                if improves {
                    costs.insert(neighbor, new_cost);
                    parents.insert(neighbor, Some(current));
                    queue.push(Reverse((new_cost, neighbor)));
                }
            }

            let mut pending: Vec<(usize, Position)> = queue.iter().map(|Reverse(entry)| *entry).collect();
            pending.sort_unstable();
            let frontier: Vec<Position> = pending.into_iter().map(|(_, pos)| pos).collect();

            let event = StepEvent {
                algorithm: Algorithm::Ucs,
                frontier: &frontier,
                explored: &explored,
            };
            tracing::trace!("UCS expanded {} at cost {}", current, cost);
            if observer.on_step(&event).is_break() {
                return SearchOutcome::Cancelled;
            }
        }

        SearchOutcome::Exhausted
    }
}
