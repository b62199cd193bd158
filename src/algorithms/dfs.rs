use crate::algorithms::common::{reconstruct_path, ParentMap, SearchAlgorithm, SearchOutcome};
use crate::grid::Grid;
use crate::observer::{StepEvent, StepObserver};
use crate::runner::Algorithm;
use rustc_hash::FxHashSet;

/// Depth-first search over an explicit stack.
///
/// Neighbors are pushed in priority order, so the last one pushed is tried
/// first. A cell that is pushed again before being expanded takes the newer
/// pusher as its parent, since that is the entry that will be popped first.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirst;

impl DepthFirst {
    pub fn new() -> Self {
        DepthFirst
    }
}

impl SearchAlgorithm for DepthFirst {
    fn find_path(&mut self, grid: &Grid, observer: &mut dyn StepObserver) -> SearchOutcome {
        let mut stack = vec![grid.start];
        let mut parents = ParentMap::default();
        parents.insert(grid.start, None);
        let mut explored = FxHashSet::default();

        while let Some(current) = stack.pop() {
            if current == grid.goal {
                return SearchOutcome::Found(reconstruct_path(&parents, grid.start, grid.goal));
            }

            // Stale entries still produce a step, without expanding again.
            if explored.insert(current) {
                for neighbor in grid.get_neighbors(current) {
                    if !explored.contains(&neighbor) {
                        parents.insert(neighbor, Some(current));
                        stack.push(neighbor);
                    }
                }
            }

            let event = StepEvent {
                algorithm: Algorithm::Dfs,
                frontier: &stack,
                explored: &explored,
            };
            tracing::trace!("DFS popped {}, stack depth {}", current, stack.len());
            if observer.on_step(&event).is_break() {
                return SearchOutcome::Cancelled;
            }
        }

        SearchOutcome::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::observer::{NoopObserver, StepBudget, StepRecorder};

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_dfs_tries_last_neighbor_first() {
        let grid = Grid::new(3, 3, p(0, 0), p(2, 2));
        let outcome = DepthFirst::new().find_path(&grid, &mut NoopObserver);
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![p(0, 0), p(1, 1), p(1, 0), p(2, 1), p(2, 2)])
        );
    }

    #[test]
    fn test_dfs_path_is_valid_around_walls() {
        let grid = Grid::new(3, 3, p(0, 0), p(0, 2)).with_walls([p(0, 1), p(1, 1)]);
        let outcome = DepthFirst::new().find_path(&grid, &mut NoopObserver);
        let path = outcome.path().expect("goal is reachable");
        assert!(grid.is_valid_path(path));
    }

    #[test]
    fn test_dfs_steps_report_stack() {
        let grid = Grid::new(3, 3, p(0, 0), p(2, 2));
        let mut recorder = StepRecorder::new();
        DepthFirst::new().find_path(&grid, &mut recorder);
        assert_eq!(recorder.steps[0].frontier, vec![p(0, 1), p(1, 0), p(1, 1)]);
        assert_eq!(recorder.steps.len(), 5);
    }

    #[test]
    fn test_dfs_cancelled_by_observer() {
        let grid = Grid::new(5, 5, p(0, 0), p(4, 4));
        let mut budget = StepBudget::new(2);
        let outcome = DepthFirst::new().find_path(&grid, &mut budget);
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(budget.steps_seen(), 2);
    }

    #[test]
    fn test_dfs_exhausts_when_goal_is_sealed() {
        let grid = Grid::new(3, 3, p(0, 0), p(0, 2)).with_walls([p(0, 1), p(1, 2)]);
        assert_eq!(
            DepthFirst::new().find_path(&grid, &mut NoopObserver),
            SearchOutcome::Exhausted
        );
    }
}
