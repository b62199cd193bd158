use crate::algorithms::common::{stitch_paths, ParentMap, SearchAlgorithm, SearchOutcome};
use crate::grid::{Grid, Position};
use crate::observer::{StepEvent, StepObserver};
use crate::runner::Algorithm;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// One half of a bidirectional search.
struct Side {
    queue: VecDeque<Position>,
    parents: ParentMap,
    visited: FxHashSet<Position>,
}

impl Side {
    fn new(root: Position) -> Self {
        let mut parents = ParentMap::default();
        parents.insert(root, None);
        let mut visited = FxHashSet::default();
        visited.insert(root);
        Side {
            queue: VecDeque::from([root]),
            parents,
            visited,
        }
    }

    /// Expands the next queued cell and returns the first neighbor that the
    /// other side has already visited, if any.
    fn expand(&mut self, grid: &Grid, other: &Side) -> Option<Position> {
        let current = self.queue.pop_front()?;
        for neighbor in grid.get_neighbors(current) {
            if self.visited.insert(neighbor) {
                self.parents.insert(neighbor, Some(current));
                self.queue.push_back(neighbor);
            }
            if other.visited.contains(&neighbor) {
                return Some(neighbor);
            }
        }
        None
    }
}

/// Two breadth-first searches, one from each end, that stop as soon as
/// either one discovers a cell the other has visited.
///
/// The path is not guaranteed to be the shortest one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bidirectional;

impl Bidirectional {
    pub fn new() -> Self {
        Bidirectional
    }
}

impl SearchAlgorithm for Bidirectional {
    fn find_path(&mut self, grid: &Grid, observer: &mut dyn StepObserver) -> SearchOutcome {
        let mut forward = Side::new(grid.start);
        let mut backward = Side::new(grid.goal);
        let mut frontier = Vec::new();

        while !forward.queue.is_empty() || !backward.queue.is_empty() {
            let meeting = forward
                .expand(grid, &backward)
                .or_else(|| backward.expand(grid, &forward));
            if let Some(meeting) = meeting {
                tracing::trace!("Bidirectional search met at {}", meeting);
                return SearchOutcome::Found(stitch_paths(
                    &forward.parents,
                    &backward.parents,
                    grid.start,
                    grid.goal,
                    meeting,
                ));
            }

            frontier.clear();
            frontier.extend(forward.queue.iter().chain(backward.queue.iter()).copied());
            let explored: FxHashSet<Position> = forward.visited.union(&backward.visited).copied().collect();
            let event = StepEvent {
                algorithm: Algorithm::Bidirectional,
                frontier: &frontier,
                explored: &explored,
            };
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
    use crate::observer::{NoopObserver, StepRecorder};

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_bidirectional_meets_on_diagonal() {
        let grid = Grid::new(3, 3, p(0, 0), p(2, 2));
        let outcome = Bidirectional::new().find_path(&grid, &mut NoopObserver);
        assert_eq!(outcome, SearchOutcome::Found(vec![p(0, 0), p(1, 1), p(2, 2)]));
    }

    #[test]
    fn test_bidirectional_adjacent_endpoints() {
        let grid = Grid::new(1, 2, p(0, 0), p(0, 1));
        let outcome = Bidirectional::new().find_path(&grid, &mut NoopObserver);
        assert_eq!(outcome, SearchOutcome::Found(vec![p(0, 0), p(0, 1)]));
    }

    #[test]
    fn test_bidirectional_stitches_long_corridor() {
        let grid = Grid::new(1, 7, p(0, 0), p(0, 6));
        let mut recorder = StepRecorder::new();
        let outcome = Bidirectional::new().find_path(&grid, &mut recorder);

        assert_eq!(
            outcome,
            SearchOutcome::Found((0..7).map(|col| p(0, col)).collect())
        );
        // Rounds 1 and 2 finish without meeting. In round 3 the goal side
        // expands (0,4) and discovers (0,3), which the start side holds.
        assert_eq!(recorder.steps.len(), 2);
        assert_eq!(recorder.steps[0].frontier, vec![p(0, 1), p(0, 5)]);
    }

    #[test]
    fn test_bidirectional_detours_around_walls() {
        let grid = Grid::new(3, 3, p(0, 0), p(0, 2)).with_walls([p(0, 1), p(1, 1)]);
        let outcome = Bidirectional::new().find_path(&grid, &mut NoopObserver);
        assert!(grid.is_valid_path(outcome.path().expect("goal is reachable")));
    }

    #[test]
    fn test_bidirectional_exhausts_when_goal_is_sealed() {
        let grid = Grid::new(3, 3, p(0, 0), p(0, 2)).with_walls([p(0, 1), p(1, 2)]);
        assert_eq!(
            Bidirectional::new().find_path(&grid, &mut NoopObserver),
            SearchOutcome::Exhausted
        );
    }
}
