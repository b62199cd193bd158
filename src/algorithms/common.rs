use crate::grid::{Grid, Position};
use crate::observer::StepObserver;
use rustc_hash::FxHashMap;

/// Maps each discovered cell to the cell it was reached from; the root of
/// a search maps to `None`.
pub type ParentMap = FxHashMap<Position, Option<Position>>;

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Path from start to goal, both inclusive.
    Found(Vec<Position>),
    /// Every reachable cell (within any depth bound) was tried.
    Exhausted,
    /// The observer asked the search to stop.
    Cancelled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[Position]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

pub trait SearchAlgorithm {
    /// Searches `grid` from its start to its goal, reporting progress to
    /// `observer`.
    ///
    /// The grid must already have passed [`Grid::validate`].
    fn find_path(&mut self, grid: &Grid, observer: &mut dyn StepObserver) -> SearchOutcome;

    /// Depth bound at which the last successful run reached the goal (for
    /// iterative deepening)
    fn solution_depth(&self) -> Option<usize> {
        None // Default: strategy has no notion of a depth bound
    }
}

/// Walks parent pointers back from `goal` and returns the route in
/// start-to-goal order.
///
/// # Panics
///
/// If the chain from `goal` does not end at `start`. Searches only call
/// this after reaching the goal through recorded parents, so a broken
/// chain is a bug in the search.
pub fn reconstruct_path(parents: &ParentMap, start: Position, goal: Position) -> Vec<Position> {
    let mut path = walk_chain(parents, goal);
    path.reverse();
    assert_eq!(
        path.first(),
        Some(&start),
        "parent chain from {} does not lead back to {}",
        goal,
        start
    );
    path
}

/// Joins a forward search tree and a backward search tree at `meeting`.
///
/// The forward half runs start..=meeting. The backward parents of
/// `meeting` already point toward the goal, so that half is appended as is.
pub fn stitch_paths(
    forward: &ParentMap,
    backward: &ParentMap,
    start: Position,
    goal: Position,
    meeting: Position,
) -> Vec<Position> {
    let mut path = reconstruct_path(forward, start, meeting);
    let tail = walk_chain(backward, meeting);
    assert_eq!(
        tail.last(),
        Some(&goal),
        "backward chain from {} does not reach {}",
        meeting,
        goal
    );
    path.extend(tail.into_iter().skip(1));
    path
}

/// `from`, its parent, its parent's parent, ... up to the root.
fn walk_chain(parents: &ParentMap, from: Position) -> Vec<Position> {
    let mut chain = vec![from];
    let mut current = from;
    while let Some(&Some(previous)) = parents.get(&current) {
        // A chain longer than the map has revisited a cell.
        assert!(
            chain.len() <= parents.len(),
            "parent chain from {} contains a cycle",
            from
        );
        chain.push(previous);
        current = previous;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn parents(entries: &[(Position, Option<Position>)]) -> ParentMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_reconstruct_path_reverses_chain() {
        let map = parents(&[(p(0, 0), None), (p(1, 1), Some(p(0, 0))), (p(2, 2), Some(p(1, 1)))]);
        assert_eq!(reconstruct_path(&map, p(0, 0), p(2, 2)), vec![p(0, 0), p(1, 1), p(2, 2)]);
    }

    #[test]
    #[should_panic(expected = "does not lead back")]
    fn test_reconstruct_path_panics_on_broken_chain() {
        let map = parents(&[(p(0, 0), None), (p(2, 2), Some(p(1, 1)))]);
        reconstruct_path(&map, p(0, 0), p(2, 2));
    }

    #[test]
    #[should_panic(expected = "cycle")]
    fn test_reconstruct_path_panics_on_cycle() {
        let map = parents(&[(p(1, 1), Some(p(2, 2))), (p(2, 2), Some(p(1, 1)))]);
        reconstruct_path(&map, p(0, 0), p(2, 2));
    }

    #[test]
    fn test_stitch_paths_does_not_repeat_meeting_cell() {
        let forward = parents(&[(p(0, 0), None), (p(0, 1), Some(p(0, 0)))]);
        let backward = parents(&[
            (p(0, 3), None),
            (p(0, 2), Some(p(0, 3))),
            (p(0, 1), Some(p(0, 2))),
        ]);
        assert_eq!(
            stitch_paths(&forward, &backward, p(0, 0), p(0, 3), p(0, 1)),
            vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3)]
        );
    }

    #[test]
    fn test_stitch_paths_meeting_at_goal() {
        let forward = parents(&[(p(0, 0), None), (p(0, 1), Some(p(0, 0)))]);
        let backward = parents(&[(p(0, 1), None)]);
        assert_eq!(
            stitch_paths(&forward, &backward, p(0, 0), p(0, 1), p(0, 1)),
            vec![p(0, 0), p(0, 1)]
        );
    }

    #[test]
    fn test_stitch_paths_meeting_at_start() {
        let forward = parents(&[(p(0, 0), None)]);
        let backward = parents(&[
            (p(0, 2), None),
            (p(0, 1), Some(p(0, 2))),
            (p(0, 0), Some(p(0, 1))),
        ]);
        assert_eq!(
            stitch_paths(&forward, &backward, p(0, 0), p(0, 2), p(0, 0)),
            vec![p(0, 0), p(0, 1), p(0, 2)]
        );
    }
}
