use crate::grid::{Grid, Position};
use pathfinding::prelude::bfs;
use std::fmt;
use std::time::Duration;

/// Figures collected while one strategy ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    /// Steps reported to the observer.
    pub steps: usize,
    /// Size of the explored set in the last step.
    pub cells_explored: usize,
    /// Moves on the returned path, if one was found.
    pub path_length: Option<usize>,
    /// Fewest moves any path could take, if the goal is reachable.
    pub optimal_path_length: Option<usize>,
    /// Depth bound that succeeded, for iterative deepening.
    pub solution_depth: Option<usize>,
    pub elapsed: Duration,
}

impl Statistics {
    /// Returned path length divided by the optimal one; 1.0 is optimal.
    pub fn route_efficiency(&self) -> Option<f64> {
        match (self.path_length, self.optimal_path_length) {
            (Some(taken), Some(optimal)) if optimal > 0 => Some(taken as f64 / optimal as f64),
            _ => None,
        }
    }

    pub fn extra_moves(&self) -> Option<usize> {
        Some(self.path_length?.saturating_sub(self.optimal_path_length?))
    }
}

/// Fewest moves from start to goal, computed independently of the search
/// strategies with the `pathfinding` crate.
pub fn optimal_path_length(grid: &Grid) -> Option<usize> {
    shortest_reference_path(grid).map(|path| path.len() - 1)
}

/// A shortest start-to-goal path under the same neighbor rule.
pub fn shortest_reference_path(grid: &Grid) -> Option<Vec<Position>> {
    bfs(&grid.start, |p| grid.get_neighbors(*p), |p| *p == grid.goal)
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps reported: {}", self.steps)?;
        writeln!(f, "Cells explored: {}", self.cells_explored)?;
        match self.path_length {
            Some(moves) => writeln!(f, "Path length: {} moves", moves)?,
            None => writeln!(f, "Path length: -")?,
        }
        match self.optimal_path_length {
            Some(moves) => writeln!(f, "Optimal path length: {} moves", moves)?,
            None => writeln!(f, "Optimal path length: unreachable")?,
        }
        if let Some(depth) = self.solution_depth {
            writeln!(f, "Solved at depth bound: {}", depth)?;
        }
        if let Some(efficiency) = self.route_efficiency() {
            writeln!(f, "Route efficiency: {:.3}", efficiency)?;
            if let Some(extra) = self.extra_moves().filter(|&extra| extra > 0) {
                writeln!(f, "Extra moves over optimal: {}", extra)?;
            }
        }
        writeln!(f, "Search time: {:.2?}", self.elapsed)?;
        Ok(())
    }
}
