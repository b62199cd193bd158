use crate::algorithms::common::{reconstruct_path, SearchAlgorithm, SearchOutcome};
use crate::algorithms::dls::{descend, DepthState, Descent};
use crate::grid::Grid;
use crate::observer::StepObserver;
use crate::runner::Algorithm;

/// Iterative-deepening depth-first search.
///
/// Runs the depth-limited descent with bounds 1, 2, ... up to one less than
/// the number of grid cells. Each iteration starts from an empty state;
/// nothing learned by a shallower iteration is carried over.
#[derive(Debug, Default, Clone, Copy)]
pub struct IterativeDeepening {
    found_at_depth: Option<usize>,
}

impl IterativeDeepening {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth bound of the iteration that reached the goal in the last run.
    pub fn found_at_depth(&self) -> Option<usize> {
        self.found_at_depth
    }
}

impl SearchAlgorithm for IterativeDeepening {
    fn find_path(&mut self, grid: &Grid, observer: &mut dyn StepObserver) -> SearchOutcome {
        self.found_at_depth = None;
        let max_depth = grid.rows * grid.cols;

        for depth in 1..max_depth {
            let mut state = DepthState::new(grid.start);
            match descend(grid, &mut state, grid.start, depth, Algorithm::Iddfs, observer) {
                Descent::Found => {
                    tracing::debug!("IDDFS reached goal with depth bound {}", depth);
                    self.found_at_depth = Some(depth);
                    return SearchOutcome::Found(reconstruct_path(&state.parents, grid.start, grid.goal));
                }
                Descent::NotFound => {
                    tracing::trace!("IDDFS depth {} explored {} cells", depth, state.explored.len());
                }
                Descent::Cancelled => return SearchOutcome::Cancelled,
            }
        }

        SearchOutcome::Exhausted
    }

    fn solution_depth(&self) -> Option<usize> {
        self.found_at_depth
    }
}
