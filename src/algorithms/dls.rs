use crate::algorithms::common::{reconstruct_path, ParentMap, SearchAlgorithm, SearchOutcome};
use crate::grid::{Grid, Position};
use crate::observer::{StepEvent, StepObserver};
use crate::runner::Algorithm;
use rustc_hash::FxHashSet;

/// Default depth bound per grid cell.
const DEPTH_PER_CELL: usize = 4;

/// Depth bound used when none is configured: four moves per grid cell.
pub fn default_depth_limit(grid: &Grid) -> usize {
    grid.rows.saturating_mul(grid.cols).saturating_mul(DEPTH_PER_CELL)
}

/// Parent pointers and explored set for one depth-bounded descent.
///
/// The explored set is shared by all branches of the descent: a cell
/// reached once is never entered again, even through a shallower branch.
#[derive(Debug, Default)]
pub(crate) struct DepthState {
    pub(crate) parents: ParentMap,
    pub(crate) explored: FxHashSet<Position>,
}

impl DepthState {
    pub(crate) fn new(root: Position) -> Self {
        let mut state = DepthState::default();
        state.parents.insert(root, None);
        state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Descent {
    Found,
    NotFound,
    Cancelled,
}

/// One cell on the descent stack, with the neighbors it has yet to try.
#[derive(Debug)]
struct Frame {
    node: Position,
    depth: usize,
    neighbors: Vec<Position>,
    next: usize,
}

/// Visits `root` and, while depth remains, its unexplored neighbors.
///
/// Every visit is reported as one step with an empty frontier. The walk
/// keeps its own stack of frames, so its depth is bounded by memory rather
/// than by the thread's call stack.
pub(crate) fn descend(
    grid: &Grid,
    state: &mut DepthState,
    root: Position,
    depth: usize,
    algorithm: Algorithm,
    observer: &mut dyn StepObserver,
) -> Descent {
    let mut stack: Vec<Frame> = Vec::new();
    let mut pending = Some((root, depth));

    loop {
        if let Some((node, depth)) = pending.take() {
            state.explored.insert(node);
            let event = StepEvent {
                algorithm,
                frontier: &[],
                explored: &state.explored,
            };
            if observer.on_step(&event).is_break() {
                return Descent::Cancelled;
            }

            if node == grid.goal {
                return Descent::Found;
            }
            if depth > 0 {
                stack.push(Frame {
                    node,
                    depth,
                    neighbors: grid.get_neighbors(node),
                    next: 0,
                });
            }
        }

        let Some(frame) = stack.last_mut() else {
            return Descent::NotFound;
        };
        match frame.neighbors.get(frame.next).copied() {
            Some(neighbor) => {
                frame.next += 1;
                // An earlier sibling's subtree may have reached this cell already.
                if state.explored.contains(&neighbor) {
                    continue;
                }
                state.parents.insert(neighbor, Some(frame.node));
                pending = Some((neighbor, frame.depth - 1));
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Depth-first search that gives up on a branch after `limit` moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthLimited {
    limit: Option<usize>,
}

impl DepthLimited {
    /// `None` selects [`default_depth_limit`] for each grid searched.
    pub fn new(limit: Option<usize>) -> Self {
        DepthLimited { limit }
    }

    pub fn limit_for(&self, grid: &Grid) -> usize {
        self.limit.unwrap_or_else(|| default_depth_limit(grid))
    }
}

impl SearchAlgorithm for DepthLimited {
    fn find_path(&mut self, grid: &Grid, observer: &mut dyn StepObserver) -> SearchOutcome {
        let limit = self.limit_for(grid);
        tracing::debug!("DLS searching with depth limit {}", limit);

        let mut state = DepthState::new(grid.start);
        match descend(grid, &mut state, grid.start, limit, Algorithm::Dls, observer) {
            Descent::Found => {
                SearchOutcome::Found(reconstruct_path(&state.parents, grid.start, grid.goal))
            }
            Descent::NotFound => SearchOutcome::Exhausted,
            Descent::Cancelled => SearchOutcome::Cancelled,
        }
    }
}
