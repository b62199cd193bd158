//! Grid pathfinding with observable, step-by-step search strategies.
//!
//! A [`Grid`] describes the search problem. [`runner::run`] validates it,
//! runs one [`Algorithm`] and reports every expansion to a
//! [`StepObserver`](observer::StepObserver).
//!
//! ```
//! use stepwise_pathfinding::{run, Algorithm, Grid, Position, SearchOptions};
//! use stepwise_pathfinding::observer::VisitOrder;
//!
//! let grid = Grid::new(3, 3, Position::new(0, 0), Position::new(2, 2));
//! let mut visits = VisitOrder::new();
//! let report = run(Algorithm::Bfs, &grid, &SearchOptions::default(), &mut visits).unwrap();
//!
//! assert_eq!(report.outcome.path().unwrap().len(), 3);
//! assert_eq!(visits.index_of(Position::new(0, 0)), Some(1));
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod observer;
pub mod runner;
pub mod statistics;

pub use algorithms::common::{SearchAlgorithm, SearchOutcome};
pub use error::GridError;
pub use grid::{Grid, Position};
pub use runner::{run, run_all, Algorithm, RunReport, SearchOptions};
