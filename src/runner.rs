use crate::algorithms::bfs::BreadthFirst;
use crate::algorithms::bidirectional::Bidirectional;
use crate::algorithms::common::{SearchAlgorithm, SearchOutcome};
use crate::algorithms::dfs::DepthFirst;
use crate::algorithms::dls::DepthLimited;
use crate::algorithms::iddfs::IterativeDeepening;
use crate::algorithms::ucs::UniformCost;
use crate::error::Result;
use crate::grid::Grid;
use crate::observer::{NoopObserver, StepEvent, StepObserver};
use crate::statistics::{optimal_path_length, Statistics};
use clap::ValueEnum;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::ControlFlow;
use std::path::Path;
use std::time::Instant;

/// The available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Dls,
        Algorithm::Iddfs,
        Algorithm::Bidirectional,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Ucs => "UCS",
            Algorithm::Dls => "DLS",
            Algorithm::Iddfs => "IDDFS",
            Algorithm::Bidirectional => "Bidirectional",
        }
    }

    /// Fresh strategy instance configured by `options`.
    pub fn build(self, options: &SearchOptions) -> Box<dyn SearchAlgorithm> {
        match self {
            Algorithm::Bfs => Box::new(BreadthFirst::new()),
            Algorithm::Dfs => Box::new(DepthFirst::new()),
            Algorithm::Ucs => Box::new(UniformCost::new()),
            Algorithm::Dls => Box::new(DepthLimited::new(options.depth_limit)),
            Algorithm::Iddfs => Box::new(IterativeDeepening::new()),
            Algorithm::Bidirectional => Box::new(Bidirectional::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-run settings that are not part of the grid itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Depth bound for depth-limited search; `None` uses the grid-sized
    /// default.
    pub depth_limit: Option<usize>,
}

/// Result of one strategy on one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub outcome: SearchOutcome,
    pub statistics: Statistics,
}

/// Counts steps on their way to the caller's observer.
struct Counting<'o> {
    inner: &'o mut dyn StepObserver,
    steps: usize,
    cells_explored: usize,
}

impl StepObserver for Counting<'_> {
    fn on_step(&mut self, event: &StepEvent<'_>) -> ControlFlow<()> {
        self.steps += 1;
        self.cells_explored = event.explored.len();
        self.inner.on_step(event)
    }
}

/// Validates `grid` and runs one strategy on it.
///
/// No step is reported for an invalid grid.
pub fn run(
    algorithm: Algorithm,
    grid: &Grid,
    options: &SearchOptions,
    observer: &mut dyn StepObserver,
) -> Result<RunReport> {
    grid.validate()?;
    tracing::debug!(
        "Running {} on {}x{} grid from {} to {} with {} walls",
        algorithm,
        grid.rows,
        grid.cols,
        grid.start,
        grid.goal,
        grid.walls.len()
    );

    let mut strategy = algorithm.build(options);
    let mut counting = Counting {
        inner: observer,
        steps: 0,
        cells_explored: 0,
    };

    let started = Instant::now();
    let outcome = strategy.find_path(grid, &mut counting);
    let elapsed = started.elapsed();

    match &outcome {
        SearchOutcome::Found(path) => tracing::debug!("{} found a path of {} cells", algorithm, path.len()),
        SearchOutcome::Exhausted => tracing::debug!("{} exhausted without reaching the goal", algorithm),
        SearchOutcome::Cancelled => tracing::info!("{} cancelled after {} steps", algorithm, counting.steps),
    }

    let statistics = Statistics {
        steps: counting.steps,
        cells_explored: counting.cells_explored,
        path_length: outcome.path().map(|path| path.len() - 1),
        optimal_path_length: optimal_path_length(grid),
        solution_depth: strategy.solution_depth(),
        elapsed,
    };

    Ok(RunReport {
        algorithm,
        outcome,
        statistics,
    })
}

/// Runs every strategy on the same grid, in [`Algorithm::ALL`] order.
pub fn run_all(grid: &Grid, options: &SearchOptions) -> Result<Vec<RunReport>> {
    grid.validate()?;
    Algorithm::ALL
        .iter()
        .map(|&algorithm| run(algorithm, grid, options, &mut NoopObserver))
        .collect()
}

fn outcome_label(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::Found(_) => "found",
        SearchOutcome::Exhausted => "no path",
        SearchOutcome::Cancelled => "cancelled",
    }
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Prints a side-by-side table of several runs.
pub fn print_comparison_results(results: &[RunReport]) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    println!();
    println!(
        "{:<15} {:<10} {:<8} {:<8} {:<10} {:<10} {:<12}",
        "Algorithm", "Outcome", "Moves", "Optimal", "Steps", "Explored", "Time"
    );
    println!("{}", "-".repeat(77));

    for result in results {
        let stats = &result.statistics;
        println!(
            "{:<15} {:<10} {:<8} {:<8} {:<10} {:<10} {:<12}",
            result.algorithm.label(),
            outcome_label(&result.outcome),
            or_dash(stats.path_length),
            or_dash(stats.optimal_path_length),
            stats.steps,
            stats.cells_explored,
            format!("{:.2?}", stats.elapsed)
        );
    }

    println!();
    let found: Vec<&RunReport> = results.iter().filter(|r| r.outcome.is_found()).collect();
    if found.is_empty() {
        println!("No algorithm reached the goal.");
        return;
    }

    println!("=== PERFORMANCE ANALYSIS ===");
    if let Some(shortest) = found.iter().min_by_key(|r| r.statistics.path_length) {
        println!(
            "Shortest path: {} ({} moves)",
            shortest.algorithm,
            or_dash(shortest.statistics.path_length)
        );
    }
    if let Some(leanest) = found.iter().min_by_key(|r| r.statistics.cells_explored) {
        println!(
            "Fewest cells explored: {} ({} cells)",
            leanest.algorithm, leanest.statistics.cells_explored
        );
    }
    if let Some(fastest) = found.iter().min_by_key(|r| r.statistics.elapsed) {
        println!("Fastest: {} ({:.2?})", fastest.algorithm, fastest.statistics.elapsed);
    }
}

/// Writes one CSV row per run, with a header line.
pub fn write_csv(results: &[RunReport], path: &Path) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(
        file,
        "algorithm,outcome,path_length,optimal_path_length,steps,cells_explored,solution_depth,elapsed_us"
    )?;
    for result in results {
        let stats = &result.statistics;
        writeln!(
            file,
            "{},{},{},{},{},{},{},{}",
            result.algorithm.label(),
            outcome_label(&result.outcome),
            stats.path_length.map(|v| v.to_string()).unwrap_or_default(),
            stats.optimal_path_length.map(|v| v.to_string()).unwrap_or_default(),
            stats.steps,
            stats.cells_explored,
            stats.solution_depth.map(|v| v.to_string()).unwrap_or_default(),
            stats.elapsed.as_micros()
        )?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::grid::Position;
    use crate::observer::{StepBudget, StepRecorder};

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_run_rejects_invalid_grid_before_any_step() {
        let grid = Grid::new(3, 3, p(0, 0), p(0, 0));
        for algorithm in Algorithm::ALL {
            let mut recorder = StepRecorder::new();
            let result = run(algorithm, &grid, &SearchOptions::default(), &mut recorder);
            assert_eq!(result, Err(GridError::StartIsGoal(p(0, 0))));
            assert!(recorder.steps.is_empty());
        }
    }

    #[test]
    fn test_run_fills_statistics() {
        let grid = Grid::new(3, 3, p(0, 0), p(2, 2));
        let mut recorder = StepRecorder::new();
        let report = run(Algorithm::Bfs, &grid, &SearchOptions::default(), &mut recorder).unwrap();

        assert_eq!(report.outcome, SearchOutcome::Found(vec![p(0, 0), p(1, 1), p(2, 2)]));
        assert_eq!(report.statistics.steps, recorder.steps.len());
        assert_eq!(report.statistics.path_length, Some(2));
        assert_eq!(report.statistics.optimal_path_length, Some(2));
        assert_eq!(report.statistics.solution_depth, None);
    }

    #[test]
    fn test_run_reports_iddfs_depth() {
        let grid = Grid::new(3, 3, p(0, 0), p(2, 2));
        let report = run(Algorithm::Iddfs, &grid, &SearchOptions::default(), &mut NoopObserver).unwrap();
        assert_eq!(report.statistics.solution_depth, Some(3));
    }

    #[test]
    fn test_run_passes_depth_limit_to_dls() {
        let grid = Grid::new(1, 5, p(0, 0), p(0, 4));
        let options = SearchOptions { depth_limit: Some(2) };
        let report = run(Algorithm::Dls, &grid, &options, &mut NoopObserver).unwrap();
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
    }

    #[test]
    fn test_run_cancellation() {
        let grid = Grid::new(10, 10, p(0, 0), p(9, 9));
        for algorithm in Algorithm::ALL {
            let mut budget = StepBudget::new(1);
            let report = run(algorithm, &grid, &SearchOptions::default(), &mut budget).unwrap();
            assert_eq!(report.outcome, SearchOutcome::Cancelled, "{}", algorithm);
            assert_eq!(report.statistics.steps, 1);
        }
    }

    #[test]
    fn test_run_all_order_and_labels() {
        let grid = Grid::new(4, 4, p(0, 0), p(3, 3));
        let reports = run_all(&grid, &SearchOptions::default()).unwrap();
        let labels: Vec<&str> = reports.iter().map(|r| r.algorithm.label()).collect();
        assert_eq!(labels, ["BFS", "DFS", "UCS", "DLS", "IDDFS", "Bidirectional"]);
        assert!(reports.iter().all(|r| r.outcome.is_found()));
    }

    #[test]
    fn test_concurrent_runs_share_grid() {
        let grid = Grid::new(8, 8, p(0, 0), p(7, 7)).with_walls([p(3, 3), p(4, 4)]);
        let options = SearchOptions::default();
        let (bfs, bidirectional) = std::thread::scope(|scope| {
            let a = scope.spawn(|| run(Algorithm::Bfs, &grid, &options, &mut NoopObserver));
            let b = scope.spawn(|| run(Algorithm::Bidirectional, &grid, &options, &mut NoopObserver));
            (a.join().unwrap(), b.join().unwrap())
        });
        assert!(bfs.unwrap().outcome.is_found());
        assert!(bidirectional.unwrap().outcome.is_found());
    }

    #[test]
    fn test_write_csv() {
        let grid = Grid::new(3, 3, p(0, 0), p(2, 2));
        let reports = run_all(&grid, &SearchOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_csv(&reports, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("algorithm,outcome"));
        assert!(lines[1].starts_with("BFS,found,2,2,"));
        assert!(lines[5].starts_with("IDDFS,found,3,2,"));
    }
}
