use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stepwise_pathfinding::config::{Config, Selection};
use stepwise_pathfinding::observer::{NoopObserver, StepBudget, StepObserver, Tee, VisitOrder};
use stepwise_pathfinding::runner::{self, print_comparison_results, write_csv, RunReport};
use stepwise_pathfinding::{Grid, SearchOutcome};

fn main() {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into()))
        .init();

    let grid = match config.build_grid() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid grid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if !config.quiet {
        println!("Grid size: {}x{}", grid.rows, grid.cols);
        println!("Start: {}, Goal: {}, Walls: {}", grid.start, grid.goal, grid.walls.len());
        if let Some(seed) = config.seed {
            println!("Wall seed: {} (for reproducibility)", seed);
        }
        println!();
    }

    let reports = match config.algorithm {
        Selection::One(algorithm) => {
            let mut visits = VisitOrder::new();
            let result = match config.max_steps {
                Some(limit) => run_observed(&config, &grid, algorithm, Tee(&mut visits, StepBudget::new(limit as usize))),
                None => run_observed(&config, &grid, algorithm, &mut visits),
            };
            match result {
                Ok(report) => {
                    print_single_result(&config, &grid, &report, &visits);
                    vec![report]
                }
                Err(e) => {
                    eprintln!("Search failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Selection::All => match run_all_observed(&config, &grid) {
            Ok(reports) => {
                if !config.quiet {
                    print_comparison_results(&reports);
                }
                reports
            }
            Err(e) => {
                eprintln!("Error running all algorithms: {}", e);
                std::process::exit(1);
            }
        },
    };

    if let Some(path) = &config.output_csv {
        if let Err(e) = write_csv(&reports, path) {
            eprintln!("Failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
        if !config.quiet {
            println!("Results written to {}", path.display());
        }
    }
}

fn run_observed(
    config: &Config,
    grid: &Grid,
    algorithm: runner::Algorithm,
    mut observer: impl StepObserver,
) -> stepwise_pathfinding::error::Result<RunReport> {
    runner::run(algorithm, grid, &config.search_options(), &mut observer)
}

/// Like [`runner::run_all`] but honouring `--max-steps` for every run.
fn run_all_observed(config: &Config, grid: &Grid) -> stepwise_pathfinding::error::Result<Vec<RunReport>> {
    runner::Algorithm::ALL
        .iter()
        .map(|&algorithm| match config.max_steps {
            Some(limit) => run_observed(config, grid, algorithm, StepBudget::new(limit as usize)),
            None => run_observed(config, grid, algorithm, NoopObserver),
        })
        .collect()
}

fn print_single_result(config: &Config, grid: &Grid, report: &RunReport, visits: &VisitOrder) {
    if config.quiet {
        return;
    }

    println!("=== {} ===", report.algorithm);
    if !config.no_visualization {
        println!("Legend: S=Start, G=Goal, #=Wall, *=Path, n=visit order, .=Unvisited");
        let path = report.outcome.path().unwrap_or(&[]);
        print!("{}", grid.render(path, visits.as_map()));
        println!();
    }

    match &report.outcome {
        SearchOutcome::Found(path) => {
            let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
            println!("SUCCESS: path found");
            println!("Path: {}", cells.join(" -> "));
        }
        SearchOutcome::Exhausted => println!("NO PATH: goal is not reachable"),
        SearchOutcome::Cancelled => println!("CANCELLED: step limit reached before the goal"),
    }
    println!();
    print!("{}", report.statistics);
}
