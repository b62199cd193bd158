use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::runner::{Algorithm, SearchOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which strategies a single invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    One(Algorithm),
    All,
}

fn parse_selection(value: &str) -> std::result::Result<Selection, String> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }
    Algorithm::from_str(value, true)
        .map(Selection::One)
        .map_err(|_| format!("unknown algorithm '{}': expected bfs, dfs, ucs, dls, iddfs, bidirectional or all", value))
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Step-by-step grid pathfinding", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    /// Start cell as row,col
    #[arg(long, default_value = "0,0")]
    pub start: Position,

    /// Goal cell as row,col; defaults to the bottom-right corner
    #[arg(long)]
    pub goal: Option<Position>,

    /// Blocked cell as row,col; repeat for more walls
    #[arg(long = "wall", value_name = "ROW,COL")]
    pub walls: Vec<Position>,

    /// Number of additional walls to place at random
    #[arg(long, default_value_t = 0)]
    pub random_walls: usize,

    /// Seed for random wall placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// bfs, dfs, ucs, dls, iddfs, bidirectional or all
    #[arg(long, default_value = "bfs", value_parser = parse_selection)]
    pub algorithm: Selection,

    /// Depth bound for dls; defaults to rows * cols * 4
    #[arg(long)]
    pub depth_limit: Option<usize>,

    /// Abort a run after this many steps
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_steps: Option<u64>,

    /// Only print the summary, not the grid
    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Write per-algorithm results to this CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Config {
    pub fn goal(&self) -> Position {
        self.goal.unwrap_or(Position {
            row: self.rows.saturating_sub(1),
            col: self.cols.saturating_sub(1),
        })
    }

    /// Builds and validates the grid described by the flags.
    ///
    /// Explicit walls are added on top of any random ones.
    pub fn build_grid(&self) -> Result<Grid> {
        let grid = if self.random_walls > 0 {
            Grid::random(self.rows, self.cols, self.start, self.goal(), self.random_walls, self.seed)
        } else {
            Grid::new(self.rows, self.cols, self.start, self.goal())
        };
        let grid = grid.with_walls(self.walls.iter().copied());
        grid.validate()?;
        Ok(grid)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            depth_limit: self.depth_limit,
        }
    }

    /// Log filter implied by `-v`/`-q`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
