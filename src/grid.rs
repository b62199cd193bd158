use crate::error::{GridError, ParsePositionError, Result};
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::str::FromStr;

/// A cell on the grid, addressed by 0-indexed row and column.
///
/// Ordering is row-major, which is also the tie-break used by uniform-cost
/// search when two frontier entries have the same cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    fn offset(self, (dr, dc): (isize, isize)) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `row,col`, tolerating surrounding whitespace and parentheses.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParsePositionError { input: s.to_string() };
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Position { row, col })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

/// Move offsets in expansion priority order: north, east, south, south-east,
/// west, north-west.
///
/// Only two of the four diagonals are allowed. Because south-east and
/// north-west are inverses of each other the adjacency relation stays
/// symmetric.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [(-1, 0), (0, 1), (1, 0), (1, 1), (0, -1), (-1, -1)];

/// Search configuration: dimensions, walls and the two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub walls: FxHashSet<Position>,
    pub start: Position,
    pub goal: Position,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, start: Position, goal: Position) -> Self {
        Grid {
            rows,
            cols,
            walls: FxHashSet::default(),
            start,
            goal,
        }
    }

    pub fn with_walls<I>(mut self, walls: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Position>,
    {
        self.walls.extend(walls.into_iter().map(Into::into));
        self
    }

    /// Builds a grid with up to `num_walls` randomly placed walls.
    ///
    /// Walls never land on the start or goal. Placement gives up after
    /// `num_walls * 3` attempts or once every other cell is a wall, so a
    /// crowded grid may receive fewer walls than requested. The same seed
    /// always yields the same layout.
    pub fn random(
        rows: usize,
        cols: usize,
        start: Position,
        goal: Position,
        num_walls: usize,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        let mut grid = Grid::new(rows, cols, start, goal);
        if rows == 0 || cols == 0 {
            return grid;
        }

        // Start and goal always stay open.
        let open_cells = rows.saturating_mul(cols).saturating_sub(if start == goal { 1 } else { 2 });
        let target = num_walls.min(open_cells);
        let max_attempts = num_walls.saturating_mul(3);

        let mut attempts = 0;
        while grid.walls.len() < target && attempts < max_attempts {
            let pos = Position {
                row: rng.gen_range(0..rows),
                col: rng.gen_range(0..cols),
            };
            if pos != start && pos != goal {
                grid.walls.insert(pos);
            }
            attempts += 1;
        }
        grid
    }

    /// Checks the invariants every search relies on.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.in_bounds(self.start) {
            return Err(GridError::StartOutOfBounds(self.start));
        }
        if !self.in_bounds(self.goal) {
            return Err(GridError::GoalOutOfBounds(self.goal));
        }
        if let Some(&wall) = self.walls.iter().filter(|w| !self.in_bounds(**w)).min() {
            return Err(GridError::WallOutOfBounds(wall));
        }
        if self.is_wall(self.start) {
            return Err(GridError::StartOnWall(self.start));
        }
        if self.is_wall(self.goal) {
            return Err(GridError::GoalOnWall(self.goal));
        }
        if self.start == self.goal {
            return Err(GridError::StartIsGoal(self.start));
        }
        Ok(())
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_wall(pos)
    }

    /// Traversable neighbors of `pos` in [`NEIGHBOR_OFFSETS`] order.
    ///
    /// The order decides every tie in the searches, so callers must not
    /// reorder the result.
    pub fn get_neighbors(&self, pos: Position) -> Vec<Position> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&d| pos.offset(d))
            .filter(|&n| self.is_open(n))
            .collect()
    }

    /// Whether a single move leads from `from` to `to`.
    pub fn is_adjacent(&self, from: Position, to: Position) -> bool {
        self.is_open(from) && self.get_neighbors(from).contains(&to)
    }

    /// Whether `path` runs from start to goal through adjacent open cells.
    pub fn is_valid_path(&self, path: &[Position]) -> bool {
        path.first() == Some(&self.start)
            && path.last() == Some(&self.goal)
            && path.windows(2).all(|w| self.is_adjacent(w[0], w[1]))
    }

    /// Text picture of the grid, ready to print with `{}`.
    ///
    /// Legend: `S` start, `G` goal, `#` wall, `*` path, a number for the
    /// visitation index of an explored cell, `.` anything else.
    pub fn render<'a>(&'a self, path: &'a [Position], visit_order: &'a FxHashMap<Position, usize>) -> GridPicture<'a> {
        GridPicture {
            grid: self,
            path,
            visit_order,
        }
    }
}

/// Borrowed view of a grid with a path and visit numbering drawn on it.
#[derive(Debug, Clone, Copy)]
pub struct GridPicture<'a> {
    grid: &'a Grid,
    path: &'a [Position],
    visit_order: &'a FxHashMap<Position, usize>,
}

impl GridPicture<'_> {
    fn symbol(&self, pos: Position, on_path: &FxHashSet<Position>) -> String {
        let grid = self.grid;
        if pos == grid.start {
            "S".to_string()
        } else if pos == grid.goal {
            "G".to_string()
        } else if grid.is_wall(pos) {
            "#".to_string()
        } else if on_path.contains(&pos) {
            "*".to_string()
        } else if let Some(index) = self.visit_order.get(&pos) {
            index.to_string()
        } else {
            ".".to_string()
        }
    }
}

impl fmt::Display for GridPicture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid;
        let on_path: FxHashSet<Position> = self.path.iter().copied().collect();
        let widest = self.visit_order.values().max().copied().unwrap_or(0);
        let width = widest.to_string().len().max(grid.cols.saturating_sub(1).to_string().len()).max(2);
        let label_width = grid.rows.saturating_sub(1).to_string().len().max(2);

        write!(f, "{:label_width$} ", "")?;
        for col in 0..grid.cols {
            write!(f, " {:>width$}", col)?;
        }
        writeln!(f)?;

        for row in 0..grid.rows {
            write!(f, "{:>label_width$} ", row)?;
            for col in 0..grid.cols {
                write!(f, " {:>width$}", self.symbol(Position { row, col }, &on_path))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
