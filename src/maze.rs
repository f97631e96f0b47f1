use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::{Grid, IndexTuples};

/// Classification of one angle tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Free,
    Wall,
    Goal,
    /// Free cell holding the arm's initial configuration.
    Start,
}

impl Cell {
    pub const fn as_char(self) -> char {
        match self {
            Cell::Free => ' ',
            Cell::Wall => '%',
            Cell::Goal => '.',
            Cell::Start => 'P',
        }
    }

    pub const fn from_char(c: char) -> Option<Cell> {
        match c {
            ' ' => Some(Cell::Free),
            '%' => Some(Cell::Wall),
            '.' => Some(Cell::Goal),
            'P' => Some(Cell::Start),
            _ => None,
        }
    }

    /// Start counts as free.
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, Cell::Free | Cell::Start)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub free: usize,
    pub wall: usize,
    pub goal: usize,
    pub start: usize,
}

/// Discretized configuration space handed to the planner.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    grid: Grid<Cell>,
    offsets: Vec<i32>,
    granularity: i32,
}

impl Maze {
    /// `offsets` holds the lower angle limit of each axis.
    pub fn new(grid: Grid<Cell>, offsets: Vec<i32>, granularity: i32) -> Result<Self> {
        if granularity <= 0 {
            return Err(Error::InvalidGranularity(granularity));
        }
        if offsets.len() != grid.dims().len() {
            return Err(Error::AngleCount {
                expected: grid.dims().len(),
                got: offsets.len(),
            });
        }
        Ok(Self {
            grid,
            offsets,
            granularity,
        })
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.grid.dims()
    }

    #[inline]
    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    #[inline]
    pub fn granularity(&self) -> i32 {
        self.granularity
    }

    #[inline]
    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// `None` outside the grid.
    pub fn get(&self, index: &[usize]) -> Option<Cell> {
        self.grid.contains(index).then(|| self.grid.get(index))
    }

    pub fn index_to_angles(&self, index: &[usize]) -> Vec<i32> {
        index
            .iter()
            .zip(&self.offsets)
            .map(|(&i, &min)| i as i32 * self.granularity + min)
            .collect()
    }

    /// `None` if any angle maps outside the grid.
    pub fn angles_to_index(&self, angles: &[i32]) -> Option<Vec<usize>> {
        if angles.len() != self.offsets.len() {
            return None;
        }
        let index: Vec<usize> = angles
            .iter()
            .zip(&self.offsets)
            .map(|(&a, &min)| usize::try_from((a - min).div_euclid(self.granularity)).ok())
            .collect::<Option<_>>()?;
        self.grid.contains(&index).then_some(index)
    }

    pub fn start(&self) -> Option<Vec<usize>> {
        self.grid
            .data
            .iter()
            .position(|&c| c == Cell::Start)
            .map(|flat| self.grid.unravel(flat))
    }

    /// Indices of every goal cell, in row-major order.
    pub fn objectives(&self) -> Vec<Vec<usize>> {
        IndexTuples::new(self.dims())
            .zip(&self.grid.data)
            .filter(|(_, c)| **c == Cell::Goal)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for c in &self.grid.data {
            match c {
                Cell::Free => counts.free += 1,
                Cell::Wall => counts.wall += 1,
                Cell::Goal => counts.goal += 1,
                Cell::Start => counts.start += 1,
            }
        }
        counts
    }

    /// One line per row. Columns are the last axis, rows the remaining axes
    /// flattened in row-major order.
    pub fn to_text(&self) -> String {
        let cols = self.dims().last().copied().unwrap_or(1).max(1);
        let mut out = String::with_capacity(self.grid.len() + self.grid.len() / cols);
        for row in self.grid.data.chunks(cols) {
            out.extend(row.iter().map(|c| c.as_char()));
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    /// Parse the two-axis text form back into a maze.
    pub fn from_text(text: &str, offsets: [i32; 2], granularity: i32) -> Result<Self> {
        let rows: Vec<&str> = text.lines().collect();
        let cols = rows.first().map_or(0, |r| r.chars().count());
        if rows.is_empty() || cols == 0 {
            return Err(Error::MazeFormat("empty maze".into()));
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            let before = data.len();
            for (c, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or_else(|| {
                    Error::MazeFormat(format!("unknown cell {ch:?} at row {r}, column {c}"))
                })?;
                data.push(cell);
            }
            if data.len() - before != cols {
                return Err(Error::MazeFormat(format!(
                    "row {r} has {} cells, expected {cols}",
                    data.len() - before
                )));
            }
        }
        let grid = Grid::from_data(&[rows.len(), cols], data)
            .ok_or_else(|| Error::MazeFormat("cell count mismatch".into()))?;
        Self::new(grid, offsets.to_vec(), granularity)
    }

    pub fn load(path: &Path, offsets: [i32; 2], granularity: i32) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text, offsets, granularity)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
