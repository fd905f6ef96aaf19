#![forbid(unsafe_code)]

//! Occupancy matrix backing the grid-space allocator.
//!
//! The matrix has a fixed number of rows and a column count that only grows.
//! Cells are stored column-major (`col * rows + row`) in one flat buffer, so
//! appending a column is a single contiguous extend and never reshuffles
//! existing cells.
//!
//! # Invariants
//!
//! 1. `rows >= 1` and `columns >= 1` at all times.
//! 2. `cells.len() == rows * columns` (the matrix is rectangular).
//! 3. Cells only move from free to occupied; there is no release path.

use serde::{Deserialize, Serialize};

use crate::geometry::GridArea;

/// Glyph used for a free cell in [`OccupancySnapshot`] rows.
pub const FREE_GLYPH: char = '.';
/// Glyph used for an occupied cell in [`OccupancySnapshot`] rows.
pub const OCCUPIED_GLYPH: char = '#';

/// Growable boolean grid; `true` marks a free cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create a grid with `rows` rows and a single free column.
    ///
    /// A zero row count is clamped to 1.
    #[must_use]
    pub fn new(rows: usize) -> Self {
        let rows = rows.max(1);
        Self {
            rows,
            columns: 1,
            cells: vec![true; rows],
        }
    }

    /// Fixed number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Current number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        col * self.rows + row
    }

    /// Whether the cell at `(row, col)` is free. Out-of-range cells are not.
    #[inline]
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns && self.cells[self.index(row, col)]
    }

    /// Whether every cell of `area` lies inside the grid and is free.
    pub fn is_area_free(&self, area: &GridArea) -> bool {
        if area.end_row() > self.rows || area.end_col() > self.columns {
            return false;
        }
        (area.col..area.end_col()).all(|col| {
            let start = self.index(area.row, col);
            self.cells[start..start + area.rowspan].iter().all(|&free| free)
        })
    }

    /// Whether every cell of column `col` is free.
    pub fn is_column_free(&self, col: usize) -> bool {
        if col >= self.columns {
            return false;
        }
        let start = self.index(0, col);
        self.cells[start..start + self.rows].iter().all(|&free| free)
    }

    /// Whether `row` is free from `col` through the last column.
    pub fn is_row_free_from(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns && (col..self.columns).all(|c| self.is_free(row, c))
    }

    /// Number of free cells.
    pub fn free_cells(&self) -> usize {
        self.cells.iter().filter(|&&free| free).count()
    }

    /// Append `count` columns whose cells are all free.
    pub(crate) fn push_free_columns(&mut self, count: usize) {
        self.cells.resize(self.cells.len() + count * self.rows, true);
        self.columns += count;
    }

    /// Mark every cell of `area` occupied.
    ///
    /// The area must lie inside the grid; the allocator only ever passes
    /// areas it has bounds-checked or grown the grid to hold.
    pub(crate) fn occupy(&mut self, area: &GridArea) {
        debug_assert!(area.end_row() <= self.rows, "area rows out of bounds");
        debug_assert!(area.end_col() <= self.columns, "area cols out of bounds");
        for col in area.col..area.end_col() {
            let start = self.index(area.row, col);
            self.cells[start..start + area.rowspan].fill(false);
        }
    }

    /// Capture the grid as printable rows.
    #[must_use]
    pub fn snapshot(&self) -> OccupancySnapshot {
        let cells: Vec<String> = (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|col| {
                        if self.is_free(row, col) {
                            FREE_GLYPH
                        } else {
                            OCCUPIED_GLYPH
                        }
                    })
                    .collect::<String>()
            })
            .collect();
        OccupancySnapshot {
            rows: self.rows,
            columns: self.columns,
            cells,
        }
    }
}

/// Serializable picture of an [`OccupancyGrid`].
///
/// Each entry of `cells` is one row, rendered with [`FREE_GLYPH`] and
/// [`OCCUPIED_GLYPH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<String>,
}
