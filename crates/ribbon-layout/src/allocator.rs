#![forbid(unsafe_code)]

//! Grid-space allocator for ribbon panels.
//!
//! A panel has a fixed number of rows and grows to the right as items are
//! added. Each request asks for a `row_span x col_span` block; the allocator
//! finds room for it in the existing columns or appends new ones.
//!
//! # Placement modes
//!
//! - [`PlacementMode::ColumnWise`] scans every candidate top-left corner,
//!   smallest row first, then smallest column, and takes the first block
//!   that is entirely free.
//! - [`PlacementMode::RowWise`] looks at row 0 only and appends after the
//!   last occupied cell of that row. Only row 0 is reserved, whatever the
//!   requested row span.
//!
//! When nothing fits, the grid grows. If the current last column is entirely
//! free it becomes the first column of the new block, so one fewer column is
//! appended.
//!
//! # Invariants
//!
//! 1. A returned block was free before the call and is occupied after it.
//! 2. `column_count` never decreases; `row_count` never changes.
//! 3. Cells are never released.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Row span too large | `row_span > row_count` | `Err(InvalidSpanError)`, grid untouched |
//! | Zero span | `row_span == 0` or `col_span == 0` | Clamped to 1 |
//!
//! # Example
//!
//! ```
//! use ribbon_layout::allocator::{GridSpaceAllocator, Placement, PlacementMode};
//!
//! let mut grid = GridSpaceAllocator::new(6);
//! let first = grid.request_cells(2, 1, PlacementMode::ColumnWise)?;
//! let second = grid.request_cells(2, 1, PlacementMode::ColumnWise)?;
//! assert_eq!(first, Placement::new(0, 0));
//! assert_eq!(second, Placement::new(2, 0));
//! assert_eq!(grid.column_count(), 1);
//! # Ok::<(), ribbon_layout::InvalidSpanError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::InvalidSpanError;
use crate::geometry::GridArea;
use crate::occupancy::{OccupancyGrid, OccupancySnapshot};

/// Strategy used to look for free space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Fill existing columns top to bottom before growing.
    #[default]
    ColumnWise,
    /// Append along row 0.
    RowWise,
}

impl PlacementMode {
    /// Parse a mode name (`column`, `columnwise`, `column_wise`, `row`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "column" | "columnwise" | "column_wise" | "column-wise" => Some(Self::ColumnWise),
            "row" | "rowwise" | "row_wise" | "row-wise" => Some(Self::RowWise),
            _ => None,
        }
    }
}

/// A single placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub row_span: usize,
    pub col_span: usize,
    #[serde(default)]
    pub mode: PlacementMode,
}

impl PlacementRequest {
    /// A column-wise request.
    #[must_use]
    pub fn new(row_span: usize, col_span: usize) -> Self {
        Self {
            row_span,
            col_span,
            mode: PlacementMode::ColumnWise,
        }
    }

    /// Same spans, different mode.
    #[must_use]
    pub fn mode(mut self, mode: PlacementMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Top-left corner of a reserved block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
}

impl Placement {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The block anchored at this corner with the given spans.
    #[inline]
    #[must_use]
    pub fn area(self, rowspan: usize, colspan: usize) -> GridArea {
        GridArea::span(self.row, self.col, rowspan, colspan)
    }
}

/// Packs rectangular requests into a grid of fixed height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSpaceAllocator {
    grid: OccupancyGrid,
}

impl GridSpaceAllocator {
    /// Create an allocator with `row_count` rows and one free column.
    ///
    /// A zero row count is clamped to 1.
    #[must_use]
    pub fn new(row_count: usize) -> Self {
        if row_count == 0 {
            warn!("grid allocator created with zero rows; using 1");
        }
        Self {
            grid: OccupancyGrid::new(row_count),
        }
    }

    /// Fixed number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    /// Current number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    /// Whether the cell at `(row, col)` is free.
    #[inline]
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.grid.is_free(row, col)
    }

    /// Number of free cells.
    pub fn free_cells(&self) -> usize {
        self.grid.free_cells()
    }

    /// Borrow the occupancy matrix.
    #[inline]
    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Printable picture of the current occupancy.
    #[must_use]
    pub fn snapshot(&self) -> OccupancySnapshot {
        self.grid.snapshot()
    }

    /// Reserve a block described by `request`.
    pub fn request(&mut self, request: PlacementRequest) -> Result<Placement, InvalidSpanError> {
        self.request_cells(request.row_span, request.col_span, request.mode)
    }

    /// Reserve a `row_span x col_span` block and return its top-left corner.
    ///
    /// Fails without touching the grid when `row_span` exceeds the row count.
    pub fn request_cells(
        &mut self,
        row_span: usize,
        col_span: usize,
        mode: PlacementMode,
    ) -> Result<Placement, InvalidSpanError> {
        let rows = self.grid.row_count();
        if row_span > rows {
            debug!(row_span, row_count = rows, "placement rejected");
            return Err(InvalidSpanError {
                row_span,
                row_count: rows,
            });
        }
        if row_span == 0 || col_span == 0 {
            warn!(row_span, col_span, "zero span requested; clamping to 1");
        }
        let row_span = row_span.max(1);
        let col_span = col_span.max(1);
        let columns_before = self.grid.column_count();

        let found = match mode {
            PlacementMode::ColumnWise => self.fit_column_wise(row_span, col_span),
            PlacementMode::RowWise => self.fit_row_wise(col_span),
        };
        let placement = match found {
            Some(placement) => placement,
            None => self.grow(row_span, col_span),
        };

        trace!(
            ?mode,
            row_span,
            col_span,
            row = placement.row,
            col = placement.col,
            grew = self.grid.column_count() - columns_before,
            "cells reserved"
        );
        Ok(placement)
    }

    /// First free block inside the current bounds, row-major order.
    fn fit_column_wise(&mut self, row_span: usize, col_span: usize) -> Option<Placement> {
        let rows = self.grid.row_count();
        let columns = self.grid.column_count();
        if col_span > columns {
            return None;
        }
        for row in 0..=rows - row_span {
            for col in 0..=columns - col_span {
                let area = GridArea::span(row, col, row_span, col_span);
                if self.grid.is_area_free(&area) {
                    self.grid.occupy(&area);
                    return Some(Placement::new(row, col));
                }
            }
        }
        None
    }

    /// Append along row 0 after its last occupied cell, widening as needed.
    fn fit_row_wise(&mut self, col_span: usize) -> Option<Placement> {
        let columns = self.grid.column_count();
        let col = (0..columns).find(|&col| self.grid.is_row_free_from(0, col))?;

        let trailing = columns - col;
        if trailing < col_span {
            self.grid.push_free_columns(col_span - trailing);
        }
        // Row 0 only, regardless of the requested row span.
        self.grid.occupy(&GridArea::span(0, col, 1, col_span));
        Some(Placement::new(0, col))
    }

    /// Append columns to hold the block at row 0.
    fn grow(&mut self, row_span: usize, col_span: usize) -> Placement {
        let mut start = self.grid.column_count();
        let mut new_columns = col_span;
        if self.grid.is_column_free(start - 1) {
            start -= 1;
            new_columns -= 1;
        }
        self.grid.push_free_columns(new_columns);
        self.grid.occupy(&GridArea::span(0, start, row_span, col_span));
        Placement::new(0, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const ROWS: usize = 6;

    fn col(grid: &mut GridSpaceAllocator, rows: usize, cols: usize) -> Placement {
        grid.request_cells(rows, cols, PlacementMode::ColumnWise).unwrap()
    }

    #[test]
    fn first_request_lands_in_corner() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        assert_eq!(col(&mut grid, 2, 1), Placement::new(0, 0));
        assert!(!grid.is_free(0, 0));
        assert!(!grid.is_free(1, 0));
        for row in 2..ROWS {
            assert!(grid.is_free(row, 0));
        }
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn second_request_fills_same_column() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        col(&mut grid, 2, 1);
        assert_eq!(col(&mut grid, 2, 1), Placement::new(2, 0));
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn full_column_forces_new_column() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        for expected_row in [0, 2, 4] {
            assert_eq!(col(&mut grid, 2, 1), Placement::new(expected_row, 0));
        }
        assert_eq!(col(&mut grid, 2, 1), Placement::new(0, 1));
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.snapshot().cells, vec!["##", "##", "#.", "#.", "#.", "#."]);
    }

    #[test]
    fn row_wise_widens_and_reserves_row_zero_only() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        let placement = grid.request_cells(6, 2, PlacementMode::RowWise).unwrap();
        assert_eq!(placement, Placement::new(0, 0));
        assert_eq!(grid.column_count(), 2);
        assert!(!grid.is_free(0, 0));
        assert!(!grid.is_free(0, 1));
        for row in 1..ROWS {
            assert!(grid.is_free(row, 0));
            assert!(grid.is_free(row, 1));
        }
    }

    #[test]
    fn oversized_row_span_is_rejected_without_mutation() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        let before = grid.clone();
        let err = grid
            .request_cells(7, 1, PlacementMode::ColumnWise)
            .unwrap_err();
        assert_eq!(
            err,
            InvalidSpanError {
                row_span: 7,
                row_count: 6
            }
        );
        assert_eq!(grid, before);
        assert_eq!(col(&mut grid, 2, 1), Placement::new(0, 0));
    }

    #[test]
    fn oversized_row_span_rejected_in_row_wise_mode() {
        let mut grid = GridSpaceAllocator::new(2);
        assert!(grid.request_cells(3, 1, PlacementMode::RowWise).is_err());
        assert_eq!(grid.free_cells(), 2);
    }

    #[test]
    fn growth_reuses_free_last_column() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        // Fresh grid: one free column, two needed.
        assert_eq!(col(&mut grid, 3, 2), Placement::new(0, 0));
        assert_eq!(grid.column_count(), 2);
        assert_eq!(col(&mut grid, 3, 2), Placement::new(3, 0));

        // Grid is full, last column occupied: append both columns.
        assert_eq!(col(&mut grid, 6, 2), Placement::new(0, 2));
        assert_eq!(grid.column_count(), 4);
    }

    #[test]
    fn growth_skips_partially_free_last_column() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        col(&mut grid, 4, 1);
        // Two rows remain free in column 0, but a 3-row block does not fit.
        assert_eq!(col(&mut grid, 3, 1), Placement::new(0, 1));
        assert_eq!(grid.column_count(), 2);
        assert!(grid.is_free(4, 0));
        assert!(grid.is_free(5, 0));
    }

    #[test]
    fn column_wise_prefers_lower_row_over_lower_column() {
        let mut grid = GridSpaceAllocator::new(4);
        col(&mut grid, 4, 1); // column 0 full
        col(&mut grid, 2, 1); // (0, 1)
        col(&mut grid, 2, 1); // (2, 1)
        assert_eq!(col(&mut grid, 1, 1), Placement::new(0, 2));
        // Row 1 of column 2 comes before any later column.
        assert_eq!(col(&mut grid, 1, 1), Placement::new(1, 2));
    }

    #[test]
    fn column_wise_backfills_gaps() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        col(&mut grid, 6, 1);
        col(&mut grid, 2, 1); // (0, 1)
        col(&mut grid, 6, 1); // (0, 2)
        // Column 1 rows 2..6 still free.
        assert_eq!(col(&mut grid, 4, 1), Placement::new(2, 1));
        assert_eq!(grid.column_count(), 3);
    }

    #[test]
    fn row_wise_appends_after_last_occupied_cell() {
        let mut grid = GridSpaceAllocator::new(3);
        assert_eq!(
            grid.request_cells(1, 1, PlacementMode::RowWise).unwrap(),
            Placement::new(0, 0)
        );
        assert_eq!(grid.column_count(), 1);
        // Row 0 fully occupied: fall back to growth.
        assert_eq!(
            grid.request_cells(1, 1, PlacementMode::RowWise).unwrap(),
            Placement::new(0, 1)
        );
        assert_eq!(
            grid.request_cells(1, 3, PlacementMode::RowWise).unwrap(),
            Placement::new(0, 2)
        );
        assert_eq!(grid.column_count(), 5);
        assert_eq!(grid.snapshot().cells, vec!["#####", ".....", "....."]);
    }

    #[test]
    fn row_wise_skips_gaps_before_occupied_cells() {
        let mut grid = GridSpaceAllocator::new(2);
        col(&mut grid, 2, 1); // column 0 full
        col(&mut grid, 1, 1); // (0, 1) -> grows
        col(&mut grid, 2, 1); // (0, 2) -> grows, rows 0..2
        // Column 1 row 1 is free but row 0 is occupied through the end.
        assert_eq!(grid.snapshot().cells, vec!["###", "#.#"]);
        assert_eq!(
            grid.request_cells(1, 1, PlacementMode::RowWise).unwrap(),
            Placement::new(0, 3)
        );
    }

    #[test]
    fn row_wise_widens_by_shortfall_only() {
        let mut grid = GridSpaceAllocator::new(2);
        let placement = grid.request_cells(1, 3, PlacementMode::RowWise).unwrap();
        assert_eq!(placement, Placement::new(0, 0));
        // One free column existed, so two were appended.
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.snapshot().cells, vec!["###", "..."]);

        col(&mut grid, 1, 3);
        assert_eq!(grid.snapshot().cells, vec!["###", "###"]);
        let placement = grid.request_cells(1, 2, PlacementMode::RowWise).unwrap();
        assert_eq!(placement, Placement::new(0, 3));
        assert_eq!(grid.column_count(), 5);
    }

    #[test]
    fn zero_spans_clamp_to_one() {
        let mut grid = GridSpaceAllocator::new(2);
        assert_eq!(col(&mut grid, 0, 0), Placement::new(0, 0));
        assert_eq!(grid.free_cells(), 1);
    }

    #[test]
    fn zero_rows_clamp_to_one() {
        let grid = GridSpaceAllocator::new(0);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn request_struct_matches_request_cells() {
        let mut a = GridSpaceAllocator::new(ROWS);
        let mut b = GridSpaceAllocator::new(ROWS);
        let req = PlacementRequest::new(6, 2).mode(PlacementMode::RowWise);
        assert_eq!(
            a.request(req).unwrap(),
            b.request_cells(6, 2, PlacementMode::RowWise).unwrap()
        );
        assert_eq!(a, b);
    }

    #[test]
    fn placement_area_carries_spans() {
        let area = Placement::new(2, 3).area(2, 1);
        assert_eq!(area, GridArea::span(2, 3, 2, 1));
    }

    #[test]
    fn mode_parse_accepts_aliases() {
        assert_eq!(PlacementMode::parse("Column"), Some(PlacementMode::ColumnWise));
        assert_eq!(PlacementMode::parse(" rowwise "), Some(PlacementMode::RowWise));
        assert_eq!(PlacementMode::parse("row-wise"), Some(PlacementMode::RowWise));
        assert_eq!(PlacementMode::parse("diagonal"), None);
        assert_eq!(PlacementMode::default(), PlacementMode::ColumnWise);
    }

    #[test]
    fn request_deserializes_with_default_mode() {
        let req: PlacementRequest =
            serde_json::from_str(r#"{"row_span":2,"col_span":1}"#).unwrap();
        assert_eq!(req, PlacementRequest::new(2, 1));
        let req: PlacementRequest =
            serde_json::from_str(r#"{"row_span":1,"col_span":1,"mode":"row_wise"}"#).unwrap();
        assert_eq!(req.mode, PlacementMode::RowWise);
    }

    #[traced_test]
    #[test]
    fn rejection_is_logged() {
        let mut grid = GridSpaceAllocator::new(1);
        let _ = grid.request_cells(2, 1, PlacementMode::ColumnWise);
        assert!(logs_contain("placement rejected"));
    }

    #[traced_test]
    #[test]
    fn reservation_is_traced() {
        let mut grid = GridSpaceAllocator::new(ROWS);
        col(&mut grid, 2, 1);
        assert!(logs_contain("cells reserved"));
    }
}
