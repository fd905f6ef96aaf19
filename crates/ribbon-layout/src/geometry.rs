#![forbid(unsafe_code)]

//! Grid areas and the cell-unit rectangles they occupy.
//!
//! A panel lays its items out on uniform tracks: every row has the same
//! height and every column the same width, separated by optional gaps.
//! [`TrackGeometry`] turns a placed [`GridArea`] into a [`Rect`].
//!
//! # Example
//!
//! ```
//! use ribbon_layout::geometry::{GridArea, Rect, TrackGeometry};
//!
//! let tracks = TrackGeometry::new(4, 10).col_gap(2);
//!
//! // Two columns wide, three rows tall, starting at row 1 / column 1.
//! let rect = tracks.span_rect(&GridArea::span(1, 1, 3, 2));
//! assert_eq!(rect, Rect::new(12, 4, 22, 12));
//! ```

use serde::{Deserialize, Serialize};

/// A rectangular region of the grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridArea {
    /// Starting row (0-indexed).
    pub row: usize,
    /// Starting column (0-indexed).
    pub col: usize,
    /// Number of rows this area spans.
    pub rowspan: usize,
    /// Number of columns this area spans.
    pub colspan: usize,
}

impl GridArea {
    /// Create a single-cell area.
    #[inline]
    #[must_use]
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Create a spanning area. Zero spans are clamped to 1.
    #[inline]
    #[must_use]
    pub fn span(row: usize, col: usize, rowspan: usize, colspan: usize) -> Self {
        Self {
            row,
            col,
            rowspan: rowspan.max(1),
            colspan: colspan.max(1),
        }
    }

    /// One past the last row.
    #[inline]
    pub fn end_row(&self) -> usize {
        self.row + self.rowspan
    }

    /// One past the last column.
    #[inline]
    pub fn end_col(&self) -> usize {
        self.col + self.colspan
    }

    /// Whether the cell `(row, col)` lies inside this area.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row..self.end_row()).contains(&row) && (self.col..self.end_col()).contains(&col)
    }

    /// Whether the two areas share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &GridArea) -> bool {
        self.row < other.end_row()
            && other.row < self.end_row()
            && self.col < other.end_col()
            && other.col < self.end_col()
    }

    /// Number of cells covered.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rowspan * self.colspan
    }
}

/// An axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Uniform track sizes for a panel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Height of every row.
    pub row_height: u16,
    /// Width of every column.
    pub col_width: u16,
    /// Gap between rows.
    #[serde(default)]
    pub row_gap: u16,
    /// Gap between columns.
    #[serde(default)]
    pub col_gap: u16,
    /// Top-left corner of cell (0, 0).
    #[serde(default)]
    pub origin_x: u16,
    #[serde(default)]
    pub origin_y: u16,
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl TrackGeometry {
    /// Tracks of the given size with no gaps, anchored at (0, 0).
    #[must_use]
    pub const fn new(row_height: u16, col_width: u16) -> Self {
        Self {
            row_height,
            col_width,
            row_gap: 0,
            col_gap: 0,
            origin_x: 0,
            origin_y: 0,
        }
    }

    /// Set the gap between rows.
    #[must_use]
    pub fn row_gap(mut self, gap: u16) -> Self {
        self.row_gap = gap;
        self
    }

    /// Set the gap between columns.
    #[must_use]
    pub fn col_gap(mut self, gap: u16) -> Self {
        self.col_gap = gap;
        self
    }

    /// Set uniform gap for both rows and columns.
    #[must_use]
    pub fn gap(self, gap: u16) -> Self {
        self.row_gap(gap).col_gap(gap)
    }

    /// Move cell (0, 0) to `(x, y)`.
    #[must_use]
    pub fn origin(mut self, x: u16, y: u16) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Rectangle covered by `area`.
    ///
    /// Gaps are counted between spanned tracks only, never after the last.
    /// All arithmetic saturates at `u16::MAX`.
    pub fn span_rect(&self, area: &GridArea) -> Rect {
        let x = self
            .origin_x
            .saturating_add(offset(area.col, self.col_width, self.col_gap));
        let y = self
            .origin_y
            .saturating_add(offset(area.row, self.row_height, self.row_gap));
        Rect::new(
            x,
            y,
            extent(area.colspan.max(1), self.col_width, self.col_gap),
            extent(area.rowspan.max(1), self.row_height, self.row_gap),
        )
    }

    /// Rectangle of a single cell.
    #[inline]
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        self.span_rect(&GridArea::cell(row, col))
    }

    /// Bounding rectangle of a whole `rows x columns` grid.
    ///
    /// Empty when either dimension is zero.
    pub fn grid_rect(&self, rows: usize, columns: usize) -> Rect {
        if rows == 0 || columns == 0 {
            return Rect::new(self.origin_x, self.origin_y, 0, 0);
        }
        self.span_rect(&GridArea::span(0, 0, rows, columns))
    }
}

/// Position of track `index`: all tracks before it plus one gap each.
fn offset(index: usize, size: u16, gap: u16) -> u16 {
    let step = size as u64 + gap as u64;
    (index as u64 * step).min(u16::MAX as u64) as u16
}

/// Length of `count` consecutive tracks including the gaps between them.
fn extent(count: usize, size: u16, gap: u16) -> u16 {
    let count = count as u64;
    let total = count * size as u64 + count.saturating_sub(1) * gap as u64;
    total.min(u16::MAX as u64) as u16
}
