#![forbid(unsafe_code)]

//! Panel-level placement bookkeeping.
//!
//! A [`PanelLayout`] owns the grid allocator of one ribbon panel and
//! remembers where each item went, so the widget layer can ask for an item's
//! grid area or rectangle by id.
//!
//! Removing an item forgets its record but does not give its cells back to
//! the allocator; later items never move into the hole.
//!
//! # Example
//!
//! ```
//! use ribbon_layout::panel::{ItemSize, PanelLayout};
//! use ribbon_layout::geometry::GridArea;
//!
//! let mut panel = PanelLayout::with_rows(6);
//! panel.add_item("paste", ItemSize::Large)?;
//! panel.add_item("cut", ItemSize::Small)?;
//! panel.add_item("copy", ItemSize::Small)?;
//!
//! assert_eq!(panel.area("paste"), Some(GridArea::span(0, 0, 6, 1)));
//! assert_eq!(panel.area("copy"), Some(GridArea::span(2, 1, 2, 1)));
//! # Ok::<(), ribbon_layout::PanelError>(())
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocator::{GridSpaceAllocator, PlacementMode};
use crate::config::PanelConfig;
use crate::error::PanelError;
use crate::geometry::{GridArea, Rect};

/// Size class of a panel item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSize {
    /// Full panel height.
    Large,
    /// Half the panel height.
    Medium,
    /// A third of the panel height.
    Small,
    /// Explicit spans.
    Custom { rows: usize, cols: usize },
}

impl ItemSize {
    /// Rows this size occupies in a panel of `max_rows` rows.
    pub fn row_span(self, max_rows: usize) -> usize {
        match self {
            Self::Large => max_rows.max(1),
            Self::Medium => (max_rows / 2).max(1),
            Self::Small => (max_rows / 3).max(1),
            Self::Custom { rows, .. } => rows,
        }
    }

    /// Columns this size occupies.
    pub fn col_span(self) -> usize {
        match self {
            Self::Custom { cols, .. } => cols,
            _ => 1,
        }
    }
}

/// One placed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelItem {
    pub id: String,
    pub size: ItemSize,
    pub mode: PlacementMode,
    /// Requested block anchored at the allocator's placement.
    pub area: GridArea,
}

/// Items of one ribbon panel laid out on a growable grid.
#[derive(Debug, Clone)]
pub struct PanelLayout {
    config: PanelConfig,
    allocator: GridSpaceAllocator,
    order: Vec<String>,
    items: FxHashMap<String, PanelItem>,
}

impl PanelLayout {
    /// Create an empty panel.
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self {
            allocator: GridSpaceAllocator::new(config.max_rows),
            config,
            order: Vec::new(),
            items: FxHashMap::default(),
        }
    }

    /// Empty panel with `rows` rows and default settings otherwise.
    #[must_use]
    pub fn with_rows(rows: usize) -> Self {
        Self::new(PanelConfig::default().max_rows(rows))
    }

    #[inline]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[inline]
    pub fn allocator(&self) -> &GridSpaceAllocator {
        &self.allocator
    }

    /// Fixed row count.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.allocator.row_count()
    }

    /// Columns used so far.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.allocator.column_count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Place an item with the panel's default mode.
    pub fn add_item(
        &mut self,
        id: impl Into<String>,
        size: ItemSize,
    ) -> Result<GridArea, PanelError> {
        let mode = self.config.default_mode;
        self.add_item_with_mode(id, size, mode)
    }

    /// Place an item with an explicit mode.
    pub fn add_item_with_mode(
        &mut self,
        id: impl Into<String>,
        size: ItemSize,
        mode: PlacementMode,
    ) -> Result<GridArea, PanelError> {
        let id = id.into();
        if self.items.contains_key(&id) {
            return Err(PanelError::DuplicateItem(id));
        }

        let row_span = size.row_span(self.row_count());
        let col_span = size.col_span();
        let placement = self.allocator.request_cells(row_span, col_span, mode)?;
        let area = placement.area(row_span, col_span);

        debug!(item = %id, ?size, ?mode, row = area.row, col = area.col, "panel item placed");
        self.order.push(id.clone());
        self.items.insert(
            id.clone(),
            PanelItem {
                id,
                size,
                mode,
                area,
            },
        );
        Ok(area)
    }

    /// Forget an item. Its cells stay reserved.
    pub fn remove_item(&mut self, id: &str) -> Option<PanelItem> {
        let item = self.items.remove(id)?;
        self.order.retain(|other| other != id);
        debug!(item = %id, "panel item removed; cells stay reserved");
        Some(item)
    }

    /// Look up a placed item.
    pub fn item(&self, id: &str) -> Option<&PanelItem> {
        self.items.get(id)
    }

    /// Grid area of a placed item.
    pub fn area(&self, id: &str) -> Option<GridArea> {
        self.items.get(id).map(|item| item.area)
    }

    /// Rectangle of a placed item under the configured track geometry.
    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.area(id).map(|area| self.config.geometry.span_rect(&area))
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &PanelItem> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Bounding rectangle of every column allocated so far.
    pub fn extent(&self) -> Rect {
        self.config
            .geometry
            .grid_rect(self.row_count(), self.column_count())
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}
