#![forbid(unsafe_code)]

//! Grid-space allocation for ribbon toolbar panels.
//!
//! # Role
//! A ribbon panel stacks buttons and widgets in a grid with a fixed number of
//! rows that grows to the right as items are added. This crate decides where
//! each item goes; the widget layer only consumes the resulting row, column
//! and spans.
//!
//! # Primary responsibilities
//! - **GridSpaceAllocator**: packs `row_span x col_span` requests into a
//!   growable occupancy grid, column-wise or row-wise.
//! - **PanelLayout**: per-panel bookkeeping of placed items by id.
//! - **TrackGeometry**: converts grid areas into rectangles.
//! - **PanelConfig**: row count, default mode and track sizes, with
//!   environment overrides.
//!
//! The crate is synchronous and does no I/O. Diagnostics go through
//! `tracing`; installing a subscriber is left to the application.

pub mod allocator;
pub mod config;
pub mod error;
pub mod geometry;
pub mod occupancy;
pub mod panel;

pub use allocator::{GridSpaceAllocator, Placement, PlacementMode, PlacementRequest};
pub use config::PanelConfig;
pub use error::{ConfigError, InvalidSpanError, PanelError};
pub use geometry::{GridArea, Rect, TrackGeometry};
pub use occupancy::{OccupancyGrid, OccupancySnapshot};
pub use panel::{ItemSize, PanelItem, PanelLayout};
