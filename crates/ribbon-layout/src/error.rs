//! Error types for placement, panel bookkeeping, and configuration.

use std::fmt;

/// A placement asked for more rows than the grid has.
///
/// Raised before the allocator touches any state, so a rejected request
/// leaves the occupancy grid exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSpanError {
    /// Rows requested by the placement.
    pub row_span: usize,
    /// Fixed row count of the grid.
    pub row_count: usize,
}

impl fmt::Display for InvalidSpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row span {} exceeds grid row count {}",
            self.row_span, self.row_count
        )
    }
}

impl std::error::Error for InvalidSpanError {}

/// Errors from [`PanelLayout`](crate::panel::PanelLayout) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// The item's span does not fit the panel's row count.
    InvalidSpan(InvalidSpanError),
    /// An item with this id is already placed in the panel.
    DuplicateItem(String),
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpan(err) => write!(f, "invalid span: {err}"),
            Self::DuplicateItem(id) => write!(f, "item '{id}' is already placed"),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSpan(err) => Some(err),
            Self::DuplicateItem(_) => None,
        }
    }
}

impl From<InvalidSpanError> for PanelError {
    fn from(err: InvalidSpanError) -> Self {
        Self::InvalidSpan(err)
    }
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}
