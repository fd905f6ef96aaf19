//! Panel configuration with environment overrides.
//!
//! # Environment
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `RIBBON_PANEL_MAX_ROWS` | `max_rows` | positive integer |
//! | `RIBBON_PANEL_MODE` | `default_mode` | `column` / `row` (and `*wise` spellings) |
//! | `RIBBON_PANEL_ROW_HEIGHT` | `geometry.row_height` | positive integer |
//! | `RIBBON_PANEL_COL_WIDTH` | `geometry.col_width` | positive integer |
//! | `RIBBON_PANEL_ROW_GAP` | `geometry.row_gap` | integer |
//! | `RIBBON_PANEL_COL_GAP` | `geometry.col_gap` | integer |
//!
//! Values that fail to parse leave the default in place and are reported as
//! [`ConfigError`]s; they never abort loading.

use std::env;

use serde::{Deserialize, Serialize};

use crate::allocator::PlacementMode;
use crate::error::ConfigError;
use crate::geometry::TrackGeometry;

pub const ENV_MAX_ROWS: &str = "RIBBON_PANEL_MAX_ROWS";
pub const ENV_MODE: &str = "RIBBON_PANEL_MODE";
pub const ENV_ROW_HEIGHT: &str = "RIBBON_PANEL_ROW_HEIGHT";
pub const ENV_COL_WIDTH: &str = "RIBBON_PANEL_COL_WIDTH";
pub const ENV_ROW_GAP: &str = "RIBBON_PANEL_ROW_GAP";
pub const ENV_COL_GAP: &str = "RIBBON_PANEL_COL_GAP";

/// Rows in a standard ribbon panel.
pub const DEFAULT_MAX_ROWS: usize = 6;

/// Layout settings for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Row count of the panel grid.
    pub max_rows: usize,
    /// Mode used by [`PanelLayout::add_item`](crate::panel::PanelLayout::add_item).
    pub default_mode: PlacementMode,
    /// Track sizes used to turn grid areas into rectangles.
    pub geometry: TrackGeometry,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            default_mode: PlacementMode::ColumnWise,
            geometry: TrackGeometry::default(),
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct PanelConfigParse {
    pub config: PanelConfig,
    pub errors: Vec<ConfigError>,
}

impl PanelConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> PanelConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> PanelConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Builder-style row count override.
    #[must_use]
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows;
        self
    }

    /// Builder-style default mode override.
    #[must_use]
    pub fn default_mode(mut self, mode: PlacementMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Builder-style geometry override.
    #[must_use]
    pub fn geometry(mut self, geometry: TrackGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.max_rows == 0 {
            errors.push(ConfigError::new("max_rows", "0", "must be at least 1"));
        }
        if self.geometry.row_height == 0 {
            errors.push(ConfigError::new("row_height", "0", "must be at least 1"));
        }
        if self.geometry.col_width == 0 {
            errors.push(ConfigError::new("col_width", "0", "must be at least 1"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn from_env_with<F>(mut get: F) -> PanelConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = PanelConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_MAX_ROWS) {
        match parse_positive(&value) {
            Some(parsed) => config.max_rows = parsed,
            None => errors.push(ConfigError::new(
                "max_rows",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_MODE) {
        match PlacementMode::parse(&value) {
            Some(parsed) => config.default_mode = parsed,
            None => errors.push(ConfigError::new("default_mode", value, "expected column|row")),
        }
    }

    type SetTrack = fn(&mut TrackGeometry, u16);
    let tracks: [(&str, &'static str, bool, SetTrack); 4] = [
        (ENV_ROW_HEIGHT, "row_height", true, |g, v| g.row_height = v),
        (ENV_COL_WIDTH, "col_width", true, |g, v| g.col_width = v),
        (ENV_ROW_GAP, "row_gap", false, |g, v| g.row_gap = v),
        (ENV_COL_GAP, "col_gap", false, |g, v| g.col_gap = v),
    ];
    for (key, field, positive, set) in tracks {
        let Some(value) = get(key) else {
            continue;
        };
        match value.trim().parse::<u16>() {
            Ok(parsed) if parsed > 0 || !positive => set(&mut config.geometry, parsed),
            _ => {
                let expected = if positive {
                    "expected integer 1..=65535"
                } else {
                    "expected integer 0..=65535"
                };
                errors.push(ConfigError::new(field, value, expected));
            }
        }
    }

    PanelConfigParse { config, errors }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|&v| v > 0)
}
