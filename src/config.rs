use crate::geometry::{Position, Size};
use crate::view::Viewport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::FlowStore`]
///
/// Every field has a default, so a settings file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowConfig {
    /// Size given to a freshly added screen
    pub default_screen_size: Size,

    /// Floor for the derived screen height
    pub min_screen_height: f64,

    /// Height of a screen before any component rows
    pub base_screen_height: f64,

    /// Extra height per component row
    pub component_row_height: f64,

    /// Shift applied to a duplicated screen
    pub duplicate_offset: Position,

    /// Viewport at start-up and after reset or clear
    pub initial_viewport: Viewport,

    /// Viewport used when an imported document carries none
    pub import_viewport: Viewport,

    /// Spacing callers pass to [`crate::Position::snap_to_grid`]
    pub grid_size: f64,

    pub dark_mode: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            default_screen_size: Size::new(400.0, 300.0),
            min_screen_height: 300.0,
            base_screen_height: 200.0,
            component_row_height: 40.0,
            duplicate_offset: Position::new(50.0, 50.0),
            initial_viewport: Viewport::new(0.0, 0.0, 0.8),
            import_viewport: Viewport::new(0.0, 0.0, 1.0),
            grid_size: 20.0,
            dark_mode: true,
        }
    }
}

impl FlowConfig {
    /// Parse settings from JSON, filling missing keys with defaults
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse flow configuration")
    }

    /// Derived height for a screen holding `component_count` components
    pub fn screen_height_for(&self, component_count: usize) -> f64 {
        let rows = component_count as f64 * self.component_row_height;
        self.min_screen_height.max(self.base_screen_height + rows)
    }
}
