//! Editor settings.
//!
//! Stored as JSON at `<config dir>/floorgrid/settings.json`. Every field has a
//! default, so partial files are fine. A missing or unreadable file falls back
//! to defaults with a warning.

use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_CELL_SIZE, DEFAULT_REGION_PREFIX, DRAG_THRESHOLD_PX,
    MAX_HISTORY_OPERATIONS, MAX_SCALE, MIN_SCALE, ZOOM_SENSITIVITY,
};
use crate::types::GridBounds;
use crate::view::ScaleLimits;
use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Cells per board side
    pub board_size: i32,
    /// World units per cell
    pub cell_size: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub zoom_sensitivity: f32,
    /// Screen pixels a press must travel before it counts as a drag
    pub drag_threshold_px: f32,
    pub history_limit: usize,
    pub region_name_prefix: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            history_limit: MAX_HISTORY_OPERATIONS,
            region_name_prefix: DEFAULT_REGION_PREFIX.to_string(),
        }
    }
}

impl EditorSettings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = crate::settings_watcher::default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Using default settings: {err:#}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.board_size > 0, "board_size must be positive, got {}", self.board_size);
        ensure!(self.cell_size > 0.0, "cell_size must be positive, got {}", self.cell_size);
        ensure!(
            self.min_scale > 0.0 && self.min_scale <= self.max_scale,
            "scale limits must satisfy 0 < min_scale <= max_scale, got [{}, {}]",
            self.min_scale,
            self.max_scale
        );
        ensure!(self.zoom_sensitivity > 0.0, "zoom_sensitivity must be positive");
        ensure!(self.drag_threshold_px >= 0.0, "drag_threshold_px must not be negative");
        ensure!(self.history_limit > 0, "history_limit must be at least 1");
        Ok(())
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.board_size)
    }

    pub fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits { min: self.min_scale, max: self.max_scale }
    }

    /// Board side length in world units.
    pub fn board_world_size(&self) -> f32 {
        self.board_size as f32 * self.cell_size
    }

    /// Default name for the `n`th region.
    pub fn region_name(&self, n: u64) -> String {
        format!("{} {n}", self.region_name_prefix)
    }
}
