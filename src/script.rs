//! Headless session replay.
//!
//! A script is a JSON array of steps, each tagged with `op`:
//!
//! ```json
//! [
//!   {"op": "set_tool", "tool": "select"},
//!   {"op": "pointer_down", "position": {"x": 100, "y": 100}},
//!   {"op": "pointer_move", "position": {"x": 140, "y": 120}},
//!   {"op": "pointer_up", "position": {"x": 140, "y": 120}},
//!   {"op": "create_region", "name": "Kitchen"}
//! ]
//! ```
//!
//! Rejected steps are logged and the replay carries on, the same way the
//! editor treats rejected edits during a live session.

use crate::editor::Editor;
use crate::input::PointerEvent;
use crate::types::{RegionId, RegionRecord};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SetTool { tool: String },
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Wheel { x: f32, y: f32, delta_y: f32 },
    Pan { dx: f32, dy: f32 },
    ResetView,
    CreateRegion {
        #[serde(default)]
        name: Option<String>,
    },
    DeleteRegion { id: RegionId },
    RenameRegion { id: RegionId, name: String },
    SelectRegion {
        #[serde(default)]
        id: Option<RegionId>,
    },
    ClearSelection,
    ClearRegions,
    Undo,
    Redo,
    Sync { regions: Vec<RegionRecord> },
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::SetTool { .. } => "set_tool",
            Step::PointerDown(_) => "pointer_down",
            Step::PointerMove(_) => "pointer_move",
            Step::PointerUp(_) => "pointer_up",
            Step::Wheel { .. } => "wheel",
            Step::Pan { .. } => "pan",
            Step::ResetView => "reset_view",
            Step::CreateRegion { .. } => "create_region",
            Step::DeleteRegion { .. } => "delete_region",
            Step::RenameRegion { .. } => "rename_region",
            Step::SelectRegion { .. } => "select_region",
            Step::ClearSelection => "clear_selection",
            Step::ClearRegions => "clear_regions",
            Step::Undo => "undo",
            Step::Redo => "redo",
            Step::Sync { .. } => "sync",
        }
    }

    /// Apply one step. Returns false if the editor rejected it.
    pub fn apply(&self, editor: &mut Editor) -> bool {
        match self {
            Step::SetTool { tool } => editor.set_tool(tool).is_ok(),
            Step::PointerDown(event) => {
                editor.pointer_down(event);
                true
            }
            Step::PointerMove(event) => {
                editor.pointer_move(event);
                true
            }
            Step::PointerUp(event) => {
                editor.pointer_up(event);
                true
            }
            Step::Wheel { x, y, delta_y } => {
                editor.wheel_zoom_at(*x, *y, *delta_y);
                true
            }
            Step::Pan { dx, dy } => {
                editor.pan_by(*dx, *dy);
                true
            }
            Step::ResetView => {
                editor.reset_view();
                true
            }
            Step::CreateRegion { name } => editor.create_region(name.as_deref()).is_ok(),
            Step::DeleteRegion { id } => editor.delete_region(*id).is_ok(),
            Step::RenameRegion { id, name } => editor.rename_region(*id, name).is_ok(),
            Step::SelectRegion { id } => editor.select_region(*id).is_ok(),
            Step::ClearSelection => editor.clear_selection(),
            Step::ClearRegions => editor.clear_regions(),
            Step::Undo => editor.undo(),
            Step::Redo => editor.redo(),
            Step::Sync { regions } => editor.sync_regions_from_outside(regions.clone()).is_ok(),
        }
    }
}

/// Outcome counts for a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    /// Steps the editor rejected or that changed nothing
    pub skipped: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("parsing replay script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("in {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `editor`, drawing a frame after each one.
    pub fn run(&self, editor: &mut Editor) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for (index, step) in self.steps.iter().enumerate() {
            summary.steps += 1;
            if !step.apply(editor) {
                summary.skipped += 1;
                tracing::debug!(index, step = step.name(), "Step had no effect");
            }
            editor.run_frame();
        }
        tracing::info!(steps = summary.steps, skipped = summary.skipped, "Replay finished");
        summary
    }
}
