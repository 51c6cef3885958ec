//! Interaction state machine.
//!
//! Exactly one gesture is active at a time:
//!
//! ```text
//! Idle -> Panning            (pan modifier or middle button)
//! Idle -> BoxSelecting       (select/deselect tool, or press on empty board)
//! Idle -> RelocatingRegion   (press on a region with the default tool)
//! Idle -> CleanupStroke      (cleanup tool)
//!
//! Any -> Idle                (pointer up - commits the gesture)
//! ```
//!
//! Every non-idle state carries a [`DragStart`] that tells a click from a drag.

use crate::cells::CellSet;
use crate::types::{Cell, GridPoint, RegionId};
use crate::view::ScreenPoint;

/// Where a press started and how far it has travelled since.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    /// Screen position of the press
    pub origin: ScreenPoint,
    /// Cell under the press
    pub cell: Cell,
    /// Movement exceeded the drag threshold at some point
    pub activated: bool,
    /// Any movement at all
    pub moved: bool,
}

impl DragStart {
    pub fn new(origin: ScreenPoint, cell: Cell) -> Self {
        Self { origin, cell, activated: false, moved: false }
    }

    /// Record a pointer position. Returns true on the move that activates the drag.
    pub fn track(&mut self, position: ScreenPoint, threshold: f32) -> bool {
        if position != self.origin {
            self.moved = true;
        }
        if !self.activated && self.origin.distance_to(position) > threshold {
            self.activated = true;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// No active gesture; pointer moves update hover
    #[default]
    Idle,

    /// Moving the view
    Panning {
        press: DragStart,
        /// Last pointer position for delta calculation
        last_pos: ScreenPoint,
    },

    /// Rectangle selection between the pressed cell and `current`
    BoxSelecting {
        press: DragStart,
        current: Cell,
        subtract: bool,
    },

    /// Dragging a region by whole cells
    RelocatingRegion {
        press: DragStart,
        region: RegionId,
        /// Region cells at press time
        base_cells: CellSet,
    },

    /// Freehand cleanup lasso
    CleanupStroke {
        press: DragStart,
        points: Vec<GridPoint>,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_box_selecting(&self) -> bool {
        matches!(self, Self::BoxSelecting { .. })
    }

    pub fn is_relocating(&self) -> bool {
        matches!(self, Self::RelocatingRegion { .. })
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self, Self::CleanupStroke { .. })
    }

    /// Short name for logs and tests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::BoxSelecting { .. } => "box_selecting",
            Self::RelocatingRegion { .. } => "relocating_region",
            Self::CleanupStroke { .. } => "cleanup_stroke",
        }
    }

    pub fn press(&self) -> Option<&DragStart> {
        match self {
            Self::Idle => None,
            Self::Panning { press, .. }
            | Self::BoxSelecting { press, .. }
            | Self::RelocatingRegion { press, .. }
            | Self::CleanupStroke { press, .. } => Some(press),
        }
    }

    pub fn press_mut(&mut self) -> Option<&mut DragStart> {
        match self {
            Self::Idle => None,
            Self::Panning { press, .. }
            | Self::BoxSelecting { press, .. }
            | Self::RelocatingRegion { press, .. }
            | Self::CleanupStroke { press, .. } => Some(press),
        }
    }

    /// Whether the current gesture has become a drag.
    pub fn is_activated(&self) -> bool {
        self.press().is_some_and(|press| press.activated)
    }

    /// Region being relocated, if any
    pub fn relocating_region(&self) -> Option<RegionId> {
        match self {
            Self::RelocatingRegion { region, .. } => Some(*region),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn start_panning(&mut self, press: DragStart) {
        *self = Self::Panning { press, last_pos: press.origin };
    }

    pub fn start_box(&mut self, press: DragStart, subtract: bool) {
        *self = Self::BoxSelecting { press, current: press.cell, subtract };
    }

    pub fn start_relocating(&mut self, press: DragStart, region: RegionId, base_cells: CellSet) {
        *self = Self::RelocatingRegion { press, region, base_cells };
    }

    pub fn start_stroke(&mut self, press: DragStart, first: GridPoint) {
        *self = Self::CleanupStroke { press, points: vec![first] };
    }
}
