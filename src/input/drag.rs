//! Pointer-move handling - hover, overlays and panning.
//!
//! ## Performance Notes
//!
//! Pointer move fires 60+ times per second. Hover only dispatches when the
//! hovered region actually changes, and overlay updates are ephemeral and
//! skipped when the overlay is unchanged.

use crate::cells::CellSet;
use crate::commands::{SetHover, SetOverlay};
use crate::editor::Editor;
use crate::input::events::PointerEvent;
use crate::input::state::InteractionState;
use crate::profile_scope;
use crate::types::{GridBounds, Overlay};

/// Clamp a relocation offset so every cell of `base` stays on the board.
pub(crate) fn clamp_offset(base: &CellSet, dx: i32, dy: i32, bounds: GridBounds) -> (i32, i32) {
    let Some((min, max)) = base.bounds() else {
        return (0, 0);
    };
    let last = bounds.size - 1;
    (
        dx.clamp(-min.x, (last - max.x).max(-min.x)),
        dy.clamp(-min.y, (last - max.y).max(-min.y)),
    )
}

impl Editor {
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        profile_scope!("pointer_move");

        let position = event.position;
        let cell = self.screen_to_cell(position);

        if self.interaction.is_idle() {
            let hover = self.region_at(cell);
            if hover != self.store.state().hover {
                self.ephemeral(SetHover::new(hover));
            }
            return;
        }

        let threshold = self.settings.drag_threshold_px;
        let bounds = self.store.bounds();
        let point = self.screen_to_point(position);

        let mut pan = None;
        let overlay = match &mut self.interaction {
            InteractionState::Idle => None,
            InteractionState::Panning { press, last_pos } => {
                press.track(position, threshold);
                pan = Some((position.x - last_pos.x, position.y - last_pos.y));
                *last_pos = position;
                None
            }
            InteractionState::BoxSelecting { press, current, subtract } => {
                press.track(position, threshold);
                *current = cell;
                press.activated.then_some(Overlay::Box {
                    from: press.cell,
                    to: cell,
                    subtract: *subtract,
                })
            }
            InteractionState::RelocatingRegion { press, region, base_cells } => {
                press.track(position, threshold);
                let (dx, dy) = clamp_offset(base_cells, cell.x - press.cell.x, cell.y - press.cell.y, bounds);
                press.activated.then_some(Overlay::Relocate { region: *region, dx, dy })
            }
            InteractionState::CleanupStroke { press, points } => {
                press.track(position, threshold);
                if points.last() == Some(&point) {
                    None
                } else {
                    points.push(point);
                    Some(Overlay::Stroke { points: points.clone() })
                }
            }
        };

        if let Some((dx, dy)) = pan {
            self.pan_by(dx, dy);
        }
        if let Some(overlay) = overlay {
            self.ephemeral(SetOverlay::new(overlay));
        }
    }
}
