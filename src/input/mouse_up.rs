//! Pointer-up handling - commit the gesture and return to idle.

use crate::cells::cells_in_rect;
use crate::cleanup;
use crate::commands::{ApplySelection, CleanSegments, MoveRegion, SetOverlay, SetSelectedRegion, ToggleCell};
use crate::editor::Editor;
use crate::input::drag::clamp_offset;
use crate::input::events::PointerEvent;
use crate::input::state::InteractionState;
use crate::profile_scope;
use crate::types::Overlay;

impl Editor {
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        profile_scope!("pointer_up");

        let mut interaction = std::mem::take(&mut self.interaction);
        if interaction.is_idle() {
            return;
        }
        let threshold = self.settings.drag_threshold_px;
        if let Some(press) = interaction.press_mut() {
            press.track(event.position, threshold);
        }
        let cell = self.screen_to_cell(event.position);
        let forced = self.tool().is_forced();

        self.batch(|editor| {
            // Before any commit, so removal snapshots never hold the preview
            editor.ephemeral(SetOverlay::new(Overlay::None));
            match interaction {
                InteractionState::Idle | InteractionState::Panning { .. } => {}
                InteractionState::BoxSelecting { press, subtract, .. } => {
                    if press.activated {
                        let cells = cells_in_rect(press.cell, cell, editor.store.bounds());
                        editor.commit(ApplySelection::new(cells, subtract));
                    } else if forced && !press.moved {
                        tracing::trace!("Click suppressed by forced tool");
                    } else if editor.store.bounds().contains_cell(press.cell) {
                        editor.commit(ToggleCell::new(press.cell));
                    }
                }
                InteractionState::RelocatingRegion { press, region, base_cells, .. } => {
                    if !press.activated {
                        editor.ephemeral(SetSelectedRegion::new(Some(region)));
                        editor.notify_selected(region);
                    } else {
                        // Offset from the release cell, not the last move
                        let (dx, dy) = clamp_offset(
                            &base_cells,
                            cell.x - press.cell.x,
                            cell.y - press.cell.y,
                            editor.store.bounds(),
                        );
                        if dx != 0 || dy != 0 {
                            editor.commit(MoveRegion::new(region, dx, dy));
                        }
                    }
                }
                InteractionState::CleanupStroke { points, .. } => {
                    if cleanup::is_closable(&points) {
                        editor.commit(CleanSegments::new(points));
                    }
                }
            }
        });
    }
}
