//! Pointer-down handling - picks the gesture for a press.
//!
//! ## Performance Notes
//!
//! Only the default tool hit-tests, and the hit-test index is rebuilt lazily
//! when regions changed since the last query.

use crate::commands::SetOverlay;
use crate::editor::Editor;
use crate::input::events::{PointerButton, PointerEvent};
use crate::input::state::DragStart;
use crate::input::tools::{self, Gesture, PressContext};
use crate::profile_scope;
use crate::types::Overlay;

impl Editor {
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        profile_scope!("pointer_down");

        // A press while a gesture is live means we missed its release
        self.cancel_interaction();

        let cell = self.screen_to_cell(event.position);
        let press = DragStart::new(event.position, cell);

        if event.button == PointerButton::Middle || event.modifiers.pan {
            self.interaction.start_panning(press);
            return;
        }
        if event.button != PointerButton::Primary {
            return;
        }

        let tool = self.tool();
        let hit = if tools::needs_hit_test(tool) { self.region_at(cell) } else { None };
        let ctx = PressContext { hit, modifiers: event.modifiers };

        match tools::strategy_for(tool)(&ctx) {
            Gesture::Box { subtract } => {
                self.interaction.start_box(press, subtract);
            }
            Gesture::Relocate(region) => {
                let Some(base_cells) = self.store.state().region(region).map(|r| r.cells().clone()) else {
                    return;
                };
                self.interaction.start_relocating(press, region, base_cells);
            }
            Gesture::Stroke => {
                let first = self.screen_to_point(event.position);
                self.interaction.start_stroke(press, first);
                self.ephemeral(SetOverlay::new(Overlay::Stroke { points: vec![first] }));
            }
        }
        tracing::trace!(state = self.interaction.name(), ?cell, "Gesture started");
    }
}
