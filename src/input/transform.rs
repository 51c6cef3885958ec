//! Canvas transformations - wheel zoom, panning, recentering.
//!
//! The view is camera state, not document state: these changes go straight
//! to the store and never enter history.

use crate::editor::Editor;
use crate::view::{ScreenPoint, View};

impl Editor {
    /// Zoom by wheel delta, keeping the world point under `(x, y)` fixed.
    pub fn wheel_zoom_at(&mut self, x: f32, y: f32, delta_y: f32) {
        let anchor = ScreenPoint::new(x, y);
        let sensitivity = self.settings.zoom_sensitivity;
        let limits = self.settings.scale_limits();
        let view = self.store.state().view.zoomed_at(anchor, delta_y, sensitivity, limits);
        self.set_view(view);
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let view = self.store.state().view.panned(dx, dy);
        self.set_view(view);
    }

    /// Center the board in the viewport at a scale that fits it.
    pub fn reset_view(&mut self) {
        let view = View::centered_on(
            self.settings.board_world_size(),
            (self.viewport.width, self.viewport.height),
            self.settings.scale_limits(),
        );
        self.set_view(view);
    }

    pub fn set_view(&mut self, view: View) {
        if self.store.state().view != view {
            self.store.mutate(|s| s.view = view);
        }
    }
}
