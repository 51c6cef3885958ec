//! Pan/zoom camera.
//!
//! `View` is the affine transform `screen = world * scale + translate`.
//! Everything here is pure: operations return a new view and never touch the
//! store, so the same inputs always give the same camera.

use crate::constants::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};

/// A position in screen pixels, relative to the canvas origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: ScreenPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A position in world units (cell size units per cell).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Scale limits applied by zoom operations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: MIN_SCALE, max: MAX_SCALE }
    }
}

impl ScaleLimits {
    #[inline]
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }
}

/// Camera state. Lives outside undo history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Default for View {
    fn default() -> Self {
        Self { translate_x: 0.0, translate_y: 0.0, scale: DEFAULT_SCALE }
    }
}

impl View {
    pub fn new(translate_x: f32, translate_y: f32, scale: f32) -> Self {
        Self { translate_x, translate_y, scale }
    }

    #[inline]
    pub fn screen_to_world(&self, p: ScreenPoint) -> WorldPoint {
        WorldPoint::new(
            (p.x - self.translate_x) / self.scale,
            (p.y - self.translate_y) / self.scale,
        )
    }

    #[inline]
    pub fn world_to_screen(&self, p: WorldPoint) -> ScreenPoint {
        ScreenPoint::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }

    /// Shift by a screen-space delta.
    pub fn panned(&self, dx: f32, dy: f32) -> View {
        View { translate_x: self.translate_x + dx, translate_y: self.translate_y + dy, ..*self }
    }

    /// Zoom by `exp(-delta_y * sensitivity)` keeping the world point under
    /// `anchor` fixed on screen.
    pub fn zoomed_at(
        &self,
        anchor: ScreenPoint,
        delta_y: f32,
        sensitivity: f32,
        limits: ScaleLimits,
    ) -> View {
        let factor = (-delta_y * sensitivity).exp();
        self.scaled_around(anchor, self.scale * factor, limits)
    }

    /// Set the scale (clamped) keeping `anchor` fixed.
    pub fn scaled_around(&self, anchor: ScreenPoint, scale: f32, limits: ScaleLimits) -> View {
        let scale = limits.clamp(scale);
        let world = self.screen_to_world(anchor);
        View {
            translate_x: anchor.x - world.x * scale,
            translate_y: anchor.y - world.y * scale,
            scale,
        }
    }

    /// Re-clamp after the limits change, anchored at the screen origin.
    pub fn clamped(&self, limits: ScaleLimits) -> View {
        self.scaled_around(ScreenPoint::default(), self.scale, limits)
    }

    /// View that centers a board of `board_world` units inside `viewport`, fitting it
    /// when it is larger than the viewport.
    pub fn centered_on(board_world: f32, viewport: (f32, f32), limits: ScaleLimits) -> View {
        let (width, height) = viewport;
        if board_world <= 0.0 || width <= 0.0 || height <= 0.0 {
            return View::default();
        }
        let fit = (width.min(height) / board_world).min(DEFAULT_SCALE);
        let scale = limits.clamp(fit);
        View {
            translate_x: (width - board_world * scale) / 2.0,
            translate_y: (height - board_world * scale) / 2.0,
            scale,
        }
    }
}
