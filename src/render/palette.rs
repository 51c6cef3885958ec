//! Editor colors.
//!
//! Colors are HSLA with every channel in `0.0..=1.0`, so renderers can convert
//! to whatever their backend wants.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

/// Build a color from hue, saturation, lightness and alpha.
pub const fn hsla(h: f32, s: f32, l: f32, a: f32) -> Hsla {
    Hsla { h, s, l, a }
}

impl Hsla {
    pub fn opacity(self, a: f32) -> Hsla {
        Hsla { a, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Hsla,
    pub board: Hsla,
    pub grid_line: Hsla,
    pub selection: Hsla,
    pub region_stroke: Hsla,
    pub region_label: Hsla,
    pub hover: Hsla,
    pub selected_region: Hsla,
    pub box_add: Hsla,
    pub box_subtract: Hsla,
    pub relocate_preview: Hsla,
    pub stroke_marker: Hsla,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: hsla(0.0, 0.0, 0.94, 1.0),
            board: hsla(0.0, 0.0, 1.0, 1.0),
            grid_line: hsla(0.0, 0.0, 0.85, 1.0),
            selection: hsla(210.0 / 360.0, 0.7, 0.6, 0.45),
            region_stroke: hsla(220.0 / 360.0, 0.5, 0.35, 1.0),
            region_label: hsla(220.0 / 360.0, 0.3, 0.2, 1.0),
            hover: hsla(45.0 / 360.0, 0.9, 0.6, 0.3),
            selected_region: hsla(25.0 / 360.0, 0.9, 0.5, 1.0),
            box_add: hsla(140.0 / 360.0, 0.6, 0.45, 0.35),
            box_subtract: hsla(0.0, 0.7, 0.55, 0.35),
            relocate_preview: hsla(220.0 / 360.0, 0.5, 0.5, 0.5),
            stroke_marker: hsla(0.0, 0.8, 0.5, 1.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: hsla(0.0, 0.0, 0.08, 1.0),
            board: hsla(0.0, 0.0, 0.13, 1.0),
            grid_line: hsla(0.0, 0.0, 0.22, 1.0),
            region_stroke: hsla(210.0 / 360.0, 0.6, 0.7, 1.0),
            region_label: hsla(210.0 / 360.0, 0.2, 0.9, 1.0),
            ..Self::light()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
