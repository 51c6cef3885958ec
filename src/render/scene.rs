//! Scene building.
//!
//! Turns editor state into a flat list of draw commands. Geometry is in world
//! units; the scene carries the view so the renderer applies one transform.
//! Stroke widths are in screen pixels.
//!
//! ## Performance Notes
//!
//! Runs once per frame. Grid lines and selected cells outside the viewport
//! (plus [`CULLING_MARGIN`]) are skipped.

use crate::constants::{CULLING_MARGIN, STROKE_MARKER_RADIUS};
use crate::outline::Outline;
use crate::profile_scope;
use crate::render::palette::{Hsla, Palette};
use crate::settings::EditorSettings;
use crate::store::EditorState;
use crate::types::{GridBounds, Overlay};
use crate::view::{ScreenPoint, View};
use serde::Serialize;

/// Size of the drawing surface in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldRect {
    fn from_edges(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x: x0, y: y0, width: x1 - x0, height: y1 - y0 }
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }

    fn bottom(&self) -> f32 {
        self.y + self.height
    }

    fn intersects(&self, other: &WorldRect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { color: Hsla },
    FillRect { rect: WorldRect, color: Hsla },
    StrokeRect { rect: WorldRect, color: Hsla, width: f32 },
    Line { from: (f32, f32), to: (f32, f32), color: Hsla, width: f32 },
    /// Closed chains; the first is the outer boundary, the rest are holes.
    Outline { chains: Vec<Vec<(f32, f32)>>, fill: Option<Hsla>, stroke: Hsla, width: f32 },
    Label { text: String, at: (f32, f32), color: Hsla },
    Circle { center: (f32, f32), radius: f32, color: Hsla },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Clear { .. } => "clear",
            DrawCommand::FillRect { .. } => "fill_rect",
            DrawCommand::StrokeRect { .. } => "stroke_rect",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Outline { .. } => "outline",
            DrawCommand::Label { .. } => "label",
            DrawCommand::Circle { .. } => "circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub view: View,
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command kinds in draw order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.commands.iter().map(DrawCommand::kind).collect()
    }
}

/// Anything that can draw a scene.
pub trait Renderer {
    fn render(&mut self, scene: &Scene);
}

impl<F: FnMut(&Scene)> Renderer for F {
    fn render(&mut self, scene: &Scene) {
        self(scene)
    }
}

fn outline_chains(outline: &Outline, cell_size: f32, dx: i32, dy: i32) -> Vec<Vec<(f32, f32)>> {
    outline
        .chains()
        .iter()
        .map(|chain| {
            chain
                .points()
                .iter()
                .map(|p| ((p.x + dx) as f32 * cell_size, (p.y + dy) as f32 * cell_size))
                .collect()
        })
        .collect()
}

fn cell_rect(x: i32, y: i32, cell_size: f32) -> WorldRect {
    WorldRect { x: x as f32 * cell_size, y: y as f32 * cell_size, width: cell_size, height: cell_size }
}

/// World-space area worth drawing: the viewport (plus margin) clipped to the board.
fn visible_rect(view: &View, viewport: Viewport, board_world: f32) -> Option<WorldRect> {
    let top_left = view.screen_to_world(ScreenPoint::new(0.0, 0.0));
    let bottom_right = view.screen_to_world(ScreenPoint::new(viewport.width, viewport.height));
    let x0 = (top_left.x - CULLING_MARGIN).max(0.0);
    let y0 = (top_left.y - CULLING_MARGIN).max(0.0);
    let x1 = (bottom_right.x + CULLING_MARGIN).min(board_world);
    let y1 = (bottom_right.y + CULLING_MARGIN).min(board_world);
    (x0 < x1 && y0 < y1).then(|| WorldRect::from_edges(x0, y0, x1, y1))
}

/// Build the frame's draw list in back-to-front order.
pub fn build_scene(
    viewport: Viewport,
    state: &EditorState,
    settings: &EditorSettings,
    palette: &Palette,
) -> Scene {
    profile_scope!("build_scene");

    let cs = settings.cell_size;
    let board_world = settings.board_world_size();
    let bounds = GridBounds::new(settings.board_size);
    let mut commands = Vec::new();

    commands.push(DrawCommand::Clear { color: palette.background });
    commands.push(DrawCommand::FillRect {
        rect: WorldRect::from_edges(0.0, 0.0, board_world, board_world),
        color: palette.board,
    });

    let visible = visible_rect(&state.view, viewport, board_world);

    if let Some(area) = visible {
        let first_col = (area.x / cs).ceil() as i32;
        let last_col = (area.right() / cs).floor() as i32;
        for i in first_col..=last_col {
            let x = i as f32 * cs;
            commands.push(DrawCommand::Line {
                from: (x, area.y),
                to: (x, area.bottom()),
                color: palette.grid_line,
                width: 1.0,
            });
        }
        let first_row = (area.y / cs).ceil() as i32;
        let last_row = (area.bottom() / cs).floor() as i32;
        for j in first_row..=last_row {
            let y = j as f32 * cs;
            commands.push(DrawCommand::Line {
                from: (area.x, y),
                to: (area.right(), y),
                color: palette.grid_line,
                width: 1.0,
            });
        }

        for cell in state.selection.iter() {
            let rect = cell_rect(cell.x, cell.y, cs);
            if rect.intersects(&area) {
                commands.push(DrawCommand::FillRect { rect, color: palette.selection });
            }
        }
    }

    for region in &state.regions {
        commands.push(DrawCommand::Outline {
            chains: outline_chains(region.outline(), cs, 0, 0),
            fill: None,
            stroke: palette.region_stroke,
            width: 1.5,
        });
        if let Some((cx, cy)) = region.outline().centroid() {
            commands.push(DrawCommand::Label {
                text: region.name.clone(),
                at: (cx as f32 * cs, cy as f32 * cs),
                color: palette.region_label,
            });
        }
    }

    if let Some(region) = state.hover.and_then(|id| state.region(id)) {
        commands.push(DrawCommand::Outline {
            chains: outline_chains(region.outline(), cs, 0, 0),
            fill: Some(palette.hover),
            stroke: palette.hover.opacity(1.0),
            width: 1.5,
        });
    }

    if let Some(region) = state.selected.and_then(|id| state.region(id)) {
        commands.push(DrawCommand::Outline {
            chains: outline_chains(region.outline(), cs, 0, 0),
            fill: None,
            stroke: palette.selected_region,
            width: 3.0,
        });
    }

    match &state.overlay {
        Overlay::None => {}
        Overlay::Box { from, to, subtract } => {
            let a = bounds.clamp_cell(*from);
            let b = bounds.clamp_cell(*to);
            let rect = WorldRect::from_edges(
                a.x.min(b.x) as f32 * cs,
                a.y.min(b.y) as f32 * cs,
                (a.x.max(b.x) + 1) as f32 * cs,
                (a.y.max(b.y) + 1) as f32 * cs,
            );
            let color = if *subtract { palette.box_subtract } else { palette.box_add };
            commands.push(DrawCommand::FillRect { rect, color });
            commands.push(DrawCommand::StrokeRect { rect, color: color.opacity(1.0), width: 1.0 });
        }
        Overlay::Relocate { region, dx, dy } => {
            if let Some(region) = state.region(*region) {
                commands.push(DrawCommand::Outline {
                    chains: outline_chains(region.outline(), cs, *dx, *dy),
                    fill: Some(palette.relocate_preview),
                    stroke: palette.relocate_preview.opacity(1.0),
                    width: 2.0,
                });
            }
        }
        Overlay::Stroke { points } => {
            let world: Vec<(f32, f32)> = points
                .iter()
                .map(|p| (p.x as f32 * cs, p.y as f32 * cs))
                .collect();
            for pair in world.windows(2) {
                commands.push(DrawCommand::Line {
                    from: pair[0],
                    to: pair[1],
                    color: palette.stroke_marker,
                    width: 1.5,
                });
            }
            for center in world {
                commands.push(DrawCommand::Circle {
                    center,
                    radius: STROKE_MARKER_RADIUS,
                    color: palette.stroke_marker,
                });
            }
        }
    }

    Scene { view: state.view, viewport, commands }
}
