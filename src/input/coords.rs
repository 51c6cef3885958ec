//! Coordinate conversion utilities for canvas interactions.
//!
//! Centralizes the screen -> world -> grid formulas so the input handlers
//! never repeat them.

use crate::types::{Cell, GridPoint};
use crate::view::{ScreenPoint, View, WorldPoint};

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    pub view: &'a View,
    pub cell_size: f32,
}

impl<'a> CoordinateContext<'a> {
    #[inline]
    pub fn new(view: &'a View, cell_size: f32) -> Self {
        Self { view, cell_size }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert screen position to world position
    #[inline]
    pub fn screen_to_world(screen: ScreenPoint, ctx: &CoordinateContext<'_>) -> WorldPoint {
        ctx.view.screen_to_world(screen)
    }

    /// Cell containing a world position (floor)
    #[inline]
    pub fn world_to_cell(world: WorldPoint, cell_size: f32) -> Cell {
        Cell::new(
            (world.x / cell_size).floor() as i32,
            (world.y / cell_size).floor() as i32,
        )
    }

    /// Nearest grid vertex to a world position (round)
    #[inline]
    pub fn world_to_point(world: WorldPoint, cell_size: f32) -> GridPoint {
        GridPoint::new(
            (world.x / cell_size).round() as i32,
            (world.y / cell_size).round() as i32,
        )
    }

    #[inline]
    pub fn screen_to_cell(screen: ScreenPoint, ctx: &CoordinateContext<'_>) -> Cell {
        Self::world_to_cell(Self::screen_to_world(screen, ctx), ctx.cell_size)
    }

    #[inline]
    pub fn screen_to_point(screen: ScreenPoint, ctx: &CoordinateContext<'_>) -> GridPoint {
        Self::world_to_point(Self::screen_to_world(screen, ctx), ctx.cell_size)
    }

    /// World position of a grid vertex
    #[inline]
    pub fn point_to_world(point: GridPoint, cell_size: f32) -> WorldPoint {
        WorldPoint::new(point.x as f32 * cell_size, point.y as f32 * cell_size)
    }

    /// World position of a cell's center
    #[inline]
    pub fn cell_center(cell: Cell, cell_size: f32) -> WorldPoint {
        WorldPoint::new(
            (cell.x as f32 + 0.5) * cell_size,
            (cell.y as f32 + 0.5) * cell_size,
        )
    }
}
