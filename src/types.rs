//! Core types for the floor-plan grid.
//!
//! Cells are the atomic unit of area, grid points are the corners between
//! them, and regions are named connected cell sets with a derived outline.

use crate::cells::CellSet;
use crate::error::{EditorError, EditorResult};
use crate::outline::{self, Outline};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Grid Coordinates
// ============================================================================

/// A unit grid square, addressed by column `x` and row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four edge-sharing neighbors (right, down, left, up).
    pub fn neighbors(self) -> [Cell; 4] {
        [
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
            self.offset(0, -1),
        ]
    }

    /// Top-left corner of the cell.
    #[inline]
    pub fn origin(self) -> GridPoint {
        GridPoint::new(self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A grid vertex (cell corner). Cell `(x, y)` spans points `(x, y)..=(x+1, y+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Row-major ordering key; the smallest key is the top-left-most vertex.
    #[inline]
    pub(crate) fn scan_key(self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An undirected unit segment between two adjacent grid points.
///
/// Endpoints are stored in sorted order so `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub a: GridPoint,
    pub b: GridPoint,
}

impl Edge {
    pub fn new(p: GridPoint, q: GridPoint) -> Self {
        if p <= q { Self { a: p, b: q } } else { Self { a: q, b: p } }
    }

    pub fn is_horizontal(&self) -> bool {
        self.a.y == self.b.y
    }
}

/// Board extent: cells live in `[0, size)`, points in `[0, size]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub size: i32,
}

impl GridBounds {
    pub const fn new(size: i32) -> Self {
        Self { size }
    }

    #[inline]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    #[inline]
    pub fn contains_point(&self, point: GridPoint) -> bool {
        (0..=self.size).contains(&point.x) && (0..=self.size).contains(&point.y)
    }

    pub fn clamp_cell(&self, cell: Cell) -> Cell {
        let max = (self.size - 1).max(0);
        Cell::new(cell.x.clamp(0, max), cell.y.clamp(0, max))
    }

    pub fn clamp_point(&self, point: GridPoint) -> GridPoint {
        let max = self.size.max(0);
        GridPoint::new(point.x.clamp(0, max), point.y.clamp(0, max))
    }

    /// Reject the first cell that falls off the board.
    pub fn check_cell(&self, cell: Cell) -> EditorResult<()> {
        if self.contains_cell(cell) {
            Ok(())
        } else {
            Err(EditorError::OutOfBounds { x: cell.x, y: cell.y, size: self.size })
        }
    }
}

// ============================================================================
// Regions
// ============================================================================

/// Stable region identifier (assigned locally or by the persistence layer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named, connected area of the floor plan.
///
/// The outline is derived from the cells on every change and is never
/// edited on its own.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    cells: CellSet,
    outline: Outline,
}

impl Region {
    /// Build a region after checking the cells are non-empty, on the board and connected.
    pub fn new(
        id: RegionId,
        name: impl Into<String>,
        cells: CellSet,
        bounds: GridBounds,
    ) -> EditorResult<Self> {
        cells.validate_region(bounds)?;
        let outline = outline::extract(&cells)?;
        Ok(Self { id, name: name.into(), cells, outline })
    }

    pub fn from_record(record: RegionRecord, bounds: GridBounds) -> EditorResult<Self> {
        Self::new(record.id, record.name, record.cells.into_iter().collect(), bounds)
    }

    pub fn cells(&self) -> &CellSet {
        &self.cells
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Area in cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Replace the cells, recomputing the outline. Leaves `self` untouched on error.
    pub(crate) fn set_cells(&mut self, cells: CellSet, bounds: GridBounds) -> EditorResult<()> {
        cells.validate_region(bounds)?;
        let outline = outline::extract(&cells)?;
        self.cells = cells;
        self.outline = outline;
        Ok(())
    }

    pub fn record(&self) -> RegionRecord {
        RegionRecord {
            id: self.id,
            name: self.name.clone(),
            cells: self.cells.iter().collect(),
        }
    }
}

/// Serialized form of a region, as exchanged with the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub id: RegionId,
    pub name: String,
    pub cells: Vec<Cell>,
}

// ============================================================================
// Tools & Overlay
// ============================================================================

/// Active editing tool. `Default` decides per press; the others force a gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Default,
    Select,
    Deselect,
    Cleanup,
}

impl ToolMode {
    pub fn id(&self) -> &'static str {
        match self {
            ToolMode::Default => "default",
            ToolMode::Select => "select",
            ToolMode::Deselect => "deselect",
            ToolMode::Cleanup => "cleanup",
        }
    }

    pub fn all() -> &'static [ToolMode] {
        &[ToolMode::Default, ToolMode::Select, ToolMode::Deselect, ToolMode::Cleanup]
    }

    /// Tools other than `Default` override hit-testing on press.
    pub fn is_forced(&self) -> bool {
        !matches!(self, ToolMode::Default)
    }
}

impl FromStr for ToolMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolMode::all()
            .iter()
            .copied()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| EditorError::UnknownTool(s.to_string()))
    }
}

/// Transient drag feedback. Never recorded in history.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    /// Box selection between two cells (inclusive)
    Box { from: Cell, to: Cell, subtract: bool },
    /// In-progress cleanup stroke
    Stroke { points: Vec<GridPoint> },
    /// Region being dragged, shown at its pending offset
    Relocate { region: RegionId, dx: i32, dy: i32 },
}

impl Overlay {
    pub fn is_none(&self) -> bool {
        matches!(self, Overlay::None)
    }
}
