//! Cleanup strokes.
//!
//! A cleanup stroke is a freehand lasso drawn on grid vertices. Once it has
//! three distinct points it is closed into a polygon and every cell whose
//! center falls inside (even-odd rule) is trimmed out of the regions. A region
//! split by the trim keeps its largest piece; a region trimmed to nothing is
//! removed.

use crate::cells::CellSet;
use crate::error::EditorResult;
use crate::profile_scope;
use crate::types::{Cell, GridBounds, GridPoint, Region, RegionId};

/// Drop consecutive duplicates (and a closing point equal to the first).
pub fn normalize_stroke(points: &[GridPoint]) -> Vec<GridPoint> {
    let mut out: Vec<GridPoint> = Vec::with_capacity(points.len());
    for &point in points {
        if out.last() != Some(&point) {
            out.push(point);
        }
    }
    if out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// True once the stroke encloses something.
pub fn is_closable(points: &[GridPoint]) -> bool {
    normalize_stroke(points).len() >= 3
}

/// Cells whose centers lie inside the closed stroke polygon.
pub fn lasso_cells(points: &[GridPoint], bounds: GridBounds) -> CellSet {
    let polygon = normalize_stroke(points);
    if polygon.len() < 3 {
        return CellSet::new();
    }

    let min_x = polygon.iter().map(|p| p.x).min().unwrap_or(0).max(0);
    let max_x = polygon.iter().map(|p| p.x).max().unwrap_or(0).min(bounds.size);
    let min_y = polygon.iter().map(|p| p.y).min().unwrap_or(0).max(0);
    let max_y = polygon.iter().map(|p| p.y).max().unwrap_or(0).min(bounds.size);

    let mut cells = CellSet::new();
    for y in min_y..max_y {
        for x in min_x..max_x {
            if center_inside(&polygon, x, y) {
                cells.insert(Cell::new(x, y));
            }
        }
    }
    cells
}

fn center_inside(polygon: &[GridPoint], x: i32, y: i32) -> bool {
    let px = x as f64 + 0.5;
    let py = y as f64 + 0.5;
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x as f64, polygon[i].y as f64);
        let (xj, yj) = (polygon[j].x as f64, polygon[j].y as f64);
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Keep the largest 4-connected piece; ties go to the piece holding the
/// smallest cell.
pub fn largest_component(cells: &CellSet) -> CellSet {
    cells
        .components()
        .into_iter()
        .max_by(|a, b| {
            a.len()
                .cmp(&b.len())
                .then_with(|| b.iter().next().cmp(&a.iter().next()))
        })
        .unwrap_or_default()
}

/// Result of trimming the regions with one stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOutcome {
    pub regions: Vec<Region>,
    pub updated: Vec<RegionId>,
    pub removed: Vec<RegionId>,
}

/// Trim every region the stroke covers. `None` when nothing would change.
pub fn trim_regions(
    regions: &[Region],
    points: &[GridPoint],
    bounds: GridBounds,
) -> EditorResult<Option<TrimOutcome>> {
    profile_scope!("cleanup_trim");

    let lasso = lasso_cells(points, bounds);
    if lasso.is_empty() {
        return Ok(None);
    }

    let mut outcome = TrimOutcome {
        regions: Vec::with_capacity(regions.len()),
        updated: Vec::new(),
        removed: Vec::new(),
    };
    for region in regions {
        let hit = region.cells().intersect(&lasso);
        if hit.is_empty() {
            outcome.regions.push(region.clone());
            continue;
        }
        let kept = largest_component(&region.cells().subtract(&hit));
        if kept.is_empty() {
            outcome.removed.push(region.id);
            continue;
        }
        let mut trimmed = region.clone();
        trimmed.set_cells(kept, bounds)?;
        outcome.updated.push(region.id);
        outcome.regions.push(trimmed);
    }

    if outcome.updated.is_empty() && outcome.removed.is_empty() {
        return Ok(None);
    }
    tracing::debug!(
        updated = outcome.updated.len(),
        removed = outcome.removed.len(),
        "Cleanup stroke trimmed regions"
    );
    Ok(Some(outcome))
}
