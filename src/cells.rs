//! Cell-set algebra.
//!
//! `CellSet` keeps cells ordered by `(x, y)`, so set operations are linear
//! merges over the two inputs and iteration order is deterministic.

use crate::error::{EditorError, EditorResult};
use crate::types::{Cell, GridBounds};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// An ordered set of grid cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellSet {
    cells: BTreeSet<Cell>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    /// Flip membership. Returns true if the cell is now in the set.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn union(&self, other: &CellSet) -> CellSet {
        self.cells.union(&other.cells).copied().collect()
    }

    pub fn subtract(&self, other: &CellSet) -> CellSet {
        self.cells.difference(&other.cells).copied().collect()
    }

    pub fn intersect(&self, other: &CellSet) -> CellSet {
        self.cells.intersection(&other.cells).copied().collect()
    }

    /// Shift every cell by `(dx, dy)`. Ordering is preserved, so this stays linear.
    pub fn translate(&self, dx: i32, dy: i32) -> CellSet {
        self.iter().map(|cell| cell.offset(dx, dy)).collect()
    }

    /// Inclusive bounding box as `(min, max)` cells.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let first = self.cells.first()?;
        let (mut min, mut max) = (*first, *first);
        for cell in &self.cells {
            min.x = min.x.min(cell.x);
            min.y = min.y.min(cell.y);
            max.x = max.x.max(cell.x);
            max.y = max.y.max(cell.y);
        }
        Some((min, max))
    }

    /// True iff the set is non-empty and every cell is reachable from every
    /// other through edge-sharing neighbors inside the set.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.cells.first() else {
            return false;
        };
        self.flood_from(*start).len() == self.cells.len()
    }

    /// 4-connected components, each in ascending order of its smallest cell.
    pub fn components(&self) -> Vec<CellSet> {
        let mut seen: HashSet<Cell> = HashSet::with_capacity(self.cells.len());
        let mut components = Vec::new();
        for cell in self.iter() {
            if seen.contains(&cell) {
                continue;
            }
            let component = self.flood_from(cell);
            seen.extend(component.iter().copied());
            components.push(component.into_iter().collect());
        }
        components
    }

    fn flood_from(&self, start: Cell) -> HashSet<Cell> {
        let mut visited = HashSet::with_capacity(self.cells.len());
        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(cell) = queue.pop_front() {
            for next in cell.neighbors() {
                if self.cells.contains(&next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    /// First cell that lies off the board, if any.
    pub fn first_out_of_bounds(&self, bounds: GridBounds) -> Option<Cell> {
        self.iter().find(|cell| !bounds.contains_cell(*cell))
    }

    /// Check the set could become a region: non-empty, on the board, one component.
    pub fn validate_region(&self, bounds: GridBounds) -> EditorResult<()> {
        if self.is_empty() {
            return Err(EditorError::EmptySelection);
        }
        if let Some(cell) = self.first_out_of_bounds(bounds) {
            bounds.check_cell(cell)?;
        }
        if !self.is_connected() {
            return Err(EditorError::Disconnected { components: self.components().len() });
        }
        Ok(())
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl Extend<Cell> for CellSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = std::collections::btree_set::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = &'a Cell;
    type IntoIter = std::collections::btree_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Every cell of the rectangle spanned by two corner cells (inclusive),
/// clamped to the board.
pub fn cells_in_rect(a: Cell, b: Cell, bounds: GridBounds) -> CellSet {
    if bounds.size <= 0 {
        return CellSet::new();
    }
    let a = bounds.clamp_cell(a);
    let b = bounds.clamp_cell(b);
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    (min_x..=max_x)
        .flat_map(|x| (min_y..=max_y).map(move |y| Cell::new(x, y)))
        .collect()
}
