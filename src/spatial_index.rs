//! Hit-Test Index
//!
//! Answers "which region is under this cell?" for hover and press handling.
//! An R-tree over region bounding boxes narrows the candidates, then each
//! candidate's cell hash set gives the exact answer.
//!
//! The index is rebuilt from scratch whenever the region list changes and is
//! never patched in place, so it is always a pure function of the regions it
//! was synced from.

use crate::perf::measure_and_log;
use crate::profile_scope;
use crate::types::{Cell, Region, RegionId};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashSet;

/// Bounding box of one indexed region. `slot` is its position in sync order.
#[derive(Debug, Clone, Copy)]
pub struct RegionEnvelope {
    pub slot: usize,
    pub min: [i32; 2],
    pub max: [i32; 2],
}

impl RTreeObject for RegionEnvelope {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PartialEq for RegionEnvelope {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

#[derive(Debug)]
struct IndexedRegion {
    id: RegionId,
    cells: HashSet<Cell>,
}

/// Cell -> region lookup, rebuilt on every region change.
#[derive(Debug)]
pub struct HitTestIndex {
    tree: RTree<RegionEnvelope>,
    regions: Vec<IndexedRegion>,
    revision: Option<u64>,
}

impl HitTestIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            regions: Vec::new(),
            revision: None,
        }
    }

    pub fn from_regions(regions: &[Region]) -> Self {
        let mut index = Self::new();
        index.sync(regions);
        index
    }

    /// Rebuild from `regions` (oldest first).
    pub fn sync(&mut self, regions: &[Region]) {
        profile_scope!("hit_index_sync");

        let mut envelopes = Vec::with_capacity(regions.len());
        self.regions = regions
            .iter()
            .enumerate()
            .map(|(slot, region)| {
                if let Some((min, max)) = region.cells().bounds() {
                    envelopes.push(RegionEnvelope {
                        slot,
                        min: [min.x, min.y],
                        max: [max.x, max.y],
                    });
                }
                IndexedRegion {
                    id: region.id,
                    cells: region.cells().iter().collect(),
                }
            })
            .collect();
        self.tree = RTree::bulk_load(envelopes);
        self.revision = None;

        tracing::trace!(regions = self.regions.len(), "Hit-test index rebuilt");
    }

    /// Rebuild only if the index was built for a different region revision.
    /// Returns true if a rebuild happened.
    pub fn sync_if_stale(&mut self, regions: &[Region], revision: u64) -> bool {
        if !self.is_stale(revision) {
            return false;
        }
        measure_and_log("hit_index_rebuild", 8.0, || self.sync(regions));
        self.revision = Some(revision);
        true
    }

    pub fn is_stale(&self, revision: u64) -> bool {
        self.revision != Some(revision)
    }

    /// Slots of regions containing `cell`, most recent first.
    fn slots_at(&self, cell: Cell) -> Vec<usize> {
        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&AABB::from_point([cell.x, cell.y]))
            .map(|envelope| envelope.slot)
            .filter(|&slot| self.regions[slot].cells.contains(&cell))
            .collect();
        slots.sort_unstable_by(|a, b| b.cmp(a));
        slots
    }

    /// Smallest region containing `cell`. Equal areas go to the most recent.
    pub fn innermost(&self, cell: Cell) -> Option<RegionId> {
        profile_scope!("hit_test_innermost");

        let mut best: Option<&IndexedRegion> = None;
        for slot in self.slots_at(cell) {
            let candidate = &self.regions[slot];
            if best.is_none_or(|b| candidate.cells.len() < b.cells.len()) {
                best = Some(candidate);
            }
        }
        best.map(|region| region.id)
    }

    /// Every region containing `cell`, most recent first.
    pub fn regions_at(&self, cell: Cell) -> Vec<RegionId> {
        self.slots_at(cell)
            .into_iter()
            .map(|slot| self.regions[slot].id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.regions.clear();
        self.revision = None;
    }
}

impl Default for HitTestIndex {
    fn default() -> Self {
        Self::new()
    }
}
