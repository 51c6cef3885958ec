//! Unit tests for the hit-test index.

use crate::helpers::{cells, rect};
use floorgrid::spatial_index::HitTestIndex;
use floorgrid::types::GridBounds;
use floorgrid::{Cell, Region, RegionId};

fn region(id: u64, cells: floorgrid::CellSet) -> Region {
    Region::new(RegionId(id), format!("Region {id}"), cells, GridBounds::new(16)).unwrap()
}

#[test]
fn test_innermost_prefers_smallest_region() {
    let regions = vec![
        region(1, rect((0, 0), (2, 2), 16)),
        region(2, cells(&[(1, 1)])),
    ];
    let index = HitTestIndex::from_regions(&regions);

    assert_eq!(index.innermost(Cell::new(1, 1)), Some(RegionId(2)));
    assert_eq!(index.innermost(Cell::new(0, 0)), Some(RegionId(1)));
    assert_eq!(index.innermost(Cell::new(5, 5)), None);
}

#[test]
fn test_innermost_ignores_insertion_order_for_size() {
    // The small region is older; it still wins
    let regions = vec![
        region(1, cells(&[(1, 1)])),
        region(2, rect((0, 0), (2, 2), 16)),
    ];
    let index = HitTestIndex::from_regions(&regions);
    assert_eq!(index.innermost(Cell::new(1, 1)), Some(RegionId(1)));
}

#[test]
fn test_equal_sizes_go_to_most_recent() {
    let regions = vec![
        region(1, rect((0, 0), (1, 0), 16)),
        region(2, rect((1, 0), (2, 0), 16)),
    ];
    let index = HitTestIndex::from_regions(&regions);
    assert_eq!(index.innermost(Cell::new(1, 0)), Some(RegionId(2)));
    assert_eq!(index.regions_at(Cell::new(1, 0)), vec![RegionId(2), RegionId(1)]);
}

#[test]
fn test_bounding_box_hit_is_not_enough() {
    // An L-shape's bounding box covers (1, 0) but the region does not
    let regions = vec![region(1, cells(&[(0, 0), (0, 1), (1, 1)]))];
    let index = HitTestIndex::from_regions(&regions);
    assert_eq!(index.innermost(Cell::new(1, 0)), None);
    assert_eq!(index.innermost(Cell::new(1, 1)), Some(RegionId(1)));
}

#[test]
fn test_sync_if_stale_rebuilds_once_per_revision() {
    let mut regions = vec![region(1, cells(&[(0, 0)]))];
    let mut index = HitTestIndex::new();

    assert!(index.sync_if_stale(&regions, 1));
    assert!(!index.sync_if_stale(&regions, 1));
    assert_eq!(index.len(), 1);

    regions.push(region(2, cells(&[(4, 4)])));
    assert!(index.is_stale(2));
    assert!(index.sync_if_stale(&regions, 2));
    assert_eq!(index.innermost(Cell::new(4, 4)), Some(RegionId(2)));
}

#[test]
fn test_clear_empties_index() {
    let mut index = HitTestIndex::from_regions(&[region(1, cells(&[(0, 0)]))]);
    index.clear();
    assert!(index.is_empty());
    assert_eq!(index.innermost(Cell::new(0, 0)), None);
}
