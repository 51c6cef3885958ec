//! Unit tests for commands and undo/redo history at the store level.

use crate::helpers::{cells, rect};
use floorgrid::commands::{
    AddRegion, ApplySelection, CleanSegments, ClearRegions, ClearSelection, Command, DeleteRegion,
    MoveRegion, RenameRegion, SetHover, SetSelectedRegion, ToggleCell,
};
use floorgrid::history::History;
use floorgrid::store::{EditorState, Store};
use floorgrid::types::GridBounds;
use floorgrid::{Cell, EditorError, GridPoint, RegionId};

fn store() -> Store {
    Store::new(EditorState::default(), GridBounds::new(8))
}

fn select(cells: floorgrid::CellSet) -> Box<dyn Command> {
    Box::new(ApplySelection::new(cells, false))
}

// ============================================================================
// Branching
// ============================================================================

#[test]
fn test_new_commit_discards_redo_branch() {
    let mut store = store();
    let mut history = History::new(50);

    history.commit(select(cells(&[(0, 0)])), &mut store).unwrap(); // A
    history.commit(select(cells(&[(1, 0)])), &mut store).unwrap(); // B
    assert!(history.undo(&mut store));
    history.commit(select(cells(&[(5, 5)])), &mut store).unwrap(); // C

    assert!(!history.can_redo());
    assert!(!history.redo(&mut store), "B must be gone");
    assert_eq!(store.state().selection, cells(&[(0, 0), (5, 5)]));
}

#[test]
fn test_undo_redo_walks_both_stacks() {
    let mut store = store();
    let mut history = History::default();

    history.commit(select(rect((0, 0), (1, 1), 8)), &mut store).unwrap();
    history
        .commit(Box::new(AddRegion::from_selection("Kitchen")), &mut store)
        .unwrap();
    assert_eq!(history.undo_labels(), vec!["select_cells", "add_region"]);

    assert!(history.undo(&mut store));
    assert!(store.state().regions.is_empty());
    assert_eq!(store.state().selection.len(), 4);

    assert!(history.redo(&mut store));
    assert_eq!(store.state().regions.len(), 1);
    assert_eq!(store.state().regions[0].id, RegionId(1));
    assert!(store.state().selection.is_empty());

    assert!(!history.redo(&mut store));
}

#[test]
fn test_failed_commit_is_not_recorded() {
    let mut store = store();
    let mut history = History::default();
    history.commit(select(cells(&[(0, 0), (2, 0)])), &mut store).unwrap();
    let before = store.state().clone();

    let err = history
        .commit(Box::new(AddRegion::from_selection("Split")), &mut store)
        .unwrap_err();

    assert_eq!(err, EditorError::Disconnected { components: 2 });
    assert_eq!(store.state(), &before, "selection is preserved");
    assert_eq!(history.undo_len(), 1);
}

#[test]
fn test_noop_commits_are_dropped() {
    let mut store = store();
    let mut history = History::default();

    assert!(!history.commit(Box::new(ClearSelection::new()), &mut store).unwrap());
    assert!(!history.commit(Box::new(ClearRegions::new()), &mut store).unwrap());
    assert!(!history.can_undo());
}

#[test]
fn test_limit_drops_oldest_entries() {
    let mut store = store();
    let mut history = History::new(3);
    for x in 0..5 {
        history.commit(Box::new(ToggleCell::new(Cell::new(x, 0))), &mut store).unwrap();
    }
    assert_eq!(history.undo_len(), 3);
    while history.undo(&mut store) {}
    assert_eq!(store.state().selection, cells(&[(0, 0), (1, 0)]));
}

// ============================================================================
// Command symmetry
// ============================================================================

/// execute -> undo restores the prior state; execute -> undo -> redo matches
/// execute alone.
fn assert_symmetric(mut setup: Store, make: impl Fn() -> Box<dyn Command>) {
    let before = setup.state().clone();

    let mut once = store_like(&setup);
    make().execute(&mut once).unwrap();

    let mut command = make();
    command.execute(&mut setup).unwrap();
    command.undo(&mut setup);
    assert_eq!(setup.state(), &before, "{} undo is not exact", command.label());

    command.execute(&mut setup).unwrap();
    assert_eq!(setup.state(), once.state(), "{} redo differs", command.label());
}

fn store_like(store: &Store) -> Store {
    Store::new(store.state().clone(), store.bounds())
}

fn store_with_region() -> Store {
    let mut store = store();
    let mut history = History::default();
    history.commit(select(rect((0, 0), (1, 1), 8)), &mut store).unwrap();
    history
        .commit(Box::new(AddRegion::from_selection("Kitchen")), &mut store)
        .unwrap();
    history.commit(select(cells(&[(6, 6)])), &mut store).unwrap();
    store
}

#[test]
fn test_every_undoable_command_is_symmetric() {
    assert_symmetric(store(), || select(rect((2, 2), (3, 3), 8)));
    assert_symmetric(store_with_region(), || {
        Box::new(ApplySelection::new(cells(&[(6, 6)]), true))
    });
    assert_symmetric(store_with_region(), || Box::new(ToggleCell::new(Cell::new(6, 5))));
    assert_symmetric(store_with_region(), || Box::new(ClearSelection::new()));
    assert_symmetric(store_with_region(), || Box::new(AddRegion::from_selection("Hall")));
    assert_symmetric(store_with_region(), || Box::new(MoveRegion::new(RegionId(1), 2, 1)));
    assert_symmetric(store_with_region(), || Box::new(DeleteRegion::new(RegionId(1))));
    assert_symmetric(store_with_region(), || Box::new(ClearRegions::new()));
    assert_symmetric(store_with_region(), || Box::new(RenameRegion::new(RegionId(1), "Pantry")));
    // Trims the left column of the kitchen
    assert_symmetric(store_with_region(), || Box::new(CleanSegments::new(lasso((0, 0), (1, 2)))));
    // Removes the hovered, selected closet outright
    assert_symmetric(store_with_focused_closet(), || Box::new(CleanSegments::new(lasso((4, 4), (5, 5)))));
}

/// Closed rectangular stroke between two grid vertices.
fn lasso(from: (i32, i32), to: (i32, i32)) -> Vec<GridPoint> {
    vec![
        GridPoint::new(from.0, from.1),
        GridPoint::new(to.0, from.1),
        GridPoint::new(to.0, to.1),
        GridPoint::new(from.0, to.1),
    ]
}

/// One-cell region at (4, 4) that is both hovered and selected.
fn store_with_focused_closet() -> Store {
    let mut store = store();
    AddRegion::with_cells("Closet", cells(&[(4, 4)])).execute(&mut store).unwrap();
    SetHover::new(Some(RegionId(1))).execute(&mut store).unwrap();
    SetSelectedRegion::new(Some(RegionId(1))).execute(&mut store).unwrap();
    store
}

#[test]
fn test_clean_undo_restores_focus_on_removed_region() {
    let mut store = store_with_focused_closet();
    let mut history = History::default();

    history
        .commit(Box::new(CleanSegments::new(lasso((4, 4), (5, 5)))), &mut store)
        .unwrap();
    assert!(store.state().regions.is_empty());
    assert_eq!(store.state().selected, None);

    assert!(history.undo(&mut store));
    assert_eq!(store.state().regions.len(), 1);
    assert_eq!(store.state().hover, Some(RegionId(1)));
    assert_eq!(store.state().selected, Some(RegionId(1)));
}

#[test]
fn test_move_off_board_is_rejected() {
    let mut store = store_with_region();
    let before = store.state().clone();
    let err = MoveRegion::new(RegionId(1), 7, 0).execute(&mut store).unwrap_err();
    assert!(matches!(err, EditorError::OutOfBounds { .. }));
    assert_eq!(store.state(), &before);
}

#[test]
fn test_unknown_region_is_rejected() {
    let mut store = store();
    assert_eq!(
        DeleteRegion::new(RegionId(9)).execute(&mut store),
        Err(EditorError::UnknownRegion(RegionId(9)))
    );
}
