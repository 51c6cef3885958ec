//! Cleanup-stroke trimming through the editor.

use crate::helpers::{TestEditorBuilder, assert_region_count, cells, rect};
use floorgrid::types::Overlay;
use floorgrid::{Editor, GridPoint, PointerEvent, RegionId};

/// Draw a stroke through screen positions with the cleanup tool.
fn stroke(editor: &mut Editor, path: &[(f32, f32)]) {
    editor.set_tool("cleanup").unwrap();
    let (first, rest) = path.split_first().unwrap();
    editor.pointer_down(&PointerEvent::new(first.0, first.1));
    for &(x, y) in rest {
        editor.pointer_move(&PointerEvent::new(x, y));
    }
    let (x, y) = *path.last().unwrap();
    editor.pointer_up(&PointerEvent::new(x, y));
}

#[test]
fn test_stroke_overlay_collects_snapped_points() {
    let mut editor = TestEditorBuilder::new().build();
    editor.set_tool("cleanup").unwrap();
    editor.pointer_down(&PointerEvent::new(1.0, 2.0));
    editor.pointer_move(&PointerEvent::new(3.0, 1.0));
    editor.pointer_move(&PointerEvent::new(19.0, 1.0));

    assert_eq!(
        editor.state().overlay,
        Overlay::Stroke { points: vec![GridPoint::new(0, 0), GridPoint::new(2, 0)] }
    );
}

#[test]
fn test_lasso_trims_covered_cells() {
    let mut editor = TestEditorBuilder::new().with_region("Hall", (0, 0), (3, 3)).build();

    stroke(&mut editor, &[(0.0, 0.0), (20.0, 0.0), (20.0, 40.0), (0.0, 40.0)]);

    let region = editor.region(RegionId(1)).unwrap();
    assert_eq!(region.cells(), &rect((2, 0), (3, 3), 16));
    assert_eq!(region.outline().chains()[0].points()[0], GridPoint::new(2, 0));
    assert!(editor.state().overlay.is_none());

    assert!(editor.undo());
    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &rect((0, 0), (3, 3), 16));
}

#[test]
fn test_split_region_keeps_largest_piece() {
    let mut editor = TestEditorBuilder::new().with_region("Strip", (0, 0), (5, 0)).build();

    // Cut out column 2, leaving 2 cells on the left and 3 on the right
    stroke(&mut editor, &[(20.0, 0.0), (30.0, 0.0), (30.0, 10.0), (20.0, 10.0)]);

    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &cells(&[(3, 0), (4, 0), (5, 0)]));
}

#[test]
fn test_split_tie_keeps_piece_with_smallest_cell() {
    let mut editor = TestEditorBuilder::new().with_region("Strip", (0, 0), (4, 0)).build();

    stroke(&mut editor, &[(20.0, 0.0), (30.0, 0.0), (30.0, 10.0), (20.0, 10.0)]);

    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &cells(&[(0, 0), (1, 0)]));
}

#[test]
fn test_fully_covered_region_is_removed() {
    let mut editor = TestEditorBuilder::new()
        .with_region("Closet", (1, 1), (2, 2))
        .with_region("Room", (6, 6), (8, 8))
        .build();
    editor.select_region(Some(RegionId(1))).unwrap();

    stroke(&mut editor, &[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)]);

    assert_region_count(&editor, 1);
    assert!(editor.region(RegionId(1)).is_none());
    assert_eq!(editor.state().selected, None);

    assert!(editor.undo());
    assert_region_count(&editor, 2);
}

#[test]
fn test_open_or_empty_stroke_changes_nothing() {
    let mut editor = TestEditorBuilder::new().with_region("Hall", (0, 0), (3, 3)).build();

    // Two distinct points cannot enclose anything
    stroke(&mut editor, &[(0.0, 0.0), (40.0, 40.0)]);
    // A closed lasso away from every region
    stroke(&mut editor, &[(100.0, 100.0), (140.0, 100.0), (140.0, 140.0)]);

    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &rect((0, 0), (3, 3), 16));
    assert!(!editor.can_undo());
}

#[test]
fn test_undo_restores_hover_and_selection_of_removed_region() {
    let mut editor = TestEditorBuilder::new().with_region("Closet", (1, 1), (1, 1)).build();
    editor.pointer_move(&PointerEvent::new(15.0, 15.0));
    editor.select_region(Some(RegionId(1))).unwrap();
    assert_eq!(editor.state().hover, Some(RegionId(1)));

    stroke(&mut editor, &[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0)]);
    assert_region_count(&editor, 0);
    assert_eq!(editor.state().hover, None);

    assert!(editor.undo());
    assert_region_count(&editor, 1);
    assert_eq!(editor.state().hover, Some(RegionId(1)));
    assert_eq!(editor.state().selected, Some(RegionId(1)));
    assert!(editor.state().overlay.is_none(), "the stroke preview does not come back");
}
