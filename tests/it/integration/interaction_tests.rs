//! Pointer interaction state machine tests.

use crate::helpers::{TestEditorBuilder, at_cell, cells, click_cell, drag_cells, rect, select_rect};
use floorgrid::input::InteractionState;
use floorgrid::types::Overlay;
use floorgrid::{Cell, EditorError, Modifiers, PointerButton, PointerEvent, RegionId, ToolMode};

// ============================================================================
// Box selection
// ============================================================================

#[test]
fn test_click_toggles_cell() {
    let mut editor = TestEditorBuilder::new().build();
    click_cell(&mut editor, 3, 4);
    assert_eq!(editor.state().selection, cells(&[(3, 4)]));
    click_cell(&mut editor, 3, 4);
    assert!(editor.state().selection.is_empty());
}

#[test]
fn test_drag_shows_box_overlay_then_commits() {
    let mut editor = TestEditorBuilder::new().build();
    editor.pointer_down(&at_cell(1, 1));
    editor.pointer_move(&at_cell(3, 2));

    assert!(editor.interaction().is_box_selecting());
    assert_eq!(
        editor.state().overlay,
        Overlay::Box { from: Cell::new(1, 1), to: Cell::new(3, 2), subtract: false }
    );
    assert!(editor.state().selection.is_empty(), "nothing committed mid-drag");

    editor.pointer_up(&at_cell(3, 2));
    assert_eq!(editor.state().selection, rect((1, 1), (3, 2), 16));
    assert!(editor.state().overlay.is_none());
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_small_movement_stays_a_click() {
    let mut editor = TestEditorBuilder::new().build();
    let down = at_cell(2, 2);
    editor.pointer_down(&down);
    editor.pointer_move(&PointerEvent::new(down.position.x + 2.0, down.position.y + 1.0));

    assert!(editor.state().overlay.is_none(), "below the drag threshold");
    editor.pointer_up(&PointerEvent::new(down.position.x + 2.0, down.position.y + 1.0));
    assert_eq!(editor.state().selection, cells(&[(2, 2)]));
}

#[test]
fn test_alt_drag_subtracts() {
    let mut editor = TestEditorBuilder::new().build();
    select_rect(&mut editor, (0, 0), (3, 0));

    editor.pointer_down(&at_cell(1, 0).with_modifiers(Modifiers::alt()));
    editor.pointer_move(&at_cell(2, 0));
    editor.pointer_up(&at_cell(2, 0));

    assert_eq!(editor.state().selection, cells(&[(0, 0), (3, 0)]));
}

#[test]
fn test_deselect_tool_subtracts() {
    let mut editor = TestEditorBuilder::new().build();
    select_rect(&mut editor, (0, 0), (2, 2));
    editor.set_tool("deselect").unwrap();

    drag_cells(&mut editor, (0, 0), (2, 0));

    assert_eq!(editor.state().selection, rect((0, 1), (2, 2), 16));
}

#[test]
fn test_forced_tool_suppresses_plain_click() {
    let mut editor = TestEditorBuilder::new().build();
    editor.set_tool("select").unwrap();
    click_cell(&mut editor, 5, 5);
    assert!(editor.state().selection.is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn test_forced_tool_ignores_regions_under_press() {
    let mut editor = TestEditorBuilder::new().with_region("Den", (0, 0), (1, 1)).build();
    editor.set_tool("select").unwrap();

    drag_cells(&mut editor, (0, 0), (2, 0));

    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &rect((0, 0), (1, 1), 16));
    assert_eq!(editor.state().selection, rect((0, 0), (2, 0), 16));
}

#[test]
fn test_box_is_clamped_to_board() {
    let mut editor = TestEditorBuilder::new().with_board_size(4).build();
    editor.pointer_down(&at_cell(2, 2));
    editor.pointer_move(&at_cell(9, 9));
    editor.pointer_up(&at_cell(9, 9));
    assert_eq!(editor.state().selection, rect((2, 2), (3, 3), 4));
}

#[test]
fn test_click_off_board_does_nothing() {
    let mut editor = TestEditorBuilder::new().with_board_size(4).build();
    click_cell(&mut editor, 6, 1);
    assert!(editor.state().selection.is_empty());
    assert_eq!(editor.toasts().count(), 0);
}

// ============================================================================
// Regions, hover, panning
// ============================================================================

#[test]
fn test_click_on_region_selects_it() {
    let mut editor = TestEditorBuilder::new().with_region("Den", (0, 0), (1, 1)).build();
    click_cell(&mut editor, 1, 1);

    assert_eq!(editor.state().selected, Some(RegionId(1)));
    assert!(editor.state().selection.is_empty());
    assert!(!editor.can_undo(), "selecting a region is not an edit");
}

#[test]
fn test_relocation_preview_tracks_offset() {
    let mut editor = TestEditorBuilder::new().with_region("Den", (0, 0), (1, 1)).build();
    editor.pointer_down(&at_cell(0, 0));
    editor.pointer_move(&at_cell(3, 1));

    assert!(editor.interaction().is_relocating());
    assert_eq!(
        editor.state().overlay,
        Overlay::Relocate { region: RegionId(1), dx: 3, dy: 1 }
    );
    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &rect((0, 0), (1, 1), 16));
}

#[test]
fn test_relocation_commits_release_cell_without_move() {
    let mut editor = TestEditorBuilder::new().with_region("Den", (0, 0), (1, 1)).build();

    editor.pointer_down(&at_cell(0, 0));
    editor.pointer_up(&at_cell(2, 1));

    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &rect((2, 1), (3, 2), 16));
    assert!(editor.can_undo());
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_relocation_release_overrides_last_move() {
    let mut editor = TestEditorBuilder::new().with_region("Den", (0, 0), (1, 1)).build();

    editor.pointer_down(&at_cell(0, 0));
    editor.pointer_move(&at_cell(1, 0));
    editor.pointer_up(&at_cell(3, 2));

    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &rect((3, 2), (4, 3), 16));
    assert!(editor.state().overlay.is_none());
}

#[test]
fn test_relocation_release_is_clamped_to_board() {
    let mut editor = TestEditorBuilder::new()
        .with_board_size(4)
        .with_region("Den", (0, 0), (1, 1))
        .build();

    editor.pointer_down(&at_cell(0, 0));
    editor.pointer_up(&at_cell(3, 3));

    assert_eq!(editor.region(RegionId(1)).unwrap().cells(), &rect((2, 2), (3, 3), 4));
}

#[test]
fn test_hover_follows_pointer() {
    let mut editor = TestEditorBuilder::new()
        .with_region("Room", (0, 0), (3, 3))
        .with_region("Closet", (2, 2), (2, 2))
        .build();

    editor.pointer_move(&at_cell(0, 0));
    assert_eq!(editor.state().hover, Some(RegionId(1)));
    editor.pointer_move(&at_cell(2, 2));
    assert_eq!(editor.state().hover, Some(RegionId(2)));
    editor.pointer_move(&at_cell(8, 8));
    assert_eq!(editor.state().hover, None);
    assert!(!editor.can_undo(), "hover is not an edit");
}

#[test]
fn test_middle_button_pans() {
    let mut editor = TestEditorBuilder::new().build();
    let before = editor.state().view;

    editor.pointer_down(&PointerEvent::new(100.0, 100.0).with_button(PointerButton::Middle));
    assert!(editor.interaction().is_panning());
    editor.pointer_move(&PointerEvent::new(130.0, 90.0));
    editor.pointer_up(&PointerEvent::new(130.0, 90.0));

    let after = editor.state().view;
    assert_eq!(after.translate_x, before.translate_x + 30.0);
    assert_eq!(after.translate_y, before.translate_y - 10.0);
    assert!(editor.state().selection.is_empty());
    assert!(!editor.can_undo(), "the camera is not in history");
}

#[test]
fn test_pan_modifier_overrides_tool() {
    let mut editor = TestEditorBuilder::new().with_region("Den", (0, 0), (1, 1)).build();
    editor.pointer_down(&at_cell(0, 0).with_modifiers(Modifiers::pan()));
    assert!(editor.interaction().is_panning());
    editor.pointer_up(&at_cell(0, 0));
    assert_eq!(editor.state().selected, None);
}

#[test]
fn test_secondary_button_is_ignored() {
    let mut editor = TestEditorBuilder::new().build();
    editor.pointer_down(&at_cell(1, 1).with_button(PointerButton::Secondary));
    assert!(editor.interaction().is_idle());
    editor.pointer_up(&at_cell(1, 1));
    assert!(editor.state().selection.is_empty());
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let mut editor = TestEditorBuilder::new().with_region("Den", (9, 9), (11, 11)).build();
    let cursor = PointerEvent::new(100.0, 100.0);
    assert_eq!(editor.hit_test(cursor.position), Some(RegionId(1)));

    editor.wheel_zoom_at(100.0, 100.0, -240.0);

    let view = editor.state().view;
    assert!(view.scale > 1.0);
    let world = view.screen_to_world(cursor.position);
    assert!((world.x - 100.0).abs() < 1e-3);
    assert!((world.y - 100.0).abs() < 1e-3);
    assert_eq!(editor.hit_test(cursor.position), Some(RegionId(1)));
}

#[test]
fn test_reset_view_centers_board() {
    let mut editor = TestEditorBuilder::new().build();
    editor.set_viewport(400.0, 400.0);
    editor.wheel_zoom_at(10.0, 10.0, -500.0);
    editor.reset_view();

    // 16 cells of 10 units fit a 400px viewport at scale 1, centered
    let view = editor.state().view;
    assert_eq!(view.scale, 1.0);
    assert_eq!(view.translate_x, 120.0);
    assert_eq!(view.translate_y, 120.0);
}

// ============================================================================
// Tools & cancellation
// ============================================================================

#[test]
fn test_set_tool_by_id() {
    let mut editor = TestEditorBuilder::new().build();
    for tool in ToolMode::all() {
        editor.set_tool(tool.id()).unwrap();
        assert_eq!(editor.tool(), *tool);
    }
}

#[test]
fn test_unknown_tool_is_rejected() {
    let mut editor = TestEditorBuilder::new().build();
    assert_eq!(
        editor.set_tool("eraser"),
        Err(EditorError::UnknownTool("eraser".into()))
    );
    assert_eq!(editor.tool(), ToolMode::Default);
    assert_eq!(editor.toasts().count(), 1);
}

#[test]
fn test_tool_switch_cancels_gesture() {
    let mut editor = TestEditorBuilder::new().build();
    editor.pointer_down(&at_cell(0, 0));
    editor.pointer_move(&at_cell(4, 4));
    assert!(!editor.state().overlay.is_none());

    editor.set_tool("cleanup").unwrap();

    assert!(matches!(editor.interaction(), InteractionState::Idle));
    assert!(editor.state().overlay.is_none());
    editor.pointer_up(&at_cell(4, 4));
    assert!(editor.state().selection.is_empty());
}
