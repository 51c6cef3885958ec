//! Unit tests for the camera and coordinate conversions.

use floorgrid::input::coords::{CoordinateContext, CoordinateConverter};
use floorgrid::view::{ScaleLimits, ScreenPoint, View, WorldPoint};
use floorgrid::{Cell, GridPoint};

const EPS: f32 = 1e-3;

fn assert_close(a: ScreenPoint, b: ScreenPoint) {
    assert!(
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
        "{a:?} != {b:?}"
    );
}

#[test]
fn test_zoom_in_keeps_cursor_world_point_fixed() {
    let view = View::new(0.0, 0.0, 1.0);
    let cursor = ScreenPoint::new(100.0, 100.0);
    let world_before = view.screen_to_world(cursor);

    let zoomed = view.zoomed_at(cursor, -120.0, 0.0015, ScaleLimits::default());

    assert!(zoomed.scale > 1.0);
    assert_close(zoomed.world_to_screen(world_before), cursor);
}

#[test]
fn test_zoom_invariance_from_panned_view() {
    let view = View::new(-37.5, 81.0, 2.0);
    for (x, y, delta) in [(10.0, 20.0, 240.0), (640.0, 5.0, -60.0), (0.0, 0.0, 500.0)] {
        let cursor = ScreenPoint::new(x, y);
        let world = view.screen_to_world(cursor);
        let zoomed = view.zoomed_at(cursor, delta, 0.0015, ScaleLimits::default());
        assert_close(zoomed.world_to_screen(world), cursor);
    }
}

#[test]
fn test_zoom_clamps_scale() {
    let limits = ScaleLimits { min: 0.5, max: 2.0 };
    let view = View::default();
    let cursor = ScreenPoint::new(50.0, 50.0);

    let far_in = view.zoomed_at(cursor, -5_000.0, 0.0015, limits);
    assert_eq!(far_in.scale, 2.0);
    let far_out = view.zoomed_at(cursor, 5_000.0, 0.0015, limits);
    assert_eq!(far_out.scale, 0.5);
}

#[test]
fn test_pan_shifts_translation() {
    let view = View::new(1.0, 2.0, 3.0).panned(10.0, -5.0);
    assert_eq!(view, View::new(11.0, -3.0, 3.0));
}

#[test]
fn test_centered_on_fits_board() {
    let view = View::centered_on(640.0, (800.0, 600.0), ScaleLimits::default());
    assert!((view.scale - 600.0 / 640.0).abs() < EPS);
    let top_left = view.world_to_screen(WorldPoint::new(0.0, 0.0));
    let bottom_right = view.world_to_screen(WorldPoint::new(640.0, 640.0));
    assert!((top_left.x - (800.0 - bottom_right.x)).abs() < EPS);
    assert!(top_left.y.abs() < EPS);
}

#[test]
fn test_screen_to_cell_floors_and_point_rounds() {
    let view = View::new(20.0, 10.0, 2.0);
    let ctx = CoordinateContext::new(&view, 10.0);

    // world = ((59 - 20) / 2, (33 - 10) / 2) = (19.5, 11.5)
    let screen = ScreenPoint::new(59.0, 33.0);
    assert_eq!(CoordinateConverter::screen_to_cell(screen, &ctx), Cell::new(1, 1));
    assert_eq!(CoordinateConverter::screen_to_point(screen, &ctx), GridPoint::new(2, 1));

    // Left of the board maps to negative cells, never wraps
    let outside = ScreenPoint::new(0.0, 0.0);
    assert_eq!(CoordinateConverter::screen_to_cell(outside, &ctx), Cell::new(-1, -1));
}
