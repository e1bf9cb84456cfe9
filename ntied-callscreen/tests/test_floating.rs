use std::time::Duration;

use ntied_callscreen::presentation::{
    FloatingPreview, FloatingVideoPositioner, Point, PreviewOrigin, Rect, Size, Vector,
};

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 300.0, 600.0)
}

fn positioner() -> FloatingVideoPositioner {
    FloatingVideoPositioner::new(Size::new(90.0, 120.0))
}

#[test]
fn test_unset_origin_goes_to_top_trailing_corner() {
    let rect = positioner().snap(bounds(), PreviewOrigin::Unset);
    assert_eq!(rect.origin, Point::new(210.0, 0.0));
    assert_eq!(rect.size, Size::new(90.0, 120.0));
}

#[test]
fn test_unset_origin_respects_offset_bounds() {
    let bounds = Rect::new(16.0, 44.0, 300.0, 600.0);
    let rect = positioner().snap(bounds, PreviewOrigin::Unset);
    assert_eq!(rect.origin, Point::new(226.0, 44.0));
}

#[test]
fn test_explicit_zero_origin_is_a_real_position() {
    // Flush with the leading and top edges, so nothing moves.
    let rect = positioner().snap(bounds(), PreviewOrigin::At(Point::ZERO));
    assert_eq!(rect.origin, Point::ZERO);
}

#[test]
fn test_inside_bounds_snaps_to_nearer_horizontal_edge() {
    // Leading distance 100, trailing distance 110.
    let rect = positioner().snap(bounds(), PreviewOrigin::At(Point::new(100.0, 50.0)));
    assert_eq!(rect.origin, Point::new(0.0, 50.0));

    // Leading distance 150, trailing distance 60.
    let rect = positioner().snap(bounds(), PreviewOrigin::At(Point::new(150.0, 50.0)));
    assert_eq!(rect.origin, Point::new(210.0, 50.0));
}

#[test]
fn test_horizontal_tie_goes_to_trailing_edge() {
    // Leading distance 105 equals trailing distance 105.
    let rect = positioner().snap(bounds(), PreviewOrigin::At(Point::new(105.0, 300.0)));
    assert_eq!(rect.origin, Point::new(210.0, 300.0));
}

#[test]
fn test_flush_trailing_keeps_position() {
    let rect = positioner().snap(bounds(), PreviewOrigin::At(Point::new(210.0, 250.0)));
    assert_eq!(rect.origin, Point::new(210.0, 250.0));
}

#[test]
fn test_overflow_left_and_bottom() {
    let rect = positioner().snap(bounds(), PreviewOrigin::At(Point::new(-40.0, 700.0)));
    assert_eq!(rect.origin, Point::new(0.0, 480.0));
}

#[test]
fn test_result_always_inside_bounds() {
    let positioner = positioner();
    let bounds = bounds();
    for x in (-200..=500).step_by(25) {
        for y in (-200..=800).step_by(25) {
            let origin = PreviewOrigin::At(Point::new(x as f64, y as f64));
            let rect = positioner.snap(bounds, origin);
            assert!(
                bounds.contains_rect(&rect),
                "({x}, {y}) snapped outside: {rect:?}"
            );
        }
    }
}

#[test]
fn test_snap_is_pure() {
    let origin = PreviewOrigin::At(Point::new(42.0, 17.0));
    assert_eq!(
        positioner().snap(bounds(), origin),
        positioner().snap(bounds(), origin)
    );
}

#[test]
fn test_fling_settles_at_nearest_edge_of_destination() {
    let mut preview = FloatingPreview::new(Size::new(90.0, 120.0), Duration::from_millis(250));
    preview.set_bounds(bounds());
    assert_eq!(preview.frame().unwrap().origin, Point::new(210.0, 0.0));

    // Drag towards the middle, then fling left and down.
    preview.pan_changed(Vector::new(-100.0, 200.0));
    assert_eq!(preview.frame().unwrap().origin, Point::new(110.0, 200.0));
    let settled = preview
        .pan_ended(Vector::new(-400.0, 200.0))
        .expect("bounds are known");
    // Destination (10, 250): leading edge is nearer.
    assert_eq!(settled.origin, Point::new(0.0, 250.0));
    assert!(!preview.is_dragging());
    assert_eq!(preview.frame().unwrap(), settled);
}

#[test]
fn test_fling_past_bottom_clamps_to_bottom() {
    let mut preview = FloatingPreview::new(Size::new(90.0, 120.0), Duration::from_millis(250));
    preview.set_bounds(bounds());
    preview.pan_changed(Vector::new(0.0, 300.0));
    let settled = preview.pan_ended(Vector::new(0.0, 4000.0)).unwrap();
    assert_eq!(settled.origin, Point::new(210.0, 480.0));
}

#[test]
fn test_layout_change_resnaps_current_origin() {
    let mut preview = FloatingPreview::new(Size::new(90.0, 120.0), Duration::ZERO);
    preview.set_bounds(bounds());
    preview.pan_changed(Vector::new(0.0, 400.0));
    preview.pan_ended(Vector::default());
    assert_eq!(preview.frame().unwrap().origin, Point::new(210.0, 400.0));

    // Rotate to landscape: the old origin overflows the bottom.
    preview.set_bounds(Rect::new(0.0, 0.0, 600.0, 300.0));
    let frame = preview.frame().unwrap();
    assert_eq!(frame.origin, Point::new(0.0, 180.0));
    assert_eq!(frame.size, Size::new(90.0, 120.0));
}

#[test]
fn test_no_frame_without_bounds() {
    let mut preview = FloatingPreview::new(Size::new(90.0, 120.0), Duration::ZERO);
    assert!(preview.frame().is_none());
    preview.pan_changed(Vector::new(10.0, 10.0));
    assert!(preview.pan_ended(Vector::default()).is_none());
    assert_eq!(preview.origin(), PreviewOrigin::Unset);
}
