use super::*;

#[test]
fn offset_from_subtracts_origin() {
    let p = Point::new(10.0, 20.0);
    let origin = Point::new(3.0, 5.0);
    assert_eq!(p.offset_from(origin), Point::new(7.0, 15.0));
}

#[test]
fn translate_adds_deltas() {
    let p = Point::new(1.0, 2.0).translate(4.0, -6.0);
    assert_eq!(p, Point::new(5.0, -4.0));
}

#[test]
fn finite_accepts_ordinary_points() {
    assert_eq!(
        finite(Point::new(0.0, -12.5)),
        Some(Point::new(0.0, -12.5))
    );
}

#[test]
fn finite_rejects_nan_and_infinity() {
    assert_eq!(finite(Point::new(f64::NAN, 0.0)), None);
    assert_eq!(finite(Point::new(0.0, f64::INFINITY)), None);
    assert_eq!(finite(Point::new(f64::NEG_INFINITY, f64::NAN)), None);
}

#[test]
fn surface_size_fills_viewport_below_top_offset() {
    assert_eq!(surface_size(1280.0, 800.0, 64.0), (1280.0, 736.0));
}

#[test]
fn surface_size_with_zero_offset_matches_viewport() {
    assert_eq!(surface_size(390.0, 844.0, 0.0), (390.0, 844.0));
}

#[test]
fn surface_size_never_goes_negative() {
    assert_eq!(surface_size(-5.0, 50.0, 80.0), (0.0, 0.0));
}
