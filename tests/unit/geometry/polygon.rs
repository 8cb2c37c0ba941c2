use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn clockwise_input_is_normalized_to_counter_clockwise() {
    let poly = Polygon::new(vec![p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)]).unwrap();
    assert!(poly.area() > 0.0);
    assert!((poly.area() - 4.0).abs() < 1e-12);
}

#[test]
fn bow_tie_quads_are_rejected() {
    let err = Polygon::quad(p(0.0, 0.0), p(2.0, 2.0), p(2.0, 0.0), p(0.0, 2.0)).unwrap_err();
    assert!(matches!(err, OverlayError::InvalidGeometry(_)));
}

#[test]
fn degenerate_polygons_are_rejected() {
    assert!(Polygon::new(vec![p(0.0, 0.0), p(1.0, 1.0)]).is_err());
    assert!(Polygon::new(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)]).is_err());
    assert!(Polygon::new(vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]).is_err());
    assert!(Polygon::new(vec![p(0.0, 0.0), p(f64::NAN, 0.0), p(0.0, 1.0)]).is_err());
}

#[test]
fn segment_band_is_perpendicular() {
    let band = Polygon::segment_band(p(0.0, 0.0), p(10.0, 0.0), 1.0).unwrap();
    assert!((band.area() - 20.0).abs() < 1e-9);
    let b = band.bounds();
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (0.0, -1.0, 10.0, 1.0));
    assert!(Polygon::segment_band(p(1.0, 1.0), p(1.0, 1.0), 1.0).is_err());
}

#[test]
fn containment_uses_polygon_interior() {
    let tri = Polygon::new(vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0)]).unwrap();
    assert!(tri.contains(p(1.0, 1.0)));
    assert!(!tri.contains(p(3.0, 3.0)));
}

#[test]
fn frame_bands_emit_four_sides_or_a_fallback_rectangle() {
    let frame = frame_bands(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0);
    assert_eq!(frame.len(), 4);
    let total: f64 = frame.iter().map(Polygon::area).sum();
    // 12x12 outer minus 8x8 inner
    assert!((total - 80.0).abs() < 1e-9);

    let thin = frame_bands(Rect::new(0.0, 0.0, 1.0, 10.0), 1.0);
    assert_eq!(thin.len(), 1);
    assert!((thin[0].area() - 3.0 * 12.0).abs() < 1e-9);
}

#[test]
fn cross_quads_do_not_overlap() {
    let cross = cross_quads(p(0.0, 0.0), 5.0, 1.0);
    assert_eq!(cross.len(), 3);
    let total: f64 = cross.iter().map(Polygon::area).sum();
    // bar 10x2 plus two arms 2x4
    assert!((total - 36.0).abs() < 1e-9);
}

#[test]
fn region_path_has_one_subpath_per_polygon() {
    let region: Region = frame_bands(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0)
        .into_iter()
        .collect();
    let path = region.to_bez_path();
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 4);
    assert!(region.contains(p(0.5, 5.0)));
    assert!(!region.contains(p(5.0, 5.0)));
    let b = region.bounds().unwrap();
    assert_eq!((b.x0, b.y1), (-1.0, 11.0));
}
