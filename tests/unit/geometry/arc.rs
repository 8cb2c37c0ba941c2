use super::*;

#[test]
fn ellipse_outline_is_symmetric_and_closed() {
    let pts = ellipse_points(Point::new(10.0, 20.0), 4.0, 2.0);
    assert_eq!(pts.len(), 2 * ARC_RESOLUTION - 2);
    assert_eq!(pts[0], Point::new(14.0, 20.0));
    assert!((pts[ARC_RESOLUTION - 1].x - 6.0).abs() < 1e-12);

    // Every top sample has a mirrored bottom sample.
    for k in 1..ARC_RESOLUTION - 1 {
        let top = pts[k];
        let bottom = pts[2 * ARC_RESOLUTION - 2 - k];
        assert!((top.x - bottom.x).abs() < 1e-12);
        assert!(((top.y - 20.0) + (bottom.y - 20.0)).abs() < 1e-12);
    }
}

#[test]
fn ellipse_polygon_area_approaches_analytic_area() {
    let poly = ellipse_polygon(Point::ZERO, 5.0, 3.0).unwrap();
    let exact = std::f64::consts::PI * 15.0;
    assert!(poly.area() < exact);
    assert!((exact - poly.area()) / exact < 0.01);
}

#[test]
fn zero_radius_ellipse_is_invalid() {
    assert!(ellipse_polygon(Point::ZERO, 0.0, 3.0).is_err());
}

#[test]
fn ring_covers_the_annulus() {
    let ring = ellipse_ring(Point::ZERO, (5.0, 5.0), (4.0, 4.0));
    assert_eq!(ring.len(), 2 * ARC_RESOLUTION - 2);
    let area: f64 = ring.iter().map(Polygon::area).sum();
    let exact = std::f64::consts::PI * (25.0 - 16.0);
    assert!((exact - area).abs() / exact < 0.01);
}
