use super::*;

#[test]
fn lerp_u8_rounds_and_clamps() {
    assert_eq!(lerp_u8(0, 255, 0.5), 128);
    assert_eq!(lerp_u8(10, 20, 0.0), 10);
    assert_eq!(lerp_u8(10, 20, 1.0), 20);
}

#[test]
fn segment_distance_clamps_to_endpoints() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert!((segment_distance(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
    assert!((segment_distance(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-9);
    assert!((segment_distance(Point::new(1.0, 1.0), a, a) - 2f64.sqrt()).abs() < 1e-9);
}

#[test]
fn chain_distance_takes_minimum_segment() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ];
    assert!((chain_distance(Point::new(12.0, 5.0), &pts) - 2.0).abs() < 1e-9);
    assert!(chain_distance(Point::ZERO, &[]).is_infinite());
}

#[test]
fn signed_area_sign_follows_orientation() {
    let ccw = [
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ];
    assert!((signed_area(&ccw) - 4.0).abs() < 1e-12);
    let mut cw = ccw;
    cw.reverse();
    assert!((signed_area(&cw) + 4.0).abs() < 1e-12);
}

#[test]
fn crossing_and_touching_segments_intersect() {
    let o = Point::new(0.0, 0.0);
    assert!(segments_intersect(
        o,
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
        Point::new(2.0, 0.0)
    ));
    assert!(segments_intersect(
        o,
        Point::new(2.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 5.0)
    ));
    assert!(!segments_intersect(
        o,
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0)
    ));
}

#[test]
fn unit_rejects_zero_vectors() {
    assert!(unit(Vec2::ZERO).is_none());
    let u = unit(Vec2::new(3.0, 4.0)).unwrap();
    assert!((u.hypot() - 1.0).abs() < 1e-12);
    assert_eq!(right_normal(Vec2::new(1.0, 0.0)), Vec2::new(0.0, -1.0));
}
