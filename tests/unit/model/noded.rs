use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square_path() -> NodedCurve {
    NodedCurve::new(vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 4.0)]).unwrap()
}

#[test]
fn needs_two_finite_nodes() {
    assert!(NodedCurve::new(vec![p(0.0, 0.0)]).is_err());
    assert!(NodedCurve::new(vec![p(0.0, 0.0), p(f64::INFINITY, 0.0)]).is_err());
}

#[test]
fn length_tracks_every_mutation() {
    let mut c = square_path();
    assert!((c.length() - 7.0).abs() < 1e-12);

    c.push_node(p(0.0, 4.0));
    assert!((c.length() - 10.0).abs() < 1e-12);

    c.set_node(0, p(0.0, 4.0)).unwrap();
    assert!((c.length() - 12.0).abs() < 1e-12);

    c.remove_node(3).unwrap();
    assert!((c.length() - 9.0).abs() < 1e-12);

    c.insert_node(1, p(0.0, 0.0)).unwrap();
    assert_eq!(c.node_count(), 4);
    assert!((c.length() - (4.0 + 3.0 + 4.0)).abs() < 1e-12);
}

#[test]
fn removal_keeps_the_minimum_node_count() {
    let mut c = NodedCurve::new(vec![p(0.0, 0.0), p(1.0, 0.0)]).unwrap();
    assert!(matches!(
        c.remove_node(0).unwrap_err(),
        OverlayError::Validation(_)
    ));
    assert!(c.remove_node(5).is_err());
}

#[test]
fn highlighted_node_follows_edits() {
    let mut c = square_path();
    c.set_highlighted_node(Some(2)).unwrap();
    c.insert_node(0, p(-1.0, 0.0)).unwrap();
    assert_eq!(c.highlighted_node(), Some(3));
    c.remove_node(1).unwrap();
    assert_eq!(c.highlighted_node(), Some(2));
    c.remove_node(2).unwrap();
    assert_eq!(c.highlighted_node(), None);
    assert!(c.set_highlighted_node(Some(9)).is_err());
}

#[test]
fn nearest_node_and_bounds() {
    let c = square_path();
    let (idx, dist) = c.nearest_node(p(3.0, 3.0));
    assert_eq!(idx, 2);
    assert!((dist - 1.0).abs() < 1e-12);
    let b = c.bounds();
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (0.0, 0.0, 3.0, 4.0));
}

#[test]
fn translate_moves_every_node() {
    let mut c = square_path();
    c.translate(Vec2::new(1.0, -1.0));
    assert_eq!(c.first(), p(1.0, -1.0));
    assert_eq!(c.last(), p(4.0, 3.0));
    assert!((c.length() - 7.0).abs() < 1e-12);
}

#[test]
fn serde_round_trip_goes_through_validation() {
    let c = square_path();
    let json = serde_json::to_string(&c).unwrap();
    let back: NodedCurve = serde_json::from_str(&json).unwrap();
    assert_eq!(back.nodes(), c.nodes());
    assert!(serde_json::from_str::<NodedCurve>(r#"[{"x": 0.0, "y": 0.0}]"#).is_err());
}
