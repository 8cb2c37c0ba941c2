use super::*;

#[test]
fn axis_labels_round_trip_names_with_spaces() {
    let axis = Axis::new("Time point", 12);
    let label = axis_label(&axis);
    assert_eq!(label, "Time point (12)");
    assert_eq!(parse_axis_label(&label), Some(axis));
}

#[test]
fn malformed_axis_labels() {
    assert_eq!(parse_axis_label("Z"), None);
    assert_eq!(parse_axis_label("Z (x)"), None);
    assert_eq!(parse_axis_label("Z (4"), None);
}

#[test]
fn node_headers() {
    assert_eq!(node_header(OverlayKind::Polyline, 3), "# Polyline 3 nodes:");
    assert_eq!(parse_node_header("# Freeform 2 nodes:"), Some(("Freeform", 2)));
    assert_eq!(parse_node_header("# Basic statistics"), None);
    assert_eq!(parse_node_header("# Polyline two nodes:"), None);
    assert_eq!(parse_node_header("# Polyline 1 nodes: extra"), None);
    assert_eq!(parse_node_header("Polyline 1 nodes:"), None);
}

#[test]
fn sanitize_flattens_row_breakers() {
    assert_eq!(sanitize("a\tb\nc\r\nd"), "a b c  d");
}
