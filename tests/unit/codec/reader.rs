use super::*;

fn store() -> OverlayStore {
    OverlayStore::new(Axes::from_pairs([("T", 2), ("Z", 3)]).unwrap())
}

const HEADER: &str = "Overlay\tT (2)\tZ (3)\tx1\ty1\tx2\ty2\ttext\tcolor\tfilled\tgroup\tnotes";

fn table(body: &[&str]) -> String {
    let mut lines = vec!["# test", HEADER];
    lines.extend_from_slice(body);
    lines.join("\n") + "\n"
}

#[test]
fn reads_every_plain_variant() {
    let text = table(&[
        "Line\t1\t1\t0\t0\t3\t4\tN/A\tff0000\tN/A\t\t",
        "Arrow\t1\t1\t5\t5\t1\t1\tN/A\t00ff00\tN/A\tg\t",
        "Box\t2\t3\t1\t1\t2\t2\tN/A\t0000ff\ttrue\t\tnote",
        "Oval\t2\t3\t0\t0\t4\t2\tN/A\tffffff\tfalse\t\t",
        "Marker\t1\t2\t7\t8\tN/A\tN/A\tN/A\tffffff\tN/A\t\t",
        "Text\t1\t2\t1\t1\tN/A\tN/A\thello\tffffff\tN/A\t\t",
    ]);
    let mut s = store();
    let summary = read_overlays_str(&text, &mut s).unwrap();
    assert_eq!(summary, ReadSummary { overlays: 6, skipped_rows: 0 });

    let first = s.slice(&[0, 0]).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].kind(), OverlayKind::Line);
    assert_eq!(first[0].endpoint2(), Some(Point::new(3.0, 4.0)));
    assert_eq!(first[0].color, Rgb8::new(255, 0, 0));
    assert_eq!(first[1].kind(), OverlayKind::Arrow);
    assert_eq!(first[1].group, "g");

    let last = s.slice(&[1, 2]).unwrap();
    assert_eq!(last[0].filled(), Some(true));
    assert_eq!(last[0].notes, "note");
    assert_eq!(last[1].filled(), Some(false));

    let middle = s.slice(&[0, 1]).unwrap();
    assert_eq!(middle[0].endpoint1(), Point::new(7.0, 8.0));
    assert_eq!(middle[1].label().unwrap().text(), "hello");
    assert!(middle[1].bounds().width() > 0.0);
}

#[test]
fn noded_rows_take_their_nodes_from_blocks() {
    let text = table(&[
        "Polyline\t1\t1\t0\t0\t2\t2\tN/A\tffffff\tN/A\t\t",
        "Freeform\t2\t1\tN/A\tN/A\tN/A\tN/A\tN/A\t123456\tN/A\t\t",
        "",
        "# Polyline 1 nodes:",
        "X\tY",
        "0\t0",
        "1\t1",
        "2\t2",
        "",
        "# Freeform 2 nodes:",
        "X\tY",
        "5\t5",
        "6\t5",
    ]);
    let mut s = store();
    read_overlays_str(&text, &mut s).unwrap();

    let poly = &s.slice(&[0, 0]).unwrap()[0];
    assert_eq!(poly.kind(), OverlayKind::Polyline);
    assert_eq!(poly.curve().unwrap().node_count(), 3);

    let free = &s.slice(&[1, 0]).unwrap()[0];
    assert_eq!(free.kind(), OverlayKind::Freeform);
    assert_eq!(free.color, Rgb8::new(0x12, 0x34, 0x56));
    assert_eq!(
        free.curve().unwrap().nodes(),
        &[Point::new(5.0, 5.0), Point::new(6.0, 5.0)]
    );
}

#[test]
fn axis_mismatch_is_rejected() {
    let text = "Overlay\tT (2)\tZ (4)\tx1\ty1\tx2\ty2\ttext\tcolor\tfilled\tgroup\tnotes\n";
    let err = read_overlays_str(text, &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(1));
    let msg = err.to_string();
    assert!(msg.contains("axis mismatch"), "{msg}");
    assert!(msg.contains("Z (4)") && msg.contains("Z (3)"), "{msg}");
}

#[test]
fn wrong_field_count_reports_the_line() {
    let text = table(&["Line\t1\t1\t0\t0\t3\t4\tN/A\tff0000\tN/A\t"]);
    let err = read_overlays_str(&text, &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().contains("insufficient fields"));
}

#[test]
fn malformed_color_skips_only_that_row() {
    let text = table(&[
        "Line\t1\t1\t0\t0\t3\t4\tN/A\tzzzzzz\tN/A\t\t",
        "Marker\t1\t1\t2\t2\tN/A\tN/A\tN/A\t+f+f+f\tN/A\t\t",
        "Polyline\t1\t1\t0\t0\t1\t1\tN/A\tnope\tN/A\t\t",
        "Polyline\t1\t1\t0\t0\t1\t1\tN/A\tffffff\tN/A\t\t",
        "# Polyline 1 nodes:",
        "X\tY",
        "9\t9",
        "8\t8",
        "# Polyline 2 nodes:",
        "X\tY",
        "0\t0",
        "1\t1",
    ]);
    let mut s = store();
    let summary = read_overlays_str(&text, &mut s).unwrap();
    assert_eq!(summary, ReadSummary { overlays: 1, skipped_rows: 3 });
    let kept = &s.slice(&[0, 0]).unwrap()[0];
    assert_eq!(kept.curve().unwrap().first(), Point::new(0.0, 0.0));
}

#[test]
fn structural_errors_leave_the_store_untouched() {
    let text = table(&[
        "Line\t1\t1\t0\t0\t3\t4\tN/A\tff0000\tN/A\t\t",
        "Polyline\t1\t1\t0\t0\t1\t1\tN/A\tffffff\tN/A\t\t",
    ]);
    let mut s = store();
    let err = read_overlays_str(&text, &mut s).unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert!(err.to_string().contains("no node block"));
    assert!(s.is_empty());
}

#[test]
fn node_block_bookkeeping_errors() {
    let row = "Polyline\t1\t1\t0\t0\t1\t1\tN/A\tffffff\tN/A\t\t";

    // Wrong ordinal.
    let text = table(&[row, "# Polyline 2 nodes:", "X\tY", "0\t0", "1\t1"]);
    let err = read_overlays_str(&text, &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(4));

    // Wrong type.
    let text = table(&[row, "# Freeform 1 nodes:", "X\tY", "0\t0", "1\t1"]);
    let err = read_overlays_str(&text, &mut store()).unwrap_err();
    assert!(err.to_string().contains("does not match"));

    // Surplus block.
    let text = table(&[
        row,
        "# Polyline 1 nodes:",
        "X\tY",
        "0\t0",
        "1\t1",
        "# Polyline 2 nodes:",
    ]);
    let err = read_overlays_str(&text, &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(8));

    // Too few nodes.
    let text = table(&[row, "# Polyline 1 nodes:", "X\tY", "0\t0", ""]);
    let err = read_overlays_str(&text, &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(7));

    // Missing column line.
    let text = table(&[row, "# Polyline 1 nodes:", "0\t0", "1\t1"]);
    let err = read_overlays_str(&text, &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(5));

    // Rows after the node blocks.
    let text = table(&[row, "# Polyline 1 nodes:", "X\tY", "0\t0", "1\t1", "", row]);
    let err = read_overlays_str(&text, &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(9));
}

#[test]
fn field_level_errors() {
    let cases = [
        ("Blob\t1\t1\t0\t0\t1\t1\tN/A\tffffff\tN/A\t\t", "unknown overlay type"),
        ("Line\t0\t1\t0\t0\t1\t1\tN/A\tffffff\tN/A\t\t", "1-based"),
        ("Line\t3\t1\t0\t0\t1\t1\tN/A\tffffff\tN/A\t\t", "out of range"),
        ("Line\t1\t1\tx\t0\t1\t1\tN/A\tffffff\tN/A\t\t", "not a finite number"),
        ("Line\t1\t1\t0\t0\tN/A\t1\tN/A\tffffff\tN/A\t\t", "need a value for x2"),
        ("Box\t1\t1\t0\t0\t1\t1\tN/A\tffffff\tmaybe\t\t", "filled"),
    ];
    for (row, needle) in cases {
        let err = read_overlays_str(&table(&[row]), &mut store()).unwrap_err();
        assert_eq!(err.line(), Some(3), "{row}");
        assert!(err.to_string().contains(needle), "{row}: {err}");
    }
}

#[test]
fn comments_and_statistics_are_ignored() {
    let text = table(&[
        "# a comment inside the table",
        "Marker\t1\t1\t1\t1\tN/A\tN/A\tN/A\tffffff\tN/A\t\t",
        "",
        "# Basic statistics",
        "# Overlay\tT\tZ\tcentroid_x\tcentroid_y\tlength\tperimeter\tarea",
        "# Marker\t1\t1\t1\t1\tN/A\tN/A\tN/A",
    ]);
    let mut s = store();
    assert_eq!(read_overlays_str(&text, &mut s).unwrap().overlays, 1);
}

#[test]
fn missing_header_is_an_error() {
    let err = read_overlays_str("# only a comment\n", &mut store()).unwrap_err();
    assert!(err.to_string().contains("header"));
    let err = read_overlays_str("", &mut store()).unwrap_err();
    assert_eq!(err.line(), Some(1));
}

#[test]
fn crlf_input_is_accepted() {
    let text = table(&["Marker\t1\t1\t1\t1\tN/A\tN/A\tN/A\tffffff\tN/A\t\t"])
        .replace('\n', "\r\n");
    let mut s = store();
    assert_eq!(read_overlays_str(&text, &mut s).unwrap().overlays, 1);
}
