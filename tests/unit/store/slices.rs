use super::*;
use crate::axes::indexer::Axes;

fn store() -> OverlayStore {
    OverlayStore::new(Axes::from_pairs([("T", 3), ("Z", 2)]).unwrap())
}

fn line(x: f64) -> Overlay {
    Overlay::line(Point::new(x, 0.0), Point::new(x, 10.0))
}

#[test]
fn add_and_remove_by_slot() {
    let mut s = store();
    assert!(s.is_empty());
    assert_eq!(s.add(line(0.0), &[1, 1]), Some(0));
    assert_eq!(s.add(line(5.0), &[1, 1]), Some(1));
    assert_eq!(s.add(line(9.0), &[0, 0]), Some(0));
    assert_eq!(s.len(), 3);
    assert_eq!(s.slice(&[1, 1]).unwrap().len(), 2);

    let removed = s.remove(&[1, 1], 0).unwrap();
    assert_eq!(removed.endpoint1(), Point::new(0.0, 0.0));
    assert_eq!(s.slice(&[1, 1]).unwrap()[0].endpoint1(), Point::new(5.0, 0.0));
    assert!(s.remove(&[1, 1], 7).is_none());
}

#[test]
fn out_of_range_positions_are_no_ops() {
    let mut s = store();
    assert_eq!(s.add(line(0.0), &[3, 0]), None);
    assert_eq!(s.add(line(0.0), &[0]), None);
    assert!(s.slice(&[0, 2]).is_none());
    assert_eq!(s.remove_selected(&[9, 9]), 0);
    assert!(s.is_empty());
}

#[test]
fn selection_helpers() {
    let mut s = store();
    for x in [0.0, 1.0, 2.0] {
        s.add(line(x), &[0, 1]);
    }
    s.slice_mut(&[0, 1]).unwrap()[1].selected = true;
    let picked: Vec<usize> = s.selected(&[0, 1]).map(|(i, _)| i).collect();
    assert_eq!(picked, vec![1]);

    s.select_all(&[0, 1]);
    assert_eq!(s.selected(&[0, 1]).count(), 3);
    s.deselect_all(&[0, 1]);
    assert_eq!(s.selected(&[0, 1]).count(), 0);
    assert_eq!(s.selected(&[5, 5]).count(), 0);
}

#[test]
fn remove_selected_keeps_order_of_the_rest() {
    let mut s = store();
    for x in [0.0, 1.0, 2.0, 3.0] {
        s.add(line(x), &[2, 0]);
    }
    let slot = s.slice_mut(&[2, 0]).unwrap();
    slot[0].selected = true;
    slot[2].selected = true;

    assert_eq!(s.remove_selected(&[2, 0]), 2);
    let xs: Vec<f64> = s.slice(&[2, 0]).unwrap().iter().map(|o| o.endpoint1().x).collect();
    assert_eq!(xs, vec![1.0, 3.0]);
}

#[test]
fn hit_test_prefers_nearest_then_topmost() {
    let mut s = store();
    s.add(line(0.0), &[0, 0]);
    s.add(line(3.0), &[0, 0]);
    s.add(line(3.0), &[0, 0]);

    // Tolerance is 4 px * 0.5 = 2 data units.
    assert_eq!(s.hit_test(&[0, 0], Point::new(0.5, 5.0), 0.5), Some(0));
    assert_eq!(s.hit_test(&[0, 0], Point::new(2.5, 5.0), 0.5), Some(2));
    assert_eq!(s.hit_test(&[0, 0], Point::new(8.0, 5.0), 0.5), None);
    assert_eq!(s.hit_test(&[0, 0], Point::new(8.0, 5.0), 2.0), Some(2));
}

#[test]
fn iter_slices_reports_positions() {
    let mut s = store();
    s.add(line(0.0), &[2, 1]);
    s.add(line(1.0), &[1, 0]);
    let positions: Vec<Vec<usize>> = s.iter_slices().map(|(p, _)| p).collect();
    assert_eq!(positions, vec![vec![1, 0], vec![2, 1]]);
}

#[test]
fn growing_axes_keeps_raster_slots() {
    let mut s = store();
    s.add(line(0.0), &[1, 1]);
    let dropped = s.set_axes(Axes::from_pairs([("T", 4), ("Z", 2)]).unwrap());
    assert_eq!(dropped, 0);
    assert_eq!(s.len(), 1);
    // Raster slot 4 is (1, 1) under the old layout and (0, 1) under the new one.
    assert_eq!(s.slice(&[0, 1]).unwrap().len(), 1);
    assert!(s.slice(&[3, 1]).unwrap().is_empty());
}

#[test]
fn shrinking_axes_drops_overflow() {
    let mut s = store();
    s.add(line(0.0), &[0, 0]);
    s.add(line(1.0), &[2, 1]);
    s.add(line(2.0), &[2, 1]);
    let dropped = s.set_axes(Axes::from_pairs([("T", 2), ("Z", 2)]).unwrap());
    assert_eq!(dropped, 2);
    assert_eq!(s.len(), 1);
    assert_eq!(s.axes().lengths(), &[2, 2]);
}

#[test]
fn with_options_validates() {
    let axes = Axes::from_pairs([("T", 1)]).unwrap();
    let bad = OverlayOptions {
        hit_tolerance_px: -1.0,
        ..OverlayOptions::default()
    };
    assert!(OverlayStore::with_options(axes, bad).is_err());
}
