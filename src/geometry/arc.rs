use std::sync::LazyLock;

use kurbo::Point;

use crate::{foundation::error::OverlayResult, geometry::polygon::Polygon};

/// Number of samples along each half (top/bottom) of an ellipse, endpoints included.
pub const ARC_RESOLUTION: usize = 64;

/// Unit half-circle samples for angles `0..=PI`, shared by every ellipse.
pub(crate) struct ArcTable {
    cos: [f64; ARC_RESOLUTION],
    sin: [f64; ARC_RESOLUTION],
}

static ARC_TABLE: LazyLock<ArcTable> = LazyLock::new(|| {
    let mut cos = [0.0; ARC_RESOLUTION];
    let mut sin = [0.0; ARC_RESOLUTION];
    for k in 0..ARC_RESOLUTION {
        let theta = std::f64::consts::PI * k as f64 / (ARC_RESOLUTION - 1) as f64;
        cos[k] = theta.cos();
        sin[k] = theta.sin();
    }
    // Pin the ends so both halves meet exactly on the horizontal axis.
    sin[0] = 0.0;
    sin[ARC_RESOLUTION - 1] = 0.0;
    ArcTable { cos, sin }
});

pub(crate) fn arc_table() -> &'static ArcTable {
    &ARC_TABLE
}

/// Closed counter-clockwise outline of an axis-aligned ellipse.
///
/// The top half is read straight from the arc table; the bottom half is its
/// mirror image, walked back towards angle 0 without repeating the two
/// shared endpoints.
pub(crate) fn ellipse_points(center: Point, rx: f64, ry: f64) -> Vec<Point> {
    let t = arc_table();
    let mut out = Vec::with_capacity(2 * ARC_RESOLUTION - 2);
    for k in 0..ARC_RESOLUTION {
        out.push(Point::new(center.x + rx * t.cos[k], center.y + ry * t.sin[k]));
    }
    for k in (1..ARC_RESOLUTION - 1).rev() {
        out.push(Point::new(center.x + rx * t.cos[k], center.y - ry * t.sin[k]));
    }
    out
}

pub(crate) fn ellipse_polygon(center: Point, rx: f64, ry: f64) -> OverlayResult<Polygon> {
    Polygon::new(ellipse_points(center, rx, ry))
}

/// Annulus between two concentric ellipses as a strip of quads.
pub(crate) fn ellipse_ring(center: Point, outer: (f64, f64), inner: (f64, f64)) -> Vec<Polygon> {
    let o = ellipse_points(center, outer.0, outer.1);
    let i = ellipse_points(center, inner.0, inner.1);
    let n = o.len();
    (0..n)
        .filter_map(|k| {
            let k1 = (k + 1) % n;
            Polygon::quad(o[k], o[k1], i[k1], i[k]).ok()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arc.rs"]
mod tests;
