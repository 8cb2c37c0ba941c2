use kurbo::{Line, ParamCurveNearest, Point, Vec2};

const NEAREST_ACCURACY: f64 = 1e-9;

/// Lengths below this are treated as zero when normalizing directions.
pub(crate) const EPS_LEN: f64 = 1e-12;

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    lerp(f64::from(a), f64::from(b), t).round().clamp(0.0, 255.0) as u8
}

/// Unit vector along `v`, or `None` for a zero-length vector.
pub(crate) fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    (len > EPS_LEN).then(|| v / len)
}

/// Normal on the right-hand side of direction `d` (y axis pointing up).
pub(crate) fn right_normal(d: Vec2) -> Vec2 {
    Vec2::new(d.y, -d.x)
}

pub(crate) fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    if (b - a).hypot() <= EPS_LEN {
        return p.distance(a);
    }
    Line::new(a, b)
        .nearest(p, NEAREST_ACCURACY)
        .distance_sq
        .sqrt()
}

/// Minimum distance from `p` to the open chain through `points`.
pub(crate) fn chain_distance(p: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => p.distance(*only),
        _ => points
            .windows(2)
            .map(|w| segment_distance(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Signed shoelace area; positive for counter-clockwise order with y up.
pub(crate) fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}

fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - EPS_LEN
        && p.x <= a.x.max(b.x) + EPS_LEN
        && p.y >= a.y.min(b.y) - EPS_LEN
        && p.y <= a.y.max(b.y) + EPS_LEN
}

/// Whether closed segments `a0-a1` and `b0-b1` share at least one point.
pub(crate) fn segments_intersect(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b0, b1, a0))
        || (d2 == 0.0 && on_segment(b0, b1, a1))
        || (d3 == 0.0 && on_segment(a0, a1, b0))
        || (d4 == 0.0 && on_segment(a0, a1, b1))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
