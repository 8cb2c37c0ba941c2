use kurbo::{BezPath, Point, Rect};

use crate::foundation::{
    error::{OverlayError, OverlayResult},
    math::{EPS_LEN, right_normal, segments_intersect, signed_area, unit},
};

const EPS_AREA: f64 = 1e-12;

/// A simple (non-self-intersecting) polygon with positive area.
///
/// Vertices are stored counter-clockwise (y axis up) so that any set of
/// polygons filled with the non-zero rule renders as their union.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Validate `points` as a simple polygon.
    ///
    /// Rejects fewer than three vertices, non-finite coordinates, repeated
    /// consecutive vertices, zero area and crossing edges.
    pub fn new(mut points: Vec<Point>) -> OverlayResult<Self> {
        let n = points.len();
        if n < 3 {
            return Err(OverlayError::geometry(format!(
                "polygon needs at least 3 vertices, got {n}"
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(OverlayError::geometry("polygon has non-finite vertices"));
        }
        for i in 0..n {
            if (points[(i + 1) % n] - points[i]).hypot() <= EPS_LEN {
                return Err(OverlayError::geometry(format!(
                    "polygon has a zero-length edge at vertex {i}"
                )));
            }
        }

        let area = signed_area(&points);
        if area.abs() <= EPS_AREA {
            return Err(OverlayError::geometry("polygon has zero area"));
        }

        for i in 0..n {
            let (a0, a1) = (points[i], points[(i + 1) % n]);
            // Skip the edge itself and both neighbours.
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (b0, b1) = (points[j], points[(j + 1) % n]);
                if segments_intersect(a0, a1, b0, b1) {
                    return Err(OverlayError::geometry(format!(
                        "polygon edges {i} and {j} intersect"
                    )));
                }
            }
        }

        if area < 0.0 {
            points.reverse();
        }
        Ok(Self { points })
    }

    /// Quadrilateral through `a, b, c, d` in that order.
    pub fn quad(a: Point, b: Point, c: Point, d: Point) -> OverlayResult<Self> {
        Self::new(vec![a, b, c, d])
    }

    /// Axis-aligned rectangle.
    pub fn rect(r: Rect) -> OverlayResult<Self> {
        let r = r.abs();
        Self::new(vec![
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ])
    }

    /// Quad covering segment `a-b` widened by `half_width` on each side.
    pub fn segment_band(a: Point, b: Point, half_width: f64) -> OverlayResult<Self> {
        let dir = unit(b - a)
            .ok_or_else(|| OverlayError::geometry("segment band over a zero-length segment"))?;
        let n = right_normal(dir) * half_width;
        Self::quad(a + n, b + n, b - n, a - n)
    }

    /// Vertices in counter-clockwise order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Enclosed area, always positive.
    pub fn area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Axis-aligned extent of the vertices.
    pub fn bounds(&self) -> Rect {
        let first = self.points[0];
        self.points
            .iter()
            .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p))
    }

    /// Even-odd point containment test.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (pi, pj) = (self.points[i], self.points[j]);
            if (pi.y > p.y) != (pj.y > p.y) {
                let x = pj.x + (p.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Closed path through the vertices.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.append_to(&mut path);
        path
    }

    fn append_to(&self, path: &mut BezPath) {
        let mut it = self.points.iter();
        if let Some(first) = it.next() {
            path.move_to(*first);
            for p in it {
                path.line_to(*p);
            }
            path.close_path();
        }
    }
}

/// A union of simple polygons.
///
/// The union is implicit: all members share one orientation, so filling
/// [`Region::to_bez_path`] with the non-zero rule covers exactly their union.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Region {
    polygons: Vec<Polygon>,
}

impl Region {
    /// Empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member polygon.
    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Member polygons in insertion order.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Number of member polygons.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// `true` when nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// `true` when any member contains `p`.
    pub fn contains(&self, p: Point) -> bool {
        self.polygons.iter().any(|poly| poly.contains(p))
    }

    /// Union of the member bounds, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.polygons
            .iter()
            .map(Polygon::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// All member polygons as closed subpaths of one path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for poly in &self.polygons {
            poly.append_to(&mut path);
        }
        path
    }
}

impl FromIterator<Polygon> for Region {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self {
            polygons: iter.into_iter().collect(),
        }
    }
}

impl Extend<Polygon> for Region {
    fn extend<I: IntoIterator<Item = Polygon>>(&mut self, iter: I) {
        self.polygons.extend(iter);
    }
}

/// Hollow frame around `rect`: four bands of half-width `half`, centered on
/// the rectangle's edges.
///
/// When `2 * half` exceeds the width or height the frame would fold over
/// itself, so a single rectangle grown by `half` is returned instead.
pub(crate) fn frame_bands(rect: Rect, half: f64) -> Vec<Polygon> {
    let r = rect.abs();
    let outer = r.inflate(half, half);
    if 2.0 * half > r.width() || 2.0 * half > r.height() {
        return Polygon::rect(outer).into_iter().collect();
    }

    let inner = r.inflate(-half, -half);
    [
        // bottom, top
        Rect::new(outer.x0, outer.y0, outer.x1, inner.y0),
        Rect::new(outer.x0, inner.y1, outer.x1, outer.y1),
        // left, right
        Rect::new(outer.x0, inner.y0, inner.x0, inner.y1),
        Rect::new(inner.x1, inner.y0, outer.x1, inner.y1),
    ]
    .into_iter()
    .filter_map(|band| Polygon::rect(band).ok())
    .collect()
}

/// Plus-shaped cross centered on `c` as three non-overlapping quads: top arm,
/// middle bar, bottom arm.
pub(crate) fn cross_quads(c: Point, half_size: f64, arm_half_width: f64) -> Vec<Polygon> {
    let (s, w) = (half_size, arm_half_width);
    [
        Rect::new(c.x - w, c.y + w, c.x + w, c.y + s),
        Rect::new(c.x - s, c.y - w, c.x + s, c.y + w),
        Rect::new(c.x - w, c.y - s, c.x + w, c.y - w),
    ]
    .into_iter()
    .filter_map(|r| Polygon::rect(r).ok())
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polygon.rs"]
mod tests;
