use kurbo::{Point, Vec2};

use crate::{
    foundation::{
        error::{OverlayError, OverlayResult},
        math::{right_normal, unit},
    },
    geometry::polygon::Polygon,
};

/// Floor applied to `sin(theta / 2)` at interior nodes.
///
/// Bounds the miter length at near-reversal turns to `width / MIN_HALF_ANGLE_SIN`.
pub const MIN_HALF_ANGLE_SIN: f64 = 0.1;

/// Two polylines running parallel to a node sequence, one per side.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetCurve {
    /// Points offset to the right of the direction of travel.
    pub right: Vec<Point>,
    /// Points offset to the left of the direction of travel.
    pub left: Vec<Point>,
}

impl OffsetCurve {
    /// Offset `nodes` by `width` on both sides.
    ///
    /// Endpoints move along the normal of their only segment. Interior nodes
    /// move along the bisector of the two adjacent normals by
    /// `width / max(sin(theta / 2), MIN_HALF_ANGLE_SIN)`, `theta` being the
    /// angle enclosed at the node.
    pub fn new(nodes: &[Point], width: f64) -> OverlayResult<Self> {
        if nodes.len() < 2 {
            return Err(OverlayError::validation(format!(
                "offset curve needs at least 2 nodes, got {}",
                nodes.len()
            )));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(OverlayError::validation(format!(
                "offset width must be positive, got {width}"
            )));
        }

        let dirs = segment_directions(nodes);
        let n = nodes.len();
        let mut right = Vec::with_capacity(n);
        let mut left = Vec::with_capacity(n);

        for (i, &p) in nodes.iter().enumerate() {
            let offset = if i == 0 {
                right_normal(dirs[0]) * width
            } else if i == n - 1 {
                right_normal(dirs[n - 2]) * width
            } else {
                interior_offset(dirs[i - 1], dirs[i], width)
            };
            right.push(p + offset);
            left.push(p - offset);
        }

        Ok(Self { right, left })
    }

    /// Number of points per side, one per node.
    pub fn len(&self) -> usize {
        self.right.len()
    }

    /// `true` when there are no points.
    pub fn is_empty(&self) -> bool {
        self.right.is_empty()
    }

    /// One quad per segment, tiling the band between the two sides.
    ///
    /// A quad that comes out as a bow-tie is rebuilt with its two left
    /// vertices swapped; a segment that still fails is dropped.
    pub fn band_quads(&self) -> Vec<Polygon> {
        let mut out = Vec::with_capacity(self.len().saturating_sub(1));
        for i in 0..self.len().saturating_sub(1) {
            let (r0, r1) = (self.right[i], self.right[i + 1]);
            let (l0, l1) = (self.left[i], self.left[i + 1]);
            match Polygon::quad(r0, r1, l1, l0).or_else(|_| Polygon::quad(r0, r1, l0, l1)) {
                Ok(quad) => out.push(quad),
                Err(err) => {
                    tracing::debug!(segment = i, %err, "dropping offset band segment");
                }
            }
        }
        out
    }
}

/// Band polygons of half-width `width` around the node chain.
pub fn band_polygons(nodes: &[Point], width: f64) -> OverlayResult<Vec<Polygon>> {
    Ok(OffsetCurve::new(nodes, width)?.band_quads())
}

fn interior_offset(d_in: Vec2, d_out: Vec2, width: f64) -> Vec2 {
    let cos_theta = (-d_in).dot(d_out).clamp(-1.0, 1.0);
    let sin_half = ((1.0 - cos_theta) * 0.5).sqrt().max(MIN_HALF_ANGLE_SIN);
    // Exact reversal: the normals cancel, push straight past the cusp.
    let bisector = unit(right_normal(d_in) + right_normal(d_out)).unwrap_or(d_in);
    bisector * (width / sin_half)
}

/// Unit direction of every segment; zero-length segments borrow the nearest
/// non-degenerate direction.
fn segment_directions(nodes: &[Point]) -> Vec<Vec2> {
    let raw: Vec<Option<Vec2>> = nodes.windows(2).map(|w| unit(w[1] - w[0])).collect();
    let fallback = raw.iter().flatten().next().copied().unwrap_or(Vec2::new(1.0, 0.0));

    let mut out = Vec::with_capacity(raw.len());
    let mut last = fallback;
    for d in raw {
        if let Some(d) = d {
            last = d;
        }
        out.push(last);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/offset.rs"]
mod tests;
