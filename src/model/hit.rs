use kurbo::{Point, Rect};

use crate::{
    foundation::math::{chain_distance, segment_distance},
    model::overlay::{Overlay, Shape},
};

const ELLIPSE_ITERATIONS: usize = 4;

impl Overlay {
    /// Euclidean distance from `p` to the overlay's visible geometry.
    ///
    /// Filled boxes and ovals, and text boxes, count their interior as
    /// distance zero; unfilled ones measure to the outline.
    pub fn distance_to(&self, p: Point) -> f64 {
        match self.shape() {
            Shape::Line { start, end } => segment_distance(p, *start, *end),
            Shape::Arrow { head, tail } => segment_distance(p, *head, *tail),
            Shape::Box {
                corner1,
                corner2,
                filled,
            } => rect_distance(Rect::from_points(*corner1, *corner2), p, *filled),
            Shape::Oval {
                corner1,
                corner2,
                filled,
            } => oval_distance(Rect::from_points(*corner1, *corner2), p, *filled),
            Shape::Marker { at } => at.distance(p),
            Shape::Text(label) => rect_distance(label.bounds(), p, true),
            Shape::Freeform(c) | Shape::Polyline(c) => chain_distance(p, c.nodes()),
        }
    }
}

fn rect_distance(r: Rect, p: Point, solid: bool) -> f64 {
    let inside = p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1;
    if inside {
        if solid {
            return 0.0;
        }
        return (p.x - r.x0)
            .min(r.x1 - p.x)
            .min(p.y - r.y0)
            .min(r.y1 - p.y);
    }
    let dx = (r.x0 - p.x).max(p.x - r.x1).max(0.0);
    let dy = (r.y0 - p.y).max(p.y - r.y1).max(0.0);
    dx.hypot(dy)
}

fn oval_distance(r: Rect, p: Point, solid: bool) -> f64 {
    let c = r.center();
    let (a, b) = (r.width() * 0.5, r.height() * 0.5);

    // Flat ovals collapse onto their long axis.
    if a <= f64::EPSILON || b <= f64::EPSILON {
        return segment_distance(p, Point::new(r.x0, r.y0), Point::new(r.x1, r.y1));
    }

    let (px, py) = (p.x - c.x, p.y - c.y);
    if solid && (px / a).powi(2) + (py / b).powi(2) <= 1.0 {
        return 0.0;
    }
    ellipse_boundary_distance(px.abs(), py.abs(), a, b)
}

/// Distance from `(px, py)` in the first quadrant to the ellipse with
/// semi-axes `a`, `b`, by iterating on the local circle of curvature.
fn ellipse_boundary_distance(px: f64, py: f64, a: f64, b: f64) -> f64 {
    let mut tx = std::f64::consts::FRAC_1_SQRT_2;
    let mut ty = std::f64::consts::FRAC_1_SQRT_2;

    for _ in 0..ELLIPSE_ITERATIONS {
        let x = a * tx;
        let y = b * ty;
        let ex = (a * a - b * b) * tx.powi(3) / a;
        let ey = (b * b - a * a) * ty.powi(3) / b;

        let (rx, ry) = (x - ex, y - ey);
        let (qx, qy) = (px - ex, py - ey);
        let r = rx.hypot(ry);
        let q = qx.hypot(qy);
        if q <= f64::EPSILON {
            break;
        }

        tx = ((qx * r / q + ex) / a).clamp(0.0, 1.0);
        ty = ((qy * r / q + ey) / b).clamp(0.0, 1.0);
        let t = tx.hypot(ty);
        tx /= t;
        ty /= t;
    }

    (px - a * tx).hypot(py - b * ty)
}

#[cfg(test)]
#[path = "../../tests/unit/model/hit.rs"]
mod tests;
