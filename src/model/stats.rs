use kurbo::{Point, Rect};

use crate::{
    foundation::math::signed_area,
    model::overlay::{Overlay, Shape},
};

/// Measurements of one overlay, in data units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OverlayStats {
    /// Extent of the defining geometry.
    pub bounds: Rect,
    /// Geometric center. For noded curves, the mean of the nodes.
    pub centroid: Point,
    /// Length of open shapes (lines, arrows, curves).
    pub length: Option<f64>,
    /// Outline length of closed shapes.
    pub perimeter: Option<f64>,
    /// Enclosed area of closed shapes.
    pub area: Option<f64>,
}

impl Overlay {
    /// Measure this overlay.
    pub fn stats(&self) -> OverlayStats {
        let bounds = self.bounds();
        let mut stats = OverlayStats {
            bounds,
            centroid: bounds.center(),
            length: None,
            perimeter: None,
            area: None,
        };

        match self.shape() {
            Shape::Line { start, end } | Shape::Arrow { head: start, tail: end } => {
                stats.length = Some(start.distance(*end));
                stats.centroid = start.midpoint(*end);
            }
            Shape::Box { .. } => {
                stats.perimeter = Some(2.0 * (bounds.width() + bounds.height()));
                stats.area = Some(bounds.area());
            }
            Shape::Oval { .. } => {
                let (a, b) = (bounds.width() * 0.5, bounds.height() * 0.5);
                stats.perimeter = Some(ellipse_perimeter(a, b));
                stats.area = Some(std::f64::consts::PI * a * b);
            }
            Shape::Marker { at } => stats.centroid = *at,
            Shape::Text(_) => {}
            Shape::Freeform(c) | Shape::Polyline(c) => {
                stats.length = Some(c.length());
                stats.centroid = vertex_mean(c.nodes());
                // A freeform drawn back onto its start encloses a region.
                if matches!(self.shape(), Shape::Freeform(_)) && c.first() == c.last() {
                    stats.area = Some(signed_area(c.nodes()).abs());
                }
            }
        }
        stats
    }
}

/// Ramanujan's second approximation.
fn ellipse_perimeter(a: f64, b: f64) -> f64 {
    if a + b <= 0.0 {
        return 0.0;
    }
    let h = ((a - b) / (a + b)).powi(2);
    std::f64::consts::PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

fn vertex_mean(points: &[Point]) -> Point {
    let n = points.len().max(1) as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

#[cfg(test)]
#[path = "../../tests/unit/model/stats.rs"]
mod tests;
