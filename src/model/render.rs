use kurbo::{Point, Rect};

use crate::{
    foundation::{
        core::Rgba8,
        math::{right_normal, unit},
    },
    geometry::{
        arc::{ellipse_polygon, ellipse_ring},
        offset::band_polygons,
        polygon::{Polygon, cross_quads, frame_bands},
    },
    model::overlay::{ARROW_ASPECT, MARKER_HALF_SIZE, Overlay, STROKE_WIDTH, Shape},
};

/// One uniformly colored polygon of an overlay's visible geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderPrimitive {
    /// Area to fill.
    pub polygon: Polygon,
    /// Opaque overlay color.
    pub color: Rgba8,
}

impl Overlay {
    /// The overlay's own fill/stroke geometry in data coordinates.
    ///
    /// Degenerate shapes (zero-length lines, boxes or ovals with zero width
    /// or height) produce nothing. Text glyphs are drawn by the font
    /// collaborator from [`TextLabel`](crate::TextLabel), so text yields no
    /// polygons here.
    pub fn render_geometry(&self) -> Vec<RenderPrimitive> {
        let half = STROKE_WIDTH * 0.5;
        let polygons: Vec<Polygon> = match self.shape() {
            Shape::Line { start, end } => Polygon::segment_band(*start, *end, half)
                .into_iter()
                .collect(),
            Shape::Arrow { head, tail } => arrow_wedge(*head, *tail).into_iter().collect(),
            Shape::Box {
                corner1,
                corner2,
                filled,
            } => {
                let r = Rect::from_points(*corner1, *corner2);
                if r.width() <= 0.0 || r.height() <= 0.0 {
                    Vec::new()
                } else if *filled {
                    Polygon::rect(r).into_iter().collect()
                } else {
                    frame_bands(r, half)
                }
            }
            Shape::Oval {
                corner1,
                corner2,
                filled,
            } => oval_geometry(Rect::from_points(*corner1, *corner2), *filled, half),
            Shape::Marker { at } => cross_quads(*at, MARKER_HALF_SIZE, half),
            Shape::Text(_) => Vec::new(),
            Shape::Freeform(c) | Shape::Polyline(c) => {
                band_polygons(c.nodes(), half).unwrap_or_default()
            }
        };

        let color = self.color.opaque();
        polygons
            .into_iter()
            .map(|polygon| RenderPrimitive { polygon, color })
            .collect()
    }
}

/// Triangle with its tip on `head` and a base of half-width
/// `length * ARROW_ASPECT` centered on `tail`.
pub(crate) fn arrow_wedge(head: Point, tail: Point) -> Option<Polygon> {
    let along = head - tail;
    let dir = unit(along)?;
    let side = right_normal(dir) * (along.hypot() * ARROW_ASPECT);
    Polygon::new(vec![head, tail + side, tail - side]).ok()
}

fn oval_geometry(r: Rect, filled: bool, half: f64) -> Vec<Polygon> {
    let (rx, ry) = (r.width() * 0.5, r.height() * 0.5);
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }
    let c = r.center();
    if filled {
        return ellipse_polygon(c, rx, ry).into_iter().collect();
    }
    // Too small for a hole: the stroke covers the whole oval.
    if rx <= half || ry <= half {
        return ellipse_polygon(c, rx + half, ry + half)
            .into_iter()
            .collect();
    }
    ellipse_ring(c, (rx + half, ry + half), (rx - half, ry - half))
}

#[cfg(test)]
#[path = "../../tests/unit/model/render.rs"]
mod tests;
