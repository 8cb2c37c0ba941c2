//! Selection/emphasis layers drawn around overlays.
//!
//! Every variant turns its geometry plus a margin into one [`Region`] in the
//! shared translucent [`GLOW`] style. Two cases use their own style: text in
//! [`HighlightMode::Outline`] gets a thin [`OUTLINE`] frame, and the
//! highlighted node of a freeform/polyline gets an extra [`HIGHLIGHT`] dot.

use kurbo::{Point, Rect};
use rayon::prelude::*;

use crate::{
    foundation::{
        core::{Rgb8, Rgba8},
        math::{right_normal, unit},
    },
    geometry::{
        arc::ellipse_polygon,
        offset::band_polygons,
        polygon::{Polygon, Region, cross_quads, frame_bands},
    },
    model::overlay::{ARROW_ASPECT, MARKER_HALF_SIZE, Overlay, STROKE_WIDTH, Shape},
};

/// Highlight margin in screen pixels.
pub const GLOW_MARGIN_PX: f64 = 3.0;

/// Node dot radius as a multiple of the margin.
const NODE_DOT_SCALE: f64 = 2.0;
/// Width of the text outline frame in screen pixels.
const OUTLINE_WIDTH_PX: f64 = 1.0;

/// Uniform color and opacity of a highlight layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HighlightStyle {
    /// Fill color.
    pub color: Rgb8,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl HighlightStyle {
    /// Color with the style's opacity applied.
    pub fn rgba(self) -> Rgba8 {
        self.color.with_alpha(self.alpha)
    }
}

/// Translucent glow used for selected overlays.
pub const GLOW: HighlightStyle = HighlightStyle {
    color: Rgb8::new(255, 255, 0),
    alpha: 0.4,
};

/// Marks the highlighted node of a noded overlay.
pub const HIGHLIGHT: HighlightStyle = HighlightStyle {
    color: Rgb8::new(0, 255, 255),
    alpha: 0.6,
};

/// Dim, opaque frame for de-emphasized text.
pub const OUTLINE: HighlightStyle = HighlightStyle {
    color: Rgb8::new(128, 128, 128),
    alpha: 1.0,
};

/// How text overlays are emphasized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightMode {
    /// Everything glows in [`GLOW`].
    #[default]
    Glow,
    /// Text is framed in [`OUTLINE`] instead of glowing. Other variants are
    /// unaffected.
    Outline,
}

/// One uniformly styled highlight region.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HighlightLayer {
    /// Area to fill.
    pub region: Region,
    /// Fill style.
    pub style: HighlightStyle,
}

/// Glow layers around `overlay`.
///
/// `pixel_margin` is converted to data units with `data_units_per_pixel`.
/// Overlays still being drawn produce nothing.
pub fn highlight(
    overlay: &Overlay,
    pixel_margin: f64,
    data_units_per_pixel: f64,
) -> Vec<HighlightLayer> {
    highlight_with_mode(overlay, HighlightMode::Glow, pixel_margin, data_units_per_pixel)
}

/// [`highlight`] with an explicit text [`HighlightMode`].
pub fn highlight_with_mode(
    overlay: &Overlay,
    mode: HighlightMode,
    pixel_margin: f64,
    data_units_per_pixel: f64,
) -> Vec<HighlightLayer> {
    if overlay.drawing {
        return Vec::new();
    }
    let m = pixel_margin * data_units_per_pixel;
    if !(m.is_finite() && m > 0.0) {
        tracing::debug!(pixel_margin, data_units_per_pixel, "non-positive highlight margin");
        return Vec::new();
    }

    let mut style = GLOW;
    let polygons: Vec<Polygon> = match overlay.shape() {
        Shape::Line { start, end } => Polygon::segment_band(*start, *end, m)
            .into_iter()
            .collect(),
        Shape::Arrow { head, tail } => arrow_glow(*head, *tail, m).into_iter().collect(),
        // from_points normalizes the corners before the size test.
        Shape::Box {
            corner1, corner2, ..
        } => frame_bands(Rect::from_points(*corner1, *corner2), m),
        Shape::Oval {
            corner1, corner2, ..
        } => {
            let r = Rect::from_points(*corner1, *corner2);
            ellipse_polygon(r.center(), r.width() * 0.5 + m, r.height() * 0.5 + m)
                .into_iter()
                .collect()
        }
        Shape::Marker { at } => marker_glow(*at, m),
        Shape::Text(label) => {
            let frame = label.bounds().inflate(m, m);
            match mode {
                HighlightMode::Glow => Polygon::rect(frame).into_iter().collect(),
                HighlightMode::Outline => {
                    style = OUTLINE;
                    frame_bands(frame, 0.5 * OUTLINE_WIDTH_PX * data_units_per_pixel)
                }
            }
        }
        Shape::Freeform(c) | Shape::Polyline(c) => band_polygons(c.nodes(), m).unwrap_or_default(),
    };

    let mut layers = Vec::with_capacity(2);
    if !polygons.is_empty() {
        layers.push(HighlightLayer {
            region: polygons.into_iter().collect(),
            style,
        });
    }

    if let Some(curve) = overlay.curve()
        && let Some(node) = curve.highlighted_node().and_then(|i| curve.node(i))
    {
        let r = NODE_DOT_SCALE * m;
        if let Ok(dot) = ellipse_polygon(node, r, r) {
            layers.push(HighlightLayer {
                region: std::iter::once(dot).collect(),
                style: HIGHLIGHT,
            });
        }
    }

    layers
}

/// Highlight layers for every selected, finished overlay in `overlays`,
/// computed in parallel. Results keep slice order and carry the overlay's
/// index.
pub fn highlight_many(
    overlays: &[Overlay],
    pixel_margin: f64,
    data_units_per_pixel: f64,
) -> Vec<(usize, Vec<HighlightLayer>)> {
    overlays
        .par_iter()
        .enumerate()
        .filter(|(_, o)| o.selected && !o.drawing)
        .map(|(i, o)| (i, highlight(o, pixel_margin, data_units_per_pixel)))
        .collect()
}

/// Trapezoid around the arrow wedge: `margin` past the head and tail along
/// the forward axis, and `margin` beyond the wedge's half-width sideways.
fn arrow_glow(head: Point, tail: Point, margin: f64) -> Option<Polygon> {
    let along = head - tail;
    let Some(forward) = unit(along) else {
        return Polygon::rect(Rect::from_center_size(head, (2.0 * margin, 2.0 * margin))).ok();
    };
    let right = right_normal(forward);
    let wedge_half = along.hypot() * ARROW_ASPECT;

    let back = tail - forward * margin;
    let front = head + forward * margin;
    Polygon::quad(
        back - right * (wedge_half + margin),
        back + right * (wedge_half + margin),
        front + right * margin,
        front - right * margin,
    )
    .ok()
}

/// Cross-shaped glow that leaves the marker's quadrants uncovered, or a
/// plain square once the margin swamps the marker.
fn marker_glow(at: Point, margin: f64) -> Vec<Polygon> {
    let reach = MARKER_HALF_SIZE + margin;
    if 2.0 * margin > MARKER_HALF_SIZE {
        return Polygon::rect(Rect::from_center_size(at, (2.0 * reach, 2.0 * reach)))
            .into_iter()
            .collect();
    }
    cross_quads(at, reach, 0.5 * STROKE_WIDTH + margin)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/highlight.rs"]
mod tests;
