use std::fmt;

use kurbo::{Point, Rect, Vec2};

use crate::{
    foundation::{
        core::Rgb8,
        error::{OverlayError, OverlayResult},
    },
    model::{
        noded::NodedCurve,
        text::{TextLabel, TextMetrics},
    },
};

/// Stroke width of rendered lines and outlines, in data units.
pub const STROKE_WIDTH: f64 = 1.0;
/// Half-width of an arrow's base relative to its length.
pub const ARROW_ASPECT: f64 = 0.1;
/// Half the extent of a marker's cross, in data units.
pub const MARKER_HALF_SIZE: f64 = 4.0;

/// The variant tag of an [`Overlay`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum OverlayKind {
    /// Straight segment.
    Line,
    /// Arrow with a wedge head.
    Arrow,
    /// Axis-aligned rectangle.
    Box,
    /// Ellipse inscribed in a rectangle.
    Oval,
    /// Cross-shaped point marker.
    Marker,
    /// Text label anchored at a point.
    Text,
    /// Hand-drawn node chain.
    Freeform,
    /// Node chain placed click by click.
    Polyline,
}

impl OverlayKind {
    /// Every kind, in exchange-format order.
    pub const ALL: [OverlayKind; 8] = [
        Self::Line,
        Self::Arrow,
        Self::Box,
        Self::Oval,
        Self::Marker,
        Self::Text,
        Self::Freeform,
        Self::Polyline,
    ];

    /// Name used in the exchange format.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Arrow => "Arrow",
            Self::Box => "Box",
            Self::Oval => "Oval",
            Self::Marker => "Marker",
            Self::Text => "Text",
            Self::Freeform => "Freeform",
            Self::Polyline => "Polyline",
        }
    }

    /// Inverse of [`OverlayKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Every kind has a primary endpoint.
    pub const fn has_endpoint(self) -> bool {
        true
    }

    /// Markers and text have no secondary endpoint.
    pub const fn has_endpoint2(self) -> bool {
        !matches!(self, Self::Marker | Self::Text)
    }

    /// Only boxes and ovals can be filled.
    pub const fn supports_fill(self) -> bool {
        matches!(self, Self::Box | Self::Oval)
    }

    /// `true` for [`OverlayKind::Text`].
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    /// `true` for the noded kinds.
    pub const fn is_multi_node(self) -> bool {
        matches!(self, Self::Freeform | Self::Polyline)
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variant-specific geometry of an overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// Straight segment from `start` to `end`.
    Line {
        /// First endpoint.
        start: Point,
        /// Second endpoint.
        end: Point,
    },
    /// Arrow pointing at `head`, wedge base at `tail`.
    Arrow {
        /// Tip of the arrow.
        head: Point,
        /// Center of the wedge base.
        tail: Point,
    },
    /// Axis-aligned box spanned by two opposite corners.
    Box {
        /// First corner.
        corner1: Point,
        /// Opposite corner.
        corner2: Point,
        /// Fill the interior instead of stroking the outline.
        filled: bool,
    },
    /// Ellipse inscribed in the box spanned by two opposite corners.
    Oval {
        /// First corner.
        corner1: Point,
        /// Opposite corner.
        corner2: Point,
        /// Fill the interior instead of stroking the outline.
        filled: bool,
    },
    /// Cross centered on `at`.
    Marker {
        /// Center of the cross.
        at: Point,
    },
    /// Measured text label.
    Text(TextLabel),
    /// Freehand stroke.
    Freeform(NodedCurve),
    /// Clicked polyline.
    Polyline(NodedCurve),
}

impl Shape {
    /// Variant tag of this shape.
    pub fn kind(&self) -> OverlayKind {
        match self {
            Self::Line { .. } => OverlayKind::Line,
            Self::Arrow { .. } => OverlayKind::Arrow,
            Self::Box { .. } => OverlayKind::Box,
            Self::Oval { .. } => OverlayKind::Oval,
            Self::Marker { .. } => OverlayKind::Marker,
            Self::Text(_) => OverlayKind::Text,
            Self::Freeform(_) => OverlayKind::Freeform,
            Self::Polyline(_) => OverlayKind::Polyline,
        }
    }
}

/// A user-drawn annotation attached to one dataset position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Overlay {
    shape: Shape,
    /// Display color.
    pub color: Rgb8,
    /// Free-form group label.
    #[serde(default)]
    pub group: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Transient selection flag.
    #[serde(skip)]
    pub selected: bool,
    /// Set while the shape is still being dragged into existence.
    #[serde(skip)]
    pub drawing: bool,
}

impl Overlay {
    /// Color of overlays built without [`Overlay::with_color`].
    pub const DEFAULT_COLOR: Rgb8 = Rgb8::new(255, 255, 255);

    /// Unselected overlay with the default color and empty labels.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            color: Self::DEFAULT_COLOR,
            group: String::new(),
            notes: String::new(),
            selected: false,
            drawing: false,
        }
    }

    /// Line from `start` to `end`.
    pub fn line(start: Point, end: Point) -> Self {
        Self::new(Shape::Line { start, end })
    }

    /// Arrow pointing at `head`.
    pub fn arrow(head: Point, tail: Point) -> Self {
        Self::new(Shape::Arrow { head, tail })
    }

    /// Box spanned by two corners.
    pub fn rect(corner1: Point, corner2: Point, filled: bool) -> Self {
        Self::new(Shape::Box {
            corner1,
            corner2,
            filled,
        })
    }

    /// Oval inscribed in the box spanned by two corners.
    pub fn oval(corner1: Point, corner2: Point, filled: bool) -> Self {
        Self::new(Shape::Oval {
            corner1,
            corner2,
            filled,
        })
    }

    /// Marker at `at`.
    pub fn marker(at: Point) -> Self {
        Self::new(Shape::Marker { at })
    }

    /// Text label at `at`, measured with `metrics`.
    pub fn text(
        at: Point,
        text: impl Into<String>,
        metrics: &dyn TextMetrics,
        point_size: f64,
    ) -> Self {
        Self::new(Shape::Text(TextLabel::new(at, text, metrics, point_size)))
    }

    /// Freeform stroke through `nodes` (at least two).
    pub fn freeform(nodes: Vec<Point>) -> OverlayResult<Self> {
        Ok(Self::new(Shape::Freeform(NodedCurve::new(nodes)?)))
    }

    /// Polyline through `nodes` (at least two).
    pub fn polyline(nodes: Vec<Point>) -> OverlayResult<Self> {
        Ok(Self::new(Shape::Polyline(NodedCurve::new(nodes)?)))
    }

    /// Builder-style color override.
    pub fn with_color(mut self, color: Rgb8) -> Self {
        self.color = color;
        self
    }

    /// Builder-style group label.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Builder-style notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Variant geometry.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Mutable variant geometry. Changing the variant changes [`Overlay::kind`].
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    /// Variant tag.
    pub fn kind(&self) -> OverlayKind {
        self.shape.kind()
    }

    /// See [`OverlayKind::has_endpoint`].
    pub fn has_endpoint(&self) -> bool {
        self.kind().has_endpoint()
    }

    /// See [`OverlayKind::has_endpoint2`].
    pub fn has_endpoint2(&self) -> bool {
        self.kind().has_endpoint2()
    }

    /// See [`OverlayKind::supports_fill`].
    pub fn supports_fill(&self) -> bool {
        self.kind().supports_fill()
    }

    /// See [`OverlayKind::is_text`].
    pub fn is_text(&self) -> bool {
        self.kind().is_text()
    }

    /// See [`OverlayKind::is_multi_node`].
    pub fn is_multi_node(&self) -> bool {
        self.kind().is_multi_node()
    }

    /// Primary endpoint. For noded overlays this is the first node.
    pub fn endpoint1(&self) -> Point {
        match &self.shape {
            Shape::Line { start, .. } => *start,
            Shape::Arrow { head, .. } => *head,
            Shape::Box { corner1, .. } | Shape::Oval { corner1, .. } => *corner1,
            Shape::Marker { at } => *at,
            Shape::Text(label) => label.at(),
            Shape::Freeform(c) | Shape::Polyline(c) => c.first(),
        }
    }

    /// Secondary endpoint, for variants that have one. For noded overlays
    /// this is the last node.
    pub fn endpoint2(&self) -> Option<Point> {
        match &self.shape {
            Shape::Line { end, .. } => Some(*end),
            Shape::Arrow { tail, .. } => Some(*tail),
            Shape::Box { corner2, .. } | Shape::Oval { corner2, .. } => Some(*corner2),
            Shape::Marker { .. } | Shape::Text(_) => None,
            Shape::Freeform(c) | Shape::Polyline(c) => Some(c.last()),
        }
    }

    /// Fill flag of boxes and ovals.
    pub fn filled(&self) -> Option<bool> {
        match &self.shape {
            Shape::Box { filled, .. } | Shape::Oval { filled, .. } => Some(*filled),
            _ => None,
        }
    }

    /// Move the primary endpoint. Noded overlays refuse; edit their nodes.
    pub fn set_endpoint1(&mut self, p: Point) -> OverlayResult<()> {
        let kind = self.kind();
        match &mut self.shape {
            Shape::Line { start: e, .. }
            | Shape::Arrow { head: e, .. }
            | Shape::Box { corner1: e, .. }
            | Shape::Oval { corner1: e, .. }
            | Shape::Marker { at: e } => *e = p,
            Shape::Text(label) => label.move_to(p),
            Shape::Freeform(_) | Shape::Polyline(_) => {
                return Err(read_only_endpoint(kind));
            }
        }
        Ok(())
    }

    /// Move the secondary endpoint, where the variant has one.
    pub fn set_endpoint2(&mut self, p: Point) -> OverlayResult<()> {
        let kind = self.kind();
        match &mut self.shape {
            Shape::Line { end: e, .. }
            | Shape::Arrow { tail: e, .. }
            | Shape::Box { corner2: e, .. }
            | Shape::Oval { corner2: e, .. } => *e = p,
            Shape::Freeform(_) | Shape::Polyline(_) => {
                return Err(read_only_endpoint(kind));
            }
            Shape::Marker { .. } | Shape::Text(_) => {
                return Err(OverlayError::validation(format!(
                    "{kind} has no secondary endpoint"
                )));
            }
        }
        Ok(())
    }

    /// Fails for variants without fill.
    pub fn set_filled(&mut self, value: bool) -> OverlayResult<()> {
        match &mut self.shape {
            Shape::Box { filled, .. } | Shape::Oval { filled, .. } => {
                *filled = value;
                Ok(())
            }
            other => Err(OverlayError::validation(format!(
                "{} does not support fill",
                other.kind()
            ))),
        }
    }

    /// Text payload of a text overlay.
    pub fn label(&self) -> Option<&TextLabel> {
        match &self.shape {
            Shape::Text(label) => Some(label),
            _ => None,
        }
    }

    /// Mutable text payload. Use [`Overlay::set_text`] to keep the bounds current.
    pub fn label_mut(&mut self) -> Option<&mut TextLabel> {
        match &mut self.shape {
            Shape::Text(label) => Some(label),
            _ => None,
        }
    }

    /// Replace the text of a text overlay and re-measure it.
    pub fn set_text(
        &mut self,
        text: impl Into<String>,
        metrics: &dyn TextMetrics,
        point_size: f64,
    ) -> OverlayResult<()> {
        let kind = self.kind();
        let label = self
            .label_mut()
            .ok_or_else(|| OverlayError::validation(format!("{kind} has no text")))?;
        label.set_text(text, metrics, point_size);
        Ok(())
    }

    /// Node chain of freeform and polyline overlays.
    pub fn curve(&self) -> Option<&NodedCurve> {
        match &self.shape {
            Shape::Freeform(c) | Shape::Polyline(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable node chain.
    pub fn curve_mut(&mut self) -> Option<&mut NodedCurve> {
        match &mut self.shape {
            Shape::Freeform(c) | Shape::Polyline(c) => Some(c),
            _ => None,
        }
    }

    /// Shift all geometry by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match &mut self.shape {
            Shape::Line { start: a, end: b }
            | Shape::Arrow { head: a, tail: b }
            | Shape::Box {
                corner1: a,
                corner2: b,
                ..
            }
            | Shape::Oval {
                corner1: a,
                corner2: b,
                ..
            } => {
                *a += delta;
                *b += delta;
            }
            Shape::Marker { at } => *at += delta,
            Shape::Text(label) => label.translate(delta),
            Shape::Freeform(c) | Shape::Polyline(c) => c.translate(delta),
        }
    }

    /// Axis-aligned extent of the overlay's defining geometry.
    pub fn bounds(&self) -> Rect {
        match &self.shape {
            Shape::Line { start: a, end: b }
            | Shape::Arrow { head: a, tail: b }
            | Shape::Box {
                corner1: a,
                corner2: b,
                ..
            }
            | Shape::Oval {
                corner1: a,
                corner2: b,
                ..
            } => Rect::from_points(*a, *b),
            Shape::Marker { at } => Rect::from_center_size(
                *at,
                (2.0 * MARKER_HALF_SIZE, 2.0 * MARKER_HALF_SIZE),
            ),
            Shape::Text(label) => label.bounds(),
            Shape::Freeform(c) | Shape::Polyline(c) => c.bounds(),
        }
    }
}

fn read_only_endpoint(kind: OverlayKind) -> OverlayError {
    OverlayError::validation(format!(
        "{kind} endpoints are views onto its nodes; edit the nodes instead"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/model/overlay.rs"]
mod tests;
