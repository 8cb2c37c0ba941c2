use kurbo::{Point, Rect, Size, Vec2};

/// Font-metrics collaborator used to size text overlays.
pub trait TextMetrics: Send + Sync {
    /// Extent of `text` rendered at `point_size`.
    fn measure(&self, text: &str, point_size: f64) -> Size;
}

/// Fixed-advance approximation used when no font service is wired in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the point size.
    pub advance: f64,
    /// Line height as a fraction of the point size.
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, point_size: f64) -> Size {
        let lines = text.lines().count().max(1);
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            widest as f64 * self.advance * point_size,
            lines as f64 * self.line_height * point_size,
        )
    }
}

/// Free text anchored at a point, with a measured bounding box.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLabel {
    at: Point,
    text: String,
    bounds: Rect,
}

impl TextLabel {
    /// Label anchored at `at`, measured with `metrics` at `point_size`.
    pub fn new(
        at: Point,
        text: impl Into<String>,
        metrics: &dyn TextMetrics,
        point_size: f64,
    ) -> Self {
        let text = text.into();
        let bounds = measure_at(at, &text, metrics, point_size);
        Self { at, text, bounds }
    }

    /// Anchor point, the minimum corner of the bounds.
    pub fn at(&self) -> Point {
        self.at
    }

    /// Label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bounding box as last measured.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replace the text and re-measure.
    pub fn set_text(&mut self, text: impl Into<String>, metrics: &dyn TextMetrics, point_size: f64) {
        self.text = text.into();
        self.remeasure(metrics, point_size);
    }

    /// Recompute the bounding box, e.g. after the font metrics changed.
    pub fn remeasure(&mut self, metrics: &dyn TextMetrics, point_size: f64) {
        self.bounds = measure_at(self.at, &self.text, metrics, point_size);
    }

    /// Move the anchor to `at`, carrying the bounds along.
    pub fn move_to(&mut self, at: Point) {
        self.translate(at - self.at);
    }

    /// Shift the anchor and bounds by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.at += delta;
        self.bounds = self.bounds + delta;
    }
}

fn measure_at(at: Point, text: &str, metrics: &dyn TextMetrics, point_size: f64) -> Rect {
    Rect::from_origin_size(at, metrics.measure(text, point_size))
}

#[cfg(test)]
#[path = "../../tests/unit/model/text.rs"]
mod tests;
