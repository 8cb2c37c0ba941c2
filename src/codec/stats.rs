use crate::{codec::format::NOT_APPLICABLE, model::overlay::Overlay};

/// A caller-supplied statistics table appended to written files as
/// `#`-prefixed comment lines.
pub trait StatsFormat: Send + Sync {
    /// Heading line of the block.
    fn title(&self) -> &str;

    /// Names of the value columns produced by [`StatsFormat::row`].
    fn columns(&self) -> &[&str];

    /// Values for one overlay, or `None` to leave it out of the table.
    fn row(&self, overlay: &Overlay, position: &[usize]) -> Option<Vec<String>>;
}

/// Centroid and size measurements of every overlay.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicStatistics;

impl StatsFormat for BasicStatistics {
    fn title(&self) -> &str {
        "Basic statistics"
    }

    fn columns(&self) -> &[&str] {
        &["centroid_x", "centroid_y", "length", "perimeter", "area"]
    }

    fn row(&self, overlay: &Overlay, _position: &[usize]) -> Option<Vec<String>> {
        let stats = overlay.stats();
        let opt = |v: Option<f64>| v.map_or_else(|| NOT_APPLICABLE.to_string(), |v| v.to_string());
        Some(vec![
            stats.centroid.x.to_string(),
            stats.centroid.y.to_string(),
            opt(stats.length),
            opt(stats.perimeter),
            opt(stats.area),
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/stats.rs"]
mod tests;
