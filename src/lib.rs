//! Annotation overlays for n-dimensional image datasets.
//!
//! Overlays (lines, arrows, boxes, ovals, markers, text and noded curves) are
//! attached to dimensional positions of a dataset and kept in an
//! [`OverlayStore`]. The crate turns them into flat polygon geometry for a
//! rendering collaborator and exchanges them as a tab-separated text table.
//!
//! # Overview
//!
//! 1. **Index**: a position tuple maps to a raster slot via mixed-radix
//!    encoding over the dataset's [`Axes`] (axis 0 varies fastest).
//! 2. **Model**: an [`Overlay`] is a [`Shape`] plus shared attributes (color,
//!    group, notes, selection). Hit-testing uses [`Overlay::distance_to`].
//! 3. **Geometry**: [`Overlay::render_geometry`] yields the overlay's own
//!    polygons; [`highlight`] yields the translucent selection glow around it,
//!    sized in screen pixels via a data-units-per-pixel scale.
//! 4. **Exchange**: [`write_overlays`] and [`read_overlays`] implement the
//!    text format. Reads are all-or-nothing.
//!
//! All geometry is in data coordinates with the y axis pointing up.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod axes;
mod codec;
mod config;
mod foundation;
mod geometry;
mod model;
mod store;

pub use axes::indexer::{Axes, Axis, position_to_raster, raster_len, raster_to_position};
pub use codec::reader::{ReadSummary, read_overlays, read_overlays_file, read_overlays_str};
pub use codec::stats::{BasicStatistics, StatsFormat};
pub use codec::writer::{write_overlays, write_overlays_file, write_overlays_string};
pub use config::options::OverlayOptions;
pub use foundation::core::{BezPath, Point, Rect, Rgb8, Rgba8, Size, Vec2};
pub use foundation::error::{OverlayError, OverlayResult};
pub use geometry::arc::ARC_RESOLUTION;
pub use geometry::highlight::{
    GLOW, GLOW_MARGIN_PX, HIGHLIGHT, HighlightLayer, HighlightMode, HighlightStyle, OUTLINE,
    highlight, highlight_many, highlight_with_mode,
};
pub use geometry::offset::{MIN_HALF_ANGLE_SIN, OffsetCurve, band_polygons};
pub use geometry::polygon::{Polygon, Region};
pub use model::noded::NodedCurve;
pub use model::overlay::{
    ARROW_ASPECT, MARKER_HALF_SIZE, Overlay, OverlayKind, STROKE_WIDTH, Shape,
};
pub use model::render::RenderPrimitive;
pub use model::stats::OverlayStats;
pub use model::text::{MonospaceMetrics, TextLabel, TextMetrics};
pub use store::clipboard::Clipboard;
pub use store::slices::OverlayStore;
