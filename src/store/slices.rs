use std::{fmt, sync::Arc};

use kurbo::Point;

use crate::{
    axes::indexer::Axes,
    config::options::OverlayOptions,
    foundation::error::OverlayResult,
    model::{
        overlay::Overlay,
        text::{MonospaceMetrics, TextMetrics},
    },
    store::clipboard::Clipboard,
};

/// Per-position overlay collections of one dataset.
///
/// Every overlay is owned by exactly one slot. A slot is addressed by a
/// dimensional position and stored at its raster index; within a slot the
/// order is Z order, last on top.
///
/// Operations given an out-of-range position do nothing.
pub struct OverlayStore {
    axes: Axes,
    slices: Vec<Vec<Overlay>>,
    pub(crate) clipboard: Clipboard,
    options: OverlayOptions,
    metrics: Arc<dyn TextMetrics>,
}

impl fmt::Debug for OverlayStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayStore")
            .field("axes", &self.axes)
            .field("slices", &self.slices)
            .field("clipboard", &self.clipboard)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl OverlayStore {
    /// Empty store with default options and monospace text metrics.
    pub fn new(axes: Axes) -> Self {
        let slices = vec![Vec::new(); axes.raster_len()];
        Self {
            axes,
            slices,
            clipboard: Clipboard::default(),
            options: OverlayOptions::default(),
            metrics: Arc::new(MonospaceMetrics::default()),
        }
    }

    /// Empty store with validated `options`.
    pub fn with_options(axes: Axes, options: OverlayOptions) -> OverlayResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::new(axes)
        })
    }

    /// Replace the font-metrics service used to size text overlays.
    pub fn with_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Dataset axes the store is indexed by.
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Engine options in effect.
    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    /// Font-metrics service used for text overlays.
    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    /// Current clipboard contents.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Total number of overlays over all positions.
    pub fn len(&self) -> usize {
        self.slices.iter().map(Vec::len).sum()
    }

    /// `true` when no position holds an overlay.
    pub fn is_empty(&self) -> bool {
        self.slices.iter().all(Vec::is_empty)
    }

    /// Overlays at `position` in Z order.
    pub fn slice(&self, position: &[usize]) -> Option<&[Overlay]> {
        let index = self.slot(position)?;
        Some(&self.slices[index])
    }

    /// Mutable overlays at `position`.
    pub fn slice_mut(&mut self, position: &[usize]) -> Option<&mut Vec<Overlay>> {
        let index = self.slot(position)?;
        Some(&mut self.slices[index])
    }

    /// Non-empty slots with their positions, in raster order.
    pub fn iter_slices(&self) -> impl Iterator<Item = (Vec<usize>, &[Overlay])> + '_ {
        self.slices
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
            .filter_map(|(raster, slot)| {
                self.axes
                    .position(raster)
                    .ok()
                    .map(|position| (position, slot.as_slice()))
            })
    }

    /// Append `overlay` on top of the slot at `position`, returning its index.
    pub fn add(&mut self, overlay: Overlay, position: &[usize]) -> Option<usize> {
        let slot = self.slice_mut(position)?;
        slot.push(overlay);
        Some(slot.len() - 1)
    }

    /// Remove the overlay at `index` in the slot at `position`.
    pub fn remove(&mut self, position: &[usize], index: usize) -> Option<Overlay> {
        let slot = self.slice_mut(position)?;
        (index < slot.len()).then(|| slot.remove(index))
    }

    /// Remove every selected overlay at `position`, returning how many went.
    pub fn remove_selected(&mut self, position: &[usize]) -> usize {
        let Some(slot) = self.slice_mut(position) else {
            return 0;
        };
        let before = slot.len();
        slot.retain(|o| !o.selected);
        before - slot.len()
    }

    /// Select every overlay at `position`.
    pub fn select_all(&mut self, position: &[usize]) {
        if let Some(slot) = self.slice_mut(position) {
            slot.iter_mut().for_each(|o| o.selected = true);
        }
    }

    /// Clear the selection at `position`.
    pub fn deselect_all(&mut self, position: &[usize]) {
        if let Some(slot) = self.slice_mut(position) {
            slot.iter_mut().for_each(|o| o.selected = false);
        }
    }

    /// Selected overlays at `position` with their slot indices.
    pub fn selected(&self, position: &[usize]) -> impl Iterator<Item = (usize, &Overlay)> + '_ {
        self.slice(position)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected)
    }

    /// Index of the overlay at `position` nearest to `point`, if one lies
    /// within the configured pixel tolerance. Later overlays win ties.
    pub fn hit_test(
        &self,
        position: &[usize],
        point: Point,
        data_units_per_pixel: f64,
    ) -> Option<usize> {
        let tolerance = self.options.hit_tolerance_px * data_units_per_pixel;
        let mut best: Option<(usize, f64)> = None;
        for (i, overlay) in self.slice(position)?.iter().enumerate() {
            let d = overlay.distance_to(point);
            if d <= tolerance && best.is_none_or(|(_, bd)| d <= bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Switch to a new axis layout.
    ///
    /// Slots are carried over by raster index, as many as fit; anything past
    /// the new extent is dropped. Overlays may therefore land on a different
    /// dimensional position when an axis length changed. Returns the number
    /// of dropped overlays.
    #[tracing::instrument(skip(self, axes), fields(old = ?self.axes.lengths(), new = ?axes.lengths()))]
    pub fn set_axes(&mut self, axes: Axes) -> usize {
        let new_len = axes.raster_len();
        let mut old = std::mem::take(&mut self.slices);
        let dropped: usize = old.iter().skip(new_len).map(Vec::len).sum();
        old.truncate(new_len);
        old.resize_with(new_len, Vec::new);

        self.slices = old;
        self.axes = axes;
        if dropped > 0 {
            tracing::warn!(dropped, "axis change dropped overlays past the new extent");
        }
        dropped
    }

    /// Raster index of `position`, or `None` (logged) if it is invalid.
    pub(crate) fn slot(&self, position: &[usize]) -> Option<usize> {
        match self.axes.raster(position) {
            Ok(index) => Some(index),
            Err(err) => {
                tracing::debug!(?position, %err, "ignoring store operation");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/slices.rs"]
mod tests;
