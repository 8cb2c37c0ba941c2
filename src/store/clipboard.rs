use crate::{model::overlay::Overlay, store::slices::OverlayStore};

/// Snapshot of copied overlays and the position they were copied from.
///
/// Entries are owned copies; editing the store afterwards never reaches
/// them, and pasting clones them again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clipboard {
    overlays: Vec<Overlay>,
    source: Option<Vec<usize>>,
}

impl Clipboard {
    /// Copied overlays in their original Z order.
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Position the entries were copied from.
    pub fn source(&self) -> Option<&[usize]> {
        self.source.as_deref()
    }

    /// Number of copied overlays.
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// `true` when nothing has been copied.
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Drop all entries and the source position.
    pub fn clear(&mut self) {
        self.overlays.clear();
        self.source = None;
    }
}

impl OverlayStore {
    /// Replace the clipboard with copies of the selected overlays at
    /// `position`. Returns the number copied.
    pub fn copy_selected(&mut self, position: &[usize]) -> usize {
        let Some(slot) = self.slice(position) else {
            return 0;
        };
        let overlays: Vec<Overlay> = slot.iter().filter(|o| o.selected).cloned().collect();
        let copied = overlays.len();
        self.clipboard = Clipboard {
            overlays,
            source: Some(position.to_vec()),
        };
        copied
    }

    /// Insert fresh copies of the clipboard entries at `position`, selected
    /// and finished. Returns the number pasted.
    pub fn paste(&mut self, position: &[usize]) -> usize {
        let copies: Vec<Overlay> = self
            .clipboard
            .overlays
            .iter()
            .map(|o| {
                let mut copy = o.clone();
                copy.selected = true;
                copy.drawing = false;
                copy
            })
            .collect();
        let Some(slot) = self.slice_mut(position) else {
            return 0;
        };
        let pasted = copies.len();
        slot.extend(copies);
        pasted
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/clipboard.rs"]
mod tests;
