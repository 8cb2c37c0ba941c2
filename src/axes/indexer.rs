use crate::foundation::error::{OverlayError, OverlayResult};

/// Encode `position` as a mixed-radix raster index over `lengths`.
///
/// Axis 0 varies fastest: `stride(0) = 1`, `stride(i) = stride(i-1) * lengths[i-1]`.
pub fn position_to_raster(position: &[usize], lengths: &[usize]) -> OverlayResult<usize> {
    if position.len() != lengths.len() {
        return Err(OverlayError::DimensionMismatch {
            expected: lengths.len(),
            found: position.len(),
        });
    }

    // Bounds every partial sum and stride below.
    raster_len(lengths)?;

    let mut index = 0usize;
    let mut stride = 1usize;
    for (axis, (&p, &len)) in position.iter().zip(lengths).enumerate() {
        if p >= len {
            return Err(OverlayError::out_of_range(format!(
                "position[{axis}] = {p} is outside [0, {len})"
            )));
        }
        index += p * stride;
        stride *= len;
    }
    Ok(index)
}

/// Decode a raster index back into its position tuple.
pub fn raster_to_position(index: usize, lengths: &[usize]) -> OverlayResult<Vec<usize>> {
    let total = raster_len(lengths)?;
    if index >= total {
        return Err(OverlayError::out_of_range(format!(
            "raster index {index} is outside [0, {total})"
        )));
    }

    let mut rest = index;
    let mut out = Vec::with_capacity(lengths.len());
    for &len in lengths {
        out.push(rest % len);
        rest /= len;
    }
    Ok(out)
}

/// Number of distinct positions (product of the axis lengths).
///
/// Fails with [`OverlayError::OutOfRange`] when the product does not fit in
/// `usize`.
pub fn raster_len(lengths: &[usize]) -> OverlayResult<usize> {
    lengths
        .iter()
        .try_fold(1usize, |acc, &len| acc.checked_mul(len))
        .ok_or_else(|| {
            OverlayError::out_of_range(format!(
                "axis lengths {lengths:?} overflow the raster index"
            ))
        })
}

/// A named dataset axis.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Axis {
    /// Display name, e.g. `Time`.
    pub name: String,
    /// Number of positions along this axis (> 0).
    pub length: usize,
}

impl Axis {
    /// Build an axis.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// The ordered axes of a dataset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Axis>", into = "Vec<Axis>")]
pub struct Axes {
    axes: Vec<Axis>,
    lengths: Vec<usize>,
    total: usize,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            axes: Vec::new(),
            lengths: Vec::new(),
            total: 1,
        }
    }
}

impl Axes {
    /// Validate and build an axis list. Every length must be positive and
    /// the number of positions must fit in `usize`.
    pub fn new(axes: Vec<Axis>) -> OverlayResult<Self> {
        if let Some(bad) = axes.iter().find(|a| a.length == 0) {
            return Err(OverlayError::validation(format!(
                "axis '{}' must have a positive length",
                bad.name
            )));
        }
        let lengths: Vec<usize> = axes.iter().map(|a| a.length).collect();
        let total = raster_len(&lengths).map_err(|_| {
            OverlayError::validation("axis lengths multiply past the raster index range")
        })?;
        Ok(Self {
            axes,
            lengths,
            total,
        })
    }

    /// Convenience constructor from `(name, length)` pairs.
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, usize)>,
    ) -> OverlayResult<Self> {
        Self::new(pairs.into_iter().map(|(n, l)| Axis::new(n, l)).collect())
    }

    /// The axes in order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Axis lengths in order.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// `true` for a dataset without axes, which has a single position.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Total number of raster positions.
    pub fn raster_len(&self) -> usize {
        self.total
    }

    /// Raster index of `position`.
    pub fn raster(&self, position: &[usize]) -> OverlayResult<usize> {
        position_to_raster(position, &self.lengths)
    }

    /// Position tuple of raster `index`.
    pub fn position(&self, index: usize) -> OverlayResult<Vec<usize>> {
        raster_to_position(index, &self.lengths)
    }
}

impl TryFrom<Vec<Axis>> for Axes {
    type Error = OverlayError;

    fn try_from(axes: Vec<Axis>) -> OverlayResult<Self> {
        Self::new(axes)
    }
}

impl From<Axes> for Vec<Axis> {
    fn from(axes: Axes) -> Self {
        axes.axes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/axes/indexer.rs"]
mod tests;
