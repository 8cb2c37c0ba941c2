/// Convenience result type used across the overlay engine.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// A position, raster index or node index lies outside its valid range.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A position tuple and an axis-length list disagree in length.
    #[error("dimension mismatch: expected {expected} axes, found {found}")]
    DimensionMismatch {
        /// Axis count of the dataset.
        expected: usize,
        /// Axis count of the supplied position.
        found: usize,
    },

    /// Degenerate or self-intersecting polygon.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Unmet precondition of a store, clipboard or shape operation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed exchange-format input.
    #[error("format error at line {line}: {message}")]
    Format {
        /// 1-based source line.
        line: usize,
        /// Human-readable description.
        message: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build an [`OverlayError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build an [`OverlayError::InvalidGeometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build an [`OverlayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OverlayError::Format`] value for a 1-based `line`.
    pub fn format(line: usize, msg: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: msg.into(),
        }
    }

    /// Source line of a format error, if this is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
