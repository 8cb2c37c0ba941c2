use anyhow::Context;

use crate::foundation::error::{OverlayError, OverlayResult};

/// Runtime options of the overlay engine.
///
/// Every field has a default, so `{}` is a valid JSON document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayOptions {
    /// Point size handed to the text metrics service.
    #[serde(default = "default_text_point_size")]
    pub text_point_size: f64,
    /// Screen-space tolerance used by store hit-testing.
    #[serde(default = "default_hit_tolerance_px")]
    pub hit_tolerance_px: f64,
    /// First comment line of written exchange files.
    #[serde(default = "default_header_comment")]
    pub header_comment: String,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            text_point_size: default_text_point_size(),
            hit_tolerance_px: default_hit_tolerance_px(),
            header_comment: default_header_comment(),
        }
    }
}

impl OverlayOptions {
    /// Parse and validate options from a JSON document.
    pub fn from_json_str(json: &str) -> OverlayResult<Self> {
        let options: Self = serde_json::from_str(json).context("parse overlay options json")?;
        options.validate()?;
        Ok(options)
    }

    /// Reject non-positive or non-finite sizes and a multi-line header comment.
    pub fn validate(&self) -> OverlayResult<()> {
        if !self.text_point_size.is_finite() || self.text_point_size <= 0.0 {
            return Err(OverlayError::validation(
                "text_point_size must be finite and > 0",
            ));
        }
        if !self.hit_tolerance_px.is_finite() || self.hit_tolerance_px <= 0.0 {
            return Err(OverlayError::validation(
                "hit_tolerance_px must be finite and > 0",
            ));
        }
        if self.header_comment.contains(['\n', '\r']) {
            return Err(OverlayError::validation(
                "header_comment must be a single line",
            ));
        }
        Ok(())
    }
}

fn default_text_point_size() -> f64 {
    12.0
}

fn default_hit_tolerance_px() -> f64 {
    4.0
}

fn default_header_comment() -> String {
    "Overlay annotations".to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
