use crate::foundation::error::{OverlayError, OverlayResult};

pub use kurbo::{BezPath, Point, Rect, Size, Vec2};

/// Straight (non-premultiplied) 8-bit RGB color of an overlay.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA view of this color.
    pub const fn opaque(self) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a: 255,
        }
    }

    /// RGBA view of this color with `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    /// Format as six lowercase hex digits (`RRGGBB`).
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `RRGGBB`, or a longer string whose length is a multiple of three
    /// (one equal-width hex group per channel, e.g. `RRRRGGGGBBBB` for 16-bit).
    ///
    /// Wider channels are rescaled to 8 bits.
    pub fn from_hex(s: &str) -> OverlayResult<Self> {
        let s = s.trim();
        let n = s.len();
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(OverlayError::validation(format!(
                "color '{s}' has non-hex digits"
            )));
        }
        if n < 6 || n % 3 != 0 {
            return Err(OverlayError::validation(format!(
                "color '{s}' must be 6 hex digits or a longer multiple of 3"
            )));
        }
        let width = n / 3;
        if width > 16 {
            return Err(OverlayError::validation(format!(
                "color '{s}' exceeds 64 bits per channel"
            )));
        }
        let channel = |i: usize| -> OverlayResult<u8> {
            let digits = &s[i * width..(i + 1) * width];
            let v = u64::from_str_radix(digits, 16).map_err(|_| {
                OverlayError::validation(format!("color '{s}' has non-hex digits"))
            })?;
            if width == 2 {
                return Ok(v as u8);
            }
            let max = if width == 16 {
                u64::MAX
            } else {
                (1u64 << (4 * width)) - 1
            };
            Ok(((v as f64 / max as f64) * 255.0).round() as u8)
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(1)?,
            b: channel(2)?,
        })
    }
}

/// Straight-alpha RGBA8 color handed to the rendering collaborator.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// The RGB part of this color.
    pub const fn rgb(self) -> Rgb8 {
        Rgb8 {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
