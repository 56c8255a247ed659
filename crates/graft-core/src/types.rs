//! Core value types shared by the node tree and the canonical model.

use serde::{Deserialize, Serialize};

/// A colour as delivered by the design tool: channels are floats in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Convert to 8-bit RGB tuple, rounding each channel.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// Return a copy with alpha multiplied by `opacity`.
    pub fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Whether the colour is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Canonical CSS string: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    ///
    /// This is the single colour serialisation used for both token values and
    /// generated styles, so a token and a style derived from the same paint compare
    /// equal as strings.
    pub fn to_css(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({},{},{},{})", r, g, b, format_number(self.a.max(0.0)))
        }
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A 2D vector (offsets, gradient handles).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Absolute bounding box of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-corner radii, clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub const fn new(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Build from the design tool's `[tl, tr, br, bl]` array form.
    pub fn from_array(radii: [f64; 4]) -> Self {
        Self::new(radii[0], radii[1], radii[2], radii[3])
    }

    /// Whether all four corners share one radius.
    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }
}

/// Format a number for emitted text: integers without a fraction, everything else
/// rounded to four decimals with trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_color_to_hex() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_css(), "#ff0000");
        assert_eq!(Color::from_rgb8(0x3b, 0x82, 0xf6).to_css(), "#3b82f6");
    }

    #[test]
    fn test_translucent_color_to_rgba() {
        assert_eq!(Color::rgba(1.0, 0.0, 0.0, 0.5).to_css(), "rgba(255,0,0,0.5)");
    }

    #[test]
    fn test_channels_are_clamped() {
        assert_eq!(Color::rgb(1.4, -0.2, 0.5).to_rgb8(), (255, 0, 128));
    }

    #[test]
    fn test_with_opacity() {
        let c = Color::rgb(0.0, 0.0, 0.0).with_opacity(0.25);
        assert_eq!(c.to_css(), "rgba(0,0,0,0.25)");
    }

    #[test]
    fn test_missing_alpha_defaults_to_opaque() {
        let c: Color = serde_json::from_str(r#"{"r":0,"g":1,"b":0}"#).unwrap();
        assert!(c.is_opaque());
        assert_eq!(c.to_css(), "#00ff00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.25), "1.25");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn test_format_number_does_not_saturate() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(-1e19), "-10000000000000000000");
    }

    #[test]
    fn test_corner_radii_from_array() {
        let radii = CornerRadii::from_array([4.0, 4.0, 0.0, 0.0]);
        assert_eq!(radii.top_right, 4.0);
        assert_eq!(radii.bottom_left, 0.0);
        assert!(!radii.is_uniform());
    }
}
