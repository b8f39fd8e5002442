/*!
Color value type

Colors enter the library as CSS color strings (configuration, palette
definitions) and leave it as packed RGBA values on color maps and legend
items. Parsing accepts everything [`csscolorparser`] accepts: named colors,
hex forms, `rgb()`/`rgba()`, `hsl()`, and so on.
*/

use palette::{FromColor, Hsv, Srgb};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Color
// =============================================================================

/// An 8-bit RGBA color.
///
/// Serializes as a CSS hex string (`"#rrggbb"`, or `"#rrggbbaa"` when the
/// alpha channel is not fully opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Fully transparent black, the fallback for unresolvable colors.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// An opaque color from RGB components.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Color {
        Color::rgba(red, green, blue, 255)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parses a CSS color string, e.g. `"red"`, `"#ff0000"` or
    /// `"rgba(255,0,0,0.5)"`.
    pub fn from_css(css: &str) -> Option<Color> {
        let parsed = csscolorparser::parse(css).ok()?;
        let [red, green, blue, alpha] = parsed.to_rgba8();
        Some(Color::rgba(red, green, blue, alpha))
    }

    /// A deterministic color derived from an identifier.
    ///
    /// The same identifier always yields the same color, so styles stay
    /// stable across reloads without any stored state. The hash picks a hue;
    /// saturation and value are fixed to keep the result readable.
    pub fn from_string_id(id: &str) -> Color {
        let hue = (fnv1a(id.as_bytes()) % 360) as f32;
        let hsv: Hsv = Hsv::new(hue, 0.65, 0.85);
        let rgb: Srgb<u8> = Srgb::from_color(hsv).into_format();
        Color::rgb(rgb.red, rgb.green, rgb.blue)
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha == 0
    }

    /// CSS hex form, with the alpha channel only when it carries information.
    pub fn to_css_hex(&self) -> String {
        if self.alpha == 255 {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_css_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Color, D::Error> {
        let css = String::deserialize(deserializer)?;
        Color::from_css(&css)
            .ok_or_else(|| D::Error::custom(format!("unrecognized color '{}'", css)))
    }
}

/// 64-bit FNV-1a over raw bytes.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_color() {
        assert_eq!(Color::from_css("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_css("white"), Some(Color::rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Color::from_css("#02528d"), Some(Color::rgb(2, 82, 141)));
        assert_eq!(
            Color::from_css("#ff000080"),
            Some(Color::rgba(255, 0, 0, 128))
        );
    }

    #[test]
    fn test_parse_rgba_function() {
        assert_eq!(
            Color::from_css("rgba(0, 0, 0, 0)"),
            Some(Color::TRANSPARENT)
        );
    }

    #[test]
    fn test_parse_invalid_color() {
        assert_eq!(Color::from_css("not a color"), None);
        assert_eq!(Color::from_css(""), None);
    }

    #[test]
    fn test_to_css_hex() {
        assert_eq!(Color::rgb(255, 0, 0).to_css_hex(), "#ff0000");
        assert_eq!(Color::rgba(255, 0, 0, 128).to_css_hex(), "#ff000080");
        assert_eq!(Color::TRANSPARENT.to_css_hex(), "#00000000");
    }

    #[test]
    fn test_from_string_id_is_deterministic() {
        assert_eq!(
            Color::from_string_id("My Style"),
            Color::from_string_id("My Style")
        );
    }

    #[test]
    fn test_from_string_id_varies_with_id() {
        assert_ne!(
            Color::from_string_id("My Style"),
            Color::from_string_id("My Style-outlier")
        );
    }

    #[test]
    fn test_from_string_id_is_opaque() {
        assert_eq!(Color::from_string_id("anything").alpha, 255);
    }

    #[test]
    fn test_serde_round_trip() {
        let color = Color::rgb(2, 82, 141);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#02528d\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }

    #[test]
    fn test_deserialize_named_color() {
        let color: Color = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(color, Color::rgb(255, 255, 0));
    }

    #[test]
    fn test_deserialize_invalid_color_fails() {
        let result: std::result::Result<Color, _> = serde_json::from_str("\"bogus\"");
        assert!(result.is_err());
    }
}
