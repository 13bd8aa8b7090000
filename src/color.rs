//! Palette entries.
//!
//! A surface stores short symbolic codes per cell; the palette maps each
//! code to an 8-bit-per-channel RGB triple.

use core::fmt;

/// Code and color of the background every new surface is filled with.
pub const BACKGROUND_CODE: &str = "~";
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

// ============================================================================
// Color
// ============================================================================

/// A palette entry: a code unique within its surface plus an RGB triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub code: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            r,
            g,
            b,
        }
    }

    /// The white `~` entry registered on every surface created with
    /// [`RasterSurface::new`](crate::raster_surface::RasterSurface::new).
    pub fn background() -> Self {
        let [r, g, b] = BACKGROUND_RGB;
        Self::new(r, g, b, BACKGROUND_CODE)
    }

    /// Parse a six digit `RRGGBB` hex triple, with or without a leading `#`.
    pub fn parse_rgb(hex: &str) -> Option<[u8; 3]> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some([channel(0)?, channel(2)?, channel(4)?])
    }

    /// The quoted XPM color line, e.g. `"b c #0000FF"`.
    pub fn xpm_entry(&self) -> String {
        format!("\"{} c {}\"", self.code, self.hex())
    }

    /// Uppercase `#RRGGBB`.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.hex())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xpm_entry() {
        let c = Color::new(0, 0, 255, "b");
        assert_eq!(c.xpm_entry(), "\"b c #0000FF\"");
    }

    #[test]
    fn test_hex_uppercase_padded() {
        let c = Color::new(10, 171, 3, "x");
        assert_eq!(c.hex(), "#0AAB03");
    }

    #[test]
    fn test_background() {
        let c = Color::background();
        assert_eq!(c.code, "~");
        assert_eq!(c.hex(), "#FFFFFF");
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(Color::parse_rgb("0000FF"), Some([0, 0, 255]));
        assert_eq!(Color::parse_rgb("#ff8000"), Some([255, 128, 0]));
        assert_eq!(Color::parse_rgb("12345"), None);
        assert_eq!(Color::parse_rgb("GG0000"), None);
    }
}
