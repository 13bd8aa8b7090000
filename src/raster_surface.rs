//! Raster surface: a fixed grid of palette codes.
//!
//! Cells are stored row-major, top row first, the way the XPM format lays
//! them out. Callers that think in right-handed Cartesian coordinates
//! (origin bottom-left, y up) go through [`RasterSurface::set_pixel_cartesian`],
//! which is the only place the two coordinate systems are converted.
//!
//! Bounds are exclusive: valid storage coordinates are
//! `0 <= x < width` and `0 <= y < height`.

use core::fmt::Write as _;

use crate::color::Color;
use crate::error::RasterError;

// ============================================================================
// RasterSurface
// ============================================================================

/// A `width x height` grid of color codes plus the palette they refer to.
///
/// Each cell holds an index into the palette, so every stored code is
/// registered by construction.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    chars_per_pixel: usize,
    colors: Vec<Color>,
    cells: Vec<u32>,
}

impl RasterSurface {
    /// Create a surface filled with the white `~` background, then register
    /// `colors` in order.
    pub fn new(
        width: u32,
        height: u32,
        colors: impl IntoIterator<Item = Color>,
    ) -> Result<Self, RasterError> {
        let palette = core::iter::once(Color::background()).chain(colors);
        Self::with_palette(width, height, palette)
    }

    /// Create a surface whose background is the first of `colors`.
    ///
    /// Unlike [`RasterSurface::new`] no color is implied, so the palette may
    /// be empty; such a surface rejects every pixel write and cannot be
    /// serialized.
    pub fn with_palette(
        width: u32,
        height: u32,
        colors: impl IntoIterator<Item = Color>,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }

        let mut colors = colors.into_iter().peekable();
        let chars_per_pixel = colors
            .peek()
            .map(|c| c.code.chars().count())
            .filter(|&n| n > 0)
            .unwrap_or(1);

        let mut surface = Self {
            width,
            height,
            chars_per_pixel,
            colors: Vec::new(),
            cells: vec![0; width as usize * height as usize],
        };
        for c in colors {
            surface.add_color(c.r, c.g, c.b, &c.code)?;
        }
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of characters every color code on this surface has.
    pub fn chars_per_pixel(&self) -> usize {
        self.chars_per_pixel
    }

    /// The palette, in registration order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Register a palette entry.
    ///
    /// Fails with `DuplicateColor` if `code` is already registered (the
    /// palette is left untouched) and with `InvalidColorCode` if the code
    /// would not fit the fixed-width cell encoding.
    pub fn add_color(&mut self, r: u8, g: u8, b: u8, code: &str) -> Result<(), RasterError> {
        if self.color_index(code).is_some() {
            return Err(RasterError::DuplicateColor(code.to_string()));
        }
        let printable = |c: char| !c.is_control() && c != '"' && c != '\\';
        if code.chars().count() != self.chars_per_pixel || !code.chars().all(printable) {
            return Err(RasterError::InvalidColorCode {
                code: code.to_string(),
                expected: self.chars_per_pixel,
            });
        }
        self.colors.push(Color::new(r, g, b, code));
        Ok(())
    }

    fn color_index(&self, code: &str) -> Option<usize> {
        self.colors.iter().position(|c| c.code == code)
    }

    fn cell_offset(&self, x: i64, y: i64) -> Result<usize, RasterError> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Convert a Cartesian y coordinate to a storage row.
    #[inline]
    fn cartesian_row(&self, y: i32) -> i64 {
        i64::from(self.height) - 1 - i64::from(y)
    }

    fn set_cell(&mut self, x: i64, y: i64, code: &str) -> Result<(), RasterError> {
        let offset = self.cell_offset(x, y)?;
        let index = self
            .color_index(code)
            .ok_or_else(|| RasterError::UnknownColor(code.to_string()))?;
        self.cells[offset] = index as u32;
        Ok(())
    }

    fn cell(&self, x: i64, y: i64) -> Option<&str> {
        let offset = self.cell_offset(x, y).ok()?;
        self.colors
            .get(self.cells[offset] as usize)
            .map(|c| c.code.as_str())
    }

    fn row_codes(&self, y: usize) -> impl Iterator<Item = &str> + '_ {
        let start = y * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(move |&i| self.colors[i as usize].code.as_str())
    }

    // ------------------------------------------------------------------------
    // Pixel access
    // ------------------------------------------------------------------------

    /// Set the cell at column `x`, row `y` (row 0 is the top row).
    pub fn set_pixel(&mut self, x: i32, y: i32, code: &str) -> Result<(), RasterError> {
        self.set_cell(x.into(), y.into(), code)
    }

    /// Set the cell at Cartesian `(x, y)`, origin bottom-left.
    ///
    /// Maps to storage row `height - 1 - y`. Errors report the storage
    /// coordinates, which may fall outside `i32` for extreme `y`.
    pub fn set_pixel_cartesian(&mut self, x: i32, y: i32, code: &str) -> Result<(), RasterError> {
        self.set_cell(x.into(), self.cartesian_row(y), code)
    }

    /// Code stored at column `x`, row `y`, or `None` out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<&str> {
        self.cell(x.into(), y.into())
    }

    /// Code stored at Cartesian `(x, y)`.
    pub fn pixel_cartesian(&self, x: i32, y: i32) -> Option<&str> {
        self.cell(x.into(), self.cartesian_row(y))
    }

    /// Reset every cell to the background (the first registered color).
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Codes of storage row `y`, left to right, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<impl Iterator<Item = &str> + '_> {
        (y < self.height).then(|| self.row_codes(y as usize))
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    /// Encode the surface as an XPM3 file.
    pub fn serialize(&self) -> Result<Vec<u8>, RasterError> {
        if self.colors.is_empty() {
            return Err(RasterError::NoColors);
        }

        let row_len = self.width as usize * self.chars_per_pixel + 4;
        let mut out = String::with_capacity(
            64 + self.colors.len() * 20 + self.height as usize * row_len,
        );
        out.push_str("/* XPM */\n");
        out.push_str("static char* XPM[] = {\n");
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "\"{} {} {} {}\",",
            self.width,
            self.height,
            self.colors.len(),
            self.chars_per_pixel
        );
        for c in &self.colors {
            out.push_str(&c.xpm_entry());
            out.push_str(",\n");
        }
        for y in 0..self.height {
            out.push('"');
            for code in self.row_codes(y as usize) {
                out.push_str(code);
            }
            out.push('"');
            if y + 1 < self.height {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("}\n");
        Ok(out.into_bytes())
    }
}

// ============================================================================
// Tests
// ============================================================================
