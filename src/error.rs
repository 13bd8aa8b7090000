//! Error types for the raster core and the text parsers.

use thiserror::Error;

use crate::basics::Line;

/// Everything that can go wrong while building, drawing on, clipping for or
/// serializing a raster surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("pixel ({x}, {y}) lies outside the {width}x{height} surface")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    #[error("color code {0:?} is not registered on this surface")]
    UnknownColor(String),
    #[error("color code {0:?} is already defined")]
    DuplicateColor(String),
    #[error("cannot serialize a surface without colors")]
    NoColors,
    /// A line was flagged as crossing a boundary it is parallel to. The
    /// region codes guarantee this never happens for a well-formed window.
    #[error("line {0} does not intersect the boundary it was clipped against")]
    DegenerateIntersection(Line),
    /// Transforming the contained line moved a coordinate past the `i32`
    /// range.
    #[error("transformed line {0} leaves the integer coordinate range")]
    CoordinateOverflow(Line),
    #[error("invalid clip window: ({min_x}, {min_y}) - ({max_x}, {max_y})")]
    InvalidWindow {
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("color code {code:?} must be {expected} printable character(s) without quotes or backslashes")]
    InvalidColorCode { code: String, expected: usize },
}

/// Errors produced while reading line or transformation descriptions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: {token:?} is not a valid number")]
    InvalidNumber { token: String, line: usize },
    #[error("line {line}: {op:?} expects more operands")]
    MissingOperands { op: String, line: usize },
    #[error("%%%BEGIN block is never closed by %%%END")]
    UnterminatedBlock,
}
