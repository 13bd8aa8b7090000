//! Foundation types and numeric helpers.
//!
//! Integer geometry primitives (`Point`, `Line`) that every other stage
//! consumes, plus the rounding and angle conversions shared by the
//! transform engine and the clipper.

use core::fmt;

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a double to the nearest integer (round half away from zero).
///
/// Values beyond the `i32` range saturate at `i32::MIN` / `i32::MAX`;
/// [`checked_iround`] reports them instead.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Like [`iround`], but `None` when the rounded value does not fit in
/// `i32` or `v` is NaN.
#[inline]
pub fn checked_iround(v: f64) -> Option<i32> {
    let r = v.round();
    if r >= i32::MIN as f64 && r <= i32::MAX as f64 {
        Some(r as i32)
    } else {
        None
    }
}

/// Integer division rounded to the nearest integer, halves away from zero.
///
/// `den` must be nonzero.
#[inline]
pub fn div_round(num: i128, den: i128) -> i128 {
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    if num < 0 {
        (num - den / 2) / den
    } else {
        (num + den / 2) / den
    }
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

// ============================================================================
// Point
// ============================================================================

/// A point with integer coordinates in a right-handed Cartesian system
/// (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Line
// ============================================================================

/// An ordered pair of points.
///
/// Direction only matters for the traversal order of the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Shorthand for `Line::new(Point::new(x1, y1), Point::new(x2, y2))`.
    pub const fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// The same segment traversed from `b` to `a`.
    pub const fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Coefficients `(a, b, c)` of the implicit equation `a*x + b*y = c`.
    ///
    /// `c` needs more than 64 bits for endpoints near the `i32` limits.
    pub fn equation(&self) -> (i128, i128, i128) {
        let a = self.b.y as i128 - self.a.y as i128;
        let b = self.a.x as i128 - self.b.x as i128;
        let c = a * self.a.x as i128 + b * self.a.y as i128;
        (a, b, c)
    }

    /// Intersection of the infinite lines through `self` and `other`,
    /// rounded to the nearest integer point. `None` when they are parallel,
    /// either segment is a single point, or the intersection does not fit
    /// in `i32`.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        intersect_equations(self.equation(), other.equation())
    }
}

/// Intersection of two lines given as [`Line::equation`] coefficients,
/// rounded to the nearest integer point.
pub fn intersect_equations(
    (a1, b1, c1): (i128, i128, i128),
    (a2, b2, c2): (i128, i128, i128),
) -> Option<Point> {
    let det = a1 * b2 - a2 * b1;
    if det == 0 {
        return None;
    }
    let x = i32::try_from(div_round(b2 * c1 - b1 * c2, det)).ok()?;
    let y = i32::try_from(div_round(a1 * c2 - a2 * c1, det)).ok()?;
    Some(Point::new(x, y))
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.a, self.b)
    }
}

// ============================================================================
// Tests
// ============================================================================
