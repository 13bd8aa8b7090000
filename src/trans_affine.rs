//! Affine transformation matrix and transformation pipelines.
//!
//! 2D affine transformations over homogeneous coordinates: translation,
//! rotation and scaling, the latter two about an arbitrary pivot point.
//! Integer geometry is transformed in floating point and rounded back to
//! the nearest integer.

use core::fmt;
use core::ops::{Mul, MulAssign};

use crate::basics::{checked_iround, deg2rad, iround, Line, Point};

/// Epsilon for affine matrix comparisons.
pub const AFFINE_EPSILON: f64 = 1e-14;

// ============================================================================
// TransAffine
// ============================================================================

/// 2D affine transformation matrix.
///
/// Stores the six variable components of the homogeneous 3x3 matrix:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// A point `(x, y)` is the column vector `(x, y, 1)`:
/// `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
///
/// Composition reads in application order: `a * b` applies `a` first,
/// then `b`.
#[derive(Debug, Clone, Copy)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    /// Identity matrix.
    pub fn new() -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    /// Counter-clockwise rotation about the origin by `a` radians.
    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self::new_custom(ca, sa, -sa, ca, 0.0, 0.0)
    }

    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_custom(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    pub fn new_translation(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Counter-clockwise rotation by `degrees` about `pivot`:
    /// `T(pivot) · R(angle) · T(-pivot)`.
    pub fn new_rotation_about(pivot: Point, degrees: f64) -> Self {
        Self::about(pivot, Self::new_rotation(deg2rad(degrees)))
    }

    /// Scaling by `(x, y)` about `pivot`: `T(pivot) · S(x, y) · T(-pivot)`.
    pub fn new_scaling_about(pivot: Point, x: f64, y: f64) -> Self {
        Self::about(pivot, Self::new_scaling(x, y))
    }

    /// Conjugate `m` so that it keeps `pivot` fixed.
    fn about(pivot: Point, m: TransAffine) -> Self {
        let (px, py) = (f64::from(pivot.x), f64::from(pivot.y));
        Self::new_translation(-px, -py) * m * Self::new_translation(px, py)
    }

    /// Forward transform: `(x, y) -> (x', y')`.
    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let tmp = *x;
        *x = tmp * self.sx + *y * self.shx + self.tx;
        *y = tmp * self.shy + *y * self.sy + self.ty;
    }

    /// Transform an integer point, rounding the result to the nearest
    /// integer (halves away from zero).
    ///
    /// Coordinates past the `i32` range saturate; use
    /// [`TransAffine::checked_transform_point`] to detect that.
    pub fn transform_point(&self, p: Point) -> Point {
        let (x, y) = self.transform_f64(p);
        Point::new(iround(x), iround(y))
    }

    /// Like [`TransAffine::transform_point`], but `None` when a rounded
    /// coordinate does not fit in `i32`.
    pub fn checked_transform_point(&self, p: Point) -> Option<Point> {
        let (x, y) = self.transform_f64(p);
        Some(Point::new(checked_iround(x)?, checked_iround(y)?))
    }

    /// Transform both endpoints of `line`, saturating like
    /// [`TransAffine::transform_point`].
    pub fn transform_line(&self, line: &Line) -> Line {
        Line::new(self.transform_point(line.a), self.transform_point(line.b))
    }

    pub fn checked_transform_line(&self, line: &Line) -> Option<Line> {
        let a = self.checked_transform_point(line.a)?;
        let b = self.checked_transform_point(line.b)?;
        Some(Line::new(a, b))
    }

    fn transform_f64(&self, p: Point) -> (f64, f64) {
        let mut x = f64::from(p.x);
        let mut y = f64::from(p.y);
        self.transform(&mut x, &mut y);
        (x, y)
    }

    /// Components in storage order: `sx, shy, shx, sy, tx, ty`.
    pub fn components(&self) -> [f64; 6] {
        [self.sx, self.shy, self.shx, self.sy, self.tx, self.ty]
    }

    /// Check if two matrices are equal within epsilon.
    pub fn is_equal(&self, m: &TransAffine, epsilon: f64) -> bool {
        self.components()
            .iter()
            .zip(m.components())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TransAffine {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other, AFFINE_EPSILON)
    }
}

/// `self * m` applies `self`, then `m`.
impl Mul for TransAffine {
    type Output = TransAffine;

    fn mul(self, m: TransAffine) -> TransAffine {
        TransAffine::new_custom(
            self.sx * m.sx + self.shy * m.shx,
            self.sx * m.shy + self.shy * m.sy,
            self.shx * m.sx + self.sy * m.shx,
            self.shx * m.shy + self.sy * m.sy,
            self.tx * m.sx + self.ty * m.shx + m.tx,
            self.tx * m.shy + self.ty * m.sy + m.ty,
        )
    }
}

impl MulAssign for TransAffine {
    fn mul_assign(&mut self, m: TransAffine) {
        *self = *self * m;
    }
}

// ============================================================================
// AffineOp
// ============================================================================

/// One step of a transformation pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffineOp {
    Translate {
        dx: i32,
        dy: i32,
    },
    /// Counter-clockwise rotation, in degrees.
    Rotate {
        pivot: Point,
        degrees: f64,
    },
    Scale {
        pivot: Point,
        sx: f64,
        sy: f64,
    },
}

impl AffineOp {
    pub fn matrix(&self) -> TransAffine {
        match *self {
            Self::Translate { dx, dy } => {
                TransAffine::new_translation(f64::from(dx), f64::from(dy))
            }
            Self::Rotate { pivot, degrees } => TransAffine::new_rotation_about(pivot, degrees),
            Self::Scale { pivot, sx, sy } => TransAffine::new_scaling_about(pivot, sx, sy),
        }
    }

    /// Transform and round both endpoints; `None` if either leaves `i32`.
    pub fn apply_line(&self, line: &Line) -> Option<Line> {
        self.matrix().checked_transform_line(line)
    }
}

/// Same token layout the transformation parser reads.
impl fmt::Display for AffineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate { dx, dy } => write!(f, "t {} {}", dx, dy),
            Self::Rotate { pivot, degrees } => {
                write!(f, "r {} {} {}", pivot.x, pivot.y, degrees)
            }
            Self::Scale { pivot, sx, sy } => {
                write!(f, "s {} {} {} {}", pivot.x, pivot.y, sx, sy)
            }
        }
    }
}

// ============================================================================
// TransformPipeline
// ============================================================================

/// An ordered list of [`AffineOp`]s, applied left to right.
///
/// Each step rounds to integer coordinates before the next one runs, so the
/// result can differ by a unit from applying [`TransformPipeline::matrix`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformPipeline {
    ops: Vec<AffineOp>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `op` (builder style).
    pub fn then(mut self, op: AffineOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[AffineOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// All steps folded into one matrix, without intermediate rounding.
    pub fn matrix(&self) -> TransAffine {
        let mut m = TransAffine::new();
        for op in &self.ops {
            m *= op.matrix();
        }
        m
    }

    /// Run every step over `line`; `None` as soon as a step overflows.
    pub fn apply_line(&self, line: &Line) -> Option<Line> {
        self.ops.iter().try_fold(*line, |l, op| op.apply_line(&l))
    }

    /// Transform every line; the input is left untouched.
    pub fn apply(&self, lines: &[Line]) -> Vec<Option<Line>> {
        lines.iter().map(|l| self.apply_line(l)).collect()
    }
}

impl From<Vec<AffineOp>> for TransformPipeline {
    fn from(ops: Vec<AffineOp>) -> Self {
        Self { ops }
    }
}

impl FromIterator<AffineOp> for TransformPipeline {
    fn from_iter<I: IntoIterator<Item = AffineOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
