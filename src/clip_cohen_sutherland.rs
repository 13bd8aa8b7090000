//! Cohen-Sutherland line clipping.
//!
//! Trims integer line segments to an axis-aligned [`Window`]. Endpoints
//! outside the window are moved, one boundary at a time, onto the boundary
//! their region code names, until the segment is either fully inside or
//! provably invisible.

use log::{debug, trace};

use crate::basics::{intersect_equations, Line, Point};
use crate::error::RasterError;

// ============================================================================
// Region codes
// ============================================================================

pub const REGION_INSIDE: u32 = 0;
pub const REGION_LEFT: u32 = 1;
pub const REGION_RIGHT: u32 = 2;
pub const REGION_BELOW: u32 = 4;
pub const REGION_ABOVE: u32 = 8;
pub const REGION_X: u32 = REGION_LEFT | REGION_RIGHT;
pub const REGION_Y: u32 = REGION_BELOW | REGION_ABOVE;

/// Two endpoints, at most four boundaries each.
const MAX_CLIP_STEPS: usize = 8;

// ============================================================================
// Window
// ============================================================================

/// Axis-aligned clip rectangle, bounds inclusive on every side.
///
/// ```text
///        |        |
///  1001  |  1000  | 1010
///        |        |
/// -------+--------+-------- max_y
///        |        |
///  0001  |  0000  | 0010
///        |        |
/// -------+--------+-------- min_y
///        |        |
///  0101  |  0100  | 0110
///        |        |
///      min_x    max_x
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    top: Line,
    bottom: Line,
    left: Line,
    right: Line,
}

/// Endpoints for a boundary running from `lo` to `hi`, stretched to unit
/// length when the window is flat so its line equation stays defined.
fn span(lo: i32, hi: i32) -> (i32, i32) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo.checked_add(1).unwrap_or(lo - 1))
    }
}

impl Window {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<Self, RasterError> {
        if min_x > max_x || min_y > max_y {
            return Err(RasterError::InvalidWindow {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }

        let (x1, x2) = span(min_x, max_x);
        let (y1, y2) = span(min_y, max_y);
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            top: Line::from_coords(x1, max_y, x2, max_y),
            bottom: Line::from_coords(x1, min_y, x2, min_y),
            left: Line::from_coords(min_x, y1, min_x, y2),
            right: Line::from_coords(max_x, y1, max_x, y2),
        })
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Region code of `p`: `(vertical << 2) | horizontal`.
    #[inline]
    pub fn region_code(&self, p: Point) -> u32 {
        let vertical = if p.y < self.min_y {
            1
        } else if p.y > self.max_y {
            2
        } else {
            0
        };
        let horizontal = if p.x < self.min_x {
            1
        } else if p.x > self.max_x {
            2
        } else {
            0
        };
        (vertical << 2) | horizontal
    }

    /// Returns `true` if `p` lies inside the window or on its border.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.region_code(p) == REGION_INSIDE
    }

    /// Returns `true` if `line` is partially visible, i.e. [`Window::clip`]
    /// would have to move at least one endpoint.
    pub fn needs_clipping(&self, line: &Line) -> bool {
        let ca = self.region_code(line.a);
        let cb = self.region_code(line.b);
        (ca | cb) != 0 && (ca & cb) == 0
    }

    /// Boundary named by the highest-priority bit of `code`: vertical
    /// boundaries (above, below) first, then right, then left.
    fn boundary(&self, code: u32) -> Line {
        if code & REGION_ABOVE != 0 {
            self.top
        } else if code & REGION_BELOW != 0 {
            self.bottom
        } else if code & REGION_RIGHT != 0 {
            self.right
        } else {
            self.left
        }
    }

    /// Clip `line` to the window.
    ///
    /// Returns `Ok(Some(_))` with the visible part (the input itself if it
    /// is entirely inside), `Ok(None)` if nothing is visible, and
    /// `DegenerateIntersection` if a line is flagged against a boundary it
    /// runs parallel to.
    ///
    /// Boundaries are always intersected with the input segment, never with
    /// a partially clipped and rounded one; a segment through any integer
    /// point of the window is never rejected.
    pub fn clip(&self, line: &Line) -> Result<Option<Line>, RasterError> {
        let equation = line.equation();
        let mut line = *line;

        for step in 0..MAX_CLIP_STEPS {
            let ca = self.region_code(line.a);
            let cb = self.region_code(line.b);

            if (ca | cb) == 0 {
                trace!("clip: accepted {} after {} step(s)", line, step);
                return Ok(Some(line));
            }
            if (ca & cb) != 0 {
                trace!("clip: rejected {} after {} step(s)", line, step);
                return Ok(None);
            }

            let (code, move_a) = if ca != 0 { (ca, true) } else { (cb, false) };
            let p = intersect_equations(self.boundary(code).equation(), equation)
                .ok_or(RasterError::DegenerateIntersection(line))?;
            trace!(
                "clip: moving {} (code {:04b}) to {}",
                if move_a { line.a } else { line.b },
                code,
                p
            );
            line = if move_a {
                Line::new(p, line.b)
            } else {
                Line::new(line.a, p)
            };
        }

        // Rounding can keep re-flagging a line that only grazes a corner.
        if self.contains(line.a) && self.contains(line.b) {
            Ok(Some(line))
        } else {
            debug!("clip: giving up on {} after {} steps", line, MAX_CLIP_STEPS);
            Ok(None)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
