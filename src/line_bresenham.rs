//! Integer Bresenham line rasterizer.
//!
//! Walks every cell between two Cartesian endpoints without floating point
//! and hands each one to a [`PixelTarget`]. Drawing stops at the first
//! failing cell; cells written before it are kept.

use crate::basics::{Line, Point};
use crate::error::RasterError;
use crate::raster_surface::RasterSurface;

// ============================================================================
// PixelTarget trait
// ============================================================================

/// Anything that accepts color codes at right-handed Cartesian coordinates.
pub trait PixelTarget {
    fn set_pixel_cartesian(&mut self, x: i32, y: i32, code: &str) -> Result<(), RasterError>;
}

impl PixelTarget for RasterSurface {
    #[inline]
    fn set_pixel_cartesian(&mut self, x: i32, y: i32, code: &str) -> Result<(), RasterError> {
        RasterSurface::set_pixel_cartesian(self, x, y, code)
    }
}

// ============================================================================
// LineBresenham
// ============================================================================

/// Iterator over the cells of a line, from `a` to `b` inclusive.
///
/// Error terms are kept in `i64` so that any pair of `i32` endpoints is
/// walked without overflow.
#[derive(Debug, Clone)]
pub struct LineBresenham {
    x: i32,
    y: i32,
    x_end: i32,
    y_end: i32,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    done: bool,
}

impl LineBresenham {
    pub fn new(line: &Line) -> Self {
        let dx = line.b.x as i64 - line.a.x as i64;
        let dy = line.b.y as i64 - line.a.y as i64;
        let sx = if dx < 0 { -1 } else { 1 };
        let sy = if dy < 0 { -1 } else { 1 };
        let dx = dx.abs();
        let dy = dy.abs();

        Self {
            x: line.a.x,
            y: line.a.y,
            x_end: line.b.x,
            y_end: line.b.y,
            dx,
            dy,
            sx,
            sy,
            err: dx - dy,
            done: false,
        }
    }

    /// Total number of cells on the line, counting both endpoints.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.dx.max(self.dy) as u64 + 1
    }
}

impl Iterator for LineBresenham {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let current = Point::new(self.x, self.y);
        if self.x == self.x_end && self.y == self.y_end {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }
}

// ============================================================================
// Drawing
// ============================================================================

/// Draw `line` onto `target` with color `code`.
///
/// Returns the first error reported by the target; the remaining cells are
/// not visited and the cells already written stay written.
pub fn draw_line<T: PixelTarget + ?Sized>(
    target: &mut T,
    line: &Line,
    code: &str,
) -> Result<(), RasterError> {
    for p in LineBresenham::new(line) {
        target.set_pixel_cartesian(p.x, p.y, code)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[derive(Default)]
    struct MockTarget {
        cells: Vec<(i32, i32)>,
        fail_at: Option<usize>,
    }

    impl PixelTarget for MockTarget {
        fn set_pixel_cartesian(&mut self, x: i32, y: i32, _code: &str) -> Result<(), RasterError> {
            if self.fail_at == Some(self.cells.len()) {
                return Err(RasterError::OutOfBounds {
                    x: x.into(),
                    y: y.into(),
                    width: 0,
                    height: 0,
                });
            }
            self.cells.push((x, y));
            Ok(())
        }
    }

    fn cells(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
        let mut t = MockTarget::default();
        draw_line(&mut t, &Line::from_coords(x1, y1, x2, y2), "b").unwrap();
        t.cells
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(cells(0, 0, 4, 0), [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_vertical_downward() {
        assert_eq!(cells(2, 3, 2, 0), [(2, 3), (2, 2), (2, 1), (2, 0)]);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(cells(0, 0, 3, 3), [(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_single_point() {
        assert_eq!(cells(7, -2, 7, -2), [(7, -2)]);
    }

    #[test]
    fn test_shallow_slope_one_cell_per_column() {
        let c = cells(0, 0, 10, 3);
        assert_eq!(c.len(), 11);
        for (i, &(x, _)) in c.iter().enumerate() {
            assert_eq!(x, i as i32);
        }
        assert_eq!(c.last(), Some(&(10, 3)));
        // Steps are 8-connected.
        for w in c.windows(2) {
            assert!((w[1].0 - w[0].0).abs() <= 1);
            assert!((w[1].1 - w[0].1).abs() <= 1);
        }
    }

    #[test]
    fn test_reversed_visits_same_cells_for_symmetric_lines() {
        for &(x1, y1, x2, y2) in &[(0, 0, 5, 0), (0, 0, 0, -5), (0, 0, 4, 4), (3, 0, 0, 3)] {
            let mut fwd = cells(x1, y1, x2, y2);
            let mut back = cells(x2, y2, x1, y1);
            fwd.sort_unstable();
            back.sort_unstable();
            assert_eq!(fwd, back);
        }
    }

    #[test]
    fn test_len() {
        let shallow = Line::from_coords(0, 0, 10, 3);
        assert_eq!(LineBresenham::new(&shallow).len(), 11);
        let point = Line::from_coords(0, 0, 0, 0);
        assert_eq!(LineBresenham::new(&point).len(), 1);
        let l = Line::from_coords(-3, 9, 4, -1);
        let visited = LineBresenham::new(&l).count() as u64;
        assert_eq!(LineBresenham::new(&l).len(), visited);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let l = Line::from_coords(i32::MIN, 0, i32::MAX, 0);
        let mut it = LineBresenham::new(&l);
        assert_eq!(it.next(), Some(Point::new(i32::MIN, 0)));
        assert_eq!(it.next(), Some(Point::new(i32::MIN + 1, 0)));
    }

    #[test]
    fn test_abort_without_rollback() {
        let mut t = MockTarget {
            fail_at: Some(2),
            ..Default::default()
        };
        let err = draw_line(&mut t, &Line::from_coords(0, 0, 4, 0), "b").unwrap_err();
        assert!(matches!(err, RasterError::OutOfBounds { x: 2, y: 0, .. }));
        assert_eq!(t.cells, [(0, 0), (1, 0)]);
    }

    #[test]
    fn test_draw_on_surface() {
        let mut s = RasterSurface::new(5, 2, [Color::new(0, 0, 255, "b")]).unwrap();
        draw_line(&mut s, &Line::from_coords(0, 0, 4, 0), "b").unwrap();
        // Cartesian row 0 is the bottom storage row.
        assert!(s.row(1).unwrap().all(|c| c == "b"));
        assert!(s.row(0).unwrap().all(|c| c == "~"));
    }

    #[test]
    fn test_draw_on_surface_partial_failure() {
        let mut s = RasterSurface::new(3, 1, [Color::new(0, 0, 255, "b")]).unwrap();
        let err = draw_line(&mut s, &Line::from_coords(0, 0, 5, 0), "b").unwrap_err();
        assert_eq!(
            err,
            RasterError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 1
            }
        );
        assert!(s.row(0).unwrap().all(|c| c == "b"));
    }
}
