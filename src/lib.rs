//! # xpm-raster
//!
//! A minimal 2D line pipeline that turns integer line segments into XPM3
//! pixel maps.
//!
//! ## Architecture
//!
//! Lines flow through four stages:
//!
//! 1. **Transform**: translation, rotation and scaling about a pivot,
//!    applied as 3x3 homogeneous matrices ([`trans_affine`])
//! 2. **Clip**: Cohen-Sutherland against a rectangular window
//!    ([`clip_cohen_sutherland`])
//! 3. **Rasterize**: integer Bresenham onto a surface ([`line_bresenham`])
//! 4. **Serialize**: palette-indexed XPM3 text ([`raster_surface`])
//!
//! Geometry uses a right-handed Cartesian system (origin bottom-left, y up);
//! the surface stores rows top to bottom and converts in exactly one place.
//!
//! ```
//! use xpm_raster::basics::Line;
//! use xpm_raster::clip_cohen_sutherland::Window;
//! use xpm_raster::color::Color;
//! use xpm_raster::pipeline::Pipeline;
//! use xpm_raster::raster_surface::RasterSurface;
//!
//! let mut surface = RasterSurface::new(11, 11, [Color::new(0, 0, 255, "b")])?;
//! let window = Window::new(0, 0, 10, 10)?;
//! let report = Pipeline::new()
//!     .with_window(window)
//!     .render(&[Line::from_coords(-5, 5, 15, 5)], &mut surface, "b");
//! assert_eq!(report.drawn, 1);
//!
//! let xpm = surface.serialize()?;
//! assert!(xpm.starts_with(b"/* XPM */\n"));
//! # Ok::<(), xpm_raster::error::RasterError>(())
//! ```

// Foundation types
pub mod basics;
pub mod color;
pub mod error;

// Geometry stages
pub mod clip_cohen_sutherland;
pub mod trans_affine;

// Raster output
pub mod line_bresenham;
pub mod raster_surface;

// Drivers
pub mod pipeline;
pub mod script;
