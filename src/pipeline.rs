//! Batch rendering: transform → clip → rasterize.
//!
//! A [`Pipeline`] pushes a whole set of lines through the stages in order.
//! All lines are transformed before any of them is clipped or drawn. A line
//! that fails to clip or draw is recorded and skipped; the rest of the batch
//! is still processed, and whatever the failing line drew before its error
//! stays on the surface.

use log::{debug, warn};

use crate::basics::Line;
use crate::clip_cohen_sutherland::Window;
use crate::error::RasterError;
use crate::line_bresenham::{draw_line, PixelTarget};
use crate::trans_affine::TransformPipeline;

/// Outcome of [`Pipeline::render`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderReport {
    /// Lines drawn completely.
    pub drawn: usize,
    /// Lines the window discarded as invisible.
    pub clipped_away: usize,
    /// Index into the input batch and the error that stopped that line.
    pub failures: Vec<(usize, RasterError)>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub transforms: TransformPipeline,
    pub window: Option<Window>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transforms(mut self, transforms: TransformPipeline) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }

    /// Transform and clip `lines` without drawing them.
    ///
    /// Returns one entry per input line: the visible segment, `None` if it
    /// was clipped away, or the error. A line whose transformed coordinates
    /// leave `i32` fails with `CoordinateOverflow` instead of being clamped.
    pub fn prepare(&self, lines: &[Line]) -> Vec<Result<Option<Line>, RasterError>> {
        let transformed = self.transforms.apply(lines);
        transformed
            .into_iter()
            .zip(lines)
            .map(|(moved, line)| {
                let moved = moved.ok_or(RasterError::CoordinateOverflow(*line))?;
                match &self.window {
                    Some(w) => w.clip(&moved),
                    None => Ok(Some(moved)),
                }
            })
            .collect()
    }

    /// Run the whole batch onto `target` in color `code`.
    pub fn render<T: PixelTarget + ?Sized>(
        &self,
        lines: &[Line],
        target: &mut T,
        code: &str,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        for (index, prepared) in self.prepare(lines).into_iter().enumerate() {
            let result = match prepared {
                Ok(Some(line)) => draw_line(target, &line, code),
                Ok(None) => {
                    report.clipped_away += 1;
                    continue;
                }
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => report.drawn += 1,
                Err(e) => {
                    warn!("line #{} ({}): {}", index, lines[index], e);
                    report.failures.push((index, e));
                }
            }
        }

        debug!(
            "rendered {} line(s): {} drawn, {} clipped away, {} failed",
            lines.len(),
            report.drawn,
            report.clipped_away,
            report.failures.len()
        );
        report
    }
}

// ============================================================================
// Tests
// ============================================================================
