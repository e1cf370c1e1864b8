//! Layout Cursor
//!
//! Tracks the running vertical position while sections are laid out, and
//! provides the primitives sections build on: row advance, text wrapping,
//! block writing, and independent column pairs.
//!
//! Invariants:
//! - `y` never decreases within one document
//! - `y` never passes `page.bottom_limit()`; content that would is clamped
//!   (the report is a single page) and the overflow is remembered

use crate::error::Result;
use crate::report::draw::{DrawCommand, TextStyle};
use crate::report::layout::geometry::{PageGeometry, Point};
use crate::report::layout::metrics::TextMeasure;

pub struct LayoutCursor<'m> {
    y: f64,
    page: PageGeometry,
    measure: &'m dyn TextMeasure,
    overflowed: bool,
}

impl<'m> LayoutCursor<'m> {
    /// Cursor at the top margin of `page`.
    pub fn new(page: PageGeometry, measure: &'m dyn TextMeasure) -> Self {
        Self {
            y: page.margin,
            page,
            measure,
            overflowed: false,
        }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    pub fn measure(&self) -> &'m dyn TextMeasure {
        self.measure
    }

    /// True once any move had to be clamped at the page bottom.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// True when `y` lies below the lowest writable position.
    pub fn exceeds_bottom(&self, y: f64) -> bool {
        y > self.page.bottom_limit()
    }

    /// Room left between the cursor and the page bottom.
    pub fn remaining(&self) -> f64 {
        (self.page.bottom_limit() - self.y).max(0.0)
    }

    /// Move down by `row_height` and return the row's top (the pre-advance y).
    pub fn advance(&mut self, row_height: f64) -> f64 {
        let top = self.y;
        self.move_to(self.y + row_height);
        top
    }

    /// Jump to an absolute position. Never moves upwards, never past the bottom.
    pub fn move_to(&mut self, y: f64) {
        if y < self.y {
            return;
        }
        if self.exceeds_bottom(y) {
            if !self.overflowed {
                tracing::warn!(
                    "Report content reaches y={:.1}mm, past the page bottom at {:.1}mm; clamping",
                    y,
                    self.page.bottom_limit()
                );
            }
            self.overflowed = true;
            self.y = self.page.bottom_limit();
        } else {
            self.y = y;
        }
    }

    /// Wrap `text` to `max_width` using the surface's metrics.
    pub fn measure_wrap(&self, text: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
        self.measure.wrap(text, max_width, style.font, style.size_pt)
    }

    /// Left and right columns of the standard pair, both starting at the current y.
    pub fn column_pair(&self) -> (Column<'m>, Column<'m>) {
        let width = self.page.column_width();
        let left = Column {
            x: self.page.left_column_x(),
            width,
            top: self.y,
            measure: self.measure,
        };
        let right = Column {
            x: self.page.right_column_x(),
            ..left
        };
        (left, right)
    }

    /// Run two independent column writers from the same top, then move the
    /// cursor below the taller of the two. Returns `max(left_end, right_end)`.
    pub fn two_column<L, R>(
        &mut self,
        out: &mut Vec<DrawCommand>,
        left: L,
        right: R,
    ) -> Result<f64>
    where
        L: FnOnce(&Column<'m>, &mut Vec<DrawCommand>) -> Result<f64>,
        R: FnOnce(&Column<'m>, &mut Vec<DrawCommand>) -> Result<f64>,
    {
        let (left_column, right_column) = self.column_pair();
        let left_end = left(&left_column, out)?;
        let right_end = right(&right_column, out)?;

        let end = left_end.max(right_end);
        self.move_to(end);
        Ok(end)
    }
}

/// One column of a column pair. Column writers track their own y and never
/// touch the shared cursor.
#[derive(Clone, Copy)]
pub struct Column<'m> {
    pub x: f64,
    pub width: f64,
    /// y where the column starts.
    pub top: f64,
    measure: &'m dyn TextMeasure,
}

impl<'m> Column<'m> {
    pub fn wrap(&self, text: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
        self.measure.wrap(text, max_width, style.font, style.size_pt)
    }
}

/// Emit `lines` as one text command at `(x, y)` and return the y just below
/// the block: `y + lines.len() * line_height`. No lines, no command.
pub fn write_block(
    out: &mut Vec<DrawCommand>,
    lines: Vec<String>,
    x: f64,
    y: f64,
    style: TextStyle,
    line_height: f64,
) -> f64 {
    let end = y + lines.len() as f64 * line_height;
    if !lines.is_empty() {
        out.push(DrawCommand::Text {
            lines,
            origin: Point::new(x, y),
            style,
            line_height,
        });
    }
    end
}
