//! S1: Header band
//!
//! Vertical gradient across the top of the page, painted one 1mm scanline at
//! a time, with the report title on the left and brand/date on the right.

use crate::error::Result;
use crate::report::draw::{DrawCommand, FontStyle, TextStyle};
use crate::report::layout::color::{vertical_gradient, BRAND_GREEN, HEADER_BOTTOM, HEADER_TOP, TITLE_GREEN};
use crate::report::layout::cursor::LayoutCursor;
use crate::report::layout::geometry::Rect;
use crate::report::sections::ReportContext;

/// Height of the gradient band in millimetres (one scanline per millimetre).
pub const HEADER_HEIGHT: usize = 40;

pub const REPORT_TITLE: &str = "Crop Analysis Report";

const TITLE_STYLE: TextStyle = TextStyle::new(FontStyle::Bold, 26.0, TITLE_GREEN);
const BRAND_STYLE: TextStyle = TextStyle::new(FontStyle::Normal, 10.0, BRAND_GREEN);

/// Brand block sits this far left of the right margin.
const BRAND_BLOCK_WIDTH: f64 = 60.0;

pub fn render(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    let page = *cursor.page();
    let mut out = Vec::with_capacity(HEADER_HEIGHT + 3);

    for (i, color) in vertical_gradient(HEADER_TOP, HEADER_BOTTOM, HEADER_HEIGHT)
        .into_iter()
        .enumerate()
    {
        out.push(DrawCommand::fill(Rect::new(0.0, i as f64, page.width, 1.0), color));
    }

    let top = cursor.y();
    out.push(DrawCommand::label(REPORT_TITLE, page.margin, top + 10.0, TITLE_STYLE));

    let brand_x = page.width - page.margin - BRAND_BLOCK_WIDTH;
    out.push(DrawCommand::label(
        format!("Generated by {}", ctx.config.brand),
        brand_x,
        top,
        BRAND_STYLE,
    ));
    out.push(DrawCommand::label(
        format!("Date: {}", ctx.generated_on.format("%-m/%-d/%Y")),
        brand_x,
        top + 7.0,
        BRAND_STYLE,
    ));

    cursor.move_to(HEADER_HEIGHT as f64 + page.margin);
    Ok(out)
}
