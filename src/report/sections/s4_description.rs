//! S4: Description
//!
//! Full-width wrapped description of the disease. Skipped for healthy results.

use crate::error::Result;
use crate::report::draw::DrawCommand;
use crate::report::layout::cursor::{write_block, LayoutCursor};
use crate::report::sections::{
    ReportContext, BODY_LINE_HEIGHT, BODY_TEXT, HEADING_GAP, SECTION_HEADING,
};
use crate::report::types::DiseaseField;

/// Space after the description body.
const SECTION_ADVANCE: f64 = 12.0;

pub fn render(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    if ctx.result.is_healthy {
        return Ok(Vec::new());
    }

    let page = *cursor.page();
    let description = ctx.text(DiseaseField::Description)?;
    let mut out = Vec::new();

    out.push(DrawCommand::label("Description", page.margin, cursor.y(), SECTION_HEADING));
    cursor.advance(HEADING_GAP);

    let lines = cursor.measure_wrap(&description, page.content_width(), &BODY_TEXT);
    let end = write_block(&mut out, lines, page.margin, cursor.y(), BODY_TEXT, BODY_LINE_HEIGHT);
    cursor.move_to(end);
    cursor.advance(SECTION_ADVANCE);

    Ok(out)
}
