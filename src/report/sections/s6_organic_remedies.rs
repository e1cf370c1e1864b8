//! S6: Organic remedies and regional note
//!
//! The remedies list is split into two halves laid out side by side, with
//! numbering continuing from the left half into the right. The regional note
//! follows as its own slot so a missing remedies list leaves this section
//! empty while the note still prints.

use crate::error::Result;
use crate::report::draw::{DrawCommand, FontStyle, TextStyle};
use crate::report::layout::color::MUTED;
use crate::report::layout::cursor::LayoutCursor;
use crate::report::sections::{write_numbered_entries, ReportContext, HEADING_GAP, SECTION_HEADING};
use crate::report::types::DiseaseField;

pub const ORGANIC_HEADING: &str = "Recommended Organic Solutions";
pub const REGIONAL_NOTE: &str =
    "Note: These recommendations may vary based on your region and specific conditions.";

const NOTE_STYLE: TextStyle = TextStyle::new(FontStyle::Italic, 8.0, MUTED);
const SECTION_ADVANCE: f64 = 5.0;

/// Split `n` remedies into `(left, right)` counts; the left half takes the
/// extra entry when `n` is odd.
pub fn split_remedies(n: usize) -> (usize, usize) {
    let left = n.div_ceil(2);
    (left, n - left)
}

pub fn render(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    if ctx.result.is_healthy {
        return Ok(Vec::new());
    }

    let remedies = ctx.list(DiseaseField::OrganicPesticides)?;
    if remedies.is_empty() {
        return Ok(Vec::new());
    }

    let page = *cursor.page();
    let mut out = Vec::new();
    out.push(DrawCommand::label(ORGANIC_HEADING, page.margin, cursor.y(), SECTION_HEADING));
    cursor.advance(HEADING_GAP);

    let (split, _) = split_remedies(remedies.len());
    let (left, right) = cursor.column_pair();
    let left_end = write_numbered_entries(&mut out, &left, &remedies[..split], 0, left.top);
    let right_end = write_numbered_entries(&mut out, &right, &remedies[split..], split, right.top);

    cursor.move_to(left_end.max(right_end));
    cursor.advance(SECTION_ADVANCE);

    Ok(out)
}

pub fn render_note(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    if ctx.result.is_healthy {
        return Ok(Vec::new());
    }
    let x = cursor.page().margin;
    Ok(vec![DrawCommand::label(REGIONAL_NOTE, x, cursor.y(), NOTE_STYLE)])
}
