//! S5: Treatment and prevention
//!
//! Two independent columns side by side. Each column draws its own heading
//! and numbered list from the shared top; the cursor lands below whichever
//! column ran longer. Skipped for healthy results.

use crate::error::Result;
use crate::report::draw::DrawCommand;
use crate::report::layout::cursor::{Column, LayoutCursor};
use crate::report::sections::{write_numbered_entries, ReportContext, HEADING_GAP, SECTION_HEADING};
use crate::report::types::DiseaseField;

pub const TREATMENT_HEADING: &str = "Treatment Recommendations";
pub const PREVENTION_HEADING: &str = "Prevention Measures";

/// Space after the taller column.
const SECTION_ADVANCE: f64 = 10.0;

fn write_column(
    out: &mut Vec<DrawCommand>,
    column: &Column<'_>,
    heading: &str,
    items: &[String],
) -> f64 {
    out.push(DrawCommand::label(heading, column.x, column.top, SECTION_HEADING));
    write_numbered_entries(out, column, items, 0, column.top + HEADING_GAP)
}

pub fn render(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    if ctx.result.is_healthy {
        return Ok(Vec::new());
    }

    let treatment = ctx.list(DiseaseField::Treatment)?;
    let prevention = ctx.list(DiseaseField::Prevention)?;
    let mut out = Vec::new();

    let end = cursor.two_column(
        &mut out,
        |col, out| Ok(write_column(out, col, TREATMENT_HEADING, &treatment)),
        |col, out| Ok(write_column(out, col, PREVENTION_HEADING, &prevention)),
    )?;
    tracing::debug!(
        "Care plan: {} treatment / {} prevention entries, ends at y={:.1}",
        treatment.len(),
        prevention.len(),
        end
    );
    cursor.advance(SECTION_ADVANCE);

    Ok(out)
}
