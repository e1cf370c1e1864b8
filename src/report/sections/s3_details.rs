//! S3: Analysis details table
//!
//! Fixed four-row key/value table with alternating row fills and a rule at
//! the top of every row plus one under the last.

use crate::error::Result;
use crate::report::draw::{DrawCommand, FontStyle, TextStyle};
use crate::report::layout::color::{BODY, HEADING, PANEL, RULE};
use crate::report::layout::cursor::LayoutCursor;
use crate::report::layout::geometry::Rect;
use crate::report::sections::{ReportContext, PANEL_HEADING};
use crate::report::utils::format_percent;

pub const ROW_HEIGHT: f64 = 10.0;
const CELL_PADDING: f64 = 5.0;
/// Baseline offset from the row top.
const BASELINE_OFFSET: f64 = 7.0;
/// Space under the "Analysis Details" heading.
const TITLE_ADVANCE: f64 = 15.0;
/// Space after the closing rule.
const TABLE_ADVANCE: f64 = 20.0;

const KEY_STYLE: TextStyle = TextStyle::new(FontStyle::Bold, 11.0, HEADING);
const VALUE_STYLE: TextStyle = TextStyle::new(FontStyle::Normal, 11.0, BODY);

/// Qualitative band for a confidence percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisQuality {
    Good,
    Moderate,
    Fair,
}

impl AnalysisQuality {
    /// `> 80` Good, `> 60` Moderate, anything else Fair.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 80.0 {
            AnalysisQuality::Good
        } else if confidence > 60.0 {
            AnalysisQuality::Moderate
        } else {
            AnalysisQuality::Fair
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisQuality::Good => "Good",
            AnalysisQuality::Moderate => "Moderate",
            AnalysisQuality::Fair => "Fair",
        }
    }
}

/// The four `(key, value)` rows, in display order.
pub fn table_rows(ctx: &ReportContext<'_>) -> [(&'static str, String); 4] {
    let confidence = ctx.result.confidence_percent;
    [
        ("Crop Type", ctx.crop.display_name()),
        ("Status", ctx.status_text().to_string()),
        ("Confidence", format_percent(confidence)),
        (
            "Analysis Quality",
            AnalysisQuality::from_confidence(confidence).label().to_string(),
        ),
    ]
}

pub fn render(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    let page = *cursor.page();
    let left = page.margin;
    let right = page.margin + page.content_width();
    let value_x = left + page.content_width() / 2.0 + CELL_PADDING;
    let mut out = Vec::new();

    out.push(DrawCommand::label("Analysis Details", left, cursor.y(), PANEL_HEADING));
    cursor.advance(TITLE_ADVANCE);

    for (index, (key, value)) in table_rows(ctx).into_iter().enumerate() {
        let top = cursor.advance(ROW_HEIGHT);

        if index % 2 == 0 {
            out.push(DrawCommand::fill(
                Rect::new(left, top, page.content_width(), ROW_HEIGHT),
                PANEL,
            ));
        }
        out.push(DrawCommand::line(left, top, right, top, RULE));
        out.push(DrawCommand::label(key, left + CELL_PADDING, top + BASELINE_OFFSET, KEY_STYLE));
        out.push(DrawCommand::label(value, value_x, top + BASELINE_OFFSET, VALUE_STYLE));
    }

    let bottom = cursor.y();
    out.push(DrawCommand::line(left, bottom, right, bottom, RULE));
    cursor.advance(TABLE_ADVANCE);

    Ok(out)
}
