//! Report Section Renderers
//!
//! Each section reads the shared `ReportContext`, asks the `LayoutCursor` for
//! its position, and returns the draw commands it wants painted. Sections run
//! strictly in `SECTIONS` order; each one sees the cursor where the previous
//! one left it.
//!
//! ## Sections
//! 1. Header band - gradient, title, brand and date
//! 2. Summary card - disease label or healthy sentinel
//! 3. Detail table - crop, status, confidence, analysis quality
//! 4. Description - diseased results only
//! 5. Treatment / prevention columns - diseased results only
//! 6. Organic remedies - diseased results with remedies only
//!    (followed by the regional note, diseased results only)
//! 7. Footer - anchored to the page bottom

pub mod s1_header;
pub mod s2_summary;
pub mod s3_details;
pub mod s4_description;
pub mod s5_care_plan;
pub mod s6_organic_remedies;
pub mod s7_footer;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::draw::{DrawCommand, FontStyle, TextStyle};
use crate::report::layout::color::{BODY, HEADING};
use crate::report::layout::cursor::{write_block, Column, LayoutCursor};
use crate::report::resolver::TextResolver;
use crate::report::types::{CropLabel, DiagnosisResult, DiseaseField};
use crate::report::utils::numbered;

// ============================================================================
// Shared styles
// ============================================================================

pub const SECTION_HEADING: TextStyle = TextStyle::new(FontStyle::Bold, 14.0, HEADING);
pub const PANEL_HEADING: TextStyle = TextStyle::new(FontStyle::Bold, 16.0, HEADING);
pub const BODY_TEXT: TextStyle = TextStyle::new(FontStyle::Normal, 10.0, BODY);

/// Baseline-to-baseline distance for body text.
pub const BODY_LINE_HEIGHT: f64 = 5.0;
/// Space under a section heading before its body starts.
pub const HEADING_GAP: f64 = 8.0;
/// Extra space after each numbered entry.
pub const ENTRY_GAP: f64 = 3.0;
/// Numbered entries wrap this much narrower than their column.
pub const ENTRY_INSET: f64 = 5.0;

/// Healthy-state text used wherever a disease label would go.
pub const HEALTHY_SENTINEL: &str = "No Disease Detected";

// ============================================================================
// Context
// ============================================================================

/// Read-only inputs shared by every section of one report.
pub struct ReportContext<'a> {
    pub result: &'a DiagnosisResult,
    pub crop: CropLabel,
    pub resolver: &'a TextResolver,
    pub config: &'a ReportConfig,
    pub generated_on: NaiveDate,
}

impl ReportContext<'_> {
    pub fn text(&self, field: DiseaseField) -> Result<String> {
        self.resolver.resolve_text(self.crop, self.result, field)
    }

    pub fn list(&self, field: DiseaseField) -> Result<Vec<String>> {
        self.resolver.resolve_list(self.crop, self.result, field)
    }

    /// Disease label, or the healthy sentinel.
    pub fn status_text(&self) -> &str {
        if self.result.is_healthy {
            HEALTHY_SENTINEL
        } else {
            &self.result.disease_label
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Header,
    Summary,
    Details,
    Description,
    CarePlan,
    OrganicRemedies,
    Note,
    Footer,
}

impl SectionId {
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Header => "Header",
            SectionId::Summary => "Summary",
            SectionId::Details => "Analysis Details",
            SectionId::Description => "Description",
            SectionId::CarePlan => "Treatment and Prevention",
            SectionId::OrganicRemedies => "Organic Remedies",
            SectionId::Note => "Regional Note",
            SectionId::Footer => "Footer",
        }
    }
}

pub type RenderFn = fn(&ReportContext<'_>, &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>>;

/// Paint order of the whole document.
pub const SECTIONS: [(SectionId, RenderFn); 8] = [
    (SectionId::Header, s1_header::render),
    (SectionId::Summary, s2_summary::render),
    (SectionId::Details, s3_details::render),
    (SectionId::Description, s4_description::render),
    (SectionId::CarePlan, s5_care_plan::render),
    (SectionId::OrganicRemedies, s6_organic_remedies::render),
    (SectionId::Note, s6_organic_remedies::render_note),
    (SectionId::Footer, s7_footer::render),
];

/// Commands one section emitted. Empty for skipped sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub id: SectionId,
    pub commands: Vec<DrawCommand>,
}

impl RenderedSection {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every text line in this section, in paint order.
    pub fn text(&self) -> Vec<&str> {
        self.commands
            .iter()
            .flat_map(|cmd| cmd.text_lines().iter().map(String::as_str))
            .collect()
    }
}

// ============================================================================
// Shared writers
// ============================================================================

/// Write `items` as a numbered list down `column`, starting at `y`.
/// Numbering starts at `first_index + 1`. Returns the y below the last entry.
pub fn write_numbered_entries(
    out: &mut Vec<DrawCommand>,
    column: &Column<'_>,
    items: &[String],
    first_index: usize,
    y: f64,
) -> f64 {
    items.iter().enumerate().fold(y, |y, (offset, item)| {
        let entry = numbered(first_index + offset, item);
        let lines = column.wrap(&entry, column.width - ENTRY_INSET, &BODY_TEXT);
        write_block(out, lines, column.x, y, BODY_TEXT, BODY_LINE_HEIGHT) + ENTRY_GAP
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::{HelveticaMetrics, PageGeometry};
    use approx::assert_relative_eq;

    #[test]
    fn test_section_order_is_fixed() {
        let order: Vec<SectionId> = SECTIONS.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            order,
            vec![
                SectionId::Header,
                SectionId::Summary,
                SectionId::Details,
                SectionId::Description,
                SectionId::CarePlan,
                SectionId::OrganicRemedies,
                SectionId::Note,
                SectionId::Footer,
            ]
        );
    }

    #[test]
    fn test_numbered_entries_advance_per_entry() {
        let metrics = HelveticaMetrics;
        let cursor = LayoutCursor::new(PageGeometry::a4(), &metrics);
        let (left, _) = cursor.column_pair();
        let mut out = Vec::new();

        let items = vec!["short".to_string(), "also short".to_string()];
        let end = write_numbered_entries(&mut out, &left, &items, 0, 100.0);

        // Two one-line entries: 2 * (5 + 3)
        assert_relative_eq!(end, 116.0);
        assert_eq!(out[0].text_lines(), ["1. short".to_string()]);
        assert_eq!(out[1].text_lines(), ["2. also short".to_string()]);
    }

    #[test]
    fn test_numbering_continues_from_offset() {
        let metrics = HelveticaMetrics;
        let cursor = LayoutCursor::new(PageGeometry::a4(), &metrics);
        let (_, right) = cursor.column_pair();
        let mut out = Vec::new();

        write_numbered_entries(&mut out, &right, &["x".to_string()], 3, 50.0);
        assert_eq!(out[0].text_lines(), ["4. x".to_string()]);
    }
}
