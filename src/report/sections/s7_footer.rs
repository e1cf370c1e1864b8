//! S7: Footer
//!
//! Anchored to the page bottom regardless of where the cursor stands.

use crate::error::Result;
use crate::report::draw::{DrawCommand, FontStyle, TextStyle};
use crate::report::layout::color::{MUTED, RULE};
use crate::report::layout::cursor::LayoutCursor;
use crate::report::sections::ReportContext;

const RULE_OFFSET: f64 = 12.0;
const TEXT_OFFSET: f64 = 8.0;
/// Width reserved for the page counter at the right margin.
const PAGE_LABEL_WIDTH: f64 = 20.0;

const FOOTER_STYLE: TextStyle = TextStyle::new(FontStyle::Normal, 8.0, MUTED);

pub fn render(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    let page = cursor.page();
    let rule_y = page.height - RULE_OFFSET;
    let text_y = page.height - TEXT_OFFSET;

    Ok(vec![
        DrawCommand::line(page.margin, rule_y, page.width - page.margin, rule_y, RULE),
        DrawCommand::label(
            format!("Generated by {} - Plant Disease Detection System", ctx.config.brand),
            page.margin,
            text_y,
            FOOTER_STYLE,
        ),
        DrawCommand::label(
            "Page 1 of 1",
            page.width - page.margin - PAGE_LABEL_WIDTH,
            text_y,
            FOOTER_STYLE,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::layout::{HelveticaMetrics, PageGeometry, Point};
    use crate::report::sections::test_support::*;
    use crate::report::types::CropLabel;
    use approx::assert_relative_eq;

    #[test]
    fn test_footer_is_anchored_to_page_bottom() {
        let result = healthy_rice();
        let resolver = resolver();
        let config = ReportConfig {
            brand: "Test Brand".to_string(),
            ..ReportConfig::default()
        };
        let ctx = context(&result, CropLabel::Rice, &resolver, &config);
        let metrics = HelveticaMetrics;
        let mut cursor = LayoutCursor::new(PageGeometry::a4(), &metrics);
        cursor.move_to(150.0);

        let out = render(&ctx, &mut cursor).unwrap();

        assert_eq!(
            out[0],
            DrawCommand::line(20.0, 285.0, 190.0, 285.0, RULE)
        );
        assert_eq!(
            out[1].text_lines(),
            ["Generated by Test Brand - Plant Disease Detection System".to_string()]
        );
        match &out[2] {
            DrawCommand::Text { lines, origin, .. } => {
                assert_eq!(lines, &vec!["Page 1 of 1".to_string()]);
                assert_eq!(*origin, Point::new(170.0, 289.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_relative_eq!(cursor.y(), 150.0);
    }
}
