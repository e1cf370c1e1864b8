//! S2: Summary card
//!
//! Rounded panel with the disease label (or the healthy sentinel). When the
//! diagnosis carries its source photo, a thumbnail sits at the card's right
//! edge and the summary wraps around it.

use crate::error::Result;
use crate::report::draw::{DrawCommand, FontStyle, TextStyle};
use crate::report::layout::color::{BODY, PANEL, RULE};
use crate::report::layout::cursor::{write_block, LayoutCursor};
use crate::report::layout::geometry::Rect;
use crate::report::sections::{ReportContext, PANEL_HEADING};

pub const CARD_HEIGHT: f64 = 35.0;
pub const CARD_RADIUS: f64 = 3.0;
/// Distance from the card top to the next section.
pub const CARD_ADVANCE: f64 = 45.0;

const PADDING: f64 = 5.0;
const SUMMARY_STYLE: TextStyle = TextStyle::new(FontStyle::Normal, 11.0, BODY);
const SUMMARY_LINE_HEIGHT: f64 = 5.5;

/// Thumbnail bounds inside the card.
const THUMB_INSET: f64 = 4.0;
const THUMB_MAX_WIDTH: f64 = 40.0;

pub fn render(ctx: &ReportContext<'_>, cursor: &mut LayoutCursor<'_>) -> Result<Vec<DrawCommand>> {
    let page = *cursor.page();
    let top = cursor.y();
    let card = Rect::new(page.margin, top, page.content_width(), CARD_HEIGHT);
    let mut out = Vec::new();

    out.push(DrawCommand::FilledRect {
        rect: card,
        fill: PANEL,
        border: Some(RULE),
        corner_radius: CARD_RADIUS,
    });
    out.push(DrawCommand::label(
        "Disease Analysis",
        card.x + PADDING,
        top + 8.0,
        PANEL_HEADING,
    ));

    let mut text_width = card.width - PADDING * 2.0;
    if let Some(image) = &ctx.result.source_image {
        let thumb = thumbnail_rect(&card, image.width_px, image.height_px);
        text_width -= thumb.width + THUMB_INSET;
        out.push(DrawCommand::Image {
            rect: thumb,
            width_px: image.width_px,
            height_px: image.height_px,
            jpeg: image.jpeg.clone(),
        });
    }

    let lines = cursor.measure_wrap(ctx.status_text(), text_width, &SUMMARY_STYLE);
    write_block(
        &mut out,
        lines,
        card.x + PADDING,
        top + 18.0,
        SUMMARY_STYLE,
        SUMMARY_LINE_HEIGHT,
    );

    cursor.advance(CARD_ADVANCE);
    Ok(out)
}

/// Largest box with the photo's aspect ratio that fits the card's right edge.
fn thumbnail_rect(card: &Rect, width_px: u32, height_px: u32) -> Rect {
    let max_height = card.height - THUMB_INSET * 2.0;
    let aspect = if height_px == 0 {
        1.0
    } else {
        f64::from(width_px) / f64::from(height_px)
    };

    let (mut width, mut height) = (max_height * aspect, max_height);
    if width > THUMB_MAX_WIDTH {
        width = THUMB_MAX_WIDTH;
        height = THUMB_MAX_WIDTH / aspect;
    }

    Rect::new(
        card.x + card.width - THUMB_INSET - width,
        card.y + (card.height - height) / 2.0,
        width,
        height,
    )
}
