//! PDF output through `pdf-writer`.
//!
//! One A4 page using the three builtin Helvetica faces with WinAnsi encoding,
//! so no font program is embedded. Layout coordinates (mm, top-left origin)
//! are converted to PDF user space (pt, bottom-left origin) here and nowhere
//! else.

use pdf_writer::{Content, Filter, Name, Pdf, Rect as PdfRect, Ref, Str};

use crate::error::{ReportError, Result};
use crate::report::draw::{DrawCommand, FontStyle, TextStyle};
use crate::report::layout::geometry::{Point, Rect};
use crate::report::layout::{HelveticaMetrics, PageGeometry, Rgb, TextMeasure};
use crate::report::sink::DrawSink;

pub const MM_TO_PT: f64 = 72.0 / 25.4;

/// Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

const BORDER_WIDTH_PT: f32 = 0.5;
const RULE_WIDTH_PT: f32 = 0.5;

const FONTS: [(FontStyle, &[u8], &[u8]); 3] = [
    (FontStyle::Normal, b"F1", b"Helvetica"),
    (FontStyle::Bold, b"F2", b"Helvetica-Bold"),
    (FontStyle::Italic, b"F3", b"Helvetica-Oblique"),
];

struct PendingImage {
    name: String,
    jpeg: Vec<u8>,
    width_px: i32,
    height_px: i32,
}

pub struct PdfSink {
    page: Option<PageGeometry>,
    content: Content,
    images: Vec<PendingImage>,
    metrics: HelveticaMetrics,
}

impl Default for PdfSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSink {
    pub fn new() -> Self {
        Self {
            page: None,
            content: Content::new(),
            images: Vec::new(),
            metrics: HelveticaMetrics,
        }
    }

    fn reset(&mut self) {
        self.page = None;
        self.content = Content::new();
        self.images.clear();
    }

    fn page(&self) -> Result<PageGeometry> {
        self.page
            .ok_or_else(|| ReportError::render("draw called before begin_page"))
    }

    fn x(v: f64) -> f32 {
        (v * MM_TO_PT) as f32
    }

    /// Flip a top-origin y into PDF space.
    fn y(page: &PageGeometry, v: f64) -> f32 {
        ((page.height - v) * MM_TO_PT) as f32
    }

    fn set_fill(&mut self, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.content.set_fill_rgb(r, g, b);
    }

    fn set_stroke(&mut self, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.content.set_stroke_rgb(r, g, b);
    }

    fn draw_rect(
        &mut self,
        page: &PageGeometry,
        rect: &Rect,
        fill: Rgb,
        border: Option<Rgb>,
        corner_radius: f64,
    ) -> Result<()> {
        check_rect(rect)?;
        let x = Self::x(rect.x);
        let y = Self::y(page, rect.bottom());
        let w = Self::x(rect.width);
        let h = Self::x(rect.height);

        self.set_fill(fill);
        if let Some(color) = border {
            self.set_stroke(color);
            self.content.set_line_width(BORDER_WIDTH_PT);
        }

        let radius = Self::x(corner_radius).min(w / 2.0).min(h / 2.0);
        if radius > 0.0 {
            rounded_rect_path(&mut self.content, x, y, w, h, radius);
        } else {
            self.content.rect(x, y, w, h);
        }

        if border.is_some() {
            self.content.fill_nonzero_and_stroke();
        } else {
            self.content.fill_nonzero();
        }
        Ok(())
    }

    fn draw_line(&mut self, page: &PageGeometry, from: &Point, to: &Point, color: Rgb) -> Result<()> {
        check_finite(&[from.x, from.y, to.x, to.y])?;
        self.set_stroke(color);
        self.content.set_line_width(RULE_WIDTH_PT);
        self.content
            .move_to(Self::x(from.x), Self::y(page, from.y))
            .line_to(Self::x(to.x), Self::y(page, to.y))
            .stroke();
        Ok(())
    }

    fn draw_text(
        &mut self,
        page: &PageGeometry,
        lines: &[String],
        origin: &Point,
        style: &TextStyle,
        line_height: f64,
    ) -> Result<()> {
        check_finite(&[origin.x, origin.y, line_height, style.size_pt])?;
        // Encode everything first so a bad line leaves no half-written text object
        let encoded = lines
            .iter()
            .map(|line| encode_win_ansi(line))
            .collect::<Result<Vec<_>>>()?;

        self.set_fill(style.color);
        let font = font_resource(style.font);
        let x = Self::x(origin.x);

        self.content.begin_text();
        self.content.set_font(Name(font), style.size_pt as f32);
        for (i, bytes) in encoded.iter().enumerate() {
            let baseline = origin.y + i as f64 * line_height;
            self.content
                .set_text_matrix([1.0, 0.0, 0.0, 1.0, x, Self::y(page, baseline)])
                .show(Str(bytes));
        }
        self.content.end_text();
        Ok(())
    }

    fn draw_image(
        &mut self,
        page: &PageGeometry,
        rect: &Rect,
        width_px: u32,
        height_px: u32,
        jpeg: &[u8],
    ) -> Result<()> {
        check_rect(rect)?;
        if width_px == 0 || height_px == 0 || jpeg.is_empty() {
            return Err(ReportError::render("image has no pixel data"));
        }
        let (width_px, height_px) = match (i32::try_from(width_px), i32::try_from(height_px)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(ReportError::render(format!(
                    "image dimensions {}x{} exceed the PDF integer range",
                    width_px, height_px
                )))
            }
        };

        let name = format!("Im{}", self.images.len() + 1);
        self.content.save_state();
        self.content.transform([
            Self::x(rect.width),
            0.0,
            0.0,
            Self::x(rect.height),
            Self::x(rect.x),
            Self::y(page, rect.bottom()),
        ]);
        self.content.x_object(Name(name.as_bytes()));
        self.content.restore_state();

        self.images.push(PendingImage {
            name,
            jpeg: jpeg.to_vec(),
            width_px,
            height_px,
        });
        Ok(())
    }
}

impl DrawSink for PdfSink {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn measure(&self) -> &dyn TextMeasure {
        &self.metrics
    }

    /// Starts a fresh single-page document, discarding anything left over
    /// from a render that failed before `finish`.
    fn begin_page(&mut self, page: &PageGeometry) -> Result<()> {
        self.reset();
        self.page = Some(*page);
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        let page = self.page()?;
        let drawn = match command {
            DrawCommand::FilledRect {
                rect,
                fill,
                border,
                corner_radius,
            } => self.draw_rect(&page, rect, *fill, *border, *corner_radius),
            DrawCommand::Line { from, to, color } => self.draw_line(&page, from, to, *color),
            DrawCommand::Text {
                lines,
                origin,
                style,
                line_height,
            } => self.draw_text(&page, lines, origin, style, *line_height),
            DrawCommand::Image {
                rect,
                width_px,
                height_px,
                jpeg,
            } => self.draw_image(&page, rect, *width_px, *height_px, jpeg),
        };
        if drawn.is_err() {
            self.reset();
        }
        drawn
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let page = self
            .page
            .take()
            .ok_or_else(|| ReportError::render("finish called without a page"))?;
        let content = std::mem::replace(&mut self.content, Content::new());
        let images = std::mem::take(&mut self.images);

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let font_ids: Vec<Ref> = (0..FONTS.len() as i32).map(|i| Ref::new(5 + i)).collect();
        let first_image = 5 + FONTS.len() as i32;
        let image_ids: Vec<Ref> = (0..images.len() as i32)
            .map(|i| Ref::new(first_image + i))
            .collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        {
            let mut pdf_page = pdf.page(page_id);
            pdf_page.media_box(PdfRect::new(
                0.0,
                0.0,
                Self::x(page.width),
                Self::x(page.height),
            ));
            pdf_page.parent(page_tree_id);
            pdf_page.contents(content_id);

            let mut resources = pdf_page.resources();
            {
                let mut fonts = resources.fonts();
                for ((_, resource, _), id) in FONTS.iter().zip(&font_ids) {
                    fonts.pair(Name(*resource), *id);
                }
            }
            if !images.is_empty() {
                let mut x_objects = resources.x_objects();
                for (image, id) in images.iter().zip(&image_ids) {
                    x_objects.pair(Name(image.name.as_bytes()), *id);
                }
            }
        }

        for ((_, _, base_font), id) in FONTS.iter().zip(&font_ids) {
            pdf.type1_font(*id)
                .base_font(Name(*base_font))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for (image, id) in images.iter().zip(&image_ids) {
            let mut xobj = pdf.image_xobject(*id, &image.jpeg);
            xobj.filter(Filter::DctDecode);
            xobj.width(image.width_px);
            xobj.height(image.height_px);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }

        pdf.stream(content_id, &content.finish());

        let bytes = pdf.finish();
        tracing::debug!("PDF written: {} bytes, {} image(s)", bytes.len(), images.len());
        Ok(bytes)
    }
}

fn font_resource(font: FontStyle) -> &'static [u8] {
    FONTS
        .iter()
        .find(|(style, _, _)| *style == font)
        .map(|(_, resource, _)| *resource)
        .unwrap_or(b"F1")
}

fn check_finite(values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ReportError::render("non-finite coordinate in draw command"))
    }
}

fn check_rect(rect: &Rect) -> Result<()> {
    check_finite(&[rect.x, rect.y, rect.width, rect.height])?;
    if rect.width < 0.0 || rect.height < 0.0 {
        return Err(ReportError::render(format!(
            "negative rectangle size {}x{}",
            rect.width, rect.height
        )));
    }
    Ok(())
}

/// Closed path for a rectangle with quarter-circle corners; `(x, y)` is the
/// bottom-left corner in PDF space.
fn rounded_rect_path(content: &mut Content, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let k = r * KAPPA;
    let (right, top) = (x + w, y + h);
    content
        .move_to(x + r, y)
        .line_to(right - r, y)
        .cubic_to(right - r + k, y, right, y + r - k, right, y + r)
        .line_to(right, top - r)
        .cubic_to(right, top - r + k, right - r + k, top, right - r, top)
        .line_to(x + r, top)
        .cubic_to(x + r - k, top, x, top - r + k, x, top - r)
        .line_to(x, y + r)
        .cubic_to(x, y + r - k, x + r - k, y, x + r, y)
        .close_path();
}

/// Encode text for the builtin fonts. Characters outside WinAnsi are a
/// render failure rather than silently dropped.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|ch| {
            win_ansi_byte(ch).ok_or_else(|| {
                ReportError::render(format!(
                    "character {:?} (U+{:04X}) cannot be encoded in WinAnsi",
                    ch, ch as u32
                ))
            })
        })
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::color::{BODY, PANEL, RULE};

    fn sink_with_page() -> PdfSink {
        let mut sink = PdfSink::new();
        sink.begin_page(&PageGeometry::a4()).unwrap();
        sink
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Rice 96%").unwrap(), b"Rice 96%".to_vec());
        assert_eq!(encode_win_ansi("café").unwrap(), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2022}").unwrap(), vec![0x95]);
    }

    #[test]
    fn test_non_win_ansi_text_is_a_render_failure() {
        let mut sink = sink_with_page();
        let style = TextStyle::new(FontStyle::Normal, 10.0, BODY);
        let err = sink
            .draw(&DrawCommand::label("धान का रोग", 20.0, 50.0, style))
            .unwrap_err();
        assert!(matches!(err, ReportError::RenderFailure(_)));
    }

    #[test]
    fn test_minimal_document() {
        let mut sink = sink_with_page();
        sink.draw(&DrawCommand::FilledRect {
            rect: Rect::new(20.0, 60.0, 170.0, 35.0),
            fill: PANEL,
            border: Some(RULE),
            corner_radius: 3.0,
        })
        .unwrap();
        sink.draw(&DrawCommand::label(
            "Crop Analysis Report",
            20.0,
            30.0,
            TextStyle::new(FontStyle::Bold, 26.0, BODY),
        ))
        .unwrap();

        let bytes = sink.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn test_image_is_embedded_as_dct_xobject() {
        let mut sink = sink_with_page();
        sink.draw(&DrawCommand::Image {
            rect: Rect::new(150.0, 64.0, 36.0, 27.0),
            width_px: 4,
            height_px: 3,
            jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
        })
        .unwrap();

        let bytes = sink.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/DCTDecode"));
        assert!(text.contains("/Im1"));
    }

    #[test]
    fn test_oversized_image_dimensions_fail() {
        let mut sink = sink_with_page();
        let err = sink
            .draw(&DrawCommand::Image {
                rect: Rect::new(150.0, 64.0, 36.0, 27.0),
                width_px: u32::MAX,
                height_px: 3,
                jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
            })
            .unwrap_err();
        assert!(matches!(err, ReportError::RenderFailure(_)));
    }

    #[test]
    fn test_sink_is_reusable_after_failed_draw() {
        let mut sink = sink_with_page();
        let style = TextStyle::new(FontStyle::Normal, 10.0, BODY);
        assert!(sink.draw(&DrawCommand::label("\u{4E2D}", 20.0, 50.0, style)).is_err());

        // The failed document is dropped; the next one starts clean
        sink.begin_page(&PageGeometry::a4()).unwrap();
        sink.draw(&DrawCommand::label("Rice", 20.0, 50.0, style)).unwrap();
        let bytes = sink.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(!String::from_utf8_lossy(&bytes).contains("/Im1"));
    }

    #[test]
    fn test_begin_page_discards_unfinished_document() {
        let mut sink = sink_with_page();
        sink.draw(&DrawCommand::Image {
            rect: Rect::new(150.0, 64.0, 36.0, 27.0),
            width_px: 4,
            height_px: 3,
            jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
        })
        .unwrap();

        sink.begin_page(&PageGeometry::a4()).unwrap();
        let bytes = sink.finish().unwrap();
        assert!(!String::from_utf8_lossy(&bytes).contains("/DCTDecode"));
    }

    #[test]
    fn test_draw_before_page_fails() {
        let mut sink = PdfSink::new();
        assert!(sink
            .draw(&DrawCommand::line(0.0, 0.0, 10.0, 0.0, RULE))
            .is_err());
    }
}
