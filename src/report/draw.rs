//! Draw commands: the immutable display list each section returns.
//!
//! Sections never touch a drawing surface. They emit commands in paint order
//! and a single `DrawSink` consumes them afterwards.

use serde::Serialize;

use crate::report::layout::color::Rgb;
use crate::report::layout::geometry::{Point, Rect};

/// Builtin Helvetica faces used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size_pt: f64,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: FontStyle, size_pt: f64, color: Rgb) -> Self {
        Self { font, size_pt, color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Filled rectangle, optionally stroked and with rounded corners.
    FilledRect {
        rect: Rect,
        fill: Rgb,
        border: Option<Rgb>,
        corner_radius: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
    },
    /// Lines of text; `origin.y` is the first baseline, each following
    /// baseline sits `line_height` lower.
    Text {
        lines: Vec<String>,
        origin: Point,
        style: TextStyle,
        line_height: f64,
    },
    /// JPEG image scaled into `rect`.
    Image {
        rect: Rect,
        width_px: u32,
        height_px: u32,
        #[serde(skip)]
        jpeg: Vec<u8>,
    },
}

impl DrawCommand {
    pub fn fill(rect: Rect, fill: Rgb) -> Self {
        DrawCommand::FilledRect {
            rect,
            fill,
            border: None,
            corner_radius: 0.0,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb) -> Self {
        DrawCommand::Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            color,
        }
    }

    /// Single line of text with its baseline at `(x, y)`.
    pub fn label(text: impl Into<String>, x: f64, y: f64, style: TextStyle) -> Self {
        DrawCommand::Text {
            lines: vec![text.into()],
            origin: Point::new(x, y),
            style,
            line_height: 0.0,
        }
    }

    /// All text carried by this command, one entry per line.
    pub fn text_lines(&self) -> &[String] {
        match self {
            DrawCommand::Text { lines, .. } => lines,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_kind_tag() {
        let cmd = DrawCommand::line(0.0, 1.0, 2.0, 1.0, Rgb::new(1, 2, 3));
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["color"]["g"], 2);
    }

    #[test]
    fn test_image_bytes_are_not_serialized() {
        let cmd = DrawCommand::Image {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            width_px: 4,
            height_px: 4,
            jpeg: vec![0xFF, 0xD8],
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["kind"], "image");
        assert!(json.get("jpeg").is_none());
    }
}
