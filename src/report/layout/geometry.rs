//! Page geometry and primitive shapes. All units are millimetres with the
//! origin at the top-left corner of the page, y growing downwards.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A4 portrait.
pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;
pub const DEFAULT_MARGIN_MM: f64 = 20.0;

/// Horizontal gap between the two columns of a column pair.
pub const COLUMN_GAP_MM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH_MM,
            height: A4_HEIGHT_MM,
            margin: DEFAULT_MARGIN_MM,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }

    /// Lowest y any flowing content may reach.
    pub fn bottom_limit(&self) -> f64 {
        self.height - self.margin
    }

    pub fn column_width(&self) -> f64 {
        (self.content_width() - COLUMN_GAP_MM) / 2.0
    }

    pub fn left_column_x(&self) -> f64 {
        self.margin
    }

    pub fn right_column_x(&self) -> f64 {
        self.margin + self.column_width() + COLUMN_GAP_MM
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_a4_columns() {
        let page = PageGeometry::a4();
        assert_relative_eq!(page.content_width(), 170.0);
        assert_relative_eq!(page.column_width(), 80.0);
        assert_relative_eq!(page.right_column_x(), 110.0);
        assert_relative_eq!(page.bottom_limit(), 277.0);
    }
}
