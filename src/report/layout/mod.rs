//! Layout primitives: page geometry, colours, text metrics and the cursor.

pub mod color;
pub mod cursor;
pub mod geometry;
pub mod metrics;

pub use color::Rgb;
pub use cursor::{write_block, Column, LayoutCursor};
pub use geometry::{PageGeometry, Point, Rect};
pub use metrics::{HelveticaMetrics, TextMeasure};
