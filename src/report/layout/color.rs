//! RGB colours, the report palette and linear interpolation for gradients.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation, rounded to the nearest integer.
    /// `t = 0` gives `from`, `t = 1` gives `to`.
    pub fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(from.r, to.r), channel(from.g, to.g), channel(from.b, to.b))
    }

    /// Components scaled to 0.0-1.0 for PDF colour operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// One colour per scanline: step `i` uses ratio `i / steps`, so the last
/// scanline stops just short of `to`.
pub fn vertical_gradient(from: Rgb, to: Rgb, steps: usize) -> Vec<Rgb> {
    (0..steps)
        .map(|i| Rgb::lerp(from, to, i as f64 / steps as f64))
        .collect()
}

// ============================================================================
// PALETTE
// ============================================================================

pub const HEADER_TOP: Rgb = Rgb::new(220, 242, 220);
pub const HEADER_BOTTOM: Rgb = Rgb::new(198, 246, 213);
pub const TITLE_GREEN: Rgb = Rgb::new(34, 97, 67);
pub const BRAND_GREEN: Rgb = Rgb::new(47, 133, 90);
pub const HEADING: Rgb = Rgb::new(31, 41, 55);
pub const BODY: Rgb = Rgb::new(75, 85, 99);
pub const MUTED: Rgb = Rgb::new(107, 114, 128);
pub const PANEL: Rgb = Rgb::new(249, 250, 251);
pub const RULE: Rgb = Rgb::new(229, 231, 235);
