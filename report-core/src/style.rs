use crate::fonts::{BuiltinFont, FontMetrics};
use crate::graphics::Color;

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Complete style for one draw call.
///
/// Every text draw carries its own `StyleSpec`; nothing is inherited from
/// the previous call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSpec {
    pub font: BuiltinFont,
    /// Font size in points.
    pub font_size: f64,
    pub color: Color,
    /// Fill opacity, 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f64,
}

impl StyleSpec {
    pub const fn new(font: BuiltinFont, font_size: f64, color: Color, opacity: f64) -> Self {
        StyleSpec {
            font,
            font_size,
            color,
            opacity,
        }
    }

    /// Vertical advance of one line in this style.
    pub fn line_height(&self) -> f64 {
        FontMetrics::line_height(self.font_size)
    }

    /// Opacity clamped to `[0, 1]`.
    pub fn clamped_opacity(&self) -> f64 {
        self.opacity.clamp(0.0, 1.0)
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        StyleSpec::new(BuiltinFont::Helvetica, 12.0, Color::black(), 1.0)
    }
}

/// Placement options for a text draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    /// Box width for alignment and clipping. `None` draws the text
    /// unconstrained from `x`.
    pub width: Option<f64>,
    pub align: TextAlign,
    pub style: StyleSpec,
}

impl TextOptions {
    pub fn new(style: StyleSpec) -> Self {
        TextOptions {
            width: None,
            align: TextAlign::Left,
            style,
        }
    }

    pub fn boxed(style: StyleSpec, width: f64, align: TextAlign) -> Self {
        TextOptions {
            width: Some(width),
            align,
            style,
        }
    }
}
