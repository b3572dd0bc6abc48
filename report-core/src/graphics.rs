/// RGB color for fills, strokes, and text.
///
/// Each component is in the range 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a color from RGB components (each 0.0–1.0).
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Create a grayscale color (r = g = b = level).
    pub const fn gray(level: f64) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }

    pub const fn black() -> Self {
        Color::gray(0.0)
    }

    pub const fn white() -> Self {
        Color::gray(1.0)
    }

    /// Create a color from a packed `0xRRGGBB` value, e.g. `Color::hex(0xC81515)`.
    pub const fn hex(rgb: u32) -> Self {
        Color {
            r: ((rgb >> 16) & 0xFF) as f64 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f64 / 255.0,
            b: (rgb & 0xFF) as f64 / 255.0,
        }
    }
}
