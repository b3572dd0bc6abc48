use crate::error::{RenderError, Result};

/// Named paper sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Portrait (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(margin: f64) -> Self {
        Margins {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

/// Fixed page dimensions and margins for one document.
///
/// All coordinates handed to layout code use a top-left origin with y
/// growing downward; the PDF backend flips them when it writes content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    width: f64,
    height: f64,
    margins: Margins,
}

impl PageGeometry {
    /// Build geometry from explicit dimensions. Fails when the margins
    /// leave no room for content on either axis.
    pub fn new(width: f64, height: f64, margins: Margins) -> Result<Self> {
        let sides = [margins.top, margins.right, margins.bottom, margins.left];
        if sides.iter().any(|m| *m < 0.0 || !m.is_finite()) {
            return Err(RenderError::InvalidGeometry(format!(
                "margins must be finite and non-negative: {:?}",
                margins
            )));
        }
        if width <= margins.left + margins.right {
            return Err(RenderError::InvalidGeometry(format!(
                "width {} leaves no content area between margins {} and {}",
                width, margins.left, margins.right
            )));
        }
        if height <= margins.top + margins.bottom {
            return Err(RenderError::InvalidGeometry(format!(
                "height {} leaves no content area between margins {} and {}",
                height, margins.top, margins.bottom
            )));
        }
        Ok(PageGeometry {
            width,
            height,
            margins,
        })
    }

    /// Geometry for a named size and orientation with one margin on all sides.
    pub fn from_size(size: PageSize, orientation: Orientation, margin: f64) -> Result<Self> {
        let (w, h) = size.dimensions();
        let (width, height) = match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        };
        Self::new(width, height, Margins::uniform(margin))
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    /// Content height: page height minus top and bottom margins.
    ///
    /// The overflow check compares the absolute cursor against this value,
    /// so it doubles as the printable floor.
    pub fn usable_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Content width: page width minus left and right margins.
    pub fn usable_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }
}
