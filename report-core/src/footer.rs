use crate::error::Result;
use crate::geometry::PageGeometry;
use crate::style::{StyleSpec, TextAlign, TextOptions};
use crate::surface::DrawingSurface;

/// Wording of the page label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterFormat {
    /// "Page 3"
    #[default]
    PageOnly,
    /// "Page 3 of 12"
    PageOfTotal,
}

impl FooterFormat {
    /// Label for the 1-based page `number` out of `total`.
    pub fn label(&self, number: usize, total: usize) -> String {
        match self {
            FooterFormat::PageOnly => format!("Page {}", number),
            FooterFormat::PageOfTotal => format!("Page {} of {}", number, total),
        }
    }
}

/// Stamp a page label on every buffered page.
///
/// Must run after all body content, since the total is only known then.
/// Each page is re-activated in turn and gets one centered label spanning
/// the usable width, with its top at `height - bottom margin - top margin`.
/// No page is added. Returns the number of pages stamped.
pub fn stamp_page_numbers<S: DrawingSurface>(
    surface: &mut S,
    geometry: &PageGeometry,
    format: FooterFormat,
    style: StyleSpec,
) -> Result<usize> {
    let total = surface.page_count();
    let margins = geometry.margins();
    let y = geometry.height() - margins.bottom - margins.top;
    let opts = TextOptions::boxed(style, geometry.usable_width(), TextAlign::Center);

    for index in 0..total {
        surface.activate_page(index)?;
        surface.draw_text(&format.label(index + 1, total), margins.left, y, &opts)?;
    }
    debug_assert_eq!(surface.page_count(), total);

    log::debug!("stamped page labels on {} pages", total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Margins, PageSize, Orientation};
    use crate::recording::{DrawCall, RecordingSurface};

    #[test]
    fn labels() {
        assert_eq!(FooterFormat::PageOnly.label(2, 9), "Page 2");
        assert_eq!(FooterFormat::PageOfTotal.label(2, 9), "Page 2 of 9");
    }

    #[test]
    fn one_label_per_page_and_no_new_pages() {
        let geometry = PageGeometry::new(200.0, 300.0, Margins::uniform(20.0)).unwrap();
        let mut surface = RecordingSurface::new();
        for _ in 0..3 {
            surface.start_new_page().unwrap();
        }

        let stamped =
            stamp_page_numbers(&mut surface, &geometry, FooterFormat::PageOfTotal, StyleSpec::default())
                .unwrap();
        assert_eq!(stamped, 3);
        assert_eq!(surface.page_count(), 3);
        for page in 0..3 {
            assert_eq!(surface.texts_on(page), vec![format!("Page {} of 3", page + 1)]);
        }
    }

    #[test]
    fn label_is_centered_across_usable_width() {
        let geometry = PageGeometry::from_size(PageSize::A4, Orientation::Portrait, 40.0).unwrap();
        let mut surface = RecordingSurface::new();
        surface.start_new_page().unwrap();
        stamp_page_numbers(&mut surface, &geometry, FooterFormat::PageOnly, StyleSpec::default()).unwrap();

        match &surface.calls_on(0)[0] {
            DrawCall::Text { x, y, opts, .. } => {
                assert_eq!(*x, 40.0);
                assert!((*y - 761.89).abs() < 1e-9);
                assert_eq!(opts.align, TextAlign::Center);
                assert!((opts.width.unwrap() - 515.28).abs() < 1e-9);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn empty_buffer_stamps_nothing() {
        let geometry = PageGeometry::new(200.0, 300.0, Margins::uniform(20.0)).unwrap();
        let mut surface = RecordingSurface::new();
        let stamped =
            stamp_page_numbers(&mut surface, &geometry, FooterFormat::PageOnly, StyleSpec::default()).unwrap();
        assert_eq!(stamped, 0);
    }
}
