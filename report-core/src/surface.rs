use crate::error::Result;
use crate::graphics::Color;
use crate::images::ImageData;
use crate::style::TextOptions;

/// Drawing capabilities the layout engine needs from a backend.
///
/// Coordinates are points with a top-left origin and y growing downward.
/// Implementations own a buffer of pages; draws go to the active page.
/// None of these calls move a cursor: vertical position is tracked by
/// [`LayoutContext`](crate::layout::LayoutContext).
pub trait DrawingSurface {
    /// Draw one line of text with its top edge at `y`. With a box width the
    /// text is aligned within `[x, x + width]` and clipped to it.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, opts: &TextOptions) -> Result<()>;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Color) -> Result<()>;

    /// Draw an image stretched into the given box.
    fn draw_image(&mut self, image: &ImageData, x: f64, y: f64, width: f64, height: f64) -> Result<()>;

    /// Append a blank page and make it the active drawing target.
    fn start_new_page(&mut self) -> Result<()>;

    /// Number of pages buffered so far.
    fn page_count(&self) -> usize;

    /// Make a previously started page the drawing target again. Content
    /// already on it is kept.
    fn activate_page(&mut self, index: usize) -> Result<()>;
}
