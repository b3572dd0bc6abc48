use crate::error::Result;
use crate::geometry::PageGeometry;
use crate::surface::DrawingSurface;

/// True when a block of `block_height` starting at `cursor_y` would cross
/// `usable_height`. A block that lands exactly on it still fits.
///
/// This is checked before each block is drawn, never during one, so a block
/// taller than a page is not split and draws past the floor.
pub fn needs_new_page(cursor_y: f64, block_height: f64, usable_height: f64) -> bool {
    cursor_y + block_height > usable_height
}

/// Layout state for one document: the surface being drawn on, the fixed
/// page geometry, and the vertical cursor.
///
/// The cursor only moves through the methods here. Surfaces never touch it.
pub struct LayoutContext<S: DrawingSurface> {
    surface: S,
    geometry: PageGeometry,
    cursor_y: f64,
}

impl<S: DrawingSurface> LayoutContext<S> {
    /// Take ownership of `surface`, open the first page, and put the
    /// cursor at the top margin.
    pub fn begin(mut surface: S, geometry: PageGeometry) -> Result<Self> {
        surface.start_new_page()?;
        Ok(LayoutContext {
            surface,
            cursor_y: geometry.margins().top,
            geometry,
        })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    pub fn set_cursor_y(&mut self, y: f64) {
        self.cursor_y = y;
    }

    pub fn advance(&mut self, dy: f64) {
        self.cursor_y += dy;
    }

    /// Move the cursor back up by `dy`, so the next draw shares a line
    /// with the previous one.
    pub fn rewind(&mut self, dy: f64) {
        self.cursor_y -= dy;
    }

    /// Whether a block of `height` fits below the cursor on this page.
    pub fn needs_new_page(&self, height: f64) -> bool {
        needs_new_page(self.cursor_y, height, self.geometry.usable_height())
    }

    /// Append a page, make it active, and reset the cursor to the top margin.
    pub fn start_new_page(&mut self) -> Result<()> {
        self.surface.start_new_page()?;
        self.cursor_y = self.geometry.margins().top;
        log::debug!("page break: now on page {}", self.surface.page_count());
        Ok(())
    }

    /// Break the page when `height` does not fit. Returns whether a page
    /// was started.
    pub fn ensure_room(&mut self, height: f64) -> Result<bool> {
        if self.needs_new_page(height) {
            self.start_new_page()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Give the surface back once layout is finished.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
