pub mod error;
pub mod graphics;
pub mod fonts;
pub mod geometry;
pub mod style;
pub mod images;
pub mod objects;
pub mod writer;
pub mod surface;
pub mod document;
pub mod recording;
pub mod layout;
pub mod table;
pub mod sections;
pub mod footer;
pub mod model;
pub mod sample;
pub mod report;

pub use document::PdfDocument;
pub use error::{RenderError, Result};
pub use footer::{stamp_page_numbers, FooterFormat};
pub use geometry::{Margins, Orientation, PageGeometry, PageSize};
pub use graphics::Color;
pub use layout::{needs_new_page, LayoutContext};
pub use recording::{DrawCall, RecordingSurface};
pub use report::{render_invoice, render_user_report, RenderOptions, RenderedReport};
pub use style::{StyleSpec, TextAlign, TextOptions};
pub use surface::DrawingSurface;
pub use table::{render_table, ColumnSpec, TableSpec, TableStats};
