use crate::error::{RenderError, Result};
use crate::graphics::Color;
use crate::layout::LayoutContext;
use crate::style::{StyleSpec, TextAlign, TextOptions};
use crate::surface::DrawingSurface;

/// One table column: header label, fixed width in points, and how cell
/// text is aligned within that width.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub label: String,
    pub width: f64,
    /// Alignment of data cells.
    pub align: TextAlign,
    /// Alignment of the header label.
    pub header_align: TextAlign,
}

impl ColumnSpec {
    /// A left-aligned column.
    pub fn new(label: impl Into<String>, width: f64) -> Self {
        ColumnSpec {
            label: label.into(),
            width,
            align: TextAlign::Left,
            header_align: TextAlign::Left,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn header_align(mut self, align: TextAlign) -> Self {
        self.header_align = align;
        self
    }
}

/// Layout and styling for a table with a repeating header.
///
/// Column widths are taken as given; nothing checks that they fit in the
/// usable width of the page.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub columns: Vec<ColumnSpec>,
    /// Height of the header band. The cursor moves this far after a header.
    pub header_height: f64,
    /// Fixed height of every data row.
    pub row_height: f64,
    /// Distance from the top of the header band to its text.
    pub header_text_inset: f64,
    /// Distance from the top of a row to its text.
    pub row_text_inset: f64,
    pub header_style: StyleSpec,
    pub row_style: StyleSpec,
    /// Solid fill behind the header band.
    pub header_fill: Option<Color>,
    /// Fill behind odd rows (counted from the first row of the table).
    pub stripe: Option<Color>,
    /// How many row heights must fit below the cursor before a row is
    /// drawn on the current page.
    pub reserve_rows: f64,
}

impl TableSpec {
    pub fn new(columns: Vec<ColumnSpec>, header_style: StyleSpec, row_style: StyleSpec) -> Self {
        TableSpec {
            columns,
            header_height: header_style.line_height(),
            row_height: row_style.line_height(),
            header_text_inset: 0.0,
            row_text_inset: 0.0,
            header_style,
            row_style,
            header_fill: None,
            stripe: None,
            reserve_rows: 1.0,
        }
    }

    /// Total width of all columns, which is also the width of header and
    /// stripe fills.
    pub fn total_width(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Vertical room a row needs before it may be drawn on this page.
    pub fn break_height(&self) -> f64 {
        self.row_height * self.reserve_rows
    }

    /// Left edge of each column, starting at `left`.
    fn column_offsets(&self, left: f64) -> Vec<f64> {
        self.columns
            .iter()
            .scan(left, |x, col| {
                let start = *x;
                *x += col.width;
                Some(start)
            })
            .collect()
    }
}

/// What a finished table did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub rows: usize,
    /// Pages started by the table itself (not counting the one it began on).
    pub page_breaks: usize,
    pub header_draws: usize,
}

/// The two things a table draws.
enum Band<'a> {
    Header,
    Row { index: usize, cells: &'a [String] },
}

impl Band<'_> {
    fn draw<S: DrawingSurface>(&self, ctx: &mut LayoutContext<S>, spec: &TableSpec) -> Result<()> {
        let left = ctx.geometry().margins().left;
        let top = ctx.cursor_y();
        let offsets = spec.column_offsets(left);

        match self {
            Band::Header => {
                if let Some(fill) = spec.header_fill {
                    ctx.surface_mut()
                        .fill_rect(left, top, spec.total_width(), spec.header_height, fill)?;
                }
                for (col, x) in spec.columns.iter().zip(&offsets) {
                    let opts = TextOptions::boxed(spec.header_style, col.width, col.header_align);
                    ctx.surface_mut()
                        .draw_text(&col.label, *x, top + spec.header_text_inset, &opts)?;
                }
                ctx.advance(spec.header_height);
            }
            Band::Row { index, cells } => {
                if let Some(stripe) = spec.stripe.filter(|_| index % 2 == 1) {
                    ctx.surface_mut()
                        .fill_rect(left, top, spec.total_width(), spec.row_height, stripe)?;
                }
                for ((col, x), text) in spec.columns.iter().zip(&offsets).zip(cells.iter()) {
                    let opts = TextOptions::boxed(spec.row_style, col.width, col.align);
                    ctx.surface_mut()
                        .draw_text(text, *x, top + spec.row_text_inset, &opts)?;
                }
                ctx.advance(spec.row_height);
            }
        }
        Ok(())
    }
}

/// Draw a table at the cursor: the header, then every row, breaking pages
/// as rows run out of room and repeating the header on each new page.
///
/// Every row must have one cell per column. A mismatch is reported before
/// anything is drawn.
pub fn render_table<S: DrawingSurface>(
    ctx: &mut LayoutContext<S>,
    spec: &TableSpec,
    rows: &[Vec<String>],
) -> Result<TableStats> {
    let expected = spec.columns.len();
    if let Some((row, cells)) = rows.iter().enumerate().find(|(_, cells)| cells.len() != expected) {
        return Err(RenderError::ArityMismatch {
            row,
            expected,
            found: cells.len(),
        });
    }

    let mut stats = TableStats::default();
    // The header never sits alone at the bottom of a page.
    let opening = if rows.is_empty() {
        spec.header_height
    } else {
        spec.header_height + spec.break_height()
    };
    if ctx.ensure_room(opening)? {
        stats.page_breaks += 1;
    }
    Band::Header.draw(ctx, spec)?;
    stats.header_draws += 1;

    for (index, cells) in rows.iter().enumerate() {
        if ctx.ensure_room(spec.break_height())? {
            stats.page_breaks += 1;
            Band::Header.draw(ctx, spec)?;
            stats.header_draws += 1;
        }
        Band::Row { index, cells }.draw(ctx, spec)?;
        stats.rows += 1;
    }

    log::debug!(
        "table: {} rows, {} page breaks",
        stats.rows,
        stats.page_breaks
    );
    Ok(stats)
}
