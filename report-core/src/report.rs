//! The two built-in reports: a paginated user roster and an invoice.
//!
//! Each report has a `layout_*` function that drives any
//! [`DrawingSurface`] through the whole document (body, then the footer
//! pass) and a `render_*` function that does the same on a [`PdfDocument`]
//! and returns the finished bytes.

use crate::document::PdfDocument;
use crate::error::Result;
use crate::fonts::BuiltinFont::{Helvetica, HelveticaBold};
use crate::footer::{stamp_page_numbers, FooterFormat};
use crate::geometry::{Orientation, PageGeometry, PageSize};
use crate::graphics::Color;
use crate::images::{load_image, ImageData};
use crate::layout::LayoutContext;
use crate::model::{format_money, Invoice, InvoiceTotals, UserRecord};
use crate::sections::{InfoHeader, PartyBlock, PartyColumn, TotalsBlock};
use crate::style::{StyleSpec, TextAlign};
use crate::surface::DrawingSurface;
use crate::table::{render_table, ColumnSpec, TableSpec};

/// Side length of the square logo drawn in the top-left corner.
pub const LOGO_SIZE: f64 = 50.0;

const PAGE_NUMBER: StyleSpec = StyleSpec::new(Helvetica, 10.0, Color::hex(0xC81515), 0.9);

const ROSTER_HEADER: StyleSpec = StyleSpec::new(HelveticaBold, 18.0, Color::black(), 0.8);
const ROSTER_ROW: StyleSpec = StyleSpec::new(Helvetica, 12.0, Color::hex(0x220F0F), 0.6);
const ROSTER_HEADER_FILL: Color = Color::hex(0xE8E8E8);

const INVOICE_TITLE: StyleSpec = StyleSpec::new(HelveticaBold, 24.0, Color::black(), 1.0);
const PARTY_LABEL: StyleSpec = StyleSpec::new(HelveticaBold, 14.0, Color::black(), 0.9);
const PARTY_NAME: StyleSpec = StyleSpec::new(HelveticaBold, 10.0, Color::black(), 0.9);
const NORMAL: StyleSpec = StyleSpec::new(Helvetica, 10.0, Color::black(), 0.8);
const ITEM_HEADER: StyleSpec = StyleSpec::new(HelveticaBold, 11.0, Color::white(), 1.0);
const TOTAL_LABEL: StyleSpec = StyleSpec::new(HelveticaBold, 11.0, Color::black(), 0.9);
const TOTAL_VALUE: StyleSpec = StyleSpec::new(Helvetica, 11.0, Color::black(), 0.8);
const GRAND_TOTAL: StyleSpec = StyleSpec::new(HelveticaBold, 14.0, Color::black(), 1.0);
const ITEM_HEADER_FILL: Color = Color::gray(0.2);
const ITEM_STRIPE: Color = Color::hex(0xF5F5F5);

/// Page setup and output options for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// Uniform margin on all four sides, in points.
    pub margin: f64,
    pub page_numbers: bool,
    pub footer: FooterFormat,
    /// Name offered to the client for the finished file.
    pub filename: String,
    /// FlateDecode page content.
    pub compress: bool,
}

impl RenderOptions {
    pub fn user_report() -> Self {
        RenderOptions {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: 40.0,
            page_numbers: true,
            footer: FooterFormat::PageOnly,
            filename: "document.pdf".to_string(),
            compress: false,
        }
    }

    pub fn invoice() -> Self {
        RenderOptions {
            footer: FooterFormat::PageOfTotal,
            filename: "invoice.pdf".to_string(),
            ..Self::user_report()
        }
    }

    pub fn geometry(&self) -> Result<PageGeometry> {
        PageGeometry::from_size(self.page_size, self.orientation, self.margin)
    }
}

/// A finished PDF.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

pub fn user_table_spec() -> TableSpec {
    let columns = vec![
        ColumnSpec::new("ID", 50.0),
        ColumnSpec::new("Name", 100.0),
        ColumnSpec::new("Email", 200.0),
        ColumnSpec::new("Role", 100.0),
        ColumnSpec::new("Created", 100.0),
    ];
    let mut spec = TableSpec::new(columns, ROSTER_HEADER, ROSTER_ROW);
    spec.header_height = 24.0;
    spec.header_text_inset = 3.0;
    spec.row_height = 20.0;
    spec.row_text_inset = 4.0;
    spec.header_fill = Some(ROSTER_HEADER_FILL);
    spec
}

pub fn invoice_table_spec() -> TableSpec {
    let columns = vec![
        ColumnSpec::new("Description", 200.0).header_align(TextAlign::Center),
        ColumnSpec::new("Qty", 100.0)
            .align(TextAlign::Center)
            .header_align(TextAlign::Center),
        ColumnSpec::new("Unit Price", 100.0)
            .align(TextAlign::Center)
            .header_align(TextAlign::Center),
        ColumnSpec::new("Amount", 100.0)
            .align(TextAlign::Center)
            .header_align(TextAlign::Center),
    ];
    let mut spec = TableSpec::new(columns, ITEM_HEADER, NORMAL);
    spec.header_height = 25.0;
    spec.header_text_inset = 5.0;
    spec.row_height = 20.0;
    spec.row_text_inset = 5.0;
    spec.header_fill = Some(ITEM_HEADER_FILL);
    spec.stripe = Some(ITEM_STRIPE);
    // Keep room for two rows so a page never ends on a lone row.
    spec.reserve_rows = 2.0;
    spec
}

fn invoice_info_header(invoice: &Invoice) -> InfoHeader {
    InfoHeader {
        title: "INVOICE".to_string(),
        lines: invoice.info_lines(),
        block_width: 200.0,
        title_style: INVOICE_TITLE,
        line_style: NORMAL,
    }
}

fn invoice_party_block(invoice: &Invoice) -> PartyBlock {
    PartyBlock {
        left: PartyColumn {
            label: "From:".to_string(),
            lines: invoice.from.lines(),
        },
        right: PartyColumn {
            label: "Bill To:".to_string(),
            lines: invoice.to.lines(),
        },
        right_offset: 20.0,
        label_style: PARTY_LABEL,
        name_style: PARTY_NAME,
        line_style: NORMAL,
    }
}

fn invoice_totals_block(totals: &InvoiceTotals) -> TotalsBlock {
    TotalsBlock {
        entries: totals.ledger(),
        grand_total: ("Total:".to_string(), format_money(totals.total)),
        block_width: 200.0,
        label_style: TOTAL_LABEL,
        value_style: TOTAL_VALUE,
        grand_total_style: GRAND_TOTAL,
        rule_color: Color::black(),
    }
}

/// Lay out the user roster on `surface` and return it, footers included.
pub fn layout_user_report<S: DrawingSurface>(
    surface: S,
    options: &RenderOptions,
    users: &[UserRecord],
) -> Result<S> {
    let geometry = options.geometry()?;
    let mut ctx = LayoutContext::begin(surface, geometry)?;

    let rows: Vec<Vec<String>> = users.iter().map(UserRecord::cells).collect();
    render_table(&mut ctx, &user_table_spec(), &rows)?;

    finish(ctx, options)
}

/// Lay out an invoice on `surface` and return it, footers included.
///
/// The logo does not move the cursor; the info header starts at the top
/// margin on the right-hand side.
pub fn layout_invoice<S: DrawingSurface>(
    surface: S,
    options: &RenderOptions,
    invoice: &Invoice,
    logo: Option<&ImageData>,
) -> Result<S> {
    let geometry = options.geometry()?;
    let mut ctx = LayoutContext::begin(surface, geometry)?;

    if let Some(logo) = logo {
        let margins = geometry.margins();
        ctx.surface_mut()
            .draw_image(logo, margins.left, margins.top, LOGO_SIZE, LOGO_SIZE)?;
    }

    invoice_info_header(invoice).render(&mut ctx)?;
    let parties = invoice_party_block(invoice);
    ctx.ensure_room(parties.height())?;
    parties.render(&mut ctx)?;

    let rows: Vec<Vec<String>> = invoice.items.iter().map(|item| item.cells()).collect();
    render_table(&mut ctx, &invoice_table_spec(), &rows)?;

    let totals = invoice_totals_block(&invoice.totals);
    ctx.ensure_room(totals.height())?;
    totals.render(&mut ctx)?;

    finish(ctx, options)
}

fn finish<S: DrawingSurface>(ctx: LayoutContext<S>, options: &RenderOptions) -> Result<S> {
    let geometry = *ctx.geometry();
    let mut surface = ctx.into_surface();
    if options.page_numbers {
        stamp_page_numbers(&mut surface, &geometry, options.footer, PAGE_NUMBER)?;
    }
    Ok(surface)
}

/// Render the user roster to PDF bytes.
pub fn render_user_report(options: &RenderOptions, users: &[UserRecord]) -> Result<RenderedReport> {
    let mut doc = new_document(options)?;
    doc.set_info("Title", "User Report");
    let doc = layout_user_report(doc, options, users)?;
    finalize(doc, options)
}

/// Render an invoice to PDF bytes.
///
/// `logo` is raw PNG or JPEG data. If it cannot be decoded the invoice is
/// rendered without it.
pub fn render_invoice(options: &RenderOptions, invoice: &Invoice, logo: Option<&[u8]>) -> Result<RenderedReport> {
    let logo = logo.and_then(|bytes| match load_image(bytes.to_vec()) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("skipping logo: {}", e);
            None
        }
    });

    let mut doc = new_document(options)?;
    doc.set_info("Title", &format!("Invoice {}", invoice.number));
    let doc = layout_invoice(doc, options, invoice, logo.as_ref())?;
    finalize(doc, options)
}

fn new_document(options: &RenderOptions) -> Result<PdfDocument<Vec<u8>>> {
    let geometry = options.geometry()?;
    let mut doc = PdfDocument::new(Vec::new(), geometry.width(), geometry.height());
    doc.set_info("Creator", "report-core").set_compression(options.compress);
    Ok(doc)
}

fn finalize(doc: PdfDocument<Vec<u8>>, options: &RenderOptions) -> Result<RenderedReport> {
    let pages = doc.page_count();
    let bytes = doc.end_document()?;
    log::info!("rendered {}: {} pages, {} bytes", options.filename, pages, bytes.len());
    Ok(RenderedReport { bytes, pages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCall, RecordingSurface};
    use crate::sample::{sample_invoice, sample_users};

    #[test]
    fn invoice_defaults_differ_only_in_footer_and_name() {
        let users = RenderOptions::user_report();
        let invoice = RenderOptions::invoice();
        assert_eq!(invoice.margin, users.margin);
        assert_eq!(invoice.footer, FooterFormat::PageOfTotal);
        assert_eq!(invoice.filename, "invoice.pdf");
        assert_eq!(users.filename, "document.pdf");
    }

    #[test]
    fn roster_fits_thirty_four_rows_per_page() {
        // Header ends at 64; rows of 20 fit while 64 + 20k + 20 <= 761.89.
        let surface =
            layout_user_report(RecordingSurface::new(), &RenderOptions::user_report(), &sample_users(34)).unwrap();
        assert_eq!(surface.page_count(), 1);

        let surface =
            layout_user_report(RecordingSurface::new(), &RenderOptions::user_report(), &sample_users(35)).unwrap();
        assert_eq!(surface.page_count(), 2);
        let second = surface.texts_on(1);
        assert_eq!(&second[..6], &["ID", "Name", "Email", "Role", "Created", "35"]);
        assert_eq!(second.last(), Some(&"Page 2"));
    }

    #[test]
    fn invoice_draws_logo_without_moving_cursor() {
        let logo = ImageData {
            width: 1,
            height: 1,
            format: crate::images::ImageFormat::Png,
            color_space: crate::images::ColorSpace::DeviceGray,
            data: vec![0],
            alpha: None,
        };
        let surface = layout_invoice(
            RecordingSurface::new(),
            &RenderOptions::invoice(),
            &sample_invoice(3),
            Some(&logo),
        )
        .unwrap();

        let calls = surface.calls_on(0);
        assert!(matches!(
            calls[0],
            DrawCall::Image { x, y, width, height } if x == 40.0 && y == 40.0 && width == 50.0 && height == 50.0
        ));
        assert!(matches!(&calls[1], DrawCall::Text { text, y, .. } if text == "INVOICE" && *y == 40.0));
    }

    #[test]
    fn invoice_sections_render_in_order() {
        let surface =
            layout_invoice(RecordingSurface::new(), &RenderOptions::invoice(), &sample_invoice(2), None).unwrap();
        let texts = surface.texts_on(0);
        let pos = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();

        assert!(pos("INVOICE") < pos("From:"));
        assert!(pos("Bill To:") < pos("Description"));
        assert!(pos("Description") < pos("Subtotal:"));
        assert!(pos("Subtotal:") < pos("Total:"));
        assert_eq!(texts.last(), Some(&"Page 1 of 1"));
        assert!(texts.contains(&"Tax (10%):"));
    }

    #[test]
    fn totals_move_to_a_new_page_when_they_do_not_fit() {
        let options = RenderOptions::invoice();
        let pages = (0..80)
            .map(|n| {
                let surface =
                    layout_invoice(RecordingSurface::new(), &options, &sample_invoice(n), None).unwrap();
                let last = surface.page_count() - 1;
                let texts = surface.texts_on(last);
                assert!(texts.contains(&"Total:"), "{} items: totals missing from last page", n);
                surface.page_count()
            })
            .collect::<Vec<_>>();
        assert!(pages.windows(2).all(|w| w[1] >= w[0]));
        assert!(*pages.last().unwrap() >= 2);
    }

    #[test]
    fn disabled_page_numbers_leave_pages_unstamped() {
        let mut options = RenderOptions::user_report();
        options.page_numbers = false;
        let surface = layout_user_report(RecordingSurface::new(), &options, &sample_users(1)).unwrap();
        assert!(!surface.texts_on(0).iter().any(|t| t.starts_with("Page")));
    }
}
