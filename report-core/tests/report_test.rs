use report_core::report::{layout_invoice, layout_user_report};
use report_core::sample::{sample_invoice, sample_users};
use report_core::{render_invoice, render_user_report, DrawingSurface, RecordingSurface, RenderOptions};

/// Check whether a byte pattern exists in the buffer.
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 2x2 RGBA PNG, half transparent.
fn logo_png() -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 2, 2);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let pixels: [u8; 16] = [
            0, 0, 255, 255, 0, 0, 255, 128, //
            0, 0, 255, 128, 0, 0, 255, 0,
        ];
        writer.write_image_data(&pixels).unwrap();
    }
    out
}

// -------------------------------------------------------
// User roster
// -------------------------------------------------------

#[test]
fn default_roster_spans_thirty_pages() {
    init_logging();
    let report = render_user_report(&RenderOptions::user_report(), &sample_users(1001)).unwrap();
    // 34 rows per page: 1001 rows need 30 pages.
    assert_eq!(report.pages, 30);
    assert!(contains(&report.bytes, b"/Count 30"));
    assert!(contains(&report.bytes, b"(Page 1) Tj"));
    assert!(contains(&report.bytes, b"(Page 30) Tj"));
    assert!(!contains(&report.bytes, b"(Page 31) Tj"));
    assert!(contains(&report.bytes, b"(user1001@example.com) Tj"));
}

#[test]
fn empty_roster_is_one_page_with_header() {
    let report = render_user_report(&RenderOptions::user_report(), &[]).unwrap();
    assert_eq!(report.pages, 1);
    assert!(contains(&report.bytes, b"(Email) Tj"));
    assert!(contains(&report.bytes, b"(Page 1) Tj"));
}

#[test]
fn page_label_is_red_and_translucent() {
    let report = render_user_report(&RenderOptions::user_report(), &sample_users(3)).unwrap();
    assert!(contains(&report.bytes, b"/GS900 gs\n0.7843 0.0824 0.0824 rg"));
}

#[test]
fn compression_shrinks_the_roster() {
    let users = sample_users(200);
    let plain = render_user_report(&RenderOptions::user_report(), &users).unwrap();
    let mut options = RenderOptions::user_report();
    options.compress = true;
    let packed = render_user_report(&options, &users).unwrap();
    assert_eq!(plain.pages, packed.pages);
    assert!(packed.bytes.len() < plain.bytes.len());
}

// -------------------------------------------------------
// Invoice
// -------------------------------------------------------

#[test]
fn default_invoice_has_totals_and_page_of_total_footer() {
    init_logging();
    let invoice = sample_invoice(150);
    let report = render_invoice(&RenderOptions::invoice(), &invoice, None).unwrap();
    assert_eq!(report.pages, 5);
    assert!(contains(&report.bytes, b"(INVOICE) Tj"));
    assert!(contains(&report.bytes, b"(Bill To:) Tj"));
    assert!(contains(&report.bytes, b"(Subtotal:) Tj"));
    assert!(contains(&report.bytes, b"($103125.00) Tj"));
    assert!(contains(&report.bytes, b"(-$5156.25) Tj"));
    assert!(contains(&report.bytes, b"(Tax \\(10%\\):) Tj"));
    assert!(contains(&report.bytes, b"(Page 5 of 5) Tj"));
    assert!(contains(&report.bytes, b"/Title (Invoice INV-001)"));
}

#[test]
fn invoice_header_repeats_on_every_page() {
    let surface = layout_invoice(
        RecordingSurface::new(),
        &RenderOptions::invoice(),
        &sample_invoice(150),
        None,
    )
    .unwrap();
    for page in 0..surface.page_count() {
        let texts = surface.texts_on(page);
        assert!(texts.contains(&"Description"), "page {} lacks header", page);
        assert!(texts.contains(&"Unit Price"), "page {} lacks header", page);
    }
}

#[test]
fn logo_is_embedded_with_soft_mask() {
    let logo = logo_png();
    let report = render_invoice(&RenderOptions::invoice(), &sample_invoice(5), Some(logo.as_slice())).unwrap();
    assert!(contains(&report.bytes, b"/Subtype /Image"));
    assert!(contains(&report.bytes, b"/SMask"));
    assert!(contains(&report.bytes, b"/Im0 Do"));
    assert!(contains(&report.bytes, b"50 0 0 50 40 751.89 cm"));
}

#[test]
fn undecodable_logo_is_skipped() {
    init_logging();
    let garbage = b"<html>not an image</html>".to_vec();
    let report = render_invoice(&RenderOptions::invoice(), &sample_invoice(5), Some(garbage.as_slice())).unwrap();
    assert!(!contains(&report.bytes, b"/Subtype /Image"));
    assert!(contains(&report.bytes, b"(INVOICE) Tj"));
}

#[test]
fn dry_run_matches_rendered_page_count() {
    let users = sample_users(250);
    let dry = layout_user_report(RecordingSurface::new(), &RenderOptions::user_report(), &users).unwrap();
    let real = render_user_report(&RenderOptions::user_report(), &users).unwrap();
    assert_eq!(dry.page_count(), real.pages);
}
