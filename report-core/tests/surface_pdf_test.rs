use report_core::fonts::BuiltinFont;
use report_core::{Color, DrawingSurface, PdfDocument, RenderError, StyleSpec, TextAlign, TextOptions};

/// Check whether a byte pattern exists in the buffer.
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

fn make_doc() -> PdfDocument<Vec<u8>> {
    PdfDocument::new(Vec::new(), 612.0, 792.0)
}

fn plain(size: f64) -> TextOptions {
    TextOptions::new(StyleSpec::new(BuiltinFont::Helvetica, size, Color::black(), 1.0))
}

// -------------------------------------------------------
// Document structure
// -------------------------------------------------------

#[test]
fn empty_page_document_is_well_formed() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.starts_with("%PDF-1.7"));
    assert!(output.contains("/Type /Catalog"));
    assert!(output.contains("/Count 1"));
    assert!(output.contains("/MediaBox [0.0 0.0 612.0 792.0]"));
    assert!(output.trim_end().ends_with("%%EOF"));
}

#[test]
fn info_entries_are_written() {
    let mut doc = make_doc();
    doc.set_info("Title", "Quarterly (draft)").set_info("Creator", "report-core");
    doc.start_new_page().unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/Title (Quarterly \\(draft\\))"));
    assert!(output.contains("/Creator (report-core)"));
    assert!(output.contains("/Info"));
}

#[test]
fn every_page_shares_one_resource_dictionary() {
    let mut doc = make_doc();
    for _ in 0..3 {
        doc.start_new_page().unwrap();
    }
    let bytes = doc.end_document().unwrap();
    assert_eq!(count(&bytes, b"/Resources 3 0 R"), 3);
    assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
    assert!(contains(&bytes, b"/Encoding /WinAnsiEncoding"));
}

// -------------------------------------------------------
// Drawing
// -------------------------------------------------------

#[test]
fn text_is_placed_from_top_left_origin() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    // Top of the text at y=40 puts the baseline one font size lower.
    doc.draw_text("Hello", 40.0, 40.0, &plain(12.0)).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"/F1 12 Tf\n40 740 Td\n(Hello) Tj"));
}

#[test]
fn bold_text_uses_second_font() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    let style = StyleSpec::new(BuiltinFont::HelveticaBold, 18.0, Color::black(), 1.0);
    doc.draw_text("ID", 40.0, 40.0, &TextOptions::new(style)).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"/F2 18 Tf"));
}

#[test]
fn right_aligned_text_ends_at_box_edge() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    let style = StyleSpec::new(BuiltinFont::Helvetica, 10.0, Color::black(), 1.0);
    // "0" is 556 units wide in Helvetica: 5.56 pt at size 10.
    doc.draw_text("0", 100.0, 100.0, &TextOptions::boxed(style, 100.0, TextAlign::Right))
        .unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"194.44 682 Td"));
    // Boxed text is clipped to its box.
    assert!(contains(&bytes, b"100 680 100 12 re\nW\nn\n"));
}

#[test]
fn euro_and_latin1_are_encoded_and_measured_as_winansi() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    let style = StyleSpec::new(BuiltinFont::Helvetica, 10.0, Color::black(), 1.0);
    // '€' and 'é' are both 556 units wide, like "0".
    doc.draw_text("€", 100.0, 100.0, &TextOptions::boxed(style, 100.0, TextAlign::Right))
        .unwrap();
    doc.draw_text("é", 100.0, 200.0, &TextOptions::boxed(style, 100.0, TextAlign::Right))
        .unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"194.44 682 Td\n(\x80) Tj"));
    assert!(contains(&bytes, b"194.44 582 Td\n(\xe9) Tj"));
}

#[test]
fn translucent_text_gets_an_ext_gstate() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    let style = StyleSpec::new(BuiltinFont::Helvetica, 10.0, Color::black(), 0.6);
    doc.draw_text("faded", 40.0, 40.0, &TextOptions::new(style)).unwrap();
    doc.draw_text("again", 40.0, 60.0, &TextOptions::new(style)).unwrap();
    let bytes = doc.end_document().unwrap();
    assert_eq!(count(&bytes, b"/GS600 gs"), 2);
    assert_eq!(count(&bytes, b"/Type /ExtGState"), 1);
    assert!(contains(&bytes, b"/ca 0.6"));
}

#[test]
fn fill_rect_is_flipped_to_pdf_space() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    doc.fill_rect(40.0, 100.0, 500.0, 25.0, Color::gray(0.2)).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"0.2 0.2 0.2 rg\n40 667 500 25 re\nf"));
}

#[test]
fn line_is_stroked_with_its_color() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    doc.draw_line(355.0, 200.0, 555.0, 200.0, Color::black()).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"0 0 0 RG\n1 w\n355 592 m\n555 592 l\nS"));
}

// -------------------------------------------------------
// Page buffer
// -------------------------------------------------------

#[test]
fn drawing_before_any_page_fails() {
    let mut doc = make_doc();
    let err = doc.draw_text("x", 0.0, 0.0, &plain(10.0)).unwrap_err();
    assert!(matches!(err, RenderError::NoActivePage));
}

#[test]
fn activate_page_out_of_range_fails() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    let err = doc.activate_page(1).unwrap_err();
    assert!(matches!(err, RenderError::PageOutOfRange { index: 1, count: 1 }));
}

#[test]
fn reactivated_page_keeps_earlier_content() {
    let mut doc = make_doc();
    doc.start_new_page().unwrap();
    doc.draw_text("first", 40.0, 40.0, &plain(10.0)).unwrap();
    doc.start_new_page().unwrap();
    doc.draw_text("second", 40.0, 40.0, &plain(10.0)).unwrap();

    doc.activate_page(0).unwrap();
    doc.draw_text("stamp", 40.0, 700.0, &plain(10.0)).unwrap();
    assert_eq!(doc.page_count(), 2);

    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    let first = output.find("(first) Tj").unwrap();
    let stamp = output.find("(stamp) Tj").unwrap();
    let second = output.find("(second) Tj").unwrap();
    // Page 0's stream is written before page 1's.
    assert!(first < stamp && stamp < second);
}

#[test]
fn compressed_content_hides_operators() {
    let mut doc = make_doc();
    doc.set_compression(true);
    doc.start_new_page().unwrap();
    doc.draw_text("Compressed", 40.0, 40.0, &plain(10.0)).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"/Filter /FlateDecode"));
    assert!(!contains(&bytes, b"(Compressed) Tj"));
}
