/// User roster example: a long table that repeats its header on every page.
///
/// Lays the report out twice: once on a `RecordingSurface` to preview the
/// page count, then straight into a PDF file.
///
/// Run with:
///   cargo run --example generate_user_report -p report-demos [-- <user count>]
///
/// Opens output at: output/user-report.pdf
use report_core::report::layout_user_report;
use report_core::sample::sample_users;
use report_core::{DrawingSurface, PdfDocument, RecordingSurface, RenderOptions};

fn main() {
    env_logger::init();

    let count = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1001);
    let users = sample_users(count);
    let options = RenderOptions::user_report();

    let preview = layout_user_report(RecordingSurface::new(), &options, &users).expect("dry run");
    println!("{} users will take {} pages", count, preview.page_count());

    std::fs::create_dir_all("output").unwrap();
    let path = "output/user-report.pdf";
    let geometry = options.geometry().unwrap();
    let mut doc = PdfDocument::create(path, geometry.width(), geometry.height()).expect("create PDF");
    doc.set_info("Title", "User Report");
    doc.set_info("Creator", "report-demos generate_user_report example");
    doc.set_compression(true);

    let doc = layout_user_report(doc, &options, &users).expect("layout");
    let pages = doc.page_count();
    assert_eq!(pages, preview.page_count(), "dry run and PDF disagree on page count");
    doc.end_document().expect("write PDF");

    log::info!("wrote {} pages", pages);
    println!("Written: {}", path);
}
