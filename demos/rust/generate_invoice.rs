/// Invoice example: info header, party block, a striped line-item table
/// with a repeating header, and a totals ledger, stamped "Page N of M".
///
/// Run with:
///   cargo run --example generate_invoice -p report-demos [-- <items> [logo.png]]
///
/// Opens output at: output/invoice.pdf
use report_core::render_invoice;
use report_core::sample::sample_invoice;
use report_core::RenderOptions;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let items = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(150);
    let logo = args.next().map(|path| std::fs::read(&path).expect("read logo"));

    let invoice = sample_invoice(items);
    let mut options = RenderOptions::invoice();
    options.compress = true;

    let report = render_invoice(&options, &invoice, logo.as_deref()).expect("render invoice");

    std::fs::create_dir_all("output").unwrap();
    let path = format!("output/{}", options.filename);
    std::fs::write(&path, &report.bytes).expect("write PDF");
    println!(
        "Written: {} ({} items, {} pages, total {})",
        path,
        items,
        report.pages,
        report_core::model::format_money(invoice.totals.total)
    );
}
