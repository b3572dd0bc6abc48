use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{RenderError, Result};
use crate::fonts::{winansi_code, BuiltinFont, FontMetrics, WINANSI_FALLBACK};
use crate::graphics::Color;
use crate::images::{ImageData, ImageFormat, ImageId};
use crate::objects::{ObjId, PdfObject};
use crate::style::{TextAlign, TextOptions};
use crate::surface::DrawingSurface;
use crate::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const RESOURCES_OBJ: ObjId = ObjId(3, 0);
const FIRST_FONT_OBJ_NUM: u32 = 4;

/// Buffered PDF document.
///
/// Every page stays in memory until [`end_document`](Self::end_document),
/// so earlier pages can be re-opened with `activate_page` and overlaid
/// (the footer pass does this once the page count is known). All pages
/// share one size. `end_document` consumes the document: nothing can be
/// drawn after the bytes are written.
pub struct PdfDocument<W: Write> {
    writer: W,
    width: f64,
    height: f64,
    info: Vec<(String, String)>,
    pages: Vec<PageBuilder>,
    active: Option<usize>,
    images: Vec<ImageData>,
    /// Opacities in use, in thousandths.
    opacities: BTreeSet<u16>,
    compress: bool,
}

#[derive(Default)]
struct PageBuilder {
    content_ops: Vec<u8>,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a document that writes to a file when finished.
    pub fn create<P: AsRef<Path>>(path: P, width: f64, height: f64) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), width, height))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create an empty document. No page exists until `start_new_page`.
    pub fn new(writer: W, width: f64, height: f64) -> Self {
        PdfDocument {
            writer,
            width,
            height,
            info: Vec::new(),
            pages: Vec::new(),
            active: None,
            images: Vec::new(),
            opacities: BTreeSet::new(),
            compress: false,
        }
    }

    /// Set a document info entry (e.g. "Title", "Creator").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// FlateDecode page content streams. Off by default so the output
    /// stays greppable.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Register an image, reusing an identical one already registered.
    pub fn add_image(&mut self, image: &ImageData) -> ImageId {
        if let Some(pos) = self.images.iter().position(|known| same_image(known, image)) {
            return ImageId(pos);
        }
        self.images.push(image.clone());
        ImageId(self.images.len() - 1)
    }

    fn ops(&mut self) -> Result<&mut Vec<u8>> {
        let index = self.active.ok_or(RenderError::NoActivePage)?;
        Ok(&mut self.pages[index].content_ops)
    }

    /// Flip a top-left-origin y to PDF's bottom-left origin.
    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    fn opacity_key(&mut self, opacity: f64) -> Option<u16> {
        let key = (opacity * 1000.0).round() as u16;
        if key >= 1000 {
            return None;
        }
        self.opacities.insert(key);
        Some(key)
    }

    /// Serialize every buffered page and return the inner writer.
    pub fn end_document(self) -> Result<W> {
        let mut w = PdfWriter::new(self.writer);
        w.write_header()?;

        let mut next_obj = FIRST_FONT_OBJ_NUM;
        let mut alloc = || {
            let id = ObjId(next_obj, 0);
            next_obj += 1;
            id
        };

        let mut font_refs = Vec::new();
        for font in BuiltinFont::ALL {
            let id = alloc();
            w.write_object(
                id,
                &PdfObject::dict(vec![
                    ("Type", PdfObject::name("Font")),
                    ("Subtype", PdfObject::name("Type1")),
                    ("BaseFont", PdfObject::name(font.pdf_base_name())),
                    ("Encoding", PdfObject::name("WinAnsiEncoding")),
                ]),
            )?;
            font_refs.push((font.pdf_name().to_string(), PdfObject::Reference(id)));
        }

        let mut gstate_refs = Vec::new();
        for key in &self.opacities {
            let id = alloc();
            let alpha = *key as f64 / 1000.0;
            w.write_object(
                id,
                &PdfObject::dict(vec![
                    ("Type", PdfObject::name("ExtGState")),
                    ("ca", PdfObject::Real(alpha)),
                    ("CA", PdfObject::Real(alpha)),
                ]),
            )?;
            gstate_refs.push((gstate_name(*key), PdfObject::Reference(id)));
        }

        let mut image_refs = Vec::new();
        for (index, image) in self.images.iter().enumerate() {
            let smask = match &image.alpha {
                Some(alpha) => {
                    let id = alloc();
                    w.write_object(
                        id,
                        &image_xobject(image.width, image.height, "DeviceGray", deflate(alpha)?, "FlateDecode", None),
                    )?;
                    Some(id)
                }
                None => None,
            };
            let (data, filter) = match image.format {
                ImageFormat::Jpeg => (image.data.clone(), "DCTDecode"),
                ImageFormat::Png => (deflate(&image.data)?, "FlateDecode"),
            };
            let id = alloc();
            w.write_object(
                id,
                &image_xobject(image.width, image.height, image.color_space.pdf_name(), data, filter, smask),
            )?;
            image_refs.push((image_name(ImageId(index)), PdfObject::Reference(id)));
        }

        let resources = PdfObject::Dictionary(vec![
            ("Font".to_string(), named_refs(font_refs)),
            ("ExtGState".to_string(), named_refs(gstate_refs)),
            ("XObject".to_string(), named_refs(image_refs)),
        ]);
        w.write_object(RESOURCES_OBJ, &resources)?;

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let content_id = alloc();
            let stream = if self.compress {
                PdfObject::stream(
                    vec![("Filter", PdfObject::name("FlateDecode"))],
                    deflate(&page.content_ops)?,
                )
            } else {
                PdfObject::stream(vec![], page.content_ops)
            };
            w.write_object(content_id, &stream)?;

            let page_id = alloc();
            w.write_object(
                page_id,
                &PdfObject::dict(vec![
                    ("Type", PdfObject::name("Page")),
                    ("Parent", PdfObject::Reference(PAGES_OBJ)),
                    ("MediaBox", PdfObject::rect(0.0, 0.0, self.width, self.height)),
                    ("Contents", PdfObject::Reference(content_id)),
                    ("Resources", PdfObject::Reference(RESOURCES_OBJ)),
                ]),
            )?;
            kids.push(PdfObject::Reference(page_id));
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = alloc();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            w.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let page_count = kids.len() as i64;
        w.write_object(
            PAGES_OBJ,
            &PdfObject::dict(vec![
                ("Type", PdfObject::name("Pages")),
                ("Kids", PdfObject::array(kids)),
                ("Count", PdfObject::Integer(page_count)),
            ]),
        )?;
        w.write_object(
            CATALOG_OBJ,
            &PdfObject::dict(vec![
                ("Type", PdfObject::name("Catalog")),
                ("Pages", PdfObject::Reference(PAGES_OBJ)),
            ]),
        )?;
        w.write_xref_and_trailer(CATALOG_OBJ, info_id)?;

        log::debug!("wrote {} pages, {} bytes", page_count, w.current_offset());
        Ok(w.into_inner())
    }
}

impl<W: Write> DrawingSurface for PdfDocument<W> {
    fn draw_text(&mut self, text: &str, x: f64, y: f64, opts: &TextOptions) -> Result<()> {
        let style = opts.style;
        let text_width = FontMetrics::measure_text(text, style.font, style.font_size);
        let offset = match (opts.width, opts.align) {
            (Some(w), TextAlign::Center) => (w - text_width) / 2.0,
            (Some(w), TextAlign::Right) => w - text_width,
            _ => 0.0,
        };
        let baseline = self.flip(y + style.font_size);
        let clip_bottom = self.flip(y + style.line_height());
        let gstate = self.opacity_key(style.clamped_opacity());

        let mut out = Vec::with_capacity(96 + text.len());
        out.extend_from_slice(b"q\n");
        if let Some(w) = opts.width {
            out.extend_from_slice(
                format!(
                    "{} {} {} {} re\nW\nn\n",
                    format_coord(x),
                    format_coord(clip_bottom),
                    format_coord(w),
                    format_coord(style.line_height()),
                )
                .as_bytes(),
            );
        }
        if let Some(key) = gstate {
            out.extend_from_slice(format!("/{} gs\n", gstate_name(key)).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "{} {} {} rg\nBT\n/{} {} Tf\n{} {} Td\n(",
                format_coord(style.color.r),
                format_coord(style.color.g),
                format_coord(style.color.b),
                style.font.pdf_name(),
                format_coord(style.font_size),
                format_coord(x + offset),
                format_coord(baseline),
            )
            .as_bytes(),
        );
        out.extend_from_slice(&encode_winansi(text));
        out.extend_from_slice(b") Tj\nET\nQ\n");

        self.ops()?.extend_from_slice(&out);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()> {
        let bottom = self.flip(y + height);
        let op = format!(
            "q\n{} {} {} rg\n{} {} {} {} re\nf\nQ\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
            format_coord(x),
            format_coord(bottom),
            format_coord(width),
            format_coord(height),
        );
        self.ops()?.extend_from_slice(op.as_bytes());
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Color) -> Result<()> {
        let op = format!(
            "q\n{} {} {} RG\n1 w\n{} {} m\n{} {} l\nS\nQ\n",
            format_coord(stroke.r),
            format_coord(stroke.g),
            format_coord(stroke.b),
            format_coord(x1),
            format_coord(self.flip(y1)),
            format_coord(x2),
            format_coord(self.flip(y2)),
        );
        self.ops()?.extend_from_slice(op.as_bytes());
        Ok(())
    }

    fn draw_image(&mut self, image: &ImageData, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        // Check first so a failed draw does not register the image.
        self.ops()?;
        let id = self.add_image(image);
        let op = format!(
            "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ\n",
            format_coord(width),
            format_coord(height),
            format_coord(x),
            format_coord(self.flip(y + height)),
            image_name(id),
        );
        self.ops()?.extend_from_slice(op.as_bytes());
        Ok(())
    }

    fn start_new_page(&mut self) -> Result<()> {
        self.pages.push(PageBuilder::default());
        self.active = Some(self.pages.len() - 1);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn activate_page(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(RenderError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.active = Some(index);
        Ok(())
    }
}

fn same_image(a: &ImageData, b: &ImageData) -> bool {
    a.width == b.width && a.height == b.height && a.format == b.format && a.data == b.data
}

fn image_xobject(
    width: u32,
    height: u32,
    color_space: &str,
    data: Vec<u8>,
    filter: &str,
    smask: Option<ObjId>,
) -> PdfObject {
    let mut dict = vec![
        ("Type", PdfObject::name("XObject")),
        ("Subtype", PdfObject::name("Image")),
        ("Width", PdfObject::Integer(width as i64)),
        ("Height", PdfObject::Integer(height as i64)),
        ("ColorSpace", PdfObject::name(color_space)),
        ("BitsPerComponent", PdfObject::Integer(8)),
        ("Filter", PdfObject::name(filter)),
    ];
    if let Some(id) = smask {
        dict.push(("SMask", PdfObject::Reference(id)));
    }
    PdfObject::stream(dict, data)
}

fn named_refs(entries: Vec<(String, PdfObject)>) -> PdfObject {
    PdfObject::Dictionary(entries)
}

fn gstate_name(key: u16) -> String {
    format!("GS{}", key)
}

fn image_name(id: ImageId) -> String {
    format!("Im{}", id.0)
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Encode text for a WinAnsi literal string. Characters the encoding
/// lacks become `?`.
fn encode_winansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = winansi_code(ch).unwrap_or(WINANSI_FALLBACK);
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}

/// Format a coordinate for content streams.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
