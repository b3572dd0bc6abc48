use std::io::{self, Write};

use crate::objects::{ObjId, PdfObject};

/// Low-level serializer. Writes indirect objects to any `Write` target
/// and remembers their byte offsets for the cross-reference table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref_entries: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref_entries: Vec::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// PDF 1.7 header followed by a binary comment (bytes >= 128).
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str("%PDF-1.7\n")?;
        self.write_bytes(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Write an indirect object and record its offset.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.xref_entries.push((id.0, self.offset));
        self.write_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.write_value(obj)?;
        self.write_str("\nendobj\n")
    }

    fn write_value(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => self.write_str(&n.to_string()),
            PdfObject::Real(f) => self.write_str(&format_real(*f)),
            PdfObject::Name(name) => {
                self.write_str("/")?;
                self.write_str(name)
            }
            PdfObject::LiteralString(s) => {
                self.write_str("(")?;
                self.write_str(&escape_pdf_string(s))?;
                self.write_str(")")
            }
            PdfObject::Array(items) => {
                self.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write_str(" ")?;
                    }
                    self.write_value(item)?;
                }
                self.write_str("]")
            }
            PdfObject::Dictionary(entries) => {
                self.write_str("<<")?;
                self.write_entries(entries)?;
                self.write_str(" >>")
            }
            PdfObject::Stream { dict, data } => {
                self.write_str("<<")?;
                self.write_entries(dict)?;
                self.write_str(&format!(" /Length {} >>\nstream\n", data.len()))?;
                self.write_bytes(data)?;
                self.write_str("\nendstream")
            }
            PdfObject::Reference(id) => self.write_str(&format!("{} {} R", id.0, id.1)),
        }
    }

    fn write_entries(&mut self, entries: &[(String, PdfObject)]) -> io::Result<()> {
        for (key, val) in entries {
            self.write_str(" /")?;
            self.write_str(key)?;
            self.write_str(" ")?;
            self.write_value(val)?;
        }
        Ok(())
    }

    /// Bytes written so far.
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Write the xref table, trailer, startxref, and `%%EOF`.
    pub fn write_xref_and_trailer(&mut self, root_id: ObjId, info_id: Option<ObjId>) -> io::Result<()> {
        let xref_offset = self.offset;
        self.xref_entries.sort_by_key(|&(num, _)| num);

        let size = self.xref_entries.last().map_or(0, |&(num, _)| num) + 1;

        self.write_str(&format!("xref\n0 {}\n", size))?;
        // Object 0 heads the free list; every entry is exactly 20 bytes.
        self.write_bytes(b"0000000000 65535 f\r\n")?;

        let mut entries = std::mem::take(&mut self.xref_entries).into_iter().peekable();
        for obj_num in 1..size {
            match entries.peek() {
                Some(&(num, off)) if num == obj_num => {
                    entries.next();
                    self.write_str(&format!("{:010} 00000 n\r\n", off))?;
                }
                _ => self.write_bytes(b"0000000000 00000 f\r\n")?,
            }
        }

        self.write_str(&format!("trailer\n<< /Size {} /Root {} {} R", size, root_id.0, root_id.1))?;
        if let Some(info) = info_id {
            self.write_str(&format!(" /Info {} {} R", info.0, info.1))?;
        }
        self.write_str(" >>\n")?;
        self.write_str(&format!("startxref\n{}\n%%EOF\n", xref_offset))?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape the characters that are special inside a literal string.
pub fn escape_pdf_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '(' => result.push_str("\\("),
            ')' => result.push_str("\\)"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a dictionary real: no trailing zeros, no exponent.
fn format_real(f: f64) -> String {
    if f == f.floor() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        let s = format!("{:.6}", f);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
