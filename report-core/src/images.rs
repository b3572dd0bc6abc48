use crate::error::{RenderError, Result};

/// Opaque handle to an image registered with a `PdfDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// PDF color space of the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// Decoded image ready to embed as an XObject.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub color_space: ColorSpace,
    /// Raw 8-bit samples for PNG, the untouched file for JPEG (DCTDecode).
    pub data: Vec<u8>,
    /// Separate 8-bit alpha channel, embedded as an SMask.
    pub alpha: Option<Vec<u8>>,
}

/// Identify the format from magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    match data {
        [0xFF, 0xD8, ..] => Ok(ImageFormat::Jpeg),
        [0x89, b'P', b'N', b'G', ..] => Ok(ImageFormat::Png),
        _ if data.len() < 4 => Err(RenderError::Image(
            "image data too short to detect format".to_string(),
        )),
        _ => Err(RenderError::Image(
            "unsupported image format (expected JPEG or PNG)".to_string(),
        )),
    }
}

/// Decode raw file bytes (PNG or JPEG).
pub fn load_image(data: Vec<u8>) -> Result<ImageData> {
    match detect_format(&data)? {
        ImageFormat::Jpeg => parse_jpeg(data),
        ImageFormat::Png => parse_png(&data),
    }
}

fn parse_jpeg(data: Vec<u8>) -> Result<ImageData> {
    let (width, height, components) = jpeg_dimensions(&data)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => {
            return Err(RenderError::Image(format!(
                "unsupported JPEG component count {}",
                n
            )))
        }
    };
    Ok(ImageData {
        width,
        height,
        format: ImageFormat::Jpeg,
        color_space,
        data,
        alpha: None,
    })
}

/// Walk JPEG segments until a SOF0..SOF3 marker yields (width, height, components).
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8)> {
    let mut i = 2;
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        match marker {
            0xC0..=0xC3 => {
                if i + 9 >= data.len() {
                    break;
                }
                let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
                let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
                return Ok((width, height, data[i + 9]));
            }
            0xFF | 0x00 => i += 1,
            0xD0..=0xD9 => i += 2,
            _ => {
                let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                i += 2 + seg_len;
            }
        }
    }
    Err(RenderError::Image("no SOF marker in JPEG data".to_string()))
}

fn parse_png(data: &[u8]) -> Result<ImageData> {
    let mut decoder = png::Decoder::new(data);
    // Palette and 16-bit images come out as plain 8-bit gray/RGB(A).
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::Image(format!("PNG decode error: {}", e)))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::Image(format!("PNG frame error: {}", e)))?;
    buf.truncate(info.buffer_size());

    let (color_space, data, alpha) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, buf, None),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, buf, None),
        png::ColorType::Rgba => {
            let (rgb, alpha) = split_alpha(&buf, 4);
            (ColorSpace::DeviceRGB, rgb, Some(alpha))
        }
        png::ColorType::GrayscaleAlpha => {
            let (gray, alpha) = split_alpha(&buf, 2);
            (ColorSpace::DeviceGray, gray, Some(alpha))
        }
        other => {
            return Err(RenderError::Image(format!(
                "unsupported PNG color type {:?}",
                other
            )))
        }
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        format: ImageFormat::Png,
        color_space,
        data,
        alpha,
    })
}

/// Split interleaved samples whose last channel is alpha.
fn split_alpha(buf: &[u8], channels: usize) -> (Vec<u8>, Vec<u8>) {
    let pixels = buf.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for px in buf.chunks_exact(channels) {
        color.extend_from_slice(&px[..channels - 1]);
        alpha.push(px[channels - 1]);
    }
    (color, alpha)
}
