use std::io;

use crate::error::{RenderError, Result};
use crate::graphics::Color;
use crate::images::ImageData;
use crate::style::TextOptions;
use crate::surface::DrawingSurface;

/// One primitive recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Text {
        text: String,
        x: f64,
        y: f64,
        opts: TextOptions,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Color,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// In-memory surface that records every draw per page.
///
/// Lets pagination be run dry (how many pages, what lands where) without
/// producing PDF bytes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pages: Vec<Vec<DrawCall>>,
    active: Option<usize>,
    fail_after: Option<usize>,
    draws: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose draw calls start failing after `draws` successes.
    pub fn failing_after(draws: usize) -> Self {
        RecordingSurface {
            fail_after: Some(draws),
            ..Self::default()
        }
    }

    pub fn pages(&self) -> &[Vec<DrawCall>] {
        &self.pages
    }

    pub fn calls_on(&self, page: usize) -> &[DrawCall] {
        self.pages.get(page).map_or(&[], |calls| calls.as_slice())
    }

    /// Text strings drawn on a page, in draw order.
    pub fn texts_on(&self, page: usize) -> Vec<&str> {
        self.calls_on(page)
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of rectangle fills on a page.
    pub fn fills_on(&self, page: usize) -> usize {
        self.calls_on(page)
            .iter()
            .filter(|call| matches!(call, DrawCall::FillRect { .. }))
            .count()
    }

    fn record(&mut self, call: DrawCall) -> Result<()> {
        if self.fail_after.is_some_and(|limit| self.draws >= limit) {
            return Err(RenderError::Io(io::Error::new(
                io::ErrorKind::Other,
                "recording surface failure",
            )));
        }
        let index = self.active.ok_or(RenderError::NoActivePage)?;
        self.pages[index].push(call);
        self.draws += 1;
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_text(&mut self, text: &str, x: f64, y: f64, opts: &TextOptions) -> Result<()> {
        self.record(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            opts: *opts,
        })
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()> {
        self.record(DrawCall::FillRect {
            x,
            y,
            width,
            height,
            color,
        })
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Color) -> Result<()> {
        self.record(DrawCall::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        })
    }

    fn draw_image(&mut self, _image: &ImageData, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        self.record(DrawCall::Image {
            x,
            y,
            width,
            height,
        })
    }

    fn start_new_page(&mut self) -> Result<()> {
        self.pages.push(Vec::new());
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
