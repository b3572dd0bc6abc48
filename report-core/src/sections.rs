//! Fixed-layout invoice sections drawn around the line-item table.

use crate::error::Result;
use crate::graphics::Color;
use crate::layout::LayoutContext;
use crate::style::{StyleSpec, TextAlign, TextOptions};
use crate::surface::DrawingSurface;

/// Title plus a short list of lines, right-aligned in a block against the
/// right margin. Always starts at the top margin.
#[derive(Debug, Clone)]
pub struct InfoHeader {
    pub title: String,
    pub lines: Vec<String>,
    pub block_width: f64,
    pub title_style: StyleSpec,
    pub line_style: StyleSpec,
}

impl InfoHeader {
    pub fn render<S: DrawingSurface>(&self, ctx: &mut LayoutContext<S>) -> Result<()> {
        let geometry = *ctx.geometry();
        let x = geometry.width() - geometry.margins().right - self.block_width;
        ctx.set_cursor_y(geometry.margins().top);

        let title = TextOptions::boxed(self.title_style, self.block_width, TextAlign::Right);
        let y = ctx.cursor_y();
        ctx.surface_mut().draw_text(&self.title, x, y, &title)?;
        ctx.advance(self.title_style.line_height());

        let line = TextOptions::boxed(self.line_style, self.block_width, TextAlign::Right);
        for text in &self.lines {
            let y = ctx.cursor_y();
            ctx.surface_mut().draw_text(text, x, y, &line)?;
            ctx.advance(self.line_style.line_height());
        }
        Ok(())
    }
}

/// One side of a [`PartyBlock`]: a label such as "From:" and the lines
/// beneath it. The first line is the party name.
#[derive(Debug, Clone)]
pub struct PartyColumn {
    pub label: String,
    pub lines: Vec<String>,
}

/// Two address stacks side by side, both starting at the cursor.
#[derive(Debug, Clone)]
pub struct PartyBlock {
    pub left: PartyColumn,
    pub right: PartyColumn,
    /// Distance of the right stack from the page's horizontal center.
    pub right_offset: f64,
    pub label_style: StyleSpec,
    pub name_style: StyleSpec,
    pub line_style: StyleSpec,
}

impl PartyBlock {
    /// Vertical space the taller stack takes from the cursor.
    pub fn height(&self) -> f64 {
        self.column_height(&self.left).max(self.column_height(&self.right))
    }

    fn column_height(&self, column: &PartyColumn) -> f64 {
        let lines: f64 = (0..column.lines.len())
            .map(|i| if i == 0 { self.name_style } else { self.line_style }.line_height())
            .sum();
        self.label_style.line_height() + lines
    }

    /// Draw both stacks and leave the cursor below the taller one.
    pub fn render<S: DrawingSurface>(&self, ctx: &mut LayoutContext<S>) -> Result<()> {
        let geometry = *ctx.geometry();
        let start_y = ctx.cursor_y();

        let left_end = self.render_column(ctx, &self.left, geometry.margins().left, start_y)?;
        let right_x = geometry.width() / 2.0 + self.right_offset;
        let right_end = self.render_column(ctx, &self.right, right_x, start_y)?;

        ctx.set_cursor_y(left_end.max(right_end));
        Ok(())
    }

    fn render_column<S: DrawingSurface>(
        &self,
        ctx: &mut LayoutContext<S>,
        column: &PartyColumn,
        x: f64,
        start_y: f64,
    ) -> Result<f64> {
        let mut y = start_y;
        ctx.surface_mut()
            .draw_text(&column.label, x, y, &TextOptions::new(self.label_style))?;
        y += self.label_style.line_height();

        for (i, text) in column.lines.iter().enumerate() {
            let style = if i == 0 { self.name_style } else { self.line_style };
            ctx.surface_mut().draw_text(text, x, y, &TextOptions::new(style))?;
            y += style.line_height();
        }
        Ok(y)
    }
}

/// Label/value ledger against the right margin, a rule, then a grand total.
///
/// Each value shares a line with its label: after the label the cursor
/// advances one line and is rewound by the label's font size before the
/// value is drawn.
#[derive(Debug, Clone)]
pub struct TotalsBlock {
    pub entries: Vec<(String, String)>,
    pub grand_total: (String, String),
    /// Width of both columns together. Labels take the left half, values
    /// are right-aligned in the right half.
    pub block_width: f64,
    pub label_style: StyleSpec,
    pub value_style: StyleSpec,
    pub grand_total_style: StyleSpec,
    pub rule_color: Color,
}

impl TotalsBlock {
    /// Vertical space the block takes from the cursor.
    pub fn height(&self) -> f64 {
        let entry = pair_advance(self.label_style, self.value_style);
        entry * self.entries.len() as f64 + pair_advance(self.grand_total_style, self.grand_total_style)
    }

    pub fn render<S: DrawingSurface>(&self, ctx: &mut LayoutContext<S>) -> Result<()> {
        let geometry = *ctx.geometry();
        let label_x = geometry.width() - geometry.margins().right - self.block_width;
        let column = self.block_width / 2.0;
        let value_x = label_x + column;

        for (label, value) in &self.entries {
            self.draw_pair(ctx, (label_x, value_x, column), label, value, self.label_style, self.value_style)?;
        }

        let y = ctx.cursor_y();
        ctx.surface_mut()
            .draw_line(label_x, y, label_x + self.block_width, y, self.rule_color)?;

        let (label, value) = &self.grand_total;
        self.draw_pair(
            ctx,
            (label_x, value_x, column),
            label,
            value,
            self.grand_total_style,
            self.grand_total_style,
        )
    }

    fn draw_pair<S: DrawingSurface>(
        &self,
        ctx: &mut LayoutContext<S>,
        (label_x, value_x, column): (f64, f64, f64),
        label: &str,
        value: &str,
        label_style: StyleSpec,
        value_style: StyleSpec,
    ) -> Result<()> {
        let y = ctx.cursor_y();
        ctx.surface_mut()
            .draw_text(label, label_x, y, &TextOptions::boxed(label_style, column, TextAlign::Left))?;
        ctx.advance(label_style.line_height());
        ctx.rewind(label_style.font_size);

        let y = ctx.cursor_y();
        ctx.surface_mut()
            .draw_text(value, value_x, y, &TextOptions::boxed(value_style, column, TextAlign::Right))?;
        ctx.advance(value_style.line_height());
        Ok(())
    }
}

/// Cursor movement of one rewound label/value pair.
fn pair_advance(label: StyleSpec, value: StyleSpec) -> f64 {
    label.line_height() - label.font_size + value.line_height()
}
