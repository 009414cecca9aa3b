//! Grid tables with automatic page breaks
//!
//! A row that does not fit above the bottom margin moves to a new page,
//! and the header row is repeated there. Cell text wraps on word
//! boundaries within its column.

use crate::view::Table;

use super::canvas::{pt_to_mm, text_width_mm, Font, PageCanvas, TextStyle, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

/// Page list with a cursor on the last page
#[derive(Debug)]
pub struct PdfPages {
    pages: Vec<PageCanvas>,
}

impl PdfPages {
    pub fn new() -> Self {
        Self {
            pages: vec![PageCanvas::new()],
        }
    }

    pub fn current(&mut self) -> &mut PageCanvas {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn add_page(&mut self) -> &mut PageCanvas {
        self.pages.push(PageCanvas::new());
        self.current()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn into_pages(self) -> Vec<PageCanvas> {
        self.pages
    }
}

impl Default for PdfPages {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableStyle {
    pub font_size: f32,
    /// mm on every side of the cell text
    pub cell_padding: f32,
    /// Left, right, top (on continuation pages) and bottom margin in mm
    pub margin: f32,
    pub head_fill: [u8; 3],
    pub head_text: [u8; 3],
    pub body_text: [u8; 3],
    pub line_color: [u8; 3],
    pub line_width: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            cell_padding: 3.0,
            margin: 14.11,
            head_fill: [66, 139, 202],
            head_text: [255, 255, 255],
            body_text: [80, 80, 80],
            line_color: [200, 200, 200],
            line_width: 0.1,
        }
    }
}

impl TableStyle {
    pub fn table_width(&self) -> f32 {
        PAGE_WIDTH_MM - 2.0 * self.margin
    }

    fn line_height(&self) -> f32 {
        pt_to_mm(self.font_size * 1.15)
    }

    /// Column widths spanning the table; `fixed` pins `(column, mm)`
    /// pairs and the remaining width is shared equally.
    pub fn column_widths(&self, columns: usize, fixed: &[(usize, f32)]) -> Vec<f32> {
        let pinned: f32 = fixed.iter().map(|(_, w)| w).sum();
        let free = columns.saturating_sub(fixed.len()).max(1) as f32;
        let share = ((self.table_width() - pinned) / free).max(0.0);
        (0..columns)
            .map(|i| {
                fixed
                    .iter()
                    .find(|(col, _)| *col == i)
                    .map(|(_, w)| *w)
                    .unwrap_or(share)
            })
            .collect()
    }
}

/// Greedy word wrap; words wider than the column are split by character.
pub fn wrap_text(text: &str, width_mm: f32, size_pt: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if text_width_mm(&candidate, size_pt, font) <= width_mm {
            line = candidate;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        for c in word.chars() {
            line.push(c);
            if text_width_mm(&line, size_pt, font) > width_mm && line.chars().count() > 1 {
                line.pop();
                lines.push(std::mem::take(&mut line));
                line.push(c);
            }
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Draw `table` starting at `start_y` mm and return the y coordinate just
/// below its last row, on whichever page that row landed.
pub fn draw_table(
    pages: &mut PdfPages,
    start_y: f32,
    table: &Table,
    widths: &[f32],
    style: &TableStyle,
) -> f32 {
    let bottom = PAGE_HEIGHT_MM - style.margin;
    let mut y = draw_row(pages.current(), start_y, &table.head, widths, style, Font::Bold);
    let mut rows_on_page = 0;

    for row in &table.rows {
        let height = row_height(row, widths, style, Font::Regular);
        if y + height > bottom && rows_on_page > 0 {
            pages.add_page();
            y = draw_row(pages.current(), style.margin, &table.head, widths, style, Font::Bold);
            rows_on_page = 0;
        }
        y = draw_row(pages.current(), y, row, widths, style, Font::Regular);
        rows_on_page += 1;
    }
    y
}

fn wrapped_cells(
    cells: &[String],
    widths: &[f32],
    style: &TableStyle,
    font: Font,
) -> Vec<Vec<String>> {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| wrap_text(cell, w - 2.0 * style.cell_padding, style.font_size, font))
        .collect()
}

fn row_height(cells: &[String], widths: &[f32], style: &TableStyle, font: Font) -> f32 {
    let lines = wrapped_cells(cells, widths, style, font)
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(1);
    lines as f32 * style.line_height() + 2.0 * style.cell_padding
}

fn draw_row(
    canvas: &mut PageCanvas,
    y: f32,
    cells: &[String],
    widths: &[f32],
    style: &TableStyle,
    font: Font,
) -> f32 {
    let head = font == Font::Bold;
    let height = row_height(cells, widths, style, font);
    let text_style = TextStyle {
        size: style.font_size,
        font,
        color: if head { style.head_text } else { style.body_text },
    };
    // Baseline sits roughly one cap height below the top padding
    let baseline_offset = style.cell_padding + pt_to_mm(style.font_size) * 0.8;

    let mut x = style.margin;
    for (lines, width) in wrapped_cells(cells, widths, style, font).iter().zip(widths) {
        if head {
            canvas.fill_rect(x, y, *width, height, style.head_fill);
        }
        canvas.stroke_rect(x, y, *width, height, style.line_color, style.line_width);
        for (i, line) in lines.iter().enumerate() {
            let line_y = y + baseline_offset + i as f32 * style.line_height();
            canvas.text(x + style.cell_padding, line_y, text_style, line);
        }
        x += width;
    }
    y + height
}
