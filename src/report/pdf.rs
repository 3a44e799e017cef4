//! PDF 渲染
//!
//! US Letter 纵向版面。表头灰底浅色粗体，表体米色底，黑色网格；
//! 剩余空间不足时换页并重画表头。

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use super::{ReportDocument, ReportTable};
use crate::errors::{Result, TrackerError};

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 18.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 14.0;
const HEADING_SIZE: f32 = 13.0;
const INFO_SIZE: f32 = 10.0;
const HEADER_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 9.0;

const HEADER_ROW_HEIGHT: f32 = 8.0;
const BODY_ROW_HEIGHT: f32 = 6.5;
const CELL_PADDING: f32 = 1.5;
const GRID_THICKNESS: f32 = 1.0;

/// pt 转 mm
const PT_TO_MM: f32 = 0.3528;
/// Helvetica 平均字宽约为字号的一半
const AVG_GLYPH_EM: f32 = 0.5;
const BOLD_GLYPH_EM: f32 = 0.56;

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn grey() -> Color {
    rgb(0.5, 0.5, 0.5)
}

fn whitesmoke() -> Color {
    rgb(0.96, 0.96, 0.96)
}

fn beige() -> Color {
    rgb(0.96, 0.96, 0.86)
}

fn black() -> Color {
    rgb(0.0, 0.0, 0.0)
}

/// 估算文本宽度（mm）
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em = if bold { BOLD_GLYPH_EM } else { AVG_GLYPH_EM };
    text.chars().count() as f32 * size * PT_TO_MM * em
}

/// 超出单元格宽度时截断并加省略号
pub(crate) fn fit_text(text: &str, width: f32, size: f32, bold: bool) -> String {
    clip_text(text, width - 2.0 * CELL_PADDING, size, bold)
}

/// 截断到 `available` mm 以内
fn clip_text(text: &str, available: f32, size: f32, bold: bool) -> String {
    if text_width(text, size, bold) <= available {
        return text.to_string();
    }

    let em = if bold { BOLD_GLYPH_EM } else { AVG_GLYPH_EM };
    let per_char = size * PT_TO_MM * em;
    let max_chars = ((available / per_char).floor() as usize).saturating_sub(3);
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

/// WinAnsi 在 0x80..0x9F 区间额外收录的字符
const WIN_ANSI_EXTRA: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•',
    '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// 内置字体只支持 WinAnsi，其余字符替换为 '?'
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c,
            c if WIN_ANSI_EXTRA.contains(&c) => c,
            _ => '?',
        })
        .collect()
}

struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// 当前书写位置（距页面底部，mm）
    cursor: f32,
}

impl Canvas {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| TrackerError::report_render(format!("Failed to load font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| TrackerError::report_render(format!("Failed to load font: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// 剩余高度不足 `height` 时换页，返回是否换了页
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor - height < MARGIN {
            self.new_page();
            return true;
        }
        false
    }

    fn text(&self, text: &str, size: f32, x: f32, baseline: f32, bold: bool, color: Color) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(color);
        self.layer
            .use_text(sanitize(text), size, Mm(x), Mm(baseline), font);
    }

    fn centered_text(&self, text: &str, size: f32, bold: bool) {
        let width = text_width(text, size, bold);
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        self.text(text, size, x, self.cursor, bold, black());
    }

    fn fill_rect(&self, x: f32, top: f32, width: f32, height: f32, color: Color) {
        self.layer.set_fill_color(color);
        let rect = Rect::new(Mm(x), Mm(top - height), Mm(x + width), Mm(top))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    fn stroke_line(&self, from: (f32, f32), to: (f32, f32)) {
        self.layer.set_outline_color(black());
        self.layer.set_outline_thickness(GRID_THICKNESS);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(from.1)), false),
                (Point::new(Mm(to.0), Mm(to.1)), false),
            ],
            is_closed: false,
        });
    }

    /// 画一行：底色、文字、网格
    fn row(&mut self, cells: &[String], widths: &[f32], header: bool) {
        let (height, size, fill, ink) = if header {
            (HEADER_ROW_HEIGHT, HEADER_SIZE, grey(), whitesmoke())
        } else {
            (BODY_ROW_HEIGHT, BODY_SIZE, beige(), black())
        };
        let top = self.cursor;
        let bottom = top - height;

        self.fill_rect(MARGIN, top, CONTENT_WIDTH, height, fill);

        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(widths) {
            let fitted = fit_text(cell, *width, size, header);
            let text_x = x + ((width - text_width(&fitted, size, header)) / 2.0).max(CELL_PADDING);
            let baseline = bottom + (height - size * PT_TO_MM) / 2.0 + 0.6;
            self.text(&fitted, size, text_x, baseline, header, ink.clone());
            x += width;
        }

        // 网格
        self.stroke_line((MARGIN, top), (MARGIN + CONTENT_WIDTH, top));
        self.stroke_line((MARGIN, bottom), (MARGIN + CONTENT_WIDTH, bottom));
        let mut x = MARGIN;
        self.stroke_line((x, top), (x, bottom));
        for width in widths {
            x += width;
            self.stroke_line((x, top), (x, bottom));
        }

        self.cursor = bottom;
    }

    fn table(&mut self, table: &ReportTable) {
        let total: f32 = table.weights.iter().sum::<f32>().max(f32::EPSILON);
        let widths: Vec<f32> = table
            .weights
            .iter()
            .map(|w| CONTENT_WIDTH * w / total)
            .collect();

        // 标题、表头和至少一行放在同一页
        let heading_height = HEADING_SIZE * PT_TO_MM + 4.0;
        self.ensure_space(heading_height + HEADER_ROW_HEIGHT + BODY_ROW_HEIGHT);
        self.cursor -= HEADING_SIZE * PT_TO_MM;
        self.text(&table.title, HEADING_SIZE, MARGIN, self.cursor, true, black());
        self.cursor -= 4.0;

        self.row(&table.headers, &widths, true);
        for cells in &table.rows {
            if self.ensure_space(BODY_ROW_HEIGHT) {
                self.row(&table.headers, &widths, true);
            }
            self.row(cells, &widths, false);
        }

        self.cursor -= 7.0;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| TrackerError::report_render(format!("Failed to write PDF: {}", e)))
    }
}

/// 渲染为 PDF 字节
pub fn render(document: &ReportDocument) -> Result<Vec<u8>> {
    let mut canvas = Canvas::new(&document.title)?;

    canvas.cursor -= TITLE_SIZE * PT_TO_MM;
    canvas.centered_text(&document.title, TITLE_SIZE, true);
    canvas.cursor -= SUBTITLE_SIZE * PT_TO_MM + 3.0;
    canvas.centered_text(&document.subtitle, SUBTITLE_SIZE, false);
    canvas.cursor -= 10.0;

    for (label, value) in &document.info {
        let label = format!("{}:", label);
        canvas.text(&label, INFO_SIZE, MARGIN, canvas.cursor, true, black());
        let value_x = MARGIN + text_width(&label, INFO_SIZE, true) + 2.0;
        let value = clip_text(value, PAGE_WIDTH - MARGIN - value_x, INFO_SIZE, false);
        canvas.text(&value, INFO_SIZE, value_x, canvas.cursor, false, black());
        canvas.cursor -= INFO_SIZE * PT_TO_MM + 2.0;
    }
    canvas.cursor -= 6.0;

    for table in &document.tables {
        canvas.table(table);
    }

    canvas.finish()
}
