//! Page drawing primitives
//!
//! Callers work in millimetres measured from the top-left corner of an A4
//! page; conversion to PDF points with a bottom-left origin happens here.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em (AFM)
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 0x20..=0x7E, in 1/1000 em (AFM)
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width assumed for glyphs outside ASCII
const FALLBACK_WIDTH: u16 = 556;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

/// Rendered width of `text` in millimetres
pub fn text_width_mm(text: &str, size_pt: f32, font: Font) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(font.glyph_width(c))).sum();
    pt_to_mm(units as f32 * size_pt / 1000.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name in the page's font dictionary
    pub fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// Advance width of `c` in 1/1000 em
    pub fn glyph_width(&self, c: char) -> u16 {
        let widths = match self {
            Font::Regular => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        match c {
            ' '..='~' => widths[c as usize - 0x20],
            _ => FALLBACK_WIDTH,
        }
    }

    pub fn base_font(&self) -> &'static [u8] {
        match self {
            Font::Regular => b"Helvetica",
            Font::Bold => b"Helvetica-Bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub font: Font,
    pub color: [u8; 3],
}

impl TextStyle {
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            font: Font::Regular,
            color: [0, 0, 0],
        }
    }
}

/// Encode for a WinAnsi simple font. Characters WinAnsi cannot show
/// become `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

fn rgb_operands(color: [u8; 3]) -> Vec<Object> {
    color
        .iter()
        .map(|c| Object::Real(f32::from(*c) / 255.0))
        .collect()
}

/// Content operations for one page
#[derive(Debug, Default)]
pub struct PageCanvas {
    operations: Vec<Operation>,
}

impl PageCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `text` with its baseline at `y` mm from the top
    pub fn text(&mut self, x: f32, y: f32, style: TextStyle, text: &str) {
        let ops = [
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(style.font.resource().as_bytes().to_vec()),
                    Object::Real(style.size),
                ],
            ),
            Operation::new("rg", rgb_operands(style.color)),
            Operation::new(
                "Td",
                vec![
                    Object::Real(mm_to_pt(x)),
                    Object::Real(mm_to_pt(PAGE_HEIGHT_MM - y)),
                ],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(encode_text(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ];
        self.operations.extend(ops);
    }

    /// Draw `text` horizontally centred on the page
    pub fn text_centered(&mut self, y: f32, style: TextStyle, text: &str) {
        let x = (PAGE_WIDTH_MM - text_width_mm(text, style.size, style.font)) / 2.0;
        self.text(x.max(0.0), y, style, text);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [u8; 3]) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new("rg", rgb_operands(color)));
        self.operations.push(Self::rect(x, y, width, height));
        self.operations.push(Operation::new("f", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: [u8; 3],
        line_width: f32,
    ) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new("RG", rgb_operands(color)));
        self.operations
            .push(Operation::new("w", vec![Object::Real(mm_to_pt(line_width))]));
        self.operations.push(Self::rect(x, y, width, height));
        self.operations.push(Operation::new("S", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Operation {
        Operation::new(
            "re",
            vec![
                Object::Real(mm_to_pt(x)),
                Object::Real(mm_to_pt(PAGE_HEIGHT_MM - y - height)),
                Object::Real(mm_to_pt(width)),
                Object::Real(mm_to_pt(height)),
            ],
        )
    }

    pub fn into_content(self) -> Content {
        Content {
            operations: self.operations,
        }
    }
}
