//! Fragment extraction from PDF content streams.
//!
//! Walks the text operators of each page and emits one [`TextFragment`] per
//! shown string, carrying its effective font size, style flags derived from
//! the font name, and a top-down bounding box estimated from the text matrix.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{BBox, FragmentStream, TextFragment, FLAG_BOLD, FLAG_ITALIC};

use super::backend::{get_number_from_value, ContentOp, PageId, PdfBackend, PdfValue};
use super::options::{ErrorMode, ParseOptions};

/// TJ adjustments beyond this (thousandths of text space) are word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Reads positioned fragments out of a document.
pub struct FragmentExtractor<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    options: &'a ParseOptions,
}

impl<'a, B: PdfBackend + ?Sized> FragmentExtractor<'a, B> {
    /// Create an extractor over `backend`.
    pub fn new(backend: &'a B, options: &'a ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Extract every selected page, in page order.
    pub fn extract(&self) -> Result<FragmentStream> {
        let mut stream = FragmentStream::new();

        for (page_num, page_id) in self.backend.pages() {
            if !self.options.includes_page(page_num) {
                break;
            }
            let page_index = page_num.saturating_sub(1);

            match self.extract_page(page_index, page_id) {
                Ok(fragments) => stream.push_page(fragments),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    stream.push_page(Vec::new());
                }
            }
        }

        Ok(stream)
    }

    /// Extract the fragments of one page; `page_index` is zero-based.
    pub fn extract_page(&self, page_index: u32, page_id: PageId) -> Result<Vec<TextFragment>> {
        let fonts: HashMap<Vec<u8>, String> = self
            .backend
            .page_fonts(page_id)?
            .into_iter()
            .map(|f| (f.name, f.base_font))
            .collect();

        let content = self.backend.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let ops = self.backend.decode_content(&content)?;
        let (_, page_height) = self.backend.page_size(page_id);

        Ok(self.walk(page_index, page_id, page_height, &ops, &fonts))
    }

    fn walk(
        &self,
        page_index: u32,
        page_id: PageId,
        page_height: f32,
        ops: &[ContentOp],
        fonts: &HashMap<Vec<u8>, String>,
    ) -> Vec<TextFragment> {
        let mut fragments = Vec::new();
        let mut font = FontState::default();
        let mut matrix = TextMatrix::default();
        let mut ctm = Matrix::IDENTITY;
        let mut saved: Vec<Matrix> = Vec::new();
        let mut in_text_block = false;

        for op in ops {
            match op.operator.as_str() {
                "q" => saved.push(ctm),
                "Q" => ctm = saved.pop().unwrap_or(Matrix::IDENTITY),
                "cm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        ctm = m.multiply(&ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    matrix.reset();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let (Some(PdfValue::Name(name)), Some(size)) =
                        (op.operands.first(), op.operands.get(1))
                    {
                        let base = fonts
                            .get(name)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                        font = FontState {
                            resource: name.clone(),
                            flags: style_flags(&base),
                            size: get_number_from_value(size).unwrap_or(12.0),
                        };
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number_from_value) {
                        matrix.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number_from_value(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number_from_value(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            matrix.leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        matrix.set(m);
                    }
                }
                "T*" => matrix.next_line(font.size),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line(font.size);
                    }
                    if !in_text_block {
                        continue;
                    }
                    let text = self.shown_text(op, page_id, &font);
                    let placement = matrix.on_page(&ctm);
                    if let Some(fragment) =
                        self.make_fragment(text, page_index, page_height, &placement, &font)
                    {
                        fragments.push(fragment);
                    }
                }
                _ => {}
            }
        }

        fragments
    }

    /// Decode the string operand(s) of a text-showing operator.
    fn shown_text(&self, op: &ContentOp, page_id: PageId, font: &FontState) -> String {
        let decode = |bytes: &[u8]| self.backend.decode_text(page_id, &font.resource, bytes);

        match op.operator.as_str() {
            "TJ" => {
                let Some(PdfValue::Array(items)) = op.operands.first() else {
                    return String::new();
                };
                let mut combined = String::new();
                for item in items {
                    match item {
                        PdfValue::Str(bytes) => combined.push_str(&decode(bytes)),
                        other => {
                            // Negative adjustments move right; large ones are word gaps
                            let adjustment = -get_number_from_value(other).unwrap_or(0.0);
                            if adjustment > TJ_SPACE_THRESHOLD && needs_space(&combined) {
                                combined.push(' ');
                            }
                        }
                    }
                }
                combined
            }
            "\"" => match op.operands.get(2) {
                Some(PdfValue::Str(bytes)) => decode(bytes),
                _ => String::new(),
            },
            _ => match op.operands.first() {
                Some(PdfValue::Str(bytes)) => decode(bytes),
                _ => String::new(),
            },
        }
    }

    fn make_fragment(
        &self,
        text: String,
        page_index: u32,
        page_height: f32,
        matrix: &Matrix,
        font: &FontState,
    ) -> Option<TextFragment> {
        let text: String = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let (x, baseline) = (matrix.e, matrix.f);
        let size = font.size * matrix.vertical_scale();
        if !(x.is_finite() && baseline.is_finite() && size.is_finite()) {
            log::debug!("Skipping fragment with degenerate matrix on page {}", page_index + 1);
            return None;
        }
        let width = text.chars().count() as f32 * size * 0.5;
        let top = page_height - (baseline + size * 0.8);
        let bottom = page_height - (baseline - size * 0.2);

        Some(TextFragment::new(
            text,
            size,
            font.flags,
            page_index,
            BBox::new(x, top, x + width, bottom),
        ))
    }
}

/// Style flags inferred from a base font name such as "Arial-BoldItalicMT".
pub fn style_flags(base_font: &str) -> u32 {
    let name = base_font.to_lowercase();
    let mut flags = 0;
    if name.contains("bold") || name.contains("black") || name.contains("heavy") {
        flags |= FLAG_BOLD;
    }
    if name.contains("italic") || name.contains("oblique") {
        flags |= FLAG_ITALIC;
    }
    flags
}

/// Whether a TJ word gap should insert a space after `text`.
fn needs_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && c != '\u{00A0}' && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Characters of scripts that do not separate words with spaces.
/// Hangul is not included: Korean uses word spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF       // CJK Unified Ideographs
        | 0x3400..=0x4DBF     // Extension A
        | 0x20000..=0x2EBEF   // Extensions B-F
        | 0x3040..=0x309F     // Hiragana
        | 0x30A0..=0x30FF     // Katakana
        | 0x3000..=0x303F     // CJK Symbols and Punctuation
    )
}

/// Current font selection inside a text object.
#[derive(Debug, Clone)]
struct FontState {
    resource: Vec<u8>,
    flags: u32,
    size: f32,
}

impl Default for FontState {
    fn default() -> Self {
        Self {
            resource: Vec::new(),
            flags: 0,
            size: 12.0,
        }
    }
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Read the six operands of `cm` or `Tm`.
    fn from_operands(operands: &[PdfValue]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let v: Vec<f32> = operands
            .iter()
            .take(6)
            .map(|o| get_number_from_value(o).unwrap_or(0.0))
            .collect();
        Some(Self {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            e: v[4],
            f: v[5],
        })
    }

    /// `self x other`: apply `self` first, then `other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Vertical scale factor applied to the font size.
    fn vertical_scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    matrix: Matrix,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    /// Reset position at the start of a text object; leading persists.
    fn reset(&mut self) {
        self.matrix = Matrix::IDENTITY;
    }

    fn set(&mut self, matrix: Matrix) {
        self.matrix = matrix;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        let m = &mut self.matrix;
        m.e += tx * m.a + ty * m.c;
        m.f += tx * m.b + ty * m.d;
    }

    /// Move to the next line; without a TL leading, 1.2x the font size.
    fn next_line(&mut self, font_size: f32) {
        let leading = if self.leading > 0.0 {
            self.leading
        } else {
            font_size * 1.2
        };
        self.translate(0.0, -leading);
    }

    /// The text matrix composed with the current transformation matrix.
    fn on_page(&self, ctm: &Matrix) -> Matrix {
        self.matrix.multiply(ctm)
    }
}
