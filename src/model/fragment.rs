//! Positioned text fragments produced by the parsing adapter.

use serde::{Deserialize, Serialize};

/// Flag bit set on fragments rendered in an italic/oblique font.
pub const FLAG_ITALIC: u32 = 1 << 1;

/// Flag bit set on fragments rendered in a bold/heavy font.
///
/// This is the only flag bit the heading heuristics look at.
pub const FLAG_BOLD: u32 = 1 << 4;

/// Bounding box in top-down page coordinates (y grows towards the page bottom).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A single styled run of text at a known position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content (trimmed)
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Style bitmask (see [`FLAG_BOLD`], [`FLAG_ITALIC`])
    pub flags: u32,
    /// Zero-based page index
    pub page: u32,
    /// Top edge of the fragment, same as `bbox.y0`
    pub y: f32,
    /// Bounding box
    pub bbox: BBox,
}

impl TextFragment {
    /// Create a fragment; `y` is taken from the top edge of `bbox`.
    pub fn new(text: impl Into<String>, size: f32, flags: u32, page: u32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            size,
            flags,
            page,
            y: bbox.y0,
            bbox,
        }
    }

    /// Whether the bold flag bit is set.
    pub fn is_bold(&self) -> bool {
        self.flags & FLAG_BOLD != 0
    }

    /// Whether the italic flag bit is set.
    pub fn is_italic(&self) -> bool {
        self.flags & FLAG_ITALIC != 0
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The ordered fragments of one document, grouped by page.
///
/// Fragment order within a page is the order the parser produced them in;
/// nothing downstream re-sorts except by `(page, y)` where required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragmentStream {
    pages: Vec<Vec<TextFragment>>,
}

impl FragmentStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stream from per-page fragment lists.
    pub fn from_pages(pages: Vec<Vec<TextFragment>>) -> Self {
        let mut stream = Self::new();
        for page in pages {
            stream.push_page(page);
        }
        stream
    }

    /// Append a page. Fragment text is trimmed and blank fragments are dropped.
    pub fn push_page(&mut self, fragments: Vec<TextFragment>) {
        let page = fragments
            .into_iter()
            .filter_map(|mut fragment| {
                let trimmed = fragment.text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != fragment.text.len() {
                    fragment.text = trimmed.to_string();
                }
                Some(fragment)
            })
            .collect();
        self.pages.push(page);
    }

    /// Number of pages (including pages without text).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of fragments.
    pub fn len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Check if the stream holds no fragments at all.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Vec::is_empty)
    }

    /// Fragments of one page.
    pub fn page(&self, index: usize) -> Option<&[TextFragment]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    /// Iterate all fragments in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &TextFragment> {
        self.pages.iter().flatten()
    }

    /// Flatten into a single ordered list.
    pub fn into_fragments(self) -> Vec<TextFragment> {
        self.pages.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str) -> TextFragment {
        TextFragment::new(text, 12.0, 0, 0, BBox::new(0.0, 10.0, 50.0, 22.0))
    }

    #[test]
    fn test_fragment_flags() {
        let mut f = frag("Title");
        assert!(!f.is_bold());
        f.flags = FLAG_BOLD | FLAG_ITALIC;
        assert!(f.is_bold());
        assert!(f.is_italic());
        assert_eq!(f.y, 10.0);
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(frag("Café").char_len(), 4);
    }

    #[test]
    fn test_stream_trims_and_drops_blank() {
        let stream = FragmentStream::from_pages(vec![
            vec![frag("  Intro  "), frag("   "), frag("Body")],
            vec![],
            vec![frag("End")],
        ]);

        assert_eq!(stream.page_count(), 3);
        assert_eq!(stream.len(), 3);
        let texts: Vec<_> = stream.fragments().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Intro", "Body", "End"]);
        assert!(stream.page(1).unwrap().is_empty());
    }

    #[test]
    fn test_empty_stream() {
        let stream = FragmentStream::from_pages(vec![vec![frag(" ")]]);
        assert!(stream.is_empty());
        assert_eq!(stream.len(), 0);
    }
}
