//! PDF document parser using lopdf.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::detect::detect_format_from_path;
use crate::error::Result;
use crate::model::FragmentStream;

use super::backend::{LopdfBackend, PdfBackend};
use super::fragments::FragmentExtractor;
use super::options::ParseOptions;

/// Document-level facts from the trailer and Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentInfo {
    /// PDF version, e.g. "1.7"
    pub version: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub encrypted: bool,
}

/// PDF document parser.
pub struct PdfParser {
    backend: LopdfBackend,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        detect_format_from_path(path)?;

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Read the positioned text fragments of every selected page.
    pub fn fragments(&self) -> Result<FragmentStream> {
        FragmentExtractor::new(&self.backend, &self.options).extract()
    }

    /// The Info dictionary title, if any.
    pub fn title(&self) -> Option<String> {
        self.info_dict()
            .and_then(|dict| get_string_from_dict(dict, b"Title"))
    }

    /// Collect document-level metadata.
    pub fn info(&self) -> DocumentInfo {
        let mut info = DocumentInfo {
            version: self.version(),
            page_count: self.page_count(),
            encrypted: self.is_encrypted(),
            ..Default::default()
        };

        if let Some(dict) = self.info_dict() {
            info.title = get_string_from_dict(dict, b"Title");
            info.author = get_string_from_dict(dict, b"Author");
            info.producer = get_string_from_dict(dict, b"Producer");
            info.created =
                get_string_from_dict(dict, b"CreationDate").and_then(|d| parse_pdf_date(&d));
        }

        info
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.backend.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }

    /// The options this parser reads with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    fn info_dict(&self) -> Option<&lopdf::Dictionary> {
        let doc = self.backend.raw_doc();
        match doc.trailer.get(b"Info").ok()? {
            lopdf::Object::Reference(r) => doc.get_dictionary(*r).ok(),
            lopdf::Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        lopdf::Object::String(bytes, _) => {
            // UTF-16BE with BOM is the PDF text string encoding for Unicode
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    // At minimum we need YYYY
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}
