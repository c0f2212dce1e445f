//! PDF detection and input discovery.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Detect the PDF header of a file.
///
/// Returns `Err(Error::UnknownFormat)` if the file does not start with `%PDF-x.y`.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; PDF_MAGIC_LEN + VERSION_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|_| Error::UnknownFormat)?;
    detect_format_from_bytes(&header)
}

/// Detect the PDF header from the leading bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

/// Check if a version string looks like "d.d".
fn is_valid_version(version: &str) -> bool {
    let chars: Vec<char> = version.chars().collect();
    chars.len() == 3 && chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// How input directories are scanned for documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discovery {
    /// Only files directly inside the directory
    #[default]
    Flat,
    /// Walk subdirectories as well
    Recursive,
}

/// Collect `.pdf` files (extension matched case-insensitively) under `dir`.
///
/// The result is sorted by path so that batch output and ranking tie-breaks
/// do not depend on directory iteration order.
pub fn find_pdfs<P: AsRef<Path>>(dir: P, discovery: Discovery) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_pdfs(dir.as_ref(), discovery, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_pdfs(dir: &Path, discovery: Discovery, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if discovery == Discovery::Recursive {
                if let Err(e) = collect_pdfs(&path, discovery, found) {
                    log::warn!("Skipping unreadable directory {}: {}", path.display(), e);
                }
            }
        } else if has_pdf_extension(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
