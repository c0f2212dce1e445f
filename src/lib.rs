//! # pdfoutline
//!
//! Heading outlines and persona-driven section ranking for PDF documents.
//!
//! The library reads positioned, styled text fragments out of a PDF and
//! infers its heading hierarchy from typography alone: font size relative to
//! the largest size in the document, bold emphasis and all-caps text, filtered
//! by a chain of lexical rules. The same fragments can be sliced into
//! sections and ranked across a collection by keyword overlap with a persona
//! and a job description.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline extraction**: H1/H2/H3 headings with page indices
//! - **Section segmentation**: heading-delimited text blocks
//! - **Relevance ranking**: top sections of a collection for a persona and task
//! - **Batch processing**: directories of PDFs, in parallel with Rayon

pub mod analysis;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    BoundaryPolicy, ClassifierConfig, HeadingClassifier, Lexicon, OutlineAssembler,
    OutlineOptions, RankOptions, RelevanceRanker, SectionSegmenter, TitlePolicy,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, find_pdfs, Discovery, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    BBox, ClassifiedHeading, CollectionReport, DocumentOutline, FragmentStream, HeadingLevel,
    OutlineEntry, RankedResult, Section, TextFragment,
};
pub use parser::{DocumentInfo, ErrorMode, ParseOptions, PdfParser};
pub use pipeline::{BatchOptions, BatchSummary, OutlineFile, Pipeline};
pub use render::JsonFormat;

use std::path::{Path, PathBuf};

/// Extract the title and heading outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline;
///
/// let outline = extract_outline("document.pdf").unwrap();
/// for entry in &outline.outline {
///     println!("{} {} (page {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Pipeline::default().extract_outline(path)
}

/// Extract an outline with a custom pipeline.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline_with, ParseOptions, Pipeline};
///
/// let pipeline = Pipeline::new().with_parse_options(ParseOptions::new().lenient());
/// let outline = extract_outline_with("document.pdf", &pipeline).unwrap();
/// ```
pub fn extract_outline_with<P: AsRef<Path>>(path: P, pipeline: &Pipeline) -> Result<DocumentOutline> {
    pipeline.extract_outline(path)
}

/// Outline entries of an in-memory fragment stream, with default settings.
pub fn outline_from_stream(stream: &FragmentStream) -> Vec<OutlineEntry> {
    Pipeline::default().outline_from_stream(stream).entries
}

/// Sections of an in-memory fragment stream, with default settings.
pub fn sections_from_stream(stream: &FragmentStream) -> Vec<Section> {
    Pipeline::default().sections_from_stream(stream)
}

/// Rank the sections of several PDFs for a persona and a job.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::rank_collection;
/// use std::path::PathBuf;
///
/// let docs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
/// let report = rank_collection(&docs, "Travel Planner", "Plan a 4-day trip");
/// println!("{} sections", report.ranking.len());
/// ```
pub fn rank_collection(paths: &[PathBuf], persona: &str, job: &str) -> CollectionReport {
    Pipeline::default().rank_files(paths, persona, job)
}

/// Write one `<stem>.json` outline per PDF in `input_dir`.
pub fn process_directory<P, Q>(input_dir: P, output_dir: Q) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Pipeline::default().process_directory(input_dir, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, size: f32, page: u32, y: f32) -> TextFragment {
        TextFragment::new(text, size, 0, page, BBox::new(0.0, y, 100.0, y + size))
    }

    #[test]
    fn test_outline_from_stream() {
        let stream = FragmentStream::from_pages(vec![vec![
            frag("INTRODUCTION", 24.0, 0, 10.0),
            frag("plain body text follows here", 10.0, 0, 40.0),
        ]]);

        let entries = outline_from_stream(&stream);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_sections_from_stream() {
        let stream = FragmentStream::from_pages(vec![vec![
            frag("Overview", 20.0, 0, 10.0),
            frag("Body text.", 10.0, 0, 40.0),
        ]]);

        let sections = sections_from_stream(&stream);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].refined_text, "Overview Body text.");
    }

    #[test]
    fn test_rank_collection_of_nothing() {
        let report = rank_collection(&[], "student", "exam prep");
        assert!(report.ranking.is_empty());
        assert!(report.metadata.input_documents.is_empty());
    }
}
