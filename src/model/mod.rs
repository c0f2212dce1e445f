//! Data model shared by the parser, the heading heuristics and the renderers.
//!
//! Fragments flow in from the parsing adapter; outlines, sections and
//! rankings flow out to the serialization layer. Every type here is plain
//! owned data with serde support.

mod fragment;
mod outline;
mod section;

pub use fragment::{BBox, FragmentStream, TextFragment, FLAG_BOLD, FLAG_ITALIC};
pub use outline::{ClassifiedHeading, DocumentOutline, HeadingLevel, OutlineEntry};
pub use section::{
    CollectionReport, ExtractedSection, RankedResult, RunMetadata, ScoredSection, Section,
    SubsectionAnalysis,
};
