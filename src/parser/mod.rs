//! PDF parsing module.
//!
//! Turns a PDF into a [`FragmentStream`](crate::model::FragmentStream):
//! one list of positioned, styled text fragments per page.

mod backend;
mod fragments;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
};
pub use fragments::{style_flags, FragmentExtractor};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::{DocumentInfo, PdfParser};
