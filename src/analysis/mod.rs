//! Heading heuristics, outline assembly, segmentation and ranking.
//!
//! Everything in this module is pure computation over in-memory fragments:
//! no I/O, no shared mutable state, and no failure modes. A "wrong" heading
//! decision is an accuracy issue, never an error.

mod assemble;
mod classifier;
mod lexicon;
mod rank;
mod segment;
mod stats;
mod text;
mod title;

pub use assemble::{AssembledOutline, OutlineAssembler, OutlineOptions};
pub use classifier::{BoundaryPolicy, ClassifierConfig, HeadingClassifier, Thresholds};
pub use lexicon::{Lexicon, BOILERPLATE_LABELS, BULLET_MARKERS, DISCOURSE_PHRASES, STOP_WORDS};
pub use rank::{Keywords, RankOptions, RelevanceRanker};
pub use segment::SectionSegmenter;
pub use stats::DocumentStats;
pub use text::{collapse_whitespace, is_title, is_upper};
pub use title::TitlePolicy;
