//! Outline assembly: reading order, deduplication and false-positive removal.

use std::collections::HashSet;

use crate::model::{ClassifiedHeading, OutlineEntry};

use super::lexicon::Lexicon;
use super::text::{is_title, is_upper};

/// Options for outline assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Maximum number of entries kept; the rest is discarded
    pub max_entries: usize,
    /// Entries shorter than this are dropped unless all-caps
    pub min_chars: usize,
    /// Entries shorter than this need punctuation or heading casing
    pub short_chars: usize,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry cap.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            min_chars: 3,
            short_chars: 15,
        }
    }
}

/// Result of assembling one document's outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledOutline {
    /// Final entries in reading order
    pub entries: Vec<OutlineEntry>,
    /// Entries cut off by the cap
    pub truncated: usize,
}

impl AssembledOutline {
    /// Whether the cap was hit.
    pub fn overrun(&self) -> bool {
        self.truncated > 0
    }
}

/// Turns classified headings into a clean outline.
#[derive(Debug, Clone, Default)]
pub struct OutlineAssembler {
    options: OutlineOptions,
    lexicon: Lexicon,
}

impl OutlineAssembler {
    /// Create an assembler with default options and lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with explicit options and lexicon.
    pub fn with_options(options: OutlineOptions, lexicon: Lexicon) -> Self {
        Self { options, lexicon }
    }

    /// Sort, deduplicate, filter and cap.
    pub fn assemble(&self, mut headings: Vec<ClassifiedHeading>) -> AssembledOutline {
        // total_cmp keeps the order total when a position is NaN
        headings.sort_by(|a, b| a.page.cmp(&b.page).then(a.y.total_cmp(&b.y)));

        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        for heading in &headings {
            let normalized = heading.text.trim().to_lowercase();
            if seen.contains(&normalized) || !self.accepts(&heading.text) {
                continue;
            }
            seen.insert(normalized);
            entries.push(OutlineEntry::from(heading));
        }

        let truncated = entries.len().saturating_sub(self.options.max_entries);
        entries.truncate(self.options.max_entries);

        AssembledOutline { entries, truncated }
    }

    /// Filters applied after the classifier.
    fn accepts(&self, text: &str) -> bool {
        let chars = text.chars().count();
        let upper = is_upper(text);

        if chars < self.options.min_chars && !upper {
            return false;
        }

        if chars < self.options.short_chars
            && !text.contains([':', '!', '?'])
            && !upper
            && !is_title(text)
        {
            return false;
        }

        !self.lexicon.is_boilerplate(&text.to_lowercase())
    }
}
