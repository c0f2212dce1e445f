//! Rule-based heading classification.
//!
//! A fragment is first run through a chain of lexical and structural
//! rejections, then mapped to a level by comparing its size against
//! thresholds derived from the document's own largest font size. Because
//! the thresholds are relative, the same rules work for documents set in
//! 9pt and in 14pt body text alike.

use crate::model::{ClassifiedHeading, HeadingLevel, TextFragment};

use super::lexicon::Lexicon;
use super::stats::DocumentStats;
use super::text::{is_numbered_item, is_upper, starts_lowercase, symbol_ratio};

/// Numeric knobs of the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// H1 threshold as a fraction of the largest size
    pub h1_ratio: f32,
    /// H2 threshold as a fraction of the largest size
    pub h2_ratio: f32,
    /// H3 threshold as a fraction of the largest size
    pub h3_ratio: f32,
    /// Bold fragments must exceed the average size by this factor to become H3
    pub emphasis_ratio: f32,
    /// Longer fragments are never headings
    pub max_heading_chars: usize,
    /// Fragments ending in `.`, `!` or `?` longer than this are sentences
    pub max_sentence_chars: usize,
    /// Exclusive lower bound on the length of all-caps fallback headings
    pub caps_min_chars: usize,
    /// Exclusive upper bound on the length of all-caps fallback headings
    pub caps_max_chars: usize,
    /// Fragments with a larger share of symbol characters are treated as noise
    pub max_symbol_ratio: f32,
}

impl ClassifierConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the three size ratios.
    pub fn with_ratios(mut self, h1: f32, h2: f32, h3: f32) -> Self {
        self.h1_ratio = h1;
        self.h2_ratio = h2;
        self.h3_ratio = h3;
        self
    }

    /// Set the bold-fallback factor.
    pub fn with_emphasis_ratio(mut self, ratio: f32) -> Self {
        self.emphasis_ratio = ratio;
        self
    }

    /// Set the maximum heading length.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }

    /// Set the noise threshold.
    pub fn with_max_symbol_ratio(mut self, ratio: f32) -> Self {
        self.max_symbol_ratio = ratio;
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            h1_ratio: 0.9,
            h2_ratio: 0.75,
            h3_ratio: 0.65,
            emphasis_ratio: 1.1,
            max_heading_chars: 100,
            max_sentence_chars: 30,
            caps_min_chars: 3,
            caps_max_chars: 60,
            max_symbol_ratio: 0.4,
        }
    }
}

/// Which fragments count as headings.
///
/// Outline extraction favours precision and applies every rule;
/// segmentation tolerates over-splitting and only looks at size and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Full rule chain with size thresholds and fallbacks (H1/H2/H3)
    #[default]
    Outline,
    /// Any H1/H2-sized or bold fragment (H1/H2 only)
    Segmentation,
}

/// Size thresholds of one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl Thresholds {
    /// Level purely by size, highest tier first.
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        if size >= self.h1 {
            Some(HeadingLevel::H1)
        } else if size >= self.h2 {
            Some(HeadingLevel::H2)
        } else if size >= self.h3 {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }
}

/// Decides whether a fragment is a heading and at which level.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    config: ClassifierConfig,
    lexicon: Lexicon,
}

impl HeadingClassifier {
    /// Create a classifier with default configuration and lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with explicit configuration and lexicon.
    pub fn with_config(config: ClassifierConfig, lexicon: Lexicon) -> Self {
        Self { config, lexicon }
    }

    /// The numeric configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The lexical configuration.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Thresholds for a document.
    pub fn thresholds(&self, stats: &DocumentStats) -> Thresholds {
        Thresholds {
            h1: stats.max_size * self.config.h1_ratio,
            h2: stats.max_size * self.config.h2_ratio,
            h3: stats.max_size * self.config.h3_ratio,
        }
    }

    /// Decorative glyph runs, leaders and similar non-text.
    pub fn is_noise(&self, fragment: &TextFragment) -> bool {
        symbol_ratio(&fragment.text) > self.config.max_symbol_ratio
    }

    /// Classify under the given policy.
    pub fn classify_with(
        &self,
        policy: BoundaryPolicy,
        fragment: &TextFragment,
        stats: &DocumentStats,
    ) -> Option<HeadingLevel> {
        match policy {
            BoundaryPolicy::Outline => self.classify(fragment, stats),
            BoundaryPolicy::Segmentation => self.boundary_level(fragment, stats),
        }
    }

    /// Classify a fragment for the outline.
    pub fn classify(&self, fragment: &TextFragment, stats: &DocumentStats) -> Option<HeadingLevel> {
        if self.is_rejected(&fragment.text) {
            return None;
        }

        let thresholds = self.thresholds(stats);
        if let Some(level) = thresholds.level_for(fragment.size) {
            return Some(level);
        }

        if fragment.is_bold() && fragment.size > stats.avg_size * self.config.emphasis_ratio {
            return Some(HeadingLevel::H3);
        }

        let chars = fragment.char_len();
        if is_upper(&fragment.text)
            && chars > self.config.caps_min_chars
            && chars < self.config.caps_max_chars
            && fragment.size > stats.avg_size
        {
            return Some(HeadingLevel::H2);
        }

        None
    }

    /// Section-start signal used by segmentation.
    pub fn boundary_level(
        &self,
        fragment: &TextFragment,
        stats: &DocumentStats,
    ) -> Option<HeadingLevel> {
        let thresholds = self.thresholds(stats);
        if fragment.size >= thresholds.h1 {
            Some(HeadingLevel::H1)
        } else if fragment.size >= thresholds.h2 || fragment.is_bold() {
            Some(HeadingLevel::H2)
        } else {
            None
        }
    }

    /// Size-independent rejections.
    fn is_rejected(&self, text: &str) -> bool {
        let chars = text.chars().count();
        if chars > self.config.max_heading_chars {
            return true;
        }

        let lowered = text.to_lowercase();
        if self.lexicon.has_discourse_phrase(&lowered) {
            return true;
        }

        if text.ends_with(['.', '!', '?']) && chars > self.config.max_sentence_chars {
            return true;
        }

        if starts_lowercase(text) {
            return true;
        }

        if self.lexicon.starts_with_bullet(text) || is_numbered_item(text) {
            return true;
        }

        let mut words = lowered.split_whitespace();
        if let (Some(word), None) = (words.next(), words.next()) {
            if self.lexicon.is_stop_word(word) {
                return true;
            }
        }

        false
    }

    /// Drop noise, compute statistics and classify every remaining fragment.
    ///
    /// Returns headings in stream order; an empty or all-noise stream yields
    /// no headings.
    pub fn classify_all<'a, I>(&self, fragments: I) -> Vec<ClassifiedHeading>
    where
        I: IntoIterator<Item = &'a TextFragment>,
    {
        let kept: Vec<&TextFragment> = fragments
            .into_iter()
            .filter(|f| !self.is_noise(f))
            .collect();

        let Some(stats) = DocumentStats::from_fragments(kept.iter().copied()) else {
            return Vec::new();
        };

        kept.into_iter()
            .filter_map(|fragment| {
                self.classify(fragment, &stats).map(|level| ClassifiedHeading {
                    level,
                    text: fragment.text.clone(),
                    page: fragment.page,
                    y: fragment.y,
                    size: fragment.size,
                })
            })
            .collect()
    }
}
