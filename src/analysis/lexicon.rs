//! Static word lists used by the heading heuristics.

/// Phrases that mark running prose rather than a heading.
pub const DISCOURSE_PHRASES: &[&str] = &[
    "the following",
    "in order to",
    "as well as",
    "such as",
    "for example",
    "in addition",
    "however",
    "therefore",
    "furthermore",
    "moreover",
    "nevertheless",
    "to provide",
    "this document",
    "this section",
    "we will discuss",
];

/// Single words that are never headings on their own.
pub const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "of", "to", "in", "for", "with", "by", "goals", "page",
];

/// Labels that look like headings but are form boilerplate.
pub const BOILERPLATE_LABELS: &[&str] = &["goals:", "mission statement:"];

/// Leading characters of list items and bullets.
pub const BULLET_MARKERS: &[char] = &['•', '-', '*', '○', '▪'];

/// Lexical configuration injected into the classifier and the assembler.
///
/// All entries are compared in lowercase.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub discourse_phrases: Vec<String>,
    pub stop_words: Vec<String>,
    pub boilerplate_labels: Vec<String>,
    pub bullet_markers: Vec<char>,
}

impl Lexicon {
    /// Create the default lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lexicon with no entries at all.
    pub fn empty() -> Self {
        Self {
            discourse_phrases: Vec::new(),
            stop_words: Vec::new(),
            boilerplate_labels: Vec::new(),
            bullet_markers: Vec::new(),
        }
    }

    /// Add a discourse phrase.
    pub fn with_discourse_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.discourse_phrases.push(phrase.into().to_lowercase());
        self
    }

    /// Add a stop word.
    pub fn with_stop_word(mut self, word: impl Into<String>) -> Self {
        self.stop_words.push(word.into().to_lowercase());
        self
    }

    /// Add a boilerplate label.
    pub fn with_boilerplate_label(mut self, label: impl Into<String>) -> Self {
        self.boilerplate_labels.push(label.into().to_lowercase());
        self
    }

    /// `lowered` contains one of the discourse phrases.
    pub fn has_discourse_phrase(&self, lowered: &str) -> bool {
        self.discourse_phrases
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }

    /// `lowered` is exactly one of the stop words.
    pub fn is_stop_word(&self, lowered: &str) -> bool {
        self.stop_words.iter().any(|w| w == lowered)
    }

    /// `lowered` is exactly one of the boilerplate labels.
    pub fn is_boilerplate(&self, lowered: &str) -> bool {
        self.boilerplate_labels.iter().any(|l| l == lowered)
    }

    /// `text` starts with a bullet marker.
    pub fn starts_with_bullet(&self, text: &str) -> bool {
        text.chars()
            .next()
            .map(|c| self.bullet_markers.contains(&c))
            .unwrap_or(false)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            discourse_phrases: owned(DISCOURSE_PHRASES),
            stop_words: owned(STOP_WORDS),
            boilerplate_labels: owned(BOILERPLATE_LABELS),
            bullet_markers: BULLET_MARKERS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon() {
        let lexicon = Lexicon::default();
        assert!(lexicon.has_discourse_phrase("see the following table"));
        assert!(lexicon.is_stop_word("goals"));
        assert!(!lexicon.is_stop_word("goal"));
        assert!(lexicon.is_boilerplate("mission statement:"));
        assert!(lexicon.starts_with_bullet("• item"));
        assert!(!lexicon.starts_with_bullet("Item"));
    }

    #[test]
    fn test_builder_lowercases() {
        let lexicon = Lexicon::empty()
            .with_stop_word("Appendix")
            .with_boilerplate_label("Signature:");
        assert!(lexicon.is_stop_word("appendix"));
        assert!(lexicon.is_boilerplate("signature:"));
        assert!(!lexicon.has_discourse_phrase("however"));
    }
}
