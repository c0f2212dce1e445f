//! Heading and outline types.

use serde::{Deserialize, Serialize};

/// Relative heading tier inferred from typography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth (1 for H1).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A fragment the classifier accepted as a heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedHeading {
    pub level: HeadingLevel,
    pub text: String,
    /// Zero-based page index
    pub page: u32,
    /// Top-down vertical position on the page
    pub y: f32,
    pub size: f32,
}

/// One line of the final outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// Zero-based page index
    pub page: u32,
}

impl From<&ClassifiedHeading> for OutlineEntry {
    fn from(heading: &ClassifiedHeading) -> Self {
        Self {
            level: heading.level,
            text: heading.text.clone(),
            page: heading.page,
        }
    }
}

/// Single-document result: cleaned title plus outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an outline result.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The substitute result for documents that could not be read.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Count entries per level as (H1, H2, H3).
    pub fn level_counts(&self) -> (usize, usize, usize) {
        self.outline
            .iter()
            .fold((0, 0, 0), |(h1, h2, h3), entry| match entry.level {
                HeadingLevel::H1 => (h1 + 1, h2, h3),
                HeadingLevel::H2 => (h1, h2 + 1, h3),
                HeadingLevel::H3 => (h1, h2, h3 + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serializes_as_tag() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
    }

    #[test]
    fn test_empty_outline_json() {
        let json = serde_json::to_string(&DocumentOutline::empty()).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_level_counts() {
        let outline = DocumentOutline::new(
            "Doc",
            vec![
                OutlineEntry {
                    level: HeadingLevel::H1,
                    text: "A".into(),
                    page: 0,
                },
                OutlineEntry {
                    level: HeadingLevel::H3,
                    text: "B".into(),
                    page: 1,
                },
                OutlineEntry {
                    level: HeadingLevel::H3,
                    text: "C".into(),
                    page: 1,
                },
            ],
        );
        assert_eq!(outline.level_counts(), (1, 0, 2));
    }
}
