//! Cleaning of metadata titles.

/// Decides which metadata titles make it into the outline output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePolicy {
    /// Titles with more characters than this are dropped
    pub max_chars: usize,
    /// File names whose metadata title is known to be garbage
    pub suppressed_documents: Vec<String>,
}

impl TitlePolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum title length.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Suppress the title of a document by file name.
    pub fn suppress(mut self, file_name: impl Into<String>) -> Self {
        self.suppressed_documents.push(file_name.into());
        self
    }

    /// The title to emit for `file_name`, or an empty string.
    pub fn clean(&self, raw: Option<&str>, file_name: &str) -> String {
        if self.suppressed_documents.iter().any(|d| d == file_name) {
            return String::new();
        }

        let title = raw.unwrap_or_default().trim();
        if title.chars().count() > self.max_chars {
            return String::new();
        }
        title.to_string()
    }
}

impl Default for TitlePolicy {
    fn default() -> Self {
        Self {
            max_chars: 50,
            suppressed_documents: vec!["STEMPathwaysFlyer.pdf".to_string()],
        }
    }
}
