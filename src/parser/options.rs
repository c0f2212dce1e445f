//! Parsing options and configuration.

/// Options for reading fragments out of PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for individual pages
    pub error_mode: ErrorMode,

    /// Apply Unicode NFC normalization to fragment text
    pub normalize_unicode: bool,

    /// Stop after this many pages (0 = all pages)
    pub max_pages: u32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Limit the number of pages read.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Whether the 1-based `page_num` should be read.
    pub fn includes_page(&self, page_num: u32) -> bool {
        self.max_pages == 0 || page_num <= self.max_pages
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            normalize_unicode: true,
            max_pages: 0,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}
