//! Casing and character-class checks on fragment text.

use std::sync::OnceLock;

use regex::Regex;

/// At least one cased character and no lowercase ones.
pub fn is_upper(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Every run of cased characters starts with an uppercase letter
/// followed only by lowercase letters ("Getting Started", "Q&A").
pub fn is_title(text: &str) -> bool {
    let mut has_cased = false;
    let mut prev_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else {
            prev_cased = false;
        }
    }
    has_cased
}

/// First character is a lowercase letter.
pub fn starts_lowercase(text: &str) -> bool {
    text.chars().next().map(char::is_lowercase).unwrap_or(false)
}

/// Ratio of characters that are neither alphanumeric nor one of ` -:`.
pub fn symbol_ratio(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let symbols = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !matches!(c, ' ' | '-' | ':'))
        .count();
    symbols as f32 / total as f32
}

/// Starts like a numbered list item: "1.", "2)", "3 ".
pub fn is_numbered_item(text: &str) -> bool {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED
        .get_or_init(|| Regex::new(r"^\d+[\.\)\s]").expect("valid numbered-item regex"))
        .is_match(text)
}

/// Collapse every whitespace run into a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE
        .get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
        .replace_all(text.trim(), " ")
        .into_owned()
}
