//! Persona-driven relevance ranking of sections.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{RankedResult, ScoredSection, Section};

/// Options for ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOptions {
    /// Number of sections kept across the whole collection
    pub top_k: usize,
}

impl RankOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

/// Lowercased word tokens of the persona and job description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords(BTreeSet<String>);

impl Keywords {
    /// Tokenize `persona` and `job` on non-word boundaries.
    pub fn from_query(persona: &str, job: &str) -> Self {
        static WORD: OnceLock<Regex> = OnceLock::new();
        let word = WORD.get_or_init(|| Regex::new(r"\w+").expect("valid word regex"));

        let query = format!("{} {}", persona, job).to_lowercase();
        Self(word.find_iter(&query).map(|m| m.as_str().to_string()).collect())
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the query produced no keywords.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate keywords in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of keywords that occur anywhere in `text`.
    ///
    /// Matching is by substring, so "plan" also hits "planning"; repeated
    /// occurrences of one keyword count once.
    pub fn score(&self, text: &str) -> u32 {
        let lowered = text.to_lowercase();
        self.0
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .count() as u32
    }
}

/// Scores sections and keeps the best ones across documents.
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    options: RankOptions,
}

impl RelevanceRanker {
    /// Create a ranker with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ranker with explicit options.
    pub fn with_options(options: RankOptions) -> Self {
        Self { options }
    }

    /// Score every section of one document.
    pub fn score_sections(
        &self,
        keywords: &Keywords,
        document: &str,
        sections: Vec<Section>,
    ) -> Vec<ScoredSection> {
        sections
            .into_iter()
            .map(|section| ScoredSection {
                document: document.to_string(),
                score: keywords.score(&section.refined_text),
                section,
            })
            .collect()
    }

    /// Order by score, highest first, and keep the top K.
    ///
    /// The sort is stable: equal scores keep their encounter order.
    pub fn select(&self, mut scored: Vec<ScoredSection>) -> Vec<ScoredSection> {
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.options.top_k);
        scored
    }

    /// Rank sections of several documents, given in encounter order.
    pub fn rank<I>(&self, persona: &str, job: &str, documents: I) -> RankedResult
    where
        I: IntoIterator<Item = (String, Vec<Section>)>,
    {
        let keywords = Keywords::from_query(persona, job);
        log::debug!("Ranking with {} keywords", keywords.len());

        let scored: Vec<ScoredSection> = documents
            .into_iter()
            .flat_map(|(document, sections)| self.score_sections(&keywords, &document, sections))
            .collect();

        RankedResult::from_ranked(&self.select(scored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, text: &str) -> Section {
        Section {
            section_title: title.to_string(),
            refined_text: text.to_string(),
            page_number: 1,
        }
    }

    #[test]
    fn test_keywords() {
        let keywords = Keywords::from_query("HR Professional", "Create fillable-forms, fast!");
        let words: Vec<_> = keywords.iter().collect();
        assert_eq!(
            words,
            vec!["create", "fast", "fillable", "forms", "hr", "professional"]
        );
        assert!(Keywords::from_query("", "  ?! ").is_empty());
    }

    #[test]
    fn test_presence_scoring() {
        let keywords = Keywords::from_query("student", "exam prep");
        assert_eq!(keywords.score("Student student STUDENT"), 1);
        assert_eq!(keywords.score("Exam preparation for students"), 3);
        assert_eq!(keywords.score("nothing relevant"), 0);
    }

    #[test]
    fn test_persona_keyword_ranks_first() {
        let ranker = RelevanceRanker::new();
        let result = ranker.rank(
            "student",
            "exam prep",
            vec![(
                "guide.pdf".to_string(),
                vec![
                    section("B", "Weather and climate"),
                    section("A", "Advice for every student"),
                ],
            )],
        );
        assert_eq!(result.extracted_sections[0].section_title, "A");
        assert_eq!(result.extracted_sections[1].section_title, "B");
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let ranker = RelevanceRanker::new();
        let result = ranker.rank(
            "",
            "",
            vec![
                ("a.pdf".to_string(), vec![section("One", "x"), section("Two", "y")]),
                ("b.pdf".to_string(), vec![section("Three", "z")]),
            ],
        );
        let titles: Vec<_> = result
            .extracted_sections
            .iter()
            .map(|s| s.section_title.as_str())
            .collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_top_k_bound() {
        let ranker = RelevanceRanker::with_options(RankOptions::new().with_top_k(10));
        let sections: Vec<_> = (0..14).map(|i| section(&format!("S{}", i), "text")).collect();
        let result = ranker.rank("p", "j", vec![("d.pdf".to_string(), sections)]);
        assert_eq!(result.len(), 10);
        assert_eq!(result.subsection_analysis.len(), 10);
        for (i, s) in result.extracted_sections.iter().enumerate() {
            assert_eq!(s.importance_rank as usize, i + 1);
        }

        let few = ranker.rank("p", "j", vec![("d.pdf".to_string(), vec![section("A", "a")])]);
        assert_eq!(few.len(), 1);
    }
}
