//! Section and ranking types.

use serde::{Deserialize, Serialize};

/// A contiguous run of fragments that starts at a heading boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_title: String,
    /// Whitespace-collapsed text of the whole section, title included
    pub refined_text: String,
    /// One-based page number of the boundary fragment
    pub page_number: u32,
}

/// A section with its relevance score and source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSection {
    pub document: String,
    #[serde(flatten)]
    pub section: Section,
    pub score: u32,
}

/// Ranking metadata for one selected section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub page_number: u32,
    /// One-based position in the ranking
    pub importance_rank: u32,
}

/// Full text of one selected section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// The two parallel lists produced by ranking.
///
/// Both lists always have the same length and order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl RankedResult {
    /// Build both lists from sections already in ranked order.
    pub fn from_ranked(ranked: &[ScoredSection]) -> Self {
        let mut result = Self::default();
        for (i, scored) in ranked.iter().enumerate() {
            result.extracted_sections.push(ExtractedSection {
                document: scored.document.clone(),
                section_title: scored.section.section_title.clone(),
                page_number: scored.section.page_number,
                importance_rank: (i + 1) as u32,
            });
            result.subsection_analysis.push(SubsectionAnalysis {
                document: scored.document.clone(),
                refined_text: scored.section.refined_text.clone(),
                page_number: scored.section.page_number,
            });
        }
        result
    }

    /// Number of ranked sections.
    pub fn len(&self) -> usize {
        self.extracted_sections.len()
    }

    /// Check if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}

/// Run metadata for a multi-document report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Deduplicated, sorted input file names
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

/// The aggregate artifact of multi-document mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub metadata: RunMetadata,
    #[serde(flatten)]
    pub ranking: RankedResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(doc: &str, title: &str, page: u32, score: u32) -> ScoredSection {
        ScoredSection {
            document: doc.to_string(),
            section: Section {
                section_title: title.to_string(),
                refined_text: format!("{} body", title),
                page_number: page,
            },
            score,
        }
    }

    #[test]
    fn test_from_ranked_assigns_ranks() {
        let ranked = vec![scored("a.pdf", "One", 1, 3), scored("b.pdf", "Two", 4, 1)];
        let result = RankedResult::from_ranked(&ranked);

        assert_eq!(result.len(), 2);
        assert_eq!(result.extracted_sections[0].importance_rank, 1);
        assert_eq!(result.extracted_sections[1].importance_rank, 2);
        assert_eq!(result.subsection_analysis[1].document, "b.pdf");
        assert_eq!(result.subsection_analysis[1].refined_text, "Two body");
        assert_eq!(result.subsection_analysis[1].page_number, 4);
    }

    #[test]
    fn test_report_json_shape() {
        let report = CollectionReport {
            metadata: RunMetadata {
                input_documents: vec!["a.pdf".into()],
                persona: "student".into(),
                job_to_be_done: "exam prep".into(),
                processing_timestamp: "2024-01-01 00:00:00.000000".into(),
            },
            ranking: RankedResult::from_ranked(&[scored("a.pdf", "One", 1, 0)]),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert!(value["metadata"]["input_documents"].is_array());
        assert_eq!(value["extracted_sections"][0]["section_title"], "One");
        assert_eq!(value["subsection_analysis"][0]["page_number"], 1);
        assert!(value.get("ranking").is_none());
    }
}
