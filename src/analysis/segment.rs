//! Section segmentation of a fragment stream.

use crate::model::{Section, TextFragment};

use super::classifier::{BoundaryPolicy, HeadingClassifier};
use super::stats::DocumentStats;
use super::text::collapse_whitespace;

/// Splits a document into sections that start at heading boundaries.
#[derive(Debug, Clone, Copy)]
pub struct SectionSegmenter<'a> {
    classifier: &'a HeadingClassifier,
    policy: BoundaryPolicy,
}

impl<'a> SectionSegmenter<'a> {
    /// Create a segmenter using the segmentation boundary policy.
    pub fn new(classifier: &'a HeadingClassifier) -> Self {
        Self {
            classifier,
            policy: BoundaryPolicy::Segmentation,
        }
    }

    /// Override the boundary policy.
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Indices of fragments that start a section.
    pub fn boundaries(&self, fragments: &[TextFragment]) -> Vec<usize> {
        let Some(stats) = DocumentStats::from_fragments(fragments) else {
            return Vec::new();
        };

        fragments
            .iter()
            .enumerate()
            .filter(|(_, fragment)| {
                self.classifier
                    .classify_with(self.policy, fragment, &stats)
                    .is_some()
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Slice `fragments` into sections.
    ///
    /// Text before the first boundary belongs to no section, and a document
    /// without boundaries yields no sections.
    pub fn segment(&self, fragments: &[TextFragment]) -> Vec<Section> {
        let boundaries = self.boundaries(fragments);

        boundaries
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = boundaries.get(i + 1).copied().unwrap_or(fragments.len());
                let body = fragments[start..end]
                    .iter()
                    .map(|f| f.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let head = &fragments[start];
                Section {
                    section_title: head.text.clone(),
                    refined_text: collapse_whitespace(&body),
                    page_number: head.page + 1,
                }
            })
            .collect()
    }
}
