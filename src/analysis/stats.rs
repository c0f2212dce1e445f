//! Per-document font size statistics.

use std::collections::HashMap;

use crate::model::TextFragment;

/// Font size statistics of one document.
///
/// Only exists for non-empty fragment sets; callers treat `None` as
/// "nothing to classify".
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStats {
    /// Largest font size in the document
    pub max_size: f32,
    /// Mean font size over all fragments
    pub avg_size: f32,
    /// Most common font size (body text)
    pub body_size: f32,
    /// Number of fragments observed
    pub fragment_count: usize,
}

impl DocumentStats {
    /// Compute statistics over `fragments`, or `None` if there are none.
    pub fn from_fragments<'a, I>(fragments: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a TextFragment>,
    {
        let mut max_size = f32::MIN;
        let mut total = 0.0f64;
        let mut count = 0usize;
        // Sizes rounded to 0.1pt
        let mut histogram: HashMap<i32, usize> = HashMap::new();

        for fragment in fragments {
            max_size = max_size.max(fragment.size);
            total += fragment.size as f64;
            count += 1;
            *histogram
                .entry((fragment.size * 10.0).round() as i32)
                .or_insert(0) += 1;
        }

        if count == 0 {
            return None;
        }

        // Ties go to the larger size so the result does not depend on map order.
        let body_key = histogram
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)))
            .map(|(key, _)| *key)
            .unwrap_or(0);

        Some(Self {
            max_size,
            avg_size: (total / count as f64) as f32,
            body_size: body_key as f32 / 10.0,
            fragment_count: count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn sized(size: f32) -> TextFragment {
        TextFragment::new("x", size, 0, 0, BBox::default())
    }

    #[test]
    fn test_empty_has_no_stats() {
        let fragments: Vec<TextFragment> = Vec::new();
        assert!(DocumentStats::from_fragments(&fragments).is_none());
    }

    #[test]
    fn test_document_stats() {
        let mut fragments: Vec<TextFragment> = (0..8).map(|_| sized(10.0)).collect();
        fragments.push(sized(24.0));
        fragments.push(sized(16.0));

        let stats = DocumentStats::from_fragments(&fragments).unwrap();
        assert_eq!(stats.max_size, 24.0);
        assert!((stats.avg_size - 12.0).abs() < 1e-4);
        assert!((stats.body_size - 10.0).abs() < 1e-4);
        assert_eq!(stats.fragment_count, 10);
    }
}
