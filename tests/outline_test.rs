//! Integration tests for heading classification and outline assembly.

use pdfoutline::analysis::DocumentStats;
use pdfoutline::model::FLAG_BOLD;
use pdfoutline::{
    outline_from_stream, BBox, ClassifierConfig, FragmentStream, HeadingClassifier, HeadingLevel,
    Lexicon, OutlineOptions, Pipeline, TextFragment, TitlePolicy,
};

fn frag(text: &str, size: f32, flags: u32, page: u32, y: f32) -> TextFragment {
    TextFragment::new(text, size, flags, page, BBox::new(72.0, y, 400.0, y + size))
}

fn report_stream() -> FragmentStream {
    FragmentStream::from_pages(vec![
        vec![
            frag("Annual Report 2024", 28.0, 0, 0, 60.0),
            frag("Prepared for the board of directors and shareholders.", 11.0, 0, 0, 120.0),
            frag("•••••••••••", 11.0, 0, 0, 140.0),
            frag("Executive Summary", 22.0, FLAG_BOLD, 0, 180.0),
            frag("the following items are listed below.", 20.0, 0, 0, 200.0),
            frag("Revenue grew in every region this year.", 11.0, 0, 0, 220.0),
        ],
        vec![
            frag("REGIONAL RESULTS", 18.0, 0, 1, 60.0),
            frag("Key Metrics", 12.0, FLAG_BOLD, 1, 100.0),
            frag("1. Growth was strong.", 20.0, 0, 1, 120.0),
            frag("Goals:", 20.0, 0, 1, 140.0),
            frag("Executive Summary", 22.0, FLAG_BOLD, 1, 160.0),
            frag("Margins improved as costs fell.", 11.0, 0, 1, 200.0),
        ],
        Vec::new(),
    ])
}

#[test]
fn test_outline_levels_and_order() {
    let entries = outline_from_stream(&report_stream());
    let summary: Vec<(HeadingLevel, &str, u32)> = entries
        .iter()
        .map(|e| (e.level, e.text.as_str(), e.page))
        .collect();

    assert_eq!(
        summary,
        vec![
            (HeadingLevel::H1, "Annual Report 2024", 0),
            (HeadingLevel::H2, "Executive Summary", 0),
            (HeadingLevel::H2, "REGIONAL RESULTS", 1),
        ]
    );
}

#[test]
fn test_single_dominant_size_is_all_h1() {
    let stream = FragmentStream::from_pages(vec![vec![
        frag("Chapter One", 14.0, 0, 0, 10.0),
        frag("Chapter Two", 14.0, 0, 0, 40.0),
        frag("Chapter Three", 14.0, 0, 0, 70.0),
    ]]);

    let entries = outline_from_stream(&stream);
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.level == HeadingLevel::H1));
}

#[test]
fn test_introduction_at_max_size() {
    let classifier = HeadingClassifier::new();
    let heading = frag("INTRODUCTION", 24.0, 0, 0, 10.0);
    let body = frag("Some body text here", 10.0, 0, 0, 40.0);
    let stats = DocumentStats::from_fragments([&heading, &body]).unwrap();

    assert_eq!(classifier.classify(&heading, &stats), Some(HeadingLevel::H1));
}

#[test]
fn test_discourse_sentence_rejected_at_any_size() {
    let classifier = HeadingClassifier::new();
    let sentence = frag("the following items are listed below.", 40.0, FLAG_BOLD, 0, 10.0);
    let stats = DocumentStats::from_fragments([&sentence]).unwrap();

    assert_eq!(classifier.classify(&sentence, &stats), None);
}

#[test]
fn test_outline_is_deterministic() {
    let first = outline_from_stream(&report_stream());
    let second = outline_from_stream(&report_stream());
    assert_eq!(first, second);
}

#[test]
fn test_empty_and_blank_documents() {
    assert!(outline_from_stream(&FragmentStream::new()).is_empty());

    let blank = FragmentStream::from_pages(vec![Vec::new(), vec![frag("   ", 12.0, 0, 1, 0.0)]]);
    assert!(blank.is_empty());
    assert!(outline_from_stream(&blank).is_empty());
}

#[test]
fn test_custom_lexicon_and_config() {
    let stream = FragmentStream::from_pages(vec![vec![
        frag("Appendix Material", 24.0, 0, 0, 10.0),
        frag("Findings Overview", 19.0, 0, 0, 40.0),
    ]]);

    let pipeline = Pipeline::new()
        .with_lexicon(Lexicon::new().with_boilerplate_label("appendix material"))
        .with_classifier_config(ClassifierConfig::new().with_ratios(0.95, 0.9, 0.85));
    let entries = pipeline.outline_from_stream(&stream).entries;

    // 19 / 24 falls below every custom tier
    assert!(entries.is_empty());
}

#[test]
fn test_outline_cap_and_title() {
    let lines: Vec<TextFragment> = (0..20)
        .map(|i| frag(&format!("Chapter Number {}", i), 16.0, 0, 0, i as f32 * 30.0))
        .collect();
    let stream = FragmentStream::from_pages(vec![lines]);

    let pipeline = Pipeline::new()
        .with_outline_options(OutlineOptions::new().with_max_entries(5))
        .with_title_policy(TitlePolicy::new().with_max_chars(10));
    let outline = pipeline.document_outline("book.pdf", Some("A Very Long Title"), &stream);

    assert_eq!(outline.outline.len(), 5);
    assert_eq!(outline.outline[4].text, "Chapter Number 4");
    assert_eq!(outline.title, "");
}
