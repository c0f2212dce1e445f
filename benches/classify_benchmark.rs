//! Benchmarks for heading classification, segmentation and ranking.
//!
//! Run with: cargo bench
//!
//! Fragment streams are synthetic: a heading every few lines over a body of
//! regular text, spread across pages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pdfoutline::model::FLAG_BOLD;
use pdfoutline::{BBox, FragmentStream, Pipeline, RelevanceRanker, TextFragment};

/// Creates a synthetic document with the given number of pages.
fn create_stream(page_count: u32) -> FragmentStream {
    let pages = (0..page_count)
        .map(|page| {
            (0..40u32)
                .map(|line| {
                    let y = 60.0 + line as f32 * 16.0;
                    let bbox = BBox::new(72.0, y, 500.0, y + 12.0);
                    match line % 10 {
                        0 => TextFragment::new(format!("Chapter {} Overview", page), 24.0, 0, page, bbox),
                        5 => TextFragment::new(format!("Topic {}.{}", page, line), 12.0, FLAG_BOLD, page, bbox),
                        _ => TextFragment::new(
                            format!("Line {} of page {} describes travel plans and budgets.", line, page),
                            11.0,
                            0,
                            page,
                            bbox,
                        ),
                    }
                })
                .collect()
        })
        .collect();
    FragmentStream::from_pages(pages)
}

/// Benchmark outline extraction at various sizes.
fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    let pipeline = Pipeline::new();

    for page_count in [1, 10, 50] {
        let stream = create_stream(page_count);
        group.bench_with_input(BenchmarkId::from_parameter(page_count), &stream, |b, stream| {
            b.iter(|| pipeline.outline_from_stream(black_box(stream)));
        });
    }

    group.finish();
}

/// Benchmark section segmentation.
fn bench_segmentation(c: &mut Criterion) {
    let pipeline = Pipeline::new();
    let stream = create_stream(20);

    c.bench_function("segment_20_pages", |b| {
        b.iter(|| pipeline.sections_from_stream(black_box(&stream)));
    });
}

/// Benchmark ranking across a collection.
fn bench_ranking(c: &mut Criterion) {
    let pipeline = Pipeline::new();
    let documents: Vec<_> = (0..10)
        .map(|d| (format!("doc{}.pdf", d), pipeline.sections_from_stream(&create_stream(5))))
        .collect();
    let ranker = RelevanceRanker::new();

    c.bench_function("rank_10_documents", |b| {
        b.iter(|| ranker.rank("Travel Planner", "Plan a trip on a budget", black_box(documents.clone())));
    });
}

criterion_group!(benches, bench_outline, bench_segmentation, bench_ranking);
criterion_main!(benches);
