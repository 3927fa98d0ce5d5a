//! Benchmarks for structure-inference performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic in-memory documents so they measure the
//! inference pipeline, not PDF parsing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfoutline::{analyze, BoundingBox, MemorySource, PageContent, RawLine, RawRun};

fn line(text: &str, y0: f32, size: f32, font: &str) -> RawLine {
    RawLine {
        runs: vec![RawRun {
            text: text.to_string(),
            bbox: BoundingBox::new(60.0, y0, 60.0 + text.len() as f32 * size * 0.5, y0 + size),
            font_name: font.to_string(),
            font_size: size,
        }],
    }
}

/// A synthetic report: title page, repeating footer, headings every few
/// paragraphs.
fn synthetic_document(page_count: usize) -> MemorySource {
    let mut source = MemorySource::new();

    let mut title_page = vec![
        line("Synthetic Benchmark Report", 90.0, 28.0, "Helvetica-Bold"),
        line("Generated for performance measurement", 140.0, 12.0, "Helvetica"),
    ];
    title_page.push(line("Benchmark Fixtures Inc", 770.0, 8.0, "Helvetica"));
    source.push_page(PageContent {
        number: 0,
        width: 612.0,
        height: 792.0,
        lines: title_page,
    });

    for p in 1..page_count {
        let mut lines = Vec::with_capacity(42);
        lines.push(line(
            &format!("{}. Section Heading {}", p, p),
            60.0,
            16.0,
            "Helvetica-Bold",
        ));
        for i in 0..38 {
            lines.push(line(
                &format!("Body paragraph text line number {} on this page", i),
                90.0 + i as f32 * 16.0,
                10.0,
                "Helvetica",
            ));
        }
        lines.push(line("Benchmark Fixtures Inc", 770.0, 8.0, "Helvetica"));
        source.push_page(PageContent {
            number: 0,
            width: 612.0,
            height: 792.0,
            lines,
        });
    }

    source
}

fn bench_analyze(c: &mut Criterion) {
    let small = synthetic_document(5);
    let large = synthetic_document(50);

    c.bench_function("analyze_5_pages", |b| {
        b.iter(|| analyze(black_box(&small)).unwrap())
    });

    c.bench_function("analyze_50_pages", |b| {
        b.iter(|| analyze(black_box(&large)).unwrap())
    });
}

fn bench_coherence_filter(c: &mut Criterion) {
    let samples = [
        "This is a perfectly ordinary sentence of body text",
        "xxxxxxxxxxxxxxxxxxxx",
        "a b c d e f g h",
        "1.2 Methodology .......... 14",
    ];

    c.bench_function("coherence_filter", |b| {
        b.iter(|| {
            for s in &samples {
                black_box(pdfoutline::analysis::is_coherent_text(black_box(s)));
            }
        })
    });
}

criterion_group!(benches, bench_analyze, bench_coherence_filter);
criterion_main!(benches);
