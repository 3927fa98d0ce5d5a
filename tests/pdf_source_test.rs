//! Integration tests for the lopdf-backed document source.

mod common;

use common::FixtureOptions;
use pdfoutline::{analyze, DocumentClass, DocumentSource, HeadingLevel, PdfSource};

#[test]
fn fixture_page_exposes_positioned_lines() {
    let bytes = common::minimal_pdf(FixtureOptions::default());
    let source = PdfSource::from_bytes(&bytes).unwrap();

    assert_eq!(source.page_count(), 1);
    let page = source.page(1).unwrap();
    assert_eq!(page.width, 612.0);
    assert_eq!(page.height, 792.0);

    let texts: Vec<String> = page.lines.iter().map(|l| l.text()).collect();
    assert!(texts.iter().any(|t| t.contains("Integration Test Report")));
    assert!(texts.iter().any(|t| t.contains("ordinary body text")));

    // The heading run carries its font and size.
    let heading_run = page
        .lines
        .iter()
        .flat_map(|l| &l.runs)
        .find(|r| r.text.contains("Integration Test Report"))
        .unwrap();
    assert_eq!(heading_run.font_name, "Helvetica-Bold");
    assert!((heading_run.font_size - 24.0).abs() < 0.01);

    // Geometry is top-left origin: the heading sits above the body line.
    let body_run = page
        .lines
        .iter()
        .flat_map(|l| &l.runs)
        .find(|r| r.text.contains("ordinary body text"))
        .unwrap();
    assert!(heading_run.bbox.y0 < body_run.bbox.y0);
}

#[test]
fn fixture_metadata_title_is_read() {
    let bytes = common::minimal_pdf(FixtureOptions {
        metadata_title: Some("Embedded Metadata Title"),
        ..Default::default()
    });
    let source = PdfSource::from_bytes(&bytes).unwrap();
    assert_eq!(
        source.metadata_title().as_deref(),
        Some("Embedded Metadata Title")
    );
}

#[test]
fn fixture_without_metadata_has_no_title() {
    let bytes = common::minimal_pdf(FixtureOptions::default());
    let source = PdfSource::from_bytes(&bytes).unwrap();
    assert_eq!(source.metadata_title(), None);
}

#[test]
fn fixture_bookmarks_are_walked() {
    let bytes = common::minimal_pdf(FixtureOptions {
        bookmark: Some("Chapter 1"),
        ..Default::default()
    });
    let source = PdfSource::from_bytes(&bytes).unwrap();

    let bookmarks = source.bookmarks();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].title, "Chapter 1");
    assert_eq!(bookmarks[0].level, 1);
    assert_eq!(bookmarks[0].page, Some(1));
}

#[test]
fn end_to_end_analysis_over_a_real_pdf() {
    let bytes = common::minimal_pdf(FixtureOptions {
        bookmark: Some("Chapter 1"),
        ..Default::default()
    });
    let source = PdfSource::from_bytes(&bytes).unwrap();
    let analysis = analyze(&source).unwrap();

    assert_eq!(analysis.class, DocumentClass::Regular);
    // The bold 24pt line near the top of page 1 wins on prominence.
    assert_eq!(analysis.structure.title, "Integration Test Report");
    // The bookmark table short-circuits the outline chain.
    assert_eq!(analysis.structure.outline.len(), 1);
    assert_eq!(analysis.structure.outline[0].text, "Chapter 1");
    assert_eq!(analysis.structure.outline[0].level, HeadingLevel::H1);
    assert_eq!(analysis.structure.outline[0].page, 1);
}

#[test]
fn page_out_of_range_is_an_error() {
    let bytes = common::minimal_pdf(FixtureOptions::default());
    let source = PdfSource::from_bytes(&bytes).unwrap();
    assert!(source.page(2).is_err());
    assert!(source.page(0).is_err());
}
