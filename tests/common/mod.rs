//! Shared test utilities and fixtures.

#![allow(dead_code)]

use markfind::{Content, Corpus, SearchQuery};

// Re-export canonical test utilities from markfind::testing
pub use markfind::testing::{highlights, make_content, make_corpus, text_of};

// ============================================================================
// FIXTURES
// ============================================================================

/// A three-document corpus with matches spread unevenly across documents.
///
/// "rust" appears 4 times: twice in `guide`, never in `notes`, twice in
/// `reference` (once across a tag boundary).
pub fn sample_corpus() -> Corpus {
    let mut corpus = Corpus::new();
    corpus.add_search_content(
        "guide",
        vec![
            make_content(
                "g1",
                "Getting started",
                &["<h1>Rust guide</h1>", "<p>Install the toolchain.</p>"],
            ),
            make_content("g2", "Ownership", &["<p>Borrowing in <em>Rust</em></p>"]),
        ],
    );
    corpus.add_search_content(
        "notes",
        vec![make_content("n1", "Notes", &["<p>Nothing to see.</p>"])],
    );
    corpus.add_search_content(
        "reference",
        vec![Content {
            part_title: Some("Part I".to_string()),
            ..make_content(
                "r1",
                "Reference",
                &["<p>ru<b>st</b> and rust</p>", "<p>no match</p>"],
            )
        }],
    );
    corpus
}

pub fn query(text: &str) -> SearchQuery {
    SearchQuery::new(text)
}

// ============================================================================
// ASSERTIONS
// ============================================================================

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Assert every non-void tag in `html` is closed in the order it was opened.
pub fn assert_balanced(html: &str) {
    let mut stack: Vec<String> = Vec::new();
    let mut rest = html;
    while let Some(lt) = rest.find('<') {
        let Some(gt) = rest[lt..].find('>') else {
            break;
        };
        let body = &rest[lt + 1..lt + gt];
        rest = &rest[lt + gt + 1..];
        if body.starts_with('!') || body.ends_with('/') {
            continue;
        }
        if let Some(name) = body.strip_prefix('/') {
            let name = name.trim().to_ascii_lowercase();
            assert_eq!(
                stack.pop().as_deref(),
                Some(name.as_str()),
                "unbalanced </{}> in {}",
                name,
                html
            );
        } else {
            let name = body
                .split(|c: char| c.is_whitespace())
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            if !VOID.contains(&name.as_str()) {
                stack.push(name);
            }
        }
    }
    assert!(stack.is_empty(), "unclosed tags {:?} in {}", stack, html);
}
