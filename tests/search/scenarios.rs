//! End-to-end scenarios for the search core.

use super::common::{assert_balanced, make_content, make_corpus, query, sample_corpus};
use markfind::{Corpus, Element, EventLog, Finder, HtmlExport, LibrarySearcher, SearchQuery};

#[test]
fn test_case_insensitive_by_default() {
    let mut finder = Finder::new("WORD");
    finder.find("a word here");
    assert_eq!(finder.count(), 1);

    let corpus = make_corpus(&[("d", &["a word here"])]);
    let export = HtmlExport::new(&corpus);
    assert_eq!(export.search("d", &query("WORD")).count, 1);
    assert_eq!(export.search("d", &query("WORD").case_sensitive()).count, 0);
    assert_eq!(export.search("d", &query("word").case_sensitive()).count, 1);
}

#[test]
fn test_tag_spanning_match_stays_balanced() {
    let corpus = make_corpus(&[("d", &["<p>wo<b>rd</b></p>"])]);
    let result = HtmlExport::new(&corpus).search("d", &query("word"));
    assert_eq!(result.count, 1);
    let html = &result.chapters[0].elements[0];
    assert!(html.contains(r#"<span class="find">"#));
    assert_balanced(html);
}

#[test]
fn test_no_match_leaves_fragment_unchanged() {
    let mut finder = Finder::new("xyz");
    assert_eq!(finder.find("hello world"), "hello world");
    assert_eq!(finder.count(), 0);
}

#[test]
fn test_markup_in_query_cannot_alter_structure() {
    let fragment = "x <b>y</b>";
    let mut finder = Finder::new("<b>");
    assert_eq!(finder.keyword(), "&lt;b&gt;");
    assert_eq!(finder.find(fragment), fragment);
    assert_eq!(finder.count(), 0);
}

#[test]
fn test_reset_between_fragments() {
    let first = "one <i>match</i> here";
    let second = "match, match";

    let mut shared = Finder::new("match");
    shared.find(first);
    shared.reset();
    shared.find(second);

    let mut fresh = Finder::new("match");
    fresh.find(second);
    assert_eq!(shared.count(), fresh.count());
    assert_eq!(shared.count(), 2);
}

#[test]
fn test_reset_clears_partial_match() {
    let mut finder = Finder::new("abc");
    finder.find("xab");
    finder.reset();
    assert_eq!(finder.find("c"), "c");
    assert_eq!(finder.count(), 0);
}

#[test]
fn test_aggregate_counts_are_sums() {
    let corpus = sample_corpus();
    let export = HtmlExport::new(&corpus);

    let all = export.search_all(&query("rust"));
    assert_eq!(all.count, all.chapters.iter().map(|c| c.count).sum::<usize>());
    assert_eq!(all.count, 4);

    let mut log = EventLog::default();
    let library = LibrarySearcher::new(&corpus).search(&query("rust"), &mut log);
    assert_eq!(library.count(), library.subworks.iter().map(|s| s.count).sum::<usize>());
    assert_eq!(library.count(), all.count);
    for subwork in &library.subworks {
        assert_eq!(
            subwork.count,
            subwork.chapters.iter().map(|c| c.count).sum::<usize>()
        );
    }
}

#[test]
fn test_empty_query_short_circuits() {
    let corpus = sample_corpus();
    let export = HtmlExport::new(&corpus);
    for id in ["guide", "notes", "reference", "unknown"] {
        let result = export.search(id, &query(""));
        assert_eq!(result.count, 0);
        assert!(result.chapters.is_empty());
    }
    assert_eq!(export.search_all(&query("")).count, 0);
}

#[test]
fn test_end_to_end_single_document() {
    let mut corpus = Corpus::new();
    corpus.add_search_content(
        "doc1",
        vec![markfind::Content {
            id: "doc1".to_string(),
            title: "T".to_string(),
            elements: vec![Element::new("<p>Hello World</p>")],
            ..Default::default()
        }],
    );

    let result = HtmlExport::new(&corpus).search("doc1", &SearchQuery::new("world"));
    assert_eq!(result.count, 1);
    assert_eq!(result.chapters.len(), 1);
    let chapter = &result.chapters[0];
    assert_eq!(chapter.id, "doc1");
    assert_eq!(chapter.title, "T");
    assert_eq!(chapter.count, 1);
    assert_eq!(
        chapter.elements,
        vec![r#"<p>Hello <span class="find">World</span></p>"#.to_string()]
    );
}

#[test]
fn test_chapters_without_matches_are_dropped() {
    let corpus: Corpus = [(
        "d",
        vec![
            make_content("c1", "One", &["nothing"]),
            make_content("c2", "Two", &["something"]),
        ],
    )]
    .into_iter()
    .collect();
    let result = HtmlExport::new(&corpus).search("d", &query("some"));
    assert_eq!(result.chapters.len(), 1);
    assert_eq!(result.chapters[0].id, "c2");
}
