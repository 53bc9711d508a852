//! Per-document and whole-corpus search through `HtmlExport`.

use super::common::{query, sample_corpus};
use markfind::HtmlExport;

#[test]
fn test_search_is_scoped_to_document() {
    let corpus = sample_corpus();
    let export = HtmlExport::new(&corpus);

    let guide = export.search("guide", &query("rust"));
    assert_eq!(guide.count, 2);
    assert_eq!(
        guide.chapters.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["g1", "g2"]
    );

    let notes = export.search("notes", &query("rust"));
    assert_eq!(notes.count, 0);
    assert!(notes.completed);
    assert_eq!(notes.rate, 100);
}

#[test]
fn test_unknown_document_is_empty() {
    let corpus = sample_corpus();
    let result = HtmlExport::new(&corpus).search("missing", &query("rust"));
    assert_eq!(result.count, 0);
    assert!(result.chapters.is_empty());
    assert!(result.completed);
}

#[test]
fn test_search_all_keeps_corpus_order() {
    let corpus = sample_corpus();
    let result = HtmlExport::new(&corpus).search_all(&query("rust"));
    assert_eq!(
        result.chapters.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["g1", "g2", "r1"]
    );
    assert_eq!(result.id, None);
}

#[test]
fn test_elements_are_not_index_aligned() {
    let corpus = sample_corpus();
    let result = HtmlExport::new(&corpus).search("reference", &query("rust"));
    let chapter = &result.chapters[0];
    // Two source elements, only the first matches.
    assert_eq!(chapter.elements.len(), 1);
    assert_eq!(chapter.count, 2);
    assert_eq!(
        chapter.elements[0],
        r#"<p><span class="find">ru<b>st</b></span><b></b> and <span class="find">rust</span></p>"#
    );
}

#[test]
fn test_chapter_metadata_is_carried() {
    let corpus = sample_corpus();
    let result = HtmlExport::new(&corpus).search("reference", &query("rust"));
    let chapter = &result.chapters[0];
    assert_eq!(chapter.title, "Reference");
    assert_eq!(chapter.part_title.as_deref(), Some("Part I"));
    assert_eq!(chapter.href, "r1.html");
}

#[test]
fn test_result_serializes_camel_case() {
    let corpus = sample_corpus();
    let result = HtmlExport::new(&corpus).search("reference", &query("rust"));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["completed"], true);
    assert_eq!(json["chapters"][0]["partTitle"], "Part I");
    assert!(json.get("id").is_none());
}

#[test]
fn test_filter_round_trip_from_json() {
    let request: markfind::SearchQuery = serde_json::from_str(
        r#"{"query": "RUST", "filter": {"base": ["caseSensitive"]}, "type": "TEXT"}"#,
    )
    .unwrap();
    let corpus = sample_corpus();
    let export = HtmlExport::new(&corpus);
    assert_eq!(export.search_all(&request).count, 0);
    assert_eq!(export.search_all(&query("RUST")).count, 4);
}
