//! Library search: event order, progress rates, and the blank-query reset.

use super::common::{make_corpus, query, sample_corpus};
use markfind::{
    Corpus, EventLog, HtmlExport, LibraryResponse, LibrarySearcher, RecordedEvent, SearchEvent,
};

fn run(corpus: &Corpus, text: &str) -> (LibraryResponse, EventLog) {
    let mut log = EventLog::default();
    let response = LibrarySearcher::new(corpus).search(&query(text), &mut log);
    (response, log)
}

fn progress_rates(log: &EventLog) -> Vec<u8> {
    log.events()
        .iter()
        .filter_map(|e| match e {
            RecordedEvent::Progress(r) => Some(r.rate),
            _ => None,
        })
        .collect()
}

#[test]
fn test_event_order() {
    let corpus = sample_corpus();
    let (response, log) = run(&corpus, "rust");

    let events = log.events();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0], RecordedEvent::Started);
    assert!(events[1..4]
        .iter()
        .all(|e| matches!(e, RecordedEvent::Progress(_))));
    assert_eq!(events[4], RecordedEvent::Completed(response.clone()));
    assert_eq!(log.completed(), Some(&response));
}

#[test]
fn test_progress_rates() {
    let corpus = sample_corpus();
    let (response, log) = run(&corpus, "rust");
    assert_eq!(progress_rates(&log), vec![33, 66, 99]);
    assert!(response.completed);
    assert_eq!(response.rate, 100);
}

#[test]
fn test_progress_payload_grows_one_subwork_at_a_time() {
    let corpus = sample_corpus();
    let (_, log) = run(&corpus, "rust");
    let sizes: Vec<usize> = log
        .events()
        .iter()
        .filter_map(|e| match e {
            RecordedEvent::Progress(r) => Some(r.subworks.len()),
            _ => None,
        })
        .collect();
    assert_eq!(sizes, vec![1, 2, 3]);
}

#[test]
fn test_subworks_follow_corpus_order() {
    let corpus = sample_corpus();
    let (response, _) = run(&corpus, "rust");
    let ids: Vec<_> = response
        .subworks
        .iter()
        .map(|s| s.id.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["guide", "notes", "reference"]);
    let counts: Vec<_> = response.subworks.iter().map(|s| s.count).collect();
    assert_eq!(counts, vec![2, 0, 2]);
}

#[test]
fn test_subworks_match_document_search() {
    let corpus = sample_corpus();
    let export = HtmlExport::new(&corpus);
    let (response, _) = run(&corpus, "rust");
    for subwork in &response.subworks {
        let id = subwork.id.as_deref().unwrap_or_default();
        let single = export.search(id, &query("rust"));
        assert_eq!(subwork.chapters, single.chapters);
        assert_eq!(subwork.count, single.count);
    }
}

#[test]
fn test_blank_query_resets() {
    let corpus = sample_corpus();
    for text in ["", "   ", "\t\n"] {
        let (response, log) = run(&corpus, text);
        assert!(response.is_reset());
        assert_eq!(
            log.events(),
            &[
                RecordedEvent::Started,
                RecordedEvent::Completed(LibraryResponse::reset())
            ]
        );
    }
}

#[test]
fn test_query_is_trimmed() {
    let corpus = sample_corpus();
    let (padded, _) = run(&corpus, "  rust \n");
    let (plain, _) = run(&corpus, "rust");
    assert_eq!(padded, plain);
}

#[test]
fn test_empty_corpus_completes_without_progress() {
    let corpus = Corpus::new();
    let (response, log) = run(&corpus, "rust");
    assert!(response.completed);
    assert_eq!(response.rate, 100);
    assert_eq!(log.events().len(), 2);
    assert!(progress_rates(&log).is_empty());
}

#[test]
fn test_closure_listener_sees_event_names() {
    let corpus = make_corpus(&[("a", &["x"]), ("b", &["y"])]);
    let mut names = Vec::new();
    let mut listener = |event: SearchEvent<'_>| names.push(event.name());
    LibrarySearcher::new(&corpus).search(&query("x"), &mut listener);
    assert_eq!(
        names,
        vec![
            "SEARCH_STARTED",
            "SEARCH_PROGRESS",
            "SEARCH_PROGRESS",
            "SEARCH_COMPLETED"
        ]
    );
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let corpus = sample_corpus();
    let mut sequential = EventLog::default();
    let mut parallel = EventLog::default();
    LibrarySearcher::new(&corpus).search(&query("rust"), &mut sequential);
    LibrarySearcher::new(&corpus)
        .parallel(true)
        .search(&query("rust"), &mut parallel);
    assert_eq!(sequential.events(), parallel.events());
}
