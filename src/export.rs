// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search over a corpus of exported documents.
//!
//! [`HtmlExport`] fans one request out over the chapters of a document, of
//! the whole corpus, or of every document in turn (a library search). Each
//! request gets its own [`Finder`], so concurrent searches share nothing but
//! the read-only corpus.
//!
//! ## Library progress
//!
//! `search_library` is a synchronous loop. The `Progress` events it fires
//! exist so a viewer can update per-document counts as they arrive; they are
//! not yield points. The event sequence is fixed:
//!
//! ```text
//! Progress(rate₁) … Progress(rateₙ)  Completed(100)
//! rate₁ ≤ … ≤ rateₙ ≤ 99
//! ```
//!
//! With the `parallel` feature, `search_library_parallel` computes the
//! per-document results on the rayon pool first and then replays the same
//! sequence in corpus order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::corpus::Corpus;
use crate::finder::Finder;
use crate::library::SearchListener;
use crate::query::SearchQuery;
use crate::types::{Content, DocumentSearch, LibraryResponse, SearchEvent};

/// Highest rate reported before a library search completes.
pub const MAX_PROGRESS_RATE: u8 = 99;

/// Progress after `processed` of `total` documents, capped below 100.
pub fn progress_rate(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = processed.saturating_mul(100) / total;
    percent.min(MAX_PROGRESS_RATE as usize) as u8
}

/// Search front-end over a borrowed [`Corpus`].
#[derive(Debug, Clone, Copy)]
pub struct HtmlExport<'a> {
    corpus: &'a Corpus,
}

impl<'a> HtmlExport<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &'a Corpus {
        self.corpus
    }

    /// Search the chapters of document `id`.
    ///
    /// An empty query returns an empty result without touching the corpus.
    /// An unknown id also returns an empty result.
    pub fn search(&self, id: &str, query: &SearchQuery) -> DocumentSearch {
        if query.query.is_empty() {
            return DocumentSearch::empty();
        }
        let Some(contents) = self.corpus.get(id) else {
            warn!(document = id, "search requested for unregistered document");
            return DocumentSearch::empty();
        };
        let mut finder = Finder::from_query(query);
        let result = search_chapters(&mut finder, contents);
        debug!(document = id, count = result.count, "searched document");
        result
    }

    /// Search every chapter of every document as one result.
    pub fn search_all(&self, query: &SearchQuery) -> DocumentSearch {
        if query.query.is_empty() {
            return DocumentSearch::empty();
        }
        let mut finder = Finder::from_query(query);
        let mut result = DocumentSearch::empty();
        for (_, contents) in self.corpus.iter() {
            let chapters = search_chapters(&mut finder, contents);
            result.count += chapters.count;
            result.chapters.extend(chapters.chapters);
        }
        result
    }

    fn subwork(&self, id: &str, query: &SearchQuery) -> DocumentSearch {
        let mut result = self.search(id, query);
        result.id = Some(id.to_string());
        result
    }

    /// Search each document in turn, reporting progress to `listener`.
    ///
    /// Fires one `Progress` per document and one `Completed`, and returns the
    /// completed response.
    pub fn search_library<L>(&self, query: &SearchQuery, listener: &mut L) -> LibraryResponse
    where
        L: SearchListener + ?Sized,
    {
        let subworks = self.corpus.ids().map(|id| self.subwork(id, query));
        report(subworks, self.corpus.len(), listener)
    }

    /// [`search_library`](Self::search_library) with documents searched in
    /// parallel. Events are identical and still fired in corpus order.
    #[cfg(feature = "parallel")]
    pub fn search_library_parallel<L>(
        &self,
        query: &SearchQuery,
        listener: &mut L,
    ) -> LibraryResponse
    where
        L: SearchListener + ?Sized,
    {
        let ids: Vec<&str> = self.corpus.ids().collect();
        let subworks: Vec<DocumentSearch> = ids
            .par_iter()
            .map(|id| self.subwork(id, query))
            .collect();
        report(subworks, ids.len(), listener)
    }
}

/// Run `finder` over `contents`, keeping chapters with matches.
fn search_chapters(finder: &mut Finder, contents: &[Content]) -> DocumentSearch {
    let mut result = DocumentSearch::empty();
    for content in contents {
        if let Some(chapter) = finder.search(content) {
            result.push(chapter);
        }
    }
    result
}

fn report<I, L>(subworks: I, total: usize, listener: &mut L) -> LibraryResponse
where
    I: IntoIterator<Item = DocumentSearch>,
    L: SearchListener + ?Sized,
{
    let mut response = LibraryResponse::default();
    for (i, subwork) in subworks.into_iter().enumerate() {
        response.rate = progress_rate(i + 1, total);
        response.subworks.push(subwork);
        listener.on_event(SearchEvent::Progress(&response));
    }
    response.completed = true;
    response.rate = 100;
    listener.on_event(SearchEvent::Completed(&response));
    info!(
        documents = total,
        count = response.count(),
        "library search completed"
    );
    response
}
