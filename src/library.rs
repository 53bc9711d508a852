// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Library search as the search box drives it.
//!
//! The box fires `Started` before any work and treats a `Completed` payload
//! that is not `completed` as "clear the results". A blank query therefore
//! short-circuits to `Started` + reset `Completed` without searching.

use tracing::debug;

use crate::corpus::Corpus;
use crate::export::HtmlExport;
use crate::query::SearchQuery;
use crate::types::{LibraryResponse, SearchEvent};

/// Receives search events.
///
/// Implemented for any `FnMut(SearchEvent)` closure.
pub trait SearchListener {
    fn on_event(&mut self, event: SearchEvent<'_>);
}

impl<F> SearchListener for F
where
    F: FnMut(SearchEvent<'_>),
{
    fn on_event(&mut self, event: SearchEvent<'_>) {
        self(event);
    }
}

/// Owned copy of a [`SearchEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    Started,
    Progress(LibraryResponse),
    Completed(LibraryResponse),
}

impl From<SearchEvent<'_>> for RecordedEvent {
    fn from(event: SearchEvent<'_>) -> Self {
        match event {
            SearchEvent::Started => RecordedEvent::Started,
            SearchEvent::Progress(r) => RecordedEvent::Progress(r.clone()),
            SearchEvent::Completed(r) => RecordedEvent::Completed(r.clone()),
        }
    }
}

/// Listener that keeps every event it sees.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RecordedEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// The final payload, if the search completed.
    pub fn completed(&self) -> Option<&LibraryResponse> {
        self.events.iter().rev().find_map(|e| match e {
            RecordedEvent::Completed(r) => Some(r),
            _ => None,
        })
    }
}

impl SearchListener for EventLog {
    fn on_event(&mut self, event: SearchEvent<'_>) {
        self.events.push(event.into());
    }
}

/// Runs library searches against a corpus.
#[derive(Debug, Clone, Copy)]
pub struct LibrarySearcher<'a> {
    export: HtmlExport<'a>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl<'a> LibrarySearcher<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self {
            export: HtmlExport::new(corpus),
            parallel: false,
        }
    }

    /// Search documents on the rayon pool. Ignored without the `parallel`
    /// feature.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run a library search, firing `Started`, progress, and `Completed`.
    ///
    /// The query text is trimmed first; a blank query completes immediately
    /// with [`LibraryResponse::reset`].
    pub fn search<L>(&self, query: &SearchQuery, listener: &mut L) -> LibraryResponse
    where
        L: SearchListener + ?Sized,
    {
        let text = query.query.trim();
        listener.on_event(SearchEvent::Started);
        if text.is_empty() {
            debug!("blank library query, resetting results");
            let reset = LibraryResponse::reset();
            listener.on_event(SearchEvent::Completed(&reset));
            return reset;
        }

        let query = SearchQuery {
            query: text.to_string(),
            ..query.clone()
        };
        self.run(&query, listener)
    }

    #[cfg(feature = "parallel")]
    fn run<L>(&self, query: &SearchQuery, listener: &mut L) -> LibraryResponse
    where
        L: SearchListener + ?Sized,
    {
        if self.parallel {
            self.export.search_library_parallel(query, listener)
        } else {
            self.export.search_library(query, listener)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run<L>(&self, query: &SearchQuery, listener: &mut L) -> LibraryResponse
    where
        L: SearchListener + ?Sized,
    {
        self.export.search_library(query, listener)
    }
}
