// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tag-aware find-and-highlight over HTML fragments.
//!
//! A [`Finder`] owns one keyword and one [`TagTracker`]. `find` streams a
//! fragment through the tracker and rebuilds it with every match wrapped in
//! `<span class="find">`; `search` does that for every element of a chapter
//! and keeps the ones that matched.
//!
//! Only text characters are compared. Characters between `<` and `>` are
//! copied through, or buffered when a match is in progress, so a match can
//! span inline markup but never starts inside a tag.

pub mod markup;
pub mod tracker;

use tracing::{debug, trace};

use crate::query::{SearchOptions, SearchQuery};
use crate::types::{Content, SearchResult};

pub use markup::{wrap_match, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};
pub use tracker::{MatchState, Signal, TagTracker};

/// Entity normalized to a plain space before scanning.
const NBSP: &str = "&nbsp;";

/// Finds and highlights one keyword.
///
/// A finder is cheap to build and holds mutable match state, so build a
/// fresh one per search request rather than sharing one across threads.
#[derive(Debug, Clone)]
pub struct Finder {
    tracker: TagTracker,
    count: usize,
}

impl Finder {
    /// Case-insensitive finder for `keyword`.
    pub fn new(keyword: &str) -> Self {
        Self::with_options(keyword, SearchOptions::default())
    }

    pub fn with_options(keyword: &str, options: SearchOptions) -> Self {
        Self {
            tracker: TagTracker::new(keyword, options),
            count: 0,
        }
    }

    /// Finder for a viewer request, honouring its case-sensitivity filter.
    pub fn from_query(query: &SearchQuery) -> Self {
        Self::with_options(&query.query, query.options())
    }

    /// The keyword as it is compared: folded and HTML-escaped.
    pub fn keyword(&self) -> String {
        self.tracker.keyword()
    }

    /// Matches found since the last [`reset`](Self::reset).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Clear the match count and any half-finished match.
    pub fn reset(&mut self) {
        self.count = 0;
        self.tracker.reset();
    }

    /// Highlight every match in `fragment`, adding them to [`count`](Self::count).
    ///
    /// Only the first `&nbsp;` is turned into a space. Every other input
    /// character appears in the output unchanged and in order; the only
    /// additions are the highlight span and the tags needed to keep nesting
    /// intact around it.
    pub fn find(&mut self, fragment: &str) -> String {
        if fragment.is_empty() {
            return String::new();
        }
        let fragment = fragment.replacen(NBSP, " ", 1);
        let mut out = String::with_capacity(fragment.len());
        let mut inside_tag = false;

        for c in fragment.chars() {
            if !inside_tag && c == '<' {
                inside_tag = true;
            }
            match self.tracker.add(c, inside_tag) {
                Signal::Add => out.push(c),
                Signal::Ignore => {}
                Signal::Matched => {
                    trace!(span = self.tracker.remaining(), "match");
                    out.push_str(&self.tracker.matched_markup());
                    self.tracker.reset();
                    self.count += 1;
                }
                Signal::Unmatched => {
                    out.push_str(self.tracker.remaining());
                    self.tracker.reset();
                }
            }
            if inside_tag && c == '>' {
                inside_tag = false;
            }
        }

        // A match cut off by the end of the fragment is released as text.
        out.push_str(self.tracker.remaining());
        self.tracker.reset();
        out
    }

    /// Search every element of a chapter.
    ///
    /// Returns `None` for an empty keyword. Otherwise `elements` holds the
    /// highlighted HTML of the elements that matched, in source order; it is
    /// not index-aligned with `content.elements`.
    pub fn search(&mut self, content: &Content) -> Option<SearchResult> {
        if self.tracker.is_empty() {
            return None;
        }
        self.reset();

        let mut count = 0;
        let mut elements = Vec::new();
        for element in &content.elements {
            let html = self.find(&element.text);
            if self.count > 0 {
                count += self.count;
                elements.push(html);
            }
            self.reset();
        }

        debug!(chapter = %content.id, count, "searched chapter");
        Some(SearchResult {
            id: content.id.clone(),
            title: content.title.clone(),
            part_title: content.part_title.clone(),
            href: content.href.clone(),
            count,
            elements,
        })
    }
}
