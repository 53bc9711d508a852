// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shapes that flow in and out of a search.
//!
//! Input is a [`Content`]: one chapter of an exported document, already
//! rendered to HTML fragments. Output is a [`SearchResult`] per chapter,
//! wrapped in a [`DocumentSearch`] per document and a [`LibraryResponse`]
//! when a whole library is searched.
//!
//! Every type serializes to camelCase JSON so the viewer can render the
//! results without a translation layer.
//!
//! # Invariants
//!
//! - **SearchResult**: `count ≥ elements.len()` and `count > 0` whenever the
//!   result is part of a [`DocumentSearch`]. Elements without a match are
//!   dropped, so `elements` is NOT index-aligned with `Content::elements`.
//!
//! - **DocumentSearch**: `count = Σ chapters[i].count`.
//!
//! - **LibraryResponse**: `rate < 100` until `completed`, then exactly `100`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One renderable HTML fragment (paragraph, heading, table, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub text: String,
}

impl Element {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A chapter of an exported document, as registered by the export build.
///
/// `figures`, `tables` and `codes` are side listings the viewer shows in
/// separate tabs. They are carried through untouched and never searched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub part_title: Option<String>,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figures: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codes: Option<Value>,
}

/// Matches inside one chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub part_title: Option<String>,
    pub href: String,
    /// Total matches across all elements of the chapter.
    pub count: usize,
    /// Highlighted HTML of the matching elements only, in source order.
    pub elements: Vec<String>,
}

/// Result of searching one document (or the whole corpus, see
/// [`HtmlExport::search_all`](crate::HtmlExport::search_all)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSearch {
    /// Set when this result is a subwork of a library search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub completed: bool,
    pub rate: u8,
    pub title: String,
    pub chapters: Vec<SearchResult>,
    pub count: usize,
}

impl DocumentSearch {
    /// A finished search with no chapters yet.
    pub fn empty() -> Self {
        Self {
            id: None,
            completed: true,
            rate: 100,
            title: String::new(),
            chapters: Vec::new(),
            count: 0,
        }
    }

    /// Fold a chapter in, skipping chapters without matches.
    pub(crate) fn push(&mut self, chapter: SearchResult) {
        if chapter.count > 0 {
            self.count += chapter.count;
            self.chapters.push(chapter);
        }
    }
}

/// Running aggregate of a library (multi-document) search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryResponse {
    pub completed: bool,
    pub rate: u8,
    pub subworks: Vec<DocumentSearch>,
}

impl LibraryResponse {
    /// Sum of subwork counts.
    pub fn count(&self) -> usize {
        self.subworks.iter().map(|s| s.count).sum()
    }

    /// The payload a cleared search box completes with: not completed,
    /// nothing found. Listeners treat it as "reset the result view".
    pub fn reset() -> Self {
        Self::default()
    }

    /// True for the payload produced by [`LibraryResponse::reset`].
    pub fn is_reset(&self) -> bool {
        !self.completed && self.subworks.is_empty()
    }
}

/// Events fired while a library search runs.
///
/// The order is always `Started`, zero or more `Progress`, one `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent<'a> {
    Started,
    Progress(&'a LibraryResponse),
    Completed(&'a LibraryResponse),
}

impl SearchEvent<'_> {
    /// Event name as the viewer's event bus knows it.
    pub fn name(&self) -> &'static str {
        match self {
            SearchEvent::Started => "SEARCH_STARTED",
            SearchEvent::Progress(_) => "SEARCH_PROGRESS",
            SearchEvent::Completed(_) => "SEARCH_COMPLETED",
        }
    }

    /// The payload, if the event carries one.
    pub fn payload(&self) -> Option<&LibraryResponse> {
        match self {
            SearchEvent::Started => None,
            SearchEvent::Progress(r) | SearchEvent::Completed(r) => Some(r),
        }
    }
}
