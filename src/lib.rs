// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tag-aware substring search and highlighting for static HTML exports.
//!
//! A static export ships its documents as pre-rendered HTML fragments. This
//! crate searches them in memory: a keyword is matched character by
//! character against the text of each fragment, markup is skipped while
//! matching, and each match is wrapped in `<span class="find">` with the tag
//! nesting around it repaired so the fragment stays well formed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  tracker.rs  │────▶│  finder/     │────▶│  export.rs   │────▶│  library.rs  │
//! │ (TagTracker, │     │ (find,       │     │ (HtmlExport: │     │ (Started /   │
//! │  markup)     │     │  search)     │     │  per doc,    │     │  Progress /  │
//! └──────────────┘     └──────────────┘     │  library)    │     │  Completed)  │
//!                                           └──────────────┘     └──────────────┘
//!                                                  ▲
//!                                           ┌──────────────┐
//!                                           │  corpus.rs   │◀──── load/ (manifest.json)
//!                                           └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use markfind::{Content, Corpus, Element, HtmlExport, SearchQuery};
//!
//! let mut corpus = Corpus::new();
//! corpus.add_search_content("doc1", vec![Content {
//!     id: "doc1".into(),
//!     title: "T".into(),
//!     elements: vec![Element::new("<p>Hello World</p>")],
//!     ..Default::default()
//! }]);
//!
//! let result = HtmlExport::new(&corpus).search("doc1", &SearchQuery::new("world"));
//! assert_eq!(result.count, 1);
//! assert_eq!(
//!     result.chapters[0].elements[0],
//!     r#"<p>Hello <span class="find">World</span></p>"#
//! );
//! ```

pub mod corpus;
pub mod export;
pub mod finder;
pub mod library;
pub mod load;
pub mod query;
pub mod testing;
pub mod types;

#[cfg(feature = "wasm")]
mod wasm;

pub use corpus::Corpus;
pub use export::{progress_rate, HtmlExport, MAX_PROGRESS_RATE};
pub use finder::{Finder, MatchState, Signal, TagTracker, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};
pub use library::{EventLog, LibrarySearcher, RecordedEvent, SearchListener};
pub use load::{load_corpus, CorpusManifest, DocumentEntry, LoadError};
pub use query::{SearchOptions, SearchQuery};
pub use types::{
    Content, DocumentSearch, Element, LibraryResponse, SearchEvent, SearchResult,
};
