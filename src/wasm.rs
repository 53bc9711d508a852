// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the static export viewer.
//!
//! The viewer registers each document's chapters at page load and then
//! searches them from the search box. Library search reports through two
//! callbacks, which the viewer forwards to its event bus as
//! `SEARCH_PROGRESS` and `SEARCH_COMPLETED`.
//!
//! # Callback API
//!
//! ```js
//! const exp = new MarkfindExport();
//! exp.addSearchContent("doc1", chapters);
//! exp.searchLibrary("keyword",
//!     (progress) => fire("SEARCH_PROGRESS", progress),
//!     (result) => fire("SEARCH_COMPLETED", result));
//! ```

use js_sys::Function;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::corpus::Corpus;
use crate::export::HtmlExport;
use crate::library::{LibrarySearcher, SearchListener};
use crate::query::SearchQuery;
use crate::types::{Content, SearchEvent};

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Accept either a bare string or a `{query, filter, type}` object.
fn parse_query(value: JsValue) -> Result<SearchQuery, JsValue> {
    match value.as_string() {
        Some(text) => Ok(SearchQuery::new(text)),
        None => from_value(value).map_err(to_js_error),
    }
}

/// Forwards progress and completion to JS, keeping the first JS error.
struct JsListener<'f> {
    on_progress: &'f Function,
    on_completed: &'f Function,
    error: Option<JsValue>,
}

impl SearchListener for JsListener<'_> {
    fn on_event(&mut self, event: SearchEvent<'_>) {
        if self.error.is_some() {
            return;
        }
        let (callback, payload) = match event {
            SearchEvent::Started => return,
            SearchEvent::Progress(r) => (self.on_progress, r),
            SearchEvent::Completed(r) => (self.on_completed, r),
        };
        let result = to_value(payload)
            .map_err(to_js_error)
            .and_then(|js| callback.call1(&JsValue::NULL, &js));
        if let Err(e) = result {
            self.error = Some(e);
        }
    }
}

/// Corpus plus search entry points, owned by the page.
#[wasm_bindgen]
#[derive(Default)]
pub struct MarkfindExport {
    corpus: Corpus,
}

#[wasm_bindgen]
impl MarkfindExport {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the chapters (`Content[]`) of document `id`.
    #[wasm_bindgen(js_name = "addSearchContent")]
    pub fn add_search_content(&mut self, id: &str, contents: JsValue) -> Result<(), JsValue> {
        let contents: Vec<Content> = from_value(contents).map_err(to_js_error)?;
        self.corpus.add_search_content(id, contents);
        Ok(())
    }

    /// Search one document. Returns `{completed, rate, title, chapters, count}`.
    pub fn search(&self, id: &str, query: JsValue) -> Result<JsValue, JsValue> {
        let query = parse_query(query)?;
        let result = HtmlExport::new(&self.corpus).search(id, &query);
        to_value(&result).map_err(to_js_error)
    }

    /// Search every document as one result.
    #[wasm_bindgen(js_name = "searchAll")]
    pub fn search_all(&self, query: JsValue) -> Result<JsValue, JsValue> {
        let query = parse_query(query)?;
        let result = HtmlExport::new(&self.corpus).search_all(&query);
        to_value(&result).map_err(to_js_error)
    }

    /// Search each document in turn, calling `on_progress` after each and
    /// `on_completed` once at the end. Returns the final payload.
    #[wasm_bindgen(js_name = "searchLibrary")]
    pub fn search_library(
        &self,
        query: JsValue,
        on_progress: &Function,
        on_completed: &Function,
    ) -> Result<JsValue, JsValue> {
        let query = parse_query(query)?;
        let mut listener = JsListener {
            on_progress,
            on_completed,
            error: None,
        };
        let response = LibrarySearcher::new(&self.corpus).search(&query, &mut listener);
        if let Some(e) = listener.error {
            return Err(e);
        }
        to_value(&response).map_err(to_js_error)
    }

    #[wasm_bindgen(getter, js_name = "documentCount")]
    pub fn document_count(&self) -> usize {
        self.corpus.len()
    }
}
