// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The set of documents a static export can search.
//!
//! Each document id maps to its chapters. The export build registers
//! everything once at load time; searches only read. A `Corpus` is a plain
//! value, so tests and embedders can hold as many independent ones as they
//! like.

use std::collections::HashMap;

use tracing::debug;

use crate::types::Content;

/// Documents registered for in-memory search, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<(String, Vec<Content>)>,
    positions: HashMap<String, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the chapters of document `id`.
    ///
    /// Registering an id again replaces its chapters but keeps its position.
    pub fn add_search_content(&mut self, id: impl Into<String>, contents: Vec<Content>) {
        let id = id.into();
        debug!(document = %id, chapters = contents.len(), "registered search content");
        match self.positions.get(&id) {
            Some(&pos) => self.documents[pos].1 = contents,
            None => {
                self.positions.insert(id.clone(), self.documents.len());
                self.documents.push((id, contents));
            }
        }
    }

    /// Chapters of document `id`.
    pub fn get(&self, id: &str) -> Option<&[Content]> {
        self.positions
            .get(id)
            .map(|&pos| self.documents[pos].1.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// `(id, chapters)` pairs in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[Content])> {
        self.documents
            .iter()
            .map(|(id, contents)| (id.as_str(), contents.as_slice()))
    }

    /// Document ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|(id, _)| id.as_str())
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of chapters across all documents.
    pub fn chapter_count(&self) -> usize {
        self.documents.iter().map(|(_, c)| c.len()).sum()
    }

    /// Number of elements across all chapters.
    pub fn element_count(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|(_, c)| c.iter())
            .map(|c| c.elements.len())
            .sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Content>)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Content>)>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for (id, contents) in iter {
            corpus.add_search_content(id, contents);
        }
        corpus
    }
}
