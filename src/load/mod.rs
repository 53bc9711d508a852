// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading a corpus from an export directory.
//!
//! The export build writes one JSON file per document (an array of
//! chapters) plus a `manifest.json` listing them. Loading reads the manifest,
//! parses the document files (in parallel with the `parallel` feature), and
//! registers them in manifest order.
//!
//! ```text
//! export/
//! ├── manifest.json   {"version": 1, "documents": [{"id": "guide", "file": "guide.json"}]}
//! └── guide.json      [{"id": "c1", "title": "...", "elements": [{"text": "<p>..</p>"}]}]
//! ```

pub mod manifest;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::corpus::Corpus;
use crate::types::Content;

pub use manifest::{CorpusManifest, DocumentEntry, MANIFEST_FILE, MANIFEST_VERSION};

/// Why a corpus could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported manifest version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("document id '{0}' listed more than once")]
    DuplicateDocument(String),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and validate `dir/manifest.json`.
pub fn read_manifest(dir: &Path) -> Result<CorpusManifest, LoadError> {
    let manifest: CorpusManifest = read_json(&dir.join(MANIFEST_FILE))?;
    manifest.validate()?;
    Ok(manifest)
}

/// Parse one document file into its chapters.
pub fn load_document(dir: &Path, entry: &DocumentEntry) -> Result<Vec<Content>, LoadError> {
    read_json(&dir.join(&entry.file))
}

fn assemble(
    manifest: &CorpusManifest,
    documents: Vec<Vec<Content>>,
) -> Corpus {
    let corpus: Corpus = manifest
        .documents
        .iter()
        .map(|entry| entry.id.as_str())
        .zip(documents)
        .collect();
    info!(
        documents = corpus.len(),
        chapters = corpus.chapter_count(),
        "loaded corpus"
    );
    corpus
}

/// Load every document listed in `dir/manifest.json`.
#[cfg(feature = "parallel")]
pub fn load_corpus(dir: &Path) -> Result<Corpus, LoadError> {
    let manifest = read_manifest(dir)?;
    let documents = manifest
        .documents
        .par_iter()
        .map(|entry| load_document(dir, entry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(&manifest, documents))
}

/// Load every document listed in `dir/manifest.json`.
#[cfg(not(feature = "parallel"))]
pub fn load_corpus(dir: &Path) -> Result<Corpus, LoadError> {
    let manifest = read_manifest(dir)?;
    let documents = manifest
        .documents
        .iter()
        .map(|entry| load_document(dir, entry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(&manifest, documents))
}

/// [`load_corpus`] advancing `progress` once per document.
#[cfg(feature = "parallel")]
pub fn load_corpus_with_progress(dir: &Path, progress: &ProgressBar) -> Result<Corpus, LoadError> {
    let manifest = read_manifest(dir)?;
    progress.set_length(manifest.documents.len() as u64);
    let documents = manifest
        .documents
        .par_iter()
        .map(|entry| {
            let doc = load_document(dir, entry)?;
            progress.inc(1);
            Ok(doc)
        })
        .collect::<Result<Vec<_>, LoadError>>()?;
    Ok(assemble(&manifest, documents))
}
