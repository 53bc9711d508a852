// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::LoadError;

/// Name of the manifest inside a corpus directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Manifest format this crate reads.
pub const MANIFEST_VERSION: u32 = 1;

/// `manifest.json`: which documents make up the corpus, in order.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CorpusManifest {
    pub version: u32,
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

/// One document: its id and the JSON file holding its chapters.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DocumentEntry {
    pub id: String,
    pub file: String,
}

impl CorpusManifest {
    /// Reject unknown versions and duplicate document ids.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.version != MANIFEST_VERSION {
            return Err(LoadError::UnsupportedVersion {
                found: self.version,
                expected: MANIFEST_VERSION,
            });
        }
        let mut seen = HashSet::with_capacity(self.documents.len());
        for entry in &self.documents {
            if !seen.insert(entry.id.as_str()) {
                return Err(LoadError::DuplicateDocument(entry.id.clone()));
            }
        }
        Ok(())
    }
}
