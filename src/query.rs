// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search requests as the viewer sends them.
//!
//! A request carries the raw text plus optional filters. The in-memory path
//! only honours one filter option, `base: ["caseSensitive"]`; everything else
//! (`anyWord`, type filters, `type`) belongs to the server-backed search and
//! is passed through without effect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter group holding the matching switches.
pub const BASE_FILTER: &str = "base";

/// Option value in [`BASE_FILTER`] that turns on exact-case matching.
pub const CASE_SENSITIVE: &str = "caseSensitive";

/// A search request: `{query, filter?, type?}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Add `value` to filter group `id`.
    pub fn with_filter(mut self, id: &str, value: &str) -> Self {
        self.filter
            .get_or_insert_with(BTreeMap::new)
            .entry(id.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Shorthand for `with_filter(BASE_FILTER, CASE_SENSITIVE)`.
    pub fn case_sensitive(self) -> Self {
        self.with_filter(BASE_FILTER, CASE_SENSITIVE)
    }

    fn has_filter(&self, id: &str, value: &str) -> bool {
        self.filter
            .as_ref()
            .and_then(|f| f.get(id))
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Matching options this request asks for.
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            case_sensitive: self.has_filter(BASE_FILTER, CASE_SENSITIVE),
        }
    }
}

/// Switches that change how characters are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
}
