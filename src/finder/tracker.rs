// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character-at-a-time keyword matcher.
//!
//! The tracker sees every character of a fragment together with a flag
//! saying whether the character is part of a tag. Tag characters never
//! advance the keyword, but once a match has started they are buffered with
//! the text, which is what lets `wo<b>rd` match "word".
//!
//! ```text
//!            text && c == kw[0]
//!  NoMatch ───────────────────────▶ Partial{0}
//!     ▲                               │  text && c == kw[i+1]  → Partial{i+1}
//!     │                               │  tag char              → Partial{i}
//!     │ reset()                       │  text && c != kw[i+1]  → Unmatched
//!     └───────────────────────────────┘  i+1 == kw.len()-1     → Matched
//! ```
//!
//! `Matched` and `Unmatched` are reported as [`Signal`]s; the caller consumes
//! the buffer and calls [`TagTracker::reset`]. A mismatch does not backtrack:
//! the buffered characters are released as plain text and matching resumes
//! with the next character.

use crate::query::SearchOptions;

use super::markup::wrap_match;

/// Where the tracker is within the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// No match in progress.
    NoMatch,
    /// `keyword[..=index]` has been seen.
    Partial { index: usize },
}

/// What the caller should do with the character it just fed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Emit the character unchanged.
    Add,
    /// Character is buffered; emit nothing yet.
    Ignore,
    /// Keyword complete; emit [`TagTracker::matched_markup`] and reset.
    Matched,
    /// Match broken; emit [`TagTracker::remaining`] verbatim and reset.
    Unmatched,
}

/// Keyword matcher with a buffer of the raw text consumed so far.
#[derive(Debug, Clone)]
pub struct TagTracker {
    keyword: Vec<char>,
    case_sensitive: bool,
    state: MatchState,
    remaining: String,
}

/// Escape the characters that would let a query inject markup.
fn escape_keyword(keyword: &str) -> String {
    html_escape::encode_text(keyword).into_owned()
}

impl TagTracker {
    /// Build a tracker for `keyword`.
    ///
    /// The keyword is case-folded (unless `options.case_sensitive`) and then
    /// HTML-escaped, so `a<b` is looked for as `a&lt;b` in the fragment.
    pub fn new(keyword: &str, options: SearchOptions) -> Self {
        let case_sensitive = options.case_sensitive;
        let folded: String = keyword.chars().map(|c| fold(c, case_sensitive)).collect();
        Self {
            keyword: escape_keyword(&folded).chars().collect(),
            case_sensitive,
            state: MatchState::NoMatch,
            remaining: String::new(),
        }
    }

    /// The escaped, folded keyword.
    pub fn keyword(&self) -> String {
        self.keyword.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty()
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Raw text buffered since the current match started, tags included.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    pub fn reset(&mut self) {
        self.state = MatchState::NoMatch;
        self.remaining.clear();
    }

    /// Feed one character. `inside_tag` is true for every character from a
    /// `<` up to and including the next `>`.
    pub fn add(&mut self, c: char, inside_tag: bool) -> Signal {
        let compare = fold(c, self.case_sensitive);
        match self.state {
            MatchState::NoMatch => {
                if inside_tag || self.keyword.first() != Some(&compare) {
                    return Signal::Add;
                }
                self.remaining.push(c);
                self.state = MatchState::Partial { index: 0 };
                if self.keyword.len() == 1 {
                    Signal::Matched
                } else {
                    Signal::Ignore
                }
            }
            MatchState::Partial { index } => {
                self.remaining.push(c);
                if inside_tag {
                    return Signal::Ignore;
                }
                let next = index + 1;
                if self.keyword.get(next) != Some(&compare) {
                    return Signal::Unmatched;
                }
                self.state = MatchState::Partial { index: next };
                if next == self.keyword.len() - 1 {
                    Signal::Matched
                } else {
                    Signal::Ignore
                }
            }
        }
    }

    /// The buffered span wrapped in highlight markup, tag nesting repaired.
    pub fn matched_markup(&self) -> String {
        wrap_match(&self.remaining)
    }
}

/// Case-fold a single character for comparison.
///
/// Characters whose lowercase form is several characters fold to the first
/// of them; the keyword goes through the same function so both sides agree.
pub(crate) fn fold(c: char, case_sensitive: bool) -> char {
    if case_sensitive {
        c
    } else {
        c.to_lowercase().next().unwrap_or(c)
    }
}
