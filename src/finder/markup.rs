// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wrapping a matched span in highlight markup without breaking nesting.
//!
//! A match may run across tags: searching "word" in `wo<b>rd</b>` buffers
//! `wo<b>rd` and leaves `</b>` outside the span. Dropping a `<span>` around
//! that would produce `<span>wo<b>rd</span></b>`, which browsers repair in
//! creative ways. Instead the span is rebuilt so every tag it crosses is
//! closed and reopened at the span edges:
//!
//! ```text
//! span:    wo<b>rd
//! output:  <span class="find">wo<b>rd</b></span><b>
//!                                    ^^^^       ^^^ reopened for the tail
//! ```
//!
//! Two stacks drive this:
//!
//! - `open`: tags opened inside the span and still open at its end. They are
//!   closed before `</span>` and reopened after it.
//! - `close`: tags closed inside the span that were opened before it. They
//!   are closed before `<span>` and reopened inside it.
//!
//! Input is assumed well formed. Malformed markup degrades to best-effort
//! highlighting, never to an error.

/// Opening tag of a highlighted match.
pub const HIGHLIGHT_OPEN: &str = r#"<span class="find">"#;

/// Closing tag of a highlighted match.
pub const HIGHLIGHT_CLOSE: &str = "</span>";

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// A tag found inside a buffered span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag<'a> {
    /// `<name ...>`; `raw` is the full tag including attributes.
    Open { name: &'a str, raw: &'a str },
    /// `</name>`
    Close { name: &'a str },
}

/// Classify the text between `<` and `>`.
///
/// Returns `None` for comments, declarations, self-closing and void tags,
/// which have no effect on nesting.
fn classify<'a>(body: &'a str, raw: &'a str) -> Option<Tag<'a>> {
    if body.starts_with('!') || body.starts_with('?') {
        return None;
    }
    if let Some(rest) = body.strip_prefix('/') {
        let name = tag_name(rest);
        return (!name.is_empty()).then_some(Tag::Close { name });
    }
    if body.ends_with('/') {
        return None;
    }
    let name = tag_name(body);
    if name.is_empty() || is_void(name) {
        return None;
    }
    Some(Tag::Open { name, raw })
}

fn tag_name(body: &str) -> &str {
    let body = body.trim_start();
    let end = body
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(body.len());
    &body[..end]
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Every complete `<...>` in `span`, in order.
fn scan_tags(span: &str) -> impl Iterator<Item = Tag<'_>> {
    let mut pos = 0;
    std::iter::from_fn(move || loop {
        let lt = pos + span[pos..].find('<')?;
        let gt = lt + span[lt..].find('>')?;
        pos = gt + 1;
        if let Some(tag) = classify(&span[lt + 1..gt], &span[lt..=gt]) {
            return Some(tag);
        }
    })
}

/// Stacks of tags the span crosses.
#[derive(Debug, Default, PartialEq, Eq)]
struct Crossings<'a> {
    /// Opened in the span, still open at its end (outermost first).
    open: Vec<(&'a str, &'a str)>,
    /// Closed in the span but opened before it (innermost first).
    close: Vec<&'a str>,
}

fn crossings(span: &str) -> Crossings<'_> {
    let mut result = Crossings::default();
    for tag in scan_tags(span) {
        match tag {
            Tag::Open { name, raw } => result.open.push((name, raw)),
            Tag::Close { name } => match result.open.last() {
                Some((top, _)) if top.eq_ignore_ascii_case(name) => {
                    result.open.pop();
                }
                _ => result.close.push(name),
            },
        }
    }
    result
}

/// Wrap `span` in highlight markup, repairing any tag nesting it crosses.
///
/// `span` is emitted verbatim; only tags are added around it.
pub fn wrap_match(span: &str) -> String {
    let Crossings { open, close } = crossings(span);
    let mut out = String::with_capacity(span.len() + HIGHLIGHT_OPEN.len() + HIGHLIGHT_CLOSE.len());

    for name in &close {
        push_close(&mut out, name);
    }
    out.push_str(HIGHLIGHT_OPEN);
    for name in close.iter().rev() {
        out.push('<');
        out.push_str(name);
        out.push('>');
    }
    out.push_str(span);
    for (name, _) in open.iter().rev() {
        push_close(&mut out, name);
    }
    out.push_str(HIGHLIGHT_CLOSE);
    for (_, raw) in &open {
        out.push_str(raw);
    }
    out
}

fn push_close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
