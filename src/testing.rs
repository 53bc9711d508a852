//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::corpus::Corpus;
use crate::types::{Content, Element};

/// Create a chapter with the given HTML fragments as elements.
pub fn make_content(id: &str, title: &str, elements: &[&str]) -> Content {
    Content {
        id: id.to_string(),
        title: title.to_string(),
        part_title: None,
        href: format!("{}.html", id),
        elements: elements.iter().map(|e| Element::new(*e)).collect(),
        ..Default::default()
    }
}

/// Create a corpus with one single-chapter document per entry.
///
/// The chapter shares the document's id and is titled after it.
pub fn make_corpus(docs: &[(&str, &[&str])]) -> Corpus {
    docs.iter()
        .map(|(id, elements)| (*id, vec![make_content(id, &id.to_uppercase(), elements)]))
        .collect()
}

/// Plain text inside each highlight span, in order.
///
/// Nested `<span>` elements inside a highlight are tracked so the right
/// `</span>` ends it.
pub fn highlights(html: &str) -> Vec<String> {
    let open = crate::finder::HIGHLIGHT_OPEN;
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(open) {
        rest = &rest[start + open.len()..];
        let mut depth = 0usize;
        let mut end = rest.len();
        let mut i = 0;
        while i < rest.len() {
            let tail = &rest[i..];
            if tail.starts_with("</span>") {
                if depth == 0 {
                    end = i;
                    break;
                }
                depth -= 1;
            } else if tail.starts_with("<span") {
                depth += 1;
            }
            i += tail.chars().next().map_or(1, char::len_utf8);
        }
        found.push(text_of(&rest[..end]));
        rest = &rest[end..];
    }
    found
}

/// Plain text of an HTML fragment: tags dropped, entities left alone.
pub fn text_of(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut inside = false;
    for c in html.chars() {
        match c {
            '<' if !inside => inside = true,
            '>' if inside => inside = false,
            _ if !inside => out.push(c),
            _ => {}
        }
    }
    out
}
