//! Highlighting of single fragments: tag crossings, escaping, and entities.

use super::common::{assert_balanced, highlights};
use markfind::{Finder, SearchOptions};

fn find(keyword: &str, fragment: &str) -> (String, usize) {
    let mut finder = Finder::new(keyword);
    let html = finder.find(fragment);
    (html, finder.count())
}

#[test]
fn test_match_opening_tag_inside_span() {
    let (html, count) = find("word", "wo<b>rd</b>");
    assert_eq!(count, 1);
    assert_eq!(html, r#"<span class="find">wo<b>rd</b></span><b></b>"#);
    assert_eq!(highlights(&html), vec!["word"]);
    assert_balanced(&html);
}

#[test]
fn test_match_closing_tag_inside_span() {
    let (html, count) = find("word", "<b>wo</b>rd");
    assert_eq!(count, 1);
    assert_eq!(html, r#"<b></b><span class="find"><b>wo</b>rd</span>"#);
    assert_balanced(&html);
}

#[test]
fn test_match_inside_element_keeps_element() {
    let (html, _) = find("link", r#"<a href="x.html">Link</a> text"#);
    assert_eq!(html, r#"<a href="x.html"><span class="find">Link</span></a> text"#);
}

#[test]
fn test_void_tag_inside_span_is_not_reopened() {
    let (html, count) = find("word", "wo<br>rd");
    assert_eq!(count, 1);
    assert_eq!(html, r#"<span class="find">wo<br>rd</span>"#);
}

#[test]
fn test_tag_attributes_are_never_matched() {
    let (html, count) = find("href", r#"<a href="x">y</a>"#);
    assert_eq!(count, 0);
    assert_eq!(html, r#"<a href="x">y</a>"#);
}

#[test]
fn test_every_occurrence_is_highlighted() {
    let (html, count) = find("a", "aXa");
    assert_eq!(count, 2);
    assert_eq!(
        html,
        r#"<span class="find">a</span>X<span class="find">a</span>"#
    );
}

#[test]
fn test_emitted_text_keeps_source_case() {
    let (html, _) = find("world", "WORLD");
    assert_eq!(html, r#"<span class="find">WORLD</span>"#);
}

#[test]
fn test_unicode_case_folding() {
    let (html, count) = find("ÉTÉ", "Un été chaud");
    assert_eq!(count, 1);
    assert_eq!(html, r#"Un <span class="find">été</span> chaud"#);
}

#[test]
fn test_case_sensitive_finder() {
    let mut finder = Finder::with_options("Rust", SearchOptions { case_sensitive: true });
    let html = finder.find("rust Rust RUST");
    assert_eq!(finder.count(), 1);
    assert_eq!(html, r#"rust <span class="find">Rust</span> RUST"#);
}

#[test]
fn test_keyword_is_escaped_before_matching() {
    let (html, count) = find("a<b", "a&lt;b and <b>bold</b>");
    assert_eq!(count, 1);
    assert_eq!(html, r#"<span class="find">a&lt;b</span> and <b>bold</b>"#);
}

#[test]
fn test_raw_markup_in_keyword_does_not_match_tags() {
    let (html, count) = find("a<b", "a<b>x</b>");
    assert_eq!(count, 0);
    assert_eq!(html, "a<b>x</b>");
}

#[test]
fn test_first_nbsp_becomes_space() {
    let (html, count) = find("a b", "a&nbsp;b");
    assert_eq!(count, 1);
    assert_eq!(html, r#"<span class="find">a b</span>"#);
}

#[test]
fn test_later_nbsp_is_left_alone() {
    let (html, count) = find("y z", "x&nbsp;y&nbsp;z");
    assert_eq!(count, 0);
    assert_eq!(html, "x y&nbsp;z");
}

#[test]
fn test_failed_prefix_is_not_retried() {
    // "aab" inside "aaab": the third 'a' breaks the match and is released
    // with the buffer rather than starting a new one.
    let (html, count) = find("aab", "aaab");
    assert_eq!(count, 0);
    assert_eq!(html, "aaab");
}

#[test]
fn test_match_cut_off_at_fragment_end() {
    let (html, count) = find("word", "a wor");
    assert_eq!(count, 0);
    assert_eq!(html, "a wor");
}

#[test]
fn test_nested_tags_across_span() {
    let (html, count) = find("ab", "<b><i>a</i></b>b");
    assert_eq!(count, 1);
    assert_eq!(
        html,
        r#"<b><i></i></b><span class="find"><b><i>a</i></b>b</span>"#
    );
    assert_balanced(&html);
}
