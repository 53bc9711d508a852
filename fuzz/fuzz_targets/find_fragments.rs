// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for fragment highlighting.
//!
//! Arbitrary fragments and keywords, including malformed markup, stray `<`
//! and `>`, and entities. Highlighting must never panic and must never drop
//! or reorder the fragment's text: stripping tags from the output gives the
//! same text as stripping tags from the input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use markfind::testing::{highlights, text_of};
use markfind::{Finder, SearchOptions};

#[derive(Debug, Arbitrary)]
struct FindInput {
    keyword: String,
    fragment: String,
    case_sensitive: bool,
}

fuzz_target!(|input: FindInput| {
    let options = SearchOptions {
        case_sensitive: input.case_sensitive,
    };
    let mut finder = Finder::with_options(&input.keyword, options);
    let html = finder.find(&input.fragment);

    let expected = input.fragment.replacen("&nbsp;", " ", 1);
    assert_eq!(
        text_of(&html),
        text_of(&expected),
        "text changed for keyword {:?}",
        input.keyword
    );

    if finder.count() == 0 {
        assert_eq!(html, expected, "output changed without a match");
    }

    // Searching again after a reset gives the same answer.
    let count = finder.count();
    finder.reset();
    assert_eq!(finder.find(&input.fragment), html);
    assert_eq!(finder.count(), count);

    if !input.fragment.contains("<span") {
        assert_eq!(highlights(&html).len(), count);
    }
});
