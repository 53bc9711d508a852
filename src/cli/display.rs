// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the markfind CLI.
//!
//! Highlighted HTML is turned back into terminal text: tags are dropped,
//! entities decoded, and every `<span class="find">` rendered in the theme's
//! highlight color. OneDark for dark terminals, One Light for light ones.
//! Respects `NO_COLOR` and non-TTY detection for pipelines.
//!
//! # Theme detection order
//!
//! 1. `MARKFIND_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use markfind::{
    Corpus, DocumentSearch, LibraryResponse, SearchResult, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN,
};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

/// Context kept before the first highlight in a snippet.
const LEAD_CONTEXT: usize = 24;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("MARKFIND_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (255, 215, 0);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (152, 104, 1);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_YELLOW);

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// FRAGMENT RENDERING
// ═══════════════════════════════════════════════════════════════════════════

/// A run of plain text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

fn push_text(segments: &mut Vec<Segment>, raw: &str, highlighted: bool) {
    let mut text = String::new();
    let mut inside = false;
    for c in raw.chars() {
        match c {
            '<' if !inside => inside = true,
            '>' if inside => inside = false,
            _ if !inside => text.push(c),
            _ => {}
        }
    }
    if text.is_empty() {
        return;
    }
    let text = html_escape::decode_html_entities(&text).into_owned();
    match segments.last_mut() {
        Some(last) if last.highlighted == highlighted => last.text.push_str(&text),
        _ => segments.push(Segment { text, highlighted }),
    }
}

/// End of the highlight starting at `rest`, skipping nested spans.
fn highlight_end(rest: &str) -> usize {
    let mut depth = 0usize;
    let mut i = 0;
    while i < rest.len() {
        let tail = &rest[i..];
        if tail.starts_with(HIGHLIGHT_CLOSE) {
            if depth == 0 {
                return i;
            }
            depth -= 1;
        } else if tail.starts_with("<span") {
            depth += 1;
        }
        i += tail.chars().next().map_or(1, char::len_utf8);
    }
    rest.len()
}

/// Split highlighted HTML into plain-text segments.
pub fn segments(html: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(HIGHLIGHT_OPEN) {
        push_text(&mut out, &rest[..start], false);
        rest = &rest[start + HIGHLIGHT_OPEN.len()..];
        let end = highlight_end(rest);
        push_text(&mut out, &rest[..end], true);
        rest = rest[end..].strip_prefix(HIGHLIGHT_CLOSE).unwrap_or("");
    }
    push_text(&mut out, rest, false);
    out
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Cut segments to at most `width` characters, starting a little before the
/// first highlight. Whitespace runs collapse to one space.
pub fn snippet(segments: &[Segment], width: usize) -> Vec<Segment> {
    let collapsed: Vec<Segment> = segments
        .iter()
        .map(|s| Segment {
            text: collapse_whitespace(&s.text),
            highlighted: s.highlighted,
        })
        .collect();

    let lead: usize = collapsed
        .iter()
        .take_while(|s| !s.highlighted)
        .map(|s| s.text.chars().count())
        .sum();
    let mut skip = lead.saturating_sub(LEAD_CONTEXT);
    let mut budget = width;
    let mut out = Vec::new();

    for seg in collapsed {
        let len = seg.text.chars().count();
        if skip >= len {
            skip -= len;
            continue;
        }
        let text: String = seg.text.chars().skip(skip).take(budget).collect();
        skip = 0;
        budget -= text.chars().count();
        out.push(Segment {
            text,
            highlighted: seg.highlighted,
        });
        if budget == 0 {
            break;
        }
    }
    out
}

fn styled_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.highlighted {
                themed(BRIGHT_YELLOW, &[BOLD], &s.text)
            } else {
                s.text.clone()
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// RESULT OUTPUT
// ═══════════════════════════════════════════════════════════════════════════

fn count_label(count: usize) -> String {
    let word = if count == 1 { "match" } else { "matches" };
    themed(GREEN, &[BOLD], &format!("{} {}", count, word))
}

fn print_chapter(chapter: &SearchResult) {
    let heading = match &chapter.part_title {
        Some(part) if !part.is_empty() => format!("{} / {}", part, chapter.title),
        _ => chapter.title.clone(),
    };
    row(&format!(
        " {}  {}  {}",
        themed(YELLOW, &[BOLD], &heading),
        count_label(chapter.count),
        themed(GRAY, &[DIM], &chapter.href)
    ));
    for element in &chapter.elements {
        let line = snippet(&segments(element), BOX_WIDTH - 4);
        row(&format!("   {}", styled_segments(&line)));
    }
}

/// Print a single-document (or whole-corpus) result.
pub fn print_document_search(label: &str, result: &DocumentSearch) {
    section_top(label);
    if result.chapters.is_empty() {
        row(&format!(" {}", themed(GRAY, &[DIM], "no matches")));
    }
    for chapter in &result.chapters {
        print_chapter(chapter);
    }
    row(&format!(" total: {}", count_label(result.count)));
    section_bot();
}

/// Print a library result, one section per document with matches.
pub fn print_library(response: &LibraryResponse) {
    for subwork in response.subworks.iter().filter(|s| s.count > 0) {
        let label = subwork.id.as_deref().unwrap_or("document");
        print_document_search(label, subwork);
    }
    println!(
        "{} across {} documents",
        count_label(response.count()),
        response.subworks.len()
    );
}

/// Print document, chapter, and element counts for a corpus.
pub fn print_inspect(label: &str, corpus: &Corpus) {
    section_top(label);
    for (id, chapters) in corpus.iter() {
        let elements: usize = chapters.iter().map(|c| c.elements.len()).sum();
        row(&format!(
            " {}  {} chapters, {} elements",
            themed(YELLOW, &[BOLD], id),
            chapters.len(),
            elements
        ));
    }
    row(&format!(
        " {} documents, {} chapters, {} elements",
        themed(GREEN, &[BOLD], &corpus.len().to_string()),
        corpus.chapter_count(),
        corpus.element_count()
    ));
    section_bot();
}
