// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use markfind::{load_corpus, Corpus, HtmlExport, LibrarySearcher, SearchEvent, SearchQuery};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{display, Cli, Commands, QueryArgs};

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so `--json` output stays machine readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search { args, id } => run_search(&args, id.as_deref()),
        Commands::Library { args, sequential } => run_library(&args, !sequential),
        Commands::Inspect { corpus } => run_inspect(&corpus),
    }
}

fn open_corpus(dir: &Path) -> Result<Corpus> {
    load_corpus(dir).with_context(|| format!("could not load corpus from {}", dir.display()))
}

fn build_query(args: &QueryArgs) -> SearchQuery {
    let query = SearchQuery::new(args.query.clone());
    if args.case_sensitive {
        query.case_sensitive()
    } else {
        query
    }
}

fn run_search(args: &QueryArgs, id: Option<&str>) -> Result<()> {
    let corpus = open_corpus(&args.corpus)?;
    let export = HtmlExport::new(&corpus);
    let query = build_query(args);

    let (label, result) = match id {
        Some(id) => {
            if !corpus.contains(id) {
                bail!("no document '{}' in {}", id, args.corpus.display());
            }
            (id.to_string(), export.search(id, &query))
        }
        None => ("corpus".to_string(), export.search_all(&query)),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display::print_document_search(&label, &result);
    }
    Ok(())
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden || !atty::is(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar
}

fn run_library(args: &QueryArgs, parallel: bool) -> Result<()> {
    let corpus = open_corpus(&args.corpus)?;
    let query = build_query(args);
    let progress = progress_bar(corpus.len(), args.json);

    let mut on_event = |event: SearchEvent<'_>| match event {
        SearchEvent::Started => progress.set_message("searching"),
        SearchEvent::Progress(r) => {
            progress.inc(1);
            progress.set_message(format!("{}% · {} matches", r.rate, r.count()));
        }
        SearchEvent::Completed(_) => progress.finish_and_clear(),
    };
    let response = LibrarySearcher::new(&corpus)
        .parallel(parallel)
        .search(&query, &mut on_event);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        display::print_library(&response);
    }
    Ok(())
}

fn run_inspect(dir: &Path) -> Result<()> {
    let corpus = open_corpus(dir)?;
    display::print_inspect(&dir.display().to_string(), &corpus);
    Ok(())
}
