// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the markfind command-line interface.
//!
//! Three subcommands: `search` to search one document or the whole corpus,
//! `library` to run a library search with progress, and `inspect` to
//! summarize an export directory.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "markfind",
    about = "Search and highlight pre-rendered HTML exports",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the searching subcommands.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Export directory containing manifest.json
    pub corpus: PathBuf,

    /// Text to search for
    pub query: String,

    /// Match letter case exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Print results as JSON instead of highlighted text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search one document, or every document as a single result
    Search {
        #[command(flatten)]
        args: QueryArgs,

        /// Document id to search (default: the whole corpus)
        #[arg(long)]
        id: Option<String>,
    },

    /// Search each document in turn, reporting progress
    Library {
        #[command(flatten)]
        args: QueryArgs,

        /// Search documents one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Summarize an export directory
    Inspect {
        /// Export directory containing manifest.json
        corpus: PathBuf,
    },
}
