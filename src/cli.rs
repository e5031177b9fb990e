// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// page-sentinel has a single mode of operation (audit a list of pages), so
// unlike tools with several subcommands we use one flat argument struct.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Option<T>: For arguments the user may or may not supply
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "page-sentinel",
    version = "0.1.0",
    about = "A CLI tool to audit web pages for broken links and missing user flow elements",
    long_about = "page-sentinel fetches each page you give it, follows every link on the page \
                  to make sure none of them are broken, and checks that the page carries the \
                  basic user flow elements (a form and a button). It's perfect for CI/CD \
                  pipelines to catch regressions before your users do."
)]
pub struct Cli {
    /// Page URLs to audit, in the order they should be checked
    ///
    /// These are positional arguments: page-sentinel https://a.com https://b.com
    /// At least one URL is required unless --file is given
    #[arg(required_unless_present = "file")]
    pub urls: Vec<String>,

    /// Read additional page URLs from a file (one per line)
    ///
    /// Blank lines and lines starting with '#' are ignored,
    /// so the file can carry comments
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output the collected reports in JSON format
    ///
    /// This is an optional flag: --json
    /// #[arg(long)] creates a flag from the field name
    #[arg(long)]
    pub json: bool,

    /// How many links to check at the same time within one page
    ///
    /// Pages themselves are always audited one at a time; this only
    /// bounds the in-flight link checks for the page being audited
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Request timeout in seconds for every GET we issue
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// How many times to retry a request that failed at the network level
    ///
    /// Off by default: 0 means a single attempt per request.
    /// Retries back off with doubling delays (250ms, 500ms, ...)
    /// A page or link that answers with an error status is never retried -
    /// an answer is an answer
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a flat struct instead of subcommands?
//    - Subcommands (like `git commit` vs `git push`) make sense when a tool
//      does several different things
//    - page-sentinel does one thing, so every option hangs off the top level
//
// 2. What is required_unless_present?
//    - Normally a positional Vec with no values is an error
//    - This attribute relaxes that when --file is given, because the file
//      can supply the URLs instead
//
// 3. What is PathBuf?
//    - An owned filesystem path (the owned sibling of &Path)
//    - Like String vs &str, but for paths
//
// 4. Why u64 for timeout and u32 for retries?
//    - Duration::from_secs takes a u64, so we store seconds as one
//    - Retry counts are small; u32 is plenty
// -----------------------------------------------------------------------------
