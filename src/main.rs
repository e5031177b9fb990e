// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Gather the page URLs (positional arguments and/or --file)
// 3. Audit every page, strictly in order
// 4. Print a summary (or JSON) and exit with proper code
//    (0 = every page OK, 1 = some page had issues, 2 = error)
//
// Rust concepts used:
// - async/await: Because auditing is network I/O all the way down
// - Result<T, E>: For error handling (T = success type, E = error type)
// - The ? operator: To bubble errors up to one place
// =============================================================================

// Module declarations - tells Rust about our other source files
mod audit;         // src/audit/ - page auditing and reporting
mod checker;       // src/checker/ - HTTP, link and structure checks
mod cli;           // src/cli.rs - command-line parsing

// Import items we need from our modules
use clap::Parser;  // Parser trait enables the parse() method
use cli::Cli;
use std::time::Duration;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every page OK
//   Ok(1) = at least one page reported an issue
//   Err = unexpected error (unreadable --file, client build failure)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Positional URLs first, then anything from --file, keeping input order
    let urls = collect_urls(&cli)?;

    if urls.is_empty() {
        println!("⚠️  No URLs to audit");
        return Ok(0);
    }

    // One client for the whole run; every fetch shares its connection pool
    let fetcher = checker::Fetcher::new(Duration::from_secs(cli.timeout), cli.retries)?;

    println!("🔍 Auditing {} page(s)...\n", urls.len());

    // In JSON mode the reports go out once at the end instead of per page,
    // so the runner only echoes them in table mode
    let reports = audit::run_audits(&fetcher, &urls, cli.concurrency, !cli.json).await;

    if cli.json {
        // Serialize the collected reports and print
        let json_output = serde_json::to_string_pretty(&reports)?;
        println!("{}", json_output);
    } else {
        print_summary(&reports);
    }

    // Count how many pages had problems
    let failed_count = reports.iter().filter(|r| !r.is_ok()).count();

    if failed_count > 0 {
        Ok(1)  // Exit code 1 = issues found
    } else {
        Ok(0)  // Exit code 0 = all good
    }
}

// Builds the ordered URL list from the CLI arguments
//
// Positional URLs come first, then the --file entries in file order.
// File format: one URL per line; blank lines and '#' comments are skipped.
fn collect_urls(cli: &Cli) -> Result<Vec<String>> {
    let mut urls = cli.urls.clone();

    if let Some(path) = &cli.file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("could not read URL file {}", path.display()))?;

        urls.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    Ok(urls)
}

// Prints the closing summary for table mode
fn print_summary(reports: &[audit::PageReport]) {
    let ok_count = reports.iter().filter(|r| r.is_ok()).count();
    let failed_count = reports.len() - ok_count;

    println!("📊 Summary:");
    println!("   ✅ OK: {}", ok_count);
    println!("   ❌ With issues: {}", failed_count);
    println!("   📋 Total: {}", reports.len());
}
