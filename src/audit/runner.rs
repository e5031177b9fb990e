// src/audit/runner.rs
// =============================================================================
// This module runs a batch of page audits.
//
// Pages are processed strictly in input order, one at a time: the audit of
// page N+1 does not start until page N's report exists. Within a page the
// link checks may overlap (see checker::validate_links), but two pages are
// never in flight together, so the output always reads top to bottom in the
// order the URLs were given.
//
// Rust concepts:
// - Async loops: Awaiting each audit before starting the next
// - Slices: Borrowing the URL list instead of taking ownership
// =============================================================================

use crate::checker::Fetcher;

use super::page::{audit_page, PageReport};

// Audits every URL in order and collects the reports
//
// Parameters:
//   fetcher: the shared HTTP client wrapper
//   urls: pages to audit, in the order they should be checked
//   link_concurrency: in-flight limit for each page's link checks
//   echo: print each report as soon as its audit finishes
//
// Each page gets an announcement line before its audit starts, so a slow
// page shows which URL the tool is working on rather than sitting silent.
// The returned Vec holds one report per input URL, same order.
pub async fn run_audits(
    fetcher: &Fetcher,
    urls: &[String],
    link_concurrency: usize,
    echo: bool,
) -> Vec<PageReport> {
    let mut reports = Vec::with_capacity(urls.len());

    for url in urls {
        println!("🔍 Checking {}", url);

        // A failed audit is still a report; nothing here can abort the batch
        let report = audit_page(fetcher, url, link_concurrency).await;

        if echo {
            println!("{}\n", report);
        }

        reports.push(report);
    }

    reports
}
