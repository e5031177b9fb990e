// src/checker/links.rs
// =============================================================================
// This module validates the links extracted from a page.
//
// Key functionality:
// - GETs every link through the shared Fetcher
// - Classifies each one: 2xx is fine, anything else becomes a LinkIssue
// - Runs a bounded number of checks concurrently, but keeps the issues in
//   the same order as the links so reports are reproducible
//
// Rust concepts:
// - Streams: For processing many futures with a concurrency limit
// - Enums with data: To carry the two kinds of link problem
// =============================================================================

use futures::stream::{self, StreamExt};  // StreamExt gives us .buffered()
use serde::Serialize;
use std::fmt;

use super::http::{FetchOutcome, Fetcher};

// The two ways a link can be broken
//
// #[derive(Serialize)] lets us include issues in the --json output
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkProblem {
    /// The target answered with a non-2xx status
    BadStatus { status: u16 },
    /// The request never got an answer (DNS, refused, timeout, bad URL)
    Failed { message: String },
}

// One broken link, as it will appear in the page's report
#[derive(Debug, Clone, Serialize)]
pub struct LinkIssue {
    /// The link target exactly as the validator requested it
    pub url: String,
    /// What went wrong
    #[serde(flatten)]  // Merges the LinkProblem fields into LinkIssue's JSON
    pub problem: LinkProblem,
}

// Each issue renders as one line of the "has broken links" report
impl fmt::Display for LinkIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            LinkProblem::BadStatus { status } => {
                write!(f, "{} returned {}", self.url, status)
            }
            LinkProblem::Failed { message } => {
                write!(f, "{} encountered an error - {}", self.url, message)
            }
        }
    }
}

// Checks every link and collects the broken ones
//
// Parameters:
//   fetcher: the shared HTTP client wrapper
//   links: link targets in document order (from extract_links)
//   concurrency: how many link GETs may be in flight at once
//
// Returns: one LinkIssue per link that did not answer 2xx, in the same
// relative order the links came in. Healthy links produce nothing.
//
// Links are checked as they come: no deduplication (a link that appears
// twice is checked twice, and reported twice if broken) and no caching
// across pages. That keeps the report a faithful record of the document.
pub async fn validate_links(
    fetcher: &Fetcher,
    links: Vec<String>,
    concurrency: usize,
) -> Vec<LinkIssue> {
    // One future per link; nothing runs until the stream drives them
    let checks = links.into_iter().map(|url| async move {
        match fetcher.probe(&url).await {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::BadStatus { status } => Some(LinkIssue {
                url,
                problem: LinkProblem::BadStatus { status },
            }),
            FetchOutcome::Failed { message } => Some(LinkIssue {
                url,
                problem: LinkProblem::Failed { message },
            }),
        }
    });

    // .buffered(n) runs up to n checks at once and yields results in input
    // order. Its sibling .buffer_unordered(n) would be a little faster but
    // shuffles the output, and report order must match document order.
    stream::iter(checks)
        .buffered(concurrency.max(1))
        .filter_map(|issue| async move { issue })
        .collect()
        .await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered vs buffer_unordered:
//    - Both run up to n futures concurrently
//    - buffered yields result 1, then 2, then 3... no matter which finished
//      first; buffer_unordered yields in completion order
//    - We trade a bit of throughput for deterministic reports
//
// 2. Why does the closure say `async move`?
//    - Each future needs to own its url String
//    - The &Fetcher it captures is just a borrow (cheap to copy around)
//
// 3. What is filter_map on a stream?
//    - Same idea as Iterator::filter_map: keep the Some values, drop None
//    - The async block is there because stream adapters expect futures
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn fetcher() -> Fetcher {
        Fetcher::new(Duration::from_secs(5), 0).unwrap()
    }

    #[tokio::test]
    async fn test_healthy_links_produce_no_issues() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/a");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(GET).path("/b");
            then.status(200);
        });

        let links = vec![server.url("/a"), server.url("/b")];
        let issues = validate_links(&fetcher(), links, 4).await;
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_broken_links_keep_document_order() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ok");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/boom");
            then.status(500);
        });

        let links = vec![server.url("/gone"), server.url("/ok"), server.url("/boom")];
        let issues = validate_links(&fetcher(), links, 4).await;

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].to_string(), format!("{} returned 404", server.url("/gone")));
        assert_eq!(issues[1].to_string(), format!("{} returned 500", server.url("/boom")));
    }

    #[tokio::test]
    async fn test_unreachable_link_reports_error_line() {
        let links = vec!["http://127.0.0.1:1/".to_string()];
        let issues = validate_links(&fetcher(), links, 1).await;

        assert_eq!(issues.len(), 1);
        assert!(issues[0]
            .to_string()
            .starts_with("http://127.0.0.1:1/ encountered an error - "));
    }

    #[tokio::test]
    async fn test_repeated_link_is_checked_each_time() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        });

        let links = vec![server.url("/gone"), server.url("/gone")];
        let issues = validate_links(&fetcher(), links, 2).await;

        assert_eq!(issues.len(), 2);
        mock.assert_hits(2);
    }
}
