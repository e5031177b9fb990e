// src/audit/page.rs
// =============================================================================
// This module audits one page and produces its report.
//
// The audit is a fixed sequence with an early exit at each stage:
// 1. Fetch the page. A request failure or a non-2xx answer ends the audit.
// 2. Extract the links and validate them. Any broken link ends the audit.
// 3. Check the structure (form + button). Any missing element ends the audit.
// 4. Nothing wrong: the page is OK.
//
// The early exits are deliberate and must stay in this order: a page with
// both broken links and a missing form reports only the broken links. One
// category per report keeps the output short and points at the most
// fundamental problem first. (Known limitation: the later categories stay
// unchecked, so fixing the reported issue can surface a new one.)
//
// Rust concepts:
// - Enums with data: One report variant per audit outcome
// - Display trait: How a report turns into its output string
// =============================================================================

use serde::Serialize;
use std::fmt;

use crate::checker::{self, FetchOutcome, Fetcher, LinkIssue};

// Everything an audit can conclude about a page
//
// Exactly one variant per page. The variants are listed in the order the
// audit checks them; earlier ones suppress later ones.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Fetch succeeded, every link answered 2xx, form and button present
    Ok,
    /// The page itself answered with a non-2xx status
    BadStatus { status: u16 },
    /// One or more links on the page are broken
    BrokenLinks { issues: Vec<LinkIssue> },
    /// The page is missing user flow elements (form and/or button)
    FlowIssues { issues: Vec<String> },
    /// The page fetch (or body read) failed outright
    Failed { message: String },
}

// The terminal output of one page audit
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    /// The page that was audited
    pub url: String,
    /// What the audit concluded
    #[serde(flatten)]  // Merges the outcome fields into the report's JSON
    pub outcome: PageOutcome,
}

impl PageReport {
    /// Helper to check whether the page came through clean
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, PageOutcome::Ok)
    }
}

// Renders the report in its literal output form. These strings are the
// tool's contract; tests pin them byte for byte.
impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            PageOutcome::Ok => write!(f, "{} is OK", self.url),
            PageOutcome::BadStatus { status } => {
                write!(f, "Error: {} returned {}", self.url, status)
            }
            PageOutcome::BrokenLinks { issues } => {
                write!(f, "Error: {} has broken links:", self.url)?;
                for issue in issues {
                    write!(f, "\n{}", issue)?;
                }
                Ok(())
            }
            PageOutcome::FlowIssues { issues } => {
                write!(f, "Error: {} has user flow issues:", self.url)?;
                for issue in issues {
                    write!(f, "\n{}", issue)?;
                }
                Ok(())
            }
            PageOutcome::Failed { message } => {
                write!(f, "Exception: {} encountered an error - {}", self.url, message)
            }
        }
    }
}

// Audits a single page
//
// Parameters:
//   fetcher: the shared HTTP client wrapper
//   url: the page to audit
//   link_concurrency: in-flight limit for this page's link checks
//
// This function cannot fail: every way the audit can go wrong is a
// PageOutcome variant, so the caller always gets a report and the batch
// never aborts because one page misbehaved.
pub async fn audit_page(fetcher: &Fetcher, url: &str, link_concurrency: usize) -> PageReport {
    PageReport {
        url: url.to_string(),
        outcome: check_page(fetcher, url, link_concurrency).await,
    }
}

// The audit sequence itself; returns at the first failing stage
async fn check_page(fetcher: &Fetcher, url: &str, link_concurrency: usize) -> PageOutcome {
    // Stage 1: fetch the page
    let body = match fetcher.fetch(url).await {
        FetchOutcome::Success { body, .. } => body,
        FetchOutcome::BadStatus { status } => return PageOutcome::BadStatus { status },
        FetchOutcome::Failed { message } => return PageOutcome::Failed { message },
    };

    // Stage 2: every link on the page must answer
    let links = checker::extract_links(&body, url);
    let broken = checker::validate_links(fetcher, links, link_concurrency).await;
    if !broken.is_empty() {
        return PageOutcome::BrokenLinks { issues: broken };
    }

    // Stage 3: the page must carry its user flow elements
    let flow = checker::check_structure(&body);
    if !flow.is_empty() {
        return PageOutcome::FlowIssues { issues: flow };
    }

    PageOutcome::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::LinkProblem;

    fn report(outcome: PageOutcome) -> PageReport {
        PageReport {
            url: "https://example.com/page".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_ok_report_string() {
        assert_eq!(
            report(PageOutcome::Ok).to_string(),
            "https://example.com/page is OK"
        );
    }

    #[test]
    fn test_bad_status_report_string() {
        assert_eq!(
            report(PageOutcome::BadStatus { status: 404 }).to_string(),
            "Error: https://example.com/page returned 404"
        );
    }

    #[test]
    fn test_broken_links_report_string() {
        let issues = vec![
            LinkIssue {
                url: "https://example.com/dead".to_string(),
                problem: LinkProblem::BadStatus { status: 404 },
            },
            LinkIssue {
                url: "https://example.com/slow".to_string(),
                problem: LinkProblem::Failed {
                    message: "operation timed out".to_string(),
                },
            },
        ];
        assert_eq!(
            report(PageOutcome::BrokenLinks { issues }).to_string(),
            "Error: https://example.com/page has broken links:\n\
             https://example.com/dead returned 404\n\
             https://example.com/slow encountered an error - operation timed out"
        );
    }

    #[test]
    fn test_flow_issues_report_string() {
        let issues = vec![
            "No forms found on the page.".to_string(),
            "No buttons found on the page.".to_string(),
        ];
        assert_eq!(
            report(PageOutcome::FlowIssues { issues }).to_string(),
            "Error: https://example.com/page has user flow issues:\n\
             No forms found on the page.\n\
             No buttons found on the page."
        );
    }

    #[test]
    fn test_failed_report_string() {
        assert_eq!(
            report(PageOutcome::Failed {
                message: "connection refused".to_string()
            })
            .to_string(),
            "Exception: https://example.com/page encountered an error - connection refused"
        );
    }

    #[test]
    fn test_only_ok_counts_as_ok() {
        assert!(report(PageOutcome::Ok).is_ok());
        assert!(!report(PageOutcome::BadStatus { status: 500 }).is_ok());
        assert!(!report(PageOutcome::FlowIssues { issues: vec![] }).is_ok());
    }

    // ------------------------------------------------------------------
    // Full audits against a local mock server
    // ------------------------------------------------------------------

    use httpmock::prelude::*;
    use std::time::Duration;

    fn fetcher() -> Fetcher {
        Fetcher::new(Duration::from_secs(5), 0).unwrap()
    }

    #[tokio::test]
    async fn test_healthy_page_is_ok() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200).body(
                r#"<html><body>
                    <a href="/linked">linked</a>
                    <form action="/submit"><button>Send</button></form>
                </body></html>"#,
            );
        });
        server.mock(|when, then| {
            when.method(GET).path("/linked");
            then.status(200).body("fine");
        });

        let url = server.url("/page");
        let report = audit_page(&fetcher(), &url, 4).await;

        assert!(report.is_ok());
        assert_eq!(report.to_string(), format!("{} is OK", url));
    }

    #[tokio::test]
    async fn test_bad_status_page_skips_link_checks() {
        let server = MockServer::start();
        // The 404 body still contains a link; it must never be requested
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404)
                .body(r#"<a href="/never-requested">ghost</a>"#);
        });
        let link_mock = server.mock(|when, then| {
            when.method(GET).path("/never-requested");
            then.status(200);
        });

        let url = server.url("/gone");
        let report = audit_page(&fetcher(), &url, 4).await;

        assert_eq!(report.to_string(), format!("Error: {} returned 404", url));
        link_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_broken_links_suppress_structure_check() {
        let server = MockServer::start();
        // No form, no button AND two broken links: only the links report
        server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200).body(
                r#"<a href="/dead">dead</a>
                   <a href="/alive">alive</a>
                   <a href="/teapot">teapot</a>"#,
            );
        });
        server.mock(|when, then| {
            when.method(GET).path("/dead");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/alive");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(GET).path("/teapot");
            then.status(418);
        });

        let url = server.url("/page");
        let report = audit_page(&fetcher(), &url, 4).await;

        assert_eq!(
            report.to_string(),
            format!(
                "Error: {} has broken links:\n{} returned 404\n{} returned 418",
                url,
                server.url("/dead"),
                server.url("/teapot")
            )
        );
    }

    #[tokio::test]
    async fn test_missing_form_reports_single_flow_issue() {
        let server = MockServer::start();
        // Links all healthy, one button, zero forms
        server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200).body(
                r#"<a href="/fine">fine</a><button>Click</button>"#,
            );
        });
        server.mock(|when, then| {
            when.method(GET).path("/fine");
            then.status(200);
        });

        let url = server.url("/page");
        let report = audit_page(&fetcher(), &url, 4).await;

        assert_eq!(
            report.to_string(),
            format!(
                "Error: {} has user flow issues:\nNo forms found on the page.",
                url
            )
        );
    }

    #[tokio::test]
    async fn test_unreachable_page_becomes_exception_report() {
        let url = "http://127.0.0.1:1/".to_string();
        let report = audit_page(&fetcher(), &url, 4).await;

        assert!(matches!(report.outcome, PageOutcome::Failed { .. }));
        assert!(report
            .to_string()
            .starts_with("Exception: http://127.0.0.1:1/ encountered an error - "));
    }
}
