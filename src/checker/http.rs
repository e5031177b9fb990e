// src/checker/http.rs
// =============================================================================
// This module wraps all the HTTP work behind a single Fetcher type.
//
// Key functionality:
// - One shared reqwest::Client with connection pooling, reused for every
//   request in the run (building a client per request wastes connections)
// - fetch(): GET a page and hand back its body on success
// - probe(): GET a link when we only care whether it answers, not what it says
// - Optional retry with doubling backoff for network-level failures
//
// Rust concepts:
// - async/await: For network I/O
// - Enums: To represent the three ways a request can turn out
// - Ownership: The Fetcher owns the client, callers borrow the Fetcher
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

// The three ways a GET request can turn out
//
// A non-2xx answer and a request that never got an answer are different
// failures and get reported differently, so we keep them apart here
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The server answered 2xx; body holds the response text
    Success { status: u16, body: String },
    /// The server answered, but with a non-2xx status (404, 500, ...)
    /// The body is not read in this case
    BadStatus { status: u16 },
    /// The request itself failed: DNS, connection refused, timeout,
    /// unusable URL. Holds the underlying error text verbatim
    Failed { message: String },
}

// Issues GET requests on behalf of the whole application
//
// Built once in main and borrowed everywhere else, so every request in the
// run shares one connection pool
pub struct Fetcher {
    client: Client,
    retries: u32,
}

impl Fetcher {
    // Creates the shared HTTP client
    //
    // Parameters:
    //   timeout: per-request time limit (the CLI defaults to 30s)
    //   retries: extra attempts after a network-level failure (0 = single try)
    pub fn new(timeout: Duration, retries: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))  // Standard browser-like following
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, retries })
    }

    // Fetches a page and returns its body text
    //
    // On a non-2xx status we record the code and never read the body;
    // the caller has nothing useful to parse in an error page
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.get_with_retry(url).await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed { message: e.to_string() },
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::BadStatus { status: status.as_u16() };
        }

        // Reading the body can still fail (connection dropped mid-transfer)
        match response.text().await {
            Ok(body) => FetchOutcome::Success { status: status.as_u16(), body },
            Err(e) => FetchOutcome::Failed { message: e.to_string() },
        }
    }

    // Probes a link: same GET semantics as fetch(), but the body is dropped
    //
    // Link validation only needs to know whether the target answers 2xx,
    // so we skip the (possibly large) body download
    pub async fn probe(&self, url: &str) -> FetchOutcome {
        match self.get_with_retry(url).await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    FetchOutcome::Success { status: status.as_u16(), body: String::new() }
                } else {
                    FetchOutcome::BadStatus { status: status.as_u16() }
                }
            }
            Err(e) => FetchOutcome::Failed { message: e.to_string() },
        }
    }

    // Sends a GET, retrying network-level failures up to self.retries times
    //
    // Note that an error *status* is not a failure here: the server answered,
    // and we hand that answer straight back. Only transport errors retry.
    //
    // Backoff doubles per attempt: 250ms, 500ms, 1s, ...
    async fn get_with_retry(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let mut attempt: u32 = 0;
        loop {
            match self.client.get(url).send().await {
                Ok(response) => return Ok(response),
                Err(_) if attempt < self.retries => {
                    let backoff = Duration::from_millis(250 * 2u64.pow(attempt));
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one shared Client?
//    - reqwest::Client keeps a pool of open connections internally
//    - Re-creating it per request throws that pool away every time
//    - Client is cheap to borrow and cheap to clone (reference counted)
//
// 2. Why does fetch() skip the body on non-2xx?
//    - An error page's HTML is not the page we were asked to audit
//    - Skipping the read saves bandwidth and keeps the outcome simple
//
// 3. What can make client.get(url).send() fail?
//    - An href that isn't a usable URL at all (mailto:, "not a url")
//    - DNS resolution failure, connection refused, TLS problems, timeouts
//    - All of these surface as FetchOutcome::Failed with the error's text
//
// 4. Why retry only transport errors?
//    - A 404 is the server's answer; asking again won't change it
//    - A dropped connection might genuinely succeed on the next try
// -----------------------------------------------------------------------------
