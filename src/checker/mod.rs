// src/checker/mod.rs
// =============================================================================
// This module contains all the per-page checking machinery.
//
// Submodules:
// - http: The shared Fetcher that issues every GET request we make
// - html: Pulls links out of a page and checks its structure
// - links: Validates extracted links and describes the broken ones
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod html;
mod http;
mod links;

// Re-export public items from submodules
// This lets users write `checker::extract_links()` instead of
// `checker::html::extract_links()`
pub use html::{check_structure, extract_links};
pub use http::{FetchOutcome, Fetcher};
pub use links::{validate_links, LinkIssue, LinkProblem};
