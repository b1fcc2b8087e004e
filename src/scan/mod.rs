// src/scan/mod.rs
// =============================================================================
// This module runs a scan of a single page.
//
// Submodules:
// - fetch: Downloads the base page (GET, 10 second timeout)
// - scanner: Ties fetching, extraction and probing together into a Report
//
// There is no crawling: only the page the user named is fetched, and only the
// references on that page are probed.
// =============================================================================

mod fetch;
mod scanner;

pub use scanner::{scan, Report, ScanOptions, ScanTarget};
