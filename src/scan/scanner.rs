// src/scan/scanner.rs
// =============================================================================
// Runs one scan from start to finish.
//
// How it works:
// 1. Fetch the base page (failure = one issue, stop here)
// 2. Extract every link and image reference from the HTML
// 3. Probe the links (with the delay before each one)
// 4. Probe the images
// 5. Return all issues: link issues first, then missing images
//
// The caller is expected to have validated the base URL already.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::fetch::fetch_page;
use crate::checker::{
    check_images, check_links, extract_references, HttpClients, ImageProbeFault, Issue, ReferenceSet,
};

// The page being scanned
//
// Relative references are resolved against the same URL the user gave us,
// so there is only one URL to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    base_url: String,
}

impl ScanTarget {
    pub fn new(base_url: impl Into<String>) -> Self {
        ScanTarget {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Pause before each link probe
    pub delay: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            delay: Duration::from_secs(1),
        }
    }
}

// Everything one scan found, in the order it was found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub base_url: String,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}

// Scans one page
//
// Returns:
//   Ok(report): the page was fetched (or failed to fetch) and every
//               reference was checked
//   Err(fault): an image could not be probed at all; the scan stopped there
pub async fn scan(
    target: &ScanTarget,
    clients: &HttpClients,
    options: &ScanOptions,
) -> Result<Report, ImageProbeFault> {
    let base_url = target.base_url();
    let mut report = Report {
        base_url: base_url.to_string(),
        issues: Vec::new(),
    };

    let html = match fetch_page(&clients.page, base_url).await {
        Ok(html) => html,
        Err(failure) => {
            report.issues.push(failure.into_issue(base_url));
            return Ok(report);
        }
    };

    let references: ReferenceSet = extract_references(&html, base_url);
    if references.is_empty() {
        debug!("No links or images on {}", base_url);
    }
    info!(
        "Found {} link(s) and {} image(s) on {}",
        references.links.len(),
        references.images.len(),
        base_url
    );

    let link_issues = check_links(&clients.links, &references.links, options.delay).await;
    let image_issues = check_images(&clients.images, &references.images).await?;

    report.issues.extend(link_issues);
    report.issues.extend(image_issues);

    Ok(report)
}
