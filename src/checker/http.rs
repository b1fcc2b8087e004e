// src/checker/http.rs
// =============================================================================
// This module probes links and images to see whether they are still there.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Waits a fixed delay before every link probe (simple rate limiting)
// - Turns status codes >= 400 and transport failures into Issues
//
// Everything runs one request at a time, in the order the references were
// found on the page. There is no retry: each URL gets exactly one attempt.
//
// Rust concepts:
// - async/await: Each request is awaited before the next one starts
// - Result<T, E>: Image probes can fail the whole scan, link probes cannot
// - Builder pattern: reqwest::ClientBuilder configures each client
// =============================================================================

use reqwest::{redirect, Client};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::issue::Issue;

/// Timeout for fetching the page under scan.
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for each link probe.
pub const LINK_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// A transport failure while probing an image
//
// Unlike link failures this is not recorded as an Issue: it stops the scan.
#[derive(Debug, Error)]
#[error("Error checking image: {url}: {source}")]
pub struct ImageProbeFault {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

// The three HTTP clients a scan needs
//
// They differ only in timeout and redirect handling:
//   page:  10s timeout, follows redirects
//   links: 5s timeout, follows redirects
//   images: no timeout, does NOT follow redirects (a 3xx counts as present)
//
// Certificate verification stays on for all of them.
#[derive(Debug, Clone)]
pub struct HttpClients {
    pub page: Client,
    pub links: Client,
    pub images: Client,
}

impl HttpClients {
    pub fn new() -> reqwest::Result<Self> {
        Ok(HttpClients {
            page: build_client(Some(PAGE_TIMEOUT), redirect::Policy::default())?,
            links: build_client(Some(LINK_TIMEOUT), redirect::Policy::default())?,
            images: build_client(None, redirect::Policy::none())?,
        })
    }
}

fn build_client(timeout: Option<Duration>, redirects: redirect::Policy) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(redirects);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

// Checks every link, in order, with a pause before each one
//
// Parameters:
//   client: the link client (5 second timeout, follows redirects)
//   links: absolute URLs in document order
//   delay: how long to wait before each probe
//
// Returns: one Issue per broken or unreachable link, in check order
//
// The delay is applied before EVERY link, the first one included, so a scan
// of N links takes at least delay × N.
pub async fn check_links(client: &Client, links: &[String], delay: Duration) -> Vec<Issue> {
    let mut issues = Vec::new();

    for link in links {
        tokio::time::sleep(delay).await;

        match client.head(link.as_str()).send().await {
            Ok(response) => {
                let status = response.status();
                if is_failure_status(status) {
                    warn!(
                        "Broken link found: {} with status code {}",
                        link,
                        status.as_u16()
                    );
                    issues.push(Issue::broken_link(link.as_str(), status.as_u16()));
                } else {
                    debug!("Link ok: {} ({})", link, status.as_u16());
                }
            }
            Err(e) => {
                // Any transport failure: DNS, refused, timeout, bad scheme...
                // Record it and carry on with the next link.
                error!("Error checking link: {} with error {}", link, e);
                issues.push(Issue::link_error(link.as_str(), e.to_string()));
            }
        }
    }

    issues
}

// Checks every image with a single HEAD request
//
// Parameters:
//   client: the image client (no timeout, no redirects)
//   images: absolute URLs in document order
//
// Returns:
//   Ok(issues): one "Missing image" Issue per image answering >= 400
//   Err(fault): the first image that could not be probed at all; the
//               remaining images are not checked
pub async fn check_images(client: &Client, images: &[String]) -> Result<Vec<Issue>, ImageProbeFault> {
    let mut missing = Vec::new();

    for image in images {
        let response = client
            .head(image.as_str())
            .send()
            .await
            .map_err(|source| ImageProbeFault {
                url: image.clone(),
                source,
            })?;

        if is_failure_status(response.status()) {
            missing.push(Issue::missing_image(image.as_str()));
        }
    }

    // One warning for the whole batch, not one per image
    if !missing.is_empty() {
        warn!("Missing images found:");
    }

    Ok(missing)
}

// Anything from 400 upwards counts as broken (4xx client and 5xx server errors)
fn is_failure_status(status: reqwest::StatusCode) -> bool {
    status.as_u16() >= 400
}
