// src/scan/fetch.rs
// =============================================================================
// Fetches the one page a scan is about.
//
// The page client has a 10 second timeout and verifies TLS certificates.
// Any status code >= 400 is treated exactly like a transport failure: the
// page is not parsed and the scan stops with a single issue.
//
// Rust concepts:
// - thiserror: Derive std::error::Error for our own enum
// - map_err: Convert one error type into another while propagating with ?
// =============================================================================

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{error, warn};

use crate::checker::{Issue, IssueDetail, IssueKind};

// Why the base page could not be fetched
//
// The Display text is reqwest's own message, e.g.
//   "HTTP status client error (403 Forbidden) for url (https://example.com/)"
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The server answered 403 Forbidden
    #[error("{0}")]
    Forbidden(reqwest::Error),
    /// Any other error status, or the request never got an answer
    #[error("{0}")]
    Request(reqwest::Error),
}

impl FetchFailure {
    pub fn kind(&self) -> IssueKind {
        match self {
            FetchFailure::Forbidden(_) => IssueKind::Forbidden,
            FetchFailure::Request(_) => IssueKind::FetchError,
        }
    }

    /// The single issue recorded for a failed base page
    pub fn into_issue(self, url: &str) -> Issue {
        Issue {
            url: url.to_string(),
            kind: self.kind(),
            detail: IssueDetail::Message(self.to_string()),
        }
    }
}

// Fetches a web page and returns its HTML content
//
// One attempt only. Failures are logged here: 403 as a warning, everything
// else as an error.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchFailure> {
    let result = match client.get(url).send().await {
        Ok(response) => match response.error_for_status() {
            Ok(response) => response.text().await.map_err(FetchFailure::Request),
            Err(e) if e.status() == Some(StatusCode::FORBIDDEN) => Err(FetchFailure::Forbidden(e)),
            Err(e) => Err(FetchFailure::Request(e)),
        },
        Err(e) => Err(FetchFailure::Request(e)),
    };

    match &result {
        Err(failure @ FetchFailure::Forbidden(_)) => {
            warn!("Forbidden access to {}: {}", url, failure);
        }
        Err(failure @ FetchFailure::Request(_)) => {
            error!("Failed to fetch the URL: {}, Error: {}", url, failure);
        }
        Ok(_) => {}
    }

    result
}
