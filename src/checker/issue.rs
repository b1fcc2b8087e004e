// src/checker/issue.rs
// =============================================================================
// The record of one problem found during a scan.
//
// An Issue is "this URL, and what went wrong with it". What went wrong is
// either an HTTP status code (404, 500, ...) or a piece of text (a transport
// error message, or "Missing image").
//
// Rust concepts:
// - Enums with data: IssueDetail holds either a number or a string
// - Display: Controls how a value looks when printed with {}
// - serde attributes: Control how values look as JSON
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detail text attached to every missing image.
pub const MISSING_IMAGE: &str = "Missing image";

// Which kind of failure produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The base page answered 403 Forbidden
    Forbidden,
    /// The base page could not be fetched for any other reason
    FetchError,
    /// A link answered with status >= 400
    BrokenLink,
    /// A link could not be probed at all (DNS, refused, timeout, ...)
    LinkError,
    /// An image answered with status >= 400
    MissingImage,
}

// The diagnostic part of an issue
//
// #[serde(untagged)] writes the inner value directly, so JSON gets
// `404` or `"Missing image"` rather than `{"Status": 404}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueDetail {
    Status(u16),
    Message(String),
}

impl fmt::Display for IssueDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueDetail::Status(code) => write!(f, "{}", code),
            IssueDetail::Message(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The reference (or base URL) the issue is about
    pub url: String,
    pub kind: IssueKind,
    pub detail: IssueDetail,
}

impl Issue {
    pub fn broken_link(url: impl Into<String>, status: u16) -> Self {
        Issue {
            url: url.into(),
            kind: IssueKind::BrokenLink,
            detail: IssueDetail::Status(status),
        }
    }

    pub fn link_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            url: url.into(),
            kind: IssueKind::LinkError,
            detail: IssueDetail::Message(message.into()),
        }
    }

    pub fn missing_image(url: impl Into<String>) -> Self {
        Issue {
            url: url.into(),
            kind: IssueKind::MissingImage,
            detail: IssueDetail::Message(MISSING_IMAGE.to_string()),
        }
    }

    /// The console line for this issue: `<escaped url>: <detail>`
    ///
    /// The URL is HTML-escaped (`&`, `<`, `>`, `"` and `'`) because it came
    /// straight out of someone else's markup.
    pub fn to_console_line(&self) -> String {
        format!(
            "{}: {}",
            html_escape::encode_quoted_attribute(&self.url),
            self.detail
        )
    }
}
