// src/checker/validate.rs
// =============================================================================
// Decides whether a string is a URL we are willing to scan.
//
// A valid base URL must:
// - parse as an absolute URL (relative paths like "/docs" fail to parse)
// - use the http or https scheme
// - name a host
//
// This is a pure check: no network access happens here.
// =============================================================================

use url::Url;

/// Returns true if `url` is a well-formed http(s) URL with a host.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
