// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - validate: Decides whether a string is a scannable http(s) URL
// - html: Extracts link and image references from HTML pages
// - http: Probes links and images with HEAD requests
// - issue: The Issue type every check produces
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod html;
mod http;
mod issue;
mod validate;

// Re-export public items from submodules
// This lets users write `checker::check_links()` instead of
// `checker::http::check_links()`
pub use html::{extract_references, ReferenceSet};
pub use http::{check_images, check_links, HttpClients, ImageProbeFault};
pub use issue::{Issue, IssueDetail, IssueKind};
pub use validate::is_valid_url;
