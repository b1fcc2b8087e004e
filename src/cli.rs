// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The interface is deliberately small:
//   page-sentry <BASE_URL> [--delay <SECONDS>] [--log-file <PATH>] [--json]
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Custom value parsers: Validate an argument while parsing it
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "page-sentry",
    version,
    about = "Scan a website for broken links and missing images.",
    long_about = "page-sentry fetches a single page, extracts every link and image on it \
                  and probes each one, reporting the ones that are broken or missing."
)]
pub struct Cli {
    /// Base URL of the website to scan
    ///
    /// This is a positional argument (required, no flag needed)
    pub base_url: String,

    /// Delay between requests (in seconds)
    ///
    /// The pause happens before every link probe, including the first one
    #[arg(long, default_value = "1.0", value_parser = parse_delay)]
    pub delay: Duration,

    /// File the scan log is appended to
    #[arg(long, default_value = "web_scanner.log")]
    pub log_file: PathBuf,

    /// Output results in JSON format instead of plain text
    #[arg(long)]
    pub json: bool,
}

// Turns "--delay 0.5" into a Duration
//
// Duration::from_secs_f64 panics on negative or NaN input, so we go through
// the fallible constructor and hand clap a readable error instead.
fn parse_delay(raw: &str) -> Result<Duration, String> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", raw))?;

    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("delay must be a finite, non-negative number of seconds (got {})", raw))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does `delay` have type Duration and not f64?
//    - clap runs our parse_delay function on the raw string
//    - Whatever it returns becomes the field value
//    - The rest of the program never has to think about "seconds as floats"
//
// 2. What does `version` without a value do?
//    - clap reads the version from Cargo.toml (CARGO_PKG_VERSION)
//
// 3. Why PathBuf for the log file?
//    - PathBuf is the owned path type (like String is for text)
//    - It works with non-UTF-8 file names on every platform
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["page-sentry", "https://example.com"]).unwrap();
        assert_eq!(cli.base_url, "https://example.com");
        assert_eq!(cli.delay, Duration::from_secs(1));
        assert_eq!(cli.log_file, PathBuf::from("web_scanner.log"));
        assert!(!cli.json);
    }

    #[test]
    fn test_fractional_delay() {
        let cli =
            Cli::try_parse_from(["page-sentry", "https://example.com", "--delay", "0.25"]).unwrap();
        assert_eq!(cli.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_bad_delay() {
        assert!(parse_delay("-1").is_err());
        assert!(parse_delay("NaN").is_err());
        assert!(parse_delay("soon").is_err());
        assert_eq!(parse_delay("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_base_url_is_required() {
        assert!(Cli::try_parse_from(["page-sentry"]).is_err());
    }
}
