// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Open the log file and install the logger
// 3. Validate the base URL
// 4. Run the scan and print the issues it found
// 5. Exit with proper code (0 = scan finished, 2 = the scan itself failed)
//
// Finding broken links is NOT a failure: the exit code is 0 whether or not
// issues were found, and also for an invalid URL.
//
// Rust concepts used:
// - async/await: The HTTP client is async, so main runs inside tokio
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - validation, extraction and probing
mod cli; // src/cli.rs - command-line parsing
mod logging; // src/logging.rs - the scan log file
mod scan; // src/scan/ - fetching the page and running a scan

#[cfg(test)]
mod test_support;

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;

use anyhow::{Context, Result};
use std::io::{self, Write};
use checker::HttpClients;
use scan::{Report, ScanOptions, ScanTarget};
use tracing::{error, info};

const INVALID_URL_MESSAGE: &str = "Invalid base URL";
const NO_ISSUES_MESSAGE: &str = "No broken links or missing images found.";

// One request at a time, so a single-threaded runtime is all we need
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("Scan aborted: {:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = the scan ran (with or without issues), or the URL was invalid
//   Err = the log file could not be opened, or an image probe failed
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_file)?;

    run_with(cli, &mut io::stdout()).await
}

// Everything after argument parsing and log setup, printing to `out`
async fn run_with<W: Write>(cli: Cli, out: &mut W) -> Result<i32> {
    let base_url = cli.base_url.trim();
    if !checker::is_valid_url(base_url) {
        error!("Invalid base URL provided.");
        writeln!(out, "{}", INVALID_URL_MESSAGE)?;
        return Ok(0);
    }

    let clients = HttpClients::new().context("failed to build HTTP client")?;
    let options = ScanOptions { delay: cli.delay };

    let report = scan::scan(&ScanTarget::new(base_url), &clients, &options).await?;

    if report.is_empty() {
        info!("{}", NO_ISSUES_MESSAGE);
    } else {
        info!("{} issues found.", report.len());
    }

    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", render_report(&report))?;
    }

    Ok(0)
}

// Renders the report the way it is printed to the console
//
// Either the single "no issues" line, or "Issues found:" followed by one
// `<escaped url>: <detail>` line per issue.
fn render_report(report: &Report) -> String {
    if report.is_empty() {
        return format!("{}\n", NO_ISSUES_MESSAGE);
    }

    let mut out = String::from("Issues found:\n");
    for issue in &report.issues {
        out.push_str(&issue.to_console_line());
        out.push('\n');
    }
    out
}
