// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Crawl the website starting from the seed URL
// 3. Assemble the collected records into sitemap.xml
// 4. Persist the run log if a log directory was given
// 5. Exit with proper code (0 = success or no URL, 1 = sitemap failed,
//    2 = unexpected error)
//
// The crawl itself is sequential - one fetch in flight at a time - so the
// async runtime is here for the network suspension points, Ctrl-C handling
// and async file IO, not for parallelism.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; //     src/cli.rs      - command-line parsing
mod crawl; //   src/crawl/      - traversal engine and fetching
mod links; //   src/links/      - link extraction and classification
mod run_log; // src/run_log.rs  - buffered run log
mod sitemap; // src/sitemap/    - sitemap assembly and writing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use url::Url;

use cli::Cli;
use crawl::{Crawler, HttpFetcher};
use run_log::RunLog;
use sitemap::write_sitemap;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // An unexpected error (bad seed URL, broken terminal, ...)
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
// Returns:
//   Ok(0) = sitemap written, or no URL given (help shown)
//   Ok(1) = sitemap assembly failed
//   Err   = unexpected error (becomes exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut log = RunLog::new();
    log.log(&format!("--- Starting sitemap generator. DateTime UTC = {} ---", Utc::now()));

    // No URL is not an error: show the help text and exit cleanly
    let Some(seed) = cli.url.as_deref().filter(|url| !url.is_empty()) else {
        log.error("Url was empty");
        Cli::command().print_help()?;
        return Ok(0);
    };

    let root =
        Url::parse(seed).with_context(|| format!("'{seed}' is not a valid absolute URL"))?;

    // Ctrl-C flips the cancellation flag; the crawler checks it before every
    // fetch and winds down without losing the records collected so far
    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = cancelled.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancelled.store(true, Ordering::Relaxed);
            }
        });
    }

    log.log(&format!("🔍 Crawling {root}"));
    let fetcher = HttpFetcher::new()?;
    let records = Crawler::new(&fetcher, root.clone(), &mut log, &cancelled).crawl().await;

    log.log(&format!("Crawling complete. Found {} page(s).", records.len()));
    log.log("Attempting to generate sitemap.");

    let exit_code = match write_sitemap(&records, cli.sitemap_path.as_deref(), &mut log).await {
        Ok(path) => {
            log.log(&format!("✅ Sitemap generated at {}", path.display()));
            0
        }
        Err(e) => {
            log.error(&format!(
                "There was an error while creating the sitemap for {root} - {e:#}"
            ));
            1
        }
    };

    save_logs(&log, cli.log_path.as_deref());
    Ok(exit_code)
}

// Persists the run log when --log-path was given
//
// A missing or invalid directory only costs us the log file, never the
// exit code - the sitemap result is what the caller cares about.
fn save_logs(log: &RunLog, log_path: Option<&str>) {
    let Some(dir) = log_path else {
        eprintln!("Log path was not provided, skipped saving logs");
        return;
    };

    match log.save_to(dir) {
        Ok(path) => println!("💾 Saved logs to {}", path.display()),
        Err(e) => eprintln!("Log path was invalid, skipped saving logs: {e:#}"),
    }
}
