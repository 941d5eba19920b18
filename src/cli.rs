// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The tool takes a single positional URL plus two optional directory
// options, so there are no subcommands here - just one flat struct.
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "sitemap",
    version,
    about = "Create an XML sitemap for your website so search engines can find your site",
    long_about = "sitemap crawls every page reachable from your website's root URL and writes a \
                  standards-compliant sitemap.xml that search engines can consume."
)]
pub struct Cli {
    /// Your website domain to crawl (e.g. https://example.com)
    ///
    /// Optional on purpose: running the tool with no URL prints the help
    /// text and exits cleanly instead of failing
    pub url: Option<String>,

    /// Directory to save the sitemap. Defaults to the current directory. Saves as sitemap.xml
    #[arg(short = 'P', long = "path")]
    pub sitemap_path: Option<String>,

    /// Directory to save logs. Skipped when not provided. Saves as sitemap_generator_logs.txt
    #[arg(short = 'L', long = "log-path")]
    pub log_path: Option<String>,
}
