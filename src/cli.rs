// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is one subcommand today, `check`, which runs the SEO health check
// against a site and prints the report. Everything the check can be tuned
// with is a flag here; there is no config file.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::analytics::ProviderKind;
use crate::checker::{CheckConfig, DEFAULT_MAX_PAGES};

#[derive(Parser, Debug)]
#[command(
    name = "seo-guardian",
    version,
    about = "Run an SEO health check against a website",
    long_about = "seo-guardian fetches robots.txt, sitemap.xml and the home page (or chosen pages) of a site, \
                  checks them for common SEO problems and prints a scored report. \
                  Exits with 1 when error-level issues are found, which makes it usable in CI."
)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a website and print its SEO health report
    ///
    /// Example: seo-guardian check https://example.com --page /products --format html
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Base URL of the site (e.g., https://example.com)
    pub url: String,

    /// Page path to check; repeat for several pages.
    /// Without it, only the home page is checked.
    #[arg(long = "page", value_name = "PATH")]
    pub pages: Vec<String>,

    /// Also check same-site pages linked from the home page (ignored with --page)
    #[arg(long)]
    pub discover: bool,

    /// Maximum number of pages to check
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Timeout for each request, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Where to send analytics events about the run
    #[arg(long, value_enum, default_value_t = ProviderKind::None)]
    pub analytics: ProviderKind,
}

impl CheckArgs {
    pub fn to_config(&self) -> CheckConfig {
        CheckConfig {
            pages: self.pages.clone(),
            discover: self.discover,
            max_pages: self.max_pages,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}
