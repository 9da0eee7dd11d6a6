// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr) and the analytics tracker
// 3. Run the health check and render the report
// 4. Exit with proper code (0 = no errors, 1 = error-level issues, 2 = failure)
// =============================================================================

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use seo_guardian::analytics::{AnalyticsEvent, Tracker};
use seo_guardian::checker::run_seo_health_check;
use seo_guardian::cli::{CheckArgs, Cli, Commands, OutputFormat};
use seo_guardian::logging;
use seo_guardian::report::{self, HealthReport};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        Commands::Check(args) => handle_check(&args).await,
    }
}

// Handles the 'check' subcommand
async fn handle_check(args: &CheckArgs) -> Result<i32> {
    let tracker = Tracker::from_kinds(&[args.analytics]);
    let config = args.to_config();

    tracing::info!(url = %args.url, "starting SEO health check");
    let report = run_seo_health_check(&args.url, &config).await?;

    let rendered = render(&report, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{}", rendered),
    }

    let event = AnalyticsEvent::new("seo_check_completed", "seo")
        .with_label(report.url.clone())
        .with_value(f64::from(report.overall_score))
        .with_property("errors", report.summary.errors)
        .with_property("warnings", report.summary.warnings)
        .with_property("pages", report.summary.pages_checked.len());
    tracker.track_when_idle(event).join().await;

    if report.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn render(report: &HealthReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => report::render_text(report),
        OutputFormat::Json => report::render_json(report)?,
        OutputFormat::Csv => report::render_csv(report),
        OutputFormat::Html => report::render_html(report),
    })
}
