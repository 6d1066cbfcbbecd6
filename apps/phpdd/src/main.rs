//! phpdd CLI binary entry point.
//! Loads an analysis result, renders it and maps the outcome to an exit code.

use anyhow::{Context, Result};
use clap::Parser;
use phpdd::analyzer::{scan_targets, Analyzer, RecordedAnalyzer};
use phpdd::cli::{Cli, Commands, RenderArgs};
use phpdd::config;
use phpdd::models::input::{self, AnalysisResult};
use phpdd::output;
use phpdd::utils::{error_prefix, info_prefix, note_prefix};
use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Render(args) => match run_render(&args) {
            Ok(true) => std::process::exit(1),
            Ok(false) => {}
            Err(e) => {
                eprintln!("{} {:#}", error_prefix(), e);
                std::process::exit(2);
            }
        },
    }
}

/// Returns whether any issue was rendered.
fn run_render(args: &RenderArgs) -> Result<bool> {
    let eff = config::resolve_effective(args)?;
    let ctx = eff.render_context()?;

    if eff.verbose {
        for msg in eff.scan.announcements() {
            eprintln!("{} {}", info_prefix(), msg);
        }
    }

    let result: AnalysisResult = match &eff.input {
        Some(path) => input::load_file(path)
            .with_context(|| format!("loading analysis result {}", path.display()))?,
        None => input::load_reader(io::stdin().lock())
            .context("loading analysis result from stdin")?,
    };
    if result.reports.is_empty() && eff.verbose {
        eprintln!("{} {}", note_prefix(), "Analysis result contains no reports.");
    }

    let mut analyzer = RecordedAnalyzer::new(result);
    analyzer.configure(&eff.scan);
    let reports = if eff.targets.is_empty() {
        analyzer.replay_all()
    } else {
        scan_targets(&mut analyzer, &eff.targets)
    };
    let scanned_files = analyzer.scanned_files();

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let totals = output::dispatch(&ctx, &reports, &scanned_files, &mut stdout, &mut stderr)?;
    Ok(totals.has_issue)
}
