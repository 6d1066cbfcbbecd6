//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phpdd",
    version,
    about = "PHP deprecation report renderer",
    long_about = "phpdd renders the results of a PHP compatibility analysis as a terminal report, a JSON document or a JUnit XML report.\n\nConfiguration precedence: CLI > defaults.",
    after_help = "Examples:\n  phpdd render --input result.json\n  phpdd render --input result.yaml --output json --output-file report.json\n  analyzer | phpdd render --output junit --output-file junit.xml",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current phpdd version.")]
    Version,
    /// Render an analysis result
    #[command(
        about = "Render an analysis result",
        long_about = "Render the reports of an analysis run in the selected output format. Exits with 1 when issues were found.",
        after_help = "Examples:\n  phpdd render --input result.json --php-version 7.4\n  phpdd render --input result.toml --output junit --output-file junit.xml --verbose\n  phpdd render --input result.json --target 7.4 --exclude vendor src/"
    )]
    Render(RenderArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "TARGET", help = "Files or directories to report on (default: the whole result)")]
    pub targets: Vec<String>,
    #[arg(long, help = "Analysis result file (.json|.yaml|.yml|.toml); JSON from stdin when omitted")]
    pub input: Option<String>,
    #[arg(long, help = "Output mode: stdout|json|junit (default: stdout)")]
    pub output: Option<String>,
    #[arg(long, help = "Write the report to this file (json and junit only)")]
    pub output_file: Option<String>,
    #[arg(long, help = "PHP version you run, e.g. 7.4; marks versions you already passed")]
    pub php_version: Option<String>,
    #[arg(long, help = "Maximum width of the file column (default: 60)")]
    pub path_width: Option<usize>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Print settings and a summary (default for stdout)")]
    pub verbose: bool,
    #[arg(short, long, action = clap::ArgAction::SetTrue, conflicts_with = "verbose", help = "Suppress settings and summary")]
    pub quiet: bool,
    #[arg(short, long, help = "Target PHP version (default: newest available)")]
    pub target: Option<String>,
    #[arg(short, long, help = "Initial PHP version for checks (default: oldest available)")]
    pub after: Option<String>,
    #[arg(short = 'e', long, help = "Excluded file or directory names, comma-separated")]
    pub exclude: Option<String>,
    #[arg(short = 's', long, help = "Max size of a PHP file: <n>b|kb|mb|gb (default: 1mb)")]
    pub max_size: Option<String>,
    #[arg(long, help = "File extensions to analyze, comma-separated (default: php, php5, phtml)")]
    pub file_extensions: Option<String>,
    #[arg(long, help = "Skip checks containing any of the given values, comma-separated")]
    pub skip_checks: Option<String>,
}
