//! Effective settings resolution.
//!
//! CLI flags are validated and merged with defaults into a `Settings`
//! value. Defaults:
//! - `output`: `stdout`
//! - `path_width`: 60
//! - `verbose`: on for `stdout`, off for `json`/`junit`
//! - `target`: newest available version, `after`: oldest
//! - `max_size`: `1mb`
//! - `file_extensions`: `php, php5, phtml`
//!
//! Overrides precedence: CLI > defaults.

use crate::cli::RenderArgs;
use crate::error::ConfigError;
use crate::output::{OutputMode, RenderContext};
use crate::size::format_size;
use std::path::PathBuf;

/// Versions the analyzer has rules for, oldest first.
pub const AVAILABLE_TARGETS: [&str; 10] = [
    "5.3", "5.4", "5.5", "5.6", "7.0", "7.1", "7.2", "7.3", "7.4", "8.0",
];

pub const DEFAULT_FILE_EXTENSIONS: [&str; 3] = ["php", "php5", "phtml"];

pub const DEFAULT_MAX_SIZE: &str = "1mb";

pub const DEFAULT_PATH_WIDTH: usize = 60;

const SIZE_UNITS: [&str; 4] = ["b", "kb", "mb", "gb"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Analyzer-side settings carried from the command line to the engine.
pub struct ScanSettings {
    pub target: String,
    pub after: String,
    /// Files larger than this many bytes are skipped.
    pub max_size: u64,
    pub exclude: Vec<String>,
    pub file_extensions: Vec<String>,
    pub skip_checks: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            target: AVAILABLE_TARGETS[AVAILABLE_TARGETS.len() - 1].to_string(),
            after: AVAILABLE_TARGETS[0].to_string(),
            max_size: 1024 * 1024,
            exclude: Vec::new(),
            file_extensions: DEFAULT_FILE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            skip_checks: Vec::new(),
        }
    }
}

impl ScanSettings {
    /// Human messages describing non-default values, for verbose runs.
    pub fn announcements(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Ok(size) = format_size("%.3F Ui", self.max_size as i64, "") {
            out.push(format!("Max file size set to: {size}"));
        }
        if !self.exclude.is_empty() {
            out.push(format!(
                "Excluding following files / directories: {}",
                self.exclude.join(", ")
            ));
        }
        if self.file_extensions != DEFAULT_FILE_EXTENSIONS {
            out.push(format!(
                "File extensions set to: {}",
                self.file_extensions.join(", ")
            ));
        }
        if !self.skip_checks.is_empty() {
            out.push(format!(
                "Skipping checks containing any of the following values: {}",
                self.skip_checks.join(", ")
            ));
        }
        out
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the `render` command.
pub struct Settings {
    pub output: OutputMode,
    pub output_file: Option<PathBuf>,
    pub input: Option<PathBuf>,
    /// Scan targets; empty means every recorded report.
    pub targets: Vec<PathBuf>,
    pub php_version: Option<String>,
    pub path_width: usize,
    pub verbose: bool,
    pub scan: ScanSettings,
}

impl Settings {
    /// Validated rendering context for the dispatcher.
    pub fn render_context(&self) -> Result<RenderContext, ConfigError> {
        Ok(
            RenderContext::new(self.output, self.output_file.clone(), self.verbose)?
                .with_current_version(self.php_version.clone())
                .with_path_width(self.path_width),
        )
    }
}

/// Resolve CLI arguments into effective settings.
pub fn resolve_effective(args: &RenderArgs) -> Result<Settings, ConfigError> {
    let output = match args.output.as_deref() {
        Some(s) => s.parse::<OutputMode>()?,
        None => OutputMode::default(),
    };
    let output_file = args.output_file.as_ref().map(PathBuf::from);
    if output == OutputMode::Stdout && output_file.is_some() {
        return Err(ConfigError::OutputFileNotAllowed);
    }
    let verbose = if args.quiet {
        false
    } else {
        args.verbose || !output.is_machine_readable()
    };

    let scan = ScanSettings {
        target: parse_version(args.target.as_deref(), AVAILABLE_TARGETS.len() - 1, |value| {
            ConfigError::InvalidTarget {
                value,
                available: AVAILABLE_TARGETS.join(", "),
            }
        })?,
        after: parse_version(args.after.as_deref(), 0, |value| ConfigError::InvalidAfter {
            value,
            available: AVAILABLE_TARGETS.join(", "),
        })?,
        max_size: parse_max_size(args.max_size.as_deref().unwrap_or(DEFAULT_MAX_SIZE))?,
        exclude: args
            .exclude
            .as_deref()
            .map(parse_exclude_list)
            .unwrap_or_default(),
        file_extensions: args
            .file_extensions
            .as_deref()
            .map(parse_lower_list)
            .unwrap_or_else(|| ScanSettings::default().file_extensions),
        skip_checks: args
            .skip_checks
            .as_deref()
            .map(|s| s.split(',').map(str::to_lowercase).collect())
            .unwrap_or_default(),
    };

    Ok(Settings {
        output,
        output_file,
        input: args.input.as_ref().map(PathBuf::from),
        targets: args.targets.iter().map(PathBuf::from).collect(),
        php_version: args.php_version.clone(),
        path_width: args.path_width.unwrap_or(DEFAULT_PATH_WIDTH),
        verbose,
        scan,
    })
}

fn parse_version(
    value: Option<&str>,
    default_idx: usize,
    err: impl FnOnce(String) -> ConfigError,
) -> Result<String, ConfigError> {
    match value {
        None | Some("") => Ok(AVAILABLE_TARGETS[default_idx].to_string()),
        Some(v) if AVAILABLE_TARGETS.contains(&v) => Ok(v.to_string()),
        Some(v) => Err(err(v.to_string())),
    }
}

/// Parse `<n>b|kb|mb|gb` (case-insensitive, 1024-based) into bytes.
pub fn parse_max_size(value: &str) -> Result<u64, ConfigError> {
    let lower = value.trim().to_ascii_lowercase();
    let invalid = || ConfigError::InvalidMaxSize(value.to_string());
    let (power, digits) = SIZE_UNITS
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, unit)| lower.strip_suffix(unit).map(|d| (i as u32, d)))
        .ok_or_else(invalid)?;
    let n: u64 = digits.trim().parse().map_err(|_| invalid())?;
    n.checked_mul(1024u64.pow(power)).ok_or_else(invalid)
}

fn parse_exclude_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim_matches(|c| c == '/' || c == '\\' || c == ' ').to_lowercase())
        .collect()
}

fn parse_lower_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.trim().to_lowercase()).collect()
}
