//! Error types shared by configuration, input loading and rendering.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid settings detected before any rendering starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Output is not valid: '{0}'. Available outputs: stdout, json, junit")]
    InvalidOutput(String),

    #[error("An output file can only be provided for: json, junit")]
    OutputFileNotAllowed,

    #[error("Target version is not valid: '{value}'. Available target versions: {available}")]
    InvalidTarget { value: String, available: String },

    #[error("After version is not valid: '{value}'. Available after versions: {available}")]
    InvalidAfter { value: String, available: String },

    #[error("Max size is not valid: '{0}'. Use a number followed by b, kb, mb or gb")]
    InvalidMaxSize(String),
}

/// A size template that cannot produce a number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeFormatError {
    #[error("size format '{0}' has no numeric placeholder")]
    MissingPlaceholder(String),
}

/// Failure to load an analysis result document.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read analysis result from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("unsupported input extension '.{ext}' for {path}")]
    UnsupportedExtension { ext: String, path: PathBuf },

    #[error("invalid JSON analysis result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML analysis result: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML analysis result: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure while composing or emitting a rendered document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),

    #[error("failed to serialize JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Size(#[from] SizeFormatError),
}
