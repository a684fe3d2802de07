use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a ground-truth directory or a schedule file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ground truth directory '{}' does not exist or is not a directory", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed XML in '{}': {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("'{}' has no schedule container (expected a second top-level element)", path.display())]
    MissingContainer { path: PathBuf },

    #[error("game element #{index} in '{}' has no '{attribute}' attribute", path.display())]
    MissingAttribute {
        path: PathBuf,
        index: usize,
        attribute: &'static str,
    },

    #[error("game '{game_key}' in '{}' is not a valid record: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        game_key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry #{index} in '{}' is malformed: {reason}", path.display())]
    MalformedEntry {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

/// Field values that could not be interpreted while comparing one game.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Conversion error: {field}='{value}' (chrono: {source})")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Conversion error: {field}='{value}' (chrono: {source})")]
    InvalidTime {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Conversion error: wday='{value}' is not a weekday abbreviation")]
    InvalidWeekday { value: String },

    #[error("Conversion error: {field}='{value}' is not an integer")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Conversion error: {field}={value} is not a string")]
    InvalidText { field: &'static str, value: String },

    #[error("Conversion error: {field} is missing")]
    MissingField { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("game '{game_key}': {source}")]
    Compare {
        game_key: String,
        #[source]
        source: CompareError,
    },
}
