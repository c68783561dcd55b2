//! Error types for the jsongrid library.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification of a [`GridError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    SizeLimitExceeded,
    EmptyInput,
    MalformedJson,
    WrongTopLevelShape,
    EmptyDataset,
    InvalidRecordShape,
    UnsupportedNestedArray,
    NestingDepthExceeded,
    NoColumnsFound,
    FileReadFailure,
    /// Anything outside the parser taxonomy.
    Unknown,
}

impl ErrorKind {
    /// Stable code suitable for conditional UI messaging.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::SizeLimitExceeded => "SIZE_LIMIT_EXCEEDED",
            ErrorKind::EmptyInput => "EMPTY_INPUT",
            ErrorKind::MalformedJson => "MALFORMED_JSON",
            ErrorKind::WrongTopLevelShape => "WRONG_TOP_LEVEL_SHAPE",
            ErrorKind::EmptyDataset => "EMPTY_DATASET",
            ErrorKind::InvalidRecordShape => "INVALID_RECORD_SHAPE",
            ErrorKind::UnsupportedNestedArray => "UNSUPPORTED_NESTED_ARRAY",
            ErrorKind::NestingDepthExceeded => "NESTING_DEPTH_EXCEEDED",
            ErrorKind::NoColumnsFound => "NO_COLUMNS_FOUND",
            ErrorKind::FileReadFailure => "FILE_READ_FAILURE",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.code())
    }
}

/// Main error type for jsongrid operations.
#[derive(Debug, Error)]
pub enum GridError {
    /// Input is larger than the configured limit.
    #[error("Input is {size} bytes, which exceeds the maximum of {max} bytes")]
    SizeLimitExceeded { size: u64, max: u64 },

    /// Input is empty or whitespace only.
    #[error("Input is empty")]
    EmptyInput,

    /// Input is not valid JSON.
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// Top-level JSON value is not an array.
    #[error("Expected a JSON array of records, found {found}")]
    WrongTopLevelShape { found: &'static str },

    /// Top-level array has no elements.
    #[error("Dataset contains no records")]
    EmptyDataset,

    /// A record is not a JSON object.
    #[error("Record {index} must be an object, found {found}")]
    InvalidRecordShape { index: usize, found: &'static str },

    /// A record holds an array value.
    #[error("Record {index} has an array at key '{key}'; arrays are not supported as cell values")]
    UnsupportedNestedArray { index: usize, key: String },

    /// A nested object is deeper than allowed.
    #[error("Record {index} nests too deeply at key '{key}' (maximum depth is {max_depth})")]
    NestingDepthExceeded {
        index: usize,
        key: String,
        max_depth: usize,
    },

    /// The first record has no keys.
    #[error("No columns found: the first record has no fields")]
    NoColumnsFound,

    /// A file source could not be read.
    #[error("Failed to read '{name}': {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A `pattern` rule operand is not a valid regular expression.
    #[error("Invalid pattern rule on column '{column}': {source}")]
    InvalidPattern {
        column: String,
        #[source]
        source: regex::Error,
    },
}

impl GridError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::SizeLimitExceeded { .. } => ErrorKind::SizeLimitExceeded,
            GridError::EmptyInput => ErrorKind::EmptyInput,
            GridError::MalformedJson(_) => ErrorKind::MalformedJson,
            GridError::WrongTopLevelShape { .. } => ErrorKind::WrongTopLevelShape,
            GridError::EmptyDataset => ErrorKind::EmptyDataset,
            GridError::InvalidRecordShape { .. } => ErrorKind::InvalidRecordShape,
            GridError::UnsupportedNestedArray { .. } => ErrorKind::UnsupportedNestedArray,
            GridError::NestingDepthExceeded { .. } => ErrorKind::NestingDepthExceeded,
            GridError::NoColumnsFound => ErrorKind::NoColumnsFound,
            GridError::FileRead { .. } => ErrorKind::FileReadFailure,
            GridError::Config(_) | GridError::InvalidPattern { .. } => ErrorKind::Unknown,
        }
    }
}

/// Result type alias for jsongrid operations.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        let err = GridError::SizeLimitExceeded { size: 10, max: 5 };
        assert_eq!(err.kind(), ErrorKind::SizeLimitExceeded);
        assert_eq!(err.kind().code(), "SIZE_LIMIT_EXCEEDED");
        assert!(err.to_string().contains("10 bytes"));
    }

    #[test]
    fn test_invalid_pattern_is_unknown() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = GridError::InvalidPattern {
            column: "zip".to_string(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_kind_serializes_as_code() {
        let json = serde_json::to_string(&ErrorKind::NestingDepthExceeded).unwrap();
        assert_eq!(json, "\"NESTING_DEPTH_EXCEEDED\"");
    }
}
