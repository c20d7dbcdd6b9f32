//! Core error types for analysis and diagram generation
//!
//! Extraction itself degrades instead of failing; only a missing tree or bad
//! options surface as [`AnalysisError`]. Encoders fail with
//! [`GenerationError`] and never return partial text.

use std::fmt;

use thiserror::Error;

use super::model::AnalysisResult;
use super::types::DiagramType;

/// Maximum number of source characters kept in an error snippet
pub const SNIPPET_LIMIT: usize = 200;

/// Machine-readable analysis failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisErrorCode {
    /// The grammar could not be loaded into the parser
    Language,
    /// The parser produced no tree
    Parse,
    /// Analysis options are out of range
    InvalidOptions,
}

impl AnalysisErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisErrorCode::Language => "LANGUAGE_ERROR",
            AnalysisErrorCode::Parse => "PARSE_ERROR",
            AnalysisErrorCode::InvalidOptions => "INVALID_OPTIONS",
        }
    }
}

impl fmt::Display for AnalysisErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to obtain a syntax tree for a source document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Analysis error [{code}]: {message}")]
pub struct AnalysisError {
    pub code: AnalysisErrorCode,
    pub message: String,
    /// Leading part of the source, for diagnosis
    pub snippet: String,
}

impl AnalysisError {
    pub fn new(code: AnalysisErrorCode, message: impl Into<String>, source: &str) -> Self {
        Self {
            code,
            message: message.into(),
            snippet: snippet(source),
        }
    }

    /// Create a new language error
    pub fn language_error(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCode::Language, message, "")
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, source: &str) -> Self {
        Self::new(AnalysisErrorCode::Parse, message, source)
    }

    /// Create a new invalid options error
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCode::InvalidOptions, message, "")
    }
}

/// Truncate source text to [`SNIPPET_LIMIT`] characters
pub fn snippet(source: &str) -> String {
    match source.char_indices().nth(SNIPPET_LIMIT) {
        Some((idx, _)) => format!("{}...", &source[..idx]),
        None => source.to_string(),
    }
}

/// Failure while encoding an analysis result into diagram text
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid diagram type: requested {requested}, supported {supported}")]
    InvalidDiagramType {
        requested: DiagramType,
        supported: String,
    },

    #[error("Generation error [{code}]: {source}")]
    Generation {
        code: &'static str,
        #[source]
        source: fmt::Error,
        /// Input that was being encoded when the failure happened
        snapshot: Box<AnalysisResult>,
    },
}

impl GenerationError {
    /// Create an invalid diagram type error
    pub fn invalid_diagram_type(requested: DiagramType, supported: impl fmt::Display) -> Self {
        Self::InvalidDiagramType {
            requested,
            supported: supported.to_string(),
        }
    }

    /// Wrap an emission failure together with the input that caused it
    pub fn generation(code: &'static str, source: fmt::Error, snapshot: &AnalysisResult) -> Self {
        Self::Generation {
            code,
            source,
            snapshot: Box::new(snapshot.clone()),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::InvalidDiagramType { .. } => "INVALID_DIAGRAM_TYPE",
            GenerationError::Generation { code, .. } => code,
        }
    }
}

/// Failure of either stage when running source straight to diagram text
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Analysis(error) => error.code.as_str(),
            PipelineError::Generation(error) => error.code(),
        }
    }
}
