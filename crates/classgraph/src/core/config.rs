//! Analysis and encoding options

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use super::types::{DiagramType, Direction};

/// Smallest accepted declaration nesting depth
pub const MIN_DEPTH: usize = 1;
/// Largest accepted declaration nesting depth
pub const MAX_DEPTH: usize = 10;
/// Declaration nesting depth used when none is given
pub const DEFAULT_DEPTH: usize = 5;

/// Options for the extraction stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Keep members whose derived visibility is private
    pub include_private: bool,
    /// Reserved; extraction ignores comments either way
    pub include_comments: bool,
    /// How many levels of nested declarations are extracted
    pub max_depth: usize,
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_private(mut self, include_private: bool) -> Self {
        self.include_private = include_private;
        self
    }

    pub fn with_include_comments(mut self, include_comments: bool) -> Self {
        self.include_comments = include_comments;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that `max_depth` lies within `MIN_DEPTH..=MAX_DEPTH`
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if (MIN_DEPTH..=MAX_DEPTH).contains(&self.max_depth) {
            Ok(())
        } else {
            Err(AnalysisError::invalid_options(format!(
                "max_depth must be between {} and {}, got {}",
                MIN_DEPTH, MAX_DEPTH, self.max_depth
            )))
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_private: true,
            include_comments: false,
            max_depth: DEFAULT_DEPTH,
        }
    }
}

/// Options for the encoding stage
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeOptions {
    pub diagram_type: DiagramType,
    pub direction: Option<Direction>,
    pub include_title: bool,
    pub title: Option<String>,
}

impl EncodeOptions {
    pub fn new(diagram_type: DiagramType) -> Self {
        Self {
            diagram_type,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set a title and turn title emission on
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.include_title = true;
        self
    }

    pub fn with_include_title(mut self, include_title: bool) -> Self {
        self.include_title = include_title;
        self
    }

    /// Title to emit, if emission is requested and a non-blank title exists
    pub fn effective_title(&self) -> Option<&str> {
        if !self.include_title {
            return None;
        }
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}
