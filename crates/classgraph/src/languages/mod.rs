//! Syntax providers for supported source languages
//!
//! Only the TypeScript family ships today. A new language needs a parser
//! producing nodes that implement [`crate::core::SyntaxNode`]; the extractor
//! and encoders stay untouched.

mod typescript;

pub use typescript::{TsNode, TypeScriptParser};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source languages with a bundled grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    #[default]
    TypeScript,
    /// TypeScript or JavaScript with JSX
    Tsx,
}

impl SourceLanguage {
    /// Pick a grammar from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "typescript",
            SourceLanguage::Tsx => "tsx",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Ok(SourceLanguage::TypeScript),
            "tsx" | "jsx" | "javascript" | "js" => Ok(SourceLanguage::Tsx),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
