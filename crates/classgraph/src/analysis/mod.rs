//! Structural analysis pipeline
//!
//! Source text → syntax tree → entities → relationships. [`Analyzer`] runs
//! the whole pipeline with the bundled tree-sitter grammars;
//! [`analyze_tree`] accepts a root node from any provider implementing
//! [`SyntaxNode`].

mod extract;
mod imports;
mod relationships;

pub use extract::extract;
pub use imports::{extract_exports, extract_imports, DEFAULT_EXPORT};
pub use relationships::{derive_relationships, IMPLEMENTS_LABEL};

use std::time::Instant;

use tracing::{debug, info, span, Level};

use crate::core::{AnalysisError, AnalysisMetadata, AnalysisOptions, AnalysisResult, SyntaxNode};
use crate::languages::{SourceLanguage, TsNode, TypeScriptParser};

/// Analyze an already parsed tree
pub fn analyze_tree<N: SyntaxNode>(
    root: N,
    source: &str,
    language: &str,
    options: &AnalysisOptions,
) -> AnalysisResult {
    let started = Instant::now();

    let entities = extract(root, options);
    let relationships = derive_relationships(&entities);
    let imports = extract_imports(root);
    let exports = extract_exports(root);
    debug!(
        entities = entities.len(),
        relationships = relationships.len(),
        imports = imports.len(),
        exports = exports.len(),
        "Structural model built"
    );

    let metadata = AnalysisMetadata {
        language: language.to_string(),
        line_count: source.lines().count(),
        entity_count: entities.len(),
        relationship_count: relationships.len(),
        analysis_time_ms: started.elapsed().as_millis() as u64,
    };

    AnalysisResult {
        entities,
        relationships,
        imports,
        exports,
        metadata,
    }
}

/// Runs parsing and extraction for one source language
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    parser: TypeScriptParser,
    options: AnalysisOptions,
}

impl Analyzer {
    pub fn new(language: SourceLanguage) -> Self {
        Self {
            parser: TypeScriptParser::new(language),
            options: AnalysisOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn language(&self) -> SourceLanguage {
        self.parser.language()
    }

    /// Analyze one source document
    ///
    /// Fails only when options are out of range or no tree can be produced.
    /// Syntax errors inside the source yield partial results.
    pub fn analyze(&self, source: &str) -> Result<AnalysisResult, AnalysisError> {
        let analyze_span = span!(
            Level::INFO,
            "analyze",
            language = %self.language(),
            input_len = source.len()
        );
        let _enter = analyze_span.enter();

        self.options.validate()?;
        let tree = self.parser.parse(source)?;
        let root = TsNode::root(&tree, source);
        let result = analyze_tree(root, source, self.language().name(), &self.options);

        info!(
            entities = result.metadata.entity_count,
            relationships = result.metadata.relationship_count,
            "Analysis completed"
        );
        Ok(result)
    }
}
