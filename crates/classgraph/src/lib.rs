//! Classgraph - Turn TypeScript sources into Mermaid class diagrams
//!
//! A library for extracting classes, interfaces, functions and enums from
//! source code, deriving the relationships between them, and encoding the
//! result as Mermaid diagram text.
//!
//! # Quick Start
//!
//! ```rust
//! use classgraph::{generate, EncodeOptions};
//!
//! let source = "class Animal {}\nclass Dog extends Animal {}";
//! let diagram = generate(source, &EncodeOptions::default()).unwrap();
//! assert!(diagram.diagram_text.contains("Dog --|> Animal"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, run the stages separately:
//!
//! ```rust
//! use classgraph::prelude::*;
//!
//! let source = "interface Pet { name: string }\nclass Dog implements Pet { private age: number; }";
//!
//! // Analyze without private members
//! let options = AnalysisOptions::new().with_include_private(false);
//! let result = Analyzer::new(SourceLanguage::TypeScript)
//!     .with_options(options)
//!     .analyze(source)
//!     .unwrap();
//! assert_eq!(result.entities.len(), 2);
//! assert!(result.entity("Dog").unwrap().properties.is_empty());
//!
//! // Encode as a flowchart overview
//! let options = EncodeOptions::new(DiagramType::Flowchart).with_direction(Direction::LeftRight);
//! let diagram = EncoderRegistry::with_default_encoders()
//!     .encode(&result, &options)
//!     .unwrap();
//! assert!(diagram.diagram_text.starts_with("flowchart LR"));
//! ```

pub mod analysis;
pub mod core;
pub mod languages;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{analyze_tree, derive_relationships, extract, Analyzer};
    pub use crate::core::{
        AnalysisError, AnalysisOptions, AnalysisResult, DiagramEncoder, DiagramType, Direction,
        EncodeOptions, EncodedDiagram, Entity, EntityKind, GenerationError, Relationship,
        RelationshipKind, SyntaxNode,
    };
    pub use crate::languages::{SourceLanguage, TypeScriptParser};
    pub use crate::plugins::{ClassDiagramEncoder, EncoderRegistry, FlowchartEncoder};
}

use crate::analysis::Analyzer;
use crate::languages::SourceLanguage;
use crate::plugins::EncoderRegistry;

/// Analyze TypeScript source with default options
///
/// # Example
/// ```rust
/// use classgraph::{analyze, EntityKind};
///
/// let result = analyze("enum Color { Red, Green }").unwrap();
/// assert_eq!(result.entities[0].kind, EntityKind::Enum);
/// assert_eq!(result.entities[0].properties.len(), 2);
/// ```
pub fn analyze(source: &str) -> Result<AnalysisResult, AnalysisError> {
    analyze_with(source, SourceLanguage::default(), &AnalysisOptions::default())
}

/// Analyze source in a given language with explicit options
///
/// # Example
/// ```rust
/// use classgraph::analyze_with;
/// use classgraph::languages::SourceLanguage;
/// use classgraph::AnalysisOptions;
///
/// let options = AnalysisOptions::new().with_max_depth(1);
/// let result = analyze_with("class Outer {}", SourceLanguage::Tsx, &options).unwrap();
/// assert_eq!(result.metadata.language, "tsx");
/// ```
pub fn analyze_with(
    source: &str,
    language: SourceLanguage,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::new(language).with_options(*options).analyze(source)
}

/// Encode an analysis result with the default encoders
///
/// # Example
/// ```rust
/// use classgraph::{encode, AnalysisResult, DiagramType, EncodeOptions, Entity};
///
/// let result = AnalysisResult::from_parts(vec![Entity::interface("Pet")], Vec::new());
/// let diagram = encode(&result, &EncodeOptions::default()).unwrap();
/// assert!(diagram.diagram_text.contains("<<interface>>"));
///
/// let error = encode(&result, &EncodeOptions::new(DiagramType::Sequence)).unwrap_err();
/// assert_eq!(error.code(), "INVALID_DIAGRAM_TYPE");
/// ```
pub fn encode(
    result: &AnalysisResult,
    options: &EncodeOptions,
) -> Result<EncodedDiagram, GenerationError> {
    EncoderRegistry::with_default_encoders().encode(result, options)
}

/// Analyze TypeScript source and encode it in one call
pub fn generate(source: &str, options: &EncodeOptions) -> Result<EncodedDiagram, PipelineError> {
    let result = analyze(source)?;
    Ok(encode(&result, options)?)
}
