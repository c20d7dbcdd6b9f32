//! Core encoder trait for diagram output
//!
//! This trait defines the interface for turning an analysis result into
//! diagram notation text. Each encoder supports exactly one diagram type.

use serde::{Deserialize, Serialize};

use super::config::EncodeOptions;
use super::error::GenerationError;
use super::model::AnalysisResult;
use super::types::DiagramType;

/// Statistics about one encoded diagram
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramMetadata {
    /// Rendered blocks or nodes
    pub node_count: usize,
    /// Rendered relationship lines
    pub edge_count: usize,
    pub generation_time_ms: u64,
    pub diagram_type: DiagramType,
}

/// Diagram text plus statistics
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedDiagram {
    pub diagram_text: String,
    pub metadata: DiagramMetadata,
}

/// Core trait for diagram encoders
///
/// # Example
/// ```
/// use classgraph::core::{AnalysisResult, DiagramEncoder, EncodeOptions, Entity};
/// use classgraph::plugins::ClassDiagramEncoder;
///
/// let result = AnalysisResult::from_parts(vec![Entity::class("Dog")], Vec::new());
/// let encoder = ClassDiagramEncoder::new();
/// let diagram = encoder.encode(&result, &EncodeOptions::default()).unwrap();
/// assert!(diagram.diagram_text.starts_with("classDiagram"));
/// ```
pub trait DiagramEncoder: Send + Sync {
    /// The single diagram type this encoder produces
    fn diagram_type(&self) -> DiagramType;

    /// Encode the analysis result
    ///
    /// Fails with `InvalidDiagramType` when `options.diagram_type` differs
    /// from [`DiagramEncoder::diagram_type`]. Never returns partial text.
    fn encode(
        &self,
        result: &AnalysisResult,
        options: &EncodeOptions,
    ) -> Result<EncodedDiagram, GenerationError>;

    /// Get the name of this encoder
    fn name(&self) -> &'static str;
}
