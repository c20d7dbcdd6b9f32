//! Encoder registry for routing diagram requests
//!
//! The registry owns one encoder per diagram type and dispatches an
//! [`EncodeOptions`] request to the matching one.

use std::collections::HashMap;

use tracing::{debug, info, span, warn, Level};

use crate::core::{
    AnalysisResult, DiagramEncoder, DiagramType, EncodeOptions, EncodedDiagram, GenerationError,
};
use crate::plugins::{ClassDiagramEncoder, FlowchartEncoder};

/// Registry that routes a diagram type to its encoder
///
/// Diagram types are recognised even when no encoder is registered for them;
/// requesting one fails with `INVALID_DIAGRAM_TYPE`.
pub struct EncoderRegistry {
    encoders: HashMap<DiagramType, Box<dyn DiagramEncoder>>,
}

impl EncoderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            encoders: HashMap::new(),
        }
    }

    /// Create a registry with the class and flowchart encoders
    pub fn with_default_encoders() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ClassDiagramEncoder::new()));
        registry.register(Box::new(FlowchartEncoder::new()));
        registry
    }

    /// Register an encoder, replacing any previous one for the same type
    pub fn register(&mut self, encoder: Box<dyn DiagramEncoder>) {
        let diagram_type = encoder.diagram_type();
        debug!(%diagram_type, encoder = encoder.name(), "Registering encoder");
        self.encoders.insert(diagram_type, encoder);
    }

    pub fn has_encoder(&self, diagram_type: DiagramType) -> bool {
        self.encoders.contains_key(&diagram_type)
    }

    /// Diagram types with a registered encoder, in declaration order
    pub fn supported_types(&self) -> Vec<DiagramType> {
        DiagramType::variants()
            .iter()
            .copied()
            .filter(|diagram_type| self.has_encoder(*diagram_type))
            .collect()
    }

    /// Encode the result with the encoder for `options.diagram_type`
    pub fn encode(
        &self,
        result: &AnalysisResult,
        options: &EncodeOptions,
    ) -> Result<EncodedDiagram, GenerationError> {
        let encode_span = span!(
            Level::INFO,
            "encode",
            diagram_type = %options.diagram_type,
            entities = result.entities.len()
        );
        let _enter = encode_span.enter();

        let Some(encoder) = self.encoders.get(&options.diagram_type) else {
            warn!(requested = %options.diagram_type, "No encoder registered for diagram type");
            return Err(GenerationError::invalid_diagram_type(
                options.diagram_type,
                self.supported_list(),
            ));
        };

        let diagram = encoder.encode(result, options)?;
        info!(
            encoder = encoder.name(),
            node_count = diagram.metadata.node_count,
            edge_count = diagram.metadata.edge_count,
            "Diagram generated"
        );
        Ok(diagram)
    }

    fn supported_list(&self) -> String {
        self.supported_types()
            .iter()
            .map(DiagramType::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::with_default_encoders()
    }
}
