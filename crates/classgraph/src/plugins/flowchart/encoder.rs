//! Flowchart encoder
//!
//! Emits a Mermaid `flowchart` overview of the structural graph. Every entity
//! becomes a node shaped by its kind; members are not shown.

use std::fmt::{self, Write};
use std::time::Instant;

use tracing::{debug, span, warn, Level};

use crate::core::{
    escape_label, sanitize_identifier, single_line, AnalysisResult, DiagramEncoder,
    DiagramMetadata, DiagramType, Direction, EdgeType, EncodeOptions, EncodedDiagram, Entity,
    EntityKind, GenerationError, NodeShape, Relationship, RelationshipKind,
};

/// Error code for emission failures in this encoder
pub const FLOWCHART_GENERATION_ERROR: &str = "FLOWCHART_GENERATION_ERROR";

const INDENT: &str = "    ";

/// Words Mermaid flowcharts treat as syntax wherever a node id may appear
const RESERVED_IDS: &[&str] = &["end"];

/// Node shape used for each entity kind
pub fn shape_for(kind: EntityKind) -> NodeShape {
    match kind {
        EntityKind::Class => NodeShape::Rectangle,
        EntityKind::Interface => NodeShape::Stadium,
        EntityKind::Function => NodeShape::Subroutine,
        EntityKind::Enum => NodeShape::Hexagon,
        EntityKind::Variable => NodeShape::RoundedRect,
    }
}

/// Edge token used for each relationship kind
pub fn edge_for(kind: RelationshipKind) -> EdgeType {
    match kind {
        RelationshipKind::Inheritance => EdgeType::Arrow,
        RelationshipKind::Dependency => EdgeType::DottedArrow,
        RelationshipKind::Composition => EdgeType::ThickArrow,
        RelationshipKind::Aggregation => EdgeType::OpenArrow,
        RelationshipKind::Association => EdgeType::Line,
    }
}

/// Mermaid flowchart encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowchartEncoder;

impl FlowchartEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode into any writer
    pub fn encode_to<W: Write>(
        &self,
        out: &mut W,
        result: &AnalysisResult,
        options: &EncodeOptions,
    ) -> Result<DiagramMetadata, GenerationError> {
        if options.diagram_type != DiagramType::Flowchart {
            warn!(requested = %options.diagram_type, "Flowchart encoder cannot produce this diagram type");
            return Err(GenerationError::invalid_diagram_type(
                options.diagram_type,
                DiagramType::Flowchart,
            ));
        }

        let started = Instant::now();
        write_diagram(out, result, options)
            .map_err(|source| GenerationError::generation(FLOWCHART_GENERATION_ERROR, source, result))?;

        Ok(DiagramMetadata {
            node_count: result.entities.len(),
            edge_count: result.relationships.len(),
            generation_time_ms: started.elapsed().as_millis() as u64,
            diagram_type: DiagramType::Flowchart,
        })
    }
}

impl DiagramEncoder for FlowchartEncoder {
    fn diagram_type(&self) -> DiagramType {
        DiagramType::Flowchart
    }

    fn encode(
        &self,
        result: &AnalysisResult,
        options: &EncodeOptions,
    ) -> Result<EncodedDiagram, GenerationError> {
        let encode_span = span!(
            Level::DEBUG,
            "encode_flowchart",
            entities = result.entities.len(),
            relationships = result.relationships.len()
        );
        let _enter = encode_span.enter();

        let mut diagram_text = String::new();
        let metadata = self.encode_to(&mut diagram_text, result, options)?;
        debug!(
            node_count = metadata.node_count,
            edge_count = metadata.edge_count,
            "Flowchart encoded"
        );

        Ok(EncodedDiagram {
            diagram_text,
            metadata,
        })
    }

    fn name(&self) -> &'static str {
        "mermaid-flowchart"
    }
}

fn write_diagram<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    options: &EncodeOptions,
) -> fmt::Result {
    let direction = options.direction.unwrap_or(Direction::TopBottom);
    writeln!(out, "{} {direction}", DiagramType::Flowchart.keyword())?;
    if let Some(title) = options.effective_title() {
        writeln!(out, "{INDENT}accTitle: {}", single_line(title))?;
    }

    for entity in &result.entities {
        write_node(out, entity)?;
    }
    for relationship in &result.relationships {
        write_edge(out, relationship)?;
    }
    Ok(())
}

/// Flowchart node id for an entity name
///
/// Sanitized like every other identifier, with reserved words suffixed by `_`
/// so nodes and edges keep referring to the same id.
fn node_id(name: &str) -> String {
    let id = sanitize_identifier(name);
    if RESERVED_IDS.contains(&id.as_str()) {
        format!("{id}_")
    } else {
        id
    }
}

fn write_node<W: Write>(out: &mut W, entity: &Entity) -> fmt::Result {
    let (open, close) = shape_for(entity.kind).delimiters();
    writeln!(
        out,
        "{INDENT}{}{open}\"{}\"{close}",
        node_id(&entity.name),
        escape_label(&entity.name)
    )
}

fn write_edge<W: Write>(out: &mut W, relationship: &Relationship) -> fmt::Result {
    write!(
        out,
        "{INDENT}{} {}",
        node_id(&relationship.from),
        edge_for(relationship.kind)
    )?;
    let label = relationship
        .label
        .as_deref()
        .map(escape_label)
        .filter(|label| !label.is_empty());
    if let Some(label) = label {
        write!(out, "|{label}|")?;
    }
    writeln!(out, " {}", node_id(&relationship.to))
}
