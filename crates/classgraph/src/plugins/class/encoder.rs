//! Class diagram encoder
//!
//! Emits Mermaid `classDiagram` text: one block per class or interface,
//! followed by one line per relationship.

use std::fmt::{self, Write};
use std::time::Instant;

use tracing::{debug, span, trace, warn, Level};

use crate::core::{
    escape_member_text, sanitize_identifier, single_line, AnalysisResult, DiagramEncoder,
    DiagramMetadata, DiagramType, EncodeOptions, EncodedDiagram, Entity, EntityKind,
    GenerationError, Method, Property, Relationship, RelationshipKind,
};

/// Error code for emission failures in this encoder
pub const CLASS_DIAGRAM_GENERATION_ERROR: &str = "CLASS_DIAGRAM_GENERATION_ERROR";

const INDENT: &str = "    ";

/// Mermaid class diagram encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassDiagramEncoder;

impl ClassDiagramEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode into any writer
    ///
    /// The writer may hold partial text when this fails; [`DiagramEncoder::encode`]
    /// discards it.
    pub fn encode_to<W: Write>(
        &self,
        out: &mut W,
        result: &AnalysisResult,
        options: &EncodeOptions,
    ) -> Result<DiagramMetadata, GenerationError> {
        if options.diagram_type != DiagramType::Class {
            warn!(requested = %options.diagram_type, "Class encoder cannot produce this diagram type");
            return Err(GenerationError::invalid_diagram_type(
                options.diagram_type,
                DiagramType::Class,
            ));
        }

        let started = Instant::now();
        let (node_count, edge_count) = write_diagram(out, result, options).map_err(|source| {
            GenerationError::generation(CLASS_DIAGRAM_GENERATION_ERROR, source, result)
        })?;

        Ok(DiagramMetadata {
            node_count,
            edge_count,
            generation_time_ms: started.elapsed().as_millis() as u64,
            diagram_type: DiagramType::Class,
        })
    }
}

impl DiagramEncoder for ClassDiagramEncoder {
    fn diagram_type(&self) -> DiagramType {
        DiagramType::Class
    }

    fn encode(
        &self,
        result: &AnalysisResult,
        options: &EncodeOptions,
    ) -> Result<EncodedDiagram, GenerationError> {
        let encode_span = span!(
            Level::DEBUG,
            "encode_class_diagram",
            entities = result.entities.len(),
            relationships = result.relationships.len()
        );
        let _enter = encode_span.enter();

        let mut diagram_text = String::new();
        let metadata = self.encode_to(&mut diagram_text, result, options)?;
        debug!(
            node_count = metadata.node_count,
            edge_count = metadata.edge_count,
            output_len = diagram_text.len(),
            "Class diagram encoded"
        );

        Ok(EncodedDiagram {
            diagram_text,
            metadata,
        })
    }

    fn name(&self) -> &'static str {
        "mermaid-class"
    }
}

fn write_diagram<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    options: &EncodeOptions,
) -> Result<(usize, usize), fmt::Error> {
    writeln!(out, "{}", DiagramType::Class.keyword())?;
    if let Some(direction) = options.direction {
        writeln!(out, "{INDENT}direction {direction}")?;
    }
    if let Some(title) = options.effective_title() {
        writeln!(out, "{INDENT}accTitle: {}", single_line(title))?;
    }

    let mut blocks = 0;
    for entity in result.entities.iter().filter(|e| e.kind.is_classifier()) {
        write_block(out, entity)?;
        blocks += 1;
    }

    for relationship in &result.relationships {
        write_relationship(out, relationship)?;
    }

    Ok((blocks, result.relationships.len()))
}

fn write_block<W: Write>(out: &mut W, entity: &Entity) -> fmt::Result {
    trace!(name = %entity.name, kind = %entity.kind, "Writing class block");
    writeln!(out, "{INDENT}class {} {{", sanitize_identifier(&entity.name))?;

    if entity.kind == EntityKind::Interface {
        writeln!(out, "{INDENT}{INDENT}<<interface>>")?;
    } else if entity.is_abstract() {
        writeln!(out, "{INDENT}{INDENT}<<abstract>>")?;
    }

    for property in &entity.properties {
        writeln!(out, "{INDENT}{INDENT}{}", property_line(property))?;
    }
    for method in &entity.methods {
        writeln!(out, "{INDENT}{INDENT}{}", method_line(method))?;
    }

    writeln!(out, "{INDENT}}}")
}

fn property_line(property: &Property) -> String {
    let mut line = String::new();
    line.push(property.visibility.to_char());
    if property.is_readonly {
        line.push_str("readonly ");
    }
    line.push_str(&escape_member_text(&property.name));
    line.push_str(": ");
    line.push_str(&escape_member_text(&property.type_text));
    if property.is_static {
        line.push('$');
    }
    line
}

fn method_line(method: &Method) -> String {
    let parameters = method
        .parameters
        .iter()
        .map(|p| {
            format!(
                "{}{}: {}",
                escape_member_text(&p.name),
                if p.optional { "?" } else { "" },
                escape_member_text(&p.type_text)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut line = format!(
        "{}{}({}): {}",
        method.visibility.to_char(),
        escape_member_text(&method.name),
        parameters,
        escape_member_text(&method.return_type)
    );
    if method.is_static {
        line.push('$');
    }
    if method.is_abstract {
        line.push('*');
    }
    line
}

fn edge_token(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Inheritance => "--|>",
        RelationshipKind::Composition => "*--",
        RelationshipKind::Aggregation => "o--",
        RelationshipKind::Association => "-->",
        RelationshipKind::Dependency => "..>",
    }
}

fn write_relationship<W: Write>(out: &mut W, relationship: &Relationship) -> fmt::Result {
    write!(
        out,
        "{INDENT}{} {}",
        sanitize_identifier(&relationship.from),
        edge_token(relationship.kind)
    )?;
    if let Some(multiplicity) = &relationship.multiplicity {
        write!(out, " \"{}\"", single_line(multiplicity).replace('"', "'"))?;
    }
    write!(out, " {}", sanitize_identifier(&relationship.to))?;
    if let Some(label) = relationship.label.as_deref().map(single_line) {
        if !label.is_empty() {
            write!(out, " : {label}")?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Modifier, Parameter, Visibility};

    fn encode(result: &AnalysisResult, options: &EncodeOptions) -> String {
        ClassDiagramEncoder::new()
            .encode(result, options)
            .unwrap()
            .diagram_text
    }

    #[test]
    fn test_header_direction_and_title() {
        let options = EncodeOptions::new(DiagramType::Class)
            .with_direction(Direction::LeftRight)
            .with_title("Zoo\nModel");
        let text = encode(&AnalysisResult::default(), &options);
        assert_eq!(text, "classDiagram\n    direction LR\n    accTitle: Zoo Model\n");
    }

    #[test]
    fn test_title_ignored_unless_included() {
        let mut options = EncodeOptions::new(DiagramType::Class).with_title("Zoo");
        options.include_title = false;
        assert_eq!(encode(&AnalysisResult::default(), &options), "classDiagram\n");
    }

    #[test]
    fn test_class_block_members() {
        let entity = Entity::class("Dog")
            .with_property(Property::new("name", "string"))
            .with_property(
                Property::new("count", "number")
                    .with_visibility(Visibility::Private)
                    .with_static(true)
                    .with_readonly(true),
            )
            .with_method(
                Method::new("bark")
                    .with_parameter(Parameter::new("times", "number"))
                    .with_parameter(Parameter::new("loud", "boolean").optional())
                    .with_visibility(Visibility::Protected),
            );
        let text = encode(
            &AnalysisResult::from_parts(vec![entity], Vec::new()),
            &EncodeOptions::default(),
        );

        assert_eq!(
            text,
            "classDiagram\n    class Dog {\n        +name: string\n        -readonly count: number$\n        #bark(times: number, loud?: boolean): void\n    }\n"
        );
    }

    #[test]
    fn test_stereotypes_and_classifiers() {
        let shape = Entity::class("Shape")
            .with_modifier(Modifier::Abstract)
            .with_method(Method::new("area").with_return_type("number").with_abstract(true))
            .with_method(Method::new("create").with_static(true).with_return_type("Shape"));
        let pet = Entity::interface("Pet");
        let text = encode(
            &AnalysisResult::from_parts(vec![shape, pet], Vec::new()),
            &EncodeOptions::default(),
        );

        assert!(text.contains("class Shape {\n        <<abstract>>\n"));
        assert!(text.contains("+area(): number*\n"));
        assert!(text.contains("+create(): Shape$\n"));
        assert!(text.contains("class Pet {\n        <<interface>>\n    }\n"));
    }

    #[test]
    fn test_only_classifiers_become_blocks() {
        let mut function = Entity::new(EntityKind::Function, "run");
        function.methods.push(Method::new("run"));
        let result = AnalysisResult::from_parts(
            vec![function, Entity::new(EntityKind::Enum, "Color"), Entity::class("A")],
            Vec::new(),
        );
        let diagram = ClassDiagramEncoder::new()
            .encode(&result, &EncodeOptions::default())
            .unwrap();

        assert_eq!(diagram.metadata.node_count, 1);
        assert!(!diagram.diagram_text.contains("run"));
        assert!(!diagram.diagram_text.contains("Color"));
    }

    #[test]
    fn test_member_text_is_escaped() {
        let entity = Entity::class("Box").with_property(Property::new(
            "items",
            "Map<string, {\n  id: number}>",
        ));
        let text = encode(
            &AnalysisResult::from_parts(vec![entity], Vec::new()),
            &EncodeOptions::default(),
        );
        assert!(text.contains("+items: Map~string, id: number~\n"));
    }

    #[test]
    fn test_relationship_lines() {
        let relationships = vec![
            Relationship::new(RelationshipKind::Inheritance, "Dog", "Animal"),
            Relationship::new(RelationshipKind::Dependency, "Dog", "Pet").with_label("implements"),
            Relationship::new(RelationshipKind::Composition, "Car", "Engine")
                .with_multiplicity("1"),
            Relationship::new(RelationshipKind::Aggregation, "Team", "Player"),
            Relationship::new(RelationshipKind::Association, "a.B", "C<D>"),
        ];
        let diagram = ClassDiagramEncoder::new()
            .encode(
                &AnalysisResult::from_parts(Vec::new(), relationships),
                &EncodeOptions::default(),
            )
            .unwrap();
        let lines: Vec<&str> = diagram.diagram_text.lines().skip(1).collect();

        assert_eq!(
            lines,
            vec![
                "    Dog --|> Animal",
                "    Dog ..> Pet : implements",
                "    Car *-- \"1\" Engine",
                "    Team o-- Player",
                "    a_B --> C_D_",
            ]
        );
        assert_eq!(diagram.metadata.edge_count, 5);
    }

    #[test]
    fn test_block_and_edge_names_agree() {
        let result = AnalysisResult::from_parts(
            vec![Entity::class("my-widget")],
            vec![Relationship::new(RelationshipKind::Inheritance, "my-widget", "")],
        );
        let text = encode(&result, &EncodeOptions::default());
        assert!(text.contains("class my_widget {"));
        assert!(text.contains("my_widget --|> Unknown"));
    }

    #[test]
    fn test_rejects_other_diagram_types() {
        let error = ClassDiagramEncoder::new()
            .encode(
                &AnalysisResult::default(),
                &EncodeOptions::new(DiagramType::Flowchart),
            )
            .unwrap_err();
        assert_eq!(error.code(), "INVALID_DIAGRAM_TYPE");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_failure_carries_snapshot() {
        let result = AnalysisResult::from_parts(vec![Entity::class("A")], Vec::new());
        let error = ClassDiagramEncoder::new()
            .encode_to(&mut FailingWriter, &result, &EncodeOptions::default())
            .unwrap_err();

        assert_eq!(error.code(), CLASS_DIAGRAM_GENERATION_ERROR);
        match error {
            GenerationError::Generation { snapshot, .. } => {
                assert_eq!(snapshot.entities[0].name, "A")
            }
            other => panic!("Expected Generation variant, got {other:?}"),
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let result = AnalysisResult::from_parts(
            vec![Entity::class("B").extending("A")],
            vec![Relationship::new(RelationshipKind::Inheritance, "B", "A")],
        );
        let options = EncodeOptions::default();
        assert_eq!(encode(&result, &options), encode(&result, &options));
    }
}
