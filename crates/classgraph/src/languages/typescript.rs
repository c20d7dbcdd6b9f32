//! TypeScript syntax provider backed by tree-sitter
//!
//! [`TypeScriptParser`] turns source text into a tree-sitter [`Tree`] and
//! [`TsNode`] exposes that tree through [`SyntaxNode`]. Grammar kind strings
//! are mapped to [`NodeKind`] in [`TsNode::kind`] and nowhere else.

use tracing::{debug, span, trace, Level};
use tree_sitter::{Node, Parser, Tree};

use super::SourceLanguage;
use crate::core::{AnalysisError, Field, Modifier, NodeKind, Position, SyntaxNode};

/// Parser for the TypeScript family of grammars
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptParser {
    language: SourceLanguage,
}

impl TypeScriptParser {
    pub fn new(language: SourceLanguage) -> Self {
        Self { language }
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Parse source text into a syntax tree
    ///
    /// A tree is returned even for source with syntax errors; those regions
    /// show up as error nodes. Only a grammar that fails to load or a parser
    /// that yields nothing is reported as an error.
    pub fn parse(&self, source: &str) -> Result<Tree, AnalysisError> {
        let parse_span = span!(
            Level::DEBUG,
            "parse_source",
            language = %self.language,
            input_len = source.len()
        );
        let _enter = parse_span.enter();

        let mut parser = Parser::new();
        parser
            .set_language(&self.language.grammar())
            .map_err(|e| AnalysisError::language_error(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::parse_error("parser produced no syntax tree", source))?;

        debug!(has_error = tree.root_node().has_error(), "Parsed source");
        Ok(tree)
    }
}

/// A tree-sitter node paired with the source it was parsed from
#[derive(Debug, Clone, Copy)]
pub struct TsNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> TsNode<'a> {
    /// Root node of a parsed tree
    pub fn root(tree: &'a Tree, source: &'a str) -> Self {
        Self {
            node: tree.root_node(),
            source,
        }
    }

    fn wrap(&self, node: Node<'a>) -> Self {
        Self {
            node,
            source: self.source,
        }
    }

    fn raw_children(&self) -> impl Iterator<Item = Node<'a>> {
        let node = self.node;
        (0..node.child_count()).filter_map(move |i| node.child(i))
    }

    fn child_of_kind(&self, kind: &str) -> Option<Node<'a>> {
        self.raw_children().find(|child| child.kind() == kind)
    }

    /// Find a heritage clause directly under the node or under `class_heritage`
    fn heritage(&self, clause: &str) -> Option<Node<'a>> {
        self.child_of_kind(clause).or_else(|| {
            let heritage = self.child_of_kind("class_heritage")?;
            self.wrap(heritage).child_of_kind(clause)
        })
    }

    fn keyword(&self) -> NodeKind {
        match Modifier::from_keyword(self.node.kind()) {
            Some(modifier) => NodeKind::Modifier(modifier),
            None => NodeKind::Other,
        }
    }
}

impl SyntaxNode for TsNode<'_> {
    fn kind(&self) -> NodeKind {
        if !self.node.is_named() {
            return self.keyword();
        }
        match self.node.kind() {
            "class_declaration" | "abstract_class_declaration" | "class" => NodeKind::Class,
            "interface_declaration" => NodeKind::Interface,
            "function_declaration" | "generator_function_declaration" => NodeKind::Function,
            "enum_declaration" => NodeKind::Enum,
            "public_field_definition" | "property_signature" => NodeKind::Property,
            "method_definition" | "method_signature" | "abstract_method_signature" => {
                NodeKind::Method
            }
            "required_parameter" => NodeKind::RequiredParameter,
            "optional_parameter" => NodeKind::OptionalParameter,
            "enum_assignment" => NodeKind::EnumMember,
            "property_identifier" => NodeKind::PropertyName,
            "private_property_identifier" => NodeKind::PrivateName,
            "object_pattern" | "array_pattern" => NodeKind::Pattern,
            "type_identifier" => NodeKind::TypeIdentifier,
            "identifier" => NodeKind::Identifier,
            "string" => NodeKind::StringLiteral,
            "accessibility_modifier" => match Modifier::from_keyword(self.text()) {
                Some(modifier) => NodeKind::Modifier(modifier),
                None => NodeKind::Other,
            },
            "import_statement" => NodeKind::Import,
            "import_specifier" => NodeKind::ImportSpecifier,
            "export_statement" => NodeKind::Export,
            "export_specifier" => NodeKind::ExportSpecifier,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "ERROR" => NodeKind::Error,
            other => {
                trace!(kind = other, "Unclassified node");
                NodeKind::Other
            }
        }
    }

    fn text(&self) -> &str {
        self.source.get(self.node.byte_range()).unwrap_or("")
    }

    fn position(&self) -> Position {
        let point = self.node.start_position();
        Position::new(point.row + 1, point.column + 1)
    }

    fn field(&self, field: Field) -> Option<Self> {
        let node = match field {
            Field::Name => self
                .node
                .child_by_field_name("name")
                .or_else(|| self.node.child_by_field_name("pattern")),
            Field::Body => self.node.child_by_field_name("body"),
            Field::Parameters => self.node.child_by_field_name("parameters"),
            Field::Type => self.node.child_by_field_name("type"),
            Field::ReturnType => self.node.child_by_field_name("return_type"),
            Field::Extends => self
                .heritage("extends_clause")
                .or_else(|| self.heritage("extends_type_clause")),
            Field::Implements => self.heritage("implements_clause"),
            Field::Value => self.node.child_by_field_name("value"),
            Field::Alias => self.node.child_by_field_name("alias"),
            Field::Source => self.node.child_by_field_name("source"),
            Field::Declaration => self.node.child_by_field_name("declaration"),
        }?;
        Some(self.wrap(node))
    }

    fn children(&self) -> Vec<Self> {
        self.raw_children().map(|child| self.wrap(child)).collect()
    }
}
