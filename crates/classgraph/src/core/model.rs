//! Structural model extracted from source code
//!
//! Entities, their members and the relationships between them. Every value
//! here is produced fresh per analysis call and owned by the caller.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name substituted when a declaration has no name field
pub const UNKNOWN_NAME: &str = "Unknown";

/// Type text used when a property or parameter carries no annotation
pub const ANY_TYPE: &str = "any";

/// Return type used when a method or function declares none
pub const VOID_TYPE: &str = "void";

/// Name given to a parameter bound through an object or array pattern
pub const DESTRUCTURED_NAME: &str = "destructured";

/// Type text given to every enum member
pub const ENUM_MEMBER_TYPE: &str = "string | number";

/// Kind of top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Interface,
    Function,
    Variable,
    Enum,
}

impl EntityKind {
    /// Returns true for kinds rendered as class diagram blocks
    pub fn is_classifier(&self) -> bool {
        matches!(self, EntityKind::Class | EntityKind::Interface)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Class => write!(f, "class"),
            EntityKind::Interface => write!(f, "interface"),
            EntityKind::Function => write!(f, "function"),
            EntityKind::Variable => write!(f, "variable"),
            EntityKind::Enum => write!(f, "enum"),
        }
    }
}

/// Declaration keyword recognised on declarations and members
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Abstract,
    Readonly,
}

impl Modifier {
    /// Map a keyword to a modifier
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "public" => Some(Modifier::Public),
            "private" => Some(Modifier::Private),
            "protected" => Some(Modifier::Protected),
            "static" => Some(Modifier::Static),
            "abstract" => Some(Modifier::Abstract),
            "readonly" => Some(Modifier::Readonly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Static => "static",
            Modifier::Abstract => "abstract",
            Modifier::Readonly => "readonly",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// Derive visibility from a modifier set
    ///
    /// `private` wins over `protected`, which wins over the public default.
    pub fn from_modifiers(modifiers: &BTreeSet<Modifier>) -> Self {
        if modifiers.contains(&Modifier::Private) {
            Visibility::Private
        } else if modifiers.contains(&Modifier::Protected) {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }

    /// Mermaid visibility symbol
    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
        }
    }
}

/// 1-based source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A field or property of a class, interface or enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_readonly(mut self, is_readonly: bool) -> Self {
        self.is_readonly = is_readonly;
        self
    }
}

/// A method or function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            optional: false,
            default_value: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A method of a class or interface, or the signature of a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: VOID_TYPE.to_string(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }
}

/// One structural declaration found in source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub kind: EntityKind,
    pub name: String,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub position: Position,
    pub modifiers: BTreeSet<Modifier>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
}

impl Entity {
    /// Create an entity with no members; an empty name becomes the sentinel
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            name: if name.is_empty() {
                UNKNOWN_NAME.to_string()
            } else {
                name
            },
            properties: Vec::new(),
            methods: Vec::new(),
            position: Position::default(),
            modifiers: BTreeSet::new(),
            extends: Vec::new(),
            implements: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Interface, name)
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn extending(mut self, name: impl Into<String>) -> Self {
        self.extends.push(name.into());
        self
    }

    pub fn implementing(mut self, name: impl Into<String>) -> Self {
        self.implements.push(name.into());
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }
}

/// Relationship kinds between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Inheritance,
    Composition,
    Aggregation,
    Association,
    Dependency,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Inheritance => write!(f, "inheritance"),
            RelationshipKind::Composition => write!(f, "composition"),
            RelationshipKind::Aggregation => write!(f, "aggregation"),
            RelationshipKind::Association => write!(f, "association"),
            RelationshipKind::Dependency => write!(f, "dependency"),
        }
    }
}

/// A directed edge between two entity names
///
/// Endpoints are not checked against the analysed entities; a dangling
/// endpoint refers to a type outside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<String>,
}

impl Relationship {
    pub fn new(kind: RelationshipKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
            label: None,
            multiplicity: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: impl Into<String>) -> Self {
        self.multiplicity = Some(multiplicity.into());
        self
    }
}

/// An import statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Module specifier without quotes
    pub module: String,
    /// Local bindings introduced by the import, in source order
    pub names: Vec<String>,
    pub position: Position,
}

/// Informational data about one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub language: String,
    pub line_count: usize,
    pub entity_count: usize,
    pub relationship_count: usize,
    pub analysis_time_ms: u64,
}

/// Output of one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
    pub imports: Vec<Import>,
    pub exports: Vec<String>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Build a result from entities, deriving nothing
    pub fn from_parts(entities: Vec<Entity>, relationships: Vec<Relationship>) -> Self {
        Self {
            metadata: AnalysisMetadata {
                entity_count: entities.len(),
                relationship_count: relationships.len(),
                ..AnalysisMetadata::default()
            },
            entities,
            relationships,
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_precedence() {
        let mut modifiers = BTreeSet::new();
        assert_eq!(Visibility::from_modifiers(&modifiers), Visibility::Public);

        modifiers.insert(Modifier::Protected);
        assert_eq!(Visibility::from_modifiers(&modifiers), Visibility::Protected);

        modifiers.insert(Modifier::Private);
        assert_eq!(Visibility::from_modifiers(&modifiers), Visibility::Private);
    }

    #[test]
    fn test_visibility_symbols() {
        assert_eq!(Visibility::Public.to_char(), '+');
        assert_eq!(Visibility::Private.to_char(), '-');
        assert_eq!(Visibility::Protected.to_char(), '#');
        assert_eq!(Visibility::default(), Visibility::Public);
    }

    #[test]
    fn test_modifier_keywords() {
        assert_eq!(Modifier::from_keyword("private"), Some(Modifier::Private));
        assert_eq!(Modifier::from_keyword(" readonly "), Some(Modifier::Readonly));
        assert_eq!(Modifier::from_keyword("async"), None);
        assert_eq!(Modifier::Abstract.to_string(), "abstract");
    }

    #[test]
    fn test_empty_entity_name_uses_sentinel() {
        let entity = Entity::class("");
        assert_eq!(entity.name, UNKNOWN_NAME);
        assert!(entity.properties.is_empty());
        assert!(entity.methods.is_empty());
    }

    #[test]
    fn test_method_defaults() {
        let method = Method::new("run");
        assert_eq!(method.return_type, VOID_TYPE);
        assert_eq!(method.visibility, Visibility::Public);
        assert!(!method.is_static);
        assert!(!method.is_abstract);
    }

    #[test]
    fn test_entity_serializes_camel_case() {
        let entity = Entity::class("Dog")
            .at(Position::new(3, 1))
            .with_modifier(Modifier::Abstract)
            .with_property(Property::new("name", "string").with_readonly(true))
            .extending("Animal");
        let json = serde_json::to_value(&entity).unwrap();

        assert_eq!(json["kind"], "class");
        assert_eq!(json["properties"][0]["type"], "string");
        assert_eq!(json["properties"][0]["isReadonly"], true);
        assert_eq!(json["modifiers"][0], "abstract");
        assert_eq!(json["extends"][0], "Animal");
        assert_eq!(json["position"]["line"], 3);
    }

    #[test]
    fn test_relationship_serialization_skips_missing_label() {
        let rel = Relationship::new(RelationshipKind::Inheritance, "Dog", "Animal");
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["type"], "inheritance");
        assert!(json.get("label").is_none());
    }
}
