//! Structural extraction
//!
//! Walks a syntax tree and turns class, interface, function and enum
//! declarations into [`Entity`] records. Extraction is best effort: a missing
//! name becomes [`UNKNOWN_NAME`] and a missing body yields no members.

use std::collections::BTreeSet;

use tracing::{debug, span, trace, warn, Level};

use crate::core::{
    walk, AnalysisOptions, Entity, EntityKind, Field, Method, Modifier, NodeKind, Parameter,
    Property, Step, SyntaxNode, Visibility, ANY_TYPE, DESTRUCTURED_NAME, ENUM_MEMBER_TYPE,
    UNKNOWN_NAME, VOID_TYPE,
};

/// Builds one entity from a declaration node
type Rule<N> = fn(N, &AnalysisOptions) -> Entity;

/// Extraction rule for a node kind, `None` for kinds that are only traversed
fn rule_for<N: SyntaxNode>(kind: NodeKind) -> Option<Rule<N>> {
    match kind {
        NodeKind::Class => Some(extract_class as Rule<N>),
        NodeKind::Interface => Some(extract_interface as Rule<N>),
        NodeKind::Function => Some(extract_function as Rule<N>),
        NodeKind::Enum => Some(extract_enum as Rule<N>),
        NodeKind::Property
        | NodeKind::Method
        | NodeKind::RequiredParameter
        | NodeKind::OptionalParameter
        | NodeKind::EnumMember
        | NodeKind::PropertyName
        | NodeKind::PrivateName
        | NodeKind::Pattern
        | NodeKind::TypeIdentifier
        | NodeKind::Identifier
        | NodeKind::StringLiteral
        | NodeKind::Modifier(_)
        | NodeKind::Import
        | NodeKind::ImportSpecifier
        | NodeKind::Export
        | NodeKind::ExportSpecifier
        | NodeKind::VariableDeclarator
        | NodeKind::Error
        | NodeKind::Other => None,
    }
}

/// Extract every declaration in the tree, in pre-order
///
/// Declarations nested `options.max_depth` levels deep or more are neither
/// extracted nor searched. An anonymous class expression assigned to a
/// variable takes the variable's name.
pub fn extract<N: SyntaxNode>(root: N, options: &AnalysisOptions) -> Vec<Entity> {
    let extract_span = span!(Level::DEBUG, "extract", max_depth = options.max_depth);
    let _enter = extract_span.enter();

    let mut entities = Vec::new();
    // Set by a declarator and taken by the class expression it binds, which
    // is the next declaration the pre-order walk reaches
    let mut binding: Option<String> = None;
    walk(root, |node, depth| {
        if node.kind() == NodeKind::VariableDeclarator {
            binding = bound_class_name(node);
            return Step::Descend;
        }
        let Some(rule) = rule_for::<N>(node.kind()) else {
            return Step::Descend;
        };
        let bound_name = binding.take();
        if depth >= options.max_depth {
            trace!(position = %node.position(), depth, "Declaration below max depth");
            return Step::Skip;
        }
        let mut entity = rule(node, options);
        if let Some(name) = bound_name {
            entity.name = name;
        }
        if entity.name == UNKNOWN_NAME {
            warn!(kind = %entity.kind, position = %node.position(), "Declaration without a name");
        }
        trace!(
            kind = %entity.kind,
            name = %entity.name,
            properties = entity.properties.len(),
            methods = entity.methods.len(),
            "Extracted declaration"
        );
        entities.push(entity);
        Step::Enter
    });

    debug!(entity_count = entities.len(), "Extraction complete");
    entities
}

fn extract_class<N: SyntaxNode>(node: N, options: &AnalysisOptions) -> Entity {
    classifier(EntityKind::Class, node, options)
}

fn extract_interface<N: SyntaxNode>(node: N, options: &AnalysisOptions) -> Entity {
    classifier(EntityKind::Interface, node, options)
}

fn classifier<N: SyntaxNode>(kind: EntityKind, node: N, options: &AnalysisOptions) -> Entity {
    let mut entity = declaration(kind, node);
    entity.extends = node
        .field(Field::Extends)
        .map(supertype_names)
        .unwrap_or_default();
    entity.implements = node
        .field(Field::Implements)
        .map(|clause| names_of_kind(clause, &[NodeKind::TypeIdentifier]))
        .unwrap_or_default();

    if let Some(body) = node.field(Field::Body) {
        collect_members(body, options, &mut entity);
    }
    entity
}

fn extract_function<N: SyntaxNode>(node: N, _options: &AnalysisOptions) -> Entity {
    let mut entity = declaration(EntityKind::Function, node);
    let mut signature = Method::new(entity.name.clone());
    signature.parameters = parameters(node);
    signature.return_type = return_type(node);
    entity.methods.push(signature);
    entity
}

fn extract_enum<N: SyntaxNode>(node: N, _options: &AnalysisOptions) -> Entity {
    let mut entity = declaration(EntityKind::Enum, node);
    let Some(body) = node.field(Field::Body) else {
        return entity;
    };
    for member in body.children() {
        let name = match member.kind() {
            NodeKind::PropertyName => member.text().to_string(),
            NodeKind::StringLiteral => unquote(member.text()),
            NodeKind::EnumMember => member
                .field(Field::Name)
                .map(|name| unquote(name.text()))
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            _ => continue,
        };
        entity.properties.push(Property::new(name, ENUM_MEMBER_TYPE));
    }
    entity
}

/// Variable name for `const X = class {}`, when the class has no name of its own
fn bound_class_name<N: SyntaxNode>(declarator: N) -> Option<String> {
    let value = declarator.field(Field::Value)?;
    if value.kind() != NodeKind::Class || value.field(Field::Name).is_some() {
        return None;
    }
    declarator
        .field(Field::Name)
        .filter(|name| name.kind() == NodeKind::Identifier)
        .map(|name| name.text().to_string())
}

/// Name, position and modifiers shared by every declaration kind
fn declaration<N: SyntaxNode>(kind: EntityKind, node: N) -> Entity {
    let mut entity = Entity::new(kind, name_of(node)).at(node.position());
    entity.modifiers = modifiers(node);
    entity
}

/// Collect the members listed directly in a declaration body
///
/// The walk stops at the body's children: static blocks, decorator arguments
/// and nested declarations are not members.
fn collect_members<N: SyntaxNode>(body: N, options: &AnalysisOptions, entity: &mut Entity) {
    let mut at_body = true;
    walk(body, |node, _| {
        if std::mem::take(&mut at_body) {
            return Step::Descend;
        }
        match node.kind() {
            NodeKind::Property => {
                let property = property(node);
                if options.include_private || property.visibility != Visibility::Private {
                    entity.properties.push(property);
                }
            }
            NodeKind::Method => {
                let method = method(node);
                if options.include_private || method.visibility != Visibility::Private {
                    entity.methods.push(method);
                }
            }
            _ => {}
        }
        Step::Skip
    });
}

fn property<N: SyntaxNode>(node: N) -> Property {
    let modifiers = modifiers(node);
    Property {
        name: name_of(node),
        type_text: node
            .field(Field::Type)
            .map(annotation_text)
            .unwrap_or_else(|| ANY_TYPE.to_string()),
        visibility: member_visibility(node, &modifiers),
        is_static: modifiers.contains(&Modifier::Static),
        is_readonly: modifiers.contains(&Modifier::Readonly),
    }
}

fn method<N: SyntaxNode>(node: N) -> Method {
    let modifiers = modifiers(node);
    Method {
        name: name_of(node),
        parameters: parameters(node),
        return_type: return_type(node),
        visibility: member_visibility(node, &modifiers),
        is_static: modifiers.contains(&Modifier::Static),
        is_abstract: modifiers.contains(&Modifier::Abstract),
    }
}

/// Parameters listed directly under the `parameters` field
fn parameters<N: SyntaxNode>(node: N) -> Vec<Parameter> {
    let Some(list) = node.field(Field::Parameters) else {
        return Vec::new();
    };
    list.children()
        .into_iter()
        .filter_map(|param| {
            let optional = match param.kind() {
                NodeKind::RequiredParameter => false,
                NodeKind::OptionalParameter => true,
                _ => return None,
            };
            Some(Parameter {
                name: parameter_name(param),
                type_text: param
                    .field(Field::Type)
                    .map(annotation_text)
                    .unwrap_or_else(|| ANY_TYPE.to_string()),
                optional,
                default_value: None,
            })
        })
        .collect()
}

fn parameter_name<N: SyntaxNode>(param: N) -> String {
    match param.field(Field::Name) {
        Some(pattern) if pattern.kind() == NodeKind::Pattern => DESTRUCTURED_NAME.to_string(),
        _ => name_of(param),
    }
}

fn return_type<N: SyntaxNode>(node: N) -> String {
    node.field(Field::ReturnType)
        .map(annotation_text)
        .unwrap_or_else(|| VOID_TYPE.to_string())
}

fn name_of<N: SyntaxNode>(node: N) -> String {
    node.field(Field::Name)
        .map(|name| name.text().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Modifier tokens among the direct children of a node
fn modifiers<N: SyntaxNode>(node: N) -> BTreeSet<Modifier> {
    node.children()
        .into_iter()
        .filter_map(|child| match child.kind() {
            NodeKind::Modifier(modifier) => Some(modifier),
            _ => None,
        })
        .collect()
}

/// Visibility from modifiers, with `#name` members always private
fn member_visibility<N: SyntaxNode>(node: N, modifiers: &BTreeSet<Modifier>) -> Visibility {
    let private_name = node
        .field(Field::Name)
        .is_some_and(|name| name.kind() == NodeKind::PrivateName);
    if private_name {
        Visibility::Private
    } else {
        Visibility::from_modifiers(modifiers)
    }
}

/// Supertype names from an `extends` field
fn supertype_names<N: SyntaxNode>(clause: N) -> Vec<String> {
    let accepted = [NodeKind::Identifier, NodeKind::TypeIdentifier];
    if accepted.contains(&clause.kind()) {
        return vec![clause.text().to_string()];
    }
    names_of_kind(clause, &accepted)
}

/// Text of direct children whose kind is in `kinds`
fn names_of_kind<N: SyntaxNode>(node: N, kinds: &[NodeKind]) -> Vec<String> {
    node.children()
        .into_iter()
        .filter(|child| kinds.contains(&child.kind()))
        .map(|child| child.text().to_string())
        .collect()
}

/// Type text of an annotation with its leading colon removed
fn annotation_text<N: SyntaxNode>(node: N) -> String {
    let text = node.text().trim();
    let text = text.strip_prefix(':').unwrap_or(text).trim();
    if text.is_empty() {
        ANY_TYPE.to_string()
    } else {
        text.to_string()
    }
}

fn unquote(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
}
