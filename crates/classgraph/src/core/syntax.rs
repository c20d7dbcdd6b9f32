//! Syntax tree abstraction
//!
//! The extractor never sees a concrete parser. A syntax provider exposes its
//! nodes through [`SyntaxNode`]: a closed [`NodeKind`] tag, a start position,
//! the node's source text, named-field lookup and ordered direct children.
//! Raw grammar kinds are mapped to [`NodeKind`] once, inside the provider.

use super::model::{Modifier, Position};

/// Closed set of node kinds the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    Interface,
    Function,
    Enum,
    /// Field of a class body or property signature of an interface
    Property,
    /// Method definition or signature
    Method,
    RequiredParameter,
    OptionalParameter,
    /// Enum member with an initializer
    EnumMember,
    /// Bare property name, also used for enum members without an initializer
    PropertyName,
    /// `#name`
    PrivateName,
    /// Object or array destructuring pattern
    Pattern,
    TypeIdentifier,
    Identifier,
    StringLiteral,
    Modifier(Modifier),
    Import,
    ImportSpecifier,
    Export,
    ExportSpecifier,
    VariableDeclarator,
    /// Node the parser could not make sense of
    Error,
    Other,
}

/// Named child fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Body,
    Parameters,
    Type,
    ReturnType,
    Extends,
    Implements,
    Value,
    Alias,
    Source,
    Declaration,
}

/// A node in a syntax tree produced by some provider
pub trait SyntaxNode: Copy {
    /// Kind tag of this node
    fn kind(&self) -> NodeKind;

    /// Source text covered by this node
    fn text(&self) -> &str;

    /// 1-based start of this node
    fn position(&self) -> Position;

    /// Child stored under a named field
    fn field(&self, field: Field) -> Option<Self>;

    /// Direct children in source order, named and anonymous
    fn children(&self) -> Vec<Self>;

    /// Text of a named field, if present
    fn field_text(&self, field: Field) -> Option<String> {
        self.field(field).map(|node| node.text().to_string())
    }
}

/// What the walker does after visiting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Visit the children at the same nesting depth
    Descend,
    /// Visit the children one nesting level deeper
    Enter,
    /// Do not visit the children
    Skip,
}

/// Pre-order depth-first walk driven by an explicit stack
///
/// `visit` receives each node with its nesting depth, which only grows when a
/// visit returns [`Step::Enter`]. Tree height never touches the call stack.
pub fn walk<N, F>(root: N, mut visit: F)
where
    N: SyntaxNode,
    F: FnMut(N, usize) -> Step,
{
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let child_depth = match visit(node, depth) {
            Step::Descend => depth,
            Step::Enter => depth + 1,
            Step::Skip => continue,
        };
        stack.extend(node.children().into_iter().rev().map(|child| (child, child_depth)));
    }
}
