//! Import and export collection

use crate::core::{walk, Field, Import, NodeKind, Step, SyntaxNode};

/// Name reported for anonymous default exports
pub const DEFAULT_EXPORT: &str = "default";

/// Collect import statements in source order
pub fn extract_imports<N: SyntaxNode>(root: N) -> Vec<Import> {
    let mut imports = Vec::new();
    walk(root, |node, _| {
        if node.kind() != NodeKind::Import {
            return Step::Descend;
        }
        imports.push(import(node));
        Step::Skip
    });
    imports
}

fn import<N: SyntaxNode>(node: N) -> Import {
    let mut module = node.field(Field::Source).map(|source| unquote(source.text()));
    let mut names = Vec::new();

    let children = node.children();
    for child in children {
        walk(child, |inner, _| match inner.kind() {
            NodeKind::ImportSpecifier => {
                if let Some(name) = binding(inner) {
                    names.push(name);
                }
                Step::Skip
            }
            NodeKind::Identifier => {
                names.push(inner.text().to_string());
                Step::Skip
            }
            NodeKind::StringLiteral => {
                if module.is_none() {
                    module = Some(unquote(inner.text()));
                }
                Step::Skip
            }
            _ => Step::Descend,
        });
    }

    Import {
        module: module.unwrap_or_default(),
        names,
        position: node.position(),
    }
}

/// Collect exported names in source order
pub fn extract_exports<N: SyntaxNode>(root: N) -> Vec<String> {
    let mut exports = Vec::new();
    walk(root, |node, _| {
        if node.kind() != NodeKind::Export {
            return Step::Descend;
        }
        exports.extend(exported_names(node));
        Step::Skip
    });
    exports
}

fn exported_names<N: SyntaxNode>(node: N) -> Vec<String> {
    if let Some(declaration) = node.field(Field::Declaration) {
        if let Some(name) = declaration.field_text(Field::Name) {
            return vec![name];
        }
        let mut names = Vec::new();
        walk(declaration, |inner, _| {
            if inner.kind() == NodeKind::VariableDeclarator {
                names.extend(inner.field_text(Field::Name));
                return Step::Skip;
            }
            Step::Descend
        });
        return names;
    }

    if let Some(value) = node.field(Field::Value) {
        return match value.kind() {
            NodeKind::Identifier => vec![value.text().to_string()],
            _ => vec![DEFAULT_EXPORT.to_string()],
        };
    }

    let mut names = Vec::new();
    walk(node, |inner, _| {
        if inner.kind() == NodeKind::ExportSpecifier {
            names.extend(binding(inner));
            return Step::Skip;
        }
        Step::Descend
    });
    names
}

/// Alias if present, else the name
fn binding<N: SyntaxNode>(specifier: N) -> Option<String> {
    specifier
        .field_text(Field::Alias)
        .or_else(|| specifier.field_text(Field::Name))
        .map(|name| unquote(&name))
}

fn unquote(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}
