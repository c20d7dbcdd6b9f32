//! Relationship derivation
//!
//! Edges come only from declared supertypes. Property types are not inspected,
//! so composition, aggregation and association edges are never inferred here.

use crate::core::{Entity, Relationship, RelationshipKind};

/// Label attached to interface implementation edges
pub const IMPLEMENTS_LABEL: &str = "implements";

/// Derive inheritance and implementation edges from extracted entities
///
/// Entities are visited in order; for each, `extends` names come before
/// `implements` names. Duplicates are kept.
pub fn derive_relationships(entities: &[Entity]) -> Vec<Relationship> {
    entities
        .iter()
        .flat_map(|entity| {
            let inheritance = entity.extends.iter().map(move |parent| {
                Relationship::new(RelationshipKind::Inheritance, &entity.name, parent)
            });
            let implementation = entity.implements.iter().map(move |interface| {
                Relationship::new(RelationshipKind::Dependency, &entity.name, interface)
                    .with_label(IMPLEMENTS_LABEL)
            });
            inheritance.chain(implementation)
        })
        .collect()
}
