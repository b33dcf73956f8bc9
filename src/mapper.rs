//! Field kind → semantic type.
//!
//! Total over `FieldKind`: anything outside the table degrades to `Unknown`.
//! Nested records are not in the table either; the resolver decides whether
//! they become named references.

use crate::ir::{FieldDescriptor, FieldKind, Primitive, SemanticType};

/// Map one field, applying its nullability exactly once at the outermost position.
pub fn map_type(field: &FieldDescriptor) -> SemanticType {
    let base = map_type_without_null_check(field);
    if field.nullable { SemanticType::optional(base) } else { base }
}

fn map_type_without_null_check(field: &FieldDescriptor) -> SemanticType {
    match &field.kind {
        FieldKind::CharMapping => SemanticType::mapping_of(
            SemanticType::text(),
            SemanticType::optional(SemanticType::text()),
        ),
        FieldKind::Boolean => SemanticType::primitive(Primitive::Bool),
        FieldKind::MultipleChoice => SemanticType::set_of(SemanticType::text()),
        FieldKind::Char
        | FieldKind::Choice
        | FieldKind::Date
        | FieldKind::DateTime
        | FieldKind::Decimal
        | FieldKind::Duration
        | FieldKind::File
        | FieldKind::Time
        | FieldKind::Uuid => SemanticType::text(),
        FieldKind::Dict => SemanticType::mapping_of(SemanticType::text(), SemanticType::Unknown),
        FieldKind::Float => SemanticType::primitive(Primitive::Float),
        FieldKind::Integer => SemanticType::primitive(Primitive::Int),
        FieldKind::List(child) => SemanticType::sequence_of(map_type(child)),
        FieldKind::Nested(_) | FieldKind::Opaque => SemanticType::Unknown,
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor::new(kind)
    }

    #[test]
    fn text_family_maps_to_text() {
        for kind in [
            FieldKind::Char,
            FieldKind::Choice,
            FieldKind::Date,
            FieldKind::DateTime,
            FieldKind::Decimal,
            FieldKind::Duration,
            FieldKind::File,
            FieldKind::Time,
            FieldKind::Uuid,
        ] {
            assert_eq!(map_type(&field(kind)), SemanticType::text());
        }
    }

    #[test]
    fn scalar_and_collection_table() {
        assert_eq!(map_type(&field(FieldKind::Boolean)), SemanticType::primitive(Primitive::Bool));
        assert_eq!(map_type(&field(FieldKind::Integer)), SemanticType::primitive(Primitive::Int));
        assert_eq!(map_type(&field(FieldKind::Float)), SemanticType::primitive(Primitive::Float));
        assert_eq!(
            map_type(&field(FieldKind::MultipleChoice)),
            SemanticType::set_of(SemanticType::text()),
        );
        assert_eq!(
            map_type(&field(FieldKind::Dict)),
            SemanticType::mapping_of(SemanticType::text(), SemanticType::Unknown),
        );
        assert_eq!(
            map_type(&field(FieldKind::CharMapping)),
            SemanticType::mapping_of(
                SemanticType::text(),
                SemanticType::Optional { inner: Box::new(SemanticType::text()) },
            ),
        );
    }

    #[test]
    fn unknown_kinds_degrade() {
        assert_eq!(map_type(&field(FieldKind::Opaque)), SemanticType::Unknown);
        assert_eq!(map_type(&FieldDescriptor::nested("PointSerializer")), SemanticType::Unknown);
    }

    #[test]
    fn nullable_wraps_once() {
        let zip = field(FieldKind::Char).nullable();
        assert_eq!(
            map_type(&zip),
            SemanticType::Optional { inner: Box::new(SemanticType::text()) },
        );

        // the vendor mapping already carries an inner Optional on its value,
        // the outer wrap must stay single-level
        let m = map_type(&field(FieldKind::CharMapping).nullable());
        match m {
            SemanticType::Optional { inner } => assert!(!inner.is_optional()),
            other => panic!("expected optional, got {other:?}"),
        }
    }

    #[test]
    fn lists_recurse_with_child_nullability() {
        let ids = FieldDescriptor::list_of(field(FieldKind::Integer).nullable()).nullable();
        let expected = SemanticType::optional(SemanticType::sequence_of(
            SemanticType::optional(SemanticType::primitive(Primitive::Int)),
        ));
        assert_eq!(map_type(&ids), expected);

        let nested = FieldDescriptor::list_of(FieldDescriptor::list_of(field(FieldKind::Opaque)));
        assert_eq!(
            map_type(&nested),
            SemanticType::sequence_of(SemanticType::sequence_of(SemanticType::Unknown)),
        );
    }
}
