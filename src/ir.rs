// Strongly-typed IR shared by the mapper, the resolver and the renderer.
// No serde_json::Value and no schema-library types in here.

use std::fmt;
use indexmap::IndexMap;
use serde::Serialize;

// ————————————————————————————————————————————————————————————————————————————
// INPUT: FIELD & RECORD DESCRIPTORS
// ————————————————————————————————————————————————————————————————————————————

/// Stable identity of one record schema (e.g. `accounts.UserSerializer`).
///
/// Two records may share a display name while having distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Closed set of field kinds understood by the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Boolean,
    // text family: all serialized as strings
    Char,
    Choice,
    Date,
    DateTime,
    Decimal,
    Duration,
    File,
    Time,
    Uuid,
    Integer,
    Float,
    /// Postgres-only `text → text | null` mapping.
    CharMapping,
    /// Free-form mapping with text keys.
    Dict,
    MultipleChoice,
    List(Box<FieldDescriptor>),
    Nested(RecordId),
    /// Anything the schema adapter could not classify.
    Opaque,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub nullable: bool,
    pub write_only: bool,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind, nullable: false, write_only: false }
    }
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }
    pub fn list_of(child: FieldDescriptor) -> Self {
        Self::new(FieldKind::List(Box::new(child)))
    }
    pub fn nested(target: impl Into<RecordId>) -> Self {
        Self::new(FieldKind::Nested(target.into()))
    }

    /// Element descriptor, present only for list fields.
    pub fn child(&self) -> Option<&FieldDescriptor> {
        match &self.kind {
            FieldKind::List(child) => Some(child),
            _ => None,
        }
    }

    /// Target identity, present only for nested-record fields.
    pub fn nested_record(&self) -> Option<&RecordId> {
        match &self.kind {
            FieldKind::Nested(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    pub id: RecordId,
    /// Display name, before suffix stripping.
    pub name: String,
    pub fields: IndexMap<String, FieldDescriptor>, // declaration order
}

impl RecordDescriptor {
    /// Record whose identity is its display name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { id: RecordId::new(name.clone()), name, fields: IndexMap::new() }
    }
    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }
    pub fn field(mut self, name: impl Into<String>, field: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), field);
        self
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OUTPUT: SEMANTIC TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Bool,
    Text,
    Int,
    Float,
}

/// Target-syntax independent type of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SemanticType {
    Primitive { name: Primitive },
    MappingOf { key: Box<SemanticType>, value: Box<SemanticType> },
    SetOf { item: Box<SemanticType> },
    SequenceOf { item: Box<SemanticType> },
    NamedReference { name: String, nullable: bool },
    Optional { inner: Box<SemanticType> },
    Unknown,
}

impl SemanticType {
    pub fn text() -> Self {
        Self::Primitive { name: Primitive::Text }
    }
    pub fn primitive(name: Primitive) -> Self {
        Self::Primitive { name }
    }
    pub fn mapping_of(key: SemanticType, value: SemanticType) -> Self {
        Self::MappingOf { key: Box::new(key), value: Box::new(value) }
    }
    pub fn set_of(item: SemanticType) -> Self {
        Self::SetOf { item: Box::new(item) }
    }
    pub fn sequence_of(item: SemanticType) -> Self {
        Self::SequenceOf { item: Box::new(item) }
    }
    pub fn named(name: impl Into<String>, nullable: bool) -> Self {
        Self::NamedReference { name: name.into(), nullable }
    }

    /// Wraps in `Optional` unless already optional.
    pub fn optional(inner: SemanticType) -> Self {
        match inner {
            opt @ Self::Optional { .. } => opt,
            other => Self::Optional { inner: Box::new(other) },
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional { .. })
    }
}

/// Ordered attribute map of one resolved record.
pub type Attributes = IndexMap<String, SemanticType>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedType {
    pub name: String,
    pub attributes: Attributes,
}

/// Resolved records, in emission order. Handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeTable {
    pub types: Vec<ResolvedType>,
}

impl TypeTable {
    pub fn push(&mut self, name: String, attributes: Attributes) {
        self.types.push(ResolvedType { name, attributes });
    }
    pub fn get(&self, name: &str) -> Option<&ResolvedType> {
        self.types.iter().find(|t| t.name == name)
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }
    pub fn len(&self) -> usize {
        self.types.len()
    }
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedType> {
        self.types.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_never_double_wraps() {
        let once = SemanticType::optional(SemanticType::text());
        let twice = SemanticType::optional(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn accessors_follow_kind() {
        let list = FieldDescriptor::list_of(FieldDescriptor::new(FieldKind::Integer));
        assert_eq!(list.child().map(|c| &c.kind), Some(&FieldKind::Integer));
        assert!(list.nested_record().is_none());

        let nested = FieldDescriptor::nested("AddressSerializer");
        assert_eq!(nested.nested_record(), Some(&RecordId::new("AddressSerializer")));
        assert!(nested.child().is_none());
    }

    #[test]
    fn semantic_types_serialize_tagged() {
        let ty = SemanticType::optional(SemanticType::named("Address", true));
        let v = serde_json::to_value(&ty).unwrap();
        assert_eq!(v["type"], "optional");
        assert_eq!(v["inner"]["type"], "named_reference");
        assert_eq!(v["inner"]["name"], "Address");
    }
}
