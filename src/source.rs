//! Schema documents (JSON) → `RecordDescriptor`s.
//!
//! This is the only place that knows the source framework's field class
//! names. Everything past here works on the closed `FieldKind` set.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SourceError;
use crate::ir::{FieldDescriptor, FieldKind, RecordDescriptor, RecordId};
use crate::registry::Registry;

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENT FORMAT
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    records: Vec<RecordDoc>,
}

#[derive(Debug, Deserialize)]
struct RecordDoc {
    /// defaults to `name`
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    fields: IndexMap<String, FieldDoc>,
}

#[derive(Debug, Deserialize)]
struct FieldDoc {
    kind: String,
    #[serde(default)]
    child: Option<Box<FieldDoc>>,
    #[serde(default)]
    record: Option<String>,
    #[serde(default)]
    allow_null: bool,
    #[serde(default)]
    write_only: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl FieldDoc {
    fn into_descriptor(self, at: &str) -> Result<FieldDescriptor, String> {
        let kind = match self.kind.as_str() {
            "boolean" | "null_boolean" => FieldKind::Boolean,
            "char" => FieldKind::Char,
            "choice" => FieldKind::Choice,
            "date" => FieldKind::Date,
            "date_time" => FieldKind::DateTime,
            "decimal" => FieldKind::Decimal,
            "duration" => FieldKind::Duration,
            "file" => FieldKind::File,
            "time" => FieldKind::Time,
            "uuid" => FieldKind::Uuid,
            "integer" => FieldKind::Integer,
            "float" => FieldKind::Float,
            "char_mapping" => FieldKind::CharMapping,
            "dict" => FieldKind::Dict,
            "multiple_choice" => FieldKind::MultipleChoice,
            "list" => {
                // a list without a declared child holds unvalidated values
                let child = match self.child {
                    Some(child) => (*child).into_descriptor(&format!("{at}.child"))?,
                    None => FieldDescriptor::new(FieldKind::Opaque),
                };
                FieldKind::List(Box::new(child))
            }
            "nested" => match self.record {
                Some(record) => FieldKind::Nested(RecordId::new(record)),
                None => return Err(format!("at {at}: nested field requires `record`")),
            },
            other => {
                debug!(kind = other, at, "unrecognized field kind, treating as opaque");
                FieldKind::Opaque
            }
        };
        Ok(FieldDescriptor { kind, nullable: self.allow_null, write_only: self.write_only })
    }
}

impl RecordDoc {
    fn into_descriptor(self, at: &str) -> Result<RecordDescriptor, String> {
        let id = RecordId::new(self.id.unwrap_or_else(|| self.name.clone()));
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for (field_name, field) in self.fields {
            let descriptor = field.into_descriptor(&format!("{at}.fields.{field_name}"))?;
            fields.insert(field_name, descriptor);
        }
        Ok(RecordDescriptor { id, name: self.name, fields })
    }
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Parse one document: either `{"records": [...]}` or a bare array of records.
///
/// `origin` only labels errors (usually the file path).
pub fn parse_document(src: &str, origin: &str) -> Result<Vec<RecordDescriptor>, SourceError> {
    let parse_error = |message: String| SourceError::Parse { origin: origin.to_string(), message };

    let docs = if src.trim_start().starts_with('[') {
        from_str_with_path::<Vec<RecordDoc>>(src).map_err(parse_error)?
    } else {
        from_str_with_path::<SchemaDocument>(src).map_err(parse_error)?.records
    };

    docs.into_iter()
        .enumerate()
        .map(|(i, doc)| doc.into_descriptor(&format!("records[{i}]")).map_err(parse_error))
        .collect()
}

/// Read and register every record of every file, in file order.
pub fn load_registry<I>(paths: I) -> Result<Registry, SourceError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut registry = Registry::new();
    for path in paths {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;
        let records = parse_document(&src, &path.to_string_lossy())?;
        debug!(path = %path.display(), records = records.len(), "loaded schema document");
        for record in records {
            registry.insert(record)?;
        }
    }
    Ok(registry)
}

/// Expand literal paths and quoted glob patterns into file paths.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, SourceError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // explicit glob that matched nothing is almost always a typo
                return Err(SourceError::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //
