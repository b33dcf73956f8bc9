//! Serializer-style schema descriptions → TypeScript interfaces.
//!
//! Pipeline:
//! 1. `source` reads schema documents into a `Registry` of record descriptors
//! 2. `resolve` walks the nested-record closure, using `mapper` per attribute
//! 3. `render` turns the resulting `TypeTable` into interface declarations
pub mod cli;
pub mod error;
pub mod ir;
pub mod mapper;
pub mod naming;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod source;

pub use error::{ResolveError, SourceError};
pub use ir::{FieldDescriptor, FieldKind, RecordDescriptor, RecordId, SemanticType, TypeTable};
pub use mapper::map_type;
pub use registry::Registry;
pub use render::{render, RenderOptions};
pub use resolve::{resolve_record, ResolveOptions, Resolver};

/// Resolve the closure of `roots` and render it.
pub fn generate_interfaces<'r, I>(
    registry: &Registry,
    roots: I,
    resolve_options: ResolveOptions,
    render_options: &RenderOptions,
) -> Result<String, ResolveError>
where
    I: IntoIterator<Item = &'r RecordId>,
{
    let table = Resolver::new(registry, resolve_options).resolve(roots)?;
    Ok(render(&table, render_options))
}

/// Render a single record without following its nested records.
pub fn generate_interface(record: &RecordDescriptor, suffix: &str, render_options: &RenderOptions) -> String {
    render(&resolve_record(record, suffix), render_options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_closure() {
        let mut reg = Registry::new();
        reg.insert(
            RecordDescriptor::new("UserSerializer")
                .field("name", FieldDescriptor::new(FieldKind::Char))
                .field("homeAddress", FieldDescriptor::nested("AddressSerializer").nullable()),
        )
        .unwrap();
        reg.insert(
            RecordDescriptor::new("AddressSerializer")
                .field("street", FieldDescriptor::new(FieldKind::Char))
                .field("zip", FieldDescriptor::new(FieldKind::Char).nullable()),
        )
        .unwrap();

        let src = generate_interfaces(
            &reg,
            [&RecordId::new("UserSerializer")],
            ResolveOptions::default(),
            &RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(
            src,
            "export interface User {\n    name: string;\n    homeAddress: Address | null;\n}\n\n\
             export interface Address {\n    street: string;\n    zip?: string | null;\n}\n",
        );
    }

    #[test]
    fn single_record_rendering() {
        let record = RecordDescriptor::new("PlaceSerializer")
            .field("location", FieldDescriptor::new(FieldKind::Opaque))
            .field("owner", FieldDescriptor::nested("UserSerializer"));
        let src = generate_interface(&record, naming::DEFAULT_SUFFIX, &RenderOptions::default());
        assert_eq!(src, "export interface Place {\n    location: any;\n    owner: any;\n}\n");
    }
}
