//! TypeScript interface emitter for a resolved `TypeTable`.
//!
//! Syntax-only: every naming and nullability decision has already been made
//! by the resolver.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{Primitive, SemanticType, TypeTable};

static IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex")
});

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// spaces per indentation level
    pub indent: usize,
    /// prefix each interface with `export`
    pub export: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { indent: 4, export: true }
    }
}

pub struct Codegen {
    options: RenderOptions,
    out: String,
}

impl Codegen {
    pub fn new(options: RenderOptions) -> Self {
        Self { options, out: String::new() }
    }

    /// Emit one interface per table entry, in table order.
    pub fn emit(&mut self, table: &TypeTable) {
        for ty in table.iter() {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            if self.options.export {
                self.out.push_str("export ");
            }
            if ty.attributes.is_empty() {
                self.out.push_str(&format!("interface {} {{}}\n", ty.name));
                continue;
            }
            self.out.push_str(&format!("interface {} {{\n", ty.name));
            let pad = " ".repeat(self.options.indent);
            for (attr, attr_ty) in &ty.attributes {
                let key = property_name(attr);
                let line = match attr_ty {
                    SemanticType::Optional { inner } => {
                        format!("{pad}{key}?: {} | null;\n", type_expr(inner))
                    }
                    other => format!("{pad}{key}: {};\n", type_expr(other)),
                };
                self.out.push_str(&line);
            }
            self.out.push_str("}\n");
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// Render a whole table with the given options.
pub fn render(table: &TypeTable, options: &RenderOptions) -> String {
    let mut cg = Codegen::new(options.clone());
    cg.emit(table);
    cg.into_string()
}

/// TypeScript type expression for a semantic type.
pub fn type_expr(ty: &SemanticType) -> String {
    match ty {
        SemanticType::Primitive { name } => match name {
            Primitive::Bool => "boolean".into(),
            Primitive::Text => "string".into(),
            Primitive::Int | Primitive::Float => "number".into(),
        },
        SemanticType::MappingOf { value, .. } => {
            // only text keys exist in the mapper's table
            format!("{{ [key: string]: {} }}", type_expr(value))
        }
        SemanticType::SetOf { item } | SemanticType::SequenceOf { item } => {
            format!("{}[]", element_expr(item))
        }
        SemanticType::NamedReference { name, nullable } => {
            if *nullable { format!("{name} | null") } else { name.clone() }
        }
        SemanticType::Optional { inner } => format!("{} | null", type_expr(inner)),
        SemanticType::Unknown => "any".into(),
    }
}

fn element_expr(item: &SemanticType) -> String {
    let is_union = matches!(
        item,
        SemanticType::Optional { .. } | SemanticType::NamedReference { nullable: true, .. }
    );
    if is_union { format!("({})", type_expr(item)) } else { type_expr(item) }
}

fn property_name(name: &str) -> String {
    if IDENT.is_match(name) {
        name.to_string()
    } else {
        // JSON string escaping is valid TS string-literal escaping
        serde_json::to_string(name).unwrap_or_else(|_| format!("\"{name}\""))
    }
}

// ------------------------------- Tests ------------------------------------ //
