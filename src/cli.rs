//! Minimal CLI: load schema documents → resolve → (typescript | schema)
use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::ir::{RecordId, TypeTable};
use crate::naming::DEFAULT_SUFFIX;
use crate::registry::Registry;
use crate::render::{render, RenderOptions};
use crate::resolve::{ResolveOptions, Resolver};
use crate::source::{load_registry, resolve_file_path_patterns};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// resolve serializer schema documents into TypeScript interfaces
#[derive(Parser, Debug)]
#[command(name = "schema2ts", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// resolve and emit TypeScript interfaces
    Typescript(TypescriptOut),
    /// resolve and print the type table as JSON (debug view)
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// record identity to start from (repeatable); every record when omitted
    #[arg(long)]
    root: Vec<String>,

    /// do not pull in nested records that are not roots
    #[arg(long, default_value_t = false)]
    no_follow: bool,

    /// emit each root on its own, nested records become `any`
    #[arg(long, default_value_t = false)]
    single: bool,

    /// suffix stripped from record names
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    suffix: String,
}

#[derive(clap::Parser, Debug)]
struct TypescriptOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// spaces per indentation level
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// omit the `export` keyword
    #[arg(long)]
    no_export: bool,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            follow_dependencies: !self.no_follow && !self.single,
            suffix: self.suffix.clone(),
        }
    }

    fn load(&self) -> Result<Registry> {
        let paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let registry = load_registry(&paths).context("failed to load schema documents")?;
        info!(files = paths.len(), records = registry.len(), "loaded schema registry");
        Ok(registry)
    }

    fn resolve(&self) -> Result<TypeTable> {
        let registry = self.load()?;
        let roots: Vec<RecordId> = if self.root.is_empty() {
            registry.ids().cloned().collect()
        } else {
            self.root.iter().map(|r| RecordId::new(r.as_str())).collect()
        };
        let resolver = Resolver::new(&registry, self.resolve_options());

        if !self.single {
            return Ok(resolver.resolve(&roots)?);
        }

        let mut table = TypeTable::default();
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();
        for root in &roots {
            if !seen_ids.insert(root) {
                continue;
            }
            for ty in resolver.resolve_one(root)?.types {
                if !seen_names.insert(ty.name.clone()) {
                    bail!("two records resolve to type name '{}'", ty.name);
                }
                table.types.push(ty);
            }
        }
        Ok(table)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Typescript(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let table = target.input_settings.resolve()?;
                let options = RenderOptions { indent: target.indent, export: !target.no_export };
                let ts_src = render(&table, &options);
                write_output(target.out.as_ref(), &ts_src, table.len())
            }
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let table = target.input_settings.resolve()?;
                let schema_src = serde_json::to_string_pretty(&table)?;
                write_output(target.out.as_ref(), &schema_src, table.len())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&PathBuf>, src: &str, count: usize) -> Result<()> {
    let Some(out) = out else {
        println!("{src}");
        return Ok(())
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("{} wrote {count} types to {}", "✓".green(), out.display());
    Ok(())
}
