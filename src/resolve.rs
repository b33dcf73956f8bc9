//! Dependency closure over nested records.
//!
//! Starting from a root set, every reachable record is visited exactly once:
//! - nested-record attributes become `NamedReference`s, never inline maps;
//! - a record is scheduled at most once, so self and mutual recursion terminate;
//! - traversal state is owned by one `resolve` call.
//!
//! The worklist is FIFO in first-seen order (roots in caller order, then
//! dependencies in discovery order), so output is stable across runs.

use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace, warn};

use crate::error::ResolveError;
use crate::ir::{Attributes, FieldDescriptor, RecordDescriptor, RecordId, SemanticType, TypeTable};
use crate::mapper::map_type;
use crate::naming::{normalized_name, DEFAULT_SUFFIX};
use crate::registry::Registry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Schedule nested records that are not yet known. When off, only
    /// references to already scheduled records are kept.
    pub follow_dependencies: bool,
    /// Suffix stripped from display names.
    pub suffix: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { follow_dependencies: true, suffix: DEFAULT_SUFFIX.to_string() }
    }
}

pub struct Resolver<'a> {
    registry: &'a Registry,
    options: ResolveOptions,
}

/// Per-call traversal state.
struct Walk<'a> {
    todo: VecDeque<&'a RecordDescriptor>,
    queued: HashSet<&'a RecordId>,
    done: HashSet<&'a RecordId>,
    names: HashMap<String, &'a RecordId>,
    output: TypeTable,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, options: ResolveOptions) -> Self {
        Self { registry, options }
    }

    /// Resolve the closure of `roots`.
    pub fn resolve<'r, I>(&self, roots: I) -> Result<TypeTable, ResolveError>
    where
        I: IntoIterator<Item = &'r RecordId>,
    {
        let mut walk = Walk {
            todo: VecDeque::new(),
            queued: HashSet::new(),
            done: HashSet::new(),
            names: HashMap::new(),
            output: TypeTable::default(),
        };

        for root in roots {
            let record = self
                .registry
                .get(root)
                .ok_or_else(|| ResolveError::UnknownRoot(root.clone()))?;
            if walk.queued.insert(&record.id) {
                walk.todo.push_back(record);
            }
        }

        while let Some(record) = walk.todo.pop_front() {
            walk.queued.remove(&record.id);
            let name = self.name_of(record);
            claim_name(&mut walk.names, &name, &record.id)?;
            debug!(record = %record.id, name = %name, "resolving record");

            let mut attributes = Attributes::new();
            for (attr, field) in &record.fields {
                if field.write_only {
                    continue;
                }
                let ty = match field.nested_record() {
                    Some(target) => self.nested_type(record, target, field, &mut walk),
                    None => map_type(field),
                };
                attributes.insert(attr.clone(), ty);
            }

            walk.output.push(name, attributes);
            walk.done.insert(&record.id);
        }

        Ok(walk.output)
    }

    /// Resolve with every registered record as a root.
    pub fn resolve_all(&self) -> Result<TypeTable, ResolveError> {
        self.resolve(self.registry.ids())
    }

    /// Single-record variant, see [`resolve_record`].
    pub fn resolve_one(&self, root: &RecordId) -> Result<TypeTable, ResolveError> {
        let record = self
            .registry
            .get(root)
            .ok_or_else(|| ResolveError::UnknownRoot(root.clone()))?;
        Ok(resolve_record(record, &self.options.suffix))
    }

    fn name_of(&self, record: &RecordDescriptor) -> String {
        normalized_name(&record.name, &self.options.suffix)
    }

    fn nested_type(
        &self,
        current: &'a RecordDescriptor,
        target: &RecordId,
        field: &FieldDescriptor,
        walk: &mut Walk<'a>,
    ) -> SemanticType {
        let Some(target_record) = self.registry.get(target) else {
            warn!(record = %current.id, target = %target, "nested record is not registered");
            return map_type(field);
        };

        let seen = *target == current.id
            || walk.queued.contains(target)
            || walk.done.contains(target);

        if seen {
            SemanticType::named(self.name_of(target_record), field.nullable)
        } else if self.options.follow_dependencies {
            trace!(record = %current.id, dependency = %target, "scheduling dependency");
            walk.queued.insert(&target_record.id);
            walk.todo.push_back(target_record);
            SemanticType::named(self.name_of(target_record), field.nullable)
        } else {
            map_type(field)
        }
    }
}

fn claim_name<'a>(
    names: &mut HashMap<String, &'a RecordId>,
    name: &str,
    id: &'a RecordId,
) -> Result<(), ResolveError> {
    match names.get(name) {
        Some(first) if *first != id => Err(ResolveError::NameCollision {
            name: name.to_string(),
            first: (*first).clone(),
            second: id.clone(),
        }),
        Some(_) => Ok(()),
        None => {
            names.insert(name.to_string(), id);
            Ok(())
        }
    }
}

/// Process exactly one record without following nested records.
///
/// Every non-write-only attribute goes through [`map_type`], so nested
/// records degrade to `Unknown`.
pub fn resolve_record(record: &RecordDescriptor, suffix: &str) -> TypeTable {
    let attributes: Attributes = record
        .fields
        .iter()
        .filter(|(_, field)| !field.write_only)
        .map(|(attr, field)| (attr.clone(), map_type(field)))
        .collect();

    let mut out = TypeTable::default();
    out.push(normalized_name(&record.name, suffix), attributes);
    out
}

// ------------------------------- Tests ------------------------------------ //
