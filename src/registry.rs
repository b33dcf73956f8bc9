//! Insertion-ordered lookup of record descriptors by identity.

use indexmap::IndexMap;

use crate::error::SourceError;
use crate::ir::{RecordDescriptor, RecordId};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: IndexMap<RecordId, RecordDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record. Identities must be unique.
    pub fn insert(&mut self, record: RecordDescriptor) -> Result<(), SourceError> {
        if self.records.contains_key(&record.id) {
            return Err(SourceError::DuplicateRecord(record.id));
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn get(&self, id: &RecordId) -> Option<&RecordDescriptor> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    /// Identities in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &RecordDescriptor> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<RecordDescriptor> for Registry {
    /// Later duplicates are dropped; use [`Registry::insert`] to detect them.
    fn from_iter<I: IntoIterator<Item = RecordDescriptor>>(iter: I) -> Self {
        let mut out = Self::new();
        for record in iter {
            if !out.contains(&record.id) {
                out.records.insert(record.id.clone(), record);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_identity_is_rejected() {
        let mut reg = Registry::new();
        reg.insert(RecordDescriptor::new("UserSerializer")).unwrap();
        let err = reg.insert(RecordDescriptor::new("UserSerializer")).unwrap_err();
        assert!(matches!(err, SourceError::DuplicateRecord(id) if id.as_str() == "UserSerializer"));

        // same display name under another identity is fine here
        reg.insert(RecordDescriptor::new("UserSerializer").with_id("admin.UserSerializer")).unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn ids_keep_registration_order() {
        let reg: Registry = ["B", "A", "C"].into_iter().map(RecordDescriptor::new).collect();
        let ids: Vec<&str> = reg.ids().map(RecordId::as_str).collect();
        assert_eq!(ids, ["B", "A", "C"]);
    }
}
