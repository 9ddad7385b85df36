//! Client-side mirror of the remote collection
//!
//! Mutated only after the remote store confirmed the change.

use crate::record::{Record, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    /// Replaces the whole collection with a freshly listed one
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Adds a created record at the end
    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Swaps the entry with `id` for `record`, keeping its position.
    /// Returns false when no entry has that id.
    pub fn replace(&mut self, id: &RecordId, record: Record) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records[index] = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        self.position(id).map(|index| self.records.remove(index))
    }
}
