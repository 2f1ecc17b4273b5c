//! Immutable, id-unique collections of records.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{ModelError, Result};
use crate::ids::RecordId;
use crate::record::{Attributes, Record};

/// Ordered collection of records with pairwise-distinct ids.
///
/// Insertion order is preserved and is significant: the matcher resolves
/// equidistant candidates in favour of the record inserted first.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    records: Vec<Record>,
    index: HashMap<RecordId, usize>,
}

impl PointSet {
    /// Builds a set from already validated records.
    ///
    /// Fails with [`ModelError::InvalidRecord`] on the first duplicated id.
    pub fn new(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        let records: Vec<Record> = records.into_iter().collect();
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            match index.entry(record.id().clone()) {
                Entry::Occupied(existing) => {
                    return Err(ModelError::InvalidRecord {
                        id: record.id().to_string(),
                        reason: format!(
                            "duplicate id (positions {} and {position})",
                            existing.get()
                        ),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }
        Ok(Self { records, index })
    }

    /// Builds a set from raw `(id, x, y, attributes)` tuples.
    pub fn from_tuples<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64, f64, Attributes)>,
        S: Into<String>,
    {
        let records = rows
            .into_iter()
            .map(|(id, x, y, attributes)| Record::new(id, x, y, attributes))
            .collect::<Result<Vec<_>>>()?;
        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at an insertion position.
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn position_of(&self, id: &RecordId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn lookup(&self, id: &RecordId) -> Option<&Record> {
        self.position_of(id).map(|position| &self.records[position])
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
