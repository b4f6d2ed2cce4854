//! Append-only store of every ingested row.

use log::trace;

use crate::config::Schema;
use crate::index::RoadIndex;
use crate::record::{Record, SectionKey};
use crate::value::FieldValue;

/// Holds all rows for the session and keeps its [`RoadIndex`] in step
/// with ingestion.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    schema: Schema,
    records: Vec<Record>,
    index: RoadIndex,
}

impl RecordStore {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            index: RoadIndex::new(),
        }
    }

    /// Builds a store from a sequence of raw rows in one ingestion pass.
    pub fn from_rows<R, I, K, V>(schema: Schema, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut store = Self::new(schema);
        for row in rows {
            store.ingest(row);
        }
        store
    }

    /// Coerces and appends one row, then folds it into the road index.
    /// Malformed rows are stored as given.
    pub fn ingest<I, K, V>(&mut self, row: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.push(Record::from_fields(row));
    }

    /// Appends an already-coerced record.
    pub fn push(&mut self, record: Record) {
        self.index.observe(&record, &self.schema);
        trace!("ingested record #{}", self.records.len());
        self.records.push(record);
    }

    /// All records at `key`, in ingestion order. Empty if none match.
    pub fn query(&self, key: SectionKey) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| {
                record.number(&self.schema.easting) == Some(key.easting)
                    && record.number(&self.schema.northing) == Some(key.northing)
            })
            .collect()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn index(&self) -> &RoadIndex {
        &self.index
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
}
