//! Deduplicated views over the record store: the sorted set of road names
//! and the catalog of road sections taken from the canonical year.

use serde::Serialize;

use crate::config::Schema;
use crate::record::{Record, SectionKey};
use crate::value::FieldValue;

/// One road section as shown in the section picker.
///
/// Field order matters: entries sort by road, then junctions, then key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SectionEntry {
    pub road: String,
    pub start_junction: FieldValue,
    pub end_junction: FieldValue,
    /// `None` when the canonical-year row had non-numeric coordinates.
    pub key: Option<SectionKey>,
}

impl SectionEntry {
    pub fn from_record(record: &Record, schema: &Schema) -> Self {
        Self {
            road: record.road(schema),
            start_junction: record.field_or_blank(&schema.start_junction),
            end_junction: record.field_or_blank(&schema.end_junction),
            key: record.section_key(schema),
        }
    }

    /// Label in the form `"<start> to <end>"`.
    pub fn label(&self) -> String {
        format!("{} to {}", self.start_junction, self.end_junction)
    }

    /// Rows with a zero start or end junction are placeholders in the
    /// source data and never offered for selection.
    pub fn is_dead(&self) -> bool {
        let zero = FieldValue::Number(0.0);
        self.start_junction == zero || self.end_junction == zero
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoadIndex {
    roads: Vec<String>,
    sections: Vec<SectionEntry>,
}

impl RoadIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one ingested record into both views.
    pub fn observe(&mut self, record: &Record, schema: &Schema) {
        self.record_road(&record.road(schema));
        self.record_section(record, schema);
    }

    /// Adds `name` to the road set if absent. The set stays sorted.
    pub fn record_road(&mut self, name: &str) {
        if let Err(pos) = self.roads.binary_search_by(|road| road.as_str().cmp(name)) {
            self.roads.insert(pos, name.to_string());
        }
    }

    /// Appends a catalog entry when `record` is from the canonical year.
    ///
    /// Only the year filter deduplicates: two canonical-year rows for the
    /// same coordinates produce two entries.
    pub fn record_section(&mut self, record: &Record, schema: &Schema) {
        #[allow(clippy::cast_precision_loss)]
        let canonical = schema.canonical_year as f64;
        if record.year(schema) != Some(canonical) {
            return;
        }

        let entry = SectionEntry::from_record(record, schema);
        // Stable insert after any equal entries keeps the catalog sorted.
        let pos = self.sections.partition_point(|existing| existing <= &entry);
        self.sections.insert(pos, entry);
    }

    pub fn roads(&self) -> &[String] {
        &self.roads
    }

    pub fn sections(&self) -> &[SectionEntry] {
        &self.sections
    }

    /// Every catalog entry for `road`, in catalog order.
    pub fn sections_for_road(&self, road: &str) -> Vec<&SectionEntry> {
        self.sections.iter().filter(|s| s.road == road).collect()
    }
}
