//! One ingested row of the traffic dataset.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::Schema;
use crate::value::FieldValue;

/// A row after numeric coercion. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Builds a record from loosely-typed cells, coercing every cell that
    /// reads fully as a number.
    pub fn from_fields<I, K, V>(row: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let fields = row
            .into_iter()
            .map(|(name, value)| (name.into(), Into::<FieldValue>::into(value).coerce()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(FieldValue::as_number)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Road name as displayed. Missing roads read as an empty string.
    pub fn road(&self, schema: &Schema) -> String {
        self.get(&schema.road).map(ToString::to_string).unwrap_or_default()
    }

    pub fn year(&self, schema: &Schema) -> Option<f64> {
        self.number(&schema.year)
    }

    /// The section this row belongs to, if both coordinates are numeric.
    pub fn section_key(&self, schema: &Schema) -> Option<SectionKey> {
        Some(SectionKey::new(
            self.number(&schema.easting)?,
            self.number(&schema.northing)?,
        ))
    }

    pub fn field_or_blank(&self, column: &str) -> FieldValue {
        self.get(column)
            .cloned()
            .unwrap_or_else(|| FieldValue::Text(String::new()))
    }
}

/// Grid coordinates identifying one physical road section across years.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionKey {
    pub easting: f64,
    pub northing: f64,
}

impl SectionKey {
    pub const fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            FieldValue::Number(self.easting),
            FieldValue::Number(self.northing)
        )
    }
}

impl Ord for SectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.easting
            .total_cmp(&other.easting)
            .then_with(|| self.northing.total_cmp(&other.northing))
    }
}

impl PartialOrd for SectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SectionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SectionKey {}

#[cfg(test)]
mod tests {
    use super::*;

    fn a30_row() -> Record {
        Record::from_fields([
            ("Road", "A30"),
            ("StartJunction", "1"),
            ("EndJunction", "2"),
            ("Easting", "1000"),
            ("Northing", "2000"),
            ("AADFYear", "2000"),
            ("Cars", "500"),
        ])
    }

    #[test]
    fn coerces_numeric_cells_and_keeps_text() {
        let record = a30_row();
        assert_eq!(record.get("Road"), Some(&FieldValue::from("A30")));
        assert_eq!(record.number("Cars"), Some(500.0));
        assert_eq!(record.number("StartJunction"), Some(1.0));
    }

    #[test]
    fn reads_section_key_from_coordinates() {
        let schema = Schema::default();
        assert_eq!(
            a30_row().section_key(&schema),
            Some(SectionKey::new(1000.0, 2000.0))
        );
    }

    #[test]
    fn missing_coordinates_have_no_key() {
        let schema = Schema::default();
        let record = Record::from_fields([("Road", "A30"), ("Easting", "n/a")]);
        assert_eq!(record.section_key(&schema), None);
    }

    #[test]
    fn section_key_display_is_integral() {
        assert_eq!(SectionKey::new(1000.0, 2000.0).to_string(), "(1000, 2000)");
    }
}
