//! Year-aligned series for one section, and the bar-chart data shape built
//! from them.

use log::debug;
use serde::Serialize;

use crate::error::QueryError;
use crate::record::SectionKey;
use crate::store::RecordStore;
use crate::value::FieldValue;

/// Dataset colours, assigned in order.
pub const PALETTE: &[&str] = &[
    "#E53935", "#5E35B1", "#1E88E5", "#00897B", "#43A047", "#FFB300",
];

/// One value column at one section, index-aligned with its years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesResult {
    pub column: String,
    pub road: String,
    pub start_junction: FieldValue,
    pub end_junction: FieldValue,
    pub years: Vec<FieldValue>,
    /// `None` where the row has no numeric value for the column.
    pub values: Vec<Option<f64>>,
}

impl SeriesResult {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// `(year, value)` pairs, skipping gaps.
    pub fn points(&self) -> impl Iterator<Item = (&FieldValue, f64)> {
        self.years
            .iter()
            .zip(&self.values)
            .filter_map(|(year, value)| value.map(|v| (year, v)))
    }
}

/// Answers series queries against a loaded [`RecordStore`].
#[derive(Debug, Clone, Copy)]
pub struct SeriesExtractor<'a> {
    store: &'a RecordStore,
}

impl<'a> SeriesExtractor<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Projects `column` and the year out of every record at `key`. Fails
    /// with [`QueryError::EmptySelection`] when nothing matches.
    pub fn extract(&self, column: &str, key: SectionKey) -> Result<SeriesResult, QueryError> {
        let records = self.store.query(key);
        let schema = self.store.schema();
        let first = records.first().ok_or(QueryError::EmptySelection(key))?;

        Ok(SeriesResult {
            column: column.to_string(),
            road: first.road(schema),
            start_junction: first.field_or_blank(&schema.start_junction),
            end_junction: first.field_or_blank(&schema.end_junction),
            years: records.iter().map(|r| r.field_or_blank(&schema.year)).collect(),
            values: records.iter().map(|r| r.number(column)).collect(),
        })
    }

    /// Extracts each column independently. Columns with no data are left out
    /// rather than failing the batch.
    pub fn extract_many<S: AsRef<str>>(&self, columns: &[S], key: SectionKey) -> Vec<SeriesResult> {
        columns
            .iter()
            .filter_map(|column| match self.extract(column.as_ref(), key) {
                Ok(series) => Some(series),
                Err(e) => {
                    debug!("omitting column {}: {e}", column.as_ref());
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub background_color: String,
    pub border_width: u32,
}

/// Bar-chart input: years along the x axis, one coloured dataset per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Combines series into one chart. Returns `None` for an empty slice so
    /// the caller draws nothing.
    pub fn from_series(series: &[SeriesResult]) -> Option<Self> {
        let first = series.first()?;
        let datasets = series
            .iter()
            .zip(PALETTE.iter().cycle())
            .map(|(s, color)| Dataset {
                label: s.column.clone(),
                data: s.values.clone(),
                background_color: (*color).to_string(),
                border_width: 1,
            })
            .collect();

        Some(Self {
            labels: first.years.iter().map(ToString::to_string).collect(),
            datasets,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
