//! Road traffic (AADF) data indexing and query layer.
//!
//! Rows from the traffic CSV are loaded once into a [`RecordStore`], which
//! keeps a [`RoadIndex`] of unique roads and canonical-year road sections.
//! A [`SeriesExtractor`] turns a section into year-aligned series for
//! charting, and [`Dashboard`] drives the road → section → chart flow
//! without any UI attached.

pub mod chart;
pub mod config;
pub mod coords;
pub mod error;
pub mod export;
pub mod index;
pub mod loader;
pub mod record;
pub mod selection;
pub mod series;
pub mod store;
pub mod value;

pub use config::{DataArgs, Schema, DEFAULT_COLUMNS};
pub use coords::{GridConverter, LatLng, MapView, OsGridConverter};
pub use error::{LoadError, QueryError};
pub use index::{RoadIndex, SectionEntry};
pub use record::{Record, SectionKey};
pub use selection::{Dashboard, SectionOption, Update};
pub use series::{ChartData, Dataset, SeriesExtractor, SeriesResult};
pub use store::RecordStore;
pub use value::FieldValue;
