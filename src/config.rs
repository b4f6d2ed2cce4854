//! Column layout of the AADF dataset and the options every binary shares.

use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_DATA_PATH: &str = "data/devon.csv";

/// The year whose rows stand in for "one entry per section".
pub const DEFAULT_CANONICAL_YEAR: i64 = 2000;

/// Vehicle-type columns offered as chart toggles.
pub const DEFAULT_COLUMNS: &[&str] = &[
    "PedalCycles",
    "Motorcycles",
    "CarsTaxis",
    "BusesCoaches",
    "LightGoodsVehicles",
    "AllHGVs",
];

/// Names of the key columns, plus the canonical year used to build the
/// section catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub road: String,
    pub start_junction: String,
    pub end_junction: String,
    pub easting: String,
    pub northing: String,
    pub year: String,
    pub canonical_year: i64,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            road: "Road".to_string(),
            start_junction: "StartJunction".to_string(),
            end_junction: "EndJunction".to_string(),
            easting: "Easting".to_string(),
            northing: "Northing".to_string(),
            year: "AADFYear".to_string(),
            canonical_year: DEFAULT_CANONICAL_YEAR,
        }
    }
}

impl Schema {
    pub fn with_canonical_year(mut self, year: i64) -> Self {
        self.canonical_year = year;
        self
    }
}

/// Dataset options shared by the command-line tools.
#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Path to the AADF CSV file
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Year whose rows define the section catalog
    #[arg(long, default_value_t = DEFAULT_CANONICAL_YEAR)]
    pub canonical_year: i64,
}

impl DataArgs {
    pub fn schema(&self) -> Schema {
        Schema::default().with_canonical_year(self.canonical_year)
    }
}
