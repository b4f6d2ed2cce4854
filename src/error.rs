use std::path::PathBuf;

use crate::record::SectionKey;

/// The dataset could not be loaded. Nothing downstream is set up when this
/// happens.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid CSV.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Recoverable misses while answering a selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// No stored record matches the requested section.
    #[error("no records for section at {0}")]
    EmptySelection(SectionKey),

    /// The chosen section option carries no coordinates.
    #[error("section option {label:?} has no section key")]
    MissingSectionKey { label: String },
}
