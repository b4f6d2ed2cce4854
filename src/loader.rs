//! One-shot load of the traffic CSV into a [`RecordStore`].

use std::fs::File;
use std::path::Path;

use csv::Reader;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::config::Schema;
use crate::error::LoadError;
use crate::store::RecordStore;

/// A CSV row as `(header, cell)` pairs, before coercion.
pub type RawRow = Vec<(String, String)>;

fn open(path: &Path) -> Result<Reader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Reader::from_reader(file))
}

/// Reads every row of `path`, pairing cells with their column headers.
///
/// # Errors
///
/// * If the file cannot be opened
/// * If any row is malformed CSV
pub fn read_rows(path: &Path, show_progress: bool) -> Result<Vec<RawRow>, LoadError> {
    // Count records first so the bar has a length.
    let total_records = if show_progress {
        open(path)?.records().count()
    } else {
        0
    };

    let pb = if show_progress {
        let pb = ProgressBar::new(total_records as u64);
        pb.set_message("Loading CSV...");
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} {wide_bar} {pos}/{len} ({eta})")
                .progress_chars("█▒░"),
        );
        pb.enable_steady_tick(100);
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut rdr = open(path)?;
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::with_capacity(total_records);

    for result in rdr.records() {
        let record = result?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
        pb.inc(1);
    }
    pb.finish_with_message("CSV loading complete.");

    Ok(rows)
}

/// Loads `path` and ingests every row, in file order.
///
/// # Errors
///
/// * Any [`LoadError`] from [`read_rows`]; the store is never partially built
pub fn load_store(path: &Path, schema: Schema, show_progress: bool) -> Result<RecordStore, LoadError> {
    let rows = read_rows(path, show_progress)?;
    let store = RecordStore::from_rows(schema, rows);

    info!(
        "Loaded {} records: {} roads, {} catalogued sections",
        store.len(),
        store.index().roads().len(),
        store.index().sections().len()
    );

    Ok(store)
}
