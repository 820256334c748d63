//! CSV discovery and loading.
//!
//! Turns a file, a directory of files, or the demo generator into a single
//! [`RawTable`] for the normalizer. No cell is interpreted here.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use pulse_core::error::{PulseError, Result};
use pulse_core::models::{RawTable, REQUIRED_COLUMNS};
use tracing::{debug, info, warn};

use crate::demo::DemoGenerator;

// ── DataSource ────────────────────────────────────────────────────────────────

/// Where the dashboard's records come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// Synthetic records from the seeded demo generator.
    Demo { seed: u64, rows: usize },
    /// A CSV file, or a directory searched recursively for `.csv` files.
    Path(PathBuf),
}

impl DataSource {
    /// Short description for the data-source banner.
    pub fn label(&self) -> String {
        match self {
            DataSource::Demo { seed, rows } => {
                format!("Demo data ({rows} rows, seed {seed})")
            }
            DataSource::Path(path) => path.display().to_string(),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, DataSource::Demo { .. })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Load the raw table for `source`.
pub fn load_source(source: &DataSource) -> Result<RawTable> {
    match source {
        DataSource::Demo { seed, rows } => Ok(DemoGenerator::new(*seed, *rows).generate()),
        DataSource::Path(path) => load_raw_table(path),
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load a single CSV file or every CSV file under a directory.
///
/// Files after the first are aligned to the first file's header order by
/// column name, so their columns may appear in any order.
pub fn load_raw_table(path: &Path) -> Result<RawTable> {
    if !path.is_dir() {
        let table = read_csv_file(path)?;
        info!("Loaded {} rows from {}", table.len(), path.display());
        return Ok(table);
    }

    let files = find_csv_files(path);
    let Some((first, rest)) = files.split_first() else {
        return Err(PulseError::NoDataFiles(path.to_path_buf()));
    };

    let mut combined = read_csv_file(first)?;
    for file in rest {
        let table = read_csv_file(file)?;
        combined.extend_rows(align_columns(&combined.headers, table)?);
    }

    info!(
        "Loaded {} rows from {} files under {}",
        combined.len(),
        files.len(),
        path.display()
    );
    Ok(combined)
}

/// Read one CSV file.
pub fn read_csv_file(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|source| PulseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv(file)?;
    debug!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Read CSV text with a header row from any reader.
///
/// Header cells are trimmed. Short rows are padded with empty cells and long
/// rows truncated so that every row has one cell per header.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let width = headers.len();
    let mut table = RawTable::new(headers);

    for record in csv_reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        row.resize(width, String::new());
        table.rows.push(row);
    }

    Ok(table)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn header_key(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Reorder the cells of `table` to follow `target` headers.
///
/// Target columns absent from `table` become empty cells, unless they are
/// required, in which case the file is rejected.
fn align_columns(target: &[String], table: RawTable) -> Result<RawTable> {
    let source_keys: Vec<String> = table.headers.iter().map(|h| header_key(h)).collect();
    let target_keys: Vec<String> = target.iter().map(|h| header_key(h)).collect();
    if source_keys == target_keys {
        return Ok(table);
    }

    let positions: Vec<Option<usize>> = target_keys
        .iter()
        .map(|key| source_keys.iter().position(|k| k == key))
        .collect();

    let missing: Vec<String> = target_keys
        .iter()
        .zip(&positions)
        .filter(|(key, pos)| pos.is_none() && REQUIRED_COLUMNS.contains(&key.as_str()))
        .map(|(key, _)| key.clone())
        .collect();
    if !missing.is_empty() {
        return Err(PulseError::Schema { missing });
    }

    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            positions
                .iter()
                .map(|pos| pos.and_then(|i| row.get(i).cloned()).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(RawTable {
        headers: target.to_vec(),
        rows,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
