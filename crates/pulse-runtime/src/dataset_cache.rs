//! Memoized datasets keyed by data source.
//!
//! Loading and normalizing a source is the expensive part of a pass. The
//! cache keeps the normalized set for every source seen so far; demo sources
//! are deterministic in `(seed, rows)`, so a cached entry is always identical
//! to a fresh one. File sources are re-read only on a forced refresh.

use std::collections::HashMap;
use std::sync::Arc;

use pulse_core::error::Result;
use pulse_data::normalizer::{NormalizedSet, RecordNormalizer};
use pulse_data::reader::{load_source, DataSource};

/// Normalized datasets by [`DataSource`].
///
/// # Example
/// ```
/// use pulse_data::reader::DataSource;
/// use pulse_runtime::dataset_cache::DatasetCache;
///
/// let mut cache = DatasetCache::new();
/// let source = DataSource::Demo { seed: 42, rows: 100 };
/// let set = cache.get(&source, false).unwrap();
/// assert_eq!(set.len(), 100);
/// ```
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<DataSource, Arc<NormalizedSet>>,
    /// Human-readable description of the last load error.
    last_error: Option<String>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the normalized set for `source`, loading it on a cache miss.
    ///
    /// When `force_refresh` is `true` the source is loaded again. If that
    /// reload fails and an older copy exists, the older copy is returned and
    /// the error is kept in [`DatasetCache::last_error`].
    pub fn get(&mut self, source: &DataSource, force_refresh: bool) -> Result<Arc<NormalizedSet>> {
        if !force_refresh {
            if let Some(data) = self.entries.get(source) {
                tracing::debug!(source = %source, "dataset cache hit");
                return Ok(Arc::clone(data));
            }
        }

        match Self::load(source) {
            Ok(set) => {
                tracing::debug!(
                    source = %source,
                    rows = set.len(),
                    dropped = set.report.dropped_rows,
                    "dataset cache updated"
                );
                let data = Arc::new(set);
                self.entries.insert(source.clone(), Arc::clone(&data));
                self.last_error = None;
                Ok(data)
            }
            Err(e) => match self.entries.get(source) {
                Some(data) => {
                    tracing::warn!(error = %e, "reload failed; keeping cached dataset");
                    self.last_error = Some(e.to_string());
                    Ok(Arc::clone(data))
                }
                None => {
                    self.last_error = Some(e.to_string());
                    Err(e)
                }
            },
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn load(source: &DataSource) -> Result<NormalizedSet> {
        let table = load_source(source)?;
        RecordNormalizer::normalize(&table)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
