//! Persistent exercise weight table.
//!
//! The table is a CSV file with an `Exercise,Weight` header and one row per
//! exercise id, ascending and without gaps. Sessions read a contiguous range
//! of it and write the whole table back on every save.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::types::{ExerciseError, ExerciseId, Weight, WorkingSet};

/// Header row of the weight table.
pub const HEADER: [&str; 2] = ["Exercise", "Weight"];

/// Minimum weight of an exercise loaded into the working set.
pub const MIN_ACTIVE_WEIGHT: Weight = 1;

/// Exercise weight table on disk.
#[derive(Debug, Clone)]
pub struct ExerciseStore {
    path: PathBuf,
}

impl ExerciseStore {
    /// Create a store backed by the given CSV file (which may not exist yet).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the weight table.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the weight table has been written before.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the working set for `[first, last]`.
    ///
    /// Without a stored table the result covers ids `1..=last`, with weight 0
    /// below `first` and 1 inside the range. With a stored table only rows
    /// `first..=last` are returned and their weights are raised to at least 1.
    pub fn load_or_default(
        &self,
        first: ExerciseId,
        last: ExerciseId,
    ) -> Result<WorkingSet, ExerciseError> {
        if !self.exists() {
            tracing::info!(
                "No CSV file found at {}. Generating default exercises and weights.",
                self.path.display()
            );
            return Ok(default_working_set(first, last));
        }

        tracing::info!("Found existing CSV file at {}", self.path.display());

        let mut ids = Vec::new();
        let mut weights = Vec::new();
        let mut rows_read: u32 = 0;

        for (index, record) in self.reader()?.records().enumerate() {
            let row = index + 1;
            if row > last as usize {
                break;
            }
            let record = record?;
            rows_read += 1;
            if row < first as usize {
                continue;
            }

            let (id, weight) = parse_row(&record, row)?;
            ids.push(id);
            weights.push(weight.max(MIN_ACTIVE_WEIGHT));
        }

        if rows_read < last {
            return Err(ExerciseError::TruncatedStorage {
                expected: last,
                found: rows_read,
            });
        }

        tracing::debug!("Loaded {} exercises ({}-{})", ids.len(), first, last);
        WorkingSet::new(ids, weights)
    }

    /// Merge `ids`/`weights` into the stored table and rewrite it.
    ///
    /// Every id in `1..=total_exercises` gets a row: ids never stored default
    /// to 0, stored rows are kept as they are, and the given weights win over
    /// both.
    pub fn overlay_and_write(
        &self,
        ids: &[ExerciseId],
        weights: &[Weight],
        total_exercises: u32,
    ) -> Result<(), ExerciseError> {
        if ids.len() != weights.len() {
            return Err(ExerciseError::LengthMismatch {
                ids: ids.len(),
                weights: weights.len(),
            });
        }

        tracing::info!("Saving exercises and weights to CSV file {}", self.path.display());

        let mut table: BTreeMap<ExerciseId, Weight> =
            (1..=total_exercises).map(|id| (id, 0)).collect();

        if self.exists() {
            for (index, record) in self.reader()?.records().enumerate() {
                let (id, weight) = parse_row(&record?, index + 1)?;
                table.insert(id, weight);
            }
        }

        for (&id, &weight) in ids.iter().zip(weights) {
            table.insert(id, weight);
        }

        self.write_table(&table)
    }

    /// Save a working set (see [`ExerciseStore::overlay_and_write`]).
    pub fn save(&self, set: &WorkingSet, total_exercises: u32) -> Result<(), ExerciseError> {
        self.overlay_and_write(&set.ids, &set.weights, total_exercises)
    }

    fn reader(&self) -> Result<csv::Reader<File>, ExerciseError> {
        let file = File::open(&self.path).map_err(|e| ExerciseError::io(&self.path, e))?;
        // The first row is always treated as the header, whatever it holds.
        Ok(ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file))
    }

    fn write_table(&self, table: &BTreeMap<ExerciseId, Weight>) -> Result<(), ExerciseError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExerciseError::io(parent, e))?;
        }

        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path).map_err(|e| ExerciseError::io(&tmp_path, e))?;
            let mut writer = WriterBuilder::new().from_writer(file);
            writer.write_record(HEADER)?;
            for (id, weight) in table {
                writer.write_record([id.to_string(), weight.to_string()])?;
            }
            writer.flush().map_err(|e| ExerciseError::io(&tmp_path, e))?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| ExerciseError::io(&self.path, e))?;
        tracing::debug!("Wrote {} exercise rows", table.len());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Working set used before any table exists.
fn default_working_set(first: ExerciseId, last: ExerciseId) -> WorkingSet {
    let ids: Vec<ExerciseId> = (1..=last).collect();
    let weights = ids
        .iter()
        .map(|&id| if id < first { 0 } else { MIN_ACTIVE_WEIGHT })
        .collect();
    WorkingSet { ids, weights }
}

fn parse_row(record: &StringRecord, row: usize) -> Result<(ExerciseId, Weight), ExerciseError> {
    let field = |index: usize, name: &str| -> Result<u32, ExerciseError> {
        let raw = record.get(index).ok_or_else(|| ExerciseError::MalformedRow {
            row,
            reason: format!("missing {} column", name),
        })?;
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ExerciseError::MalformedRow {
                row,
                reason: format!("invalid {} '{}': {}", name, raw, e),
            })
    };

    Ok((field(0, "exercise")?, field(1, "weight")?))
}
