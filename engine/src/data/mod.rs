// Loading and cleaning of the three source tables.
pub mod expenditure;
pub mod personnel;
pub mod table;
pub mod travel;

use std::path::{Path, PathBuf};

use crate::error::{SkipReason, SkippedFile};
use table::Table;

/// Cleaned records plus the files that had to be left out.
/// An empty dataset means "no data", never "something failed".
#[derive(Debug)]
pub struct Dataset<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedFile>,
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Dataset { records: Vec::new(), skipped: Vec::new() }
    }
}

impl<T> Dataset<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Folds one file's outcome in: rows are appended, a failure becomes a skip entry.
    pub fn absorb(&mut self, path: &Path, outcome: Result<Vec<T>, SkipReason>) {
        match outcome {
            Ok(records) => {
                tracing::debug!(path = %path.display(), rows = records.len(), "File accepted");
                self.records.extend(records);
            }
            Err(reason) => {
                tracing::warn!(path = %path.display(), reason = %reason, "Skipping file");
                self.skipped.push(SkippedFile { path: PathBuf::from(path), reason });
            }
        }
    }
}

// Shared path for the single-file tables (travel, general expenditures).
// A missing file disables the section; a broken one is reported as skipped.
pub(crate) fn load_single_file<T, F>(path: &Path, parse: F) -> Dataset<T>
where
    F: FnOnce(&Table) -> Result<Vec<T>, SkipReason>,
{
    let mut dataset = Dataset::default();
    if !path.is_file() {
        tracing::info!(path = %path.display(), "Source file not found, section disabled");
        return dataset;
    }

    let outcome = Table::read(path).map_err(SkipReason::from).and_then(|table| parse(&table));
    dataset.absorb(path, outcome);
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_keeps_rows_and_failures_apart() {
        let mut dataset: Dataset<u32> = Dataset::default();
        dataset.absorb(Path::new("a.xlsx"), Ok(vec![1, 2]));
        dataset.absorb(Path::new("b.xlsx"), Err(SkipReason::NoHeader));
        dataset.absorb(Path::new("c.xlsx"), Ok(vec![3]));

        assert_eq!(dataset.records, vec![1, 2, 3]);
        assert_eq!(dataset.skipped_count(), 1);
        assert_eq!(dataset.skipped[0].path, PathBuf::from("b.xlsx"));
    }

    #[test]
    fn missing_single_file_is_empty_without_skips() {
        let dataset: Dataset<u32> = load_single_file(Path::new("/nonexistent/dados_viagens.xlsx"), |_| Ok(vec![1]));
        assert!(dataset.is_empty());
        assert_eq!(dataset.skipped_count(), 0);
    }
}
