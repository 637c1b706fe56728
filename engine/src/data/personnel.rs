// Monthly payroll aggregation.
// One file per month, named "<month>_<year>.<ext>" (e.g. "marco_2024.xlsx"),
// columns Nome;Cargo;Líquido.
use chrono::NaiveDate;
use shared::models::PersonnelRecord;
use shared::utils::brazilian_format;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::table::Table;
use super::Dataset;
use crate::config::settings::DataSettings;
use crate::error::{EngineError, SkipReason};

pub const NAME_COLUMN: &str = "Nome";
pub const ROLE_COLUMN: &str = "Cargo";
pub const NET_AMOUNT_COLUMN: &str = "Líquido";

/// Recognizes monthly file names against a month vocabulary.
#[derive(Debug, Clone)]
pub struct MonthFilePattern {
    extensions: Vec<String>,
    months: HashMap<String, u32>,
}

impl MonthFilePattern {
    pub fn new(extensions: &[String], months: impl IntoIterator<Item = (String, u32)>) -> Self {
        MonthFilePattern {
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
            months: months.into_iter().map(|(name, month)| (name.to_lowercase(), month)).collect(),
        }
    }

    pub fn from_settings(settings: &DataSettings) -> Self {
        Self::new(
            &settings.personnel_extensions,
            settings.month_names.iter().map(|m| (m.name.clone(), m.month)),
        )
    }

    // Files with other extensions are not candidates at all.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Month (1-12) and year encoded in a file name, case-insensitively.
    pub fn parse(&self, file_name: &str) -> Option<(u32, i32)> {
        let lower = file_name.to_lowercase();
        let (stem, extension) = lower.rsplit_once('.')?;
        if !self.extensions.iter().any(|e| e == extension) {
            return None;
        }

        let (month_name, year) = stem.split_once('_')?;
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let month = *self.months.get(month_name)?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some((month, year.parse().ok()?))
    }

    pub fn period_of(&self, file_name: &str) -> Option<NaiveDate> {
        let (month, year) = self.parse(file_name)?;
        brazilian_format::month_start(year, month)
    }
}

/// Reads every monthly file in `folder` and concatenates the surviving rows.
///
/// A missing folder gives an empty dataset. Files that cannot be read or lack a
/// required column are reported in `skipped` and do not stop the others. Only a
/// folder that exists but cannot be listed is an error.
pub fn aggregate(
    folder: &Path,
    pattern: &MonthFilePattern,
) -> Result<Dataset<PersonnelRecord>, EngineError> {
    let mut dataset = Dataset::default();
    if !folder.is_dir() {
        tracing::info!(folder = %folder.display(), "Personnel folder not found, section disabled");
        return Ok(dataset);
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(folder)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && pattern.accepts_extension(path))
        .collect();
    paths.sort();

    for path in &paths {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let outcome = match pattern.period_of(file_name) {
            Some(period) => load_month_file(path, period),
            None => Err(SkipReason::UnrecognizedFileName(file_name.to_string())),
        };
        dataset.absorb(path, outcome);
    }

    tracing::info!(
        folder = %folder.display(),
        files = paths.len(),
        records = dataset.len(),
        skipped = dataset.skipped_count(),
        "Aggregated monthly personnel files"
    );
    Ok(dataset)
}

/// Cleans one monthly file. Rows with a blank name or role, or an unparseable
/// net amount, are dropped; every survivor is stamped with `period`.
pub fn load_month_file(path: &Path, period: NaiveDate) -> Result<Vec<PersonnelRecord>, SkipReason> {
    let table = Table::read(path)?;
    parse_personnel_table(&table, period)
}

pub fn parse_personnel_table(
    table: &Table,
    period: NaiveDate,
) -> Result<Vec<PersonnelRecord>, SkipReason> {
    let columns = table.require_columns(&[NAME_COLUMN, ROLE_COLUMN, NET_AMOUNT_COLUMN])?;
    let (name_idx, role_idx, amount_idx) = (columns[0], columns[1], columns[2]);

    let records: Vec<PersonnelRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            Some(PersonnelRecord {
                name: Table::cell(row, name_idx).as_text()?,
                role: Table::cell(row, role_idx).as_text()?,
                net_amount: Table::cell(row, amount_idx).as_amount()?,
                period,
            })
        })
        .collect();

    let dropped = table.rows.len() - records.len();
    if dropped > 0 {
        tracing::debug!(dropped, period = %period, "Dropped payroll rows with missing fields");
    }
    Ok(records)
}
