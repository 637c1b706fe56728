// General expenditure loader.
// Columns: Data;Credor;Empenhado;Pago. Category and department are derived from the payee name.
use shared::models::ExpenditureRecord;
use std::path::Path;

use super::table::Table;
use super::{load_single_file, Dataset};
use crate::analysis::categories::CategoryClassifier;
use crate::config::settings::DataSettings;
use crate::error::SkipReason;

pub const DATE_COLUMN: &str = "Data";
pub const PAYEE_COLUMN: &str = "Credor";
pub const COMMITTED_COLUMN: &str = "Empenhado";
pub const PAID_COLUMN: &str = "Pago";

/// The two classifiers applied to every payee.
pub struct PayeeClassifiers<'c> {
    pub categories: &'c CategoryClassifier,
    pub departments: &'c CategoryClassifier,
}

pub fn load_expenditures(
    path: &Path,
    settings: &DataSettings,
    classifiers: &PayeeClassifiers,
) -> Dataset<ExpenditureRecord> {
    let dataset =
        load_single_file(path, |table| parse_expenditure_table(table, settings, classifiers));
    tracing::info!(path = %path.display(), records = dataset.len(), "Loaded general expenditures");
    dataset
}

/// Rows without payee, date or paid amount are dropped. A blank committed amount is kept as `None`.
pub fn parse_expenditure_table(
    table: &Table,
    settings: &DataSettings,
    classifiers: &PayeeClassifiers,
) -> Result<Vec<ExpenditureRecord>, SkipReason> {
    let columns =
        table.require_columns(&[DATE_COLUMN, PAYEE_COLUMN, COMMITTED_COLUMN, PAID_COLUMN])?;

    let records: Vec<ExpenditureRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let date = Table::cell(row, columns[0]).as_date(settings.day_first_dates)?;
            let payee = Table::cell(row, columns[1]).as_text()?;
            let committed = Table::cell(row, columns[2]).as_amount();
            let paid = Table::cell(row, columns[3]).as_amount()?;
            Some(ExpenditureRecord {
                category: classifiers.categories.classify(&payee).to_string(),
                department: classifiers.departments.classify(&payee).to_string(),
                date,
                payee,
                committed,
                paid,
            })
        })
        .collect();

    let dropped = table.rows.len() - records.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped expenditures without payee, date or paid amount");
    }
    Ok(records)
}
