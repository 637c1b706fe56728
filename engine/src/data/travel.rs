// Official travel (diárias) loader.
// Columns: Favorecido;Saída;Chegada;Destino;Valor with dates as dd/mm/yyyy.
use shared::models::TravelRecord;
use std::path::Path;

use super::table::Table;
use super::{load_single_file, Dataset};
use crate::config::settings::DataSettings;
use crate::error::SkipReason;

pub const TRAVELER_COLUMN: &str = "Favorecido";
pub const DEPARTURE_COLUMN: &str = "Saída";
pub const ARRIVAL_COLUMN: &str = "Chegada";
pub const DESTINATION_COLUMN: &str = "Destino";
pub const AMOUNT_COLUMN: &str = "Valor";

pub fn load_travel(path: &Path, settings: &DataSettings) -> Dataset<TravelRecord> {
    let dataset = load_single_file(path, |table| parse_travel_table(table, settings));
    tracing::info!(path = %path.display(), trips = dataset.len(), "Loaded travel data");
    dataset
}

/// Keeps trips with both dates, a parseable amount and a duration in `1..=max_trip_days`.
pub fn parse_travel_table(
    table: &Table,
    settings: &DataSettings,
) -> Result<Vec<TravelRecord>, SkipReason> {
    let columns = table.require_columns(&[
        TRAVELER_COLUMN,
        DEPARTURE_COLUMN,
        ARRIVAL_COLUMN,
        DESTINATION_COLUMN,
        AMOUNT_COLUMN,
    ])?;
    let day_first = settings.day_first_dates;

    let trips: Vec<TravelRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let traveler = Table::cell(row, columns[0]).as_text()?;
            let departure = Table::cell(row, columns[1]).as_date(day_first)?;
            let arrival = Table::cell(row, columns[2]).as_date(day_first)?;
            let destination = Table::cell(row, columns[3]).as_text().unwrap_or_default();
            let amount = Table::cell(row, columns[4]).as_amount()?;
            TravelRecord::new(traveler, departure, arrival, destination, amount)
        })
        .filter(|trip| trip.duration_days <= settings.max_trip_days)
        .collect();

    let dropped = table.rows.len() - trips.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped trips with invalid dates, duration or amount");
    }
    Ok(trips)
}
