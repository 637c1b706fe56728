// Tabular file reader: one header row followed by data rows.
// Spreadsheets (xlsx, xls, ods) go through calamine, csv files through the csv crate.
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use csv::ReaderBuilder;
use shared::utils::brazilian_format;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{EngineError, SkipReason};

/// A single cell, typed as far as the source format allows.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Trimmed text; `None` for blank cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Date(d) => Some(d.format("%d/%m/%Y").to_string()),
        }
    }

    /// Monetary amount. Numeric cells are taken as-is, text goes through the currency parser.
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => brazilian_format::parse_currency(s),
            _ => None,
        }
    }

    pub fn as_date(&self, day_first: bool) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Text(s) => brazilian_format::parse_date(s, day_first),
            // Date cells saved without a date format arrive as bare serials.
            CellValue::Number(n) => excel_serial_to_date(*n),
            CellValue::Empty => None,
        }
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Header labels with surrounding whitespace removed.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Reads a file, choosing the backend from its extension.
    pub fn read(path: &Path) -> Result<Table, EngineError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if extension == "csv" {
            Self::read_csv(path)
        } else {
            Self::read_spreadsheet(path)
        }
    }

    // Only the first sheet is read; the portal exports one sheet per file.
    pub fn read_spreadsheet(path: &Path) -> Result<Table, EngineError> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names().to_vec();
        let first_sheet = sheet_names.first().ok_or_else(|| {
            EngineError::ProcessingError(format!("'{}' contains no sheets", path.display()))
        })?;
        let range = workbook.worksheet_range(first_sheet)?;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| header_label(&convert_cell(cell)))
                .collect(),
            None => Vec::new(),
        };
        let rows = rows
            .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|c| *c != CellValue::Empty))
            .collect();

        Ok(Table { headers, rows })
    }

    // Portal csv exports use ';', hand-made ones often ','. Pick whichever the header uses more.
    pub fn read_csv(path: &Path) -> Result<Table, EngineError> {
        let mut first_line = String::new();
        BufReader::new(File::open(path)?).read_line(&mut first_line)?;
        let delimiter = if first_line.matches(';').count() >= first_line.matches(',').count() {
            b';'
        } else {
            b','
        };

        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(File::open(path)?));

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect();
            if row.iter().any(|c| *c != CellValue::Empty) {
                rows.push(row);
            }
        }

        Ok(Table { headers, rows })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Positions of the required columns, in the order asked for.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, SkipReason> {
        if self.headers.is_empty() {
            return Err(SkipReason::NoHeader);
        }
        let missing: Vec<String> = names
            .iter()
            .filter(|name| self.column(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SkipReason::MissingColumns(missing));
        }
        Ok(names.iter().filter_map(|name| self.column(name)).collect())
    }

    // Short rows (flexible csv, ragged sheets) read as empty cells.
    pub fn cell(row: &[CellValue], column: usize) -> &CellValue {
        row.get(column).unwrap_or(&EMPTY_CELL)
    }
}

fn header_label(cell: &CellValue) -> String {
    cell.as_text().unwrap_or_default()
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(_) => CellValue::Empty,
        Data::DateTime(dt) => {
            excel_serial_to_date(dt.as_f64()).map_or(CellValue::Empty, CellValue::Date)
        }
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(_) => CellValue::Empty,
    }
}

// Serial dates count days from 1899-12-30 in the 1900 date system.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0; // 9999-12-31

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(serial.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn csv_with_semicolons_and_padded_headers() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "folha.csv", " Nome ;Cargo; Líquido\nANA;PROFESSOR;R$ 1.234,56\n;;\nBETO;MOTORISTA;900,00");
        let table = Table::read(&path).unwrap();

        assert_eq!(table.headers, vec!["Nome", "Cargo", "Líquido"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2].as_amount(), Some(1234.56));
    }

    #[test]
    fn csv_with_commas() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "gastos.csv", "Data,Credor,Empenhado,Pago\n05/03/2024,POSTO X,10,10");
        let table = Table::read(&path).unwrap();
        assert_eq!(table.headers.len(), 4);
        assert_eq!(table.rows[0][0].as_date(true), NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn xlsx_cells_keep_their_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("abril_2024.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Nome ").unwrap();
        sheet.write_string(0, 1, "Líquido").unwrap();
        sheet.write_string(1, 0, "ANA").unwrap();
        sheet.write_number(1, 1, 1500.25).unwrap();
        sheet.write_string(2, 0, "BETO").unwrap();
        sheet.write_string(2, 1, "R$ 2.000,00").unwrap();
        workbook.save(&path).unwrap();

        let table = Table::read(&path).unwrap();
        assert_eq!(table.headers, vec!["Nome", "Líquido"]);
        assert_eq!(table.rows[0][1], CellValue::Number(1500.25));
        assert_eq!(table.rows[0][1].as_amount(), Some(1500.25));
        assert_eq!(table.rows[1][1].as_amount(), Some(2000.0));
    }

    #[test]
    fn require_columns_reports_every_missing_column() {
        let table = Table { headers: vec!["Nome".into()], rows: Vec::new() };
        match table.require_columns(&["Nome", "Cargo", "Líquido"]) {
            Err(SkipReason::MissingColumns(missing)) => assert_eq!(missing, vec!["Cargo", "Líquido"]),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(Table::default().require_columns(&["Nome"]), Err(SkipReason::NoHeader)));
    }

    #[test]
    fn short_rows_read_as_empty() {
        let table = Table { headers: vec!["A".into(), "B".into()], rows: vec![vec![CellValue::Text("x".into())]] };
        assert_eq!(Table::cell(&table.rows[0], 1), &CellValue::Empty);
    }

    #[test]
    fn corrupt_spreadsheet_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "quebrado.xlsx", "this is not a zip archive");
        assert!(Table::read(&path).is_err());
    }

    #[test]
    fn serial_dates() {
        assert_eq!(excel_serial_to_date(45292.0), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(CellValue::Number(45292.0).as_date(true), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn cell_text_is_trimmed() {
        assert_eq!(CellValue::Text("  ANA  ".into()).as_text(), Some("ANA".to_string()));
        assert_eq!(CellValue::Text("   ".into()).as_text(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_amount(), None);
    }
}
