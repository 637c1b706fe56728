// Locale helpers shared by the loaders and the presentation layer.

// Brazilian number and date handling for the municipal spreadsheets.
// Values arrive as "R$ 1.234,56" and "30/12/2024".
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use chrono::{Datelike, NaiveDate};
    use std::str::FromStr;

    const CURRENCY_SYMBOL: &str = "R$";

    // Parses decimals like "1.234,56" or "123,45" into f64.
    // Rejects anything that is not digits, separators and an optional leading minus,
    // so "NaN", "inf" or "1e5" never slip through f64::from_str.
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        let digits = normalized.strip_prefix('-').unwrap_or(&normalized);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(anyhow!("Failed to parse decimal '{}': not a number", s));
        }

        f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    // Strict currency parse: strips "R$" and any whitespace (including NBSP) first.
    pub fn parse_currency_strict(raw: &str) -> Result<f64> {
        let stripped: String = raw
            .replace(CURRENCY_SYMBOL, "")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        parse_decimal(&stripped).map_err(|e| anyhow!("Invalid currency value '{}': {}", raw, e))
    }

    /// Total currency parser: any input that is not a Brazilian-formatted amount yields `None`.
    pub fn parse_currency(raw: &str) -> Option<f64> {
        parse_currency_strict(raw).ok()
    }

    // Renders an amount the way the portal publishes it: "R$ 1.234,56".
    pub fn format_currency(value: f64) -> String {
        let negative = value < 0.0;
        let cents = (value.abs() * 100.0).round() as u64;
        let integer = (cents / 100).to_string();
        let fraction = cents % 100;

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("{}R$ {},{:02}", if negative { "-" } else { "" }, grouped, fraction)
    }

    // Parses a calendar date. `day_first` selects "dd/mm/yyyy" over "mm/dd/yyyy".
    // A trailing time ("30/12/2024 08:00:00") is ignored and ISO "yyyy-mm-dd" is accepted.
    pub fn parse_date_strict(raw: &str, day_first: bool) -> Result<NaiveDate> {
        let date_part = raw.split_whitespace().next().unwrap_or("");
        let format = if day_first { "%d/%m/%Y" } else { "%m/%d/%Y" };

        NaiveDate::parse_from_str(date_part, format)
            .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y-%m-%d"))
            .map_err(|e| anyhow!("Failed to parse date '{}': {}", raw, e))
    }

    pub fn parse_date(raw: &str, day_first: bool) -> Option<NaiveDate> {
        parse_date_strict(raw, day_first).ok()
    }

    // Inclusive trip length: leaving and returning on the same day counts as one day.
    pub fn trip_duration_days(departure: NaiveDate, arrival: NaiveDate) -> i64 {
        (arrival - departure).num_days() + 1
    }

    // First day of the month, used to stamp monthly payroll rows.
    pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, 1)
    }

    // "03/2024", the label used for payroll periods.
    pub fn format_period(date: NaiveDate) -> String {
        format!("{:02}/{}", date.month(), date.year())
    }

}
