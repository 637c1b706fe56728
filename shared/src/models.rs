use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::brazilian_format::trip_duration_days;

/// Any record with a person or company name the link and search routines can look at.
pub trait NamedRecord {
    fn name_field(&self) -> &str;
}

/// One payroll line from a monthly personnel file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelRecord {
    pub name: String,
    pub role: String,
    pub net_amount: f64,
    /// First day of the month the file refers to.
    pub period: NaiveDate,
}

impl PersonnelRecord {
    pub fn month(&self) -> u32 {
        self.period.month()
    }

    pub fn year(&self) -> i32 {
        self.period.year()
    }
}

impl NamedRecord for PersonnelRecord {
    fn name_field(&self) -> &str {
        &self.name
    }
}

/// A reimbursed trip. Only built for trips whose duration is known and positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRecord {
    pub traveler: String,
    pub departure: NaiveDate,
    pub arrival: NaiveDate,
    pub destination: String,
    pub amount: f64,
    pub duration_days: i64,
    pub daily_cost: f64,
}

impl TravelRecord {
    // Returns None when the trip does not last at least one day.
    pub fn new(
        traveler: String,
        departure: NaiveDate,
        arrival: NaiveDate,
        destination: String,
        amount: f64,
    ) -> Option<Self> {
        let duration_days = trip_duration_days(departure, arrival);
        if duration_days <= 0 {
            return None;
        }
        Some(TravelRecord {
            traveler,
            departure,
            arrival,
            destination,
            amount,
            duration_days,
            daily_cost: amount / duration_days as f64,
        })
    }

    /// Short label for charts: first name plus last-name initial ("MARIA S.").
    pub fn traveler_label(&self) -> String {
        let parts: Vec<&str> = self.traveler.split_whitespace().collect();
        match (parts.first(), parts.last()) {
            (Some(first), Some(last)) if parts.len() > 1 => {
                let initial: String = last.chars().take(1).collect();
                format!("{} {}.", first, initial)
            }
            _ => self.traveler.clone(),
        }
    }
}

impl NamedRecord for TravelRecord {
    fn name_field(&self) -> &str {
        &self.traveler
    }
}

/// A general expenditure (empenho) with its derived category and department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureRecord {
    pub date: NaiveDate,
    pub payee: String,
    pub committed: Option<f64>,
    pub paid: f64,
    pub category: String,
    pub department: String,
}

impl NamedRecord for ExpenditureRecord {
    fn name_field(&self) -> &str {
        &self.payee
    }
}

/// A possible relationship between a public official and another record.
/// Heuristic only: sharing a surname is a reason to look closer, not evidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link<'a, T> {
    pub source: &'a PersonnelRecord,
    pub target: &'a T,
    pub shared_surname: String,
}
