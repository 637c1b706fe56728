// Highest and lowest net pay among the records of a role
use serde::Serialize;
use serde_json::Value;
use shared::models::PersonnelRecord;

use super::Indicator;
use crate::analysis::roles::RoleMatcher;
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryExtremes {
    pub highest: PersonnelRecord,
    pub lowest: PersonnelRecord,
}

/// Ties keep the record loaded first.
pub fn salary_extremes(
    records: &[PersonnelRecord],
    matcher: &RoleMatcher,
) -> Option<SalaryExtremes> {
    let selected = matcher.select(records);
    let first = *selected.first()?;

    let (highest, lowest) = selected.iter().skip(1).fold((first, first), |(high, low), record| {
        match (record.net_amount > high.net_amount, record.net_amount < low.net_amount) {
            (true, _) => (*record, low),
            (_, true) => (high, *record),
            _ => (high, low),
        }
    });

    Some(SalaryExtremes { highest: highest.clone(), lowest: lowest.clone() })
}

/// Salary extremes for one role pattern, e.g. secretaries or professors.
pub struct SalaryRange {
    name: String,
    pattern: String,
    matcher: RoleMatcher,
}

impl SalaryRange {
    pub fn new(role: &str, pattern: &str) -> Result<Self, EngineError> {
        Ok(Self {
            name: format!("SalaryRange({})", role),
            pattern: pattern.to_string(),
            matcher: RoleMatcher::new(pattern)?,
        })
    }

    pub fn matcher(&self) -> &RoleMatcher {
        &self.matcher
    }
}

impl Indicator<PersonnelRecord> for SalaryRange {
    type Output = Option<SalaryExtremes>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "role_pattern": self.pattern })
    }

    fn calculate(&self, records: &[PersonnelRecord]) -> Option<SalaryExtremes> {
        salary_extremes(records, &self.matcher)
    }
}
