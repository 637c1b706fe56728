// Role selection by case-insensitive pattern, e.g. "SECRETÁRIO|SECRETÁRIA|SEC\.".
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use shared::models::PersonnelRecord;
use std::collections::HashSet;

use super::surnames::SurnameExtractor;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct RoleMatcher {
    pattern: Regex,
}

impl RoleMatcher {
    pub fn new(pattern: &str) -> Result<Self, EngineError> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(RoleMatcher { pattern })
    }

    pub fn matches(&self, role: &str) -> bool {
        self.pattern.is_match(role)
    }

    pub fn select<'a>(&self, records: &'a [PersonnelRecord]) -> Vec<&'a PersonnelRecord> {
        records.iter().filter(|r| self.matches(&r.role)).collect()
    }
}

/// A distinct person/role pair, as offered for selection in the link analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Official<'a> {
    pub record: &'a PersonnelRecord,
    pub label: String,
}

/// One entry per distinct (name, role) among matching records, in first-seen order.
pub fn officials<'a>(
    records: &'a [PersonnelRecord],
    matcher: &RoleMatcher,
    extractor: &SurnameExtractor,
) -> Vec<Official<'a>> {
    let mut seen = HashSet::new();
    matcher
        .select(records)
        .into_iter()
        .filter(|r| seen.insert((r.name.as_str(), r.role.as_str())))
        .map(|record| Official { record, label: extractor.abbreviate(&record.name) })
        .collect()
}

/// Staff a selected official is screened against: one record per distinct
/// (name, role) pair whose role does not match, in first-seen order.
/// Monthly payroll lists everyone once per month; each pair is kept once.
pub fn staff_pool<'a>(
    records: &'a [PersonnelRecord],
    matcher: &RoleMatcher,
) -> Vec<&'a PersonnelRecord> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !matcher.matches(&r.role))
        .filter(|r| {
            let name = SurnameExtractor::tokenize(&r.name).join(" ");
            seen.insert((name, r.role.trim().to_uppercase()))
        })
        .collect()
}
