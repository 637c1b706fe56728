// Surname-link screening between an official and a set of records.
//
// Sharing an uncommon surname is a reason for a manual look, nothing more.
// Callers must present results as possible links, never as established ones.
use regex::{Regex, RegexBuilder};
use shared::models::{Link, NamedRecord, PersonnelRecord};
use std::collections::HashSet;

use super::surnames::SurnameExtractor;
use crate::config::settings::SurnameSettings;
use crate::error::EngineError;

/// Outcome of one search. `searched_surnames` is empty when the target has no
/// surname left after filtering, in which case `matches` is empty too.
#[derive(Debug)]
pub struct LinkSearch<'a, T> {
    pub matches: Vec<Link<'a, T>>,
    pub searched_surnames: Vec<String>,
}

impl<'a, T> LinkSearch<'a, T> {
    fn none() -> Self {
        LinkSearch { matches: Vec::new(), searched_surnames: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LinkFinder {
    extractor: SurnameExtractor,
    common_surnames: HashSet<String>,
}

impl LinkFinder {
    pub fn new(extractor: SurnameExtractor, common_surnames: &[String]) -> Self {
        LinkFinder {
            extractor,
            common_surnames: common_surnames.iter().map(|s| s.to_uppercase()).collect(),
        }
    }

    pub fn from_settings(settings: &SurnameSettings) -> Self {
        Self::new(SurnameExtractor::from_settings(settings), &settings.common_surnames)
    }

    pub fn extractor(&self) -> &SurnameExtractor {
        &self.extractor
    }

    /// Surnames of `full_name` that are worth searching for, in name order, without repeats.
    pub fn searchable_surnames(&self, full_name: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.extractor
            .extract_surnames(full_name)
            .into_iter()
            .filter(|surname| !self.common_surnames.contains(surname))
            .filter(|surname| seen.insert(surname.clone()))
            .collect()
    }

    /// Case-insensitive alternation of the surnames, each bounded by word boundaries
    /// so "COSTA" does not fire inside "ACOSTADO".
    pub fn surname_pattern(surnames: &[String]) -> Result<Regex, EngineError> {
        let alternation = surnames.iter().map(|s| regex::escape(s)).collect::<Vec<_>>().join("|");
        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(true)
            .build()?;
        Ok(pattern)
    }

    /// Every candidate whose name contains one of the target's searchable surnames.
    ///
    /// For candidates from another record set (payees, travelers). A candidate
    /// carrying the target's own name is returned like any other match.
    pub fn find_links<'a, T, I>(
        &self,
        target: &'a PersonnelRecord,
        candidates: I,
    ) -> Result<LinkSearch<'a, T>, EngineError>
    where
        T: NamedRecord + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.search(target, candidates, false)
    }

    /// Like `find_links`, for candidates drawn from the target's own record set.
    /// Records carrying the target's name are the target itself and are left out.
    pub fn find_links_within<'a, T, I>(
        &self,
        target: &'a PersonnelRecord,
        candidates: I,
    ) -> Result<LinkSearch<'a, T>, EngineError>
    where
        T: NamedRecord + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.search(target, candidates, true)
    }

    fn search<'a, T, I>(
        &self,
        target: &'a PersonnelRecord,
        candidates: I,
        exclude_target: bool,
    ) -> Result<LinkSearch<'a, T>, EngineError>
    where
        T: NamedRecord + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let searched_surnames = self.searchable_surnames(&target.name);
        if searched_surnames.is_empty() {
            tracing::debug!(official = %target.name, "No searchable surname, skipping link search");
            return Ok(LinkSearch::none());
        }

        let pattern = Self::surname_pattern(&searched_surnames)?;
        let target_key = normalized_name(&target.name);

        // Candidate names get the same normalization as the target's surnames,
        // so "D'ÁVILA" and "DÁVILA" compare equal.
        let matches: Vec<Link<'a, T>> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let candidate_key = normalized_name(candidate.name_field());
                if exclude_target && candidate_key == target_key {
                    return None;
                }
                let found = pattern.find(&candidate_key)?;
                Some(Link {
                    source: target,
                    target: candidate,
                    shared_surname: found.as_str().to_uppercase(),
                })
            })
            .collect();

        tracing::debug!(
            official = %target.name,
            surnames = ?searched_surnames,
            matches = matches.len(),
            "Surname link search finished"
        );
        Ok(LinkSearch { matches, searched_surnames })
    }
}

fn normalized_name(name: &str) -> String {
    SurnameExtractor::tokenize(name).join(" ")
}
