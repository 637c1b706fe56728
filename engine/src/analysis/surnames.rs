// Name tokenization for the surname-link heuristic.
use std::collections::HashSet;

use crate::config::settings::SurnameSettings;

#[derive(Debug, Clone)]
pub struct SurnameExtractor {
    corporate_terms: HashSet<String>,
    prepositions: HashSet<String>,
}

impl SurnameExtractor {
    pub fn new(corporate_terms: &[String], prepositions: &[String]) -> Self {
        SurnameExtractor {
            corporate_terms: corporate_terms.iter().map(|t| t.to_uppercase()).collect(),
            prepositions: prepositions.iter().map(|p| p.to_uppercase()).collect(),
        }
    }

    pub fn from_settings(settings: &SurnameSettings) -> Self {
        Self::new(&settings.corporate_terms, &settings.prepositions)
    }

    /// Uppercases, strips punctuation and splits on whitespace.
    pub fn tokenize(full_name: &str) -> Vec<String> {
        full_name
            .to_uppercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect::<String>()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Candidate surnames in name order. The first token is the given name and is
    /// never a candidate; prepositions, corporate suffixes and pure numbers are dropped.
    pub fn extract_surnames(&self, full_name: &str) -> Vec<String> {
        Self::tokenize(full_name)
            .into_iter()
            .skip(1)
            .filter(|token| !self.is_noise(token))
            .collect()
    }

    pub fn is_preposition(&self, token: &str) -> bool {
        self.prepositions.contains(&token.to_uppercase())
    }

    fn is_noise(&self, token: &str) -> bool {
        self.prepositions.contains(token)
            || self.corporate_terms.contains(token)
            || token.chars().all(|c| c.is_ascii_digit())
    }

    /// Display label with middle names reduced to initials:
    /// "JOÃO CARLOS DA SILVA SANTOS" becomes "JOÃO C. DA S. SANTOS".
    pub fn abbreviate(&self, full_name: &str) -> String {
        let tokens: Vec<&str> = full_name.split_whitespace().collect();
        if tokens.len() <= 2 {
            return tokens.join(" ");
        }

        let last = tokens.len() - 1;
        tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                if idx == 0 || idx == last || self.is_preposition(token) {
                    token.to_string()
                } else {
                    let initial: String = token.chars().take(1).collect();
                    format!("{}.", initial)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
