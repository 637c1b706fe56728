// First-match keyword classification of payee names.
// The same classifier, fed a different rule list, attributes payees to departments.
use std::collections::BTreeSet;

use crate::config::settings::CategoryRule;

/// Label returned when no rule matches.
pub const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl CategoryClassifier {
    /// Rules are tried in the given order. Keywords are compared lowercase.
    pub fn new(rules: &[CategoryRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| CategoryRule {
                label: rule.label.clone(),
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        CategoryClassifier { rules }
    }

    pub fn classify(&self, payee: &str) -> &str {
        let name = payee.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| name.contains(keyword.as_str())))
            .map(|rule| rule.label.as_str())
            .unwrap_or(OTHER_CATEGORY)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.label.as_str())
    }

    /// Order for listing observed labels: configured labels first, then any
    /// other observed label alphabetically, then `Other` last if it was seen.
    pub fn display_order<'a>(&self, observed: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let observed: BTreeSet<&str> = observed.into_iter().collect();
        let mut ordered: Vec<String> = self.labels().map(str::to_string).collect();
        let extra: Vec<String> = observed
            .iter()
            .filter(|label| **label != OTHER_CATEGORY && !ordered.iter().any(|o| o == *label))
            .map(|label| label.to_string())
            .collect();
        ordered.extend(extra);
        if observed.contains(OTHER_CATEGORY) {
            ordered.push(OTHER_CATEGORY.to_string());
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::EngineSettings;

    fn rule(label: &str, keywords: &[&str]) -> CategoryRule {
        CategoryRule { label: label.into(), keywords: keywords.iter().map(|k| k.to_string()).collect() }
    }

    #[test]
    fn default_categories_classify_fuel_station() {
        let classifier = CategoryClassifier::new(&EngineSettings::default().categories);
        assert_eq!(classifier.classify("POSTO SHELL LTDA"), "Postos de Combustíveis");
        assert_eq!(classifier.classify("Silva & Advogados Associados"), "Advocacia");
        assert_eq!(classifier.classify("PADARIA PÃO QUENTE"), OTHER_CATEGORY);
    }

    #[test]
    fn first_matching_rule_wins() {
        let classifier = CategoryClassifier::new(&[rule("Obras", &["construtora"]), rule("Postos", &["posto"])]);
        assert_eq!(classifier.classify("CONSTRUTORA E POSTO RIO"), "Obras");

        let reversed = CategoryClassifier::new(&[rule("Postos", &["posto"]), rule("Obras", &["construtora"])]);
        assert_eq!(reversed.classify("CONSTRUTORA E POSTO RIO"), "Postos");
    }

    #[test]
    fn keywords_are_case_insensitive_and_accent_aware() {
        let classifier = CategoryClassifier::new(&[rule("Construção", &["CONSTRUÇÃO"])]);
        assert_eq!(classifier.classify("Materiais de Construção Ltda"), "Construção");
    }

    #[test]
    fn empty_keywords_never_match() {
        let classifier = CategoryClassifier::new(&[rule("Tudo", &[""])]);
        assert_eq!(classifier.classify("QUALQUER"), OTHER_CATEGORY);
    }

    #[test]
    fn display_order_puts_other_last() {
        let classifier = CategoryClassifier::new(&[rule("B", &["b"]), rule("A", &["a"])]);
        let order = classifier.display_order(vec!["Other", "Z", "A", "C"]);
        assert_eq!(order, vec!["B", "A", "C", "Z", "Other"]);
    }
}
