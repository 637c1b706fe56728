// Paid and committed totals per expenditure category
use serde::Serialize;
use serde_json::Value;
use shared::models::ExpenditureRecord;
use std::collections::HashMap;

use super::Indicator;
use crate::analysis::categories::CategoryClassifier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub paid: f64,
    /// Sum of the rows that carry a committed amount.
    pub committed: f64,
    pub count: usize,
}

/// One entry per category present in `records`, in the classifier's display order.
pub fn category_totals(
    records: &[ExpenditureRecord],
    classifier: &CategoryClassifier,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, CategoryTotal> = HashMap::new();
    for record in records {
        let entry = totals.entry(record.category.as_str()).or_insert_with(|| CategoryTotal {
            label: record.category.clone(),
            paid: 0.0,
            committed: 0.0,
            count: 0,
        });
        entry.paid += record.paid;
        entry.committed += record.committed.unwrap_or(0.0);
        entry.count += 1;
    }

    classifier
        .display_order(totals.keys().copied().collect::<Vec<_>>())
        .iter()
        .filter_map(|label| totals.remove(label.as_str()))
        .collect()
}

pub struct CategoryTotals<'c> {
    classifier: &'c CategoryClassifier,
}

impl<'c> CategoryTotals<'c> {
    pub fn new(classifier: &'c CategoryClassifier) -> Self {
        Self { classifier }
    }
}

impl Indicator<ExpenditureRecord> for CategoryTotals<'_> {
    type Output = Vec<CategoryTotal>;

    fn name(&self) -> &str {
        "CategoryTotals"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "labels": self.classifier.labels().collect::<Vec<_>>() })
    }

    fn calculate(&self, records: &[ExpenditureRecord]) -> Vec<CategoryTotal> {
        category_totals(records, self.classifier)
    }
}
