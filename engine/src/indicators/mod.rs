// Dashboard indicators computed over cleaned datasets
pub mod category;
pub mod salary;
pub mod travel;

pub use category::{category_totals, CategoryTotal, CategoryTotals};
pub use salary::{salary_extremes, SalaryExtremes, SalaryRange};
pub use travel::{travel_cost_summary, TravelCost, TravelCostSummary};

use serde_json::Value;

// Common trait for all indicators
pub trait Indicator<T> {
    type Output;

    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, records: &[T]) -> Self::Output;
}
