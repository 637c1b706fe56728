// Daily cost summary over reimbursed trips
use serde::Serialize;
use serde_json::Value;
use shared::models::TravelRecord;

use super::Indicator;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelCostSummary {
    pub trips: usize,
    pub total_amount: f64,
    pub average_daily_cost: f64,
    pub cheapest: TravelRecord,
    pub priciest: TravelRecord,
}

pub fn travel_cost_summary(records: &[TravelRecord]) -> Option<TravelCostSummary> {
    let first = records.first()?;

    let mut cheapest = first;
    let mut priciest = first;
    for trip in &records[1..] {
        if trip.daily_cost < cheapest.daily_cost {
            cheapest = trip;
        }
        if trip.daily_cost > priciest.daily_cost {
            priciest = trip;
        }
    }

    let daily_sum: f64 = records.iter().map(|t| t.daily_cost).sum();
    Some(TravelCostSummary {
        trips: records.len(),
        total_amount: records.iter().map(|t| t.amount).sum(),
        average_daily_cost: daily_sum / records.len() as f64,
        cheapest: cheapest.clone(),
        priciest: priciest.clone(),
    })
}

pub struct TravelCost;

impl Indicator<TravelRecord> for TravelCost {
    type Output = Option<TravelCostSummary>;

    fn name(&self) -> &str {
        "TravelCost"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({})
    }

    fn calculate(&self, records: &[TravelRecord]) -> Option<TravelCostSummary> {
        travel_cost_summary(records)
    }
}
