use serde::{Deserialize, Serialize};

use super::engine::PeriodPoint;
use crate::types::Scenario;

/// First quarter in which a scenario's cumulative revenue covers its
/// cumulative costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakevenResult {
    pub scenario: Scenario,
    /// 1-based quarter, `None` when not reached within the horizon
    pub period: Option<u32>,
}

impl BreakevenResult {
    pub fn not_reached(scenario: Scenario) -> Self {
        Self {
            scenario,
            period: None,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.period.is_some()
    }
}

/// Scan forward for the first quarter where cumulative revenue ≥ cumulative
/// cost. Equality counts as break-even.
pub fn find_breakeven(periods: &[PeriodPoint], scenario: Scenario) -> BreakevenResult {
    let period = periods
        .iter()
        .find(|p| {
            let f = p.figures(scenario);
            f.cumulative_revenue >= f.cumulative_costs
        })
        .map(|p| p.period);

    BreakevenResult { scenario, period }
}
