use serde::{Deserialize, Serialize};

use super::breakeven::BreakevenResult;
use super::engine::PeriodPoint;
use crate::error::MarketStudyError;
use crate::types::{Money, Scenario};
use crate::MarketStudyResult;

/// What the accelerator changes, in money and in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub baseline_breakeven: Option<u32>,
    pub assisted_breakeven: Option<u32>,
    /// Assisted minus baseline cumulative profit/loss at the last quarter.
    /// Negative when the programme costs more than it returns.
    pub financial_benefit: Money,
    /// Baseline break-even quarter minus assisted break-even quarter.
    /// `None` when either scenario never breaks even; `Some(0)` when both
    /// break even in the same quarter.
    pub time_gain_quarters: Option<i32>,
}

/// Compare the two scenarios over a projected series.
pub fn summarize(
    periods: &[PeriodPoint],
    baseline: &BreakevenResult,
    assisted: &BreakevenResult,
) -> MarketStudyResult<ComparisonSummary> {
    if baseline.scenario != Scenario::Baseline {
        return Err(MarketStudyError::InvalidInput {
            field: "baseline".into(),
            reason: format!("expected a baseline break-even, got {}", baseline.scenario),
        });
    }
    if assisted.scenario != Scenario::Assisted {
        return Err(MarketStudyError::InvalidInput {
            field: "assisted".into(),
            reason: format!("expected an assisted break-even, got {}", assisted.scenario),
        });
    }

    let last = periods.last().ok_or_else(|| {
        MarketStudyError::InsufficientData("Comparison needs at least one projected period".into())
    })?;

    let financial_benefit =
        last.assisted.cumulative_profit_loss - last.baseline.cumulative_profit_loss;

    let time_gain_quarters = match (baseline.period, assisted.period) {
        (Some(b), Some(a)) => Some(b as i32 - a as i32),
        _ => None,
    };

    Ok(ComparisonSummary {
        baseline_breakeven: baseline.period,
        assisted_breakeven: assisted.period,
        financial_benefit,
        time_gain_quarters,
    })
}
