use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::breakeven::{find_breakeven, BreakevenResult};
use super::engine::{project, Projection};
use super::params::BusinessParameters;
use super::summary::{summarize, ComparisonSummary};
use crate::error::MarketStudyError;
use crate::types::{with_metadata, ComputationOutput, Money, Scenario};
use crate::MarketStudyResult;

/// Quarter at which the 12-month MRR target is checked.
const TWELVE_MONTH_QUARTER: usize = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline figures for one scenario, as shown beside the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub scenario: Scenario,
    pub breakeven_period: Option<u32>,
    pub cumulative_revenue: Money,
    pub cumulative_costs: Money,
    pub cumulative_profit_loss: Money,
    /// Active clients at the end of the horizon
    pub ending_clients: Decimal,
    /// Monthly recurring revenue at the end of the horizon
    pub ending_mrr: Money,
    /// MRR after four quarters
    pub mrr_at_12_months: Money,
    /// `mrr_at_12_months` minus the 12-month MRR target
    pub mrr_target_gap: Money,
    /// Deepest cumulative loss over the horizon (zero if never negative)
    pub peak_funding_need: Money,
    /// Whether available capital covers `peak_funding_need`
    pub capital_covers_funding_need: bool,
    /// Effective sales cycle in days
    pub sales_cycle_days: Decimal,
}

/// Everything a report page needs from one parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionAnalysis {
    pub projection: Projection,
    pub baseline_breakeven: BreakevenResult,
    pub assisted_breakeven: BreakevenResult,
    pub summary: ComparisonSummary,
    pub baseline: ScenarioSnapshot,
    pub assisted: ScenarioSnapshot,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project, locate both break-even quarters and compare.
pub fn analyze_projection(
    params: &BusinessParameters,
) -> MarketStudyResult<ComputationOutput<ProjectionAnalysis>> {
    let start = Instant::now();

    let projected = project(params)?;
    let mut warnings = projected.warnings;
    let projection = projected.result;

    let baseline_breakeven = find_breakeven(&projection.periods, Scenario::Baseline);
    let assisted_breakeven = find_breakeven(&projection.periods, Scenario::Assisted);
    let summary = summarize(&projection.periods, &baseline_breakeven, &assisted_breakeven)?;

    if summary.financial_benefit < Decimal::ZERO {
        warnings.push(format!(
            "Programme lowers cumulative profit by {} over the horizon",
            summary.financial_benefit.abs()
        ));
    }

    let baseline = snapshot(&projection, &baseline_breakeven)?;
    let assisted = snapshot(&projection, &assisted_breakeven)?;

    for snap in [&baseline, &assisted] {
        if !snap.capital_covers_funding_need {
            warnings.push(format!(
                "Available capital does not cover the {} scenario's peak funding need of {}",
                snap.scenario, snap.peak_funding_need
            ));
        }
    }

    tracing::debug!(
        baseline = ?baseline_breakeven.period,
        assisted = ?assisted_breakeven.period,
        benefit = %summary.financial_benefit,
        "projection analysed"
    );

    let assumptions = serde_json::json!({
        "uses_default_assumptions": projection.uses_default_assumptions,
        "breakeven_rule": "cumulative revenue >= cumulative costs",
        "time_gain": "absent unless both scenarios break even",
    });

    let analysis = ProjectionAnalysis {
        projection,
        baseline_breakeven,
        assisted_breakeven,
        summary,
        baseline,
        assisted,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Baseline vs assisted break-even comparison over eight quarters",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    ))
}

/// Headline figures for the scenario named by `breakeven`.
pub fn snapshot(
    projection: &Projection,
    breakeven: &BreakevenResult,
) -> MarketStudyResult<ScenarioSnapshot> {
    let scenario = breakeven.scenario;
    let params = &projection.parameters;

    let last = projection
        .last_period()
        .map(|p| p.figures(scenario))
        .ok_or_else(|| MarketStudyError::InsufficientData("Projection has no periods".into()))?;

    let mrr = |clients: Decimal| (clients * params.average_price).round_dp(2);

    let clients_at_12_months = projection
        .periods
        .get(TWELVE_MONTH_QUARTER - 1)
        .map(|p| p.figures(scenario).clients)
        .unwrap_or(last.clients);
    let mrr_at_12_months = mrr(clients_at_12_months);

    let deepest = projection
        .periods
        .iter()
        .map(|p| p.figures(scenario).cumulative_profit_loss)
        .min()
        .unwrap_or(Decimal::ZERO);
    let peak_funding_need = (-deepest).max(Decimal::ZERO);

    let sales_cycle_days = match scenario {
        Scenario::Baseline => params.sales_cycle_days,
        Scenario::Assisted => projection
            .adjustment
            .assisted_sales_cycle(params.sales_cycle_days),
    };

    Ok(ScenarioSnapshot {
        scenario,
        breakeven_period: breakeven.period,
        cumulative_revenue: last.cumulative_revenue,
        cumulative_costs: last.cumulative_costs,
        cumulative_profit_loss: last.cumulative_profit_loss,
        ending_clients: last.clients,
        ending_mrr: mrr(last.clients),
        mrr_at_12_months,
        mrr_target_gap: mrr_at_12_months - params.mrr_target_12m,
        peak_funding_need,
        capital_covers_funding_need: params.capital >= peak_funding_need,
        sales_cycle_days,
    })
}
