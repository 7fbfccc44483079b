use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::adjustment::ScenarioAdjustment;
use super::params::{resolve_parameters, validate_parameters, BusinessParameters};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Scenario};
use crate::MarketStudyResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Two years of quarters.
pub const HORIZON_QUARTERS: u32 = 8;

pub const MONTHS_PER_PERIOD: Decimal = dec!(3);

/// Acquisition ramps linearly to the full run-rate over this many quarters.
const RAMP_QUARTERS: Decimal = dec!(4);

const CLIENT_SCALE: u32 = 6;
const MONEY_SCALE: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One scenario's figures for one quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFigures {
    /// Clients signed this quarter (whole clients)
    pub new_clients: Decimal,
    /// Active clients at quarter end, after churn (fractional)
    pub clients: Decimal,
    pub revenue: Money,
    pub costs: Money,
    pub profit_loss: Money,
    pub cumulative_revenue: Money,
    pub cumulative_costs: Money,
    pub cumulative_profit_loss: Money,
}

/// One quarter of the projection, both scenarios side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPoint {
    /// 1-based quarter index
    pub period: u32,
    /// "Q1" .. "Q8"
    pub label: String,
    pub baseline: PeriodFigures,
    pub assisted: PeriodFigures,
}

impl PeriodPoint {
    pub fn figures(&self, scenario: Scenario) -> &PeriodFigures {
        match scenario {
            Scenario::Baseline => &self.baseline,
            Scenario::Assisted => &self.assisted,
        }
    }
}

/// Full projection for one parameter set. Immutable once built; recompute
/// from scratch when parameters change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub periods: Vec<PeriodPoint>,
    /// Parameters the figures were computed from, after fallback
    pub parameters: BusinessParameters,
    pub adjustment: ScenarioAdjustment,
    /// Set when any figure above comes from default assumptions
    pub uses_default_assumptions: bool,
    pub substituted_fields: Vec<String>,
}

impl Projection {
    pub fn last_period(&self) -> Option<&PeriodPoint> {
        self.periods.last()
    }
}

/// Running totals for one scenario while walking the horizon.
#[derive(Debug, Default)]
struct ScenarioLedger {
    clients: Decimal,
    cumulative_revenue: Money,
    cumulative_costs: Money,
    cumulative_profit_loss: Money,
}

impl ScenarioLedger {
    fn close_quarter(
        &mut self,
        new_clients: Decimal,
        retention: Decimal,
        average_price: Money,
        costs: Money,
    ) -> PeriodFigures {
        self.clients = ((self.clients + new_clients) * retention).round_dp(CLIENT_SCALE);
        let revenue = (self.clients * average_price * MONTHS_PER_PERIOD).round_dp(MONEY_SCALE);
        let costs = costs.round_dp(MONEY_SCALE);
        let profit_loss = revenue - costs;

        self.cumulative_revenue += revenue;
        self.cumulative_costs += costs;
        self.cumulative_profit_loss += profit_loss;

        PeriodFigures {
            new_clients,
            clients: self.clients,
            revenue,
            costs,
            profit_loss,
            cumulative_revenue: self.cumulative_revenue,
            cumulative_costs: self.cumulative_costs,
            cumulative_profit_loss: self.cumulative_profit_loss,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project eight quarters under the standard accelerator adjustment.
pub fn project(params: &BusinessParameters) -> MarketStudyResult<ComputationOutput<Projection>> {
    project_with_adjustment(params, &ScenarioAdjustment::default())
}

/// Project eight quarters under a caller-supplied adjustment.
pub fn project_with_adjustment(
    params: &BusinessParameters,
    adjustment: &ScenarioAdjustment,
) -> MarketStudyResult<ComputationOutput<Projection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_parameters(params)?;
    adjustment.validate()?;

    let resolved = resolve_parameters(params);
    if resolved.uses_default_assumptions {
        tracing::warn!(
            fields = ?resolved.substituted_fields,
            "projection uses default assumptions"
        );
        warnings.push(format!(
            "Default assumptions substituted for: {}",
            resolved.substituted_fields.join(", ")
        ));
    }

    let effective = &resolved.parameters;
    if quarterly_retention(effective.churn_rate).is_zero() {
        warnings.push(format!(
            "Monthly churn of {}% loses the whole client base every quarter",
            effective.churn_rate
        ));
    }

    let periods = project_periods(effective, adjustment);
    tracing::debug!(
        periods = periods.len(),
        defaults = resolved.uses_default_assumptions,
        "projection computed"
    );

    let assumptions = serde_json::json!({
        "horizon_quarters": HORIZON_QUARTERS,
        "months_per_period": MONTHS_PER_PERIOD.to_string(),
        "uses_default_assumptions": resolved.uses_default_assumptions,
        "average_price": effective.average_price.to_string(),
        "monthly_budget": effective.monthly_budget.to_string(),
        "cac": effective.cac.to_string(),
        "churn_rate": effective.churn_rate.to_string(),
        "client_target_12m": effective.client_target_12m.to_string(),
    });

    let projection = Projection {
        periods,
        parameters: resolved.parameters,
        adjustment: adjustment.clone(),
        uses_default_assumptions: resolved.uses_default_assumptions,
        substituted_fields: resolved.substituted_fields,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Quarterly SaaS projection: ramped acquisition, compounded churn, baseline vs assisted",
        &assumptions,
        warnings,
        elapsed,
        projection,
    ))
}

/// Walk the horizon for already-resolved parameters.
///
/// Client counts are carried fractionally (6 dp) between quarters; only new
/// acquisitions are rounded up to whole clients. Revenue and costs are
/// rounded to cents so cumulative series are exact running sums.
pub fn project_periods(
    params: &BusinessParameters,
    adjustment: &ScenarioAdjustment,
) -> Vec<PeriodPoint> {
    let baseline_retention = quarterly_retention(params.churn_rate);
    let assisted_retention = quarterly_retention(adjustment.assisted_churn(params.churn_rate));
    let assisted_cac = adjustment.assisted_cac(params.cac);
    let operating_cost = params.monthly_budget * MONTHS_PER_PERIOD;
    let program_fee = adjustment.program_monthly_fee(params.monthly_budget) * MONTHS_PER_PERIOD;

    let mut baseline = ScenarioLedger::default();
    let mut assisted = ScenarioLedger::default();
    let mut periods = Vec::with_capacity(HORIZON_QUARTERS as usize);

    for period in 1..=HORIZON_QUARTERS {
        let baseline_new = baseline_new_clients(params.client_target_12m, period);
        let assisted_new = adjustment.assisted_new_clients(baseline_new);

        let baseline_figures = baseline.close_quarter(
            baseline_new,
            baseline_retention,
            params.average_price,
            baseline_new * params.cac + operating_cost,
        );
        let assisted_figures = assisted.close_quarter(
            assisted_new,
            assisted_retention,
            params.average_price,
            assisted_new * assisted_cac + operating_cost + program_fee,
        );

        periods.push(PeriodPoint {
            period,
            label: format!("Q{period}"),
            baseline: baseline_figures,
            assisted: assisted_figures,
        });
    }

    periods
}

/// New clients in `period` (1-based): a quarter of the annual target, ramped
/// linearly up to full run-rate by quarter four, rounded up.
pub fn baseline_new_clients(client_target_12m: Decimal, period: u32) -> Decimal {
    let ramp = (Decimal::from(period) / RAMP_QUARTERS).min(Decimal::ONE);
    (client_target_12m / RAMP_QUARTERS * ramp).ceil()
}

/// Share of clients kept over one quarter of monthly churn, clamped to [0, 1].
pub fn quarterly_retention(churn_rate: Percent) -> Decimal {
    let retention = Decimal::ONE - churn_rate / dec!(100) * MONTHS_PER_PERIOD;
    retention.max(Decimal::ZERO).min(Decimal::ONE)
}
