use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MarketStudyError;
use crate::types::{Money, Percent, Rate};
use crate::MarketStudyResult;

/// Largest accepted acquisition uplift or programme fee ratio.
pub const MAX_ADJUSTMENT_FACTOR: Rate = dec!(10);

/// How the accelerator programme shifts the baseline plan.
///
/// Fixed product configuration; founders never edit these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAdjustment {
    /// Fractional reduction of CAC (0.30 = 30% cheaper acquisition)
    pub cac_reduction: Rate,
    /// Fractional reduction of monthly churn
    pub churn_reduction: Rate,
    /// Fractional reduction of the sales cycle
    pub sales_cycle_reduction: Rate,
    /// Extra new clients per quarter (0.25 = 25% more)
    pub acquisition_uplift: Rate,
    /// Programme fee per month as a fraction of the monthly budget
    pub program_fee_ratio: Rate,
}

impl Default for ScenarioAdjustment {
    fn default() -> Self {
        Self {
            cac_reduction: dec!(0.30),
            churn_reduction: dec!(0.25),
            sales_cycle_reduction: dec!(0.20),
            acquisition_uplift: dec!(0.25),
            program_fee_ratio: dec!(0.15),
        }
    }
}

impl ScenarioAdjustment {
    /// Reductions must lie in [0, 1]; uplift and fee in [0, MAX_ADJUSTMENT_FACTOR].
    pub fn validate(&self) -> MarketStudyResult<()> {
        let reductions = [
            ("cac_reduction", self.cac_reduction),
            ("churn_reduction", self.churn_reduction),
            ("sales_cycle_reduction", self.sales_cycle_reduction),
        ];
        for (field, value) in reductions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(MarketStudyError::InvalidParameter {
                    field: field.to_string(),
                    reason: format!("reduction must be between 0 and 1 (got {value})"),
                });
            }
        }
        for (field, value) in [
            ("acquisition_uplift", self.acquisition_uplift),
            ("program_fee_ratio", self.program_fee_ratio),
        ] {
            if value < Decimal::ZERO || value > MAX_ADJUSTMENT_FACTOR {
                return Err(MarketStudyError::InvalidParameter {
                    field: field.to_string(),
                    reason: format!(
                        "must be between 0 and {MAX_ADJUSTMENT_FACTOR} (got {value})"
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn assisted_cac(&self, cac: Money) -> Money {
        cac * (Decimal::ONE - self.cac_reduction)
    }

    pub fn assisted_churn(&self, churn_rate: Percent) -> Percent {
        churn_rate * (Decimal::ONE - self.churn_reduction)
    }

    pub fn assisted_sales_cycle(&self, days: Decimal) -> Decimal {
        days * (Decimal::ONE - self.sales_cycle_reduction)
    }

    /// Assisted acquisitions for a quarter, rounded up to whole clients.
    pub fn assisted_new_clients(&self, baseline_new_clients: Decimal) -> Decimal {
        (baseline_new_clients * (Decimal::ONE + self.acquisition_uplift)).ceil()
    }

    pub fn program_monthly_fee(&self, monthly_budget: Money) -> Money {
        monthly_budget * self.program_fee_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let adj = ScenarioAdjustment::default();
        assert_eq!(adj.cac_reduction, dec!(0.30));
        assert_eq!(adj.churn_reduction, dec!(0.25));
        assert_eq!(adj.sales_cycle_reduction, dec!(0.20));
        assert_eq!(adj.acquisition_uplift, dec!(0.25));
        assert_eq!(adj.program_fee_ratio, dec!(0.15));
        assert!(adj.validate().is_ok());
    }

    #[test]
    fn test_assisted_figures() {
        let adj = ScenarioAdjustment::default();
        assert_eq!(adj.assisted_cac(dec!(950)), dec!(665));
        assert_eq!(adj.assisted_churn(dec!(4.5)), dec!(3.375));
        assert_eq!(adj.assisted_sales_cycle(dec!(45)), dec!(36));
        assert_eq!(adj.program_monthly_fee(dec!(15000)), dec!(2250));
    }

    #[test]
    fn test_assisted_new_clients_rounds_up() {
        let adj = ScenarioAdjustment::default();
        // 13 * 1.25 = 16.25
        assert_eq!(adj.assisted_new_clients(dec!(13)), dec!(17));
        // 4 * 1.25 = 5 exactly
        assert_eq!(adj.assisted_new_clients(dec!(4)), dec!(5));
        assert_eq!(adj.assisted_new_clients(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_validate_rejects_reduction_above_one() {
        let adj = ScenarioAdjustment {
            churn_reduction: dec!(1.2),
            ..ScenarioAdjustment::default()
        };
        assert!(adj.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_fee() {
        let adj = ScenarioAdjustment {
            program_fee_ratio: dec!(-0.1),
            ..ScenarioAdjustment::default()
        };
        assert!(adj.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_uplift() {
        let adj = ScenarioAdjustment {
            acquisition_uplift: dec!(10.5),
            ..ScenarioAdjustment::default()
        };
        assert!(adj.validate().is_err());

        let at_cap = ScenarioAdjustment {
            acquisition_uplift: MAX_ADJUSTMENT_FACTOR,
            program_fee_ratio: MAX_ADJUSTMENT_FACTOR,
            ..ScenarioAdjustment::default()
        };
        assert!(at_cap.validate().is_ok());
    }
}
