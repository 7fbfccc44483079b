use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MarketStudyError;
use crate::types::{Money, Percent};
use crate::MarketStudyResult;

// ---------------------------------------------------------------------------
// Default assumptions
// ---------------------------------------------------------------------------

// Used only to render a chart before the founder has entered real figures.
pub const DEFAULT_AVERAGE_PRICE: Money = dec!(89);
pub const DEFAULT_MONTHLY_BUDGET: Money = dec!(15000);
pub const DEFAULT_CAPITAL: Money = dec!(150000);
pub const DEFAULT_CAC: Money = dec!(950);
pub const DEFAULT_CHURN_RATE: Percent = dec!(4.5);
pub const DEFAULT_SALES_CYCLE_DAYS: Decimal = dec!(45);
pub const DEFAULT_CLIENT_TARGET_12M: Decimal = dec!(200);
pub const DEFAULT_MRR_TARGET_12M: Money = dec!(18000);

/// Upper bound on every business figure. Keeps the eight-quarter walk, even
/// at the largest allowed adjustment, well inside `Decimal` range.
pub const MAX_FIGURE: Decimal = dec!(1_000_000_000_000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Business figures collected by the study form.
///
/// Absent fields deserialise as zero, which triggers the default-assumption
/// path in [`resolve_parameters`] for the fields that drive the projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessParameters {
    /// Average monthly subscription price per client
    #[serde(default)]
    pub average_price: Money,
    /// Monthly operating budget (payroll, tooling, rent)
    #[serde(default)]
    pub monthly_budget: Money,
    /// Cash available to fund losses
    #[serde(default)]
    pub capital: Money,
    /// Customer acquisition cost, per new client
    #[serde(default)]
    pub cac: Money,
    /// Monthly churn in percent (4.5 = 4.5% of clients lost per month)
    #[serde(default)]
    pub churn_rate: Percent,
    /// Average sales cycle in days
    #[serde(default)]
    pub sales_cycle_days: Decimal,
    /// Clients targeted after 12 months
    #[serde(default)]
    pub client_target_12m: Decimal,
    /// Monthly recurring revenue targeted after 12 months
    #[serde(default)]
    pub mrr_target_12m: Money,
}

impl BusinessParameters {
    /// The documented fallback set.
    pub fn default_assumptions() -> Self {
        Self {
            average_price: DEFAULT_AVERAGE_PRICE,
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
            capital: DEFAULT_CAPITAL,
            cac: DEFAULT_CAC,
            churn_rate: DEFAULT_CHURN_RATE,
            sales_cycle_days: DEFAULT_SALES_CYCLE_DAYS,
            client_target_12m: DEFAULT_CLIENT_TARGET_12M,
            mrr_target_12m: DEFAULT_MRR_TARGET_12M,
        }
    }

    /// True when every field the projection cannot do without is non-zero.
    pub fn is_complete(&self) -> bool {
        !self.average_price.is_zero()
            && !self.monthly_budget.is_zero()
            && !self.cac.is_zero()
            && !self.client_target_12m.is_zero()
    }

    fn fields(&self) -> [(&'static str, Decimal); 8] {
        [
            ("average_price", self.average_price),
            ("monthly_budget", self.monthly_budget),
            ("capital", self.capital),
            ("cac", self.cac),
            ("churn_rate", self.churn_rate),
            ("sales_cycle_days", self.sales_cycle_days),
            ("client_target_12m", self.client_target_12m),
            ("mrr_target_12m", self.mrr_target_12m),
        ]
    }
}

/// Parameters actually fed to the engine, plus a record of any substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedParameters {
    pub parameters: BusinessParameters,
    /// True when at least one field came from the default assumptions;
    /// anything rendered from this projection must say so.
    pub uses_default_assumptions: bool,
    pub substituted_fields: Vec<String>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Reject negative figures, figures above [`MAX_FIGURE`] and churn outside
/// [0, 100].
pub fn validate_parameters(params: &BusinessParameters) -> MarketStudyResult<()> {
    for (field, value) in params.fields() {
        if value < Decimal::ZERO {
            return Err(MarketStudyError::InvalidParameter {
                field: field.to_string(),
                reason: format!("must be non-negative (got {value})"),
            });
        }
        if value > MAX_FIGURE {
            return Err(MarketStudyError::InvalidParameter {
                field: field.to_string(),
                reason: format!("must not exceed {MAX_FIGURE} (got {value})"),
            });
        }
    }

    if params.churn_rate > dec!(100) {
        return Err(MarketStudyError::InvalidParameter {
            field: "churn_rate".to_string(),
            reason: format!("must be between 0 and 100 (got {})", params.churn_rate),
        });
    }

    Ok(())
}

/// Apply the default-assumption fallback.
///
/// When any of price, budget, CAC or client target is zero, every zero-valued
/// field is replaced by its default. Complete input passes through untouched,
/// including a legitimate zero churn.
pub fn resolve_parameters(params: &BusinessParameters) -> ResolvedParameters {
    if params.is_complete() {
        return ResolvedParameters {
            parameters: params.clone(),
            uses_default_assumptions: false,
            substituted_fields: Vec::new(),
        };
    }

    let defaults = BusinessParameters::default_assumptions();
    let mut substituted_fields = Vec::new();
    let mut pick = |field: &str, value: Decimal, fallback: Decimal| {
        if value.is_zero() {
            substituted_fields.push(field.to_string());
            fallback
        } else {
            value
        }
    };

    let parameters = BusinessParameters {
        average_price: pick("average_price", params.average_price, defaults.average_price),
        monthly_budget: pick("monthly_budget", params.monthly_budget, defaults.monthly_budget),
        capital: pick("capital", params.capital, defaults.capital),
        cac: pick("cac", params.cac, defaults.cac),
        churn_rate: pick("churn_rate", params.churn_rate, defaults.churn_rate),
        sales_cycle_days: pick(
            "sales_cycle_days",
            params.sales_cycle_days,
            defaults.sales_cycle_days,
        ),
        client_target_12m: pick(
            "client_target_12m",
            params.client_target_12m,
            defaults.client_target_12m,
        ),
        mrr_target_12m: pick("mrr_target_12m", params.mrr_target_12m, defaults.mrr_target_12m),
    };

    ResolvedParameters {
        parameters,
        uses_default_assumptions: true,
        substituted_fields,
    }
}
