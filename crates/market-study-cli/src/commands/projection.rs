use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use market_study_core::formatting::{format_breakeven, format_currency, Locale};
use market_study_core::projection::{
    self, analyze_projection, find_breakeven, summarize, BusinessParameters,
};
use market_study_core::Scenario;

use crate::input;

/// Business parameters, from a document or individual flags
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Average monthly price per client
    #[arg(long)]
    pub average_price: Option<Decimal>,

    /// Monthly operating budget
    #[arg(long)]
    pub monthly_budget: Option<Decimal>,

    /// Capital available
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Customer acquisition cost
    #[arg(long)]
    pub cac: Option<Decimal>,

    /// Monthly churn in percent (e.g. 4.5)
    #[arg(long)]
    pub churn_rate: Option<Decimal>,

    /// Sales cycle in days
    #[arg(long)]
    pub sales_cycle_days: Option<Decimal>,

    /// Clients targeted after twelve months
    #[arg(long)]
    pub client_target: Option<Decimal>,

    /// MRR targeted after twelve months
    #[arg(long)]
    pub mrr_target: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenarioArg {
    Baseline,
    Assisted,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Baseline => Scenario::Baseline,
            ScenarioArg::Assisted => Scenario::Assisted,
        }
    }
}

#[derive(Args)]
pub struct BreakevenArgs {
    #[command(flatten)]
    pub params: ProjectArgs,

    /// Scenario to search
    #[arg(long, default_value = "baseline")]
    pub scenario: ScenarioArg,
}

/// Missing flags stay zero and trigger the default-assumption fallback.
fn resolve_input(args: ProjectArgs) -> Result<BusinessParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        tracing::debug!(path = %path, "reading business parameters from file");
        return input::file::read_document(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        tracing::debug!("reading business parameters from stdin");
        return Ok(serde_json::from_value(data)?);
    }

    Ok(BusinessParameters {
        average_price: args.average_price.unwrap_or_default(),
        monthly_budget: args.monthly_budget.unwrap_or_default(),
        capital: args.capital.unwrap_or_default(),
        cac: args.cac.unwrap_or_default(),
        churn_rate: args.churn_rate.unwrap_or_default(),
        sales_cycle_days: args.sales_cycle_days.unwrap_or_default(),
        client_target_12m: args.client_target.unwrap_or_default(),
        mrr_target_12m: args.mrr_target.unwrap_or_default(),
    })
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_input(args)?;
    let result = projection::project(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_breakeven(args: BreakevenArgs, locale: Locale) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = Scenario::from(args.scenario);
    let params = resolve_input(args.params)?;
    let projected = projection::project(&params)?;
    let breakeven = find_breakeven(&projected.result.periods, scenario);

    Ok(json!({
        "result": {
            "scenario": breakeven.scenario,
            "period": breakeven.period,
            "display": format_breakeven(breakeven.period, locale),
        },
        "methodology": "First quarter whose cumulative profit/loss is non-negative",
        "warnings": projected.warnings,
    }))
}

pub fn run_summary(args: ProjectArgs, locale: Locale) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_input(args)?;
    let projected = projection::project(&params)?;
    let periods = &projected.result.periods;
    let baseline = find_breakeven(periods, Scenario::Baseline);
    let assisted = find_breakeven(periods, Scenario::Assisted);
    let summary = summarize(periods, &baseline, &assisted)?;

    Ok(json!({
        "result": {
            "financial_benefit": summary.financial_benefit,
            "time_gain_quarters": summary.time_gain_quarters,
            "baseline_breakeven": summary.baseline_breakeven,
            "assisted_breakeven": summary.assisted_breakeven,
            "financial_benefit_display": format_currency(summary.financial_benefit, locale),
            "baseline_breakeven_display": format_breakeven(summary.baseline_breakeven, locale),
            "assisted_breakeven_display": format_breakeven(summary.assisted_breakeven, locale),
        },
        "methodology": "Assisted minus baseline cumulative profit/loss at the final quarter",
        "uses_default_assumptions": projected.result.uses_default_assumptions,
        "warnings": projected.warnings,
    }))
}

pub fn run_analyze(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_input(args)?;
    let result = analyze_projection(&params)?;
    Ok(serde_json::to_value(result)?)
}
