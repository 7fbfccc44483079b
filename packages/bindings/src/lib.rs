use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use market_study_core::formatting::{self, Locale};
use market_study_core::projection::{self, BusinessParameters, PeriodPoint};
use market_study_core::{study, Scenario};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_locale(locale: Option<String>) -> NapiResult<Locale> {
    match locale {
        Some(tag) => Locale::from_str(&tag).map_err(to_napi_error),
        None => Ok(Locale::default()),
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SeriesInput {
    periods: Vec<PeriodPoint>,
    #[serde(default)]
    scenario: Scenario,
}

#[napi]
pub fn project_financials(input_json: String) -> NapiResult<String> {
    let input: BusinessParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = projection::project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `{"periods": [...], "scenario": "baseline" | "assisted"}`
#[napi]
pub fn find_breakeven(input_json: String) -> NapiResult<String> {
    let input: SeriesInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = projection::find_breakeven(&input.periods, input.scenario);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `{"periods": [...]}`; both break-evens are located before comparing.
#[napi]
pub fn summarize_projection(input_json: String) -> NapiResult<String> {
    let input: SeriesInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let baseline = projection::find_breakeven(&input.periods, Scenario::Baseline);
    let assisted = projection::find_breakeven(&input.periods, Scenario::Assisted);
    let output =
        projection::summarize(&input.periods, &baseline, &assisted).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_projection(input_json: String) -> NapiResult<String> {
    let input: BusinessParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = projection::analyze_projection(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Study
// ---------------------------------------------------------------------------

#[napi]
pub fn extract_structured_data(text: String) -> NapiResult<String> {
    let value = study::extract_structured_data(&text).map_err(to_napi_error)?;
    serde_json::to_string(&value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(value: String, locale: Option<String>) -> NapiResult<String> {
    let amount = Decimal::from_str(&value).map_err(to_napi_error)?;
    Ok(formatting::format_currency(amount, parse_locale(locale)?))
}

#[napi]
pub fn format_breakeven(period: Option<u32>, locale: Option<String>) -> NapiResult<String> {
    Ok(formatting::format_breakeven(period, parse_locale(locale)?))
}
