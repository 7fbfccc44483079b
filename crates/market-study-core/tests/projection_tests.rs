use market_study_core::projection::{
    analyze_projection, find_breakeven, project, project_with_adjustment, summarize,
    BusinessParameters, PeriodFigures, ScenarioAdjustment, MAX_ADJUSTMENT_FACTOR, MAX_FIGURE,
};
use market_study_core::{MarketStudyError, Scenario};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Golden fixture: the documented default assumptions
// ===========================================================================

/// (new clients, clients, revenue, costs, cumulative revenue, cumulative costs)
type Row = (Decimal, Decimal, Decimal, Decimal, Decimal, Decimal);

fn row(f: &PeriodFigures) -> Row {
    (
        f.new_clients,
        f.clients,
        f.revenue,
        f.costs,
        f.cumulative_revenue,
        f.cumulative_costs,
    )
}

fn default_baseline() -> Vec<Row> {
    vec![
        (dec!(13), dec!(11.245), dec!(3002.42), dec!(57350), dec!(3002.42), dec!(57350)),
        (dec!(25), dec!(31.351925), dec!(8370.96), dec!(68750), dec!(11373.38), dec!(126100)),
        (dec!(38), dec!(59.989415), dec!(16017.17), dec!(81100), dec!(27390.55), dec!(207200)),
        (dec!(50), dec!(95.140844), dec!(25402.61), dec!(92500), dec!(52793.16), dec!(299700)),
        (dec!(50), dec!(125.546830), dec!(33521.00), dec!(92500), dec!(86314.16), dec!(392200)),
        (dec!(50), dec!(151.848008), dec!(40543.42), dec!(92500), dec!(126857.58), dec!(484700)),
        (dec!(50), dec!(174.598527), dec!(46617.81), dec!(92500), dec!(173475.39), dec!(577200)),
        (dec!(50), dec!(194.277726), dec!(51872.15), dec!(92500), dec!(225347.54), dec!(669700)),
    ]
}

fn default_assisted() -> Vec<Row> {
    vec![
        (dec!(17), dec!(15.27875), dec!(4079.43), dec!(63055), dec!(4079.43), dec!(63055)),
        (dec!(32), dec!(42.491777), dec!(11345.30), dec!(73030), dec!(15424.73), dec!(136085)),
        (dec!(48), dec!(81.329485), dec!(21714.97), dec!(83670), dec!(37139.70), dec!(219755)),
        (dec!(63), dec!(129.716125), dec!(34634.21), dec!(93645), dec!(71773.91), dec!(313400)),
        (dec!(63), dec!(173.203617), dec!(46245.37), dec!(93645), dec!(118019.28), dec!(407045)),
        (dec!(63), dec!(212.288001), dec!(56680.90), dec!(93645), dec!(174700.18), dec!(500690)),
        (dec!(63), dec!(247.415091), dec!(66059.83), dec!(93645), dec!(240760.01), dec!(594335)),
        (dec!(63), dec!(278.985563), dec!(74489.15), dec!(93645), dec!(315249.16), dec!(687980)),
    ]
}

#[test]
fn test_default_assumptions_golden_baseline() {
    let out = project(&BusinessParameters::default_assumptions()).unwrap();
    let rows: Vec<Row> = out.result.periods.iter().map(|p| row(&p.baseline)).collect();
    assert_eq!(rows, default_baseline());
}

#[test]
fn test_default_assumptions_golden_assisted() {
    let out = project(&BusinessParameters::default_assumptions()).unwrap();
    let rows: Vec<Row> = out.result.periods.iter().map(|p| row(&p.assisted)).collect();
    assert_eq!(rows, default_assisted());
}

#[test]
fn test_empty_form_falls_back_to_golden_figures() {
    let out = project(&BusinessParameters::default()).unwrap();
    assert!(out.result.uses_default_assumptions);
    assert_eq!(out.result.substituted_fields.len(), 8);
    assert!(out.warnings[0].starts_with("Default assumptions substituted for"));

    let rows: Vec<Row> = out.result.periods.iter().map(|p| row(&p.baseline)).collect();
    assert_eq!(rows, default_baseline());
}

#[test]
fn test_default_assumptions_never_break_even() {
    let analysis = analyze_projection(&BusinessParameters::default_assumptions())
        .unwrap()
        .result;
    assert_eq!(analysis.baseline_breakeven.period, None);
    assert_eq!(analysis.assisted_breakeven.period, None);
    assert_eq!(analysis.summary.financial_benefit, dec!(71621.62));
    assert_eq!(analysis.summary.time_gain_quarters, None);
}

// ===========================================================================
// End-to-end: a business that breaks even inside the horizon
// ===========================================================================

fn growth_params() -> BusinessParameters {
    BusinessParameters {
        average_price: dec!(200),
        monthly_budget: dec!(5000),
        capital: dec!(80000),
        cac: dec!(300),
        churn_rate: dec!(2),
        sales_cycle_days: dec!(30),
        client_target_12m: dec!(100),
        mrr_target_12m: dec!(20000),
    }
}

#[test]
fn test_growth_case_breakeven_and_gain() {
    let out = project(&growth_params()).unwrap();
    let periods = &out.result.periods;

    let baseline = find_breakeven(periods, Scenario::Baseline);
    let assisted = find_breakeven(periods, Scenario::Assisted);
    assert_eq!(baseline.period, Some(5));
    assert_eq!(assisted.period, Some(4));

    // Q4 assisted is the first non-negative cumulative P&L
    assert_eq!(periods[3].assisted.cumulative_profit_loss, dec!(6205.77));
    assert_eq!(periods[4].baseline.cumulative_profit_loss, dec!(14313.29));

    let summary = summarize(periods, &baseline, &assisted).unwrap();
    assert_eq!(summary.time_gain_quarters, Some(1));
    assert_eq!(summary.financial_benefit, dec!(95546.69));
}

#[test]
fn test_growth_case_final_quarter() {
    let out = project(&growth_params()).unwrap();
    let last = out.result.last_period().unwrap();
    assert_eq!(last.label, "Q8");
    assert_eq!(last.baseline.clients, dec!(130.025642));
    assert_eq!(last.assisted.clients, dec!(176.402698));
    assert_eq!(last.baseline.cumulative_profit_loss, dec!(150158.97));
    assert_eq!(last.assisted.cumulative_profit_loss, dec!(245705.66));
}

#[test]
fn test_summarize_rejects_empty_series() {
    let b = find_breakeven(&[], Scenario::Baseline);
    let a = find_breakeven(&[], Scenario::Assisted);
    assert!(matches!(
        summarize(&[], &b, &a),
        Err(MarketStudyError::InsufficientData(_))
    ));
}

#[test]
fn test_negative_input_rejected() {
    let mut params = growth_params();
    params.cac = dec!(-1);
    assert!(matches!(
        project(&params),
        Err(MarketStudyError::InvalidParameter { field, .. }) if field == "cac"
    ));
}

#[test]
fn test_oversized_figures_rejected_not_panicking() {
    let params = BusinessParameters {
        average_price: dec!(1_000_000_000_000_000),
        client_target_12m: dec!(1_000_000_000_000_000),
        cac: dec!(300),
        monthly_budget: dec!(5000),
        ..BusinessParameters::default()
    };
    assert!(matches!(
        project(&params),
        Err(MarketStudyError::InvalidParameter { field, .. }) if field == "average_price"
    ));
    assert!(analyze_projection(&params).is_err());
}

#[test]
fn test_largest_allowed_inputs_stay_in_range() {
    let params = BusinessParameters {
        average_price: MAX_FIGURE,
        monthly_budget: MAX_FIGURE,
        capital: MAX_FIGURE,
        cac: MAX_FIGURE,
        churn_rate: Decimal::ZERO,
        sales_cycle_days: MAX_FIGURE,
        client_target_12m: MAX_FIGURE,
        mrr_target_12m: MAX_FIGURE,
    };
    let adjustment = ScenarioAdjustment {
        acquisition_uplift: MAX_ADJUSTMENT_FACTOR,
        program_fee_ratio: MAX_ADJUSTMENT_FACTOR,
        ..ScenarioAdjustment::default()
    };

    let out = project_with_adjustment(&params, &adjustment).unwrap();
    let last = out.result.last_period().unwrap();
    assert!(last.assisted.cumulative_revenue > last.baseline.cumulative_revenue);
    assert!(analyze_projection(&params).is_ok());
}

// ===========================================================================
// Laws over a grid of inputs
// ===========================================================================

fn grid() -> Vec<BusinessParameters> {
    let mut out = Vec::new();
    for price in [dec!(15), dec!(89), dec!(450)] {
        for churn in [dec!(0), dec!(4.5), dec!(12), dec!(40)] {
            for target in [dec!(1), dec!(37), dec!(500)] {
                out.push(BusinessParameters {
                    average_price: price,
                    monthly_budget: dec!(8000),
                    capital: dec!(100000),
                    cac: dec!(420),
                    churn_rate: churn,
                    sales_cycle_days: dec!(60),
                    client_target_12m: target,
                    mrr_target_12m: dec!(10000),
                });
            }
        }
    }
    out
}

#[test]
fn test_law_cumulative_series_are_running_sums() {
    for params in grid() {
        let periods = project(&params).unwrap().result.periods;
        assert_eq!(periods.len(), 8);

        for scenario in Scenario::ALL {
            let mut revenue = Decimal::ZERO;
            let mut costs = Decimal::ZERO;
            for point in &periods {
                let f = point.figures(scenario);
                revenue += f.revenue;
                costs += f.costs;
                assert_eq!(f.cumulative_revenue, revenue);
                assert_eq!(f.cumulative_costs, costs);
                assert_eq!(f.cumulative_profit_loss, revenue - costs);
                assert_eq!(f.profit_loss, f.revenue - f.costs);
            }
        }
    }
}

#[test]
fn test_law_assisted_acquires_at_least_the_uplift() {
    let uplift = ScenarioAdjustment::default().acquisition_uplift;
    for params in grid() {
        for point in project(&params).unwrap().result.periods {
            let floor = point.baseline.new_clients * (Decimal::ONE + uplift) - Decimal::ONE;
            assert!(point.assisted.new_clients >= floor);
            assert!(point.assisted.new_clients >= point.baseline.new_clients);
        }
    }
}

#[test]
fn test_law_breakeven_is_first_non_negative_quarter() {
    for params in grid() {
        let periods = project(&params).unwrap().result.periods;
        for scenario in Scenario::ALL {
            let result = find_breakeven(&periods, scenario);
            assert_eq!(find_breakeven(&periods, scenario), result);

            match result.period {
                Some(q) => {
                    let idx = (q - 1) as usize;
                    assert!(periods[idx].figures(scenario).cumulative_profit_loss >= Decimal::ZERO);
                    assert!(periods[..idx]
                        .iter()
                        .all(|p| p.figures(scenario).cumulative_profit_loss < Decimal::ZERO));
                }
                None => assert!(periods
                    .iter()
                    .all(|p| p.figures(scenario).cumulative_profit_loss < Decimal::ZERO)),
            }
        }
    }
}

#[test]
fn test_law_summary_matches_final_quarter() {
    for params in grid() {
        let analysis = analyze_projection(&params).unwrap().result;
        let last = analysis.projection.last_period().unwrap();
        assert_eq!(
            analysis.summary.financial_benefit,
            last.assisted.cumulative_profit_loss - last.baseline.cumulative_profit_loss
        );
        match (analysis.baseline_breakeven.period, analysis.assisted_breakeven.period) {
            (Some(b), Some(a)) => {
                assert_eq!(analysis.summary.time_gain_quarters, Some(b as i32 - a as i32))
            }
            _ => assert_eq!(analysis.summary.time_gain_quarters, None),
        }
    }
}
