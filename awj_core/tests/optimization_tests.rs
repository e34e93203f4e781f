//! Integration tests for the grid-search optimizers.

use awj_core::materials::MaterialType;
use awj_core::optimization::grid::{linspace, search_sequential};
use awj_core::optimization::{
    optimize, optimize_for_cost, optimize_for_cost_with_rates, optimize_for_speed, optimize_with_settings,
    OptimizationRequest, OptimizationTarget, ParameterRange, COST_ABRASIVE_RANGE, COST_PRESSURE_RANGE,
    SPEED_ABRASIVE_RANGE, SPEED_PRESSURE_RANGE,
};
use awj_core::settings::{CostRates, EngineSettings};
use awj_core::units::Currency;
use awj_core::{perform_full_calculation, CalculationInput};

#[test]
fn speed_search_thick_steel() {
    let best = optimize_for_speed(MaterialType::Steel, 100.0, SPEED_PRESSURE_RANGE, SPEED_ABRASIVE_RANGE)
        .unwrap()
        .unwrap();
    assert_eq!(best.pressure, 600.0);
    assert_eq!(best.abrasive_flow, 20.0);
    assert_eq!(best.expected_speed, 1934.1);
}

#[test]
fn speed_search_titanium() {
    let best = optimize_for_speed(MaterialType::Titanium, 100.0, SPEED_PRESSURE_RANGE, SPEED_ABRASIVE_RANGE)
        .unwrap()
        .unwrap();
    assert_eq!((best.pressure, best.abrasive_flow), (600.0, 20.0));
    assert_eq!(best.expected_speed, 902.6);
}

#[test]
fn speed_search_matches_full_calculation() {
    let best = optimize_for_speed(MaterialType::Granite, 40.0, SPEED_PRESSURE_RANGE, SPEED_ABRASIVE_RANGE)
        .unwrap()
        .unwrap();
    let input = CalculationInput::new(MaterialType::Granite, 40.0, best.pressure).with_abrasive_flow(best.abrasive_flow);
    let result = perform_full_calculation(&input).unwrap();
    assert_eq!(result.cutting_speed, best.expected_speed);
}

#[test]
fn speed_search_is_repeatable() {
    let first = optimize_for_speed(MaterialType::Composite, 25.0, SPEED_PRESSURE_RANGE, SPEED_ABRASIVE_RANGE).unwrap();
    for _ in 0..5 {
        let again = optimize_for_speed(MaterialType::Composite, 25.0, SPEED_PRESSURE_RANGE, SPEED_ABRASIVE_RANGE).unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn speed_ties_keep_lowest_pressure() {
    // Every cell saturates; the first cell in grid order wins
    let best = optimize_for_speed(
        MaterialType::Aluminum,
        0.2,
        ParameterRange::new(200.0, 500.0),
        ParameterRange::new(5.0, 15.0),
    )
    .unwrap()
    .unwrap();
    assert_eq!((best.pressure, best.abrasive_flow), (200.0, 5.0));
    assert_eq!(best.expected_speed, 5000.0);
}

#[test]
fn cost_search_reference_values() {
    let steel = optimize_for_cost(MaterialType::Steel, 10.0, 50.0).unwrap().unwrap();
    assert_eq!((steel.pressure, steel.abrasive_flow), (400.0, 4.0));
    assert_eq!(steel.expected_cost, Some(Currency::from_cents(166)));
    assert_eq!(steel.expected_speed, 4604.4);

    let titanium = optimize_for_cost(MaterialType::Titanium, 50.0, 50.0).unwrap().unwrap();
    assert_eq!((titanium.pressure, titanium.abrasive_flow), (400.0, 4.0));
    assert_eq!(titanium.expected_cost, Some(Currency::from_cents(2447)));
    assert_eq!(titanium.expected_speed, 311.5);

    let aluminum = optimize_for_cost(MaterialType::Aluminum, 20.0, 100.0).unwrap().unwrap();
    assert_eq!((aluminum.pressure, aluminum.abrasive_flow), (400.0, 4.0));
    assert_eq!(aluminum.expected_cost, Some(Currency::from_cents(207)));
    assert_eq!(aluminum.expected_speed, 3684.6);
}

#[test]
fn cost_search_stays_inside_its_grid() {
    let best = optimize_for_cost(MaterialType::Glass, 15.0, 50.0).unwrap().unwrap();
    assert!(best.pressure >= COST_PRESSURE_RANGE.min && best.pressure <= COST_PRESSURE_RANGE.max);
    assert!(best.abrasive_flow >= COST_ABRASIVE_RANGE.min && best.abrasive_flow <= COST_ABRASIVE_RANGE.max);
    assert!(best.expected_speed >= 50.0);
}

#[test]
fn cost_search_unreachable_speed_is_infeasible() {
    assert!(optimize_for_cost(MaterialType::Steel, 10.0, 10_000.0).unwrap().is_none());

    let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MinCost).with_min_speed(10_000.0);
    let outcome = optimize(&request).unwrap();
    assert!(!outcome.feasible);
    assert!(outcome.optimized_parameters.is_none());
}

#[test]
fn cost_search_uses_given_rates() {
    let default = optimize_for_cost(MaterialType::Steel, 10.0, 50.0).unwrap().unwrap();
    let rates = CostRates {
        abrasive_cost_per_kg: 50.0,
        ..CostRates::default()
    };
    let pricey = optimize_for_cost_with_rates(MaterialType::Steel, 10.0, 50.0, &rates).unwrap().unwrap();
    assert!(pricey.expected_cost > default.expected_cost);
}

#[test]
fn settings_rates_flow_into_request() {
    let settings = EngineSettings::from_toml_str("[cost_rates]\nabrasive_cost_per_kg = 50.0\n").unwrap();
    let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MinCost);

    let default = optimize(&request).unwrap().optimized_parameters.unwrap();
    let configured = optimize_with_settings(&request, &settings).unwrap().optimized_parameters.unwrap();
    assert!(configured.expected_cost > default.expected_cost);
}

#[test]
fn max_speed_request_ignores_min_speed() {
    let request = OptimizationRequest::new(MaterialType::Steel, 100.0, OptimizationTarget::MaxSpeed).with_min_speed(10_000.0);
    let outcome = optimize(&request).unwrap();
    assert!(outcome.feasible);
    assert_eq!(outcome.optimized_parameters.unwrap().expected_speed, 1934.1);
}

#[test]
fn generic_grid_first_found_wins() {
    let xs = linspace(0.0, 3.0, 4);
    let ys = linspace(0.0, 1.0, 2);
    let best = search_sequential(&xs, &ys, |x, _| Ok(Some((x >= 1.0) as u8)), |a, b| a > b)
        .unwrap()
        .unwrap();
    assert_eq!((best.x, best.y, best.index), (1.0, 0.0, 2));
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use awj_core::optimization::grid::search_parallel;

    #[test]
    fn parallel_matches_sequential_on_ties() {
        let xs = linspace(100.0, 600.0, 10);
        let ys = linspace(1.0, 20.0, 10);
        let saturating = |p: f64, a: f64| Ok(Some((p * a / 500.0).min(4.0).floor()));
        let seq = search_sequential(&xs, &ys, saturating, |a, b| a > b).unwrap();
        let par = search_parallel(&xs, &ys, saturating, |a, b| a > b).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn searches_unchanged_with_parallel_feature() {
        let best = optimize_for_speed(MaterialType::Steel, 10.0, SPEED_PRESSURE_RANGE, SPEED_ABRASIVE_RANGE)
            .unwrap()
            .unwrap();
        assert_eq!((best.pressure, best.abrasive_flow), (211.1, 15.8));
    }
}
