//! Grid searches over pressure and abrasive flow.
//!
//! Both searches sample each axis at [`GRID_SAMPLES`] points, walk pressure in
//! the outer loop, and use the default cutting head (0.33 mm orifice, 1.0 mm
//! focus tube).

use serde::{Deserialize, Serialize};

use super::grid::{linspace, search};
use crate::calculations::{CalculationInput, CuttingSpeed, HydraulicStage};
use crate::equations::round_to;
use crate::errors::CalcResult;
use crate::materials::MaterialType;
use crate::settings::CostRates;
use crate::units::Currency;

/// Samples per axis
pub const GRID_SAMPLES: usize = 10;

/// Closed interval sampled by a grid search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ParameterRange { min, max }
    }

    /// [`GRID_SAMPLES`] evenly spaced points, both ends included
    pub fn samples(&self) -> Vec<f64> {
        linspace(self.min, self.max, GRID_SAMPLES)
    }
}

/// Pressure range searched for maximum speed (MPa)
pub const SPEED_PRESSURE_RANGE: ParameterRange = ParameterRange::new(100.0, 600.0);
/// Abrasive flow range searched for maximum speed (g/s)
pub const SPEED_ABRASIVE_RANGE: ParameterRange = ParameterRange::new(1.0, 20.0);
/// Pressure range searched for minimum cost (MPa)
pub const COST_PRESSURE_RANGE: ParameterRange = ParameterRange::new(100.0, 400.0);
/// Abrasive flow range searched for minimum cost (g/s)
pub const COST_ABRASIVE_RANGE: ParameterRange = ParameterRange::new(3.0, 12.0);

/// Best parameter combination found by a search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizedParameters {
    /// Pump pressure (MPa), 1 decimal
    pub pressure: f64,
    /// Abrasive mass flow (g/s), 1 decimal
    pub abrasive_flow: f64,
    /// Cutting speed at these settings (mm/min)
    pub expected_speed: f64,
    /// Cost per meter, only for cost searches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_cost: Option<Currency>,
}

fn grid_input(material: MaterialType, thickness: f64, pressure: f64, abrasive_flow: f64) -> CalculationInput {
    CalculationInput::new(material, thickness, pressure).with_abrasive_flow(abrasive_flow)
}

/// Find the pressure and abrasive flow giving the highest cutting speed.
///
/// Equal speeds keep the first combination in grid order, so once the speed
/// saturates at the upper clamp the lowest pressure reaching it wins.
///
/// # Example
///
/// ```rust
/// use awj_core::materials::MaterialType;
/// use awj_core::optimization::{optimize_for_speed, SPEED_ABRASIVE_RANGE, SPEED_PRESSURE_RANGE};
///
/// let best = optimize_for_speed(MaterialType::Steel, 100.0, SPEED_PRESSURE_RANGE, SPEED_ABRASIVE_RANGE)
///     .unwrap()
///     .unwrap();
/// assert_eq!(best.pressure, 600.0);
/// assert_eq!(best.expected_speed, 1934.1);
/// ```
pub fn optimize_for_speed(
    material: MaterialType,
    thickness: f64,
    pressure_range: ParameterRange,
    abrasive_range: ParameterRange,
) -> CalcResult<Option<OptimizedParameters>> {
    let best = search(
        &pressure_range.samples(),
        &abrasive_range.samples(),
        |pressure, abrasive_flow| {
            let input = grid_input(material, thickness, pressure, abrasive_flow);
            Ok(Some(HydraulicStage::run(&input).cutting_speed().speed()))
        },
        |a: &CuttingSpeed, b: &CuttingSpeed| a > b,
    )?;

    let params = best.map(|cell| OptimizedParameters {
        pressure: round_to(cell.x, 1),
        abrasive_flow: round_to(cell.y, 1),
        expected_speed: cell.value.mm_per_min(),
        expected_cost: None,
    });
    tracing::debug!(material = material.key(), thickness, ?params, "max speed search finished");
    Ok(params)
}

/// Find the cheapest combination cutting at least `min_speed` mm/min, using
/// the default unit prices.
///
/// Returns `Ok(None)` when no combination reaches `min_speed`.
pub fn optimize_for_cost(material: MaterialType, thickness: f64, min_speed: f64) -> CalcResult<Option<OptimizedParameters>> {
    optimize_for_cost_with_rates(material, thickness, min_speed, &CostRates::default())
}

/// [`optimize_for_cost`] with explicit unit prices.
pub fn optimize_for_cost_with_rates(
    material: MaterialType,
    thickness: f64,
    min_speed: f64,
    rates: &CostRates,
) -> CalcResult<Option<OptimizedParameters>> {
    let best = search(
        &COST_PRESSURE_RANGE.samples(),
        &COST_ABRASIVE_RANGE.samples(),
        |pressure, abrasive_flow| {
            let input = grid_input(material, thickness, pressure, abrasive_flow);
            let stage = HydraulicStage::run(&input).cutting_speed();
            if stage.speed().mm_per_min() < min_speed {
                return Ok(None);
            }
            Ok(Some((stage.cost_per_meter(rates)?, stage.speed())))
        },
        |a: &(Currency, CuttingSpeed), b: &(Currency, CuttingSpeed)| a.0 < b.0,
    )?;

    let params = best.map(|cell| {
        let (cost, speed) = cell.value;
        OptimizedParameters {
            pressure: round_to(cell.x, 1),
            abrasive_flow: round_to(cell.y, 1),
            expected_speed: speed.mm_per_min(),
            expected_cost: Some(cost),
        }
    });
    tracing::debug!(material = material.key(), thickness, min_speed, ?params, "min cost search finished");
    Ok(params)
}
