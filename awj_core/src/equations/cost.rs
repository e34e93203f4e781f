//! # Operating Cost
//!
//! Cost of one meter of cut from abrasive, water and electricity consumption
//! over the time the head needs to travel 1000 mm.

use serde::{Deserialize, Serialize};

use super::require_positive;
use crate::errors::CalcResult;
use crate::settings::CostRates;
use crate::units::Currency;

/// Per-meter cost split by consumable, before rounding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Abrasive cost per meter
    pub abrasive: f64,
    /// Water cost per meter
    pub water: f64,
    /// Electricity cost per meter
    pub energy: f64,
}

impl CostBreakdown {
    /// Sum of all three consumables
    pub fn total(&self) -> f64 {
        self.abrasive + self.water + self.energy
    }
}

/// Split the cost of one meter of cut by consumable.
///
/// # Arguments
///
/// * `abrasive_flow_g_s` - Abrasive mass flow (g/s)
/// * `cutting_speed_mm_min` - Traverse speed (mm/min), must be positive
/// * `water_flow_l_min` - Water flow (l/min)
/// * `hydraulic_power_kw` - Hydraulic power (kW)
/// * `rates` - Unit prices for abrasive, water and electricity
pub fn cost_breakdown(
    abrasive_flow_g_s: f64,
    cutting_speed_mm_min: f64,
    water_flow_l_min: f64,
    hydraulic_power_kw: f64,
    rates: &CostRates,
) -> CalcResult<CostBreakdown> {
    let speed = require_positive("cost_per_meter", "cutting_speed", cutting_speed_mm_min)?;
    let minutes_per_meter = 1000.0 / speed;

    let abrasive_kg = (abrasive_flow_g_s / 1000.0) * minutes_per_meter * 60.0;
    let water_m3 = (water_flow_l_min / 1000.0) * minutes_per_meter;
    let energy_kwh = (hydraulic_power_kw / 60.0) * minutes_per_meter;

    Ok(CostBreakdown {
        abrasive: abrasive_kg * rates.abrasive_cost_per_kg,
        water: water_m3 * rates.water_cost_per_m3,
        energy: energy_kwh * rates.power_cost_per_kwh,
    })
}

/// Cost of one meter of cut, rounded to two decimals.
///
/// Fails with `DivisionByZero` when `cutting_speed_mm_min` is not strictly
/// positive; the speed is not clamped here.
///
/// # Example
///
/// ```rust
/// use awj_core::equations::cost_per_meter;
/// use awj_core::settings::CostRates;
///
/// let cost = cost_per_meter(8.0, 191.7, 2.11, 7.03, &CostRates::default()).unwrap();
/// assert_eq!(cost.to_string(), "66.14");
/// ```
pub fn cost_per_meter(
    abrasive_flow_g_s: f64,
    cutting_speed_mm_min: f64,
    water_flow_l_min: f64,
    hydraulic_power_kw: f64,
    rates: &CostRates,
) -> CalcResult<Currency> {
    let breakdown = cost_breakdown(
        abrasive_flow_g_s,
        cutting_speed_mm_min,
        water_flow_l_min,
        hydraulic_power_kw,
        rates,
    )?;
    Currency::from_f64(breakdown.total())
}
