//! # Jet Hydraulics
//!
//! Water flow through the orifice and the hydraulic power it carries.
//!
//! ```text
//! v_ideal = √(2·p / ρ)
//! Q       = A · C_d · v_ideal,   A = π·(d/2)²
//! P_h     = Q · p
//! ```

use std::f64::consts::PI;

use super::{round_to, DISCHARGE_COEFFICIENT, WATER_DENSITY};
use crate::units::{
    CubicMetersPerSecond, Kilowatts, LitersPerMinute, Meters, MegaPascals, Millimeters, Pascals, Watts,
};

/// Ideal (loss-free) jet velocity from Bernoulli, in m/s.
///
/// Negative pressure is treated as zero so the result stays a real number.
#[inline]
pub fn ideal_jet_velocity(pressure_mpa: f64) -> f64 {
    let p: Pascals = MegaPascals(pressure_mpa.max(0.0)).into();
    (2.0 * p.0 / WATER_DENSITY).sqrt()
}

/// Water flow through the orifice, in l/min, rounded to 2 decimals.
///
/// # Example
///
/// ```rust
/// use awj_core::equations::water_flow;
///
/// // 0.33 mm orifice at 300 MPa
/// assert_eq!(water_flow(0.33, 300.0), 2.58);
/// ```
pub fn water_flow(nozzle_diameter_mm: f64, pressure_mpa: f64) -> f64 {
    let d: Meters = Millimeters(nozzle_diameter_mm).into();
    let area_m2 = PI * (d.0 / 2.0).powi(2);
    let velocity = DISCHARGE_COEFFICIENT * ideal_jet_velocity(pressure_mpa);

    let flow: LitersPerMinute = CubicMetersPerSecond(area_m2 * velocity).into();
    round_to(flow.0, 2)
}

/// Hydraulic power of the jet, in kW, rounded to 2 decimals.
pub fn hydraulic_power(pressure_mpa: f64, flow_l_min: f64) -> f64 {
    let p: Pascals = MegaPascals(pressure_mpa).into();
    let q: CubicMetersPerSecond = LitersPerMinute(flow_l_min).into();

    let power: Kilowatts = Watts(q.0 * p.0).into();
    round_to(power.0, 2)
}
