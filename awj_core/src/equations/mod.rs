//! # AWJ Equations
//!
//! The empirical abrasive water-jet formulas, one function per quantity. Every
//! function here is pure: plain numbers in, a plain number (or a
//! [`CalcResult`]) out, no logging and no shared state.
//!
//! Stage ordering is not enforced at this level. The typed pipeline in
//! [`crate::calculations::pipeline`] is the entry point that guarantees each
//! stage sees its upstream values.
//!
//! ## Modules
//!
//! - [`hydraulics`] - Nozzle flow, hydraulic power, jet velocity
//! - [`cutting`] - Cutting speed, cut depth, surface roughness
//! - [`cost`] - Operating cost per meter of cut
//! - [`diagnostics`] - Informational values derived from the primary results
//!
//! ## Units
//!
//! Inputs and outputs use shop units: mm, MPa, g/s, l/min, kW, mm/min, μm.
//! Conversions to SI happen inside each formula through [`crate::units`].

pub mod cost;
pub mod cutting;
pub mod diagnostics;
pub mod hydraulics;

pub use cost::{cost_breakdown, cost_per_meter, CostBreakdown};
pub use cutting::{cut_depth, cutting_speed, surface_roughness};
pub use diagnostics::{abrasive_ratio, kinetic_energy, mass_flow_rate, specific_energy, water_velocity};
pub use hydraulics::{hydraulic_power, ideal_jet_velocity, water_flow};

use crate::errors::{CalcError, CalcResult};

// =============================================================================
// PHYSICAL AND EMPIRICAL CONSTANTS
// =============================================================================

/// Density of water (kg/m³)
pub const WATER_DENSITY: f64 = 1000.0;

/// Nozzle discharge coefficient (actual flow / ideal flow)
pub const DISCHARGE_COEFFICIENT: f64 = 0.65;

/// Focus/nozzle diameter ratio at which the speed correction is 1.0
pub const OPTIMAL_FOCUS_RATIO: f64 = 3.0;

/// Speed correction per unit of focus ratio deviation
pub const FOCUS_CORRECTION_PER_UNIT: f64 = 0.1;

/// Lower plausibility bound for cutting speed (mm/min)
pub const MIN_CUTTING_SPEED: f64 = 2.0;

/// Upper plausibility bound for cutting speed (mm/min)
pub const MAX_CUTTING_SPEED: f64 = 5000.0;

/// Lower bound for surface roughness Ra (μm)
pub const MIN_ROUGHNESS: f64 = 0.5;

/// Upper bound for surface roughness Ra (μm)
pub const MAX_ROUGHNESS: f64 = 20.0;

/// Round to a fixed number of decimal places, half away from zero.
///
/// Ties are decided on the scaled value, so `round_to(1.115, 2)` is 1.12
/// even though the nearest double to 1.115 lies just below it. This
/// intentionally departs from Python's correctly rounded `round`, which
/// gives 1.11.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Accept a divisor only if it is finite and strictly positive.
pub(crate) fn require_positive(operation: &str, field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::division_by_zero(operation, field))
    }
}
