//! # Cutting Performance
//!
//! Empirical AWJ models for traverse speed, achievable depth and surface
//! finish. Material constants come from [`MaterialType::properties`].
//!
//! ```text
//! v  = 60 · k · p^1.5 · ṁa^0.8 / (t^1.2 · σ^0.5) · C_f      (mm/min)
//! C_f = 1 + 0.1 · (d_focus / d_nozzle − 3)
//! h  = 10 · k · p^1.5 · ṁa^0.8 / v^0.5                      (mm)
//! Ra = 2 · r · v^0.3 / (ṁa^0.4 · mesh^0.2)                  (μm)
//! ```
//!
//! Speed is clamped to [2, 5000] mm/min and Ra to [0.5, 20] μm. Depth has no
//! clamp; it only refuses a non-positive speed.

use super::{
    require_positive, round_to, FOCUS_CORRECTION_PER_UNIT, MAX_CUTTING_SPEED, MAX_ROUGHNESS,
    MIN_CUTTING_SPEED, MIN_ROUGHNESS, OPTIMAL_FOCUS_RATIO,
};
use crate::errors::CalcResult;
use crate::materials::MaterialType;

/// Pressure exponent
const PRESSURE_EXP: f64 = 1.5;
/// Abrasive flow exponent
const ABRASIVE_EXP: f64 = 0.8;
/// Thickness exponent
const THICKNESS_EXP: f64 = 1.2;
/// Tensile strength exponent
const STRENGTH_EXP: f64 = 0.5;

const DEPTH_NORMALIZATION: f64 = 10.0;
const ROUGHNESS_NORMALIZATION: f64 = 2.0;

/// Speed multiplier for the focus tube / orifice diameter ratio.
#[inline]
pub fn focus_correction(nozzle_diameter_mm: f64, focus_diameter_mm: f64) -> f64 {
    let ratio = focus_diameter_mm / nozzle_diameter_mm;
    1.0 + FOCUS_CORRECTION_PER_UNIT * (ratio - OPTIMAL_FOCUS_RATIO)
}

/// Cutting speed in mm/min, clamped to [2, 5000] and rounded to 1 decimal.
///
/// Out-of-range values are clipped, never reported as errors.
///
/// # Example
///
/// ```rust
/// use awj_core::equations::cutting_speed;
/// use awj_core::materials::MaterialType;
///
/// let v = cutting_speed(MaterialType::Steel, 50.0, 300.0, 8.0, 0.33, 1.0);
/// assert_eq!(v, 754.8);
/// ```
pub fn cutting_speed(
    material: MaterialType,
    thickness_mm: f64,
    pressure_mpa: f64,
    abrasive_flow_g_s: f64,
    nozzle_diameter_mm: f64,
    focus_diameter_mm: f64,
) -> f64 {
    let props = material.properties();

    let numerator = props.k_factor * pressure_mpa.powf(PRESSURE_EXP) * abrasive_flow_g_s.powf(ABRASIVE_EXP);
    let denominator = thickness_mm.powf(THICKNESS_EXP) * props.tensile_strength.powf(STRENGTH_EXP);

    let speed_mm_s = numerator / denominator * focus_correction(nozzle_diameter_mm, focus_diameter_mm);
    let speed_mm_min = speed_mm_s * 60.0;

    // min before max: a NaN collapses to the upper bound
    let clamped = speed_mm_min.min(MAX_CUTTING_SPEED).max(MIN_CUTTING_SPEED);
    round_to(clamped, 1)
}

/// Maximum depth of cut in mm, rounded to 2 decimals.
///
/// Fails with `DivisionByZero` when `cutting_speed_mm_min` is not strictly
/// positive.
pub fn cut_depth(
    material: MaterialType,
    pressure_mpa: f64,
    abrasive_flow_g_s: f64,
    cutting_speed_mm_min: f64,
) -> CalcResult<f64> {
    let speed = require_positive("cut_depth", "cutting_speed", cutting_speed_mm_min)?;
    let k = material.properties().k_factor;

    let depth = k * pressure_mpa.powf(PRESSURE_EXP) * abrasive_flow_g_s.powf(ABRASIVE_EXP) / speed.sqrt();
    Ok(round_to(depth * DEPTH_NORMALIZATION, 2))
}

/// Surface roughness Ra in μm, clamped to [0.5, 20] and rounded to 2 decimals.
pub fn surface_roughness(
    material: MaterialType,
    cutting_speed_mm_min: f64,
    abrasive_flow_g_s: f64,
    mesh_size: u32,
) -> f64 {
    let factor = material.properties().roughness_factor;

    let base = factor * cutting_speed_mm_min.powf(0.3)
        / (abrasive_flow_g_s.powf(0.4) * f64::from(mesh_size).powf(0.2));
    let roughness = base * ROUGHNESS_NORMALIZATION;

    round_to(roughness.min(MAX_ROUGHNESS).max(MIN_ROUGHNESS), 2)
}
