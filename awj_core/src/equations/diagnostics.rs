//! Extended diagnostic values.
//!
//! Informational quantities reported next to the primary results. None of
//! them feed back into speed, depth, roughness or cost.

use super::{ideal_jet_velocity, require_positive, round_to, WATER_DENSITY};
use crate::errors::CalcResult;

/// Ideal jet velocity (m/s), 2 decimals
pub fn water_velocity(pressure_mpa: f64) -> f64 {
    round_to(ideal_jet_velocity(pressure_mpa), 2)
}

/// Kinetic energy density of the ideal jet, ½·ρ·v², 2 decimals
pub fn kinetic_energy(pressure_mpa: f64) -> f64 {
    let v = ideal_jet_velocity(pressure_mpa);
    round_to(0.5 * WATER_DENSITY * v.powi(2), 2)
}

/// Water mass flow (kg/s), 4 decimals
pub fn mass_flow_rate(water_flow_l_min: f64) -> f64 {
    round_to(water_flow_l_min * WATER_DENSITY / 60_000.0, 4)
}

/// Abrasive flow (g/s) over water flow (g/s), 3 decimals
pub fn abrasive_ratio(abrasive_flow_g_s: f64, water_flow_l_min: f64) -> CalcResult<f64> {
    let water_g_s = require_positive("abrasive_ratio", "water_flow", water_flow_l_min * WATER_DENSITY / 60.0)?;
    Ok(round_to(abrasive_flow_g_s / water_g_s, 3))
}

/// Hydraulic energy spent per millimeter of cut (J/mm), 2 decimals
pub fn specific_energy(hydraulic_power_kw: f64, cutting_speed_mm_min: f64) -> CalcResult<f64> {
    let speed = require_positive("specific_energy", "cutting_speed", cutting_speed_mm_min)?;
    Ok(round_to(hydraulic_power_kw * 1000.0 / speed, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_and_energy() {
        assert_eq!(water_velocity(300.0), 774.6);
        assert_eq!(kinetic_energy(300.0), 300_000_000.0);
    }

    #[test]
    fn test_mass_flow_and_ratio() {
        assert_eq!(mass_flow_rate(2.58), 0.043);
        assert_eq!(abrasive_ratio(8.0, 2.58).unwrap(), 0.186);
    }

    #[test]
    fn test_ratio_needs_water() {
        assert!(abrasive_ratio(8.0, 0.0).is_err());
    }

    #[test]
    fn test_specific_energy() {
        assert_eq!(specific_energy(12.9, 754.8).unwrap(), 17.09);
        assert!(specific_energy(12.9, 0.0).is_err());
    }
}
