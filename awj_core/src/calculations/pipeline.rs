//! # Calculation Pipeline
//!
//! Typed stages for a full calculation. Each stage can only be built from the
//! one before it, so a downstream quantity cannot be computed from an upstream
//! value that was never produced:
//!
//! ```text
//! CalculationInput
//!     │  HydraulicStage::run        water flow → hydraulic power
//!     ▼
//! HydraulicStage
//!     │  .cutting_speed()           clamped speed → CuttingSpeed
//!     ▼
//! SpeedStage
//!     │  .finish()                  depth → roughness → cost → diagnostics
//!     ▼
//! CalculationResult
//! ```

use serde::Serialize;

use super::{CalculationInput, CalculationResult, ExtendedResults};
use crate::equations;
use crate::errors::{ensure_finite, CalcResult};
use crate::settings::CostRates;
use crate::units::Currency;

/// Water flow and hydraulic power for one input.
#[derive(Debug, Clone, Copy)]
pub struct HydraulicStage<'a> {
    input: &'a CalculationInput,
    water_flow: f64,
    hydraulic_power: f64,
}

impl<'a> HydraulicStage<'a> {
    /// Compute water flow, then hydraulic power from that flow.
    pub fn run(input: &'a CalculationInput) -> Self {
        let water_flow = equations::water_flow(input.nozzle_diameter, input.pressure);
        let hydraulic_power = equations::hydraulic_power(input.pressure, water_flow);
        HydraulicStage {
            input,
            water_flow,
            hydraulic_power,
        }
    }

    /// Water flow (l/min)
    pub fn water_flow(&self) -> f64 {
        self.water_flow
    }

    /// Hydraulic power (kW)
    pub fn hydraulic_power(&self) -> f64 {
        self.hydraulic_power
    }

    /// Compute the clamped cutting speed.
    pub fn cutting_speed(self) -> SpeedStage<'a> {
        let input = self.input;
        let speed = equations::cutting_speed(
            input.material_type,
            input.thickness,
            input.pressure,
            input.abrasive_flow,
            input.nozzle_diameter,
            input.focus_diameter,
        );
        SpeedStage {
            hydraulics: self,
            speed: CuttingSpeed(speed),
        }
    }
}

/// Cutting speed that has been through the plausibility clamp.
///
/// There is no public constructor; values always lie in [2, 5000] mm/min, so
/// dividing by one is always defined.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CuttingSpeed(f64);

impl CuttingSpeed {
    /// Speed in mm/min
    pub fn mm_per_min(&self) -> f64 {
        self.0
    }
}

/// Hydraulics plus cutting speed; everything downstream is computed from here.
#[derive(Debug, Clone, Copy)]
pub struct SpeedStage<'a> {
    hydraulics: HydraulicStage<'a>,
    speed: CuttingSpeed,
}

impl<'a> SpeedStage<'a> {
    /// The hydraulic stage this speed was computed after
    pub fn hydraulics(&self) -> &HydraulicStage<'a> {
        &self.hydraulics
    }

    /// Clamped cutting speed
    pub fn speed(&self) -> CuttingSpeed {
        self.speed
    }

    /// Maximum cut depth (mm)
    pub fn cut_depth(&self) -> CalcResult<f64> {
        let input = self.hydraulics.input;
        equations::cut_depth(
            input.material_type,
            input.pressure,
            input.abrasive_flow,
            self.speed.mm_per_min(),
        )
    }

    /// Surface roughness Ra (μm)
    pub fn surface_roughness(&self) -> f64 {
        let input = self.hydraulics.input;
        equations::surface_roughness(
            input.material_type,
            self.speed.mm_per_min(),
            input.abrasive_flow,
            input.mesh_size,
        )
    }

    /// Cost per meter at the given prices
    pub fn cost_per_meter(&self, rates: &CostRates) -> CalcResult<Currency> {
        equations::cost_per_meter(
            self.hydraulics.input.abrasive_flow,
            self.speed.mm_per_min(),
            self.hydraulics.water_flow,
            self.hydraulics.hydraulic_power,
            rates,
        )
    }

    /// Derived diagnostics from the already computed stages
    pub fn extended(&self) -> CalcResult<ExtendedResults> {
        let input = self.hydraulics.input;
        Ok(ExtendedResults {
            water_velocity: equations::water_velocity(input.pressure),
            kinetic_energy: equations::kinetic_energy(input.pressure),
            mass_flow_rate: equations::mass_flow_rate(self.hydraulics.water_flow),
            abrasive_ratio: equations::abrasive_ratio(input.abrasive_flow, self.hydraulics.water_flow)?,
            specific_energy: equations::specific_energy(self.hydraulics.hydraulic_power, self.speed.mm_per_min())?,
        })
    }

    /// Run the remaining stages and assemble the result.
    pub fn finish(self) -> CalcResult<CalculationResult> {
        let cut_depth = self.cut_depth()?;
        let surface_roughness = self.surface_roughness();
        let cost_per_meter = self.cost_per_meter(&self.hydraulics.input.rates())?;
        let extended = self.extended()?;

        Ok(CalculationResult {
            water_flow: ensure_finite("water_flow", self.hydraulics.water_flow)?,
            hydraulic_power: ensure_finite("hydraulic_power", self.hydraulics.hydraulic_power)?,
            cutting_speed: ensure_finite("cutting_speed", self.speed.mm_per_min())?,
            cut_depth: ensure_finite("cut_depth", cut_depth)?,
            surface_roughness: ensure_finite("surface_roughness", surface_roughness)?,
            cost_per_meter,
            extended: ExtendedResults {
                water_velocity: ensure_finite("water_velocity", extended.water_velocity)?,
                kinetic_energy: ensure_finite("kinetic_energy", extended.kinetic_energy)?,
                mass_flow_rate: ensure_finite("mass_flow_rate", extended.mass_flow_rate)?,
                abrasive_ratio: ensure_finite("abrasive_ratio", extended.abrasive_ratio)?,
                specific_energy: ensure_finite("specific_energy", extended.specific_energy)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialType;

    #[test]
    fn test_stage_values() {
        let input = CalculationInput::new(MaterialType::Titanium, 50.0, 200.0);
        let hydraulics = HydraulicStage::run(&input);
        assert_eq!(hydraulics.water_flow(), 2.11);
        assert_eq!(hydraulics.hydraulic_power(), 7.03);

        let stage = hydraulics.cutting_speed();
        assert_eq!(stage.speed().mm_per_min(), 191.7);
        assert_eq!(stage.cut_depth().unwrap(), 7547.51);
        assert_eq!(stage.surface_roughness(), 2.1);
        assert_eq!(stage.cost_per_meter(&CostRates::default()).unwrap().cents(), 6614);
    }

    #[test]
    fn test_stale_hydraulics_change_cost() {
        // Costing with water flow and power that were never computed gives a
        // different (wrong) number than the staged pipeline.
        let input = CalculationInput::new(MaterialType::Titanium, 50.0, 200.0);
        let staged = HydraulicStage::run(&input)
            .cutting_speed()
            .cost_per_meter(&CostRates::default())
            .unwrap();
        let stale = equations::cost_per_meter(8.0, 191.7, 0.0, 0.0, &CostRates::default()).unwrap();
        assert_ne!(staged, stale);
        assert_eq!(stale.cents(), 6260);
    }

    #[test]
    fn test_speed_stage_is_clamped() {
        let input = CalculationInput::new(MaterialType::Steel, 0.1, 600.0).with_abrasive_flow(20.0);
        let stage = HydraulicStage::run(&input).cutting_speed();
        assert_eq!(stage.speed().mm_per_min(), 5000.0);

        let input = CalculationInput::new(MaterialType::Titanium, 500.0, 100.0).with_abrasive_flow(1.0);
        let stage = HydraulicStage::run(&input).cutting_speed();
        assert_eq!(stage.speed().mm_per_min(), 2.0);
        assert!(stage.cut_depth().is_ok());
    }

    #[test]
    fn test_finish_matches_stages() {
        let input = CalculationInput::new(MaterialType::Steel, 50.0, 300.0);
        let stage = HydraulicStage::run(&input).cutting_speed();
        let depth = stage.cut_depth().unwrap();
        let result = stage.finish().unwrap();
        assert_eq!(result.cut_depth, depth);
        assert_eq!(result.water_flow, stage.hydraulics().water_flow());
    }
}
