//! # AWJ Calculations
//!
//! Input and result types for a full cutting calculation, following the
//! pattern:
//!
//! - [`CalculationInput`] - Input parameters (JSON-serializable)
//! - [`CalculationResult`] - Calculation results (JSON-serializable)
//! - [`perform_full_calculation`] - Pure calculation function
//!
//! The stages run in a fixed order (water flow, hydraulic power, cutting
//! speed, cut depth, surface roughness, cost). The order is carried by the
//! types in [`pipeline`]: a cutting speed can only be obtained from a finished
//! hydraulic stage, and depth, roughness and cost only from a speed stage.
//!
//! ## Example
//!
//! ```rust
//! use awj_core::calculations::{perform_full_calculation, CalculationInput};
//! use awj_core::materials::MaterialType;
//!
//! let input = CalculationInput::new(MaterialType::Steel, 50.0, 300.0);
//! let result = perform_full_calculation(&input).unwrap();
//!
//! assert_eq!(result.water_flow, 2.58);
//! assert_eq!(result.cutting_speed, 754.8);
//! assert_eq!(result.cost_per_meter.to_string(), "17.38");
//! ```

pub mod batch;
pub mod pipeline;

pub use batch::{run_batch, BatchReport, BatchRequest, BatchVariant, ParameterVariation, MAX_VARIATIONS};
pub use pipeline::{CuttingSpeed, HydraulicStage, SpeedStage};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::abrasive::DEFAULT_MESH;
use crate::materials::MaterialType;
use crate::settings::CostRates;
use crate::units::Currency;

/// Default orifice diameter (mm)
pub const DEFAULT_NOZZLE_DIAMETER: f64 = 0.33;
/// Default focus tube diameter (mm)
pub const DEFAULT_FOCUS_DIAMETER: f64 = 1.0;
/// Default focus tube length (mm)
pub const DEFAULT_FOCUS_LENGTH: f64 = 76.0;
/// Default abrasive mass flow (g/s)
pub const DEFAULT_ABRASIVE_FLOW: f64 = 8.0;

/// Highest pressure accepted for brittle materials (MPa)
pub const BRITTLE_MAX_PRESSURE: f64 = 400.0;

/// Input parameters for one AWJ calculation.
///
/// Only `thickness` and `pressure` are required in JSON; every other field
/// has a shop default.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material_type": "aluminum",
///   "thickness": 20.0,
///   "pressure": 400.0,
///   "nozzle_diameter": 0.3,
///   "focus_diameter": 1.0,
///   "focus_length": 76.0,
///   "abrasive_flow": 10.0,
///   "mesh_size": 120,
///   "cost_rates": { "abrasive_cost_per_kg": 30.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Workpiece material; unknown identifiers resolve to steel
    #[serde(default)]
    pub material_type: MaterialType,

    /// Workpiece thickness (mm)
    pub thickness: f64,

    /// Pump pressure (MPa)
    pub pressure: f64,

    /// Orifice diameter (mm)
    #[serde(default = "default_nozzle_diameter")]
    pub nozzle_diameter: f64,

    /// Focus tube diameter (mm)
    #[serde(default = "default_focus_diameter")]
    pub focus_diameter: f64,

    /// Focus tube length (mm). Carried for the record, not used by the formulas.
    #[serde(default = "default_focus_length")]
    pub focus_length: f64,

    /// Abrasive mass flow (g/s)
    #[serde(default = "default_abrasive_flow")]
    pub abrasive_flow: f64,

    /// Abrasive grit (mesh number)
    #[serde(default = "default_mesh_size")]
    pub mesh_size: u32,

    /// Price overrides; `None` means the default rates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_rates: Option<CostRates>,
}

fn default_nozzle_diameter() -> f64 {
    DEFAULT_NOZZLE_DIAMETER
}

fn default_focus_diameter() -> f64 {
    DEFAULT_FOCUS_DIAMETER
}

fn default_focus_length() -> f64 {
    DEFAULT_FOCUS_LENGTH
}

fn default_abrasive_flow() -> f64 {
    DEFAULT_ABRASIVE_FLOW
}

fn default_mesh_size() -> u32 {
    DEFAULT_MESH
}

impl CalculationInput {
    /// Create an input with default head geometry, abrasive and prices.
    pub fn new(material_type: MaterialType, thickness: f64, pressure: f64) -> Self {
        CalculationInput {
            material_type,
            thickness,
            pressure,
            nozzle_diameter: DEFAULT_NOZZLE_DIAMETER,
            focus_diameter: DEFAULT_FOCUS_DIAMETER,
            focus_length: DEFAULT_FOCUS_LENGTH,
            abrasive_flow: DEFAULT_ABRASIVE_FLOW,
            mesh_size: DEFAULT_MESH,
            cost_rates: None,
        }
    }

    /// Set orifice and focus tube diameters (mm)
    pub fn with_head(mut self, nozzle_diameter: f64, focus_diameter: f64) -> Self {
        self.nozzle_diameter = nozzle_diameter;
        self.focus_diameter = focus_diameter;
        self
    }

    /// Set abrasive mass flow (g/s)
    pub fn with_abrasive_flow(mut self, abrasive_flow: f64) -> Self {
        self.abrasive_flow = abrasive_flow;
        self
    }

    /// Set abrasive mesh size
    pub fn with_mesh_size(mut self, mesh_size: u32) -> Self {
        self.mesh_size = mesh_size;
        self
    }

    /// Override unit prices
    pub fn with_cost_rates(mut self, rates: CostRates) -> Self {
        self.cost_rates = Some(rates);
        self
    }

    /// Prices in effect for this input
    pub fn rates(&self) -> CostRates {
        self.cost_rates.unwrap_or_default()
    }

    /// Validate input parameters against the accepted operating envelope.
    ///
    /// The calculation itself does not call this; callers validate once at
    /// their boundary.
    pub fn validate(&self) -> CalcResult<()> {
        check_range("thickness", self.thickness, 0.0, 500.0, false, "Thickness must be in (0, 500] mm")?;
        check_range("pressure", self.pressure, 100.0, 600.0, true, "Pressure must be in [100, 600] MPa")?;
        check_range(
            "nozzle_diameter",
            self.nozzle_diameter,
            0.1,
            2.0,
            true,
            "Nozzle diameter must be in [0.1, 2.0] mm",
        )?;
        check_range(
            "focus_diameter",
            self.focus_diameter,
            0.5,
            2.0,
            true,
            "Focus diameter must be in [0.5, 2.0] mm",
        )?;
        check_range("focus_length", self.focus_length, 50.0, 150.0, true, "Focus length must be in [50, 150] mm")?;
        check_range("abrasive_flow", self.abrasive_flow, 1.0, 20.0, true, "Abrasive flow must be in [1, 20] g/s")?;

        if self.mesh_size == 0 {
            return Err(CalcError::invalid_input("mesh_size", "0", "Mesh size must be positive"));
        }
        if self.nozzle_diameter >= self.focus_diameter {
            return Err(CalcError::invalid_input(
                "focus_diameter",
                self.focus_diameter.to_string(),
                "Focus tube diameter must be larger than the nozzle diameter",
            ));
        }
        if self.material_type.is_brittle() && self.pressure > BRITTLE_MAX_PRESSURE {
            return Err(CalcError::invalid_input(
                "pressure",
                self.pressure.to_string(),
                format!("Brittle materials ({}) are limited to 400 MPa", self.material_type.key()),
            ));
        }
        if let Some(rates) = &self.cost_rates {
            rates.validate()?;
        }
        Ok(())
    }
}

/// Range check; the lower bound is exclusive unless `min_inclusive`.
fn check_range(field: &str, value: f64, min: f64, max: f64, min_inclusive: bool, reason: &str) -> CalcResult<()> {
    let above_min = if min_inclusive { value >= min } else { value > min };
    if value.is_finite() && above_min && value <= max {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

/// Informational values derived from the primary results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedResults {
    /// Ideal jet velocity (m/s)
    pub water_velocity: f64,
    /// Kinetic energy density of the ideal jet, ½·ρ·v²
    pub kinetic_energy: f64,
    /// Water mass flow (kg/s)
    pub mass_flow_rate: f64,
    /// Abrasive to water mass ratio
    pub abrasive_ratio: f64,
    /// Hydraulic energy per millimeter of cut (J/mm)
    pub specific_energy: f64,
}

/// Results of a full AWJ calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "water_flow": 2.58,
///   "hydraulic_power": 12.9,
///   "cutting_speed": 754.8,
///   "cut_depth": 9982.47,
///   "surface_roughness": 2.65,
///   "cost_per_meter": 17.38,
///   "extended": {
///     "water_velocity": 774.6,
///     "kinetic_energy": 300000000.0,
///     "mass_flow_rate": 0.043,
///     "abrasive_ratio": 0.186,
///     "specific_energy": 17.09
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Water flow (l/min)
    pub water_flow: f64,
    /// Hydraulic power (kW)
    pub hydraulic_power: f64,
    /// Cutting speed (mm/min), within [2, 5000]
    pub cutting_speed: f64,
    /// Maximum cut depth (mm)
    pub cut_depth: f64,
    /// Surface roughness Ra (μm), within [0.5, 20]
    pub surface_roughness: f64,
    /// Operating cost per meter of cut
    pub cost_per_meter: Currency,
    /// Derived diagnostics
    pub extended: ExtendedResults,
}

/// Run every stage for one input.
///
/// This is a pure function: the same input always produces the same result.
/// Input ranges are not re-validated here (see [`CalculationInput::validate`]),
/// but the result never contains NaN or infinities; such a value becomes a
/// `NonFiniteResult` error instead.
pub fn perform_full_calculation(input: &CalculationInput) -> CalcResult<CalculationResult> {
    tracing::debug!(
        material = input.material_type.key(),
        thickness = input.thickness,
        pressure = input.pressure,
        abrasive_flow = input.abrasive_flow,
        "running AWJ calculation"
    );

    let result = HydraulicStage::run(input).cutting_speed().finish()?;

    tracing::debug!(
        cutting_speed = result.cutting_speed,
        cost_per_meter = %result.cost_per_meter,
        "AWJ calculation finished"
    );
    Ok(result)
}
