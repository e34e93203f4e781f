//! # Engine Settings
//!
//! Unit prices and optimization defaults, loadable from TOML. Every key is
//! optional; missing keys take the built-in defaults.
//!
//! ```toml
//! [cost_rates]
//! abrasive_cost_per_kg = 25.0
//! water_cost_per_m3 = 100.0
//! power_cost_per_kwh = 4.0
//!
//! [optimization]
//! default_min_speed = 50.0
//! ```
//!
//! ## Example
//!
//! ```rust
//! use awj_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_toml_str("[cost_rates]\nabrasive_cost_per_kg = 32.5").unwrap();
//! assert_eq!(settings.cost_rates.abrasive_cost_per_kg, 32.5);
//! assert_eq!(settings.cost_rates.water_cost_per_m3, 100.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::file_io::read_text;

/// Default abrasive price (currency/kg)
pub const DEFAULT_ABRASIVE_COST_PER_KG: f64 = 25.0;
/// Default water price (currency/m³)
pub const DEFAULT_WATER_COST_PER_M3: f64 = 100.0;
/// Default electricity price (currency/kWh)
pub const DEFAULT_POWER_COST_PER_KWH: f64 = 4.0;
/// Default minimum acceptable speed for cost optimization (mm/min)
pub const DEFAULT_MIN_SPEED: f64 = 50.0;

/// Unit prices used by the cost model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    /// Abrasive price per kilogram
    #[serde(default = "default_abrasive_cost")]
    pub abrasive_cost_per_kg: f64,

    /// Water price per cubic meter
    #[serde(default = "default_water_cost")]
    pub water_cost_per_m3: f64,

    /// Electricity price per kilowatt-hour
    #[serde(default = "default_power_cost")]
    pub power_cost_per_kwh: f64,
}

fn default_abrasive_cost() -> f64 {
    DEFAULT_ABRASIVE_COST_PER_KG
}

fn default_water_cost() -> f64 {
    DEFAULT_WATER_COST_PER_M3
}

fn default_power_cost() -> f64 {
    DEFAULT_POWER_COST_PER_KWH
}

impl Default for CostRates {
    fn default() -> Self {
        CostRates {
            abrasive_cost_per_kg: DEFAULT_ABRASIVE_COST_PER_KG,
            water_cost_per_m3: DEFAULT_WATER_COST_PER_M3,
            power_cost_per_kwh: DEFAULT_POWER_COST_PER_KWH,
        }
    }
}

impl CostRates {
    /// Reject negative or non-finite prices.
    pub fn validate(&self) -> CalcResult<()> {
        let rates = [
            ("abrasive_cost_per_kg", self.abrasive_cost_per_kg),
            ("water_cost_per_m3", self.water_cost_per_m3),
            ("power_cost_per_kwh", self.power_cost_per_kwh),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Price must be a non-negative number"));
            }
        }
        Ok(())
    }
}

/// Per-price overrides merged onto a full set of rates
///
/// A missing key keeps the price it is merged onto, not the built-in default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostRatesOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abrasive_cost_per_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_cost_per_m3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_cost_per_kwh: Option<f64>,
}

impl CostRatesOverride {
    /// Replace only the prices this override sets
    pub fn apply(&self, base: &CostRates) -> CostRates {
        CostRates {
            abrasive_cost_per_kg: self.abrasive_cost_per_kg.unwrap_or(base.abrasive_cost_per_kg),
            water_cost_per_m3: self.water_cost_per_m3.unwrap_or(base.water_cost_per_m3),
            power_cost_per_kwh: self.power_cost_per_kwh.unwrap_or(base.power_cost_per_kwh),
        }
    }
}

/// Optimization defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSettings {
    /// Minimum speed (mm/min) used by min-cost searches when the request has none
    #[serde(default = "default_min_speed")]
    pub default_min_speed: f64,
}

fn default_min_speed() -> f64 {
    DEFAULT_MIN_SPEED
}

impl OptimizationSettings {
    /// Reject a minimum speed that would disable the speed constraint.
    pub fn validate(&self) -> CalcResult<()> {
        validate_min_speed("default_min_speed", self.default_min_speed)
    }
}

/// A minimum speed must be finite and non-negative; NaN would accept every cell.
pub fn validate_min_speed(field: &str, min_speed: f64) -> CalcResult<()> {
    if min_speed.is_finite() && min_speed >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            min_speed.to_string(),
            "Minimum speed must be a non-negative number",
        ))
    }
}

impl Default for OptimizationSettings {
    fn default() -> Self {
        OptimizationSettings {
            default_min_speed: DEFAULT_MIN_SPEED,
        }
    }
}

/// Top-level settings document
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub cost_rates: CostRates,

    #[serde(default)]
    pub optimization: OptimizationSettings,
}

impl EngineSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: EngineSettings = toml::from_str(text).map_err(|e| CalcError::config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check prices and optimization defaults
    pub fn validate(&self) -> CalcResult<()> {
        self.cost_rates.validate()?;
        self.optimization.validate()
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = read_text(path)?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded engine settings");
        Ok(settings)
    }

    /// Render as TOML, e.g. to write a starter config file
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::config(e.to_string()))
    }
}
