//! # Batch Comparison
//!
//! Computes a base parameter set plus a list of variations, where each
//! variation overrides some fields of the base. Useful for side-by-side
//! comparison of, say, three abrasive flows at the same pressure.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "base_parameters": { "material_type": "steel", "thickness": 20.0, "pressure": 300.0 },
//!   "variations": [
//!     { "abrasive_flow": 6.0 },
//!     { "abrasive_flow": 10.0, "pressure": 350.0 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{perform_full_calculation, CalculationInput, CalculationResult};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialType;
use crate::settings::CostRatesOverride;

/// Most variations accepted in one request
pub const MAX_VARIATIONS: usize = 50;

/// Field overrides applied on top of the base parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterVariation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<MaterialType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nozzle_diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abrasive_flow: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Individual prices; unset ones keep the base input's effective rate
    pub cost_rates: Option<CostRatesOverride>,
}

impl ParameterVariation {
    /// Merge this variation over `base`
    pub fn apply(&self, base: &CalculationInput) -> CalculationInput {
        CalculationInput {
            material_type: self.material_type.unwrap_or(base.material_type),
            thickness: self.thickness.unwrap_or(base.thickness),
            pressure: self.pressure.unwrap_or(base.pressure),
            nozzle_diameter: self.nozzle_diameter.unwrap_or(base.nozzle_diameter),
            focus_diameter: self.focus_diameter.unwrap_or(base.focus_diameter),
            focus_length: self.focus_length.unwrap_or(base.focus_length),
            abrasive_flow: self.abrasive_flow.unwrap_or(base.abrasive_flow),
            mesh_size: self.mesh_size.unwrap_or(base.mesh_size),
            cost_rates: match &self.cost_rates {
                Some(prices) => Some(prices.apply(&base.rates())),
                None => base.cost_rates,
            },
        }
    }
}

/// Base parameters plus variations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub base_parameters: CalculationInput,
    pub variations: Vec<ParameterVariation>,
}

/// One computed entry of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVariant {
    /// "base" or "variation_N" (1-based)
    pub variant: String,
    /// Effective parameters after merging
    pub parameters: CalculationInput,
    pub results: CalculationResult,
}

/// All entries of a batch, base first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_variants: usize,
    pub results: Vec<BatchVariant>,
}

/// Validate and compute the base and every variation.
///
/// Fails on the first invalid variation; nothing is returned partially.
pub fn run_batch(request: &BatchRequest) -> CalcResult<BatchReport> {
    let count = request.variations.len();
    if count == 0 {
        return Err(CalcError::batch("At least one variation is required"));
    }
    if count > MAX_VARIATIONS {
        return Err(CalcError::batch(format!(
            "{} variations given, at most {} allowed",
            count, MAX_VARIATIONS
        )));
    }

    let base = &request.base_parameters;
    base.validate()?;

    let mut results = Vec::with_capacity(count + 1);
    results.push(BatchVariant {
        variant: "base".to_string(),
        parameters: base.clone(),
        results: perform_full_calculation(base)?,
    });

    for (i, variation) in request.variations.iter().enumerate() {
        let label = format!("variation_{}", i + 1);
        let parameters = variation.apply(base);
        parameters.validate().map_err(|e| {
            tracing::debug!(variant = %label, error = %e, "batch variation rejected");
            e
        })?;
        let outcome = perform_full_calculation(&parameters)?;
        results.push(BatchVariant {
            variant: label,
            parameters,
            results: outcome,
        });
    }

    tracing::info!(total_variants = results.len(), "batch calculation finished");
    Ok(BatchReport {
        total_variants: results.len(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(variations: Vec<ParameterVariation>) -> BatchRequest {
        BatchRequest {
            base_parameters: CalculationInput::new(MaterialType::Steel, 50.0, 300.0),
            variations,
        }
    }

    #[test]
    fn test_variation_merge() {
        let base = CalculationInput::new(MaterialType::Steel, 50.0, 300.0);
        let variation = ParameterVariation {
            abrasive_flow: Some(12.0),
            material_type: Some(MaterialType::Aluminum),
            ..Default::default()
        };
        let merged = variation.apply(&base);
        assert_eq!(merged.abrasive_flow, 12.0);
        assert_eq!(merged.material_type, MaterialType::Aluminum);
        assert_eq!(merged.thickness, 50.0);
        assert_eq!(merged.nozzle_diameter, base.nozzle_diameter);
    }

    #[test]
    fn test_batch_labels_and_order() {
        let report = run_batch(&request(vec![
            ParameterVariation {
                abrasive_flow: Some(6.0),
                ..Default::default()
            },
            ParameterVariation {
                thickness: Some(100.0),
                ..Default::default()
            },
        ]))
        .unwrap();

        assert_eq!(report.total_variants, 3);
        let labels: Vec<&str> = report.results.iter().map(|v| v.variant.as_str()).collect();
        assert_eq!(labels, ["base", "variation_1", "variation_2"]);
        assert_eq!(report.results[0].results.cutting_speed, 754.8);
        assert!(report.results[2].results.cutting_speed < report.results[0].results.cutting_speed);
    }

    #[test]
    fn test_batch_requires_variations() {
        let err = run_batch(&request(vec![])).unwrap_err();
        assert_eq!(err.error_code(), "BATCH_ERROR");
    }

    #[test]
    fn test_batch_limit() {
        let ok = run_batch(&request(vec![ParameterVariation::default(); MAX_VARIATIONS]));
        assert_eq!(ok.unwrap().total_variants, MAX_VARIATIONS + 1);

        let err = run_batch(&request(vec![ParameterVariation::default(); MAX_VARIATIONS + 1])).unwrap_err();
        assert_eq!(err.error_code(), "BATCH_ERROR");
    }

    #[test]
    fn test_batch_rejects_invalid_variation() {
        let err = run_batch(&request(vec![ParameterVariation {
            pressure: Some(900.0),
            ..Default::default()
        }]))
        .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "pressure"));
    }

    #[test]
    fn test_batch_json() {
        let json = r#"{
            "base_parameters": { "material_type": "aluminum", "thickness": 20.0, "pressure": 400.0 },
            "variations": [ { "abrasive_flow": 10.0, "mesh_size": 120, "nozzle_diameter": 0.3 } ]
        }"#;
        let request: BatchRequest = serde_json::from_str(json).unwrap();
        let report = run_batch(&request).unwrap();
        let variant = &report.results[1];
        assert_eq!(variant.results.water_flow, 2.47);
        assert_eq!(variant.results.surface_roughness, 3.15);
        assert_eq!(variant.results.cost_per_meter.cents(), 327);
    }

    #[test]
    fn test_partial_price_override_keeps_base_prices() {
        let json = r#"{
            "base_parameters": {
                "material_type": "steel", "thickness": 20.0, "pressure": 300.0,
                "cost_rates": { "water_cost_per_m3": 500.0 }
            },
            "variations": [ { "cost_rates": { "abrasive_cost_per_kg": 30.0 } } ]
        }"#;
        let request: BatchRequest = serde_json::from_str(json).unwrap();
        let report = run_batch(&request).unwrap();

        let rates = report.results[1].parameters.rates();
        assert_eq!(rates.abrasive_cost_per_kg, 30.0);
        assert_eq!(rates.water_cost_per_m3, 500.0);
        assert_eq!(rates.power_cost_per_kwh, 4.0);
        assert!(report.results[1].results.cost_per_meter > report.results[0].results.cost_per_meter);
    }

    #[test]
    fn test_unknown_variation_field_rejected() {
        let json = r#"{ "speed": 100.0 }"#;
        assert!(serde_json::from_str::<ParameterVariation>(json).is_err());
    }
}
