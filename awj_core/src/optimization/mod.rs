//! # Parameter Optimization
//!
//! Exhaustive grid search over pump pressure and abrasive flow, either for the
//! highest cutting speed or for the lowest cost per meter above a minimum
//! speed. This is not a general-purpose optimizer: the grid density is fixed
//! and every cell is evaluated.
//!
//! ## Example
//!
//! ```rust
//! use awj_core::materials::MaterialType;
//! use awj_core::optimization::{optimize, OptimizationRequest, OptimizationTarget};
//!
//! let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MinCost);
//! let outcome = optimize(&request).unwrap();
//!
//! assert!(outcome.feasible);
//! let best = outcome.optimized_parameters.unwrap();
//! assert_eq!(best.pressure, 400.0);
//! ```

pub mod grid;
pub mod search;

pub use search::{
    optimize_for_cost, optimize_for_cost_with_rates, optimize_for_speed, OptimizedParameters, ParameterRange,
    COST_ABRASIVE_RANGE, COST_PRESSURE_RANGE, GRID_SAMPLES, SPEED_ABRASIVE_RANGE, SPEED_PRESSURE_RANGE,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialType;
use crate::settings::{validate_min_speed, EngineSettings};

/// Thickness assumed when a request leaves it out (mm)
pub const DEFAULT_THICKNESS: f64 = 10.0;

/// What an optimization run maximizes or minimizes
///
/// Deserialization accepts the same spellings as `FromStr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum OptimizationTarget {
    /// Highest cutting speed
    #[default]
    MaxSpeed,
    /// Lowest cost per meter at or above a minimum speed
    MinCost,
}

impl OptimizationTarget {
    pub const ALL: [OptimizationTarget; 2] = [OptimizationTarget::MaxSpeed, OptimizationTarget::MinCost];

    /// Wire identifier ("max_speed", "min_cost")
    pub fn key(&self) -> &'static str {
        match self {
            OptimizationTarget::MaxSpeed => "max_speed",
            OptimizationTarget::MinCost => "min_cost",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OptimizationTarget::MaxSpeed => "Maximum speed",
            OptimizationTarget::MinCost => "Minimum cost",
        }
    }
}

impl fmt::Display for OptimizationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for OptimizationTarget {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "max_speed" => Ok(OptimizationTarget::MaxSpeed),
            "min_cost" => Ok(OptimizationTarget::MinCost),
            _ => Err(CalcError::invalid_target(s)),
        }
    }
}

impl TryFrom<String> for OptimizationTarget {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Optimization request as received from a caller
///
/// Missing fields default to steel, 10 mm and `max_speed`.
///
/// ## JSON Example
///
/// ```json
/// { "material_type": "titanium", "thickness": 50.0, "target": "min_cost", "min_speed": 80.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RequestDocument")]
pub struct OptimizationRequest {
    pub material_type: MaterialType,

    /// Workpiece thickness (mm)
    pub thickness: f64,

    pub target: OptimizationTarget,

    /// Minimum acceptable speed for `min_cost` (mm/min); ignored for `max_speed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_speed: Option<f64>,
}

/// Wire shape of a request, before the target is parsed
#[derive(Deserialize)]
struct RequestDocument {
    #[serde(default)]
    material_type: MaterialType,
    #[serde(default = "default_thickness")]
    thickness: f64,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    min_speed: Option<f64>,
}

fn default_thickness() -> f64 {
    DEFAULT_THICKNESS
}

impl TryFrom<RequestDocument> for OptimizationRequest {
    type Error = CalcError;

    fn try_from(doc: RequestDocument) -> Result<Self, Self::Error> {
        let target = match doc.target {
            Some(target) => target.parse()?,
            None => OptimizationTarget::default(),
        };
        Ok(OptimizationRequest {
            material_type: doc.material_type,
            thickness: doc.thickness,
            target,
            min_speed: doc.min_speed,
        })
    }
}

impl OptimizationRequest {
    /// Parse a JSON request. An unknown target is `InvalidTarget`, the same
    /// error `FromStr` gives, rather than a serialization error.
    pub fn from_json(text: &str) -> CalcResult<Self> {
        let doc: RequestDocument = serde_json::from_str(text)?;
        OptimizationRequest::try_from(doc)
    }

    pub fn new(material_type: MaterialType, thickness: f64, target: OptimizationTarget) -> Self {
        OptimizationRequest {
            material_type,
            thickness,
            target,
            min_speed: None,
        }
    }

    pub fn with_min_speed(mut self, min_speed: f64) -> Self {
        self.min_speed = Some(min_speed);
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 || self.thickness > 500.0 {
            return Err(CalcError::invalid_input(
                "thickness",
                self.thickness.to_string(),
                "Thickness must be in (0, 500] mm",
            ));
        }
        if let Some(min_speed) = self.min_speed {
            validate_min_speed("min_speed", min_speed)?;
        }
        Ok(())
    }
}

/// Result of an optimization request.
///
/// `feasible == false` means no grid cell met the constraints; it is never
/// reported as a zero-cost answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub target: OptimizationTarget,
    pub material_type: MaterialType,
    pub thickness: f64,
    pub optimized_parameters: Option<OptimizedParameters>,
    pub feasible: bool,
}

/// Run a request with the default settings.
pub fn optimize(request: &OptimizationRequest) -> CalcResult<OptimizationOutcome> {
    optimize_with_settings(request, &EngineSettings::default())
}

/// Run a request; settings supply the unit prices and the default minimum speed.
pub fn optimize_with_settings(request: &OptimizationRequest, settings: &EngineSettings) -> CalcResult<OptimizationOutcome> {
    request.validate()?;

    let best = match request.target {
        OptimizationTarget::MaxSpeed => optimize_for_speed(
            request.material_type,
            request.thickness,
            SPEED_PRESSURE_RANGE,
            SPEED_ABRASIVE_RANGE,
        )?,
        OptimizationTarget::MinCost => {
            let min_speed = match request.min_speed {
                Some(min_speed) => min_speed,
                None => {
                    settings.optimization.validate()?;
                    settings.optimization.default_min_speed
                }
            };
            optimize_for_cost_with_rates(request.material_type, request.thickness, min_speed, &settings.cost_rates)?
        }
    };

    let feasible = best.is_some();
    if feasible {
        tracing::info!(objective = request.target.key(), material = request.material_type.key(), "optimization finished");
    } else {
        tracing::info!(
            objective = request.target.key(),
            material = request.material_type.key(),
            "optimization found no feasible parameters"
        );
    }

    Ok(OptimizationOutcome {
        target: request.target,
        material_type: request.material_type,
        thickness: request.thickness,
        optimized_parameters: best,
        feasible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parsing() {
        assert_eq!("max_speed".parse::<OptimizationTarget>().unwrap(), OptimizationTarget::MaxSpeed);
        assert_eq!("MIN-COST".parse::<OptimizationTarget>().unwrap(), OptimizationTarget::MinCost);

        let err = "fastest".parse::<OptimizationTarget>().unwrap_err();
        assert_eq!(err, CalcError::invalid_target("fastest"));
        assert_eq!(err.error_code(), "INVALID_TARGET");
    }

    #[test]
    fn test_target_serde() {
        for target in OptimizationTarget::ALL {
            let json = serde_json::to_string(&target).unwrap();
            assert_eq!(json, format!("\"{}\"", target.key()));
        }
        assert!(serde_json::from_str::<OptimizationTarget>("\"cheapest\"").is_err());
        assert_eq!(
            serde_json::from_str::<OptimizationTarget>("\"Min-Cost\"").unwrap(),
            OptimizationTarget::MinCost
        );
    }

    #[test]
    fn test_unknown_target_in_json() {
        let err = OptimizationRequest::from_json(r#"{ "thickness": 10.0, "target": "fastest" }"#).unwrap_err();
        assert_eq!(err, CalcError::invalid_target("fastest"));
        assert_eq!(err.error_code(), "INVALID_TARGET");

        // Malformed JSON is still a serialization error
        let err = OptimizationRequest::from_json("{ \"thickness\": ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_request_defaults() {
        let request = OptimizationRequest::from_json("{}").unwrap();
        assert_eq!(request.material_type, MaterialType::Steel);
        assert_eq!(request.thickness, DEFAULT_THICKNESS);
        assert_eq!(request.target, OptimizationTarget::MaxSpeed);
        assert!(request.min_speed.is_none());

        let request: OptimizationRequest = serde_json::from_str(r#"{ "target": "min_cost" }"#).unwrap();
        assert_eq!(request.thickness, 10.0);
        assert_eq!(request.target, OptimizationTarget::MinCost);
    }

    #[test]
    fn test_request_json() {
        let json = r#"{ "material_type": "titanium", "thickness": 50.0, "target": "min_cost" }"#;
        let request: OptimizationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.material_type, MaterialType::Titanium);
        assert!(request.min_speed.is_none());

        let outcome = optimize(&request).unwrap();
        let best = outcome.optimized_parameters.unwrap();
        assert_eq!((best.pressure, best.abrasive_flow), (400.0, 4.0));
        assert_eq!(best.expected_cost.map(|c| c.cents()), Some(2447));
        assert_eq!(best.expected_speed, 311.5);
    }

    #[test]
    fn test_infeasible_outcome() {
        let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MinCost).with_min_speed(10_000.0);
        let outcome = optimize(&request).unwrap();
        assert!(!outcome.feasible);
        assert!(outcome.optimized_parameters.is_none());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["feasible"], serde_json::json!(false));
        assert!(json["optimized_parameters"].is_null());
    }

    #[test]
    fn test_settings_min_speed_used() {
        let mut settings = EngineSettings::default();
        settings.optimization.default_min_speed = 10_000.0;
        let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MinCost);
        assert!(!optimize_with_settings(&request, &settings).unwrap().feasible);

        // An explicit minimum wins over the configured default
        let request = request.with_min_speed(50.0);
        assert!(optimize_with_settings(&request, &settings).unwrap().feasible);
    }

    #[test]
    fn test_settings_min_speed_rejected_when_not_a_number() {
        let mut settings = EngineSettings::default();
        settings.optimization.default_min_speed = f64::NAN;
        let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MinCost);
        let err = optimize_with_settings(&request, &settings).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "default_min_speed"));

        settings.optimization.default_min_speed = -1.0;
        assert!(optimize_with_settings(&request, &settings).is_err());

        // max_speed has no speed floor to check
        let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MaxSpeed);
        assert!(optimize_with_settings(&request, &settings).unwrap().feasible);
    }

    #[test]
    fn test_request_validation() {
        let request = OptimizationRequest::new(MaterialType::Steel, 0.0, OptimizationTarget::MaxSpeed);
        assert!(optimize(&request).is_err());

        let request = OptimizationRequest::new(MaterialType::Steel, 10.0, OptimizationTarget::MinCost).with_min_speed(f64::NAN);
        assert!(optimize(&request).is_err());
    }
}
