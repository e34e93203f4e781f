//! # awj_core - Abrasive Water-Jet Cutting Calculation Engine
//!
//! `awj_core` computes abrasive water-jet cutting parameters (water flow,
//! hydraulic power, cutting speed, cut depth, surface roughness and cost per
//! meter) from an empirical model, and searches a pressure / abrasive-flow grid
//! for the fastest or cheapest settings. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Ordered by type**: Pipeline stages can only be built in dependency order
//!
//! ## Quick Start
//!
//! ```rust
//! use awj_core::{perform_full_calculation, CalculationInput, MaterialType};
//!
//! let input = CalculationInput::new(MaterialType::Titanium, 50.0, 200.0);
//! input.validate().unwrap();
//!
//! let result = perform_full_calculation(&input).unwrap();
//! assert_eq!(result.cutting_speed, 191.7);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Input/result types, typed pipeline, batch comparison
//! - [`equations`] - Individual empirical formulas
//! - [`optimization`] - Grid search for maximum speed or minimum cost
//! - [`materials`] - Material property table and abrasive mesh catalog
//! - [`settings`] - Unit prices and defaults, loadable from TOML
//! - [`record`] - Timestamped calculation records
//! - [`units`] - Type-safe unit wrappers and fixed-point currency
//! - [`errors`] - Structured error types
//! - [`file_io`] - Reading inputs from disk

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod optimization;
pub mod record;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{perform_full_calculation, CalculationInput, CalculationResult};
pub use errors::{CalcError, CalcResult};
pub use materials::{MaterialProperties, MaterialType};
pub use optimization::{optimize, OptimizationOutcome, OptimizationRequest, OptimizationTarget};
pub use record::CalculationRecord;
pub use settings::{CostRates, CostRatesOverride, EngineSettings};
pub use units::Currency;
