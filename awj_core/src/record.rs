//! # Calculation Records
//!
//! A finished calculation bundled with an identity and a timestamp, ready for
//! a caller to store or send. This crate never persists records itself.
//!
//! ```text
//! CalculationRecord
//! ├── id: Uuid
//! ├── created_at: DateTime<Utc>
//! ├── input: CalculationInput
//! ├── result: CalculationResult
//! └── calculation_time_ms
//! ```
//!
//! ## Example
//!
//! ```rust
//! use awj_core::calculations::CalculationInput;
//! use awj_core::materials::MaterialType;
//! use awj_core::record::CalculationRecord;
//!
//! let input = CalculationInput::new(MaterialType::Aluminum, 20.0, 350.0);
//! let record = CalculationRecord::compute(input).unwrap();
//!
//! let json = serde_json::to_string_pretty(&record).unwrap();
//! assert!(json.contains("\"calculation_time_ms\""));
//! ```

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{perform_full_calculation, CalculationInput, CalculationResult};
use crate::errors::CalcResult;

/// One computed calculation with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Unique identifier
    pub id: Uuid,

    /// When the calculation was run
    pub created_at: DateTime<Utc>,

    /// Parameters as given
    pub input: CalculationInput,

    /// Engine output
    pub result: CalculationResult,

    /// Wall-clock time spent in the engine (milliseconds)
    pub calculation_time_ms: f64,
}

impl CalculationRecord {
    /// Validate `input`, run the full calculation and wrap the result.
    pub fn compute(input: CalculationInput) -> CalcResult<Self> {
        input.validate()?;

        let started = Instant::now();
        let result = perform_full_calculation(&input)?;
        let calculation_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let record = CalculationRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            input,
            result,
            calculation_time_ms,
        };
        tracing::debug!(id = %record.id, calculation_time_ms, "calculation recorded");
        Ok(record)
    }
}
