//! # File Input
//!
//! Reading calculation inputs, batch requests and settings from disk. The
//! engine itself never touches the filesystem; these helpers exist for front
//! ends that accept file arguments.
//!
//! ## Example
//!
//! ```rust,no_run
//! use awj_core::calculations::CalculationInput;
//! use awj_core::file_io::load_json;
//! use std::path::Path;
//!
//! let input: CalculationInput = load_json(Path::new("cut.json")).unwrap();
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{CalcError, CalcResult};

/// Read a whole file as UTF-8 text
pub fn read_text(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_text(path)?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}
