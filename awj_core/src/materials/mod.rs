//! # Materials Database
//!
//! Workpiece material definitions for AWJ cutting, plus the abrasive mesh
//! catalog.
//!
//! The property table is built once, on first use, and is read-only for the
//! rest of the process. Lookups by identifier never fail: an identifier that is
//! not in the table resolves to steel, which is the documented default for the
//! engine.
//!
//! ## Example
//!
//! ```rust
//! use awj_core::materials::{MaterialProperties, MaterialType};
//!
//! let props = MaterialType::Aluminum.properties();
//! assert_eq!(props.k_factor, 1.3);
//!
//! // Unknown identifiers fall back to steel
//! let fallback = MaterialProperties::lookup("unobtainium");
//! assert_eq!(fallback, MaterialType::Steel.properties());
//! ```

pub mod abrasive;

pub use abrasive::{MeshSize, MESH_SIZES};

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Workpiece material types with built-in cutting properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MaterialType {
    #[default]
    Steel,
    Aluminum,
    Titanium,
    Granite,
    Glass,
    Ceramic,
    Composite,
}

impl MaterialType {
    /// All material variants for listing and iteration
    pub const ALL: [MaterialType; 7] = [
        MaterialType::Steel,
        MaterialType::Aluminum,
        MaterialType::Titanium,
        MaterialType::Granite,
        MaterialType::Glass,
        MaterialType::Ceramic,
        MaterialType::Composite,
    ];

    /// Identifier used as the table key and in JSON (e.g. "steel")
    pub fn key(&self) -> &'static str {
        match self {
            MaterialType::Steel => "steel",
            MaterialType::Aluminum => "aluminum",
            MaterialType::Titanium => "titanium",
            MaterialType::Granite => "granite",
            MaterialType::Glass => "glass",
            MaterialType::Ceramic => "ceramic",
            MaterialType::Composite => "composite",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialType::Steel => "Steel",
            MaterialType::Aluminum => "Aluminum",
            MaterialType::Titanium => "Titanium",
            MaterialType::Granite => "Granite",
            MaterialType::Glass => "Glass",
            MaterialType::Ceramic => "Ceramic",
            MaterialType::Composite => "Composite",
        }
    }

    /// Parse from common string representations, `None` if unrecognized
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "steel" => Some(MaterialType::Steel),
            "aluminum" | "aluminium" | "al" => Some(MaterialType::Aluminum),
            "titanium" | "ti" => Some(MaterialType::Titanium),
            "granite" => Some(MaterialType::Granite),
            "glass" => Some(MaterialType::Glass),
            "ceramic" => Some(MaterialType::Ceramic),
            "composite" => Some(MaterialType::Composite),
            _ => None,
        }
    }

    /// Resolve an identifier, falling back to steel when it is unknown
    pub fn from_name(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_else(|| {
            tracing::warn!(material = s, "unknown material type, using steel properties");
            MaterialType::Steel
        })
    }

    /// Brittle materials are limited to 400 MPa by input validation
    pub fn is_brittle(&self) -> bool {
        matches!(self, MaterialType::Glass | MaterialType::Ceramic)
    }

    /// Get the cutting properties for this material
    pub fn properties(&self) -> &'static MaterialProperties {
        MaterialProperties::lookup(self.key())
    }
}

impl From<String> for MaterialType {
    fn from(s: String) -> Self {
        MaterialType::from_name(&s)
    }
}

impl From<&str> for MaterialType {
    fn from(s: &str) -> Self {
        MaterialType::from_name(s)
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Empirical cutting properties of a workpiece material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Dimensionless multiplier for the speed and depth models
    pub k_factor: f64,
    /// Density (kg/m³), informational only
    pub density: f64,
    /// Tensile strength σ (MPa)
    pub tensile_strength: f64,
    /// Dimensionless multiplier for the roughness model
    pub roughness_factor: f64,
}

impl MaterialProperties {
    const fn new(k_factor: f64, density: f64, tensile_strength: f64, roughness_factor: f64) -> Self {
        Self {
            k_factor,
            density,
            tensile_strength,
            roughness_factor,
        }
    }

    /// Look up properties by identifier. Unknown identifiers get steel.
    pub fn lookup(key: &str) -> &'static MaterialProperties {
        MATERIAL_TABLE.get(key).unwrap_or(&STEEL)
    }
}

static STEEL: MaterialProperties = MaterialProperties::new(1.0, 7850.0, 400.0, 1.0);

static MATERIAL_TABLE: Lazy<HashMap<&'static str, MaterialProperties>> = Lazy::new(|| {
    HashMap::from([
        ("steel", STEEL),
        ("aluminum", MaterialProperties::new(1.3, 2700.0, 200.0, 0.8)),
        ("titanium", MaterialProperties::new(0.7, 4500.0, 900.0, 1.2)),
        ("granite", MaterialProperties::new(0.5, 2700.0, 150.0, 2.0)),
        ("glass", MaterialProperties::new(0.6, 2500.0, 50.0, 0.5)),
        ("ceramic", MaterialProperties::new(0.55, 2400.0, 300.0, 1.5)),
        ("composite", MaterialProperties::new(0.9, 1600.0, 250.0, 1.1)),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_is_in_table() {
        for material in MaterialType::ALL {
            assert!(MATERIAL_TABLE.contains_key(material.key()), "{} missing", material);
        }
        assert_eq!(MATERIAL_TABLE.len(), MaterialType::ALL.len());
    }

    #[test]
    fn test_material_lookup() {
        let ti = MaterialType::Titanium.properties();
        assert_eq!(ti.k_factor, 0.7);
        assert_eq!(ti.tensile_strength, 900.0);
        assert_eq!(ti.roughness_factor, 1.2);
        assert_eq!(MaterialType::Glass.properties().tensile_strength, 50.0);
    }

    #[test]
    fn test_unknown_key_falls_back_to_steel() {
        assert_eq!(MaterialProperties::lookup("wood"), MaterialType::Steel.properties());
        assert_eq!(MaterialProperties::lookup(""), &STEEL);
    }

    #[test]
    fn test_material_parsing() {
        assert_eq!(MaterialType::from_str_flexible("Aluminium"), Some(MaterialType::Aluminum));
        assert_eq!(MaterialType::from_str_flexible(" GLASS "), Some(MaterialType::Glass));
        assert_eq!(MaterialType::from_str_flexible("wood"), None);
        assert_eq!(MaterialType::from_name("wood"), MaterialType::Steel);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&MaterialType::Composite).unwrap();
        assert_eq!(json, "\"composite\"");
        let parsed: MaterialType = serde_json::from_str("\"granite\"").unwrap();
        assert_eq!(parsed, MaterialType::Granite);
    }

    #[test]
    fn test_unknown_json_material_is_steel() {
        let parsed: MaterialType = serde_json::from_str("\"marble\"").unwrap();
        assert_eq!(parsed, MaterialType::Steel);
    }

    #[test]
    fn test_brittle_materials() {
        assert!(MaterialType::Glass.is_brittle());
        assert!(MaterialType::Ceramic.is_brittle());
        assert!(!MaterialType::Granite.is_brittle());
    }
}
