//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the jet and cost formulas.
//! These are plain `f64` newtypes with `From` conversions, so a formula can say
//! `let d: Meters = Millimeters(0.33).into();` instead of sprinkling `/ 1000.0`.
//!
//! ## Units
//!
//! - Length: millimeters (mm), meters (m)
//! - Pressure: megapascals (MPa), pascals (Pa)
//! - Flow: liters per minute (l/min), cubic meters per second (m³/s)
//! - Power: kilowatts (kW), watts (W)
//! - Money: [`Currency`], fixed-point with two decimal places
//!
//! ## Example
//!
//! ```rust
//! use awj_core::units::{Currency, MegaPascals, Pascals};
//!
//! let p: Pascals = MegaPascals(300.0).into();
//! assert_eq!(p.0, 300.0e6);
//!
//! let cost = Currency::from_f64(17.384).unwrap();
//! assert_eq!(cost.to_string(), "17.38");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Add;

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

/// Pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

impl From<MegaPascals> for Pascals {
    fn from(mpa: MegaPascals) -> Self {
        Pascals(mpa.0 * 1.0e6)
    }
}

impl From<Pascals> for MegaPascals {
    fn from(pa: Pascals) -> Self {
        MegaPascals(pa.0 / 1.0e6)
    }
}

// ============================================================================
// Flow Units
// ============================================================================

/// Volumetric flow in liters per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerMinute(pub f64);

/// Volumetric flow in cubic meters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl From<CubicMetersPerSecond> for LitersPerMinute {
    fn from(q: CubicMetersPerSecond) -> Self {
        LitersPerMinute(q.0 * 1000.0 * 60.0)
    }
}

impl From<LitersPerMinute> for CubicMetersPerSecond {
    fn from(q: LitersPerMinute) -> Self {
        CubicMetersPerSecond(q.0 / (1000.0 * 60.0))
    }
}

// ============================================================================
// Power Units
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

// ============================================================================
// Currency
// ============================================================================

/// Money amount stored as an integer count of hundredths.
///
/// Cost totals are rounded once, when converted from the floating-point
/// formula, and compared exactly afterwards. Serializes as a plain JSON number
/// with at most two decimals (`17.38`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Currency {
    cents: i64,
}

impl Currency {
    /// Zero amount
    pub const ZERO: Currency = Currency { cents: 0 };

    /// Build from an exact number of hundredths.
    pub const fn from_cents(cents: i64) -> Self {
        Currency { cents }
    }

    /// Round a floating-point amount to two decimals.
    ///
    /// Fails for NaN, infinities and amounts outside the `i64` cent range.
    pub fn from_f64(amount: f64) -> CalcResult<Self> {
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(CalcError::non_finite("cost_per_meter"));
        }
        Ok(Currency { cents: cents as i64 })
    }

    /// Amount in hundredths
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Amount as a float, for display and JSON
    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Currency) -> Currency {
        Currency {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Currency::from_f64(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let m: Meters = Millimeters(0.33).into();
        assert!((m.0 - 0.00033).abs() < 1e-15);
        let mm: Millimeters = Meters(1.5).into();
        assert_eq!(mm.0, 1500.0);
    }

    #[test]
    fn test_pressure_conversion() {
        let pa: Pascals = MegaPascals(300.0).into();
        assert_eq!(pa.0, 3.0e8);
    }

    #[test]
    fn test_flow_conversion() {
        let lpm: LitersPerMinute = CubicMetersPerSecond(0.001).into();
        assert!((lpm.0 - 60.0).abs() < 1e-12);
        let q: CubicMetersPerSecond = LitersPerMinute(60.0).into();
        assert!((q.0 - 0.001).abs() < 1e-15);
    }

    #[test]
    fn test_power_conversion() {
        let kw: Kilowatts = Watts(12_900.0).into();
        assert_eq!(kw.0, 12.9);
    }

    #[test]
    fn test_currency_rounding() {
        assert_eq!(Currency::from_f64(17.384).unwrap().cents(), 1738);
        assert_eq!(Currency::from_f64(17.386).unwrap().cents(), 1739);
        assert_eq!(Currency::from_f64(0.0).unwrap(), Currency::ZERO);
    }

    #[test]
    fn test_currency_rejects_non_finite() {
        assert!(Currency::from_f64(f64::INFINITY).is_err());
        assert!(Currency::from_f64(f64::NAN).is_err());
        assert!(Currency::from_f64(1.0e300).is_err());
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::from_cents(1738).to_string(), "17.38");
        assert_eq!(Currency::from_cents(5).to_string(), "0.05");
        assert_eq!(Currency::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_currency_ordering_and_sum() {
        let a = Currency::from_cents(166);
        let b = Currency::from_cents(207);
        assert!(a < b);
        assert_eq!((a + b).cents(), 373);
    }

    #[test]
    fn test_currency_json() {
        let cost = Currency::from_cents(1738);
        let json = serde_json::to_string(&cost).unwrap();
        assert_eq!(json, "17.38");
        let roundtrip: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, cost);
    }
}
