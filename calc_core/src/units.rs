//! # Unit Types
//!
//! Newtype wrappers for the metric units the carpentry calculators move
//! between. Openings and cuts are dimensioned in millimeters, while prices
//! are quoted per meter, per kilogram and per square meter.
//!
//! The wrappers serialize as bare numbers, so JSON payloads stay plain.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Meters, Millimeters, SquareMeters};
//!
//! let width: Meters = Millimeters(1400.0).into();
//! let height: Meters = Millimeters(1100.0).into();
//! let area = SquareMeters::from_sides(width, height);
//! assert!((area.0 - 1.54).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Millimeters per meter
pub const MM_PER_M: f64 = 1000.0;

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
        Meters(mm.0 / MM_PER_M)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * MM_PER_M)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl SquareMeters {
    /// Area of a rectangle with the given sides
    pub fn from_sides(width: Meters, height: Meters) -> Self {
        SquareMeters(width.0 * height.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Linear mass of a profile in kilograms per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerMeter(pub f64);

impl Mul<Meters> for KgPerMeter {
    type Output = Kilograms;
    fn mul(self, rhs: Meters) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KgPerMeter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_m() {
        let m: Meters = Millimeters(1500.0).into();
        assert_eq!(m.0, 1.5);
        let back: Millimeters = m.into();
        assert_eq!(back.0, 1500.0);
    }

    #[test]
    fn test_weight_from_length() {
        let kg = KgPerMeter(1.2) * Meters(5.4);
        assert!((kg.0 - 6.48).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(1500.0);
        let b = Millimeters(100.0);
        assert_eq!((a - b).0, 1400.0);
        assert_eq!((a + b).0, 1600.0);
        assert_eq!((b * 2.0).0, 200.0);
        assert_eq!((a / 3.0).0, 500.0);
    }

    #[test]
    fn test_serialization() {
        let mm = Millimeters(12.5);
        let json = serde_json::to_string(&mm).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(mm, roundtrip);
    }
}
