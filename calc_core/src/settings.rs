//! # Calculation Settings
//!
//! Tunables shared by every calculator. Callers normally use
//! [`CalcSettings::default`]; a job file can override individual fields
//! because every field has a serde default.

use serde::{Deserialize, Serialize};

/// Default joint angle for frame corners (degrees)
pub const DEFAULT_JOINT_ANGLE_DEG: f64 = 45.0;

/// Flat margin removed from each side of an irregular opening's bounding box (mm)
pub const DEFAULT_POLYGON_GLASS_MARGIN_MM: f64 = 10.0;

/// Settings that influence calculation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Joint angle used when a system does not specify one
    pub default_joint_angle_deg: f64,

    /// Margin subtracted from the bounding box of an irregular opening
    pub polygon_glass_margin_mm: f64,

    /// Decimal places used when presenting money (results are not rounded)
    pub money_decimals: u32,

    /// Turn unresolved catalog references into errors instead of
    /// degraded results
    pub strict_references: bool,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            default_joint_angle_deg: DEFAULT_JOINT_ANGLE_DEG,
            polygon_glass_margin_mm: DEFAULT_POLYGON_GLASS_MARGIN_MM,
            money_decimals: 2,
            strict_references: false,
        }
    }
}

impl CalcSettings {
    /// Settings with strict reference checking turned on
    pub fn strict() -> Self {
        CalcSettings {
            strict_references: true,
            ..Self::default()
        }
    }

    /// Format a money amount with the configured precision
    pub fn format_money(&self, amount: f64) -> String {
        format!("{:.*}", self.money_decimals as usize, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = CalcSettings::default();
        assert_eq!(s.default_joint_angle_deg, 45.0);
        assert_eq!(s.polygon_glass_margin_mm, 10.0);
        assert!(!s.strict_references);
    }

    #[test]
    fn test_partial_json() {
        let s: CalcSettings = serde_json::from_str(r#"{ "strict_references": true }"#).unwrap();
        assert!(s.strict_references);
        assert_eq!(s.polygon_glass_margin_mm, 10.0);
        assert_eq!(s.money_decimals, 2);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(CalcSettings::default().format_money(166.5), "166.50");
    }
}
