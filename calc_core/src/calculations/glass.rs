//! # Glass Sizing
//!
//! Pane dimensions for the glazing infill of an opening.
//!
//! The pane is the opening reduced by the system's deductions, which
//! account for how far the frame and bead overlap the glass edge.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::glass::simple_glass;
//! use calc_core::opening::GlazingComposition;
//! use calc_core::system::SystemRules;
//!
//! let rules = SystemRules::with_deductions(100.0, 100.0);
//! let pane = simple_glass(1500.0, 1200.0, &rules, GlazingComposition::Simple);
//!
//! assert_eq!(pane.width_mm, 1400.0);
//! assert_eq!(pane.height_mm, 1100.0);
//! assert_eq!(pane.composition_label, "SIMPLE");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::geometry::{bounds, Polygon};
use crate::opening::GlazingComposition;
use crate::settings::{CalcSettings, DEFAULT_POLYGON_GLASS_MARGIN_MM};
use crate::system::SystemRules;
use crate::units::{Meters, Millimeters, SquareMeters};

/// Label used for panes sized from a bounding box
pub const APPROXIMATE_LABEL: &str = "APPROXIMATE (bounding box)";

/// Dimensioned glass required for one opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassResult {
    pub width_mm: f64,
    pub height_mm: f64,
    /// Panes per opening
    pub quantity: u32,
    /// "SIMPLE", "INSULATED" or the approximation label
    pub composition_label: String,
}

impl GlassResult {
    /// Total glass area over all panes
    pub fn area(&self) -> SquareMeters {
        let w: Meters = Millimeters(self.width_mm).into();
        let h: Meters = Millimeters(self.height_mm).into();
        SquareMeters::from_sides(w, h) * self.quantity as f64
    }

    /// Both dimensions strictly positive
    pub fn is_positive(&self) -> bool {
        self.width_mm > 0.0 && self.height_mm > 0.0
    }
}

/// Pane for a rectangular opening: opening minus deductions, one pane.
///
/// The sign of the result is not checked; use [`checked_simple_glass`]
/// when the inputs come from a user.
pub fn simple_glass(
    opening_width_mm: f64,
    opening_height_mm: f64,
    rules: &SystemRules,
    composition: GlazingComposition,
) -> GlassResult {
    let width_mm = opening_width_mm - rules.deduction_width_mm();
    let height_mm = opening_height_mm - rules.deduction_height_mm();
    debug!(width_mm, height_mm, composition = %composition, "sized pane");

    GlassResult {
        width_mm,
        height_mm,
        quantity: 1,
        composition_label: composition.label(),
    }
}

/// [`simple_glass`] with guards on the opening and on the deducted pane.
pub fn checked_simple_glass(
    opening_width_mm: f64,
    opening_height_mm: f64,
    rules: &SystemRules,
    composition: GlazingComposition,
) -> CalcResult<GlassResult> {
    ensure_positive("width_mm", opening_width_mm)?;
    ensure_positive("height_mm", opening_height_mm)?;

    let pane = simple_glass(opening_width_mm, opening_height_mm, rules, composition);
    if pane.width_mm <= 0.0 {
        return Err(CalcError::invalid_input(
            "deduction_width_mm",
            rules.deduction_width_mm().to_string(),
            format!("Deduction leaves no glass in a {} mm wide opening", opening_width_mm),
        ));
    }
    if pane.height_mm <= 0.0 {
        return Err(CalcError::invalid_input(
            "deduction_height_mm",
            rules.deduction_height_mm().to_string(),
            format!("Deduction leaves no glass in a {} mm high opening", opening_height_mm),
        ));
    }
    Ok(pane)
}

/// Approximate pane for an irregular opening.
///
/// Uses the bounding box less a flat 10 mm margin per dimension. This is
/// not a true irregular cut; the result is labelled as an approximation.
pub fn polygon_glass(polygon: &Polygon) -> GlassResult {
    polygon_glass_with_margin(polygon, DEFAULT_POLYGON_GLASS_MARGIN_MM)
}

/// [`polygon_glass`] with a caller-chosen margin.
pub fn polygon_glass_with_margin(polygon: &Polygon, margin_mm: f64) -> GlassResult {
    let b = bounds(polygon);
    debug!(
        points = polygon.points.len(),
        width = b.width,
        height = b.height,
        margin_mm,
        "approximating irregular pane"
    );

    GlassResult {
        width_mm: b.width - margin_mm,
        height_mm: b.height - margin_mm,
        quantity: 1,
        composition_label: APPROXIMATE_LABEL.to_string(),
    }
}

/// [`polygon_glass_with_margin`] using `settings.polygon_glass_margin_mm`,
/// rejecting a polygon too small to leave any glass inside the margin.
pub fn checked_polygon_glass(
    polygon: &Polygon,
    settings: &CalcSettings,
) -> CalcResult<GlassResult> {
    let pane = polygon_glass_with_margin(polygon, settings.polygon_glass_margin_mm);
    if !pane.is_positive() {
        let b = bounds(polygon);
        return Err(CalcError::invalid_input(
            "polygon",
            format!("{} x {} mm", b.width, b.height),
            format!(
                "Bounding box leaves no glass after a {} mm margin",
                settings.polygon_glass_margin_mm
            ),
        ));
    }
    Ok(pane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rectangle;

    fn invalid_field(err: CalcError) -> String {
        match err {
            CalcError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_deductions_applied() {
        let rules = SystemRules::new(45.0, 100.0, 100.0);
        let pane = simple_glass(1500.0, 1200.0, &rules, GlazingComposition::Simple);
        assert_eq!(pane.width_mm, 1400.0);
        assert_eq!(pane.height_mm, 1100.0);
        assert_eq!(pane.quantity, 1);
        assert_eq!(pane.composition_label, "SIMPLE");
    }

    #[test]
    fn test_missing_deductions_default_to_zero() {
        let rules = SystemRules::default();
        let pane = simple_glass(900.0, 700.0, &rules, GlazingComposition::Insulated);
        assert_eq!(pane.width_mm, 900.0);
        assert_eq!(pane.height_mm, 700.0);
        assert_eq!(pane.composition_label, "INSULATED");
    }

    #[test]
    fn test_unchecked_allows_negative() {
        let rules = SystemRules::with_deductions(600.0, 0.0);
        let pane = simple_glass(500.0, 700.0, &rules, GlazingComposition::Simple);
        assert_eq!(pane.width_mm, -100.0);
        assert!(!pane.is_positive());
    }

    #[test]
    fn test_checked_rejects_overdeduction() {
        let rules = SystemRules::with_deductions(500.0, 0.0);
        let err =
            checked_simple_glass(500.0, 700.0, &rules, GlazingComposition::Simple).unwrap_err();
        assert_eq!(invalid_field(err), "deduction_width_mm");

        let rules = SystemRules::with_deductions(0.0, 800.0);
        let err =
            checked_simple_glass(500.0, 700.0, &rules, GlazingComposition::Simple).unwrap_err();
        assert_eq!(invalid_field(err), "deduction_height_mm");
    }

    #[test]
    fn test_checked_rejects_bad_opening() {
        let rules = SystemRules::default();
        assert!(checked_simple_glass(-1.0, 700.0, &rules, GlazingComposition::Simple).is_err());
        assert!(checked_simple_glass(500.0, f64::NAN, &rules, GlazingComposition::Simple).is_err());
    }

    #[test]
    fn test_polygon_glass_margin() {
        let pane = polygon_glass(&rectangle(1000.0, 800.0));
        assert_eq!(pane.width_mm, 990.0);
        assert_eq!(pane.height_mm, 790.0);
        assert_eq!(pane.quantity, 1);
        assert_eq!(pane.composition_label, APPROXIMATE_LABEL);
    }

    #[test]
    fn test_polygon_glass_triangle() {
        let tri = Polygon::from(vec![(0.0, 0.0), (600.0, 0.0), (300.0, 400.0)]);
        let pane = polygon_glass_with_margin(&tri, 20.0);
        assert_eq!(pane.width_mm, 580.0);
        assert_eq!(pane.height_mm, 380.0);
    }

    #[test]
    fn test_checked_polygon_uses_settings_margin() {
        let settings = CalcSettings {
            polygon_glass_margin_mm: 25.0,
            ..CalcSettings::default()
        };
        let pane = checked_polygon_glass(&rectangle(1000.0, 800.0), &settings).unwrap();
        assert_eq!(pane.width_mm, 975.0);
        assert_eq!(pane.height_mm, 775.0);

        let frame = rectangle(1000.0, 800.0);
        let pane = checked_polygon_glass(&frame, &CalcSettings::default()).unwrap();
        assert_eq!(pane, polygon_glass(&frame));
    }

    #[test]
    fn test_checked_polygon_rejects_small_polygon() {
        let tiny = rectangle(8.0, 500.0);
        assert!(!polygon_glass(&tiny).is_positive());

        let err = checked_polygon_glass(&tiny, &CalcSettings::default()).unwrap_err();
        assert_eq!(invalid_field(err), "polygon");
        assert!(checked_polygon_glass(&Polygon::default(), &CalcSettings::default()).is_err());
    }

    #[test]
    fn test_area() {
        let rules = SystemRules::with_deductions(100.0, 100.0);
        let pane = simple_glass(1500.0, 1200.0, &rules, GlazingComposition::Simple);
        assert!((pane.area().0 - 1.54).abs() < 1e-9);
    }
}
