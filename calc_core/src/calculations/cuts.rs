//! # Frame Cut List
//!
//! Derives the structural profile cuts for a rectangular four-member frame.
//!
//! ## Assumptions
//!
//! - Rectangular frame only (no sashes, sills or glazing beads)
//! - One joint angle per system, applied at both ends of every member
//! - Member length equals the opening dimension, whatever the joint angle
//!
//! The last point is a known simplification. A 90° (butt) joint system
//! needs one pair of members shortened by the profile face width so the
//! corners meet square; that correction is not applied, so cut lengths for
//! butt-jointed systems are nominal rather than shop-ready.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::cuts::frame_cuts;
//! use calc_core::system::{SystemConfig, SystemRules};
//!
//! let system = SystemConfig::new("s1", "Basic").with_rules(SystemRules::new(45.0, 100.0, 100.0));
//! let cuts = frame_cuts(1500.0, 1200.0, &system);
//!
//! assert_eq!(cuts.len(), 2);
//! assert_eq!(cuts[0].length_mm, 1500.0);
//! assert_eq!(cuts[1].length_mm, 1200.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ensure_positive, CalcResult};
use crate::settings::CalcSettings;
use crate::system::SystemConfig;
use crate::units::{Meters, Millimeters};

/// Members per side pair of a rectangular frame
const MEMBERS_PER_PAIR: u32 = 2;

/// One line of a cut list: `quantity` identical profile pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutSpec {
    /// Profile code, also the key into the price table
    pub profile_code: String,

    /// Nominal piece length (mm)
    pub length_mm: f64,

    /// Joint angle at the start of the piece (degrees)
    pub angle_start_deg: f64,

    /// Joint angle at the end of the piece (degrees)
    pub angle_end_deg: f64,

    pub quantity: u32,

    /// Human-readable description (e.g., "Frame horizontal")
    pub label: String,
}

impl CutSpec {
    /// Combined length of all pieces on this line
    pub fn total_length(&self) -> Meters {
        Meters::from(Millimeters(self.length_mm)) * self.quantity as f64
    }
}

/// Frame cuts using the system's joint angle (45° when unset).
///
/// Returns exactly two entries: the horizontal pair (length = `width_mm`)
/// followed by the vertical pair (length = `height_mm`). Inputs are not
/// validated; see [`checked_frame_cuts`].
pub fn frame_cuts(width_mm: f64, height_mm: f64, system: &SystemConfig) -> Vec<CutSpec> {
    cuts_at_angle(width_mm, height_mm, system.frame_profile_code(), system.rules.joint_angle_deg())
}

/// Frame cuts with positive-dimension guards.
///
/// The joint angle falls back to `settings.default_joint_angle_deg` when
/// the system does not specify one.
pub fn checked_frame_cuts(
    width_mm: f64,
    height_mm: f64,
    system: &SystemConfig,
    settings: &CalcSettings,
) -> CalcResult<Vec<CutSpec>> {
    ensure_positive("width_mm", width_mm)?;
    ensure_positive("height_mm", height_mm)?;

    let angle = system.rules.joint_angle_or(settings.default_joint_angle_deg);
    if is_butt_angle(angle) {
        warn!(
            system = %system.id,
            "butt-joint system: member lengths are not shortened by the profile face width"
        );
    }
    Ok(cuts_at_angle(width_mm, height_mm, system.frame_profile_code(), angle))
}

/// True for a 90° joint, whose members need a face-width correction
pub(crate) fn is_butt_angle(angle_deg: f64) -> bool {
    (angle_deg - 90.0).abs() < f64::EPSILON
}

fn cuts_at_angle(
    width_mm: f64,
    height_mm: f64,
    profile_code: &str,
    angle_deg: f64,
) -> Vec<CutSpec> {
    debug!(width_mm, height_mm, profile_code, angle_deg, "computing frame cuts");

    vec![
        CutSpec {
            profile_code: profile_code.to_string(),
            length_mm: width_mm,
            angle_start_deg: angle_deg,
            angle_end_deg: angle_deg,
            quantity: MEMBERS_PER_PAIR,
            label: "Frame horizontal".to_string(),
        },
        CutSpec {
            profile_code: profile_code.to_string(),
            length_mm: height_mm,
            angle_start_deg: angle_deg,
            angle_end_deg: angle_deg,
            quantity: MEMBERS_PER_PAIR,
            label: "Frame vertical".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::SystemRules;

    fn test_system() -> SystemConfig {
        SystemConfig::new("s1", "Test").with_rules(SystemRules::new(45.0, 100.0, 100.0))
    }

    #[test]
    fn test_two_member_pairs() {
        let cuts = frame_cuts(1500.0, 1200.0, &test_system());
        assert_eq!(cuts.len(), 2);

        assert_eq!(cuts[0].length_mm, 1500.0);
        assert_eq!(cuts[0].quantity, 2);
        assert_eq!(cuts[1].length_mm, 1200.0);
        assert_eq!(cuts[1].quantity, 2);

        for cut in &cuts {
            assert_eq!(cut.angle_start_deg, 45.0);
            assert_eq!(cut.angle_end_deg, 45.0);
            assert_eq!(cut.profile_code, "FRAME_PROFILE");
        }
    }

    #[test]
    fn test_default_angle() {
        let system = SystemConfig::new("s2", "No rules");
        let cuts = frame_cuts(800.0, 600.0, &system);
        assert_eq!(cuts[0].angle_start_deg, 45.0);
    }

    #[test]
    fn test_butt_joint_lengths_uncorrected() {
        let system = SystemConfig::new("s3", "Butt").with_rules(SystemRules::new(90.0, 0.0, 0.0));
        let cuts = frame_cuts(1000.0, 2000.0, &system);
        assert_eq!(cuts[0].length_mm, 1000.0);
        assert_eq!(cuts[1].length_mm, 2000.0);
        assert_eq!(cuts[1].angle_end_deg, 90.0);
    }

    #[test]
    fn test_settings_angle_fallback() {
        let settings = CalcSettings {
            default_joint_angle_deg: 90.0,
            ..CalcSettings::default()
        };
        let bare = SystemConfig::new("s4", "Bare");
        let cuts = checked_frame_cuts(1000.0, 500.0, &bare, &settings).unwrap();
        assert_eq!(cuts[0].angle_start_deg, 90.0);
        assert!(is_butt_angle(cuts[0].angle_start_deg));
        // The system itself still reports its built-in 45° default
        assert!(!bare.rules.is_butt_joint());

        // A system angle wins over the settings default
        let cuts = checked_frame_cuts(1000.0, 500.0, &test_system(), &settings).unwrap();
        assert_eq!(cuts[0].angle_start_deg, 45.0);
    }

    #[test]
    fn test_checked_rejects_non_positive() {
        let settings = CalcSettings::default();
        assert!(checked_frame_cuts(0.0, 500.0, &test_system(), &settings).is_err());
        assert!(checked_frame_cuts(500.0, -1.0, &test_system(), &settings).is_err());
    }

    #[test]
    fn test_total_length() {
        let cuts = frame_cuts(1500.0, 1200.0, &test_system());
        let total: f64 = cuts.iter().map(|c| c.total_length().0).sum();
        assert!((total - 5.4).abs() < 1e-9);
    }
}
