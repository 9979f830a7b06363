//! # Manufacturing Systems
//!
//! A system is a manufacturer's profile line together with the rules the
//! calculators need: the corner joint angle and the glazing deductions.
//!
//! System records live in an external catalog where rule fields are often
//! absent. Every optional field has a documented default, exposed through
//! accessors so the fallback is visible at the call site.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "sys-a40",
//!   "name": "Modena A40",
//!   "frame_profile_code": "A40-FRAME",
//!   "rules": { "joint_angle_deg": 45.0, "deduction_width_mm": 100.0 }
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::cuts::is_butt_angle;
use crate::diagnostics::{Computed, Fallback};
use crate::settings::DEFAULT_JOINT_ANGLE_DEG;

/// Profile code used when a system does not name its frame profile
pub const DEFAULT_FRAME_PROFILE: &str = "FRAME_PROFILE";

/// Snapshot of system configurations keyed by system id.
///
/// Fetched once by the caller before a batch so that every unit in the
/// batch sees the same rules.
pub type SystemCatalog = HashMap<String, SystemConfig>;

/// Joint and deduction rules of a system. Absent fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemRules {
    /// Corner joint angle in degrees (default 45)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_angle_deg: Option<f64>,

    /// Amount removed from the opening width to size the pane (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduction_width_mm: Option<f64>,

    /// Amount removed from the opening height to size the pane (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduction_height_mm: Option<f64>,
}

impl SystemRules {
    /// Rules with every field explicitly set
    pub fn new(joint_angle_deg: f64, deduction_width_mm: f64, deduction_height_mm: f64) -> Self {
        SystemRules {
            joint_angle_deg: Some(joint_angle_deg),
            deduction_width_mm: Some(deduction_width_mm),
            deduction_height_mm: Some(deduction_height_mm),
        }
    }

    /// Rules with only glazing deductions set
    pub fn with_deductions(deduction_width_mm: f64, deduction_height_mm: f64) -> Self {
        SystemRules {
            joint_angle_deg: None,
            deduction_width_mm: Some(deduction_width_mm),
            deduction_height_mm: Some(deduction_height_mm),
        }
    }

    pub fn joint_angle_deg(&self) -> f64 {
        self.joint_angle_deg.unwrap_or(DEFAULT_JOINT_ANGLE_DEG)
    }

    /// Joint angle, falling back to a caller-chosen default
    pub fn joint_angle_or(&self, default_deg: f64) -> f64 {
        self.joint_angle_deg.unwrap_or(default_deg)
    }

    pub fn deduction_width_mm(&self) -> f64 {
        self.deduction_width_mm.unwrap_or(0.0)
    }

    pub fn deduction_height_mm(&self) -> f64 {
        self.deduction_height_mm.unwrap_or(0.0)
    }

    /// True for a 90° (butt) joint system
    ///
    /// Butt-jointed members physically need shortening by the profile face
    /// width. That correction is not applied by the cut calculator.
    pub fn is_butt_joint(&self) -> bool {
        is_butt_angle(self.joint_angle_deg())
    }
}

/// A named manufacturing line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Catalog identifier
    pub id: String,

    /// Display name (e.g., "Modena A40")
    pub name: String,

    /// Profile code of the frame members, used to look up prices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_profile_code: Option<String>,

    #[serde(default)]
    pub rules: SystemRules,
}

impl SystemConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        SystemConfig {
            id: id.into(),
            name: name.into(),
            frame_profile_code: None,
            rules: SystemRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: SystemRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_frame_profile(mut self, code: impl Into<String>) -> Self {
        self.frame_profile_code = Some(code.into());
        self
    }

    pub fn frame_profile_code(&self) -> &str {
        self.frame_profile_code.as_deref().unwrap_or(DEFAULT_FRAME_PROFILE)
    }
}

/// Look up a system in a catalog snapshot.
///
/// An unknown id resolves to a placeholder system with default rules (zero
/// deductions, 45° joints), reported as [`Fallback::UnknownSystem`].
pub fn resolve_system(catalog: &SystemCatalog, system_id: &str) -> Computed<SystemConfig> {
    match catalog.get(system_id) {
        Some(system) => Computed::clean(system.clone()),
        None => {
            warn!(system_id, "unknown system, using zero deductions");
            Computed::with_fallbacks(
                SystemConfig::new(system_id, system_id),
                vec![Fallback::UnknownSystem {
                    system_id: system_id.to_string(),
                }],
            )
        }
    }
}
