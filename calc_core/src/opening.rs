//! # Openings
//!
//! Input types describing a single window or door unit to be calculated.

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcError, CalcResult};

/// Opening style of a unit.
///
/// Informational only: no calculator changes its result based on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OpeningType {
    #[default]
    Fixed,
    Casement,
    Sliding,
    TiltAndTurn,
    Awning,
    Door,
}

impl OpeningType {
    pub const ALL: [OpeningType; 6] = [
        OpeningType::Fixed,
        OpeningType::Casement,
        OpeningType::Sliding,
        OpeningType::TiltAndTurn,
        OpeningType::Awning,
        OpeningType::Door,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            OpeningType::Fixed => "Fixed",
            OpeningType::Casement => "Casement",
            OpeningType::Sliding => "Sliding",
            OpeningType::TiltAndTurn => "Tilt & turn",
            OpeningType::Awning => "Awning",
            OpeningType::Door => "Door",
        }
    }
}

impl std::fmt::Display for OpeningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Glazing build-up of a pane.
///
/// An insulated unit (DVH) is treated as a single pane here; its outer and
/// inner panes and spacer are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlazingComposition {
    #[default]
    Simple,
    Insulated,
}

impl GlazingComposition {
    /// Lowercase tag as stored by the order system
    pub fn tag(&self) -> &'static str {
        match self {
            GlazingComposition::Simple => "simple",
            GlazingComposition::Insulated => "insulated",
        }
    }

    /// Uppercased label used on glass results
    pub fn label(&self) -> String {
        self.tag().to_uppercase()
    }
}

impl std::fmt::Display for GlazingComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for GlazingComposition {
    type Err = CalcError;

    /// Case-insensitive; "dvh" is accepted as an alias for insulated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(GlazingComposition::Simple),
            "insulated" | "dvh" => Ok(GlazingComposition::Insulated),
            other => Err(CalcError::invalid_input(
                "composition",
                other,
                "Expected 'simple' or 'insulated'",
            )),
        }
    }
}

/// One design unit to be calculated.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "W-1",
///   "width_mm": 1500.0,
///   "height_mm": 1200.0,
///   "quantity": 2,
///   "opening_type": "casement",
///   "composition": "insulated",
///   "system_id": "sys-a40"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningSpec {
    /// User label (e.g., "W-1", "Kitchen window")
    #[serde(default)]
    pub label: String,

    pub width_mm: f64,

    pub height_mm: f64,

    /// Number of identical units
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default)]
    pub opening_type: OpeningType,

    #[serde(default)]
    pub composition: GlazingComposition,

    /// Catalog id of the manufacturing system
    pub system_id: String,
}

fn default_quantity() -> u32 {
    1
}

impl OpeningSpec {
    pub fn new(width_mm: f64, height_mm: f64, system_id: impl Into<String>) -> Self {
        OpeningSpec {
            label: String::new(),
            width_mm,
            height_mm,
            quantity: 1,
            opening_type: OpeningType::default(),
            composition: GlazingComposition::default(),
            system_id: system_id.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_composition(mut self, composition: GlazingComposition) -> Self {
        self.composition = composition;
        self
    }

    pub fn with_opening_type(mut self, opening_type: OpeningType) -> Self {
        self.opening_type = opening_type;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("width_mm", self.width_mm)?;
        ensure_positive("height_mm", self.height_mm)?;
        if self.quantity == 0 {
            return Err(CalcError::invalid_input("quantity", "0", "Quantity must be at least 1"));
        }
        if self.system_id.trim().is_empty() {
            return Err(CalcError::missing_field("system_id"));
        }
        Ok(())
    }
}
