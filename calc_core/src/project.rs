//! # Design Projects
//!
//! A `DesignProject` groups the window and door units designed for one
//! client and site. Projects are edited by upstream design tooling and
//! handed to the core by value; the core never stores them.
//!
//! ## Structure
//!
//! ```text
//! DesignProject
//! ├── meta: ProjectMetadata (id, name, client, address, timestamps)
//! └── units: Vec<DesignUnit> (ordered as designed)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::opening::GlazingComposition;
//! use calc_core::project::{DesignProject, DesignUnit};
//!
//! let mut project = DesignProject::new("Casa Lopez", "M. Lopez", "Calle 9 #120");
//! project.add_unit(
//!     DesignUnit::new("W-1", 1500.0, 1200.0, "sys-a40").with_glazing(GlazingComposition::Simple),
//! );
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Casa Lopez"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::opening::{GlazingComposition, OpeningSpec, OpeningType};

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignProject {
    pub meta: ProjectMetadata,

    /// Design units in the order they were added
    #[serde(default)]
    pub units: Vec<DesignUnit>,
}

impl DesignProject {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `name` - Project name (e.g., "Casa Lopez")
    /// * `client` - Client name
    /// * `address` - Installation address
    pub fn new(
        name: impl Into<String>,
        client: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        DesignProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                name: name.into(),
                client: client.into(),
                address: address.into(),
                created: now,
                modified: now,
            },
            units: Vec::new(),
        }
    }

    /// Add a unit and return its id.
    pub fn add_unit(&mut self, unit: DesignUnit) -> Uuid {
        let id = unit.id;
        self.units.push(unit);
        self.touch();
        id
    }

    /// Remove a unit by id.
    ///
    /// Returns the removed unit if it existed.
    pub fn remove_unit(&mut self, id: &Uuid) -> Option<DesignUnit> {
        let index = self.units.iter().position(|u| &u.id == id)?;
        let unit = self.units.remove(index);
        self.touch();
        Some(unit)
    }

    pub fn get_unit(&self, id: &Uuid) -> Option<&DesignUnit> {
        self.units.iter().find(|u| &u.id == id)
    }

    /// Get a mutable reference to a unit.
    ///
    /// Marks the project as modified when the unit exists.
    pub fn get_unit_mut(&mut self, id: &Uuid) -> Option<&mut DesignUnit> {
        let index = self.units.iter().position(|u| &u.id == id)?;
        self.meta.modified = Utc::now();
        self.units.get_mut(index)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Units that have glass assigned
    pub fn glazed_units(&self) -> impl Iterator<Item = &DesignUnit> {
        self.units.iter().filter(|u| u.glazing.is_some())
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub id: Uuid,

    pub name: String,

    pub client: String,

    /// Installation address
    #[serde(default)]
    pub address: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Glass chosen for a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlazingAssignment {
    pub composition: GlazingComposition,

    /// Catalog id of the glass type, when one has been picked.
    ///
    /// For insulated units this single id cannot say which outer pane,
    /// inner pane and spacer are meant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass_type_id: Option<String>,
}

/// One window or door designed within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignUnit {
    pub id: Uuid,

    /// Display name (e.g., "W-1", "Living room door")
    pub name: String,

    pub width_mm: f64,

    pub height_mm: f64,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default)]
    pub opening_type: OpeningType,

    pub system_id: String,

    /// `None` until glass has been chosen
    #[serde(default)]
    pub glazing: Option<GlazingAssignment>,
}

fn default_quantity() -> u32 {
    1
}

impl DesignUnit {
    pub fn new(
        name: impl Into<String>,
        width_mm: f64,
        height_mm: f64,
        system_id: impl Into<String>,
    ) -> Self {
        DesignUnit {
            id: Uuid::new_v4(),
            name: name.into(),
            width_mm,
            height_mm,
            quantity: 1,
            opening_type: OpeningType::default(),
            system_id: system_id.into(),
            glazing: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_opening_type(mut self, opening_type: OpeningType) -> Self {
        self.opening_type = opening_type;
        self
    }

    pub fn with_glazing(mut self, composition: GlazingComposition) -> Self {
        self.glazing = Some(GlazingAssignment {
            composition,
            glass_type_id: None,
        });
        self
    }

    pub fn with_glass_type(
        mut self,
        composition: GlazingComposition,
        glass_type_id: impl Into<String>,
    ) -> Self {
        self.glazing = Some(GlazingAssignment {
            composition,
            glass_type_id: Some(glass_type_id.into()),
        });
        self
    }

    /// Opening specification for the single-unit calculators.
    ///
    /// Units without glazing are calculated as simple glass.
    pub fn to_opening_spec(&self) -> OpeningSpec {
        OpeningSpec {
            label: self.name.clone(),
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            quantity: self.quantity,
            opening_type: self.opening_type,
            composition: self
                .glazing
                .as_ref()
                .map(|g| g.composition)
                .unwrap_or_default(),
            system_id: self.system_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = DesignProject::new("Casa Lopez", "M. Lopez", "Calle 9 #120");
        assert_eq!(project.meta.name, "Casa Lopez");
        assert_eq!(project.meta.client, "M. Lopez");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.unit_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = DesignProject::new("Office", "ACME", "Main St 1");
        project.add_unit(
            DesignUnit::new("W-1", 900.0, 600.0, "s1").with_glazing(GlazingComposition::Insulated),
        );
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("ACME"));
        assert!(json.contains("\"insulated\""));

        let roundtrip: DesignProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.id, project.meta.id);
        assert_eq!(roundtrip.units, project.units);
    }

    #[test]
    fn test_add_remove_unit() {
        let mut project = DesignProject::new("P", "C", "A");
        let id = project.add_unit(DesignUnit::new("W-1", 900.0, 600.0, "s1"));
        assert_eq!(project.unit_count(), 1);
        assert!(project.get_unit(&id).is_some());

        if let Some(unit) = project.get_unit_mut(&id) {
            unit.quantity = 4;
        }
        assert_eq!(project.get_unit(&id).map(|u| u.quantity), Some(4));

        let removed = project.remove_unit(&id);
        assert!(removed.is_some());
        assert_eq!(project.unit_count(), 0);
        assert!(project.remove_unit(&id).is_none());
    }

    #[test]
    fn test_glazed_units() {
        let mut project = DesignProject::new("P", "C", "A");
        project.add_unit(
            DesignUnit::new("W-1", 900.0, 600.0, "s1").with_glazing(GlazingComposition::Simple),
        );
        project.add_unit(DesignUnit::new("D-1", 900.0, 2100.0, "s1"));
        assert_eq!(project.glazed_units().count(), 1);
    }

    #[test]
    fn test_to_opening_spec() {
        let unit = DesignUnit::new("W-2", 1200.0, 1000.0, "s9")
            .with_quantity(3)
            .with_opening_type(OpeningType::Sliding)
            .with_glass_type(GlazingComposition::Insulated, "4-12-4");
        let spec = unit.to_opening_spec();
        assert_eq!(spec.label, "W-2");
        assert_eq!(spec.quantity, 3);
        assert_eq!(spec.opening_type, OpeningType::Sliding);
        assert_eq!(spec.composition, GlazingComposition::Insulated);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_unit_json_defaults() {
        let unit: DesignUnit = serde_json::from_str(
            r#"{
                "id": "7f1c0a52-0a5e-4a53-9d2a-2b6f1f8d6c11",
                "name": "W",
                "width_mm": 1.0,
                "height_mm": 1.0,
                "system_id": "s"
            }"#,
        )
        .unwrap();
        assert_eq!(unit.quantity, 1);
        assert!(unit.glazing.is_none());
    }
}
