//! # Project to Order Conversion
//!
//! Folds the design units of a project into a production cut order: one
//! order header plus one glass cut record per glazed unit.
//!
//! The conversion only computes the payload. Writing the header and the
//! records, and assigning order numbers, belongs to the order system; that
//! write is the transaction boundary.
//!
//! ## Rules
//!
//! - An empty unit list is rejected before any header is produced.
//! - Units without a glazing assignment are skipped. They produce no
//!   record and no error, since glass may not have been chosen yet.
//! - Each glazed unit is sized with its system's deductions. An unknown
//!   system falls back to zero deductions and is reported as a fallback.
//! - Record quantity is `unit.quantity × panes per unit`.
//! - Any invalid unit fails the whole conversion; partial record sets are
//!   never returned.
//!
//! System rules come from a catalog snapshot taken once by the caller, so
//! every unit of one order is sized against the same rules.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculations::glass::checked_simple_glass;
use crate::diagnostics::Computed;
use crate::errors::{CalcError, CalcResult};
use crate::opening::GlazingComposition;
use crate::project::{DesignProject, DesignUnit, ProjectMetadata};
use crate::settings::CalcSettings;
use crate::system::{resolve_system, SystemCatalog};
use crate::units::SquareMeters;

/// Header of the production order created by one conversion.
///
/// Carries the project's client and address context. The order number is
/// assigned by the order system when the header is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHeader {
    /// Project the order was converted from
    pub project_id: Uuid,
    pub project_name: String,
    pub client: String,
    pub address: String,
}

/// One glass cut to be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCutRecord {
    /// Header this record belongs to (the project id)
    pub project_id: Uuid,
    /// Originating design unit
    pub unit_id: Uuid,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Unit quantity × panes per unit
    pub quantity: u32,
    pub composition: GlazingComposition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass_type_id: Option<String>,
    /// Free text naming the unit and the project
    pub note: String,
}

/// Result of converting a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub order: OrderHeader,
    pub cut_records: Vec<ProductionCutRecord>,
    /// Units skipped for lack of glazing
    pub skipped_units: Vec<Uuid>,
}

impl Conversion {
    /// Number of panes across all records
    pub fn total_panes(&self) -> u64 {
        self.cut_records.iter().map(|r| r.quantity as u64).sum()
    }

    /// Glass area across all records
    pub fn total_glass_area(&self) -> SquareMeters {
        self.cut_records.iter().fold(SquareMeters(0.0), |acc, r| {
            acc + SquareMeters(r.width_mm / 1000.0 * r.height_mm / 1000.0 * r.quantity as f64)
        })
    }
}

/// Convert `units` of `project` into an order payload.
///
/// # Returns
///
/// * `Ok(Computed<Conversion>)` - header, records, and fallbacks for units
///   whose system was not in `systems`
/// * `Err(CalcError::EmptyBatch)` - `units` is empty
/// * `Err(CalcError::InvalidInput)` - a glazed unit has non-positive
///   dimensions or quantity, or a deduction leaves no glass
pub fn convert(
    project: &ProjectMetadata,
    units: &[DesignUnit],
    systems: &SystemCatalog,
) -> CalcResult<Computed<Conversion>> {
    if units.is_empty() {
        return Err(CalcError::empty_batch(&project.name));
    }

    let order = OrderHeader {
        project_id: project.id,
        project_name: project.name.clone(),
        client: project.client.clone(),
        address: project.address.clone(),
    };

    let mut out = Computed::clean(());
    let mut cut_records = Vec::new();
    let mut skipped_units = Vec::new();

    for unit in units {
        let Some(glazing) = &unit.glazing else {
            debug!(unit = %unit.name, "no glazing assigned, skipping");
            skipped_units.push(unit.id);
            continue;
        };

        if unit.quantity == 0 {
            return Err(CalcError::invalid_input(
                format!("units[{}].quantity", unit.name),
                "0",
                "Quantity must be at least 1",
            ));
        }

        let system = out.absorb(resolve_system(systems, &unit.system_id));
        let glass = checked_simple_glass(
            unit.width_mm,
            unit.height_mm,
            &system.rules,
            glazing.composition,
        )?;

        let quantity = unit.quantity.checked_mul(glass.quantity).ok_or_else(|| {
            CalcError::calculation_failed(
                "order conversion",
                format!("pane count overflow for unit '{}'", unit.name),
            )
        })?;

        cut_records.push(ProductionCutRecord {
            project_id: project.id,
            unit_id: unit.id,
            width_mm: glass.width_mm,
            height_mm: glass.height_mm,
            quantity,
            composition: glazing.composition,
            glass_type_id: glazing.glass_type_id.clone(),
            note: format!("Unit {} / Project {}", unit.name, project.name),
        });
    }

    info!(
        project = %project.name,
        records = cut_records.len(),
        skipped = skipped_units.len(),
        fallbacks = out.fallbacks.len(),
        "converted project to order"
    );

    Ok(out.map(|_| Conversion {
        order,
        cut_records,
        skipped_units,
    }))
}

impl DesignProject {
    /// Convert every unit of this project.
    ///
    /// With `settings.strict_references`, an unknown system fails the
    /// conversion instead of falling back to zero deductions.
    pub fn to_order(
        &self,
        systems: &SystemCatalog,
        settings: &CalcSettings,
    ) -> CalcResult<Computed<Conversion>> {
        let conversion = convert(&self.meta, &self.units, systems)?;
        if settings.strict_references {
            return conversion.into_strict().map(Computed::clean);
        }
        Ok(conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Fallback;
    use crate::system::{SystemConfig, SystemRules};

    fn systems() -> SystemCatalog {
        let mut systems = SystemCatalog::new();
        systems.insert(
            "s1".to_string(),
            SystemConfig::new("s1", "Basic").with_rules(SystemRules::new(45.0, 100.0, 100.0)),
        );
        systems
    }

    fn project() -> DesignProject {
        let mut project = DesignProject::new("Casa Lopez", "M. Lopez", "Calle 9 #120");
        project.add_unit(
            DesignUnit::new("W-1", 1500.0, 1200.0, "s1")
                .with_quantity(3)
                .with_glazing(GlazingComposition::Simple),
        );
        project.add_unit(DesignUnit::new("D-1", 900.0, 2100.0, "s1"));
        project.add_unit(
            DesignUnit::new("W-2", 600.0, 600.0, "s1")
                .with_glass_type(GlazingComposition::Insulated, "4-9-4"),
        );
        project
    }

    #[test]
    fn test_records_for_glazed_units_only() {
        let p = project();
        let result = convert(&p.meta, &p.units, &systems()).unwrap();
        assert!(result.is_clean());

        let conversion = result.value;
        assert_eq!(conversion.cut_records.len(), 2);
        assert_eq!(conversion.skipped_units, vec![p.units[1].id]);

        let first = &conversion.cut_records[0];
        assert_eq!(first.width_mm, 1400.0);
        assert_eq!(first.height_mm, 1100.0);
        assert_eq!(first.quantity, 3);
        assert_eq!(first.composition, GlazingComposition::Simple);
        assert_eq!(first.note, "Unit W-1 / Project Casa Lopez");

        let second = &conversion.cut_records[1];
        assert_eq!(second.composition, GlazingComposition::Insulated);
        assert_eq!(second.glass_type_id.as_deref(), Some("4-9-4"));
    }

    #[test]
    fn test_single_header() {
        let p = project();
        let conversion = convert(&p.meta, &p.units, &systems()).unwrap().value;
        assert_eq!(conversion.order.client, "M. Lopez");
        assert_eq!(conversion.order.address, "Calle 9 #120");
        assert!(conversion.cut_records.iter().all(|r| r.project_id == conversion.order.project_id));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let p = DesignProject::new("Empty", "C", "A");
        let err = convert(&p.meta, &p.units, &systems()).unwrap_err();
        assert_eq!(err, CalcError::empty_batch("Empty"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_all_unglazed_gives_header_only() {
        let mut p = DesignProject::new("Doors", "C", "A");
        p.add_unit(DesignUnit::new("D-1", 900.0, 2100.0, "s1"));
        let conversion = convert(&p.meta, &p.units, &systems()).unwrap().value;
        assert!(conversion.cut_records.is_empty());
        assert_eq!(conversion.order.project_name, "Doors");
    }

    #[test]
    fn test_unknown_system_zero_deductions() {
        let mut p = DesignProject::new("P", "C", "A");
        p.add_unit(
            DesignUnit::new("W-9", 1000.0, 800.0, "ghost").with_glazing(GlazingComposition::Simple),
        );
        let result = convert(&p.meta, &p.units, &systems()).unwrap();
        assert_eq!(result.value.cut_records[0].width_mm, 1000.0);
        assert_eq!(
            result.fallbacks,
            vec![Fallback::UnknownSystem { system_id: "ghost".into() }]
        );

        let err = p.to_order(&systems(), &CalcSettings::strict()).unwrap_err();
        assert_eq!(err.error_code(), "UNRESOLVED_REFERENCE");
    }

    #[test]
    fn test_invalid_unit_fails_whole_batch() {
        let mut p = project();
        p.add_unit(
            DesignUnit::new("Bad", 50.0, 800.0, "s1").with_glazing(GlazingComposition::Simple),
        );
        assert!(convert(&p.meta, &p.units, &systems()).is_err());
    }

    #[test]
    fn test_totals() {
        let p = project();
        let conversion = p.to_order(&systems(), &CalcSettings::default()).unwrap().value;
        assert_eq!(conversion.total_panes(), 4);
        // 3 × 1.54 + 0.5 × 0.5
        assert!((conversion.total_glass_area().0 - 4.87).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let p = project();
        let a = convert(&p.meta, &p.units, &systems()).unwrap();
        let b = convert(&p.meta, &p.units, &systems()).unwrap();
        assert_eq!(a, b);
    }
}
