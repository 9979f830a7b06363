//! # Single Opening Calculation
//!
//! Runs the cut, glass and cost calculators for one opening, the way an
//! interactive design screen recalculates after every edit.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::cost::{PriceSnapshot, PriceTable, ProfilePrice};
//! use calc_core::calculations::unit::calculate;
//! use calc_core::opening::OpeningSpec;
//! use calc_core::settings::CalcSettings;
//! use calc_core::system::{SystemCatalog, SystemConfig, SystemRules};
//!
//! let mut systems = SystemCatalog::new();
//! systems.insert(
//!     "s1".to_string(),
//!     SystemConfig::new("s1", "Basic").with_rules(SystemRules::new(45.0, 100.0, 100.0)),
//! );
//! let mut profiles = PriceTable::new();
//! profiles.insert("FRAME_PROFILE".to_string(), ProfilePrice::per_kg(15.0, 1.2));
//! let prices = PriceSnapshot::new(profiles, 45.0);
//!
//! let opening = OpeningSpec::new(1500.0, 1200.0, "s1").with_label("W-1");
//! let result = calculate(&opening, &systems, &prices, &CalcSettings::default()).unwrap();
//!
//! assert!(result.is_clean());
//! assert!((result.value.cost.total_cost - 166.5).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::cost::{CostBreakdown, PriceSnapshot};
use crate::calculations::cuts::{checked_frame_cuts, CutSpec};
use crate::calculations::glass::{checked_simple_glass, GlassResult};
use crate::diagnostics::Computed;
use crate::errors::CalcResult;
use crate::opening::OpeningSpec;
use crate::settings::CalcSettings;
use crate::system::{resolve_system, SystemCatalog};

/// Everything derived from one opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitResult {
    pub label: String,

    /// Name of the system the rules came from
    pub system_name: String,

    /// Number of identical openings
    pub quantity: u32,

    /// Cut list for a single opening
    pub cuts: Vec<CutSpec>,

    /// Glass for a single opening
    pub glass: GlassResult,

    /// Cost of a single opening
    pub unit_cost: CostBreakdown,

    /// Cost of all `quantity` openings
    pub cost: CostBreakdown,
}

/// Calculate cuts, glass and cost for `opening`.
///
/// # Returns
///
/// * `Ok(Computed<UnitResult>)` - result plus any fallbacks applied
/// * `Err(CalcError)` - invalid dimensions, a deduction larger than the
///   opening, a quantity whose piece counts overflow, or (with
///   `settings.strict_references`) an unresolved system or price
pub fn calculate(
    opening: &OpeningSpec,
    systems: &SystemCatalog,
    prices: &PriceSnapshot,
    settings: &CalcSettings,
) -> CalcResult<Computed<UnitResult>> {
    opening.validate()?;
    debug!(label = %opening.label, system_id = %opening.system_id, "calculating opening");

    let mut out = Computed::clean(());
    let system = out.absorb(resolve_system(systems, &opening.system_id));

    let cuts = checked_frame_cuts(opening.width_mm, opening.height_mm, &system, settings)?;
    let glass = checked_simple_glass(
        opening.width_mm,
        opening.height_mm,
        &system.rules,
        opening.composition,
    )?;
    let unit_cost = out.absorb(prices.price(&cuts, &glass));
    let cost = unit_cost.scaled(opening.quantity)?;

    let result = out.map(|_| UnitResult {
        label: opening.label.clone(),
        system_name: system.name.clone(),
        quantity: opening.quantity,
        cuts,
        glass,
        unit_cost,
        cost,
    });

    if settings.strict_references {
        return result.into_strict().map(Computed::clean);
    }
    Ok(result)
}
