//! # Cost Breakdown
//!
//! Prices a cut list and a glass result against a price snapshot supplied
//! by the caller. No catalog access happens here.
//!
//! ## Pricing rules
//!
//! - Profiles: linear meters = length / 1000 × quantity. Priced either per
//!   meter, or per kilogram via the profile's weight per meter. Stock-bar
//!   waste is ignored.
//! - Glass: area (m²) × price per m².
//! - Accessories: always zero for now.
//!
//! A cut whose profile is missing from the price table contributes nothing.
//! The omission is reported as a [`Fallback::MissingPrice`] on the returned
//! [`Computed`] and logged at warn level.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use calc_core::calculations::cost::{total, ProfilePrice};
//! use calc_core::calculations::cuts::frame_cuts;
//! use calc_core::calculations::glass::simple_glass;
//! use calc_core::opening::GlazingComposition;
//! use calc_core::system::{SystemConfig, SystemRules};
//!
//! let system = SystemConfig::new("s1", "Basic").with_rules(SystemRules::new(45.0, 100.0, 100.0));
//! let cuts = frame_cuts(1500.0, 1200.0, &system);
//! let glass = simple_glass(1500.0, 1200.0, &system.rules, GlazingComposition::Simple);
//!
//! let mut prices = HashMap::new();
//! prices.insert("FRAME_PROFILE".to_string(), ProfilePrice::per_kg(15.0, 1.2));
//!
//! let cost = total(&cuts, &glass, &prices, 45.0).into_value();
//! assert!((cost.total_cost - 166.5).abs() < 1e-6);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::cuts::CutSpec;
use crate::calculations::glass::GlassResult;
use crate::diagnostics::{Computed, Fallback};
use crate::errors::{CalcError, CalcResult};
use crate::units::{KgPerMeter, Meters};

/// Tolerance for money consistency checks
pub const MONEY_TOLERANCE: f64 = 1e-6;

/// Price entry of one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePrice {
    /// Price per kilogram when `priced_by_weight`, otherwise per meter
    pub price_per_unit: f64,

    /// Linear mass, needed when priced by weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_per_meter_kg: Option<f64>,

    #[serde(default)]
    pub priced_by_weight: bool,
}

impl ProfilePrice {
    /// Priced per linear meter
    pub fn per_meter(price: f64) -> Self {
        ProfilePrice {
            price_per_unit: price,
            weight_per_meter_kg: None,
            priced_by_weight: false,
        }
    }

    /// Priced per kilogram of a profile weighing `weight_per_meter_kg`
    pub fn per_kg(price: f64, weight_per_meter_kg: f64) -> Self {
        ProfilePrice {
            price_per_unit: price,
            weight_per_meter_kg: Some(weight_per_meter_kg),
            priced_by_weight: true,
        }
    }
}

/// Price snapshot keyed by profile code
pub type PriceTable = HashMap<String, ProfilePrice>;

/// Every price needed to cost an opening, fetched together so that one
/// calculation never mixes prices from different catalog states.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default)]
    pub profiles: PriceTable,
    #[serde(default)]
    pub glass_price_per_sqm: f64,
}

impl PriceSnapshot {
    pub fn new(profiles: PriceTable, glass_price_per_sqm: f64) -> Self {
        PriceSnapshot {
            profiles,
            glass_price_per_sqm,
        }
    }

    /// [`total`] against this snapshot
    pub fn price(&self, cuts: &[CutSpec], glass: &GlassResult) -> Computed<CostBreakdown> {
        total(cuts, glass, &self.profiles, self.glass_price_per_sqm)
    }
}

/// One priced row of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub total_cost: f64,
}

impl LineItem {
    fn new(description: impl Into<String>, quantity: u32, total_cost: f64) -> Self {
        let unit_cost = if quantity == 0 { 0.0 } else { total_cost / quantity as f64 };
        LineItem {
            description: description.into(),
            quantity,
            unit_cost,
            total_cost,
        }
    }
}

/// Cost of one opening.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_cost": 166.5,
///   "profiles_cost": 97.2,
///   "glass_cost": 69.3,
///   "accessories_cost": 0.0,
///   "line_items": [
///     {
///       "description": "Frame horizontal (FRAME_PROFILE) 1500 mm",
///       "quantity": 2,
///       "unit_cost": 27.0,
///       "total_cost": 54.0
///     },
///     {
///       "description": "Frame vertical (FRAME_PROFILE) 1200 mm",
///       "quantity": 2,
///       "unit_cost": 21.6,
///       "total_cost": 43.2
///     },
///     {
///       "description": "Glass SIMPLE 1400 x 1100 mm",
///       "quantity": 1,
///       "unit_cost": 69.3,
///       "total_cost": 69.3
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub total_cost: f64,
    pub profiles_cost: f64,
    pub glass_cost: f64,
    /// Reserved, currently always zero
    pub accessories_cost: f64,
    /// Cut items in input order, then the glass item
    pub line_items: Vec<LineItem>,
}

impl CostBreakdown {
    /// Sum of all line totals
    pub fn line_items_total(&self) -> f64 {
        self.line_items.iter().map(|item| item.total_cost).sum()
    }

    /// Subtotals add up to the total, and every line to quantity × unit cost
    pub fn is_consistent(&self) -> bool {
        let subtotal = self.profiles_cost + self.glass_cost + self.accessories_cost;
        (self.total_cost - subtotal).abs() < MONEY_TOLERANCE
            && (self.total_cost - self.line_items_total()).abs() < MONEY_TOLERANCE
            && self.line_items.iter().all(|item| {
                (item.total_cost - item.quantity as f64 * item.unit_cost).abs() < MONEY_TOLERANCE
            })
    }

    /// Breakdown for `n` identical openings
    ///
    /// Fails when a line's piece count no longer fits in a `u32`.
    pub fn scaled(&self, n: u32) -> CalcResult<CostBreakdown> {
        let f = n as f64;
        let mut line_items = Vec::with_capacity(self.line_items.len());
        for item in &self.line_items {
            let quantity = item.quantity.checked_mul(n).ok_or_else(|| {
                CalcError::calculation_failed(
                    "cost scaling",
                    format!("piece count overflow for '{}' x {}", item.description, n),
                )
            })?;
            line_items.push(LineItem::new(item.description.clone(), quantity, item.total_cost * f));
        }

        Ok(CostBreakdown {
            total_cost: self.total_cost * f,
            profiles_cost: self.profiles_cost * f,
            glass_cost: self.glass_cost * f,
            accessories_cost: self.accessories_cost * f,
            line_items,
        })
    }
}

/// Price a cut list and a pane.
///
/// Returns a breakdown wrapped with the fallbacks applied (unpriced
/// profiles, weight-priced profiles without a weight).
pub fn total(
    cuts: &[CutSpec],
    glass: &GlassResult,
    profile_prices: &PriceTable,
    glass_price_per_sqm: f64,
) -> Computed<CostBreakdown> {
    let mut fallbacks = Vec::new();
    let mut line_items = Vec::with_capacity(cuts.len() + 1);
    let mut profiles_cost = 0.0;

    for cut in cuts {
        let Some(price) = profile_prices.get(&cut.profile_code) else {
            warn!(profile_code = %cut.profile_code, "no price for profile, cost omitted");
            fallbacks.push(Fallback::MissingPrice {
                profile_code: cut.profile_code.clone(),
            });
            continue;
        };

        let linear = cut.total_length();
        let cost = if price.priced_by_weight {
            let weight_per_meter = match price.weight_per_meter_kg {
                Some(w) => KgPerMeter(w),
                None => {
                    warn!(
                        profile_code = %cut.profile_code,
                        "weight-priced profile has no weight per meter"
                    );
                    fallbacks.push(Fallback::MissingWeight {
                        profile_code: cut.profile_code.clone(),
                    });
                    KgPerMeter(0.0)
                }
            };
            (weight_per_meter * linear).0 * price.price_per_unit
        } else {
            linear.0 * price.price_per_unit
        };

        debug!(profile_code = %cut.profile_code, meters = linear.0, cost, "priced cut");
        profiles_cost += cost;
        line_items.push(LineItem::new(describe_cut(cut), cut.quantity, cost));
    }

    let area = glass.area();
    let glass_cost = area.0 * glass_price_per_sqm;
    line_items.push(LineItem::new(describe_glass(glass), glass.quantity, glass_cost));

    let accessories_cost = 0.0;
    let breakdown = CostBreakdown {
        total_cost: profiles_cost + glass_cost + accessories_cost,
        profiles_cost,
        glass_cost,
        accessories_cost,
        line_items,
    };
    Computed::with_fallbacks(breakdown, fallbacks)
}

fn describe_cut(cut: &CutSpec) -> String {
    format!("{} ({}) {} mm", cut.label, cut.profile_code, cut.length_mm)
}

fn describe_glass(glass: &GlassResult) -> String {
    format!("Glass {} {} x {} mm", glass.composition_label, glass.width_mm, glass.height_mm)
}

/// Total linear meters of a cut list
pub fn linear_meters(cuts: &[CutSpec]) -> Meters {
    cuts.iter().fold(Meters(0.0), |acc, cut| acc + cut.total_length())
}
