//! # Carpentry Calculations
//!
//! The calculators that turn an opening into manufacturing data. Each one
//! is a pure function of its inputs:
//!
//! - [`cuts`] - frame profile cut list
//! - [`glass`] - pane dimensions after system deductions
//! - [`cost`] - profile and glass cost breakdown from a price snapshot
//! - [`unit`] - all of the above for one opening
//!
//! Results are JSON-serializable so a design front-end can display them
//! directly.

pub mod cost;
pub mod cuts;
pub mod glass;
pub mod unit;

// Re-export commonly used types
pub use cost::{CostBreakdown, LineItem, PriceSnapshot, PriceTable, ProfilePrice};
pub use cuts::{frame_cuts, CutSpec};
pub use glass::{checked_polygon_glass, polygon_glass, simple_glass, GlassResult};
pub use unit::{calculate, UnitResult};
