//! # calc_core - Window and Door Carpentry Calculation Engine
//!
//! `calc_core` turns an opening specification (dimensions, opening style,
//! glazing composition and a manufacturing system) into a frame cut list,
//! dimensioned glass and a cost breakdown. It also folds the units of a
//! design project into a production cut order.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Visible fallbacks**: Silent catalog defaults are reported alongside
//!   the result they affected
//!
//! The engine does no I/O. Catalog data (systems, prices) is resolved by
//! the caller and passed in as a snapshot.
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{frame_cuts, simple_glass};
//! use calc_core::opening::GlazingComposition;
//! use calc_core::system::{SystemConfig, SystemRules};
//!
//! let system = SystemConfig::new("s1", "Basic").with_rules(SystemRules::new(45.0, 100.0, 100.0));
//!
//! let cuts = frame_cuts(1500.0, 1200.0, &system);
//! let glass = simple_glass(1500.0, 1200.0, &system.rules, GlazingComposition::Simple);
//!
//! assert_eq!(cuts.len(), 2);
//! assert_eq!((glass.width_mm, glass.height_mm), (1400.0, 1100.0));
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Polygons, bounding boxes, rectangles
//! - [`calculations`] - Cut, glass, cost and single-unit calculators
//! - [`order`] - Project to production order conversion
//! - [`project`] - Design project and unit containers
//! - [`system`] - Manufacturing systems and their rules
//! - [`opening`] - Opening specification input types
//! - [`diagnostics`] - Fallback reporting for degraded results
//! - [`settings`] - Calculation tunables
//! - [`units`] - Metric unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod diagnostics;
pub mod errors;
pub mod geometry;
pub mod opening;
pub mod order;
pub mod project;
pub mod settings;
pub mod system;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use diagnostics::{Computed, Fallback};
pub use errors::{CalcError, CalcResult};
pub use order::{convert, Conversion, OrderHeader, ProductionCutRecord};
pub use project::{DesignProject, DesignUnit, ProjectMetadata};
pub use settings::CalcSettings;
pub use system::{SystemCatalog, SystemConfig, SystemRules};
