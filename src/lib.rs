//! Solar ROI - Year-by-year financial projection for residential solar installations
//!
//! This library provides:
//! - A deterministic projection engine (savings, costs, cumulative cash position)
//! - Summary metrics: payback period, ROI, LCOE
//! - Boundary validation and JSON/CSV parameter loading
//! - Display-only breakdowns, CSV export and formatting
//! - Parallel batch and sensitivity runs

pub mod error;
pub mod parameters;
pub mod projection;
pub mod breakdown;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::SolarRoiError;
pub use parameters::{Parameters, ParameterField};
pub use projection::{project, ProjectionEngine, ProjectionResult, ProjectionSummary, YearlyRecord};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioRunner};
