//! Projection engine for yearly solar savings and cost projections

mod state;
mod engine;
mod cashflows;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, project, SALES_TAX_RATE};
pub use cashflows::{YearlyRecord, ProjectionResult, ProjectionSummary};
