//! Projection parameters, validation and loading

mod data;
mod validation;
pub mod loader;

pub use data::{Parameters, ParameterField};
pub use validation::{MAX_PANEL_DEGRADATION, MIN_ESCALATION_RATE};
pub use loader::{load_parameters, load_scenarios, load_scenarios_from_reader};
