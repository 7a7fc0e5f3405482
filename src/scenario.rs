//! Scenario runner for batch and sensitivity projections
//!
//! Each projection is independent, so batches are spread across threads with
//! rayon and results come back in input order.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parameters::{ParameterField, Parameters};
use crate::projection::{project, ProjectionResult};

/// A named parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub parameters: Parameters,
}

impl Scenario {
    pub fn new(name: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// Result of projecting one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub parameters: Parameters,
    pub result: Result<ProjectionResult>,
}

impl ScenarioOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs many projections against a shared base parameter set
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // Project the base case at several tariffs
/// let outcomes = runner.sweep(ParameterField::KwhPrice, &[0.9, 1.13, 1.4]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Base parameters for sweeps
    base_parameters: Parameters,
}

impl ScenarioRunner {
    /// Create runner with default parameters as the base
    pub fn new() -> Self {
        Self {
            base_parameters: Parameters::default(),
        }
    }

    /// Create runner with a specific base parameter set
    pub fn with_base(parameters: Parameters) -> Self {
        Self {
            base_parameters: parameters,
        }
    }

    /// Project a single scenario
    pub fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let result = project(&scenario.parameters);
        if let Err(e) = &result {
            warn!("Scenario '{}' failed: {}", scenario.name, e);
        }

        ScenarioOutcome {
            name: scenario.name.clone(),
            parameters: scenario.parameters.clone(),
            result,
        }
    }

    /// Project all scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios.par_iter().map(|s| self.run(s)).collect();

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        info!("Projected {} scenarios ({} failed)", outcomes.len(), failed);

        outcomes
    }

    /// Project the base parameters once per value of a single field
    pub fn sweep(&self, field: ParameterField, values: &[f64]) -> Vec<ScenarioOutcome> {
        values
            .par_iter()
            .map(|&value| {
                let name = format!("{}={}", field, value);
                match self.base_parameters.with_field(field, value) {
                    Ok(parameters) => self.run(&Scenario::new(name, parameters)),
                    Err(e) => {
                        warn!("Scenario '{}' failed: {}", name, e);
                        ScenarioOutcome {
                            name,
                            parameters: self.base_parameters.clone(),
                            result: Err(e),
                        }
                    }
                }
            })
            .collect()
    }

    pub fn base(&self) -> &Parameters {
        &self.base_parameters
    }

    pub fn base_mut(&mut self) -> &mut Parameters {
        &mut self.base_parameters
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
