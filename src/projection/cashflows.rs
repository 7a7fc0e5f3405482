//! Yearly output rows and summary metrics for a projection

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolarRoiError};

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Gross tax-inclusive value of the energy offset this year
    pub annual_savings: f64,

    /// Maintenance, fixed charges and residual grid energy cost this year
    pub annual_costs: f64,

    /// annual_savings - annual_costs
    pub net_savings: f64,

    /// Running net cash position, starting from -system_cost
    pub cumulative_savings: f64,

    /// Running total cost, starting from system_cost
    pub cumulative_costs: f64,
}

/// Summary metrics derived once the yearly loop has finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    /// Final cumulative savings
    pub total_net_savings: f64,

    /// Final cumulative costs (includes the upfront system cost)
    pub total_cost: f64,

    /// total_net_savings / system_cost, in percent
    pub roi: f64,

    /// Levelized cost of energy: total_cost per lifetime kWh (0 with no production)
    pub lcoe: f64,

    /// First year with non-negative cumulative savings
    pub payback_period: Option<u32>,

    /// Sum of maintenance and annualized fixed charges over the lifetime
    pub total_maintenance_and_fixed_charges: f64,

    /// Sum of tax-inclusive residual grid energy cost over the lifetime
    pub total_grid_energy_cost: f64,

    /// Sum of degraded production over the lifetime (kWh)
    pub total_lifetime_production: f64,
}

impl ProjectionSummary {
    /// Fail with `DegenerateResult` if any metric is NaN or infinite
    pub fn ensure_finite(&self) -> Result<()> {
        let metrics = [
            ("totalNetSavings", self.total_net_savings),
            ("totalCost", self.total_cost),
            ("roi", self.roi),
            ("lcoe", self.lcoe),
            ("totalMaintenanceAndFixedCharges", self.total_maintenance_and_fixed_charges),
            ("totalGridEnergyCost", self.total_grid_energy_cost),
            ("totalLifetimeProduction", self.total_lifetime_production),
        ];

        match metrics.iter().find(|(_, value)| !value.is_finite()) {
            Some((metric, _)) => Err(SolarRoiError::DegenerateResult { metric: *metric }),
            None => Ok(()),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Yearly rows, years 1..=system_lifetime in order
    pub yearly: Vec<YearlyRecord>,

    pub summary: ProjectionSummary,
}

impl ProjectionResult {
    /// First projection year, if any
    pub fn first_year(&self) -> Option<&YearlyRecord> {
        self.yearly.first()
    }

    /// Net savings per year, in order
    pub fn net_savings(&self) -> Vec<f64> {
        self.yearly.iter().map(|r| r.net_savings).collect()
    }

    /// Upfront system cost implied by the summary totals
    pub fn initial_system_cost(&self) -> f64 {
        self.summary.total_cost
            - self.summary.total_maintenance_and_fixed_charges
            - self.summary.total_grid_energy_cost
    }
}
