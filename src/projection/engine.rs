//! Core projection engine for yearly solar savings and cost projections

use log::debug;

use super::cashflows::{ProjectionResult, ProjectionSummary, YearlyRecord};
use super::state::ProjectionState;
use crate::error::Result;
use crate::parameters::Parameters;

/// Sales tax (IVA) applied to energy savings and residual grid cost, in percent
pub const SALES_TAX_RATE: f64 = 12.0;

/// Months per year, used to annualize monthly charges
const MONTHS_PER_YEAR: f64 = 12.0;

/// Compound growth factor for a percent rate over `years`
fn growth_factor(rate_pct: f64, years: f64) -> f64 {
    (1.0 + rate_pct / 100.0).powf(years)
}

/// Main projection engine
///
/// Holds one validated parameter snapshot. Each call to [`ProjectionEngine::project`]
/// returns a freshly allocated result, so engines can be shared across threads.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: Parameters,
}

impl ProjectionEngine {
    /// Create an engine, rejecting parameters outside their domain
    pub fn new(params: Parameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Run the projection over the full system lifetime
    pub fn project(&self) -> Result<ProjectionResult> {
        let result = self.run();
        result.summary.ensure_finite()?;

        debug!(
            "Projected {} years: net savings {:.2}, payback {:?}",
            result.yearly.len(),
            result.summary.total_net_savings,
            result.summary.payback_period
        );

        Ok(result)
    }

    /// Yearly loop without any domain checks
    fn run(&self) -> ProjectionResult {
        let mut state = ProjectionState::from_parameters(&self.params);
        let mut yearly = Vec::with_capacity(self.params.system_lifetime as usize);

        for _year in 1..=self.params.system_lifetime {
            state.advance_year();
            let record = self.calculate_year(&mut state);
            yearly.push(record);
        }

        let summary = self.summarize(&state);
        ProjectionResult { yearly, summary }
    }

    /// Calculate savings and costs for the state's current year
    fn calculate_year(&self, state: &mut ProjectionState) -> YearlyRecord {
        let p = &self.params;
        let elapsed = state.elapsed_years();
        let sales_tax = SALES_TAX_RATE / 100.0;

        // Production decays from the year-1 rating
        let degraded_production = p.annual_production * growth_factor(-p.panel_degradation, elapsed);
        state.total_lifetime_production += degraded_production;

        // Savings: offset energy valued at the escalated tariff, plus avoided sales and municipal tax
        let tariff_growth = growth_factor(p.electricity_price_increase, elapsed);
        let current_kwh_price = p.kwh_price * tariff_growth;
        let energy_savings_base = degraded_production * current_kwh_price;
        let annual_savings =
            energy_savings_base * (1.0 + sales_tax + p.municipal_tax_rate / 100.0);

        // Maintenance and fixed charge follow general inflation
        let inflation_growth = growth_factor(p.inflation_rate, elapsed);
        let current_maintenance = p.maintenance_cost * inflation_growth;
        let current_fixed_charge = p.fixed_charge * inflation_growth;
        let maintenance_and_fixed = current_maintenance + current_fixed_charge * MONTHS_PER_YEAR;
        state.total_maintenance_and_fixed += maintenance_and_fixed;

        // Residual grid energy follows the tariff; sales tax only, no municipal tax
        let current_power_charge = p.power_charge * tariff_growth;
        let current_distribution_charge = p.distribution_charge * tariff_growth;
        let grid_cost_pre_tax = p.grid_energy_kwh
            * (current_power_charge + current_distribution_charge)
            * MONTHS_PER_YEAR;
        let grid_energy_cost = grid_cost_pre_tax * (1.0 + sales_tax);
        state.total_grid_energy_cost += grid_energy_cost;

        let annual_costs = maintenance_and_fixed + grid_energy_cost;
        let net_savings = annual_savings - annual_costs;
        state.book(net_savings, annual_costs);

        YearlyRecord {
            year: state.year,
            annual_savings,
            annual_costs,
            net_savings,
            cumulative_savings: state.cumulative_savings,
            cumulative_costs: state.cumulative_costs,
        }
    }

    fn summarize(&self, state: &ProjectionState) -> ProjectionSummary {
        let total_net_savings = state.cumulative_savings;
        let total_cost = state.cumulative_costs;

        let lcoe = if state.total_lifetime_production > 0.0 {
            total_cost / state.total_lifetime_production
        } else {
            0.0
        };

        ProjectionSummary {
            total_net_savings,
            total_cost,
            roi: total_net_savings / self.params.system_cost * 100.0,
            lcoe,
            payback_period: state.payback_period,
            total_maintenance_and_fixed_charges: state.total_maintenance_and_fixed,
            total_grid_energy_cost: state.total_grid_energy_cost,
            total_lifetime_production: state.total_lifetime_production,
        }
    }
}

/// Validate and project a parameter set in one call
pub fn project(params: &Parameters) -> Result<ProjectionResult> {
    ProjectionEngine::new(params.clone())?.project()
}
