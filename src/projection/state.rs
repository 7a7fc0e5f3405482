//! Running state carried from one projection year to the next

use crate::parameters::Parameters;

/// Accumulators for a single projection run
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (1-indexed, 0 before the first year)
    pub year: u32,

    /// Running net cash position (seeded at -system_cost)
    pub cumulative_savings: f64,

    /// Running total cost (seeded at system_cost)
    pub cumulative_costs: f64,

    /// Degraded production summed over elapsed years
    pub total_lifetime_production: f64,

    /// Maintenance + annualized fixed charges summed over elapsed years
    pub total_maintenance_and_fixed: f64,

    /// Tax-inclusive residual grid cost summed over elapsed years
    pub total_grid_energy_cost: f64,

    /// First year the cumulative position reached zero
    pub payback_period: Option<u32>,
}

impl ProjectionState {
    /// Initialize state before year 1
    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            year: 0,
            cumulative_savings: -params.system_cost,
            cumulative_costs: params.system_cost,
            total_lifetime_production: 0.0,
            total_maintenance_and_fixed: 0.0,
            total_grid_energy_cost: 0.0,
            payback_period: None,
        }
    }

    /// Advance to next year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Escalation exponent for the current year (year 1 is unescalated)
    pub fn elapsed_years(&self) -> f64 {
        self.year.saturating_sub(1) as f64
    }

    /// Book one year's net savings and cost into the running totals
    pub fn book(&mut self, net_savings: f64, annual_costs: f64) {
        self.cumulative_savings += net_savings;
        self.cumulative_costs += annual_costs;

        // Payback is the first crossing only
        if self.payback_period.is_none() && self.cumulative_savings >= 0.0 {
            self.payback_period = Some(self.year);
        }
    }
}
