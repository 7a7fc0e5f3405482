//! Display-only decompositions derived from a projection result
//!
//! Nothing here feeds back into the engine; every value is re-derived from
//! the summary, the yearly series or the input parameters.

use serde::{Deserialize, Serialize};

use crate::parameters::Parameters;
use crate::projection::{ProjectionResult, SALES_TAX_RATE};

/// Monthly household consumption assumed when none is supplied (kWh)
pub const DEFAULT_MONTHLY_CONSUMPTION_KWH: f64 = 245.0;

/// A labelled amount for charts and tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: &'static str,
    pub value: f64,
}

/// Lifetime cost split into upfront, maintenance/fixed and residual grid energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub initial_system_cost: f64,
    pub maintenance_and_fixed_charges: f64,
    pub grid_energy_cost: f64,
}

impl CostBreakdown {
    pub fn from_result(result: &ProjectionResult) -> Self {
        Self {
            initial_system_cost: result.initial_system_cost(),
            maintenance_and_fixed_charges: result.summary.total_maintenance_and_fixed_charges,
            grid_energy_cost: result.summary.total_grid_energy_cost,
        }
    }

    /// Components with a positive amount
    pub fn slices(&self) -> Vec<Slice> {
        [
            Slice { label: "Initial Cost", value: self.initial_system_cost },
            Slice { label: "Maintenance & Fixed Charges", value: self.maintenance_and_fixed_charges },
            Slice { label: "Grid Energy Cost", value: self.grid_energy_cost },
        ]
        .into_iter()
        .filter(|s| s.value > 0.0)
        .collect()
    }
}

/// Year-1 savings split into avoided energy cost and the two avoided taxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsBreakdown {
    pub energy_savings: f64,
    pub sales_tax_savings: f64,
    pub municipal_tax_savings: f64,
}

impl SavingsBreakdown {
    /// Decompose the first projected year (all zeros for an empty series)
    pub fn first_year(result: &ProjectionResult, params: &Parameters) -> Self {
        let Some(first) = result.first_year() else {
            return Self { energy_savings: 0.0, sales_tax_savings: 0.0, municipal_tax_savings: 0.0 };
        };

        let sales_tax = SALES_TAX_RATE / 100.0;
        let municipal_tax = params.municipal_tax_rate / 100.0;
        let base = first.annual_savings / (1.0 + sales_tax + municipal_tax);

        Self {
            energy_savings: base,
            sales_tax_savings: base * sales_tax,
            municipal_tax_savings: base * municipal_tax,
        }
    }

    pub fn total(&self) -> f64 {
        self.energy_savings + self.sales_tax_savings + self.municipal_tax_savings
    }

    pub fn slices(&self) -> Vec<Slice> {
        vec![
            Slice { label: "Energy Savings", value: self.energy_savings },
            Slice { label: "Sales Tax Savings", value: self.sales_tax_savings },
            Slice { label: "Municipal Tax Savings", value: self.municipal_tax_savings },
        ]
    }
}

/// Estimated monthly bills before and after the installation, year-1 prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillEstimate {
    pub monthly_consumption_kwh: f64,
    pub pre_solar_monthly_bill: f64,
    pub post_solar_monthly_grid_cost: f64,
}

impl BillEstimate {
    pub fn new(params: &Parameters, monthly_consumption_kwh: f64) -> Self {
        let sales_tax = SALES_TAX_RATE / 100.0;
        let consumption_cost = monthly_consumption_kwh * params.kwh_price;

        // Municipal tax applies to consumption only, not the fixed charge
        let pre_solar_monthly_bill = (consumption_cost + params.fixed_charge) * (1.0 + sales_tax)
            + consumption_cost * (params.municipal_tax_rate / 100.0);

        let post_solar_monthly_grid_cost = params.grid_energy_kwh
            * (params.power_charge + params.distribution_charge)
            * (1.0 + sales_tax);

        Self {
            monthly_consumption_kwh,
            pre_solar_monthly_bill,
            post_solar_monthly_grid_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cost_breakdown_sums_to_total() {
        let result = project(&Parameters::default()).unwrap();
        let breakdown = CostBreakdown::from_result(&result);

        assert_abs_diff_eq!(breakdown.initial_system_cost, 20_000.0, epsilon = 1e-6);
        let total: f64 = breakdown.slices().iter().map(|s| s.value).sum();
        assert_abs_diff_eq!(total, result.summary.total_cost, epsilon = 1e-6);
    }

    #[test]
    fn test_cost_breakdown_drops_zero_components() {
        let params = Parameters {
            maintenance_cost: 0.0,
            fixed_charge: 0.0,
            ..Default::default()
        };
        let result = project(&params).unwrap();
        let labels: Vec<_> = CostBreakdown::from_result(&result)
            .slices()
            .iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["Initial Cost", "Grid Energy Cost"]);
    }

    #[test]
    fn test_first_year_savings_breakdown() {
        let params = Parameters::default();
        let result = project(&params).unwrap();
        let breakdown = SavingsBreakdown::first_year(&result, &params);

        assert_abs_diff_eq!(breakdown.energy_savings, 4407.0, epsilon = 1e-6);
        assert_abs_diff_eq!(breakdown.sales_tax_savings, 528.84, epsilon = 1e-6);
        assert_abs_diff_eq!(breakdown.municipal_tax_savings, 616.98, epsilon = 1e-6);
        assert_abs_diff_eq!(breakdown.total(), result.yearly[0].annual_savings, epsilon = 1e-6);
    }

    #[test]
    fn test_savings_breakdown_empty_series() {
        let params = Parameters::default();
        let mut result = project(&params).unwrap();
        result.yearly.clear();

        let breakdown = SavingsBreakdown::first_year(&result, &params);
        assert_eq!(breakdown.total(), 0.0);
    }

    #[test]
    fn test_bill_estimate() {
        let estimate = BillEstimate::new(&Parameters::default(), DEFAULT_MONTHLY_CONSUMPTION_KWH);

        // 245 * 1.13 = 276.85; (276.85 + 14) * 1.12 + 276.85 * 0.14
        assert_abs_diff_eq!(estimate.pre_solar_monthly_bill, 364.511, epsilon = 1e-6);
        // 100 * 0.31 * 1.12
        assert_abs_diff_eq!(estimate.post_solar_monthly_grid_cost, 34.72, epsilon = 1e-6);
    }
}
