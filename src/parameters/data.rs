//! Projection parameters and their defaults

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SolarRoiError};

/// Flat parameter record consumed by the projection engine
///
/// Rates are expressed in percent (e.g. `14.0` for 14%). Monetary values are
/// pre-tax; the engine applies sales and municipal tax itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameters {
    /// Upfront system price
    pub system_cost: f64,

    /// Year-1 energy output (kWh)
    #[serde(alias = "annualSystemProduction")]
    pub annual_production: f64,

    /// Year-1 grid energy unit price, pre-tax
    pub kwh_price: f64,

    /// Projection horizon in whole years
    pub system_lifetime: u32,

    /// Year-1 annual maintenance cost
    pub maintenance_cost: f64,

    /// Municipal tax (percent)
    pub municipal_tax_rate: f64,

    /// General inflation (percent per year), drives maintenance and fixed charge
    pub inflation_rate: f64,

    /// Tariff escalation (percent per year), drives kWh price and grid charges
    pub electricity_price_increase: f64,

    /// Annual output loss (percent per year)
    pub panel_degradation: f64,

    /// Year-1 monthly fixed grid fee, pre-tax
    pub fixed_charge: f64,

    /// Year-1 per-kWh power charge on residual grid energy
    pub power_charge: f64,

    /// Year-1 per-kWh distribution charge on residual grid energy
    pub distribution_charge: f64,

    /// Monthly energy still drawn from the grid after solar (kWh)
    pub grid_energy_kwh: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            system_cost: 20_000.0,
            annual_production: 3_900.0,
            kwh_price: 1.13,
            system_lifetime: 15,
            maintenance_cost: 250.0,
            municipal_tax_rate: 14.0,
            inflation_rate: 1.0,
            electricity_price_increase: 1.0,
            panel_degradation: 1.0,
            fixed_charge: 14.0,
            power_charge: 0.06,
            distribution_charge: 0.25,
            grid_energy_kwh: 100.0,
        }
    }
}

impl Parameters {
    /// Read a single field as f64
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::SystemCost => self.system_cost,
            ParameterField::AnnualProduction => self.annual_production,
            ParameterField::KwhPrice => self.kwh_price,
            ParameterField::SystemLifetime => self.system_lifetime as f64,
            ParameterField::MaintenanceCost => self.maintenance_cost,
            ParameterField::MunicipalTaxRate => self.municipal_tax_rate,
            ParameterField::InflationRate => self.inflation_rate,
            ParameterField::ElectricityPriceIncrease => self.electricity_price_increase,
            ParameterField::PanelDegradation => self.panel_degradation,
            ParameterField::FixedCharge => self.fixed_charge,
            ParameterField::PowerCharge => self.power_charge,
            ParameterField::DistributionCharge => self.distribution_charge,
            ParameterField::GridEnergyKwh => self.grid_energy_kwh,
        }
    }

    /// Copy of these parameters with one field replaced
    ///
    /// `systemLifetime` only accepts whole, non-negative values that fit in a `u32`.
    /// Domain checks are left to [`Parameters::validate`].
    pub fn with_field(&self, field: ParameterField, value: f64) -> Result<Self> {
        let mut params = self.clone();
        match field {
            ParameterField::SystemCost => params.system_cost = value,
            ParameterField::AnnualProduction => params.annual_production = value,
            ParameterField::KwhPrice => params.kwh_price = value,
            ParameterField::SystemLifetime => {
                if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
                    return Err(SolarRoiError::invalid(
                        field.name(),
                        format!("must be a whole number of years, got {}", value),
                    ));
                }
                params.system_lifetime = value as u32;
            }
            ParameterField::MaintenanceCost => params.maintenance_cost = value,
            ParameterField::MunicipalTaxRate => params.municipal_tax_rate = value,
            ParameterField::InflationRate => params.inflation_rate = value,
            ParameterField::ElectricityPriceIncrease => params.electricity_price_increase = value,
            ParameterField::PanelDegradation => params.panel_degradation = value,
            ParameterField::FixedCharge => params.fixed_charge = value,
            ParameterField::PowerCharge => params.power_charge = value,
            ParameterField::DistributionCharge => params.distribution_charge = value,
            ParameterField::GridEnergyKwh => params.grid_energy_kwh = value,
        }
        Ok(params)
    }
}

/// Names a single field of [`Parameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterField {
    SystemCost,
    AnnualProduction,
    KwhPrice,
    SystemLifetime,
    MaintenanceCost,
    MunicipalTaxRate,
    InflationRate,
    ElectricityPriceIncrease,
    PanelDegradation,
    FixedCharge,
    PowerCharge,
    DistributionCharge,
    GridEnergyKwh,
}

impl ParameterField {
    pub const ALL: [ParameterField; 13] = [
        ParameterField::SystemCost,
        ParameterField::AnnualProduction,
        ParameterField::KwhPrice,
        ParameterField::SystemLifetime,
        ParameterField::MaintenanceCost,
        ParameterField::MunicipalTaxRate,
        ParameterField::InflationRate,
        ParameterField::ElectricityPriceIncrease,
        ParameterField::PanelDegradation,
        ParameterField::FixedCharge,
        ParameterField::PowerCharge,
        ParameterField::DistributionCharge,
        ParameterField::GridEnergyKwh,
    ];

    /// Serialized (camelCase) name, as used in JSON and CSV headers
    pub fn name(&self) -> &'static str {
        match self {
            ParameterField::SystemCost => "systemCost",
            ParameterField::AnnualProduction => "annualProduction",
            ParameterField::KwhPrice => "kwhPrice",
            ParameterField::SystemLifetime => "systemLifetime",
            ParameterField::MaintenanceCost => "maintenanceCost",
            ParameterField::MunicipalTaxRate => "municipalTaxRate",
            ParameterField::InflationRate => "inflationRate",
            ParameterField::ElectricityPriceIncrease => "electricityPriceIncrease",
            ParameterField::PanelDegradation => "panelDegradation",
            ParameterField::FixedCharge => "fixedCharge",
            ParameterField::PowerCharge => "powerCharge",
            ParameterField::DistributionCharge => "distributionCharge",
            ParameterField::GridEnergyKwh => "gridEnergyKwh",
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Accept camelCase, kebab-case and snake_case spellings
        let wanted: String = s.chars().filter(|c| *c != '-' && *c != '_').collect();
        ParameterField::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("Unknown parameter: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scenario() {
        let params = Parameters::default();
        assert_eq!(params.system_cost, 20_000.0);
        assert_eq!(params.annual_production, 3_900.0);
        assert_eq!(params.system_lifetime, 15);
        assert_eq!(params.grid_energy_kwh, 100.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let params: Parameters =
            serde_json::from_str(r#"{"systemCost": 35000, "annualSystemProduction": 5000}"#).unwrap();
        assert_eq!(params.system_cost, 35_000.0);
        assert_eq!(params.annual_production, 5_000.0);
        assert_eq!(params.kwh_price, 1.13);
    }

    #[test]
    fn test_fractional_lifetime_rejected_by_serde() {
        let parsed: std::result::Result<Parameters, _> =
            serde_json::from_str(r#"{"systemLifetime": 15.5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_with_field() {
        let base = Parameters::default();
        let updated = base.with_field(ParameterField::KwhPrice, 1.5).unwrap();
        assert_eq!(updated.kwh_price, 1.5);
        assert_eq!(base.kwh_price, 1.13);

        let lifetime = base.with_field(ParameterField::SystemLifetime, 25.0).unwrap();
        assert_eq!(lifetime.system_lifetime, 25);
        assert!(base.with_field(ParameterField::SystemLifetime, 12.5).is_err());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in ParameterField::ALL {
            assert_eq!(field.name().parse::<ParameterField>().unwrap(), field);
            assert_eq!(
                Parameters::default().with_field(field, 3.0).unwrap().get(field),
                3.0
            );
        }
        assert_eq!("kwh-price".parse::<ParameterField>().unwrap(), ParameterField::KwhPrice);
        assert_eq!(
            "grid_energy_kwh".parse::<ParameterField>().unwrap(),
            ParameterField::GridEnergyKwh
        );
        assert!("roofArea".parse::<ParameterField>().is_err());
    }
}
