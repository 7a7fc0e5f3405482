//! Boundary validation for projection parameters
//!
//! The engine loop has no internal clamps, so every domain rule is enforced
//! here before a projection runs.

use super::data::{ParameterField, Parameters};
use crate::error::{Result, SolarRoiError};

/// Panel degradation must stay strictly below this (percent)
pub const MAX_PANEL_DEGRADATION: f64 = 100.0;

/// Inflation and tariff escalation must stay strictly above this (percent)
pub const MIN_ESCALATION_RATE: f64 = -100.0;

impl Parameters {
    /// Check every field against its domain, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        for field in ParameterField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(SolarRoiError::invalid(field.name(), "must be a finite number"));
            }
        }

        positive(ParameterField::SystemCost, self.system_cost)?;
        non_negative(ParameterField::AnnualProduction, self.annual_production)?;
        positive(ParameterField::KwhPrice, self.kwh_price)?;

        if self.system_lifetime < 1 {
            return Err(SolarRoiError::invalid(
                ParameterField::SystemLifetime.name(),
                "must be at least 1 year",
            ));
        }

        non_negative(ParameterField::MaintenanceCost, self.maintenance_cost)?;
        non_negative(ParameterField::MunicipalTaxRate, self.municipal_tax_rate)?;

        non_negative(ParameterField::PanelDegradation, self.panel_degradation)?;
        if self.panel_degradation >= MAX_PANEL_DEGRADATION {
            return Err(SolarRoiError::invalid(
                ParameterField::PanelDegradation.name(),
                format!("must be below {}%, got {}", MAX_PANEL_DEGRADATION, self.panel_degradation),
            ));
        }

        non_negative(ParameterField::FixedCharge, self.fixed_charge)?;
        non_negative(ParameterField::PowerCharge, self.power_charge)?;
        non_negative(ParameterField::DistributionCharge, self.distribution_charge)?;
        non_negative(ParameterField::GridEnergyKwh, self.grid_energy_kwh)?;

        // Growth factors (1 + r/100)^n change sign below -100%
        above_escalation_floor(ParameterField::InflationRate, self.inflation_rate)?;
        above_escalation_floor(ParameterField::ElectricityPriceIncrease, self.electricity_price_increase)?;

        Ok(())
    }
}

fn above_escalation_floor(field: ParameterField, value: f64) -> Result<()> {
    if value > MIN_ESCALATION_RATE {
        Ok(())
    } else {
        Err(SolarRoiError::invalid(
            field.name(),
            format!("must be above {}%, got {}", MIN_ESCALATION_RATE, value),
        ))
    }
}

fn positive(field: ParameterField, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SolarRoiError::invalid(
            field.name(),
            format!("must be greater than zero, got {}", value),
        ))
    }
}

fn non_negative(field: ParameterField, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SolarRoiError::invalid(
            field.name(),
            format!("must not be negative, got {}", value),
        ))
    }
}
