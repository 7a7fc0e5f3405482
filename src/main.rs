//! Solar ROI CLI
//!
//! Command-line interface for running a single solar savings projection

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use solar_roi::breakdown::{BillEstimate, CostBreakdown, SavingsBreakdown, DEFAULT_MONTHLY_CONSUMPTION_KWH};
use solar_roi::parameters::load_parameters;
use solar_roi::report::{format_currency, save_yearly_csv, summary_text, yearly_table};
use solar_roi::{ParameterField, Parameters, ProjectionEngine, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "solar_roi", version, about = "Project savings, payback and ROI of a solar installation")]
struct Cli {
    /// JSON file with parameters (missing keys use defaults)
    #[arg(long)]
    params: Option<PathBuf>,

    // Negative values are let through so validation reports the field
    #[arg(long, allow_negative_numbers = true)]
    system_cost: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    annual_production: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    kwh_price: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    system_lifetime: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    maintenance_cost: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    municipal_tax_rate: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    inflation_rate: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    electricity_price_increase: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    panel_degradation: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    fixed_charge: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    power_charge: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    distribution_charge: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    grid_energy_kwh: Option<f64>,

    /// Average monthly consumption before solar (kWh), for the bill estimate
    #[arg(long, default_value_t = DEFAULT_MONTHLY_CONSUMPTION_KWH)]
    consumption: f64,

    /// Write the yearly series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Print cost, savings and bill breakdowns
    #[arg(long)]
    breakdown: bool,

    /// Vary one parameter (camelCase name) across --values
    #[arg(long, requires = "values")]
    sweep: Option<ParameterField>,

    /// Comma-separated values for --sweep
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Vec<f64>,
}

impl Cli {
    /// Defaults, then the JSON file, then individual flags
    fn parameters(&self) -> Result<Parameters> {
        let mut params = match &self.params {
            Some(path) => load_parameters(path)
                .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
            None => Parameters::default(),
        };

        let overrides = [
            (ParameterField::SystemCost, self.system_cost),
            (ParameterField::AnnualProduction, self.annual_production),
            (ParameterField::KwhPrice, self.kwh_price),
            (ParameterField::SystemLifetime, self.system_lifetime),
            (ParameterField::MaintenanceCost, self.maintenance_cost),
            (ParameterField::MunicipalTaxRate, self.municipal_tax_rate),
            (ParameterField::InflationRate, self.inflation_rate),
            (ParameterField::ElectricityPriceIncrease, self.electricity_price_increase),
            (ParameterField::PanelDegradation, self.panel_degradation),
            (ParameterField::FixedCharge, self.fixed_charge),
            (ParameterField::PowerCharge, self.power_charge),
            (ParameterField::DistributionCharge, self.distribution_charge),
            (ParameterField::GridEnergyKwh, self.grid_energy_kwh),
        ];

        for (field, value) in overrides {
            if let Some(value) = value {
                params = params.with_field(field, value)?;
            }
        }

        Ok(params)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.parameters()?;

    if let Some(field) = cli.sweep {
        return run_sweep(params, field, &cli.values);
    }

    let engine = ProjectionEngine::new(params).context("Invalid projection parameters")?;
    let result = engine.project().context("Projection failed")?;
    let params = engine.parameters();
    info!("Projection complete: {} years", result.yearly.len());

    if cli.json {
        let output = serde_json::json!({
            "parameters": params,
            "result": result,
            "costBreakdown": CostBreakdown::from_result(&result),
            "firstYearSavings": SavingsBreakdown::first_year(&result, params),
            "billEstimate": BillEstimate::new(params, cli.consumption),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Solar ROI Projection");
        println!("====================\n");
        println!("System cost: {}", format_currency(params.system_cost));
        println!("Lifetime:    {} years\n", params.system_lifetime);

        print!("{}", yearly_table(&result.yearly));
        println!("\nSummary:");
        print!("{}", summary_text(&result.summary, params.system_lifetime));

        if cli.breakdown {
            print_breakdowns(params, &result, cli.consumption);
        }
    }

    if let Some(path) = &cli.csv {
        save_yearly_csv(path, &result.yearly)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.json {
            println!("\nYearly results written to: {}", path.display());
        }
    }

    Ok(())
}

fn print_breakdowns(params: &Parameters, result: &solar_roi::ProjectionResult, consumption: f64) {
    println!("\nCost breakdown over {} years:", params.system_lifetime);
    for slice in CostBreakdown::from_result(result).slices() {
        println!("  {:<30} {:>16}", slice.label, format_currency(slice.value));
    }

    println!("\nFirst-year savings breakdown:");
    for slice in SavingsBreakdown::first_year(result, params).slices() {
        println!("  {:<30} {:>16}", slice.label, format_currency(slice.value));
    }

    let bill = BillEstimate::new(params, consumption);
    println!("\nMonthly bill at {} kWh/month:", consumption);
    println!("  {:<30} {:>16}", "Estimated bill (pre-solar)", format_currency(bill.pre_solar_monthly_bill));
    println!("  {:<30} {:>16}", "Grid cost (post-solar)", format_currency(bill.post_solar_monthly_grid_cost));
}

fn run_sweep(base: Parameters, field: ParameterField, values: &[f64]) -> Result<()> {
    let runner = ScenarioRunner::with_base(base);
    let outcomes = runner.sweep(field, values);

    println!("{:<32} {:>18} {:>10} {:>8}", "Scenario", "Net Savings", "ROI", "Payback");
    println!("{}", "-".repeat(71));
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => {
                let s = &result.summary;
                println!(
                    "{:<32} {:>18} {:>9.1}% {:>8}",
                    outcome.name,
                    format_currency(s.total_net_savings),
                    s.roi,
                    s.payback_period.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string()),
                );
            }
            Err(e) => println!("{:<32} error: {}", outcome.name, e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solar_roi::SolarRoiError;

    fn rejected_field(args: &[&str]) -> &'static str {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        let err = cli
            .parameters()
            .and_then(|params| Ok(params.validate()?))
            .expect_err("parameters should be rejected");
        match err.downcast_ref::<SolarRoiError>() {
            Some(SolarRoiError::InvalidParameter { field, .. }) => *field,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_flags_reach_validation() {
        assert_eq!(
            rejected_field(&["solar_roi", "--panel-degradation", "-1"]),
            "panelDegradation"
        );
        assert_eq!(rejected_field(&["solar_roi", "--system-cost", "-5000"]), "systemCost");
        assert_eq!(
            rejected_field(&["solar_roi", "--municipal-tax-rate", "-3"]),
            "municipalTaxRate"
        );
        assert_eq!(rejected_field(&["solar_roi", "--fixed-charge", "-14"]), "fixedCharge");
        assert_eq!(
            rejected_field(&["solar_roi", "--distribution-charge", "-0.25"]),
            "distributionCharge"
        );
        assert_eq!(rejected_field(&["solar_roi", "--system-lifetime", "-15"]), "systemLifetime");
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "solar_roi",
            "--system-cost",
            "32000",
            "--system-lifetime",
            "25",
            "--inflation-rate",
            "-2",
        ])
        .unwrap();
        let params = cli.parameters().unwrap();

        assert_eq!(params.system_cost, 32_000.0);
        assert_eq!(params.system_lifetime, 25);
        assert_eq!(params.inflation_rate, -2.0);
        assert_eq!(params.kwh_price, Parameters::default().kwh_price);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_sweep_values_accept_negatives() {
        let cli = Cli::try_parse_from([
            "solar_roi",
            "--sweep",
            "inflationRate",
            "--values",
            "-2,0,3.5",
        ])
        .unwrap();

        assert_eq!(cli.sweep, Some(ParameterField::InflationRate));
        assert_eq!(cli.values, vec![-2.0, 0.0, 3.5]);
    }
}
