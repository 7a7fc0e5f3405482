//! Load parameter sets from JSON and scenario CSV files

use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::data::Parameters;
use crate::error::Result;
use crate::scenario::Scenario;

/// Raw CSV row for a scenario file
///
/// Missing columns and empty cells fall back to [`Parameters::default`].
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    #[serde(default)]
    scenario: Option<String>,
    #[serde(default)]
    system_cost: Option<f64>,
    #[serde(default, alias = "annualSystemProduction")]
    annual_production: Option<f64>,
    #[serde(default)]
    kwh_price: Option<f64>,
    #[serde(default)]
    system_lifetime: Option<u32>,
    #[serde(default)]
    maintenance_cost: Option<f64>,
    #[serde(default)]
    municipal_tax_rate: Option<f64>,
    #[serde(default)]
    inflation_rate: Option<f64>,
    #[serde(default)]
    electricity_price_increase: Option<f64>,
    #[serde(default)]
    panel_degradation: Option<f64>,
    #[serde(default)]
    fixed_charge: Option<f64>,
    #[serde(default)]
    power_charge: Option<f64>,
    #[serde(default)]
    distribution_charge: Option<f64>,
    #[serde(default)]
    grid_energy_kwh: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self, row_number: usize) -> Scenario {
        let d = Parameters::default();
        let parameters = Parameters {
            system_cost: self.system_cost.unwrap_or(d.system_cost),
            annual_production: self.annual_production.unwrap_or(d.annual_production),
            kwh_price: self.kwh_price.unwrap_or(d.kwh_price),
            system_lifetime: self.system_lifetime.unwrap_or(d.system_lifetime),
            maintenance_cost: self.maintenance_cost.unwrap_or(d.maintenance_cost),
            municipal_tax_rate: self.municipal_tax_rate.unwrap_or(d.municipal_tax_rate),
            inflation_rate: self.inflation_rate.unwrap_or(d.inflation_rate),
            electricity_price_increase: self
                .electricity_price_increase
                .unwrap_or(d.electricity_price_increase),
            panel_degradation: self.panel_degradation.unwrap_or(d.panel_degradation),
            fixed_charge: self.fixed_charge.unwrap_or(d.fixed_charge),
            power_charge: self.power_charge.unwrap_or(d.power_charge),
            distribution_charge: self.distribution_charge.unwrap_or(d.distribution_charge),
            grid_energy_kwh: self.grid_energy_kwh.unwrap_or(d.grid_energy_kwh),
        };

        let name = self
            .scenario
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("scenario-{}", row_number));

        Scenario::new(name, parameters)
    }
}

/// Load a single parameter set from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<Parameters> {
    let file = File::open(path)?;
    let params = serde_json::from_reader(BufReader::new(file))?;
    Ok(params)
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let file = File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g., string buffer, request body)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario(idx + 1));
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolarRoiError;

    #[test]
    fn test_load_scenarios_from_reader() {
        let data = "\
scenario,systemCost,kwhPrice,systemLifetime,panelDegradation
baseline,20000,1.13,15,1
premium,32000,1.13,25,0.5
,18000,,,
";
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 3);

        assert_eq!(scenarios[0].name, "baseline");
        assert_eq!(scenarios[0].parameters, Parameters::default());

        assert_eq!(scenarios[1].name, "premium");
        assert_eq!(scenarios[1].parameters.system_cost, 32_000.0);
        assert_eq!(scenarios[1].parameters.system_lifetime, 25);
        assert_eq!(scenarios[1].parameters.panel_degradation, 0.5);

        // Unnamed row with blanks falls back to defaults
        assert_eq!(scenarios[2].name, "scenario-3");
        assert_eq!(scenarios[2].parameters.system_cost, 18_000.0);
        assert_eq!(scenarios[2].parameters.kwh_price, 1.13);
        assert_eq!(scenarios[2].parameters.system_lifetime, 15);
    }

    #[test]
    fn test_fractional_lifetime_is_parse_error() {
        let data = "scenario,systemLifetime\nodd,15.5\n";
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SolarRoiError::Csv(_)));
    }

    #[test]
    fn test_load_bundled_data() {
        let params = load_parameters("data/parameters.json").expect("Failed to load parameters");
        assert_eq!(params, Parameters::default());

        let scenarios = load_scenarios("data/scenarios.csv").expect("Failed to load scenarios");
        assert_eq!(scenarios.len(), 5);
        assert_eq!(scenarios[0].name, "baseline");
        assert_eq!(scenarios[0].parameters, Parameters::default());
        assert!(scenarios.iter().all(|s| s.parameters.validate().is_ok()));
    }

    #[test]
    fn test_load_parameters_missing_file() {
        let err = load_parameters("does/not/exist.json").unwrap_err();
        assert!(matches!(err, SolarRoiError::Io(_)));
    }
}
