//! CSV export, text tables and number formatting for projection output

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, SolarRoiError};
use crate::projection::{ProjectionSummary, YearlyRecord};
use crate::scenario::ScenarioOutcome;

/// Header row of the yearly CSV export
pub const YEARLY_CSV_HEADER: [&str; 5] = [
    "Year",
    "Annual Savings",
    "Annual Costs",
    "Net Savings",
    "Cumulative Savings",
];

/// Default file name for the yearly export
pub const DEFAULT_CSV_FILENAME: &str = "solar_roi_analysis.csv";

/// Currency symbol used by `format_currency` (Guatemalan quetzal)
const CURRENCY_SYMBOL: &str = "Q";

/// Write the yearly series as CSV, monetary values to two decimals
///
/// An empty series is refused rather than producing a header-only file.
pub fn write_yearly_csv<W: Write>(writer: W, yearly: &[YearlyRecord]) -> Result<()> {
    if yearly.is_empty() {
        return Err(SolarRoiError::EmptySeries);
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(YEARLY_CSV_HEADER)?;

    for row in yearly {
        wtr.write_record([
            row.year.to_string(),
            format!("{:.2}", row.annual_savings),
            format!("{:.2}", row.annual_costs),
            format!("{:.2}", row.net_savings),
            format!("{:.2}", row.cumulative_savings),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the yearly CSV to a file path
pub fn save_yearly_csv<P: AsRef<Path>>(path: P, yearly: &[YearlyRecord]) -> Result<()> {
    if yearly.is_empty() {
        return Err(SolarRoiError::EmptySeries);
    }
    let file = File::create(path)?;
    write_yearly_csv(file, yearly)
}

/// Write one summary row per scenario; failed scenarios carry their error message
pub fn write_summary_csv<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "Scenario",
        "Total Net Savings",
        "Total Cost",
        "ROI (%)",
        "LCOE",
        "Payback Year",
        "Error",
    ])?;

    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => {
                let s = &result.summary;
                wtr.write_record([
                    outcome.name.clone(),
                    format!("{:.2}", s.total_net_savings),
                    format!("{:.2}", s.total_cost),
                    format!("{:.2}", s.roi),
                    format!("{:.4}", s.lcoe),
                    s.payback_period.map(|y| y.to_string()).unwrap_or_default(),
                    String::new(),
                ])?;
            }
            Err(e) => {
                let message = e.to_string();
                wtr.write_record([outcome.name.as_str(), "", "", "", "", "", message.as_str()])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Render an amount as currency, e.g. `Q20,000.00` or `-Q1,234.50`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let frac = cents - whole * 100.0;
    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };

    format!("{}{}{}.{:02}", sign, CURRENCY_SYMBOL, group_thousands(whole), frac as u64)
}

/// Render a number rounded to an integer with thousands separators
pub fn format_number(value: f64) -> String {
    let rounded = value.abs().round();
    let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(rounded))
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{:.0}", whole);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed-width text table of the yearly series
pub fn yearly_table(yearly: &[YearlyRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>16} {:>16} {:>16} {:>18}",
        "Year", "Annual Savings", "Annual Costs", "Net Savings", "Cumulative"
    );
    let _ = writeln!(out, "{}", "-".repeat(74));

    for row in yearly {
        let _ = writeln!(
            out,
            "{:>4} {:>16} {:>16} {:>16} {:>18}",
            row.year,
            format_currency(row.annual_savings),
            format_currency(row.annual_costs),
            format_currency(row.net_savings),
            format_currency(row.cumulative_savings),
        );
    }
    out
}

/// Multi-line summary block
pub fn summary_text(summary: &ProjectionSummary, system_lifetime: u32) -> String {
    let payback = summary
        .payback_period
        .map(|y| format!("{} years", y))
        .unwrap_or_else(|| "N/A".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "  Total Net Savings: {}", format_currency(summary.total_net_savings));
    let _ = writeln!(out, "  Total Cost:        {}", format_currency(summary.total_cost));
    let _ = writeln!(out, "  ROI:               {:.1}%", summary.roi);
    let _ = writeln!(out, "  Payback Period:    {}", payback);
    let _ = writeln!(
        out,
        "  LCOE:              {} / kWh over {} years",
        format_currency(summary.lcoe),
        system_lifetime
    );
    let _ = writeln!(
        out,
        "  Lifetime Output:   {} kWh",
        format_number(summary.total_lifetime_production)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Parameters;
    use crate::projection::project;
    use crate::scenario::{Scenario, ScenarioRunner};

    #[test]
    fn test_yearly_csv_rows_and_precision() {
        let result = project(&Parameters::default()).unwrap();
        let mut buf = Vec::new();
        write_yearly_csv(&mut buf, &result.yearly).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Year,Annual Savings,Annual Costs,Net Savings,Cumulative Savings");
        assert_eq!(lines.len() - 1, 15);
        assert_eq!(lines[1], "1,5552.82,834.64,4718.18,-15281.82");

        for line in &lines[1..] {
            for field in line.split(',').skip(1) {
                let decimals = field.split('.').nth(1).expect("two decimals");
                assert_eq!(decimals.len(), 2, "field {}", field);
            }
        }
    }

    #[test]
    fn test_empty_series_not_exported() {
        let mut buf = Vec::new();
        assert!(matches!(write_yearly_csv(&mut buf, &[]), Err(SolarRoiError::EmptySeries)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_summary_csv_includes_failures() {
        let runner = ScenarioRunner::new();
        let outcomes = runner.run_batch(&[
            Scenario::new("baseline", Parameters::default()),
            Scenario::new("free", Parameters { system_cost: 0.0, ..Default::default() }),
        ]);

        let mut buf = Vec::new();
        write_summary_csv(&mut buf, &outcomes).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("baseline,"));
        assert!(lines[1].contains(",5,"));
        assert!(lines[2].starts_with("free,,,,,,"));
        assert!(lines[2].contains("systemCost"));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(20_000.0), "Q20,000.00");
        assert_eq!(format_currency(1_234_567.891), "Q1,234,567.89");
        assert_eq!(format_currency(-15_281.82), "-Q15,281.82");
        assert_eq!(format_currency(0.5), "Q0.50");
        assert_eq!(format_currency(-0.001), "Q0.00");
        assert_eq!(format_currency(999.999), "Q1,000.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3_900.0), "3,900");
        assert_eq!(format_number(56_123.6), "56,124");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(0.2), "0");
    }

    #[test]
    fn test_yearly_table_has_row_per_year() {
        let result = project(&Parameters::default()).unwrap();
        let table = yearly_table(&result.yearly);
        assert_eq!(table.lines().count(), 2 + 15);
        assert!(table.contains("Q5,552.82"));
    }
}
