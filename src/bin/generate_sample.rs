use std::fs;
use std::path::Path;

use anyhow::Result;

const FIRST_YEAR: i32 = 1970;
const LAST_YEAR: i32 = 2020;
const STEP: usize = 5;

/// Smooth deterministic series between two endpoints with a gentle
/// mid-span bow. Endpoints are hit exactly so the charts agree with the
/// narrative figures in the report's summary panel.
fn series(start: f64, end: f64, bow: f64, years: &[i32]) -> Vec<f64> {
    let span = f64::from(LAST_YEAR - FIRST_YEAR);
    years
        .iter()
        .map(|&year| {
            let t = f64::from(year - FIRST_YEAR) / span;
            let value = start + (end - start) * t + bow * (std::f64::consts::PI * t).sin();
            (value * 100.0).round() / 100.0
        })
        .collect()
}

fn write_table(path: &Path, header: &[&str], years: &[i32], columns: &[Vec<f64>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for (i, &year) in years.iter().enumerate() {
        let mut record = vec![year.to_string()];
        record.extend(columns.iter().map(|col| format!("{:.2}", col[i])));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let years: Vec<i32> = (FIRST_YEAR..=LAST_YEAR).step_by(STEP).collect();
    let out = Path::new("data");
    fs::create_dir_all(out)?;

    write_table(
        &out.join("net_enroll.csv"),
        &["Year", "Primary", "Secondary", "Tertiary"],
        &years,
        &[
            series(98.0, 92.95, 1.2, &years),
            series(60.0, 92.8, -2.0, &years),
            series(8.3, 38.56, -4.0, &years),
        ],
    )?;

    write_table(
        &out.join("pt_ratio.csv"),
        &["Year", "Primary", "Secondary", "Tertiary"],
        &years,
        &[
            series(27.0, 20.29, 0.8, &years),
            series(15.2, 20.23, -0.5, &years),
            series(10.1, 16.93, -0.9, &years),
        ],
    )?;

    write_table(
        &out.join("gdp_exp.csv"),
        &["Year", "GDP Exp"],
        &years,
        &[series(3.0, 12.25, -1.1, &years)],
    )?;

    write_table(
        &out.join("literacy_rate.csv"),
        &["Year", "Male", "Female"],
        &years,
        &[
            series(78.0, 94.29, 0.9, &years),
            series(64.0, 94.23, -2.5, &years),
        ],
    )?;

    println!("Wrote {} sample years to {}", years.len(), out.display());
    Ok(())
}
