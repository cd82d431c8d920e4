use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use chalkboard::config::ReportConfig;
use chalkboard::data::loader::{self, TableSources};
use chalkboard::data::model::DataError;
use chalkboard::report;

fn write(dir: &Path, file: &str, contents: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, contents).unwrap();
    path
}

fn sample_sources(dir: &Path) -> TableSources {
    TableSources {
        enrollment: write(
            dir,
            "net_enroll.csv",
            "Year,Primary,Secondary,Tertiary\n\
             1970,98,60,8.3\n\
             1995,95,75,20\n\
             2020,93,92.8,38.56\n",
        ),
        ratios: write(
            dir,
            "pt_ratio.csv",
            "Year,Primary,Secondary,Tertiary\n\
             1970,27,15.2,10.1\n\
             1995,23,17.5,13\n\
             2020,20.29,20.23,16.93\n",
        ),
        expenditure: write(
            dir,
            "gdp_exp.csv",
            "Year,GDP Exp\n1970,3.0\n1995,7.5\n2020,12.25\n",
        ),
        literacy: write(
            dir,
            "literacy_rate.csv",
            "Year,Male,Female\n1970,78,64\n1995,86,80\n2020,94.29,94.23\n",
        ),
    }
}

fn config(dir: &Path) -> ReportConfig {
    ReportConfig {
        sources: sample_sources(dir),
        output: dir.join("report.svg"),
        ..ReportConfig::default()
    }
}

/// The decorative panel borders are the only stroke-width-3 shapes on the
/// page (series lines are 4, axis and legend strokes are 1).
fn count_borders(svg: &str) -> usize {
    svg.matches("stroke-width=\"3\"").count() + svg.matches("stroke-width:3").count()
}

#[test]
fn renders_the_full_page() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path());

    let dataset = loader::load_dataset(&cfg.sources).unwrap();
    report::render(&dataset, &cfg).unwrap();

    let svg = fs::read_to_string(&cfg.output).unwrap();

    // Page furniture.
    assert!(svg.contains("Evolution of Education: A 50-Year Statistical Review in the UK"));
    assert!(svg.contains(&cfg.caption));

    // Panel titles.
    assert!(svg.contains("Net Enrollment Rate"));
    assert!(svg.contains("Pupil-Teacher Ratio by Education Level and Year"));
    assert!(svg.contains("Literacy Rate by Gender"));
    assert!(svg.contains("1970 Gov. Expenditure (% of GDP)"));
    assert!(svg.contains("2020 Gov. Expenditure (% of GDP)"));

    // Pie slice labels.
    assert!(svg.contains("Education"));
    assert!(svg.contains("Other"));

    // One x-tick label per sampled year.
    for year in ["1970", "1995", "2020"] {
        assert!(svg.contains(year), "missing year tick {year}");
    }

    // The narrative block made it through word-wrapping intact.
    assert!(svg.contains("364.46%"));
}

#[test]
fn every_chart_panel_gets_a_border() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path());

    let dataset = loader::load_dataset(&cfg.sources).unwrap();
    report::render(&dataset, &cfg).unwrap();

    let svg = fs::read_to_string(&cfg.output).unwrap();
    assert_eq!(count_borders(&svg), 5, "one border per chart panel");
}

#[test]
fn borders_do_not_depend_on_the_data() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(dir.path());
    cfg.sources.enrollment = write(
        dir.path(),
        "net_enroll_single.csv",
        "Year,Primary,Secondary,Tertiary\n1970,98,60,8.3\n",
    );
    cfg.sources.expenditure = write(
        dir.path(),
        "gdp_exp_alt.csv",
        "Year,GDP Exp\n1970,5.5\n2020,6.5\n",
    );

    let dataset = loader::load_dataset(&cfg.sources).unwrap();
    report::render(&dataset, &cfg).unwrap();

    let svg = fs::read_to_string(&cfg.output).unwrap();
    assert_eq!(count_borders(&svg), 5);
}

#[test]
fn missing_pie_year_aborts_before_any_output() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(dir.path());
    cfg.sources.expenditure = write(
        dir.path(),
        "gdp_exp_no_1970.csv",
        "Year,GDP Exp\n1995,7.5\n2020,12.25\n",
    );

    let dataset = loader::load_dataset(&cfg.sources).unwrap();
    let err = report::render(&dataset, &cfg).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DataError>(),
        Some(DataError::Lookup { year: 1970, .. })
    ));
    assert!(!cfg.output.exists(), "no partial output may be written");
}

#[test]
fn missing_year_column_aborts_the_load() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(dir.path());
    cfg.sources.literacy = write(dir.path(), "literacy_bad.csv", "Male,Female\n78,64\n");

    let err = loader::load_dataset(&cfg.sources).unwrap_err();
    assert!(matches!(err, DataError::Schema { column: "Year", .. }));
    assert!(!cfg.output.exists());
}
