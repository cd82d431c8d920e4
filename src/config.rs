use std::path::PathBuf;

use crate::color::Palette;
use crate::data::loader::TableSources;

// ---------------------------------------------------------------------------
// Report configuration
// ---------------------------------------------------------------------------

/// Everything the composer needs besides the loaded tables. Colours and the
/// narrative text are configuration data, not logic; renderers receive them
/// from here instead of embedding literals.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Page title across the top of the canvas.
    pub title: String,
    /// Attribution caption in the bottom-right corner.
    pub caption: String,
    /// Narrative paragraphs for the summary panel. Fixed editorial copy;
    /// the percentages are not recomputed from the loaded tables.
    pub summary: Vec<String>,
    /// The two years shown as expenditure pies (exact-match rows).
    pub pie_years: (i32, i32),
    /// Canvas size in pixels.
    pub size: (u32, u32),
    pub palette: Palette,
    pub sources: TableSources,
    pub output: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            title: "Evolution of Education: A 50-Year Statistical Review in the UK".to_string(),
            caption: "Prepared by the Education Statistics Unit".to_string(),
            summary: SUMMARY.iter().map(|s| s.to_string()).collect(),
            pie_years: (1970, 2020),
            size: (2000, 2400),
            palette: Palette::default(),
            sources: TableSources {
                enrollment: PathBuf::from("data/net_enroll.csv"),
                ratios: PathBuf::from("data/pt_ratio.csv"),
                expenditure: PathBuf::from("data/gdp_exp.csv"),
                literacy: PathBuf::from("data/literacy_rate.csv"),
            },
            output: PathBuf::from("education_report.svg"),
        }
    }
}

const SUMMARY: [&str; 4] = [
    "- Education expenditure as a percentage of GDP rose by 9.25% over 50 years, \
     paralleling notable improvements in literacy rates, with male literacy increasing \
     by 20.88% and female literacy by 47.23%, highlighting strides in gender equality \
     in education.",
    "- While primary school enrollment saw a slight decrease of 5.15%, secondary and \
     tertiary enrollments surged by 54.67% and 364.46%, respectively, reflecting a \
     significant shift towards higher education.",
    "- The decrease in the pupil-teacher ratio by 24.86% in primary schools suggests \
     improvements in educational quality, but the increase in ratios at secondary \
     (33.07%) and tertiary (67.60%) levels points to ongoing challenges in teacher \
     availability as education levels advance.",
    "- Overall, these trends indicate a positive trajectory in educational engagement \
     and access, especially in reducing gender disparities, but also emphasize the \
     need for consistent investment in educational infrastructure and resources to \
     sustain and enhance these outcomes.",
];
