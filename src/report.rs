use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

use crate::config::ReportConfig;
use crate::data::model::Dataset;
use crate::layout::{self, Rect, PANEL_GUTTER};
use crate::render::{panels, style};

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Render the full report page to `cfg.output`. The only side-effecting
/// exit point of the pipeline: panels draw strictly in sequence on regions
/// carved out of the one root drawing area.
pub fn render(dataset: &Dataset, cfg: &ReportConfig) -> Result<()> {
    // Resolve the pie-year lookups before the output backend exists, so a
    // missing year aborts without writing anything.
    let early_share = dataset.education_share(cfg.pie_years.0)?;
    let late_share = dataset.education_share(cfg.pie_years.1)?;

    let (width, height) = cfg.size;
    let root = SVGBackend::new(&cfg.output, (width, height)).into_drawing_area();
    root.fill(&cfg.palette.background)?;

    let grid = layout::page_layout(width, height);

    let title_area = region(&root, grid.title_band);
    let (tw, th) = title_area.dim_in_pixel();
    title_area.draw(&Text::new(
        cfg.title.as_str(),
        (tw as i32 / 2, th as i32 / 2),
        style::page_title().pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    let caption_area = region(&root, grid.caption_band);
    let (cw, ch) = caption_area.dim_in_pixel();
    caption_area.draw(&Text::new(
        cfg.caption.as_str(),
        (cw as i32 - 40, ch as i32 / 2),
        style::regular(style::CAPTION_SIZE).pos(Pos::new(HPos::Right, VPos::Center)),
    ))?;

    let panel = |rect: Rect| region(&root, rect.inset(PANEL_GUTTER));

    let ratio = panel(grid.ratio);
    panels::ratio_chart(&ratio, &dataset.ratios, &cfg.palette)?;
    style::draw_border(&ratio, &cfg.palette.border)?;

    let enrollment = panel(grid.enrollment);
    panels::enrollment_chart(&enrollment, &dataset.enrollment, &cfg.palette)?;
    style::draw_border(&enrollment, &cfg.palette.border)?;

    let pie_early = panel(grid.pie_early);
    panels::expenditure_pie(&pie_early, cfg.pie_years.0, early_share, &cfg.palette)?;
    style::draw_border(&pie_early, &cfg.palette.border)?;

    let pie_late = panel(grid.pie_late);
    panels::expenditure_pie(&pie_late, cfg.pie_years.1, late_share, &cfg.palette)?;
    style::draw_border(&pie_late, &cfg.palette.border)?;

    let literacy = panel(grid.literacy);
    panels::literacy_chart(&literacy, &dataset.literacy, &cfg.palette)?;
    style::draw_border(&literacy, &cfg.palette.border)?;

    let summary = panel(grid.summary);
    panels::summary_panel(&summary, &cfg.summary)?;

    root.present()?;
    log::info!("report written to {}", cfg.output.display());
    Ok(())
}

/// Carve a pixel rectangle out of the page as its own drawing area.
fn region<'a>(
    root: &DrawingArea<SVGBackend<'a>, Shift>,
    rect: Rect,
) -> DrawingArea<SVGBackend<'a>, Shift> {
    let (w, h) = root.dim_in_pixel();
    root.margin(
        rect.y0 as i32,
        (h - rect.y1) as i32,
        rect.x0 as i32,
        (w - rect.x1) as i32,
    )
}
