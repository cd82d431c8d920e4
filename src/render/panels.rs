use std::ops::Range;

use anyhow::Result;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::color::Palette;
use crate::data::model::{EnrollmentRow, LiteracyRow, RatioRow};
use crate::render::style::{self, Panel};

/// Stroke width of the enrollment lines.
const LINE_WIDTH: u32 = 4;
/// Bar width of the grouped ratio bars, in index units.
pub const BAR_WIDTH: f64 = 0.25;
/// Horizontal spacing between literacy bars, in index units.
pub const STACK_SPACING: f64 = 0.15;
/// Bar width of the literacy bars, in index units.
pub const STACK_BAR_WIDTH: f64 = 0.05;
/// Where the first pie slice starts, in degrees.
pub const PIE_START_ANGLE: f64 = 140.0;

const SUMMARY_LINE_HEIGHT: i32 = 38;
const SUMMARY_PARAGRAPH_GAP: i32 = 20;

// ---------------------------------------------------------------------------
// Enrollment line chart (row 1, column 0)
// ---------------------------------------------------------------------------

/// Three lines over the year axis, one per education level, with one x-tick
/// per sampled year.
pub fn enrollment_chart(
    panel: &Panel<'_>,
    rows: &[EnrollmentRow],
    palette: &Palette,
) -> Result<()> {
    let years: Vec<f64> = rows.iter().map(|r| f64::from(r.year)).collect();
    let ticks: Vec<(f64, String)> = rows
        .iter()
        .map(|r| (f64::from(r.year), r.year.to_string()))
        .collect();

    let (x_min, x_max) = min_max(years.iter().copied());
    let (y_min, y_max) = min_max(rows.iter().flat_map(|r| [r.primary, r.secondary, r.tertiary]));

    let mut chart = ChartBuilder::on(panel)
        .caption("Net Enrollment Rate", style::panel_title())
        .margin(12)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(
            style::KeyedF64::new(padded_range(x_min, x_max), years.clone()),
            padded_range(y_min, y_max),
        )?;

    style::format_axes(&mut chart, "Year", "Net Enrollment Rate (%)", &ticks, false)?;

    let getters: [fn(&EnrollmentRow) -> f64; 3] = [|r| r.primary, |r| r.secondary, |r| r.tertiary];
    for ((name, color), value) in palette.levels().into_iter().zip(getters) {
        chart
            .draw_series(LineSeries::new(
                rows.iter().map(move |r| (f64::from(r.year), value(r))),
                color.stroke_width(LINE_WIDTH),
            ))?
            .label(name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    style::draw_legend(&mut chart)
}

// ---------------------------------------------------------------------------
// Pupil-teacher ratio grouped bars (row 0, full span)
// ---------------------------------------------------------------------------

/// Per-level x offsets around each year's tick position, exactly one bar
/// width apart: Primary left of the tick, Secondary on it, Tertiary right.
pub(crate) fn group_offsets(width: f64) -> [f64; 3] {
    [-width, 0.0, width]
}

/// Three side-by-side bars per year, x-ticks labelled by year.
pub fn ratio_chart(panel: &Panel<'_>, rows: &[RatioRow], palette: &Palette) -> Result<()> {
    let positions: Vec<f64> = (0..rows.len()).map(|i| i as f64).collect();
    let ticks: Vec<(f64, String)> = rows
        .iter()
        .zip(&positions)
        .map(|(r, &x)| (x, r.year.to_string()))
        .collect();
    let (_, y_max) = min_max(rows.iter().flat_map(|r| [r.primary, r.secondary, r.tertiary]));
    let last = positions.last().copied().unwrap_or(0.0);

    let mut chart = ChartBuilder::on(panel)
        .caption(
            "Pupil-Teacher Ratio by Education Level and Year",
            style::panel_title(),
        )
        .margin(12)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(
            style::KeyedF64::new(-0.75..last + 0.75, positions.clone()),
            0.0..y_max * 1.25,
        )?;

    style::format_axes(&mut chart, "Year", "Pupil-Teacher Ratio", &ticks, false)?;

    let getters: [fn(&RatioRow) -> f64; 3] = [|r| r.primary, |r| r.secondary, |r| r.tertiary];
    let series = palette.levels().into_iter().zip(getters);
    for (((name, color), value), offset) in series.zip(group_offsets(BAR_WIDTH)) {
        chart
            .draw_series(rows.iter().enumerate().map(|(i, r)| {
                let center = i as f64 + offset;
                Rectangle::new(
                    [
                        (center - BAR_WIDTH / 2.0, 0.0),
                        (center + BAR_WIDTH / 2.0, value(r)),
                    ],
                    color.filled(),
                )
            }))?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
    }

    style::draw_legend(&mut chart)
}

// ---------------------------------------------------------------------------
// Expenditure pies (row 1, columns 1 and 2)
// ---------------------------------------------------------------------------

/// Two-slice split for one year: the education share and the remainder of
/// the budget. Always sums to 100.
pub(crate) fn expenditure_split(share: f64) -> [f64; 2] {
    [share, 100.0 - share]
}

/// One expenditure pie. The year's share is resolved by the composer before
/// any panel is drawn, so the exact-match lookup cannot fail here.
pub fn expenditure_pie(panel: &Panel<'_>, year: i32, share: f64, palette: &Palette) -> Result<()> {
    let (w, h) = panel.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2 + 12);
    let radius = f64::from(w.min(h)) * 0.28;
    let sizes = expenditure_split(share);
    let colors = [palette.gdp_exp, palette.bar];
    let labels = ["Education", "Other"];

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(PIE_START_ANGLE);
    pie.label_style(style::bold(style::SLICE_LABEL_SIZE));
    pie.percentages(style::bold(style::SLICE_LABEL_SIZE));
    panel.draw(&pie)?;

    panel.draw(&Text::new(
        format!("{year} Gov. Expenditure (% of GDP)"),
        (w as i32 / 2, 16),
        style::bold(style::PIE_TITLE_SIZE).pos(Pos::new(HPos::Center, VPos::Top)),
    ))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Literacy stacked bars (row 2, full span)
// ---------------------------------------------------------------------------

/// Stacked segments for one year as (bottom, top) pairs, Male first. The
/// Female segment sits on top of the Male value.
pub(crate) fn stacked_segments(male: f64, female: f64) -> [(f64, f64); 2] {
    [(0.0, male), (male, male + female)]
}

/// One narrow stacked bar per year at a fixed spacing, year ticks rotated
/// for readability.
pub fn literacy_chart(panel: &Panel<'_>, rows: &[LiteracyRow], palette: &Palette) -> Result<()> {
    let positions: Vec<f64> = (0..rows.len()).map(|i| i as f64 * STACK_SPACING).collect();
    let ticks: Vec<(f64, String)> = rows
        .iter()
        .zip(&positions)
        .map(|(r, &x)| (x, r.year.to_string()))
        .collect();
    let (_, y_max) = min_max(rows.iter().map(|r| r.male + r.female));
    let last = positions.last().copied().unwrap_or(0.0);
    let half = STACK_BAR_WIDTH / 2.0;

    let mut chart = ChartBuilder::on(panel)
        .caption("Literacy Rate by Gender", style::panel_title())
        .margin(12)
        .x_label_area_size(90)
        .y_label_area_size(90)
        .build_cartesian_2d(
            style::KeyedF64::new(-STACK_SPACING..last + STACK_SPACING, positions.clone()),
            0.0..y_max * 1.1,
        )?;

    style::format_axes(&mut chart, "Year", "Literacy Rate (%)", &ticks, true)?;

    let male = palette.male;
    chart
        .draw_series(rows.iter().zip(&positions).map(|(r, &x)| {
            let [(bottom, top), _] = stacked_segments(r.male, r.female);
            Rectangle::new([(x - half, bottom), (x + half, top)], male.filled())
        }))?
        .label("Male")
        .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], male.filled()));

    let female = palette.female;
    chart
        .draw_series(rows.iter().zip(&positions).map(|(r, &x)| {
            let [_, (bottom, top)] = stacked_segments(r.male, r.female);
            Rectangle::new([(x - half, bottom), (x + half, top)], female.filled())
        }))?
        .label("Female")
        .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], female.filled()));

    style::draw_legend(&mut chart)
}

// ---------------------------------------------------------------------------
// Summary text block (row 3, full span)
// ---------------------------------------------------------------------------

/// Greedy word-wrap at a character budget. A single over-long word gets its
/// own line rather than being split.
pub(crate) fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// The narrative block: fixed editorial paragraphs, left-aligned, no axes
/// and no border.
pub fn summary_panel(panel: &Panel<'_>, paragraphs: &[String]) -> Result<()> {
    let (w, _) = panel.dim_in_pixel();
    let text_style = style::regular(style::SUMMARY_SIZE);

    // Rough per-character width of the serif face at this size.
    let max_chars = (f64::from(w.saturating_sub(48)) / (f64::from(style::SUMMARY_SIZE) * 0.46))
        .max(1.0) as usize;

    let mut y = 30;
    for paragraph in paragraphs {
        for line in wrap(paragraph, max_chars) {
            panel.draw(&Text::new(line, (24, y), text_style.clone()))?;
            y += SUMMARY_LINE_HEIGHT;
        }
        y += SUMMARY_PARAGRAPH_GAP;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared range helpers
// ---------------------------------------------------------------------------

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Pad a data range so marks do not sit on the panel edge.
fn padded_range(min: f64, max: f64) -> Range<f64> {
    let span = (max - min).max(1.0);
    (min - span * 0.05)..(max + span * 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_offsets_step_by_exactly_one_bar_width() {
        let [primary, secondary, tertiary] = group_offsets(BAR_WIDTH);
        assert!(primary < secondary && secondary < tertiary);
        assert_eq!(secondary - primary, BAR_WIDTH);
        assert_eq!(tertiary - secondary, BAR_WIDTH);
    }

    #[test]
    fn expenditure_split_sums_to_exactly_one_hundred() {
        for share in [3.0, 12.25, 0.0, 100.0] {
            let [education, other] = expenditure_split(share);
            assert_eq!(education + other, 100.0);
        }
    }

    #[test]
    fn female_segment_sits_on_top_of_male() {
        let [(male_bottom, male_top), (female_bottom, female_top)] =
            stacked_segments(78.0, 64.0);
        assert_eq!(male_bottom, 0.0);
        assert_eq!(male_top, 78.0);
        assert_eq!(female_bottom, 78.0);
        assert_eq!(female_top, 78.0 + 64.0);
    }

    #[test]
    fn wrap_respects_the_character_budget() {
        let lines = wrap("one two three four five six", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "one two three four five six");
    }

    #[test]
    fn wrap_keeps_an_overlong_word_whole() {
        let lines = wrap("a extraordinarily b", 5);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn padded_range_contains_the_data() {
        let range = padded_range(1970.0, 2020.0);
        assert!(range.start < 1970.0 && range.end > 2020.0);
    }
}
