use std::ops::Range;

use anyhow::Result;
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::combinators::{BindKeyPoints, WithKeyPoints};
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use plotters_svg::SVGBackend;

// ---------------------------------------------------------------------------
// Shared typography
// ---------------------------------------------------------------------------

pub const FONT: FontFamily<'static> = FontFamily::Serif;

pub const PAGE_TITLE_SIZE: u32 = 40;
pub const PANEL_TITLE_SIZE: u32 = 25;
pub const PIE_TITLE_SIZE: u32 = 20;
pub const AXIS_LABEL_SIZE: u32 = 20;
pub const TICK_SIZE: u32 = 18;
pub const LEGEND_SIZE: u32 = 18;
pub const SLICE_LABEL_SIZE: u32 = 14;
pub const SUMMARY_SIZE: u32 = 25;
pub const CAPTION_SIZE: u32 = 20;

/// Stroke width of the decorative panel borders.
pub const BORDER_WIDTH: u32 = 3;

/// Bold serif text at the given size.
pub fn bold(size: u32) -> TextStyle<'static> {
    FontDesc::new(FONT, f64::from(size), FontStyle::Bold).color(&BLACK)
}

/// Regular serif text at the given size.
pub fn regular(size: u32) -> TextStyle<'static> {
    FontDesc::new(FONT, f64::from(size), FontStyle::Normal).color(&BLACK)
}

pub fn page_title() -> TextStyle<'static> {
    bold(PAGE_TITLE_SIZE)
}

pub fn panel_title() -> TextStyle<'static> {
    bold(PANEL_TITLE_SIZE)
}

fn axis_label() -> TextStyle<'static> {
    bold(AXIS_LABEL_SIZE)
}

fn tick_label() -> TextStyle<'static> {
    bold(TICK_SIZE)
}

fn legend_label() -> TextStyle<'static> {
    bold(LEGEND_SIZE)
}

// ---------------------------------------------------------------------------
// Chart-panel plumbing
// ---------------------------------------------------------------------------

/// One panel's drawing region on the page.
pub type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// An f64 coordinate with explicit key points that also carries the float
/// value formatter plotters omits for `WithKeyPoints<RangedCoordf64>` (its
/// `FormatOption` is `NoDefaultFormatting`, so the blanket `ValueFormatter`
/// impl does not apply and `configure_mesh` cannot be called). Everything is
/// delegated to the wrapped coordinate; only the formatter is added.
pub struct KeyedF64(WithKeyPoints<RangedCoordf64>);

impl KeyedF64 {
    /// Wrap an f64 range, binding ticks to exactly the given key points.
    pub fn new(range: Range<f64>, points: Vec<f64>) -> Self {
        KeyedF64(range.with_key_points(points))
    }
}

impl Ranged for KeyedF64 {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.0.key_points(hint)
    }

    fn range(&self) -> Range<f64> {
        self.0.range()
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

impl ValueFormatter<f64> for KeyedF64 {
    fn format(value: &f64) -> String {
        <RangedCoordf64 as ValueFormatter<f64>>::format(value)
    }
}

/// Chart context shared by the axis charts: an f64 x-axis with explicitly
/// bound tick positions (one per sampled year).
pub type PanelChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<KeyedF64, RangedCoordf64>>;

/// Apply the shared axis formatting: bold axis descriptions, bold tick
/// labels, one x-tick per entry in `ticks`, no grid lines.
pub fn format_axes(
    chart: &mut PanelChart<'_, '_>,
    x_desc: &str,
    y_desc: &str,
    ticks: &[(f64, String)],
    rotate_x_labels: bool,
) -> Result<()> {
    let label_for = |x: &f64| {
        ticks
            .iter()
            .find(|(pos, _)| (pos - x).abs() < 1e-6)
            .map(|(_, label)| label.clone())
            .unwrap_or_default()
    };
    let x_label_style = if rotate_x_labels {
        tick_label().transform(FontTransform::Rotate90)
    } else {
        tick_label()
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(axis_label())
        .label_style(tick_label())
        .x_label_style(x_label_style)
        .x_labels(ticks.len())
        .x_label_formatter(&label_for)
        .draw()?;
    Ok(())
}

/// Apply the shared legend styling to a chart whose series carry labels.
pub fn draw_legend<'a>(chart: &mut PanelChart<'a, 'a>) -> Result<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.stroke_width(1))
        .label_font(legend_label())
        .draw()?;
    Ok(())
}

/// Draw the decorative border over the panel's full pixel extent. Overlay
/// coordinates only; the data shown never moves the border.
pub fn draw_border(panel: &Panel<'_>, color: &RGBColor) -> Result<()> {
    let (w, h) = panel.dim_in_pixel();
    panel.draw(&Rectangle::new(
        [(0, 0), (w as i32 - 1, h as i32 - 1)],
        color.stroke_width(BORDER_WIDTH),
    ))?;
    Ok(())
}
