//! Report renderer: draws the panel layout into a single SVG document.
//!
//! Uses the plotters SVG backend, which emits text as <text> elements,
//! so no font files are needed. Output is a pure function of the
//! panels and the render config.

use crate::{
    config::RenderConfig,
    error::{DashboardError, DashboardResult},
    layout::{
        dash_segments, pie_slices, LineTrace, Palette, Panel, PanelBody, PieSlice, Stroke,
        TraceColor, GRID_COLS, GRID_ROWS,
    },
    summary::format_grouped,
};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::PathBuf;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type CategoryChart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 26;
const CAPTION_SIZE: u32 = 18;
const TICK_SIZE: u32 = 12;
const LEGEND_SIZE: u32 = 12;

const PANEL_MARGIN: i32 = 10;
const X_LABEL_AREA: i32 = 30;
const Y_LABEL_AREA: i32 = 70;

const LINE_WIDTH: u32 = 2;
const MARKER_RADIUS: i32 = 3;
const DASHES_PER_STEP: usize = 3;
const LEGEND_SWATCH: i32 = 20;
const BAR_HALF_WIDTH: f64 = 0.35;

const PIE_RADIUS_FRACTION: f64 = 0.38;
const PIE_LABEL_RADIUS: f64 = 0.65;
/// Arc sampling step for pie slice outlines, in radians.
const ARC_STEP: f64 = 0.03;

const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

const PASTEL: [RGBColor; 6] = [
    RGBColor(102, 197, 204),
    RGBColor(246, 207, 113),
    RGBColor(248, 156, 116),
    RGBColor(220, 176, 242),
    RGBColor(135, 197, 95),
    RGBColor(158, 185, 243),
];

const BOLD: [RGBColor; 6] = [
    RGBColor(127, 60, 141),
    RGBColor(17, 165, 121),
    RGBColor(57, 105, 172),
    RGBColor(242, 183, 1),
    RGBColor(231, 63, 116),
    RGBColor(128, 186, 90),
];

const DARK: [RGBColor; 6] = [
    RGBColor(46, 145, 229),
    RGBColor(225, 95, 153),
    RGBColor(28, 167, 28),
    RGBColor(251, 13, 13),
    RGBColor(218, 22, 255),
    RGBColor(34, 42, 42),
];

/// Render all panels into one SVG document.
pub fn render_svg(panels: &[Panel], config: &RenderConfig) -> DashboardResult<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let body = root
            .titled(&config.title, (FONT, TITLE_SIZE))
            .map_err(render_err)?;
        let cells = body.split_evenly((GRID_ROWS, GRID_COLS));

        for panel in panels {
            let area = panel
                .cell_index()
                .and_then(|i| cells.get(i))
                .ok_or_else(|| {
                    DashboardError::Render(format!(
                        "panel '{}' at ({}, {}) is outside the {GRID_ROWS}x{GRID_COLS} grid",
                        panel.title, panel.row, panel.col
                    ))
                })?;
            draw_panel(area, panel)?;
        }

        root.present().map_err(render_err)?;
    }
    Ok(buffer)
}

/// Render and write the SVG to `config.output`, creating parent directories.
pub fn write_svg(panels: &[Panel], config: &RenderConfig) -> DashboardResult<PathBuf> {
    let svg = render_svg(panels, config)?;
    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&config.output, svg)?;
    Ok(config.output.clone())
}

fn draw_panel(area: &Area<'_>, panel: &Panel) -> DashboardResult<()> {
    match &panel.body {
        PanelBody::Line { categories, traces } => draw_line_panel(area, panel, categories, traces),
        PanelBody::Bar {
            name,
            categories,
            values,
            palette,
        } => draw_bar_panel(area, panel, name, categories, values, *palette),
        PanelBody::Pie {
            name,
            categories,
            values,
            palette,
        } => draw_pie_panel(area, panel, name, categories, values, *palette),
    }
}

fn draw_line_panel(
    area: &Area<'_>,
    panel: &Panel,
    categories: &[&str],
    traces: &[LineTrace],
) -> DashboardResult<()> {
    let y = padded_range(traces.iter().flat_map(|t| t.values.iter().copied()));
    let decimals = tick_decimals(&y);
    let mut chart = category_chart(area, panel.title, categories.len(), y)?;
    draw_mesh(&mut chart, categories, panel.y_label, decimals)?;

    for trace in traces {
        let color = trace_color(trace.color);
        let style = color.stroke_width(LINE_WIDTH);
        let points: Vec<(f64, f64)> = trace
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();

        let anno = match trace.stroke {
            Stroke::Solid => chart.draw_series(LineSeries::new(points.iter().copied(), style)),
            Stroke::Dashed => chart.draw_series(
                dash_segments(&points, DASHES_PER_STEP)
                    .into_iter()
                    .map(|seg| PathElement::new(seg.to_vec(), style)),
            ),
        }
        .map_err(render_err)?;
        anno.label(trace.name).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], style)
        });

        if trace.markers {
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, MARKER_RADIUS, color.filled())),
                )
                .map_err(render_err)?;
        }
    }

    draw_legend(&mut chart)
}

fn draw_bar_panel(
    area: &Area<'_>,
    panel: &Panel,
    name: &str,
    categories: &[&str],
    values: &[f64],
    palette: Palette,
) -> DashboardResult<()> {
    let top = values.iter().copied().fold(0.0, f64::max);
    let bottom = values.iter().copied().fold(0.0, f64::min);
    let y = (bottom * 1.1)..(if top > 0.0 { top * 1.1 } else { 1.0 });
    let decimals = tick_decimals(&y);
    let mut chart = category_chart(area, panel.title, categories.len(), y)?;
    draw_mesh(&mut chart, categories, panel.y_label, decimals)?;

    let colors = palette_colors(palette);
    let swatch = colors[0];
    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, v)],
                colors[i % colors.len()].filled(),
            )
        }))
        .map_err(render_err)?
        .label(name.to_string())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], swatch.filled()));

    draw_legend(&mut chart)
}

fn draw_pie_panel(
    area: &Area<'_>,
    panel: &Panel,
    name: &str,
    categories: &[&str],
    values: &[f64],
    palette: Palette,
) -> DashboardResult<()> {
    let area = area
        .titled(panel.title, (FONT, CAPTION_SIZE))
        .map_err(render_err)?;
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * PIE_RADIUS_FRACTION;
    let colors = palette_colors(palette);

    let share_style = (FONT, TICK_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let legend_style = (FONT, LEGEND_SIZE).into_font().color(&BLACK);

    for (i, slice) in pie_slices(values).iter().enumerate() {
        let color = colors[i % colors.len()];
        area.draw(&Polygon::new(
            slice_outline(center, radius, slice),
            color.filled(),
        ))
        .map_err(render_err)?;
        area.draw(&Text::new(
            format!("{:.1}%", slice.share * 100.0),
            polar(center, radius * PIE_LABEL_RADIUS, slice.mid()),
            share_style.clone(),
        ))
        .map_err(render_err)?;
    }

    // Legend: trace name, then one swatch per category.
    area.draw(&Text::new(name.to_string(), (8, 4), legend_style.clone()))
        .map_err(render_err)?;
    for (i, category) in categories.iter().enumerate() {
        let y = 24 + i as i32 * 18;
        area.draw(&Rectangle::new(
            [(8, y), (20, y + 12)],
            colors[i % colors.len()].filled(),
        ))
        .map_err(render_err)?;
        area.draw(&Text::new(category.to_string(), (26, y), legend_style.clone()))
            .map_err(render_err)?;
    }
    Ok(())
}

fn category_chart<'a, 'b>(
    area: &'a Area<'b>,
    title: &str,
    categories: usize,
    y: Range<f64>,
) -> DashboardResult<CategoryChart<'a, 'b>> {
    ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(PANEL_MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(category_range(categories), y)
        .map_err(render_err)
}

fn draw_mesh(
    chart: &mut CategoryChart<'_, '_>,
    categories: &[&str],
    y_label: Option<&str>,
    y_decimals: usize,
) -> DashboardResult<()> {
    let x_fmt = |x: &f64| category_label(categories, *x);
    let y_fmt = |y: &f64| format_grouped(*y, y_decimals);

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style((FONT, TICK_SIZE));
    if let Some(label) = y_label {
        mesh.y_desc(label);
    }
    mesh.draw().map_err(render_err)
}

fn draw_legend<'a, 'b: 'a>(chart: &mut CategoryChart<'a, 'b>) -> DashboardResult<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT, LEGEND_SIZE))
        .draw()
        .map_err(render_err)
}

/// X range that centers category i on x = i.
fn category_range(categories: usize) -> Range<f64> {
    -0.5..(categories.max(1) as f64 - 0.5)
}

/// Category name for an integral tick, empty for anything in between.
fn category_label(categories: &[&str], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories
        .get(idx as usize)
        .map(|c| c.to_string())
        .unwrap_or_default()
}

/// Data range padded by 10% on each side; flat or empty data gets a unit span.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.1 } else { lo.abs().max(1.0) * 0.1 };
    (lo - pad)..(hi + pad)
}

fn tick_decimals(y: &Range<f64>) -> usize {
    if y.end - y.start < 20.0 {
        1
    } else {
        0
    }
}

fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Closed outline of a pie slice: the center followed by points along the arc.
fn slice_outline(center: (i32, i32), radius: f64, slice: &PieSlice) -> Vec<(i32, i32)> {
    let sweep = slice.end - slice.start;
    let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        let angle = slice.start + sweep * k as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}

fn trace_color(color: TraceColor) -> RGBColor {
    match color {
        TraceColor::Blue => RGBColor(31, 119, 180),
        TraceColor::Gray => RGBColor(128, 128, 128),
        TraceColor::Purple => RGBColor(128, 0, 128),
        TraceColor::Orange => RGBColor(255, 165, 0),
    }
}

fn palette_colors(palette: Palette) -> &'static [RGBColor] {
    match palette {
        Palette::Set2 => &SET2,
        Palette::Pastel => &PASTEL,
        Palette::Bold => &BOLD,
        Palette::Dark => &DARK,
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> DashboardError {
    DashboardError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn category_labels_only_on_integral_ticks() {
        let cats = ["Jan", "Fev", "Mar"];
        assert_eq!(category_label(&cats, 0.0), "Jan");
        assert_eq!(category_label(&cats, 2.0), "Mar");
        assert_eq!(category_label(&cats, 0.5), "");
        assert_eq!(category_label(&cats, -1.0), "");
        assert_eq!(category_label(&cats, 3.0), "");
    }

    #[test]
    fn padded_range_handles_flat_and_empty_data() {
        let r = padded_range([5.0, 5.0].into_iter());
        assert!(r.start < 5.0 && r.end > 5.0);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        let r = padded_range([0.0, 10.0].into_iter());
        assert_eq!(r, -1.0..11.0);
    }

    #[test]
    fn slice_outline_starts_at_center_and_follows_arc() {
        let slice = PieSlice {
            start: -FRAC_PI_2,
            end: -FRAC_PI_2 + PI,
            share: 0.5,
        };
        let pts = slice_outline((100, 100), 50.0, &slice);
        assert_eq!(pts[0], (100, 100));
        assert_eq!(pts[1], (100, 50));
        assert_eq!(*pts.last().unwrap(), (100, 150));
        for &(x, y) in &pts[1..] {
            let d = (((x - 100).pow(2) + (y - 100).pow(2)) as f64).sqrt();
            assert!((d - 50.0).abs() <= 1.0, "point ({x}, {y}) off the arc");
        }
    }

    #[test]
    fn palettes_are_non_empty() {
        for p in [Palette::Set2, Palette::Pastel, Palette::Bold, Palette::Dark] {
            assert!(!palette_colors(p).is_empty());
        }
    }
}
