//! SVG rendering for `Figure`. Hand-assembled markup: a background, one
//! plot region per panel, dashed gridlines, series geometry, annotation
//! boxes, and a legend. No external plotting dependency.

use std::fmt::Write as _;

use crate::error::CoreError;
use crate::style;

use super::{
    Annotation, BarColors, Figure, GridAxis, Layout, Legend, Line, Marker, Panel, Pie, Scatter,
    Series,
};

const FONT: &str = "Helvetica, Arial, sans-serif";
const TEXT_DARK: &str = "#333333";
const AXIS_COLOR: &str = "#BBBBBB";

#[derive(Debug, Clone, Copy)]
struct Region {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

#[derive(Debug, Clone, Copy)]
struct PlotArea {
    x0: f64,
    y0: f64,
    w: f64,
    h: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl PlotArea {
    fn px(&self, x: f64) -> f64 {
        self.x0 + (x - self.x_min) / (self.x_max - self.x_min) * self.w
    }

    fn py(&self, y: f64) -> f64 {
        self.y0 + self.h - (y - self.y_min) / (self.y_max - self.y_min) * self.h
    }
}

impl Figure {
    /// Render the figure to a standalone SVG document.
    pub fn render(&self) -> Result<String, CoreError> {
        self.validate()?;

        let (fig_w, fig_h) = match self.layout {
            Layout::TwoDown => (1000.0, 800.0),
            _ => (1000.0, 600.0),
        };

        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{fig_w}\" height=\"{fig_h}\" \
             viewBox=\"0 0 {fig_w} {fig_h}\" font-family=\"{FONT}\">\n"
        );
        let _ = write!(
            svg,
            "<rect x=\"0\" y=\"0\" width=\"{fig_w}\" height=\"{fig_h}\" fill=\"{}\"/>\n",
            style::FIGURE_BACKGROUND
        );

        let mut top = 8.0;
        if let Some(title) = &self.title {
            let lines: Vec<&str> = title.split('\n').collect();
            let mut y = top + 20.0;
            for line in &lines {
                let _ = write!(
                    svg,
                    "<text x=\"{}\" y=\"{y:.1}\" text-anchor=\"middle\" font-size=\"17\" \
                     font-weight=\"bold\" fill=\"{}\">{}</text>\n",
                    fig_w / 2.0,
                    style::Palette::DEFAULT.primary,
                    esc(line)
                );
                y += 21.0;
            }
            top += lines.len() as f64 * 21.0 + 10.0;
        }

        let regions: Vec<Region> = match self.layout {
            Layout::Single => vec![Region {
                x: 0.0,
                y: top,
                w: fig_w,
                h: fig_h - top,
            }],
            Layout::TwoAcross => vec![
                Region {
                    x: 0.0,
                    y: top,
                    w: fig_w / 2.0,
                    h: fig_h - top,
                },
                Region {
                    x: fig_w / 2.0,
                    y: top,
                    w: fig_w / 2.0,
                    h: fig_h - top,
                },
            ],
            Layout::TwoDown => {
                let usable = fig_h - top;
                let top_h = usable * 2.0 / 3.0;
                vec![
                    Region {
                        x: 0.0,
                        y: top,
                        w: fig_w,
                        h: top_h,
                    },
                    Region {
                        x: 0.0,
                        y: top + top_h,
                        w: fig_w,
                        h: usable - top_h,
                    },
                ]
            }
        };

        for (panel, region) in self.panels.iter().zip(regions) {
            render_panel(&mut svg, panel, region);
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

fn render_panel(svg: &mut String, panel: &Panel, region: Region) {
    if let Some(pie) = panel.series.iter().find_map(|s| match s {
        Series::Pie(p) => Some(p),
        _ => None,
    }) {
        render_pie_panel(svg, panel, pie, region);
        return;
    }
    if let Some(bars) = panel.series.iter().find_map(|s| match s {
        Series::HBars(h) => Some(h),
        _ => None,
    }) {
        render_hbar_panel(svg, panel, bars, region);
        return;
    }
    render_xy_panel(svg, panel, region);
}

// ---------------------------------------------------------------------------
// XY panels (lines, scatters, vertical bars)
// ---------------------------------------------------------------------------

fn render_xy_panel(svg: &mut String, panel: &Panel, region: Region) {
    let margin_left = if panel.y_label.is_some() { 76.0 } else { 56.0 };
    let margin_right = 22.0;
    let margin_top = if panel.title.is_some() {
        16.0 + panel.title.as_deref().map_or(0, |t| t.lines().count()) as f64 * 19.0
    } else {
        16.0
    };
    let margin_bottom = if panel.x_label.is_some() { 62.0 } else { 44.0 };

    let (x_range, y_range, cat_ticks) = xy_ranges(panel);

    let area = PlotArea {
        x0: region.x + margin_left,
        y0: region.y + margin_top,
        w: region.w - margin_left - margin_right,
        h: region.h - margin_top - margin_bottom,
        x_min: x_range.0,
        x_max: x_range.1,
        y_min: y_range.0,
        y_max: y_range.1,
    };

    let _ = write!(
        svg,
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
        area.x0,
        area.y0,
        area.w,
        area.h,
        style::PANEL_BACKGROUND
    );

    // Gridlines and tick labels.
    let grid = panel.grid.unwrap_or(GridAxis::None);
    let y_ticks = nice_ticks(area.y_min, area.y_max);
    for &t in &y_ticks {
        let y = area.py(t);
        if matches!(grid, GridAxis::Y | GridAxis::Both) {
            grid_line(svg, area.x0, y, area.x0 + area.w, y);
        }
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" fill=\"{}\">{}</text>\n",
            area.x0 - 7.0,
            y + 4.0,
            style::Palette::DEFAULT.neutral,
            fmt_tick(t, &y_ticks)
        );
    }

    let x_ticks: Vec<(f64, String)> = if let Some(ticks) = &panel.x_ticks {
        ticks.clone()
    } else if let Some(cats) = cat_ticks {
        cats
    } else {
        nice_ticks(area.x_min, area.x_max)
            .iter()
            .map(|&t| (t, fmt_tick(t, &[])))
            .collect()
    };
    for (pos, label) in &x_ticks {
        let x = area.px(*pos);
        if matches!(grid, GridAxis::X | GridAxis::Both) {
            grid_line(svg, x, area.y0, x, area.y0 + area.h);
        }
        multiline_text(
            svg,
            x,
            area.y0 + area.h + 15.0,
            label,
            10.5,
            "middle",
            style::Palette::DEFAULT.neutral,
            false,
        );
    }

    // Axis spines.
    let _ = write!(
        svg,
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{AXIS_COLOR}\" stroke-width=\"1.5\"/>\n",
        area.x0,
        area.y0 + area.h,
        area.x0 + area.w,
        area.y0 + area.h
    );
    let _ = write!(
        svg,
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{AXIS_COLOR}\" stroke-width=\"1.5\"/>\n",
        area.x0,
        area.y0,
        area.x0,
        area.y0 + area.h
    );

    // Spans and reference lines sit behind the data.
    for ann in &panel.annotations {
        if let Annotation::HSpan {
            y0,
            y1,
            color,
            opacity,
            ..
        } = ann
        {
            let top = area.py(*y1);
            let bottom = area.py(*y0);
            let _ = write!(
                svg,
                "<rect x=\"{:.1}\" y=\"{top:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{color}\" opacity=\"{opacity}\"/>\n",
                area.x0,
                area.w,
                bottom - top
            );
        }
    }

    for series in &panel.series {
        match series {
            Series::Bars(bars) => {
                let values = &bars.values;
                for (i, &v) in values.iter().enumerate() {
                    let color = match &bars.colors {
                        BarColors::Uniform(c) => c.as_str(),
                        BarColors::PerBar(cs) => cs[i].as_str(),
                    };
                    let x_left = area.px(i as f64 - 0.4);
                    let x_right = area.px(i as f64 + 0.4);
                    let y_top = area.py(v);
                    let y_base = area.py(area.y_min.max(0.0));
                    let _ = write!(
                        svg,
                        "<rect x=\"{x_left:.1}\" y=\"{y_top:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
                         fill=\"{color}\" opacity=\"0.85\" stroke=\"black\" stroke-width=\"0.7\"/>\n",
                        x_right - x_left,
                        (y_base - y_top).max(0.0)
                    );
                }
                if let Some(labels) = &bars.value_labels {
                    for (i, label) in labels.iter().enumerate() {
                        if label.is_empty() {
                            continue;
                        }
                        let lines = label.lines().count() as f64;
                        multiline_text(
                            svg,
                            area.px(i as f64),
                            area.py(values[i]) - 6.0 - (lines - 1.0) * 12.0,
                            label,
                            10.0,
                            "middle",
                            TEXT_DARK,
                            true,
                        );
                    }
                }
            }
            Series::GroupedBars(grouped) => {
                let n_groups = grouped.groups.len() as f64;
                let slot = 0.8 / n_groups;
                for (gi, group) in grouped.groups.iter().enumerate() {
                    for (i, &v) in group.values.iter().enumerate() {
                        let center = i as f64 - 0.4 + slot * (gi as f64 + 0.5);
                        let x_left = area.px(center - slot * 0.45);
                        let x_right = area.px(center + slot * 0.45);
                        let y_top = area.py(v);
                        let y_base = area.py(area.y_min.max(0.0));
                        let _ = write!(
                            svg,
                            "<rect x=\"{x_left:.1}\" y=\"{y_top:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
                             fill=\"{}\" opacity=\"0.85\" stroke=\"white\" stroke-width=\"1\"/>\n",
                            x_right - x_left,
                            (y_base - y_top).max(0.0),
                            group.color
                        );
                        if let Some(labels) = &group.value_labels {
                            if !labels[i].is_empty() {
                                multiline_text(
                                    svg,
                                    area.px(center),
                                    y_top - 4.0,
                                    &labels[i],
                                    8.5,
                                    "middle",
                                    TEXT_DARK,
                                    true,
                                );
                            }
                        }
                    }
                }
            }
            Series::Line(line) => render_line(svg, &area, line),
            Series::Scatter(scatter) => render_scatter(svg, &area, scatter),
            // Handled by the dedicated panel renderers.
            Series::HBars(_) | Series::Pie(_) => {}
        }
    }

    // Reference lines above the data, as matplotlib draws axhline/axvline.
    for ann in &panel.annotations {
        match ann {
            Annotation::HLine {
                y, color, dashed, ..
            } => {
                let yy = area.py(*y);
                let dash = if *dashed { " stroke-dasharray=\"6,4\"" } else { "" };
                let _ = write!(
                    svg,
                    "<line x1=\"{:.1}\" y1=\"{yy:.1}\" x2=\"{:.1}\" y2=\"{yy:.1}\" stroke=\"{color}\" stroke-width=\"1.8\"{dash}/>\n",
                    area.x0,
                    area.x0 + area.w
                );
            }
            Annotation::VLine { x, color, dashed } => {
                let xx = area.px(*x);
                let dash = if *dashed { " stroke-dasharray=\"6,4\"" } else { "" };
                let _ = write!(
                    svg,
                    "<line x1=\"{xx:.1}\" y1=\"{:.1}\" x2=\"{xx:.1}\" y2=\"{:.1}\" stroke=\"{color}\" stroke-width=\"1.8\"{dash}/>\n",
                    area.y0,
                    area.y0 + area.h
                );
            }
            _ => {}
        }
    }

    for ann in &panel.annotations {
        render_text_annotation(svg, &area, ann);
    }

    if let Some(position) = panel.legend {
        render_legend(svg, &area, panel, position);
    }

    render_axis_labels(svg, panel, region, &area);
}

fn render_line(svg: &mut String, area: &PlotArea, line: &Line) {
    let points: Vec<(f64, f64)> = line
        .x
        .iter()
        .zip(&line.y)
        .map(|(&x, &y)| (area.px(x), area.py(y)))
        .collect();

    if line.fill_opacity > 0.0 {
        let mut d = String::new();
        let baseline = area.py(area.y_min.max(0.0));
        let _ = write!(d, "M{:.1},{baseline:.1}", points[0].0);
        for (x, y) in &points {
            let _ = write!(d, " L{x:.1},{y:.1}");
        }
        let _ = write!(d, " L{:.1},{baseline:.1} Z", points[points.len() - 1].0);
        let _ = write!(
            svg,
            "<path d=\"{d}\" fill=\"{}\" opacity=\"{}\"/>\n",
            line.color, line.fill_opacity
        );
    }

    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let _ = write!(d, "{}{x:.1},{y:.1}", if i == 0 { "M" } else { " L" });
    }
    let dash = if line.dashed { " stroke-dasharray=\"7,4\"" } else { "" };
    let _ = write!(
        svg,
        "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{dash}/>\n",
        line.color, line.width
    );

    for (x, y) in &points {
        match line.marker {
            Marker::None => {}
            Marker::Circle => {
                let _ = write!(
                    svg,
                    "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{}\" fill=\"{}\" stroke=\"white\" stroke-width=\"1\"/>\n",
                    line.marker_size, line.color
                );
            }
            Marker::Square => {
                let s = line.marker_size;
                let _ = write!(
                    svg,
                    "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" stroke=\"white\" stroke-width=\"1\"/>\n",
                    x - s,
                    y - s,
                    s * 2.0,
                    s * 2.0,
                    line.color
                );
            }
            Marker::Triangle => {
                let s = line.marker_size * 1.3;
                let _ = write!(
                    svg,
                    "<path d=\"M{x:.1},{:.1} L{:.1},{:.1} L{:.1},{:.1} Z\" fill=\"{}\" stroke=\"white\" stroke-width=\"1\"/>\n",
                    y - s,
                    x - s,
                    y + s,
                    x + s,
                    y + s,
                    line.color
                );
            }
        }
    }

    if let Some(labels) = &line.point_labels {
        for (label, (x, y)) in labels.iter().zip(&points) {
            if label.is_empty() {
                continue;
            }
            multiline_text(svg, *x, y - 10.0, label, 9.5, "middle", TEXT_DARK, false);
        }
    }
}

fn render_scatter(svg: &mut String, area: &PlotArea, scatter: &Scatter) {
    for (&x, &y) in scatter.x.iter().zip(&scatter.y) {
        let _ = write!(
            svg,
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\" opacity=\"0.6\" stroke=\"white\" stroke-width=\"0.8\"/>\n",
            area.px(x),
            area.py(y),
            scatter.size,
            scatter.color
        );
    }
}

// ---------------------------------------------------------------------------
// Horizontal-bar panels
// ---------------------------------------------------------------------------

fn render_hbar_panel(svg: &mut String, panel: &Panel, bars: &super::HBars, region: Region) {
    let max_label = bars
        .labels
        .iter()
        .flat_map(|l| l.lines())
        .map(|l| l.len())
        .max()
        .unwrap_or(0) as f64;
    let margin_left = (max_label * 6.4 + 16.0).min(240.0);
    let margin_right = 60.0;
    let margin_top = if panel.title.is_some() { 36.0 } else { 14.0 };
    let margin_bottom = if panel.x_label.is_some() { 58.0 } else { 36.0 };

    let x_max = panel
        .x_limits
        .map(|(_, hi)| hi)
        .unwrap_or_else(|| bars.values.iter().cloned().fold(0.0, f64::max) * 1.12);

    let area = PlotArea {
        x0: region.x + margin_left,
        y0: region.y + margin_top,
        w: region.w - margin_left - margin_right,
        h: region.h - margin_top - margin_bottom,
        x_min: 0.0,
        x_max,
        y_min: 0.0,
        y_max: 1.0,
    };

    let _ = write!(
        svg,
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
        area.x0,
        area.y0,
        area.w,
        area.h,
        style::PANEL_BACKGROUND
    );

    let grid = panel.grid.unwrap_or(GridAxis::None);
    let x_ticks = nice_ticks(0.0, x_max);
    for &t in &x_ticks {
        let x = area.px(t);
        if matches!(grid, GridAxis::X | GridAxis::Both) {
            grid_line(svg, x, area.y0, x, area.y0 + area.h);
        }
        let _ = write!(
            svg,
            "<text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"{}\">{}</text>\n",
            area.y0 + area.h + 16.0,
            style::Palette::DEFAULT.neutral,
            fmt_tick(t, &x_ticks)
        );
    }

    let n = bars.values.len();
    let row_h = area.h / n as f64;
    let bar_h = row_h * 0.72;
    for (i, &v) in bars.values.iter().enumerate() {
        let color = match &bars.colors {
            BarColors::Uniform(c) => c.as_str(),
            BarColors::PerBar(cs) => cs[i].as_str(),
        };
        let y_top = area.y0 + row_h * i as f64 + (row_h - bar_h) / 2.0;
        let bar_w = (v / x_max) * area.w;
        let _ = write!(
            svg,
            "<rect x=\"{:.1}\" y=\"{y_top:.1}\" width=\"{bar_w:.1}\" height=\"{bar_h:.1}\" fill=\"{color}\" opacity=\"0.9\" stroke=\"white\" stroke-width=\"1.2\"/>\n",
            area.x0
        );
        multiline_text(
            svg,
            area.x0 - 7.0,
            y_top + bar_h / 2.0 + 3.5 - (bars.labels[i].lines().count() as f64 - 1.0) * 5.5,
            &bars.labels[i],
            9.5,
            "end",
            TEXT_DARK,
            false,
        );
        if let Some(labels) = &bars.value_labels {
            if !labels[i].is_empty() {
                let _ = write!(
                    svg,
                    "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"9.5\" font-weight=\"bold\" fill=\"{}\">{}</text>\n",
                    area.x0 + bar_w + 6.0,
                    y_top + bar_h / 2.0 + 3.5,
                    style::Palette::DEFAULT.primary,
                    esc(&labels[i])
                );
            }
        }
    }

    for ann in &panel.annotations {
        render_text_annotation(svg, &area, ann);
    }

    render_axis_labels(svg, panel, region, &area);
}

// ---------------------------------------------------------------------------
// Pie panels
// ---------------------------------------------------------------------------

fn render_pie_panel(svg: &mut String, panel: &Panel, pie: &Pie, region: Region) {
    let margin_top = if panel.title.is_some() { 40.0 } else { 16.0 };
    let cx = region.x + region.w / 2.0;
    let cy = region.y + margin_top + (region.h - margin_top) / 2.0;
    let radius = ((region.w.min(region.h - margin_top)) / 2.0 - 58.0).max(40.0);

    render_pie(svg, pie, cx, cy, radius);

    if let Some(title) = &panel.title {
        multiline_text(
            svg,
            region.x + region.w / 2.0,
            region.y + 22.0,
            title,
            13.5,
            "middle",
            style::Palette::DEFAULT.primary,
            true,
        );
    }
}

fn render_pie(svg: &mut String, pie: &Pie, cx: f64, cy: f64, radius: f64) {
    let total: f64 = pie.values.iter().sum();
    // matplotlib default: start at the given angle, sweep counterclockwise.
    let mut theta = 90.0_f64;

    for (i, &v) in pie.values.iter().enumerate() {
        let frac = v / total;
        let span = frac * 360.0;
        let theta_end = theta + span;
        let mid = (theta + theta_end) / 2.0;

        let offset = pie
            .explode
            .as_ref()
            .map(|e| e[i] * radius)
            .unwrap_or(0.0);
        let (ox, oy) = polar(cx, cy, mid, offset);

        let (x0, y0) = polar(ox, oy, theta, radius);
        let (x1, y1) = polar(ox, oy, theta_end, radius);
        let large = if span > 180.0 { 1 } else { 0 };
        let _ = write!(
            svg,
            "<path d=\"M{ox:.1},{oy:.1} L{x0:.1},{y0:.1} A{radius:.1},{radius:.1} 0 {large} 0 {x1:.1},{y1:.1} Z\" \
             fill=\"{}\" stroke=\"white\" stroke-width=\"1.5\"/>\n",
            pie.colors[i]
        );

        let (px, py) = polar(ox, oy, mid, radius * 0.62);
        let _ = write!(
            svg,
            "<text x=\"{px:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" font-weight=\"bold\" fill=\"white\">{:.*}%</text>\n",
            py + 4.0,
            pie.pct_decimals,
            frac * 100.0
        );

        let (lx, ly) = polar(ox, oy, mid, radius * 1.22);
        multiline_text(
            svg,
            lx,
            ly - (pie.labels[i].lines().count() as f64 - 1.0) * 6.0,
            &pie.labels[i],
            10.5,
            "middle",
            TEXT_DARK,
            true,
        );

        theta = theta_end;
    }
}

fn polar(cx: f64, cy: f64, angle_deg: f64, r: f64) -> (f64, f64) {
    let a = angle_deg.to_radians();
    // SVG y grows downward; negate the sine to sweep counterclockwise.
    (cx + r * a.cos(), cy - r * a.sin())
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn xy_ranges(panel: &Panel) -> ((f64, f64), (f64, f64), Option<Vec<(f64, String)>>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut categorical: Option<Vec<String>> = None;
    let mut baseline_zero = false;
    let mut numeric_x = false;
    let mut headroom = 1.10;

    let mut push_y = |v: f64, lo: &mut f64, hi: &mut f64| {
        *lo = lo.min(v);
        *hi = hi.max(v);
    };

    for series in &panel.series {
        match series {
            Series::Line(l) => {
                numeric_x = true;
                for &v in &l.x {
                    x_min = x_min.min(v);
                    x_max = x_max.max(v);
                }
                for &v in &l.y {
                    push_y(v, &mut y_min, &mut y_max);
                }
                if l.fill_opacity > 0.0 {
                    baseline_zero = true;
                }
                if l.point_labels.is_some() {
                    headroom = 1.18;
                }
            }
            Series::Scatter(s) => {
                numeric_x = true;
                for &v in &s.x {
                    x_min = x_min.min(v);
                    x_max = x_max.max(v);
                }
                for &v in &s.y {
                    push_y(v, &mut y_min, &mut y_max);
                }
            }
            Series::Bars(b) => {
                categorical = Some(b.labels.clone());
                baseline_zero = true;
                for &v in &b.values {
                    push_y(v, &mut y_min, &mut y_max);
                }
                if b.value_labels.is_some() {
                    headroom = 1.20;
                }
            }
            Series::GroupedBars(g) => {
                categorical = Some(g.labels.clone());
                baseline_zero = true;
                for group in &g.groups {
                    for &v in &group.values {
                        push_y(v, &mut y_min, &mut y_max);
                    }
                    if group.value_labels.is_some() {
                        headroom = 1.15;
                    }
                }
            }
            Series::HBars(_) | Series::Pie(_) => {}
        }
    }

    for ann in &panel.annotations {
        match ann {
            Annotation::HLine { y, .. } => push_y(*y, &mut y_min, &mut y_max),
            Annotation::HSpan { y0, y1, .. } => {
                push_y(*y0, &mut y_min, &mut y_max);
                push_y(*y1, &mut y_min, &mut y_max);
            }
            _ => {}
        }
    }

    let cat_ticks = categorical.as_ref().map(|labels| {
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| (i as f64, l.clone()))
            .collect::<Vec<_>>()
    });

    let x_range = panel.x_limits.unwrap_or_else(|| {
        let (mut lo, mut hi) = if let Some(labels) = &categorical {
            (-0.7, labels.len() as f64 - 0.3)
        } else {
            (x_min, x_max)
        };
        if numeric_x {
            lo = lo.min(x_min);
            hi = hi.max(x_max);
        }
        if categorical.is_none() {
            let pad = (hi - lo).abs().max(1e-9) * 0.045;
            lo -= pad;
            hi += pad;
        }
        (lo, hi)
    });

    let y_range = panel.y_limits.unwrap_or_else(|| {
        let lo = if baseline_zero && y_min >= 0.0 {
            0.0
        } else {
            y_min - (y_max - y_min).abs().max(1e-9) * 0.08
        };
        let hi = if y_max > 0.0 {
            y_max * headroom
        } else {
            y_max + (y_max - y_min).abs().max(1e-9) * 0.1
        };
        (lo, hi)
    });

    (x_range, y_range, cat_ticks)
}

fn render_text_annotation(svg: &mut String, area: &PlotArea, ann: &Annotation) {
    match ann {
        Annotation::Text {
            x,
            y,
            text,
            color,
            boxed,
        } => {
            let px = area.px(*x);
            let py = area.py(*y);
            let lines: Vec<&str> = text.split('\n').collect();
            let box_w = est_width(text, 10.5) + 14.0;
            let box_h = lines.len() as f64 * 14.0 + 8.0;
            if let Some(facecolor) = boxed {
                let _ = write!(
                    svg,
                    "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{box_w:.1}\" height=\"{box_h:.1}\" rx=\"5\" fill=\"{facecolor}\" opacity=\"0.8\"/>\n",
                    px - box_w / 2.0,
                    py - box_h / 2.0
                );
            }
            multiline_text(
                svg,
                px,
                py - (lines.len() as f64 - 1.0) * 7.0 + 3.5,
                text,
                10.5,
                "middle",
                color,
                true,
            );
        }
        Annotation::FracText {
            fx,
            fy,
            text,
            color,
            border,
        } => {
            let lines: Vec<&str> = text.split('\n').collect();
            let box_w = est_width(text, 10.5) + 16.0;
            let box_h = lines.len() as f64 * 14.5 + 10.0;
            let anchor_x = area.x0 + fx * area.w;
            let anchor_y = area.y0 + (1.0 - fy) * area.h;
            let bx = if *fx > 0.5 { anchor_x - box_w } else { anchor_x };
            let by = if *fy > 0.5 { anchor_y } else { anchor_y - box_h };
            let _ = write!(
                svg,
                "<rect x=\"{bx:.1}\" y=\"{by:.1}\" width=\"{box_w:.1}\" height=\"{box_h:.1}\" rx=\"5\" \
                 fill=\"white\" opacity=\"0.92\" stroke=\"{border}\" stroke-width=\"1.6\"/>\n"
            );
            multiline_text(
                svg,
                bx + 8.0,
                by + 16.0,
                text,
                10.5,
                "start",
                color,
                true,
            );
        }
        _ => {}
    }
}

fn legend_entries(panel: &Panel) -> Vec<(&'static str, String, String)> {
    let mut entries = Vec::new();
    for series in &panel.series {
        match series {
            Series::Line(l) => {
                if let Some(label) = &l.label {
                    entries.push(("line", l.color.clone(), label.clone()));
                }
            }
            Series::Scatter(s) => {
                if let Some(label) = &s.label {
                    entries.push(("dot", s.color.clone(), label.clone()));
                }
            }
            Series::GroupedBars(g) => {
                for group in &g.groups {
                    entries.push(("rect", group.color.clone(), group.name.clone()));
                }
            }
            _ => {}
        }
    }
    for ann in &panel.annotations {
        match ann {
            Annotation::HLine {
                color,
                label: Some(label),
                ..
            } => entries.push(("line", color.clone(), label.clone())),
            Annotation::HSpan {
                color,
                label: Some(label),
                ..
            } => entries.push(("rect", color.clone(), label.clone())),
            _ => {}
        }
    }
    entries
}

fn render_legend(svg: &mut String, area: &PlotArea, panel: &Panel, position: Legend) {
    let entries = legend_entries(panel);
    if entries.is_empty() {
        return;
    }

    let row_h = 17.0;
    let width = entries
        .iter()
        .map(|(_, _, label)| est_width(label, 10.5))
        .fold(0.0, f64::max)
        + 40.0;
    let height = entries.len() as f64 * row_h + 10.0;

    let (bx, by) = match position {
        Legend::UpperLeft => (area.x0 + 10.0, area.y0 + 10.0),
        Legend::UpperRight => (area.x0 + area.w - width - 10.0, area.y0 + 10.0),
        Legend::LowerLeft => (area.x0 + 10.0, area.y0 + area.h - height - 10.0),
        Legend::LowerRight => (
            area.x0 + area.w - width - 10.0,
            area.y0 + area.h - height - 10.0,
        ),
    };

    let _ = write!(
        svg,
        "<rect x=\"{bx:.1}\" y=\"{by:.1}\" width=\"{width:.1}\" height=\"{height:.1}\" rx=\"4\" \
         fill=\"white\" opacity=\"0.9\" stroke=\"#CCCCCC\" stroke-width=\"1\"/>\n"
    );

    for (i, (kind, color, label)) in entries.iter().enumerate() {
        let y = by + 9.0 + row_h * i as f64 + 8.0;
        match *kind {
            "line" => {
                let _ = write!(
                    svg,
                    "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{color}\" stroke-width=\"2.5\"/>\n",
                    bx + 7.0,
                    y - 4.0,
                    bx + 25.0,
                    y - 4.0
                );
            }
            "dot" => {
                let _ = write!(
                    svg,
                    "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"5\" fill=\"{color}\" opacity=\"0.7\"/>\n",
                    bx + 16.0,
                    y - 4.0
                );
            }
            _ => {
                let _ = write!(
                    svg,
                    "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"14\" height=\"10\" fill=\"{color}\" opacity=\"0.85\"/>\n",
                    bx + 9.0,
                    y - 9.0
                );
            }
        }
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{y:.1}\" font-size=\"10.5\" fill=\"{TEXT_DARK}\">{}</text>\n",
            bx + 31.0,
            esc(label)
        );
    }
}

fn render_axis_labels(svg: &mut String, panel: &Panel, region: Region, area: &PlotArea) {
    if let Some(title) = &panel.title {
        multiline_text(
            svg,
            area.x0 + area.w / 2.0,
            region.y + 18.0,
            title,
            13.5,
            "middle",
            style::Palette::DEFAULT.primary,
            true,
        );
    }
    if let Some(label) = &panel.x_label {
        multiline_text(
            svg,
            area.x0 + area.w / 2.0,
            region.y + region.h - 12.0,
            label,
            12.0,
            "middle",
            style::Palette::DEFAULT.primary,
            true,
        );
    }
    if let Some(label) = &panel.y_label {
        let x = region.x + 18.0;
        let y = area.y0 + area.h / 2.0;
        let _ = write!(
            svg,
            "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"middle\" font-size=\"12\" font-weight=\"bold\" \
             fill=\"{}\" transform=\"rotate(-90, {x:.1}, {y:.1})\">{}</text>\n",
            style::Palette::DEFAULT.primary,
            esc(&label.replace('\n', " "))
        );
    }
}

fn grid_line(svg: &mut String, x1: f64, y1: f64, x2: f64, y2: f64) {
    let _ = write!(
        svg,
        "<line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"{}\" \
         stroke-width=\"1\" stroke-dasharray=\"4,4\" opacity=\"0.3\"/>\n",
        style::Palette::DEFAULT.neutral
    );
}

fn multiline_text(
    svg: &mut String,
    x: f64,
    y: f64,
    text: &str,
    size: f64,
    anchor: &str,
    color: &str,
    bold: bool,
) {
    let weight = if bold { " font-weight=\"bold\"" } else { "" };
    let mut line_y = y;
    for line in text.split('\n') {
        let _ = write!(
            svg,
            "<text x=\"{x:.1}\" y=\"{line_y:.1}\" text-anchor=\"{anchor}\" font-size=\"{size}\"{weight} fill=\"{color}\">{}</text>\n",
            esc(line)
        );
        line_y += size * 1.25;
    }
}

fn est_width(text: &str, size: f64) -> f64 {
    let max_line = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    max_line as f64 * size * 0.60
}

fn nice_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let range = (hi - lo).abs().max(1e-9);
    let raw = range / 5.5;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let step = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    } * mag;

    let mut ticks = Vec::new();
    let mut t = (lo / step).ceil() * step;
    while t <= hi + step * 1e-6 {
        // Avoid -0.0 labels.
        ticks.push(if t.abs() < step * 1e-9 { 0.0 } else { t });
        t += step;
    }
    ticks
}

fn fmt_tick(t: f64, ticks: &[f64]) -> String {
    let step = if ticks.len() >= 2 {
        (ticks[1] - ticks[0]).abs()
    } else {
        t.abs().max(1.0)
    };
    if step >= 1.0 {
        format!("{t:.0}")
    } else if step >= 0.1 {
        format!("{t:.1}")
    } else {
        format!("{t:.2}")
    }
}

fn esc(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use crate::figure::{
        Annotation, BarGroup, Bars, Figure, GridAxis, GroupedBars, HBars, Layout, Legend, Line,
        Marker, Panel, Pie, Scatter,
    };
    use crate::style::Palette;

    fn line_panel() -> Panel {
        Panel::new()
            .title("Growth")
            .x_label("Year")
            .y_label("Volume")
            .grid(GridAxis::Both)
            .line(
                Line::new(
                    vec![2015.0, 2016.0, 2017.0],
                    vec![300.0, 420.0, 580.0],
                    Palette::DEFAULT.primary,
                )
                .marker(Marker::Circle)
                .fill(0.3)
                .label("Total volume"),
            )
    }

    #[test]
    fn render_is_deterministic() {
        let a = Figure::single(line_panel()).render().unwrap();
        let b = Figure::single(line_panel()).render().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn render_contains_expected_elements() {
        let svg = Figure::single(line_panel().legend(Legend::UpperLeft))
            .render()
            .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("Growth"));
        assert!(svg.contains("Total volume"));
        assert!(svg.contains("#3333B2"));
        // Fill path plus the stroked polyline.
        assert!(svg.matches("<path").count() >= 2);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let panel = Panel::new().line(Line::new(
            vec![1.0, 2.0],
            vec![1.0],
            Palette::DEFAULT.primary,
        ));
        assert!(Figure::single(panel).render().is_err());
    }

    #[test]
    fn empty_figure_is_rejected() {
        let fig = Figure {
            title: None,
            layout: Layout::Single,
            panels: vec![],
        };
        assert!(fig.render().is_err());
    }

    #[test]
    fn bars_render_one_rect_per_value() {
        let panel = Panel::new().bars(
            Bars::new(
                vec!["A".into(), "B".into(), "C".into()],
                vec![1.0, 2.0, 3.0],
                Palette::DEFAULT.success,
            )
            .value_labels(vec!["1".into(), "2".into(), "3".into()]),
        );
        let svg = Figure::single(panel).render().unwrap();
        // 3 bar rects + panel background + figure background.
        assert_eq!(svg.matches("<rect").count(), 5);
    }

    #[test]
    fn grouped_bars_and_annotations_render() {
        let panel = Panel::new()
            .grouped_bars(GroupedBars::new(
                vec!["X".into(), "Y".into()],
                vec![
                    BarGroup::new("Required", Palette::DEFAULT.warning, vec![10.0, 20.0]),
                    BarGroup::new("Current", Palette::DEFAULT.primary, vec![4.0, 8.0]),
                ],
            ))
            .annotate(Annotation::FracText {
                fx: 0.02,
                fy: 0.98,
                text: "Total Gap: $18B".into(),
                color: Palette::DEFAULT.warning.into(),
                border: Palette::DEFAULT.warning.into(),
            })
            .legend(Legend::UpperRight);
        let svg = Figure::single(panel).render().unwrap();
        assert!(svg.contains("Total Gap: $18B"));
        assert!(svg.contains("Required"));
        assert!(svg.contains("Current"));
    }

    #[test]
    fn pie_percentages_sum_to_hundred() {
        let pie = Pie::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![50.0, 30.0, 20.0],
            vec!["#111111".into(), "#222222".into(), "#333333".into()],
        );
        let svg = Figure::single(Panel::new().pie(pie)).render().unwrap();
        assert!(svg.contains("50.0%"));
        assert!(svg.contains("30.0%"));
        assert!(svg.contains("20.0%"));
    }

    #[test]
    fn hbars_render_with_value_labels() {
        let panel = Panel::new()
            .hbars(
                HBars::new(
                    vec!["EIB".into(), "France".into()],
                    vec![85.0, 72.0],
                    Palette::DEFAULT.secondary,
                )
                .value_labels(vec!["$85B".into(), "$72B".into()]),
            )
            .grid(GridAxis::X);
        let svg = Figure::single(panel).render().unwrap();
        assert!(svg.contains("$85B"));
        assert!(svg.contains("EIB"));
    }

    #[test]
    fn scatter_renders_all_points() {
        let panel = Panel::new().scatter(
            Scatter::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], "#2CA02C").label("Green"),
        );
        let svg = Figure::single(panel).render().unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
    }

    #[test]
    fn two_across_layout_renders_both_panels() {
        let fig = Figure::two_across(
            "Verification\nEvidence",
            line_panel(),
            Panel::new().pie(Pie::new(
                vec!["SPO".into(), "None".into()],
                vec![85.0, 15.0],
                vec!["#3333B2".into(), "#7F7F7F".into()],
            )),
        );
        let svg = fig.render().unwrap();
        assert!(svg.contains("Verification"));
        assert!(svg.contains("SPO"));
        assert!(svg.contains("Growth"));
    }

    #[test]
    fn ampersands_are_escaped() {
        let panel = Panel::new().bars(Bars::new(
            vec!["Water & Waste".into()],
            vec![1.0],
            "#2CA02C",
        ));
        let svg = Figure::single(panel).render().unwrap();
        assert!(svg.contains("Water &amp; Waste"));
        assert!(!svg.contains("Water & Waste"));
    }
}
