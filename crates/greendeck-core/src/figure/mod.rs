//! Figure model for the lecture charts and its SVG renderer.
//!
//! A `Figure` is one output page: a suptitle plus one or two `Panel`s, each
//! holding series (lines, scatters, bars, pies), annotations, and axis
//! settings. `Figure::render` produces a standalone SVG string; rendering
//! is a pure function of the figure contents, so a rebuilt chart is
//! byte-identical to the previous run.

mod render;

use crate::error::CoreError;

/// Panel arrangement on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Single,
    TwoAcross,
    /// Two rows, the top twice the height of the bottom.
    TwoDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legend {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Which axes get dashed gridlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    None,
    X,
    Y,
    Both,
}

#[derive(Debug, Clone)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: String,
    pub label: Option<String>,
    pub marker: Marker,
    pub marker_size: f64,
    pub width: f64,
    pub dashed: bool,
    /// Shade the area down to y=0 at this opacity (0 disables).
    pub fill_opacity: f64,
    /// Per-point labels drawn above the markers; empty strings are skipped.
    pub point_labels: Option<Vec<String>>,
}

impl Line {
    pub fn new(x: Vec<f64>, y: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            color: color.into(),
            label: None,
            marker: Marker::None,
            marker_size: 4.0,
            width: 2.5,
            dashed: false,
            fill_opacity: 0.0,
            point_labels: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn fill(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity;
        self
    }

    pub fn point_labels(mut self, labels: Vec<String>) -> Self {
        self.point_labels = Some(labels);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: String,
    pub label: Option<String>,
    /// Marker radius in px.
    pub size: f64,
}

impl Scatter {
    pub fn new(x: Vec<f64>, y: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            color: color.into(),
            label: None,
            size: 5.5,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone)]
pub enum BarColors {
    Uniform(String),
    PerBar(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Bars {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: BarColors,
    pub value_labels: Option<Vec<String>>,
}

impl Bars {
    pub fn new(labels: Vec<String>, values: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            labels,
            values,
            colors: BarColors::Uniform(color.into()),
            value_labels: None,
        }
    }

    pub fn per_bar_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = BarColors::PerBar(colors);
        self
    }

    pub fn value_labels(mut self, labels: Vec<String>) -> Self {
        self.value_labels = Some(labels);
        self
    }
}

#[derive(Debug, Clone)]
pub struct BarGroup {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
    pub value_labels: Option<Vec<String>>,
}

impl BarGroup {
    pub fn new(name: impl Into<String>, color: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            values,
            value_labels: None,
        }
    }

    pub fn value_labels(mut self, labels: Vec<String>) -> Self {
        self.value_labels = Some(labels);
        self
    }
}

#[derive(Debug, Clone)]
pub struct GroupedBars {
    pub labels: Vec<String>,
    pub groups: Vec<BarGroup>,
}

impl GroupedBars {
    pub fn new(labels: Vec<String>, groups: Vec<BarGroup>) -> Self {
        Self { labels, groups }
    }
}

/// Horizontal bars, drawn top-down in the given order.
#[derive(Debug, Clone)]
pub struct HBars {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: BarColors,
    pub value_labels: Option<Vec<String>>,
}

impl HBars {
    pub fn new(labels: Vec<String>, values: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            labels,
            values,
            colors: BarColors::Uniform(color.into()),
            value_labels: None,
        }
    }

    pub fn per_bar_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = BarColors::PerBar(colors);
        self
    }

    pub fn value_labels(mut self, labels: Vec<String>) -> Self {
        self.value_labels = Some(labels);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Pie {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    /// Wedge offsets as a fraction of the radius.
    pub explode: Option<Vec<f64>>,
    /// Decimal places in the in-wedge percentage labels.
    pub pct_decimals: usize,
}

impl Pie {
    pub fn new(labels: Vec<String>, values: Vec<f64>, colors: Vec<String>) -> Self {
        Self {
            labels,
            values,
            colors,
            explode: None,
            pct_decimals: 1,
        }
    }

    pub fn explode(mut self, offsets: Vec<f64>) -> Self {
        self.explode = Some(offsets);
        self
    }

    pub fn pct_decimals(mut self, decimals: usize) -> Self {
        self.pct_decimals = decimals;
        self
    }
}

#[derive(Debug, Clone)]
pub enum Series {
    Line(Line),
    Scatter(Scatter),
    Bars(Bars),
    GroupedBars(GroupedBars),
    HBars(HBars),
    Pie(Pie),
}

#[derive(Debug, Clone)]
pub enum Annotation {
    /// Text at data coordinates. `boxed` draws a rounded rectangle behind
    /// the text in the given fill color.
    Text {
        x: f64,
        y: f64,
        text: String,
        color: String,
        boxed: Option<String>,
    },
    /// Text anchored at axes-fraction coordinates (0,0 = lower left),
    /// drawn as a bordered summary box.
    FracText {
        fx: f64,
        fy: f64,
        text: String,
        color: String,
        border: String,
    },
    HLine {
        y: f64,
        color: String,
        dashed: bool,
        label: Option<String>,
    },
    VLine {
        x: f64,
        color: String,
        dashed: bool,
    },
    HSpan {
        y0: f64,
        y1: f64,
        color: String,
        opacity: f64,
        label: Option<String>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    /// Override tick positions and labels on the x axis.
    pub x_ticks: Option<Vec<(f64, String)>>,
    pub grid: Option<GridAxis>,
    pub legend: Option<Legend>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.series.push(Series::Line(line));
        self
    }

    pub fn scatter(mut self, scatter: Scatter) -> Self {
        self.series.push(Series::Scatter(scatter));
        self
    }

    pub fn bars(mut self, bars: Bars) -> Self {
        self.series.push(Series::Bars(bars));
        self
    }

    pub fn grouped_bars(mut self, bars: GroupedBars) -> Self {
        self.series.push(Series::GroupedBars(bars));
        self
    }

    pub fn hbars(mut self, bars: HBars) -> Self {
        self.series.push(Series::HBars(bars));
        self
    }

    pub fn pie(mut self, pie: Pie) -> Self {
        self.series.push(Series::Pie(pie));
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn x_limits(mut self, lo: f64, hi: f64) -> Self {
        self.x_limits = Some((lo, hi));
        self
    }

    pub fn y_limits(mut self, lo: f64, hi: f64) -> Self {
        self.y_limits = Some((lo, hi));
        self
    }

    pub fn x_ticks(mut self, ticks: Vec<(f64, String)>) -> Self {
        self.x_ticks = Some(ticks);
        self
    }

    pub fn grid(mut self, axis: GridAxis) -> Self {
        self.grid = Some(axis);
        self
    }

    pub fn legend(mut self, position: Legend) -> Self {
        self.legend = Some(position);
        self
    }

    fn name(&self, index: usize) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("panel {index}"))
    }

    /// Parallel-sequence invariant: every per-point vector in a series has
    /// the same length as its data.
    fn validate(&self, index: usize) -> Result<(), CoreError> {
        let mismatch = |left: usize, right: usize| CoreError::LengthMismatch {
            panel: self.name(index),
            left,
            right,
        };
        for series in &self.series {
            match series {
                Series::Line(l) => {
                    if l.x.is_empty() {
                        return Err(CoreError::EmptySeries {
                            panel: self.name(index),
                        });
                    }
                    if l.x.len() != l.y.len() {
                        return Err(mismatch(l.x.len(), l.y.len()));
                    }
                    if let Some(labels) = &l.point_labels {
                        if labels.len() != l.x.len() {
                            return Err(mismatch(l.x.len(), labels.len()));
                        }
                    }
                }
                Series::Scatter(s) => {
                    if s.x.is_empty() {
                        return Err(CoreError::EmptySeries {
                            panel: self.name(index),
                        });
                    }
                    if s.x.len() != s.y.len() {
                        return Err(mismatch(s.x.len(), s.y.len()));
                    }
                }
                Series::Bars(b) => {
                    if b.labels.len() != b.values.len() {
                        return Err(mismatch(b.labels.len(), b.values.len()));
                    }
                    if let BarColors::PerBar(colors) = &b.colors {
                        if colors.len() != b.values.len() {
                            return Err(mismatch(b.values.len(), colors.len()));
                        }
                    }
                    if let Some(labels) = &b.value_labels {
                        if labels.len() != b.values.len() {
                            return Err(mismatch(b.values.len(), labels.len()));
                        }
                    }
                }
                Series::GroupedBars(g) => {
                    for group in &g.groups {
                        if group.values.len() != g.labels.len() {
                            return Err(mismatch(g.labels.len(), group.values.len()));
                        }
                        if let Some(labels) = &group.value_labels {
                            if labels.len() != group.values.len() {
                                return Err(mismatch(group.values.len(), labels.len()));
                            }
                        }
                    }
                }
                Series::HBars(h) => {
                    if h.labels.len() != h.values.len() {
                        return Err(mismatch(h.labels.len(), h.values.len()));
                    }
                    if let BarColors::PerBar(colors) = &h.colors {
                        if colors.len() != h.values.len() {
                            return Err(mismatch(h.values.len(), colors.len()));
                        }
                    }
                    if let Some(labels) = &h.value_labels {
                        if labels.len() != h.values.len() {
                            return Err(mismatch(h.values.len(), labels.len()));
                        }
                    }
                }
                Series::Pie(p) => {
                    if p.labels.len() != p.values.len() {
                        return Err(mismatch(p.labels.len(), p.values.len()));
                    }
                    if p.colors.len() != p.values.len() {
                        return Err(mismatch(p.values.len(), p.colors.len()));
                    }
                    if let Some(explode) = &p.explode {
                        if explode.len() != p.values.len() {
                            return Err(mismatch(p.values.len(), explode.len()));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub title: Option<String>,
    pub layout: Layout,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn single(panel: Panel) -> Self {
        Self {
            title: None,
            layout: Layout::Single,
            panels: vec![panel],
        }
    }

    pub fn two_across(title: impl Into<String>, left: Panel, right: Panel) -> Self {
        Self {
            title: Some(title.into()),
            layout: Layout::TwoAcross,
            panels: vec![left, right],
        }
    }

    pub fn two_down(top: Panel, bottom: Panel) -> Self {
        Self {
            title: None,
            layout: Layout::TwoDown,
            panels: vec![top, bottom],
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.panels.is_empty() {
            return Err(CoreError::EmptyFigure);
        }
        for (i, panel) in self.panels.iter().enumerate() {
            panel.validate(i)?;
        }
        Ok(())
    }
}
