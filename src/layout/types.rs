use serde::Serialize;

use crate::ir::ChartKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotArea {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub anchor: TextAnchor,
}

impl TextLabel {
    pub fn new(x: f32, y: f32, text: impl Into<String>, anchor: TextAnchor) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            anchor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendOrientation {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub x: f32,
    pub y: f32,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    pub orientation: LegendOrientation,
    pub swatch_size: f32,
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickLayout {
    pub y: f32,
    pub value: f64,
    pub label: TextLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxesLayout {
    pub plot: PlotArea,
    pub baseline_y: f32,
    pub show_grid: bool,
    pub x_labels: Vec<TextLabel>,
    pub y_ticks: Vec<TickLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayout {
    pub dataset: usize,
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLayout {
    pub label: String,
    pub color: String,
    pub stroke_width: f32,
    pub points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceLayout {
    pub label: String,
    pub value: f64,
    pub percent: f64,
    /// Degrees, measured clockwise from the positive x axis (-90 is 12 o'clock).
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
}

impl SliceLayout {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieLayout {
    pub center: (f32, f32),
    pub outer_radius: f32,
    /// Zero for a pie, the doughnut hole radius otherwise.
    pub inner_radius: f32,
    pub total: f64,
    pub slices: Vec<SliceLayout>,
    pub center_label: Option<TextLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorLayout {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartData {
    Bar { axes: AxesLayout, bars: Vec<BarLayout> },
    Line { axes: AxesLayout, series: Vec<SeriesLayout> },
    Area { axes: AxesLayout, series: Vec<SeriesLayout> },
    Scatter { axes: AxesLayout, series: Vec<SeriesLayout> },
    Pie(PieLayout),
    Doughnut(PieLayout),
    Error(ErrorLayout),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub kind: Option<ChartKind>,
    pub width: u32,
    pub height: u32,
    pub title: Option<TextLabel>,
    pub legend: Option<LegendLayout>,
    pub value_labels: Vec<TextLabel>,
    pub data: ChartData,
}

impl ChartLayout {
    pub fn is_error(&self) -> bool {
        matches!(self.data, ChartData::Error(_))
    }
}
