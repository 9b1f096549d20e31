mod bar;
mod error;
mod line;
mod pie;
pub mod scale;
mod scatter;
pub mod text;
mod types;

pub use error::{ChartDataError, validate};
pub use types::*;

use crate::config::{ChartConfig, RenderOptions};
use crate::ir::{ChartKind, ChartSpec};
use crate::theme::ChartTheme;

use bar::compute_bar_layout;
use error::compute_error_layout;
use line::{compute_area_layout, compute_line_layout};
use pie::compute_pie_layout;
use scale::{CategoryAxis, CategoryMode, ValueScale};
use scatter::compute_scatter_layout;
use text::{estimate_text_width, format_number};

/// Bands reserved around a Cartesian plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianPlan {
    pub plot: PlotArea,
    pub title_band: f32,
    pub legend_band: f32,
}

/// Pie/doughnut placement: the circle and the legend column to its right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialPlan {
    pub center: (f32, f32),
    pub outer_radius: f32,
    pub title_band: f32,
    pub legend_width: f32,
}

pub fn plan_cartesian(
    width: f32,
    height: f32,
    title_present: bool,
    legend_present: bool,
    config: &ChartConfig,
) -> CartesianPlan {
    let title_band = if title_present { config.title_band } else { 0.0 };
    let legend_band = if legend_present { config.legend_band } else { 0.0 };
    let x = config.margin_left;
    let y = title_band + config.margin_top;
    // no clamping: a too-small canvas yields a degenerate plot
    let plot = PlotArea {
        x,
        y,
        width: width - config.margin_left - config.margin_right,
        height: height - y - config.margin_bottom - legend_band,
    };
    CartesianPlan {
        plot,
        title_band,
        legend_band,
    }
}

pub fn plan_radial(
    width: f32,
    height: f32,
    title_present: bool,
    legend_rows: Option<usize>,
    config: &ChartConfig,
) -> RadialPlan {
    let title_band = if title_present { config.title_band } else { 0.0 };
    let legend_width = legend_rows
        .map(|rows| (rows as f32 * config.pie_legend_row_width).min(config.pie_legend_max_width))
        .unwrap_or(0.0);
    let avail_w = width - legend_width;
    let avail_h = height - title_band;
    let outer_radius = (avail_w.min(avail_h) / 2.0 - config.pie_padding).max(0.0);
    RadialPlan {
        center: (avail_w / 2.0, title_band + avail_h / 2.0),
        outer_radius,
        title_band,
        legend_width,
    }
}

/// Builds the geometry for one chart. Invalid input produces an error
/// layout carrying the diagnostic message.
pub fn compute_layout(
    spec: &ChartSpec,
    kind: ChartKind,
    theme: &ChartTheme,
    options: &RenderOptions,
    config: &ChartConfig,
) -> ChartLayout {
    if let Err(err) = validate(spec, kind, options) {
        tracing::warn!(kind = %kind, error = %err, "chart input rejected");
        return compute_error_layout(Some(kind), err.to_string());
    }

    let layout = match kind {
        ChartKind::Bar => compute_bar_layout(spec, theme, options, config),
        ChartKind::Line => compute_line_layout(spec, theme, options, config),
        ChartKind::Area => compute_area_layout(spec, theme, options, config),
        ChartKind::Scatter => compute_scatter_layout(spec, theme, options, config),
        ChartKind::Pie => compute_pie_layout(spec, theme, options, config, false),
        ChartKind::Doughnut => compute_pie_layout(spec, theme, options, config, true),
    };
    tracing::trace!(
        kind = %kind,
        value_labels = layout.value_labels.len(),
        "computed chart layout"
    );
    layout
}

pub fn compute_unsupported_layout(selector: &str) -> ChartLayout {
    let err = ChartDataError::UnsupportedKind(selector.to_string());
    tracing::warn!(selector, "unsupported chart type");
    compute_error_layout(None, err.to_string())
}

/// Shared frame for bar, line, area and scatter charts.
pub(crate) struct CartesianFrame {
    pub plan: CartesianPlan,
    pub scale: ValueScale,
    pub categories: CategoryAxis,
}

impl CartesianFrame {
    pub fn new(
        spec: &ChartSpec,
        options: &RenderOptions,
        config: &ChartConfig,
        mode: CategoryMode,
    ) -> Self {
        let plan = plan_cartesian(
            options.width as f32,
            options.height as f32,
            options.has_title(),
            options.show_legend,
            config,
        );
        let scale = ValueScale::from_values(spec.values(), &plan.plot);
        let categories = CategoryAxis::new(&plan.plot, spec.labels.len(), mode);
        Self {
            plan,
            scale,
            categories,
        }
    }

    pub fn axes(&self, spec: &ChartSpec, options: &RenderOptions, config: &ChartConfig) -> AxesLayout {
        let plot = self.plan.plot;
        let x_labels = spec
            .labels
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                TextLabel::new(
                    self.categories.position(idx),
                    plot.bottom() + config.font_size + 8.0,
                    label.clone(),
                    TextAnchor::Middle,
                )
            })
            .collect();
        let y_ticks = self
            .scale
            .ticks(config.tick_count)
            .into_iter()
            .map(|value| {
                let y = self.scale.value_to_y(value);
                TickLayout {
                    y,
                    value,
                    label: TextLabel::new(
                        plot.x - 10.0,
                        y + config.font_size / 3.0,
                        format_number(value),
                        TextAnchor::End,
                    ),
                }
            })
            .collect();
        AxesLayout {
            plot,
            baseline_y: self.scale.baseline(),
            show_grid: options.show_grid,
            x_labels,
            y_ticks,
        }
    }
}

pub(crate) fn title_label(options: &RenderOptions, config: &ChartConfig) -> Option<TextLabel> {
    if !options.has_title() {
        return None;
    }
    let title = options.title.as_deref().unwrap_or_default();
    Some(TextLabel::new(
        options.width as f32 / 2.0,
        config.title_band / 2.0 + config.title_font_size / 3.0,
        title,
        TextAnchor::Middle,
    ))
}

/// Single centered row inside the legend band below the plot.
pub(crate) fn row_legend(
    entries: Vec<(String, String)>,
    options: &RenderOptions,
    config: &ChartConfig,
) -> Option<LegendLayout> {
    if !options.show_legend || entries.is_empty() {
        return None;
    }
    let swatch = config.legend_swatch_size;
    let item_widths: Vec<f32> = entries
        .iter()
        .map(|(label, _)| {
            swatch + 6.0 + estimate_text_width(label, config.font_size) + config.legend_item_spacing
        })
        .collect();
    let total: f32 = item_widths.iter().sum::<f32>() - config.legend_item_spacing;
    let mut x = ((options.width as f32 - total) / 2.0).max(0.0);
    let y = options.height as f32 - config.legend_band / 2.0 - swatch / 2.0;
    let items = entries
        .into_iter()
        .zip(item_widths)
        .map(|((label, color), width)| {
            let item = LegendItem { x, y, label, color };
            x += width;
            item
        })
        .collect();
    Some(LegendLayout {
        orientation: LegendOrientation::Row,
        swatch_size: swatch,
        items,
    })
}

/// Vertical list in the column reserved at the right of a pie.
pub(crate) fn column_legend(
    entries: Vec<(String, String)>,
    plan: &RadialPlan,
    options: &RenderOptions,
    config: &ChartConfig,
) -> Option<LegendLayout> {
    if !options.show_legend || entries.is_empty() {
        return None;
    }
    let row = config.pie_legend_row_height;
    let x = options.width as f32 - plan.legend_width;
    let mut y = plan.center.1 - row * entries.len() as f32 / 2.0;
    let items = entries
        .into_iter()
        .map(|(label, color)| {
            let item = LegendItem { x, y, label, color };
            y += row;
            item
        })
        .collect();
    Some(LegendLayout {
        orientation: LegendOrientation::Column,
        swatch_size: config.legend_swatch_size,
        items,
    })
}
