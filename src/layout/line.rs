use crate::config::{ChartConfig, RenderOptions};
use crate::ir::{ChartKind, ChartSpec};
use crate::theme::ChartTheme;

use super::scale::CategoryMode;
use super::text::format_number;
use super::{
    CartesianFrame, ChartData, ChartLayout, SeriesLayout, TextAnchor, TextLabel, row_legend,
    title_label,
};

/// Projects every dataset onto the frame as a polyline, with optional value
/// labels above each vertex.
pub(super) fn project_series(
    spec: &ChartSpec,
    frame: &CartesianFrame,
    theme: &ChartTheme,
    options: &RenderOptions,
    config: &ChartConfig,
    label_lift: f32,
) -> (Vec<SeriesLayout>, Vec<TextLabel>) {
    let mut value_labels = Vec::new();
    let series = spec
        .datasets
        .iter()
        .enumerate()
        .map(|(ds_idx, dataset)| {
            let points: Vec<(f32, f32)> = dataset
                .values
                .iter()
                .enumerate()
                .map(|(i, &value)| (frame.categories.position(i), frame.scale.value_to_y(value)))
                .collect();
            if options.show_values {
                value_labels.extend(points.iter().zip(&dataset.values).map(|(&(x, y), &value)| {
                    TextLabel::new(
                        x,
                        y - label_lift - config.value_label_offset,
                        format_number(value),
                        TextAnchor::Middle,
                    )
                }));
            }
            SeriesLayout {
                label: dataset.label.clone(),
                color: dataset.line_color(theme.color(ds_idx)),
                stroke_width: dataset.stroke_width.unwrap_or(config.line_stroke_width),
                points,
            }
        })
        .collect();
    (series, value_labels)
}

pub(super) fn series_legend(
    series: &[SeriesLayout],
    options: &RenderOptions,
    config: &ChartConfig,
) -> Option<super::LegendLayout> {
    row_legend(
        series
            .iter()
            .map(|s| (s.label.clone(), s.color.clone()))
            .collect(),
        options,
        config,
    )
}

pub(super) fn compute_line_layout(
    spec: &ChartSpec,
    theme: &ChartTheme,
    options: &RenderOptions,
    config: &ChartConfig,
) -> ChartLayout {
    let frame = CartesianFrame::new(spec, options, config, CategoryMode::Points);
    let (series, value_labels) =
        project_series(spec, &frame, theme, options, config, config.marker_radius);
    ChartLayout {
        kind: Some(ChartKind::Line),
        width: options.width,
        height: options.height,
        title: title_label(options, config),
        legend: series_legend(&series, options, config),
        value_labels,
        data: ChartData::Line {
            axes: frame.axes(spec, options, config),
            series,
        },
    }
}

pub(super) fn compute_area_layout(
    spec: &ChartSpec,
    theme: &ChartTheme,
    options: &RenderOptions,
    config: &ChartConfig,
) -> ChartLayout {
    let frame = CartesianFrame::new(spec, options, config, CategoryMode::Points);
    let (series, value_labels) = project_series(spec, &frame, theme, options, config, 0.0);
    ChartLayout {
        kind: Some(ChartKind::Area),
        width: options.width,
        height: options.height,
        title: title_label(options, config),
        legend: series_legend(&series, options, config),
        value_labels,
        data: ChartData::Area {
            axes: frame.axes(spec, options, config),
            series,
        },
    }
}
