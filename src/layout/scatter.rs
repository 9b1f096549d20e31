use crate::config::{ChartConfig, RenderOptions};
use crate::ir::{ChartKind, ChartSpec};
use crate::theme::ChartTheme;

use super::line::{project_series, series_legend};
use super::scale::CategoryMode;
use super::{CartesianFrame, ChartData, ChartLayout, title_label};

pub(super) fn compute_scatter_layout(
    spec: &ChartSpec,
    theme: &ChartTheme,
    options: &RenderOptions,
    config: &ChartConfig,
) -> ChartLayout {
    let frame = CartesianFrame::new(spec, options, config, CategoryMode::Points);
    let (mut series, value_labels) =
        project_series(spec, &frame, theme, options, config, config.scatter_radius);
    // markers take the fill color; a stroke color has nothing to outline
    for (idx, (layout, dataset)) in series.iter_mut().zip(&spec.datasets).enumerate() {
        layout.color = dataset.base_color(theme.color(idx));
    }
    ChartLayout {
        kind: Some(ChartKind::Scatter),
        width: options.width,
        height: options.height,
        title: title_label(options, config),
        legend: series_legend(&series, options, config),
        value_labels,
        data: ChartData::Scatter {
            axes: frame.axes(spec, options, config),
            series,
        },
    }
}
