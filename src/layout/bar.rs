use crate::config::{ChartConfig, RenderOptions};
use crate::ir::{ChartKind, ChartSpec};
use crate::theme::ChartTheme;

use super::scale::CategoryMode;
use super::text::format_number;
use super::{
    BarLayout, CartesianFrame, ChartData, ChartLayout, TextAnchor, TextLabel, row_legend,
    title_label,
};

/// Width of one bar inside a group, floored so crowded groups never produce
/// negative widths.
pub(super) fn bar_width(group_width: f32, dataset_count: usize, config: &ChartConfig) -> f32 {
    let raw = group_width / dataset_count.max(1) as f32 - config.bar_gutter;
    raw.min(config.bar_max_width).max(config.bar_min_width)
}

pub(super) fn compute_bar_layout(
    spec: &ChartSpec,
    theme: &ChartTheme,
    options: &RenderOptions,
    config: &ChartConfig,
) -> ChartLayout {
    let frame = CartesianFrame::new(spec, options, config, CategoryMode::Groups);
    let dataset_count = spec.datasets.len();
    let width = bar_width(frame.categories.group_width(), dataset_count, config);
    let step = width + config.bar_gutter;
    let cluster = width * dataset_count as f32 + config.bar_gutter * (dataset_count as f32 - 1.0);
    let baseline = frame.scale.baseline();

    let mut bars = Vec::with_capacity(spec.labels.len() * dataset_count);
    let mut value_labels = Vec::new();
    for (index, _) in spec.labels.iter().enumerate() {
        let left = frame.categories.position(index) - cluster / 2.0;
        for (ds_idx, dataset) in spec.datasets.iter().enumerate() {
            let value = dataset.values[index];
            let end = frame.scale.value_to_y(value);
            let x = left + step * ds_idx as f32;
            bars.push(BarLayout {
                dataset: ds_idx,
                index,
                x,
                y: end.min(baseline),
                width,
                height: (baseline - end).abs(),
                value,
                color: dataset.color_at(index, theme.color(ds_idx)),
            });
            if options.show_values {
                let label_y = if value < 0.0 {
                    end + config.value_label_offset + config.value_font_size
                } else {
                    end - config.value_label_offset
                };
                value_labels.push(TextLabel::new(
                    x + width / 2.0,
                    label_y,
                    format_number(value),
                    TextAnchor::Middle,
                ));
            }
        }
    }

    let legend = row_legend(
        spec.datasets
            .iter()
            .enumerate()
            .map(|(idx, ds)| (ds.label.clone(), ds.base_color(theme.color(idx))))
            .collect(),
        options,
        config,
    );

    ChartLayout {
        kind: Some(ChartKind::Bar),
        width: options.width,
        height: options.height,
        title: title_label(options, config),
        legend,
        value_labels,
        data: ChartData::Bar {
            axes: frame.axes(spec, options, config),
            bars,
        },
    }
}
