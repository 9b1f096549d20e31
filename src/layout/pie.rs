use crate::config::{ChartConfig, RenderOptions};
use crate::ir::{ChartKind, ChartSpec};
use crate::theme::ChartTheme;

use super::text::{format_number, format_percent};
use super::{
    ChartData, ChartLayout, PieLayout, SliceLayout, TextAnchor, TextLabel, column_legend,
    plan_radial, title_label,
};

pub const START_ANGLE: f64 = -90.0;

pub(super) fn compute_pie_layout(
    spec: &ChartSpec,
    theme: &ChartTheme,
    options: &RenderOptions,
    config: &ChartConfig,
    doughnut: bool,
) -> ChartLayout {
    let kind = if doughnut {
        ChartKind::Doughnut
    } else {
        ChartKind::Pie
    };
    // validation guarantees at least one dataset
    let dataset = &spec.datasets[0];
    let values: Vec<f64> = dataset.values.iter().map(|v| v.max(0.0)).collect();
    let total: f64 = values.iter().sum();
    // the center shows the dataset as given, negatives included
    let sum: f64 = dataset.values.iter().sum();

    let legend_rows = options.show_legend.then_some(values.len());
    let plan = plan_radial(
        options.width as f32,
        options.height as f32,
        options.has_title(),
        legend_rows,
        config,
    );
    let outer_radius = plan.outer_radius;
    let inner_radius = if doughnut {
        outer_radius * config.doughnut_inner_ratio
    } else {
        0.0
    };

    let mut slices = Vec::with_capacity(values.len());
    let mut angle = START_ANGLE;
    for (idx, &value) in values.iter().enumerate() {
        // a zero total renders every slice empty at 0%
        let (span, percent) = if total > 0.0 {
            (360.0 * value / total, value / total * 100.0)
        } else {
            (0.0, 0.0)
        };
        slices.push(SliceLayout {
            label: spec.labels.get(idx).cloned().unwrap_or_default(),
            value,
            percent,
            start_angle: angle,
            end_angle: angle + span,
            color: dataset.color_at(idx, theme.color(idx)),
        });
        angle += span;
    }

    let (cx, cy) = plan.center;
    let mut value_labels = Vec::new();
    if options.show_values {
        let label_radius = if doughnut {
            inner_radius + (outer_radius - inner_radius) * config.doughnut_label_ratio
        } else {
            outer_radius * config.pie_label_ratio
        };
        for slice in &slices {
            let mid = ((slice.start_angle + slice.end_angle) / 2.0).to_radians();
            let x = cx + label_radius * mid.cos() as f32;
            let y = cy + label_radius * mid.sin() as f32 + config.value_font_size / 3.0;
            value_labels.push(TextLabel::new(
                x,
                y,
                format_percent(slice.percent),
                TextAnchor::Middle,
            ));
        }
    }

    let center_label = doughnut.then(|| {
        TextLabel::new(
            cx,
            cy + config.center_font_size / 3.0,
            format_number(sum),
            TextAnchor::Middle,
        )
    });

    let legend = column_legend(
        slices
            .iter()
            .map(|s| (s.label.clone(), s.color.clone()))
            .collect(),
        &plan,
        options,
        config,
    );

    let pie = PieLayout {
        center: plan.center,
        outer_radius,
        inner_radius,
        total,
        slices,
        center_label,
    };

    ChartLayout {
        kind: Some(kind),
        width: options.width,
        height: options.height,
        title: title_label(options, config),
        legend,
        value_labels,
        data: if doughnut {
            ChartData::Doughnut(pie)
        } else {
            ChartData::Pie(pie)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Dataset;
    use approx::assert_relative_eq;

    fn pie(layout: &ChartLayout) -> &PieLayout {
        match &layout.data {
            ChartData::Pie(pie) | ChartData::Doughnut(pie) => pie,
            other => panic!("expected radial data, got {other:?}"),
        }
    }

    fn quarters() -> ChartSpec {
        ChartSpec::new(["Q1", "Q2", "Q3", "Q4"])
            .with_dataset(Dataset::new("sales", vec![100.0, 200.0, 150.0, 300.0]))
    }

    #[test]
    fn slices_cover_full_circle_clockwise_from_top() {
        let options = RenderOptions::default().with_values(true);
        let layout = compute_pie_layout(
            &quarters(),
            &ChartTheme::default(),
            &options,
            &ChartConfig::default(),
            false,
        );
        let pie = pie(&layout);
        assert_eq!(pie.slices.len(), 4);
        assert_relative_eq!(pie.slices[0].start_angle, -90.0);
        let spans: f64 = pie.slices.iter().map(SliceLayout::span).sum();
        assert_relative_eq!(spans, 360.0, epsilon = 1e-9);
        assert_relative_eq!(pie.slices[3].end_angle, 270.0, epsilon = 1e-9);
        assert_eq!(layout.value_labels[3].text, "40.0%");
        assert_eq!(pie.inner_radius, 0.0);
        assert!(pie.center_label.is_none());
    }

    #[test]
    fn doughnut_has_hole_and_total() {
        let spec = ChartSpec::new(["a", "b"]).with_dataset(Dataset::new("d", vec![40.0, 60.0]));
        let layout = compute_pie_layout(
            &spec,
            &ChartTheme::default(),
            &RenderOptions::default(),
            &ChartConfig::default(),
            true,
        );
        let pie = pie(&layout);
        assert_relative_eq!(pie.inner_radius, pie.outer_radius * 0.6);
        assert_eq!(pie.center_label.as_ref().unwrap().text, "100");
        assert_eq!(layout.kind, Some(ChartKind::Doughnut));
    }

    #[test]
    fn zero_total_renders_zero_percent() {
        let spec = ChartSpec::new(["a", "b"]).with_dataset(Dataset::new("z", vec![0.0, 0.0]));
        let options = RenderOptions::default().with_values(true);
        let layout = compute_pie_layout(
            &spec,
            &ChartTheme::default(),
            &options,
            &ChartConfig::default(),
            false,
        );
        assert!(pie(&layout).slices.iter().all(|s| s.span() == 0.0));
        assert!(layout.value_labels.iter().all(|l| l.text == "0.0%"));
    }

    #[test]
    fn legend_lists_categories_with_slice_colors() {
        let spec = quarters();
        let theme = ChartTheme::vibrant();
        let layout = compute_pie_layout(
            &spec,
            &theme,
            &RenderOptions::default(),
            &ChartConfig::default(),
            false,
        );
        let legend = layout.legend.unwrap();
        assert_eq!(legend.items.len(), 4);
        assert_eq!(legend.items[2].label, "Q3");
        assert_eq!(legend.items[2].color, theme.color(2));
        assert!(legend.items[1].y > legend.items[0].y);
    }

    #[test]
    fn negative_values_render_as_empty_slices() {
        let spec = ChartSpec::new(["a", "b"]).with_dataset(Dataset::new("n", vec![-5.0, 10.0]));
        let layout = compute_pie_layout(
            &spec,
            &ChartTheme::default(),
            &RenderOptions::default(),
            &ChartConfig::default(),
            false,
        );
        let pie = pie(&layout);
        assert_eq!(pie.slices[0].span(), 0.0);
        assert_relative_eq!(pie.slices[1].span(), 360.0);
    }

    #[test]
    fn doughnut_center_is_arithmetic_sum() {
        let spec = ChartSpec::new(["a", "b"]).with_dataset(Dataset::new("n", vec![-5.0, 10.0]));
        let layout = compute_pie_layout(
            &spec,
            &ChartTheme::default(),
            &RenderOptions::default(),
            &ChartConfig::default(),
            true,
        );
        let pie = pie(&layout);
        assert_eq!(pie.center_label.as_ref().unwrap().text, "5");
        assert_relative_eq!(pie.total, 10.0);
        assert_relative_eq!(pie.slices[1].span(), 360.0);
    }
}
