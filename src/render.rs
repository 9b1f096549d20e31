use crate::config::ChartConfig;
use crate::layout::text::estimate_text_width;
use crate::layout::{
    AxesLayout, BarLayout, ChartData, ChartLayout, LegendLayout, PieLayout, SeriesLayout,
    SliceLayout, TextAnchor, TextLabel,
};
use crate::shapes::{Canvas, Circle, Rect, SVG_NS, ShapeError};
use crate::theme::ChartTheme;
use anyhow::Result;
use std::path::Path;

const ERROR_COLOR: &str = "#B91C1C";
const ERROR_FONT_SIZE: f32 = 14.0;
const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// Serializes a computed layout. Error layouts become a diagnostic document;
/// any other layout goes through the validated shape builders.
pub fn render_svg(
    layout: &ChartLayout,
    theme: &ChartTheme,
    config: &ChartConfig,
) -> Result<String, ShapeError> {
    if let ChartData::Error(error) = &layout.data {
        return Ok(render_error_svg(&error.message));
    }

    let mut canvas = Canvas::new(layout.width, layout.height)?
        .with_class("chart")
        .with_font_family(&config.font_family);
    canvas.push(
        &Rect::new(0.0, 0.0, layout.width as f32, layout.height as f32)?
            .fill(&theme.background)
            .class("background")
            .to_svg(),
    );

    if let Some(title) = &layout.title {
        canvas.push(&text_svg(
            title,
            "chart-title",
            config.title_font_size,
            &theme.text_color,
            true,
        ));
    }

    match &layout.data {
        ChartData::Bar { axes, bars } => {
            canvas.push(&axes_svg(axes, theme, config));
            canvas.push(&bars_svg(bars));
        }
        ChartData::Line { axes, series } => {
            canvas.push(&axes_svg(axes, theme, config));
            for s in series {
                canvas.push(&line_series_svg(s, config)?);
            }
        }
        ChartData::Area { axes, series } => {
            canvas.push(&axes_svg(axes, theme, config));
            for s in series {
                canvas.push(&area_series_svg(s, axes.baseline_y, config));
            }
        }
        ChartData::Scatter { axes, series } => {
            canvas.push(&axes_svg(axes, theme, config));
            for s in series {
                canvas.push(&scatter_series_svg(s, config)?);
            }
        }
        ChartData::Pie(pie) | ChartData::Doughnut(pie) => {
            canvas.push(&pie_svg(pie, theme, config));
        }
        ChartData::Error(_) => {}
    }

    if !layout.value_labels.is_empty() {
        canvas.push("<g class=\"value-labels\">");
        for label in &layout.value_labels {
            canvas.push(&text_svg(
                label,
                "value-label",
                config.value_font_size,
                &theme.text_color,
                false,
            ));
        }
        canvas.push("</g>");
    }

    if let Some(legend) = &layout.legend {
        canvas.push(&legend_svg(legend, theme, config)?);
    }

    Ok(canvas.finish())
}

/// Small standalone document carrying a diagnostic message.
pub fn render_error_svg(message: &str) -> String {
    let width = (estimate_text_width(message, ERROR_FONT_SIZE) + 40.0).max(400.0).ceil();
    let height = 60.0;
    format!(
        "<svg xmlns=\"{SVG_NS}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" class=\"chart-error\"><text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-size=\"{ERROR_FONT_SIZE}\" fill=\"{ERROR_COLOR}\">{text}</text></svg>",
        x = width / 2.0,
        y = height / 2.0 + ERROR_FONT_SIZE / 3.0,
        text = escape_xml(message)
    )
}

fn text_svg(label: &TextLabel, class: &str, font_size: f32, fill: &str, bold: bool) -> String {
    let weight = if bold { " font-weight=\"600\"" } else { "" };
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" class=\"{class}\" text-anchor=\"{}\" font-size=\"{font_size}\"{weight} fill=\"{}\">{}</text>",
        label.x,
        label.y,
        label.anchor.as_str(),
        escape_xml(fill),
        escape_xml(&label.text)
    )
}

fn axes_svg(axes: &AxesLayout, theme: &ChartTheme, config: &ChartConfig) -> String {
    let plot = &axes.plot;
    let mut svg = String::from("<g class=\"axes\">");
    for tick in &axes.y_ticks {
        if axes.show_grid {
            svg.push_str(&format!(
                "<line class=\"grid-line\" x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
                plot.x,
                plot.right(),
                escape_xml(&theme.grid_color),
                y = tick.y
            ));
        }
        svg.push_str(&text_svg(
            &tick.label,
            "tick-label",
            config.font_size,
            &theme.text_color,
            false,
        ));
    }
    svg.push_str(&format!(
        "<line class=\"axis\" x1=\"{x:.2}\" y1=\"{:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
        plot.y,
        plot.bottom(),
        escape_xml(&theme.axis_color),
        x = plot.x
    ));
    svg.push_str(&format!(
        "<line class=\"axis\" x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
        plot.x,
        plot.right(),
        escape_xml(&theme.axis_color),
        y = axes.baseline_y
    ));
    for label in &axes.x_labels {
        svg.push_str(&text_svg(
            label,
            "axis-label",
            config.font_size,
            &theme.text_color,
            false,
        ));
    }
    svg.push_str("</g>");
    svg
}

fn bars_svg(bars: &[BarLayout]) -> String {
    let mut svg = String::from("<g class=\"bars\">");
    for bar in bars {
        // zero-height bars are kept so every value has a primitive
        svg.push_str(&format!(
            "<rect class=\"bar\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            escape_xml(&bar.color)
        ));
    }
    svg.push_str("</g>");
    svg
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

fn stroke_path_svg(series: &SeriesLayout) -> String {
    format!(
        "<path class=\"series-line\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" stroke-linejoin=\"round\"/>",
        points_to_path(&series.points),
        escape_xml(&series.color),
        series.stroke_width
    )
}

fn line_series_svg(series: &SeriesLayout, config: &ChartConfig) -> Result<String, ShapeError> {
    let mut svg = String::from("<g class=\"series\">");
    svg.push_str(&stroke_path_svg(series));
    for &(x, y) in &series.points {
        svg.push_str(
            &Circle::new(x, y, config.marker_radius)?
                .fill(&series.color)
                .class("point")
                .to_svg(),
        );
    }
    svg.push_str("</g>");
    Ok(svg)
}

fn area_series_svg(series: &SeriesLayout, baseline_y: f32, config: &ChartConfig) -> String {
    let mut svg = String::from("<g class=\"series\">");
    if let (Some(first), Some(last)) = (series.points.first(), series.points.last()) {
        svg.push_str(&format!(
            "<path class=\"series-area\" d=\"{} L {:.2} {baseline_y:.2} L {:.2} {baseline_y:.2} Z\" fill=\"{}\" fill-opacity=\"{:.2}\" stroke=\"none\"/>",
            points_to_path(&series.points),
            last.0,
            first.0,
            escape_xml(&series.color),
            config.area_opacity.clamp(0.0, 1.0)
        ));
    }
    svg.push_str(&stroke_path_svg(series));
    svg.push_str("</g>");
    svg
}

fn scatter_series_svg(series: &SeriesLayout, config: &ChartConfig) -> Result<String, ShapeError> {
    let mut svg = String::from("<g class=\"series\">");
    for &(x, y) in &series.points {
        svg.push_str(
            &Circle::new(x, y, config.scatter_radius)?
                .fill(&series.color)
                .opacity(config.scatter_opacity)
                .class("point")
                .to_svg(),
        );
    }
    svg.push_str("</g>");
    Ok(svg)
}

fn polar(center: (f32, f32), radius: f32, degrees: f64) -> (f32, f32) {
    let rad = degrees.to_radians();
    (
        center.0 + radius * rad.cos() as f32,
        center.1 + radius * rad.sin() as f32,
    )
}

fn full_ring(center: (f32, f32), radius: f32, sweep: u8) -> String {
    let (cx, cy) = center;
    format!(
        "M {cx:.2} {top:.2} A {radius:.2} {radius:.2} 0 1 {sweep} {cx:.2} {bottom:.2} A {radius:.2} {radius:.2} 0 1 {sweep} {cx:.2} {top:.2} Z",
        top = cy - radius,
        bottom = cy + radius
    )
}

fn slice_path(pie: &PieLayout, slice: &SliceLayout) -> String {
    let outer = pie.outer_radius;
    let inner = pie.inner_radius;
    if slice.span() >= 360.0 - FULL_CIRCLE_EPSILON {
        // a single arc cannot start and end on the same point
        let mut d = full_ring(pie.center, outer, 1);
        if inner > 0.0 {
            d.push(' ');
            d.push_str(&full_ring(pie.center, inner, 0));
        }
        return d;
    }

    let large_arc = u8::from(slice.span() > 180.0);
    let (osx, osy) = polar(pie.center, outer, slice.start_angle);
    let (oex, oey) = polar(pie.center, outer, slice.end_angle);
    if inner > 0.0 {
        let (isx, isy) = polar(pie.center, inner, slice.start_angle);
        let (iex, iey) = polar(pie.center, inner, slice.end_angle);
        format!(
            "M {osx:.2} {osy:.2} A {outer:.2} {outer:.2} 0 {large_arc} 1 {oex:.2} {oey:.2} L {iex:.2} {iey:.2} A {inner:.2} {inner:.2} 0 {large_arc} 0 {isx:.2} {isy:.2} Z"
        )
    } else {
        let (cx, cy) = pie.center;
        format!(
            "M {cx:.2} {cy:.2} L {osx:.2} {osy:.2} A {outer:.2} {outer:.2} 0 {large_arc} 1 {oex:.2} {oey:.2} Z"
        )
    }
}

fn pie_svg(pie: &PieLayout, theme: &ChartTheme, config: &ChartConfig) -> String {
    let mut svg = String::from("<g class=\"slices\">");
    for slice in &pie.slices {
        svg.push_str(&format!(
            "<path class=\"slice\" d=\"{}\" fill=\"{}\" fill-rule=\"evenodd\" stroke=\"{}\" stroke-width=\"2\"/>",
            slice_path(pie, slice),
            escape_xml(&slice.color),
            escape_xml(&theme.background)
        ));
    }
    svg.push_str("</g>");
    if let Some(label) = &pie.center_label {
        svg.push_str(&text_svg(
            label,
            "center-label",
            config.center_font_size,
            &theme.text_color,
            true,
        ));
    }
    svg
}

fn legend_svg(
    legend: &LegendLayout,
    theme: &ChartTheme,
    config: &ChartConfig,
) -> Result<String, ShapeError> {
    let size = legend.swatch_size;
    let mut svg = String::from("<g class=\"legend\">");
    for item in &legend.items {
        svg.push_str(
            &Rect::new(item.x, item.y, size, size)?
                .fill(&item.color)
                .rounded(2.0)
                .class("legend-swatch")
                .to_svg(),
        );
        let label = TextLabel::new(
            item.x + size + 6.0,
            item.y + size / 2.0 + config.font_size / 3.0,
            item.label.clone(),
            TextAnchor::Start,
        );
        svg.push_str(&text_svg(
            &label,
            "legend-label",
            config.font_size,
            &theme.text_color,
            false,
        ));
    }
    svg.push_str("</g>");
    Ok(svg)
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, width: u32, height: u32) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    if let Some(size) = usvg::Size::from_wh(width as f32, height as f32) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
