//! SVG chart renderer.
//!
//! Turns a [`ChartSpec`] plus [`RenderOptions`] and a theme name into a
//! self-contained SVG document. Rendering never fails: bad input comes back
//! as a small diagnostic SVG instead of an error.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod shapes;
pub mod telemetry;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ChartConfig, Config, RenderOptions, load_config};
pub use ir::{ChartKind, ChartSpec, Dataset, FillColor};
pub use layout::{ChartDataError, ChartLayout, compute_layout};
pub use render::{escape_xml, render_error_svg, render_svg};
pub use shapes::ShapeError;
pub use theme::{ChartTheme, ThemeError, ThemeRegistry};

use once_cell::sync::Lazy;

static DEFAULT_CHART_CONFIG: Lazy<ChartConfig> = Lazy::new(ChartConfig::default);

/// Themes and geometry shared by a batch of renders.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub themes: &'a ThemeRegistry,
    pub config: &'a ChartConfig,
}

impl<'a> RenderContext<'a> {
    pub fn new(themes: &'a ThemeRegistry, config: &'a ChartConfig) -> Self {
        Self { themes, config }
    }
}

impl<'a> From<&'a Config> for RenderContext<'a> {
    fn from(config: &'a Config) -> Self {
        Self::new(&config.themes, &config.chart)
    }
}

impl Default for RenderContext<'static> {
    fn default() -> Self {
        Self::new(ThemeRegistry::builtin(), &DEFAULT_CHART_CONFIG)
    }
}

/// Renders with the built-in themes and default geometry.
pub fn render_chart(
    spec: &ChartSpec,
    kind: ChartKind,
    theme_id: &str,
    options: &RenderOptions,
) -> String {
    render_chart_with(spec, kind, theme_id, options, &RenderContext::default())
}

pub fn render_chart_with(
    spec: &ChartSpec,
    kind: ChartKind,
    theme_id: &str,
    options: &RenderOptions,
    ctx: &RenderContext<'_>,
) -> String {
    let theme = ctx.themes.resolve(theme_id);
    let layout = layout_for(spec, kind, theme_id, options, ctx);
    render_or_diagnose(&layout, theme, ctx.config)
}

/// Like [`render_chart`], selecting the chart family by name. Unknown names
/// render the "Unsupported chart type" diagnostic.
pub fn render_chart_by_name(
    spec: &ChartSpec,
    selector: &str,
    theme_id: &str,
    options: &RenderOptions,
) -> String {
    render_chart_layout(spec, selector, theme_id, options, &RenderContext::default()).svg
}

/// A computed layout and the document rendered from it.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub layout: ChartLayout,
    pub svg: String,
}

/// Full pipeline for a named chart family, keeping the layout for callers
/// that also dump it.
pub fn render_chart_layout(
    spec: &ChartSpec,
    selector: &str,
    theme_id: &str,
    options: &RenderOptions,
    ctx: &RenderContext<'_>,
) -> RenderedChart {
    let theme = ctx.themes.resolve(theme_id);
    let layout = match ChartKind::from_token(selector) {
        Some(kind) => layout_for(spec, kind, theme_id, options, ctx),
        None => layout::compute_unsupported_layout(selector),
    };
    let svg = render_or_diagnose(&layout, theme, ctx.config);
    RenderedChart { layout, svg }
}

fn layout_for(
    spec: &ChartSpec,
    kind: ChartKind,
    theme_id: &str,
    options: &RenderOptions,
    ctx: &RenderContext<'_>,
) -> ChartLayout {
    tracing::debug!(
        kind = %kind,
        theme = theme_id,
        width = options.width,
        height = options.height,
        labels = spec.labels.len(),
        datasets = spec.datasets.len(),
        "rendering chart"
    );
    compute_layout(spec, kind, ctx.themes.resolve(theme_id), options, ctx.config)
}

fn render_or_diagnose(layout: &ChartLayout, theme: &ChartTheme, config: &ChartConfig) -> String {
    render_svg(layout, theme, config).unwrap_or_else(|err| {
        tracing::warn!(kind = ?layout.kind, error = %err, "chart geometry rejected");
        render_error_svg(&err.to_string())
    })
}
