use crate::theme::{ChartTheme, DEFAULT_THEME, ThemeRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub show_legend: bool,
    pub show_grid: bool,
    pub show_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            show_legend: true,
            show_grid: true,
            show_values: false,
            title: None,
        }
    }
}

impl RenderOptions {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }

    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Fixed geometry and typography used by the layout planner and renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub title_band: f32,
    pub legend_band: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub tick_count: usize,
    pub bar_gutter: f32,
    pub bar_max_width: f32,
    pub bar_min_width: f32,
    pub line_stroke_width: f32,
    pub marker_radius: f32,
    pub scatter_radius: f32,
    pub scatter_opacity: f32,
    pub area_opacity: f32,
    pub pie_padding: f32,
    pub pie_legend_row_width: f32,
    pub pie_legend_max_width: f32,
    pub pie_legend_row_height: f32,
    pub pie_label_ratio: f32,
    pub doughnut_inner_ratio: f32,
    pub doughnut_label_ratio: f32,
    pub legend_swatch_size: f32,
    pub legend_item_spacing: f32,
    pub value_label_offset: f32,
    pub font_family: String,
    pub font_size: f32,
    pub title_font_size: f32,
    pub value_font_size: f32,
    pub center_font_size: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title_band: 50.0,
            legend_band: 60.0,
            margin_left: 80.0,
            margin_right: 40.0,
            margin_top: 60.0,
            margin_bottom: 100.0,
            tick_count: 5,
            bar_gutter: 10.0,
            bar_max_width: 60.0,
            bar_min_width: 1.0,
            line_stroke_width: 2.0,
            marker_radius: 4.0,
            scatter_radius: 6.0,
            scatter_opacity: 0.7,
            area_opacity: 0.3,
            pie_padding: 20.0,
            pie_legend_row_width: 35.0,
            pie_legend_max_width: 200.0,
            pie_legend_row_height: 25.0,
            pie_label_ratio: 0.65,
            doughnut_inner_ratio: 0.6,
            doughnut_label_ratio: 0.5,
            legend_swatch_size: 14.0,
            legend_item_spacing: 24.0,
            value_label_offset: 5.0,
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            title_font_size: 20.0,
            value_font_size: 11.0,
            center_font_size: 28.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chart: ChartConfig,
    pub render: RenderOptions,
    pub theme: String,
    pub themes: ThemeRegistry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            render: RenderOptions::default(),
            theme: DEFAULT_THEME.to_string(),
            themes: ThemeRegistry::with_builtin_themes(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    #[serde(default)]
    themes: BTreeMap<String, ChartTheme>,
    chart: Option<ChartConfig>,
    render: Option<RenderOptions>,
}

fn parse_config_file(contents: &str, json5_syntax: bool) -> anyhow::Result<ConfigFile> {
    if json5_syntax {
        Ok(json5::from_str(contents)?)
    } else {
        Ok(serde_json::from_str(contents)?)
    }
}

pub fn is_json5_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"))
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed = parse_config_file(&contents, is_json5_path(path))?;
    apply_config_file(&mut config, parsed)?;
    tracing::debug!(path = %path.display(), theme = %config.theme, "loaded config");
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) -> anyhow::Result<()> {
    for (name, theme) in parsed.themes {
        config.themes.register(name, theme)?;
    }
    if let Some(theme) = parsed.theme {
        if !config.themes.contains(&theme) {
            tracing::warn!(theme = %theme, "unknown theme in config, falling back to default");
        }
        config.theme = theme;
    }
    if let Some(chart) = parsed.chart {
        config.chart = chart;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }
    Ok(())
}
