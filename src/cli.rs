use crate::config::{Config, RenderOptions, is_json5_path, load_config};
use crate::ir::{ChartKind, ChartSpec};
use crate::layout_dump::write_layout_dump;
use crate::render::write_output_svg;
use crate::{RenderContext, render_chart_layout};
use crate::telemetry::init_default_tracing;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "chartr", version, about = "Render chart descriptions to SVG")]
pub struct Args {
    /// Input chart request (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Chart type (bar, line, area, pie, doughnut, scatter); overrides the request
    #[arg(short = 't', long = "type")]
    pub chart_type: Option<String>,

    /// Theme name; overrides the request and config file
    #[arg(long = "theme")]
    pub theme: Option<String>,

    /// Config JSON/JSON5 file (geometry, custom themes, default options)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<u32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<u32>,

    /// Chart title
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Hide the legend
    #[arg(long = "no-legend")]
    pub no_legend: bool,

    /// Hide grid lines
    #[arg(long = "no-grid")]
    pub no_grid: bool,

    /// Annotate values (percentages for pie/doughnut)
    #[arg(long = "show-values")]
    pub show_values: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

/// Chart description read from the input file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    #[serde(rename = "type")]
    pub chart_type: Option<String>,
    pub theme: Option<String>,
    pub options: Option<RenderOptions>,
    #[serde(flatten)]
    pub spec: ChartSpec,
}

pub fn run() -> Result<()> {
    let _ = init_default_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let (input, json5_syntax) = read_input(args.input.as_deref())?;
    let request = parse_request(&input, json5_syntax)?;
    let selector = args
        .chart_type
        .clone()
        .or_else(|| request.chart_type.clone())
        .unwrap_or_else(|| ChartKind::Bar.to_string());
    let theme_id = args
        .theme
        .clone()
        .or_else(|| request.theme.clone())
        .unwrap_or_else(|| config.theme.clone());
    let options = merge_options(&args, request.options.clone(), &config);

    let rendered = render_chart_layout(
        &request.spec,
        &selector,
        &theme_id,
        &options,
        &RenderContext::from(&config),
    );
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &rendered.layout, &request.spec)?;
    }
    let svg = rendered.svg;

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &options)?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, options: &RenderOptions) -> Result<()> {
    crate::render::write_output_png(svg, output, options.width, options.height)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _options: &RenderOptions) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn parse_request(input: &str, json5_syntax: bool) -> Result<ChartRequest> {
    if json5_syntax {
        Ok(json5::from_str(input)?)
    } else {
        Ok(serde_json::from_str(input)?)
    }
}

/// Flags win over the request, the request wins over the config file.
fn merge_options(args: &Args, request: Option<RenderOptions>, config: &Config) -> RenderOptions {
    let mut options = request.unwrap_or_else(|| config.render.clone());
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(title) = &args.title {
        options.title = Some(title.clone());
    }
    if args.no_legend {
        options.show_legend = false;
    }
    if args.no_grid {
        options.show_grid = false;
    }
    if args.show_values {
        options.show_values = true;
    }
    options
}

fn read_input(path: Option<&Path>) -> Result<(String, bool)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, false));
        }
        let content = std::fs::read_to_string(path)?;
        return Ok((content, is_json5_path(path)));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, false))
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
