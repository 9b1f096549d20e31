use crate::ir::ChartSpec;
use crate::layout::{ChartData, ChartLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump<'a> {
    pub kind: Option<String>,
    pub width: u32,
    pub height: u32,
    pub labels: &'a [String],
    pub datasets: Vec<&'a str>,
    pub primitive_count: usize,
    pub layout: &'a ChartLayout,
}

impl<'a> LayoutDump<'a> {
    pub fn from_layout(layout: &'a ChartLayout, spec: &'a ChartSpec) -> Self {
        LayoutDump {
            kind: layout.kind.map(|kind| kind.to_string()),
            width: layout.width,
            height: layout.height,
            labels: &spec.labels,
            datasets: spec.datasets.iter().map(|ds| ds.label.as_str()).collect(),
            primitive_count: primitive_count(layout),
            layout,
        }
    }
}

/// Number of data shapes (bars, markers, slices) the layout will emit.
pub fn primitive_count(layout: &ChartLayout) -> usize {
    match &layout.data {
        ChartData::Bar { bars, .. } => bars.len(),
        ChartData::Line { series, .. } | ChartData::Scatter { series, .. } => {
            series.iter().map(|s| s.points.len()).sum()
        }
        ChartData::Area { series, .. } => series.len(),
        ChartData::Pie(pie) | ChartData::Doughnut(pie) => pie.slices.len(),
        ChartData::Error(_) => 0,
    }
}

pub fn write_layout_dump(path: &Path, layout: &ChartLayout, spec: &ChartSpec) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, spec);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
