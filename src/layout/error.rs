use thiserror::Error;

use crate::config::RenderOptions;
use crate::ir::{ChartKind, ChartSpec};

use super::{ChartData, ChartLayout, ErrorLayout};

/// Input problems that are reported inside the rendered document instead of
/// being returned to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChartDataError {
    #[error("No labels provided")]
    NoLabels,
    #[error("No datasets provided")]
    NoDatasets,
    #[error("Unsupported chart type: {0}")]
    UnsupportedKind(String),
    #[error("Dataset \"{dataset}\" has {values} values but {labels} labels were provided")]
    LengthMismatch {
        dataset: String,
        values: usize,
        labels: usize,
    },
    #[error("Dataset \"{0}\" contains a non-finite value")]
    NonFinite(String),
    #[error("Values span a range too large to plot")]
    RangeOverflow,
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}

pub fn validate(
    spec: &ChartSpec,
    kind: ChartKind,
    options: &RenderOptions,
) -> Result<(), ChartDataError> {
    if options.width == 0 || options.height == 0 {
        return Err(ChartDataError::InvalidCanvas {
            width: options.width,
            height: options.height,
        });
    }
    if spec.labels.is_empty() {
        return Err(ChartDataError::NoLabels);
    }
    let Some(first) = spec.datasets.first() else {
        return Err(ChartDataError::NoDatasets);
    };
    let checked = if kind.is_radial() {
        std::slice::from_ref(first)
    } else {
        spec.datasets.as_slice()
    };
    for dataset in checked {
        if !kind.is_radial() && dataset.values.len() != spec.labels.len() {
            return Err(ChartDataError::LengthMismatch {
                dataset: dataset.label.clone(),
                values: dataset.values.len(),
                labels: spec.labels.len(),
            });
        }
        if dataset.values.iter().any(|v| !v.is_finite()) {
            return Err(ChartDataError::NonFinite(dataset.label.clone()));
        }
    }
    let values = checked.iter().flat_map(|d| d.values.iter().copied());
    let spread = if kind.is_radial() {
        values.map(f64::abs).sum::<f64>()
    } else {
        let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        hi - lo
    };
    if !spread.is_finite() {
        return Err(ChartDataError::RangeOverflow);
    }
    Ok(())
}

pub(super) fn compute_error_layout(kind: Option<ChartKind>, message: String) -> ChartLayout {
    ChartLayout {
        kind,
        width: 0,
        height: 0,
        title: None,
        legend: None,
        value_labels: Vec::new(),
        data: ChartData::Error(ErrorLayout { message }),
    }
}
