use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Doughnut,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Pie,
        Self::Doughnut,
        Self::Scatter,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "bar" => Some(Self::Bar),
            "line" => Some(Self::Line),
            "area" => Some(Self::Area),
            "pie" => Some(Self::Pie),
            "doughnut" | "donut" => Some(Self::Doughnut),
            "scatter" => Some(Self::Scatter),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::Scatter => "scatter",
        }
    }

    /// Pie and doughnut charts have no axes and read only the first dataset.
    pub fn is_radial(self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillColor {
    Single(String),
    PerIndex(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<FillColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(FillColor::Single(color.into()));
        self
    }

    pub fn with_fills(mut self, colors: Vec<String>) -> Self {
        self.fill_color = Some(FillColor::PerIndex(colors));
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: Option<f32>) -> Self {
        self.stroke_color = Some(color.into());
        self.stroke_width = width;
        self
    }

    /// Dataset-wide color: a single custom fill, otherwise the theme color.
    pub fn base_color(&self, theme_color: &str) -> String {
        match &self.fill_color {
            Some(FillColor::Single(color)) => color.clone(),
            _ => theme_color.to_string(),
        }
    }

    /// Color for one value: per-index fill, then single fill, then the theme color.
    pub fn color_at(&self, index: usize, theme_color: &str) -> String {
        match &self.fill_color {
            Some(FillColor::PerIndex(colors)) => colors
                .get(index)
                .cloned()
                .unwrap_or_else(|| theme_color.to_string()),
            Some(FillColor::Single(color)) => color.clone(),
            None => theme_color.to_string(),
        }
    }

    pub fn line_color(&self, theme_color: &str) -> String {
        self.stroke_color
            .clone()
            .unwrap_or_else(|| self.base_color(theme_color))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            datasets: Vec::new(),
        }
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.datasets.iter().flat_map(|ds| ds.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_tokens() {
        assert_eq!(ChartKind::from_token("Bar"), Some(ChartKind::Bar));
        assert_eq!(ChartKind::from_token(" donut "), Some(ChartKind::Doughnut));
        assert_eq!(ChartKind::from_token("radar"), None);
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_token(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn color_priority() {
        let plain = Dataset::new("a", vec![1.0, 2.0]);
        assert_eq!(plain.color_at(1, "#111"), "#111");

        let single = plain.clone().with_fill("#222");
        assert_eq!(single.color_at(1, "#111"), "#222");
        assert_eq!(single.line_color("#111"), "#222");

        let per_index = plain.with_fills(vec!["#333".into()]);
        assert_eq!(per_index.color_at(0, "#111"), "#333");
        assert_eq!(per_index.color_at(1, "#111"), "#111");
        assert_eq!(per_index.base_color("#111"), "#111");
    }

    #[test]
    fn deserializes_camel_case_fill() {
        let json = r##"{"labels":["a"],"datasets":[{"label":"x","values":[1],"fillColor":["#f00"],"strokeWidth":3}]}"##;
        let spec: ChartSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            spec.datasets[0].fill_color,
            Some(FillColor::PerIndex(vec!["#f00".to_string()]))
        );
        assert_eq!(spec.datasets[0].stroke_width, Some(3.0));
    }
}
