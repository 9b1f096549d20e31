use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const DEFAULT_THEME: &str = "default";
pub const MIN_PALETTE_LEN: usize = 6;

static BUILTIN: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::with_builtin_themes);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("theme '{name}' has {len} palette colors, at least {min} are required", min = MIN_PALETTE_LEN)]
    PaletteTooShort { name: String, len: usize },
    #[error("theme name must not be empty")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartTheme {
    pub palette: Vec<String>,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_axis_color")]
    pub axis_color: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_text_color() -> String {
    "#333333".to_string()
}

fn default_axis_color() -> String {
    "#666666".to_string()
}

fn default_grid_color() -> String {
    "#E5E5E5".to_string()
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

impl ChartTheme {
    fn light(colors: &[&str]) -> Self {
        Self {
            palette: palette(colors),
            background: default_background(),
            text_color: default_text_color(),
            axis_color: default_axis_color(),
            grid_color: default_grid_color(),
        }
    }

    pub fn default_theme() -> Self {
        Self::light(&[
            "#4E79A7", "#F28E2C", "#E15759", "#76B7B2", "#59A14F", "#EDC949", "#AF7AA1",
            "#FF9DA7",
        ])
    }

    pub fn corporate() -> Self {
        Self {
            text_color: "#1F2937".to_string(),
            axis_color: "#4B5563".to_string(),
            grid_color: "#E5E7EB".to_string(),
            ..Self::light(&[
                "#1E3A8A", "#3B82F6", "#0EA5E9", "#64748B", "#0F766E", "#F59E0B",
            ])
        }
    }

    pub fn modern() -> Self {
        Self {
            text_color: "#1C2430".to_string(),
            axis_color: "#7A8AA6".to_string(),
            grid_color: "#EEF2F8".to_string(),
            ..Self::light(&[
                "#6366F1", "#EC4899", "#14B8A6", "#F97316", "#8B5CF6", "#22C55E", "#EAB308",
            ])
        }
    }

    pub fn dark() -> Self {
        Self {
            palette: palette(&[
                "#60A5FA", "#F472B6", "#34D399", "#FBBF24", "#A78BFA", "#F87171",
            ]),
            background: "#111827".to_string(),
            text_color: "#F9FAFB".to_string(),
            axis_color: "#9CA3AF".to_string(),
            grid_color: "#374151".to_string(),
        }
    }

    pub fn vibrant() -> Self {
        Self::light(&[
            "#FF006E", "#FB5607", "#FFBE0B", "#8338EC", "#3A86FF", "#06D6A0",
        ])
    }

    pub fn pastel() -> Self {
        Self::light(&[
            "#A8DADC", "#F4A261", "#E9C46A", "#CDB4DB", "#FFAFCC", "#BDE0FE",
        ])
    }

    pub fn monochrome() -> Self {
        Self {
            text_color: "#111111".to_string(),
            ..Self::light(&[
                "#111111", "#333333", "#555555", "#777777", "#999999", "#BBBBBB",
            ])
        }
    }

    /// Palette color for a dataset or slice position, cycling past the end.
    pub fn color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return "#4E79A7";
        }
        &self.palette[index % self.palette.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::default_theme()
    }
}

/// Named chart themes. Lookups never fail: unknown names resolve to the
/// default theme. Mutation needs `&mut self`, so renders holding `&self`
/// always see a consistent snapshot.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, ChartTheme>,
    fallback: ChartTheme,
}

impl ThemeRegistry {
    pub fn empty() -> Self {
        Self {
            themes: BTreeMap::new(),
            fallback: ChartTheme::default_theme(),
        }
    }

    pub fn with_builtin_themes() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(DEFAULT_THEME.to_string(), ChartTheme::default_theme());
        themes.insert("corporate".to_string(), ChartTheme::corporate());
        themes.insert("modern".to_string(), ChartTheme::modern());
        themes.insert("dark".to_string(), ChartTheme::dark());
        themes.insert("vibrant".to_string(), ChartTheme::vibrant());
        themes.insert("pastel".to_string(), ChartTheme::pastel());
        themes.insert("monochrome".to_string(), ChartTheme::monochrome());
        Self {
            themes,
            fallback: ChartTheme::default_theme(),
        }
    }

    /// Shared read-only registry holding the built-in themes.
    pub fn builtin() -> &'static ThemeRegistry {
        &BUILTIN
    }

    pub fn register(&mut self, name: impl Into<String>, theme: ChartTheme) -> Result<(), ThemeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ThemeError::EmptyName);
        }
        if theme.palette.len() < MIN_PALETTE_LEN {
            return Err(ThemeError::PaletteTooShort {
                name,
                len: theme.palette.len(),
            });
        }
        self.themes.insert(name, theme);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn resolve(&self, name: &str) -> &ChartTheme {
        self.themes.get(name).unwrap_or(&self.fallback)
    }

    pub fn colors_for(&self, name: &str) -> &[String] {
        &self.resolve(name).palette
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::with_builtin_themes()
    }
}
