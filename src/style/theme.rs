//! Themes: grouped default styles handed to widget constructors.
//!
//! A [`Theme`] is plain data. The [`ThemeRegistry`] owns the named
//! themes of one application and tracks which one is active; there is no
//! process-wide theme state.

use super::color::{Color, Modifier, Style};
use super::symbols;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Block border and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTheme {
    /// Title text.
    pub title: Style,
    /// Border lines.
    pub border: Style,
}

/// Bar palettes shared by the vertical and stacked bar charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartTheme {
    /// Bar colors, cycled.
    pub bars: Vec<Color>,
    /// Value text, cycled.
    pub nums: Vec<Style>,
    /// Label text, cycled.
    pub labels: Vec<Style>,
}

/// Gauge colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeTheme {
    /// Filled part.
    pub bar: Color,
    /// Percentage label.
    pub label: Style,
}

/// Plot colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotTheme {
    /// Series colors, cycled.
    pub lines: Vec<Color>,
    /// Axis lines and labels.
    pub axes: Color,
}

/// Style for widgets that only render text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextTheme {
    /// Body text.
    pub text: Style,
}

/// Tree text and expansion glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeTheme {
    /// Row text.
    pub text: Style,
    /// Glyph for a node with hidden children.
    pub collapsed: char,
    /// Glyph for a node with visible children.
    pub expanded: char,
}

/// Pie chart palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieChartTheme {
    /// Slice colors, cycled.
    pub slices: Vec<Color>,
}

/// Sparkline title and line color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineTheme {
    /// Title text.
    pub title: Style,
    /// Bar color.
    pub line: Color,
}

/// Tab header styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabTheme {
    /// Selected tab.
    pub active: Style,
    /// Other tabs.
    pub inactive: Style,
}

/// The full set of widget defaults.
///
/// Deserializing a partial JSON document fills every missing group from
/// [`Theme::dark`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Background and fallback text style.
    pub default: Style,
    /// Block borders and titles.
    pub block: BlockTheme,
    /// Vertical bar chart.
    pub bar_chart: BarChartTheme,
    /// Gauge.
    pub gauge: GaugeTheme,
    /// Line and scatter plots.
    pub plot: PlotTheme,
    /// List rows.
    pub list: TextTheme,
    /// Tree rows.
    pub tree: TreeTheme,
    /// Paragraph text.
    pub paragraph: TextTheme,
    /// Pie chart.
    pub pie_chart: PieChartTheme,
    /// Sparklines.
    pub sparkline: SparklineTheme,
    /// Stacked bar chart.
    pub stacked_bar_chart: BarChartTheme,
    /// Tab headers.
    pub tab: TabTheme,
    /// Table cells.
    pub table: TextTheme,
}

fn standard_styles() -> Vec<Style> {
    Color::STANDARD.iter().map(|&c| Style::new(c)).collect()
}

impl Theme {
    /// White on black.
    pub fn dark() -> Self {
        let text = Style::new(Color::WHITE).bg(Color::BLACK);
        Self {
            default: text,
            block: BlockTheme {
                title: text.modifier(Modifier::BOLD),
                border: text,
            },
            bar_chart: BarChartTheme {
                bars: Color::STANDARD.to_vec(),
                nums: standard_styles(),
                labels: standard_styles(),
            },
            gauge: GaugeTheme {
                bar: Color::CYAN,
                label: text,
            },
            plot: PlotTheme {
                lines: Color::STANDARD.to_vec(),
                axes: Color::WHITE,
            },
            list: TextTheme { text },
            tree: TreeTheme {
                text,
                collapsed: symbols::COLLAPSED,
                expanded: symbols::EXPANDED,
            },
            paragraph: TextTheme { text },
            pie_chart: PieChartTheme {
                slices: Color::STANDARD.to_vec(),
            },
            sparkline: SparklineTheme {
                title: text,
                line: Color::CYAN,
            },
            stacked_bar_chart: BarChartTheme {
                bars: Color::STANDARD.to_vec(),
                nums: standard_styles(),
                labels: standard_styles(),
            },
            tab: TabTheme {
                active: Style::new(Color::RED).bg(Color::BLACK).modifier(Modifier::BOLD),
                inactive: text,
            },
            table: TextTheme { text },
        }
    }

    /// Black on white.
    pub fn light() -> Self {
        let text = Style::new(Color::BLACK).bg(Color::WHITE);
        let inverse = vec![text; Color::STANDARD.len()];
        Self {
            default: text,
            block: BlockTheme {
                title: text.modifier(Modifier::BOLD),
                border: text,
            },
            bar_chart: BarChartTheme {
                bars: Color::STANDARD.to_vec(),
                nums: inverse.clone(),
                labels: inverse.clone(),
            },
            gauge: GaugeTheme {
                bar: Color::BLUE,
                label: text,
            },
            plot: PlotTheme {
                lines: Color::STANDARD.to_vec(),
                axes: Color::BLACK,
            },
            list: TextTheme { text },
            tree: TreeTheme {
                text,
                collapsed: symbols::COLLAPSED,
                expanded: symbols::EXPANDED,
            },
            paragraph: TextTheme { text },
            pie_chart: PieChartTheme {
                slices: Color::STANDARD.to_vec(),
            },
            sparkline: SparklineTheme {
                title: text,
                line: Color::BLUE,
            },
            stacked_bar_chart: BarChartTheme {
                bars: Color::STANDARD.to_vec(),
                nums: inverse.clone(),
                labels: inverse,
            },
            tab: TabTheme {
                active: Style::new(Color::RED).bg(Color::WHITE).modifier(Modifier::BOLD),
                inactive: text,
            },
            table: TextTheme { text },
        }
    }

    /// Parse a theme from JSON; absent fields come from [`Theme::dark`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

macro_rules! default_from_dark {
    ($($ty:ident => $field:ident),* $(,)?) => {
        $(impl Default for $ty {
            fn default() -> Self {
                Theme::dark().$field
            }
        })*
    };
}

default_from_dark! {
    BlockTheme => block,
    BarChartTheme => bar_chart,
    GaugeTheme => gauge,
    PlotTheme => plot,
    TextTheme => paragraph,
    TreeTheme => tree,
    PieChartTheme => pie_chart,
    SparklineTheme => sparkline,
    TabTheme => tab,
}

/// Name of the preset dark theme.
pub const DARK: &str = "dark";
/// Name of the preset light theme.
pub const LIGHT: &str = "light";
/// Alias registered for the dark theme.
pub const DEFAULT: &str = "default";

/// Named themes plus the current selection.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
    active: String,
}

impl ThemeRegistry {
    /// Registry holding `dark`, `light` and `default`, with `default` active.
    pub fn new() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(DARK.to_string(), Theme::dark());
        themes.insert(LIGHT.to_string(), Theme::light());
        themes.insert(DEFAULT.to_string(), Theme::dark());
        Self {
            themes,
            active: DEFAULT.to_string(),
        }
    }

    /// Add or replace a theme.
    pub fn register(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }

    /// Look up a theme by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Make `name` the active theme.
    pub fn switch(&mut self, name: &str) -> Result<&Theme> {
        if !self.themes.contains_key(name) {
            return Err(Error::UnknownTheme(name.to_string()));
        }
        tracing::debug!(theme = name, "switching theme");
        self.active = name.to_string();
        Ok(&self.themes[name])
    }

    /// The active theme.
    pub fn active(&self) -> &Theme {
        self.themes
            .get(&self.active)
            .unwrap_or_else(|| &self.themes[DEFAULT])
    }

    /// Name of the active theme.
    pub fn active_name(&self) -> &str {
        &self.active
    }

    /// Flip between `dark` and `light`; `default` counts as dark.
    pub fn toggle_mode(&mut self) -> &Theme {
        let next = if self.active == LIGHT { DARK } else { LIGHT };
        self.active = next.to_string();
        tracing::debug!(theme = next, "toggled theme mode");
        &self.themes[next]
    }

    /// Read a JSON theme file and register it under `name`.
    pub fn load_json(&mut self, name: impl Into<String>, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)?;
        let theme = Theme::from_json(&contents)?;
        self.register(name, theme);
        Ok(())
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
