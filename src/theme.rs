//! Theme Registry
//!
//! A read-only, hierarchical table of design tokens. The built-in values live in
//! [`crate::tokens`]; [`crate::theme_resolve`] layers caller overrides on top.
//!
//! Category layout:
//! ```text
//! Theme
//! ├── layout        canvas size, padding, background, autosize
//! ├── colors        backgrounds, categorical / sequential / diverging ramps, status, ui
//! ├── typography    font stacks, size scale, weight scale
//! ├── axis          keyed by orientation (bottom, left, ...)
//! ├── marks         keyed by mark type (line, area, bar, point, rect)
//! ├── interaction   hover / focus / unfocus states
//! └── legend        single style record
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::warn;

use crate::error::{SpecError, SpecResult};
use crate::merge::Fragment;

/// Orientation whose style is used when a requested orientation is not defined.
pub const FALLBACK_ORIENT: &str = "left";

// === Layout ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub padding: Padding,
    pub background: String,
    pub autosize: Autosize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autosize {
    #[serde(rename = "type")]
    pub kind: String,
    pub contains: String,
}

// === Colors ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colors {
    pub background: BackgroundColors,
    /// Ordered palette for multi-series charts. Index 0 is the default series color.
    pub categorical: Vec<String>,
    pub status: StatusColors,
    /// Single-hue ramp, low to high.
    pub sequential: Vec<String>,
    pub diverging: DivergingColors,
    pub ui: UiColors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundColors {
    pub canvas: String,
    pub chart: String,
    pub elevated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusColors {
    pub healthy: String,
    pub warning: String,
    pub error: String,
    pub unknown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergingColors {
    pub negative: Vec<String>,
    pub neutral: String,
    pub positive: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiColors {
    pub text: TextColors,
    pub border: BorderColors,
    pub grid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub muted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderColors {
    pub strong: String,
    pub medium: String,
    pub subtle: String,
}

/// Semantic status used to pick from [`StatusColors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Healthy,
    Warning,
    Error,
    Unknown,
}

// === Typography ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub fonts: Fonts,
    pub sizes: FontSizes,
    pub weights: FontWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fonts {
    pub sans: String,
    pub mono: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizes {
    pub title: u32,
    pub axis_title: u32,
    pub axis_label: u32,
    pub tick: u32,
    pub legend: u32,
    pub tooltip: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontWeights {
    pub regular: u32,
    pub medium: u32,
    pub semibold: u32,
}

/// Font weight as the grammar accepts it: a number (`500`) or a keyword (`"bold"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Numeric(Number),
    Named(String),
}

impl From<u32> for FontWeight {
    fn from(weight: u32) -> Self {
        FontWeight::Numeric(Number::from(weight))
    }
}

impl From<&str> for FontWeight {
    fn from(weight: &str) -> Self {
        FontWeight::Named(weight.to_string())
    }
}

// === Axis ===

/// Full style record for one axis orientation. Field names serialize to the
/// grammar's axis property names. Numeric properties keep whatever JSON number
/// they were given, so `domainWidth: 0.5` survives an override unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisStyle {
    pub orient: String,
    pub title_color: String,
    pub title_font: String,
    pub title_font_size: Number,
    pub title_font_weight: FontWeight,
    pub title_padding: Number,

    pub label_color: String,
    pub label_font: String,
    pub label_font_size: Number,
    pub label_padding: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_flush: Option<bool>,

    pub tick_color: String,
    pub tick_size: Number,

    pub domain_color: String,
    pub domain_width: Number,

    pub grid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_dash: Option<Vec<Number>>,
}

/// Axis styles keyed by orientation. `bottom` and `left` always exist; other
/// orientations can be added through overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDefaults {
    pub bottom: AxisStyle,
    pub left: AxisStyle,
    #[serde(flatten)]
    pub extra: BTreeMap<String, AxisStyle>,
}

impl AxisDefaults {
    pub fn get(&self, orient: &str) -> Option<&AxisStyle> {
        match orient {
            "bottom" => Some(&self.bottom),
            "left" => Some(&self.left),
            other => self.extra.get(other),
        }
    }

    pub fn orientations(&self) -> Vec<&str> {
        let mut names = vec!["bottom", "left"];
        names.extend(self.extra.keys().map(String::as_str));
        names
    }
}

// === Marks ===

/// Supported mark primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Line,
    Area,
    Bar,
    Point,
    Rect,
}

impl MarkType {
    pub const ALL: [MarkType; 5] = [
        MarkType::Line,
        MarkType::Area,
        MarkType::Bar,
        MarkType::Point,
        MarkType::Rect,
    ];

    /// Key of this mark type in the theme's `marks` table.
    pub fn as_str(self) -> &'static str {
        match self {
            MarkType::Line => "line",
            MarkType::Area => "area",
            MarkType::Bar => "bar",
            MarkType::Point => "point",
            MarkType::Rect => "rect",
        }
    }

    /// Mark type name understood by the rendering engine.
    pub fn vega_type(self) -> &'static str {
        match self {
            MarkType::Line => "line",
            MarkType::Area => "area",
            MarkType::Bar | MarkType::Rect => "rect",
            MarkType::Point => "symbol",
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(MarkType::Line),
            "area" => Ok(MarkType::Area),
            "bar" => Ok(MarkType::Bar),
            "point" => Ok(MarkType::Point),
            "rect" => Ok(MarkType::Rect),
            _ => Err(SpecError::UnknownMarkType(s.to_string())),
        }
    }
}

/// Default visual properties for one mark type. Every present field ends up
/// as a `{value: ..}` channel in the mark's `enter` encoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_cap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_join: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Engine-specific properties with no dedicated field (`tension`, `shape`, ...).
    #[serde(flatten)]
    pub extra: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkDefaults {
    pub line: MarkStyle,
    pub area: MarkStyle,
    pub bar: MarkStyle,
    pub point: MarkStyle,
    pub rect: MarkStyle,
}

impl MarkDefaults {
    pub fn get(&self, mark: MarkType) -> &MarkStyle {
        match mark {
            MarkType::Line => &self.line,
            MarkType::Area => &self.area,
            MarkType::Bar => &self.bar,
            MarkType::Point => &self.point,
            MarkType::Rect => &self.rect,
        }
    }
}

// === Interaction ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionState {
    pub opacity: f64,
    /// Transition duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub hover: InteractionState,
    pub focus: InteractionState,
    pub unfocus: InteractionState,
}

// === Legend ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendStyle {
    pub title_color: String,
    pub title_font: String,
    pub title_font_size: Number,
    pub title_font_weight: FontWeight,

    pub label_color: String,
    pub label_font: String,
    pub label_font_size: Number,

    pub symbol_type: String,
    pub symbol_stroke_width: f64,
    pub symbol_size: f64,

    pub orient: String,
    pub direction: String,
    pub offset: Number,
    pub padding: Number,
}

// === Theme ===

/// The complete token registry.
///
/// A `Theme` is built once (see [`Theme::default`] and [`Theme::with_overrides`])
/// and then only read. Share it by reference or behind an `Arc`; every factory
/// takes `&Theme`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub(crate) layout: Layout,
    pub(crate) colors: Colors,
    pub(crate) typography: Typography,
    pub(crate) axis: AxisDefaults,
    pub(crate) marks: MarkDefaults,
    pub(crate) interaction: Interaction,
    pub(crate) legend: LegendStyle,
}

impl Theme {
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    pub fn axes(&self) -> &AxisDefaults {
        &self.axis
    }

    pub fn marks(&self) -> &MarkDefaults {
        &self.marks
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn legend(&self) -> &LegendStyle {
        &self.legend
    }

    /// Style for an axis orientation.
    ///
    /// Orientations the theme does not define fall back to the `left` style.
    /// This is a policy, not an error; it is only logged.
    pub fn axis_style(&self, orient: &str) -> &AxisStyle {
        match self.axis.get(orient) {
            Some(style) => style,
            None => {
                warn!(
                    orient,
                    fallback = FALLBACK_ORIENT,
                    "unknown axis orientation, using fallback style"
                );
                &self.axis.left
            }
        }
    }

    pub fn mark_style(&self, mark: MarkType) -> &MarkStyle {
        self.marks.get(mark)
    }

    /// Palette color for series `index`, cycling when the palette runs out.
    pub fn categorical_color(&self, index: usize) -> &str {
        let palette = &self.colors.categorical;
        palette
            .get(index % palette.len().max(1))
            .map(String::as_str)
            .unwrap_or(self.colors.status.unknown.as_str())
    }

    /// Sequential ramp step nearest to `t`, with `t` clamped into `[0, 1]`.
    pub fn sequential_color(&self, t: f64) -> &str {
        let ramp = &self.colors.sequential;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let index = (t * ramp.len().saturating_sub(1) as f64).round() as usize;
        ramp.get(index)
            .map(String::as_str)
            .unwrap_or(self.colors.status.unknown.as_str())
    }

    pub fn status_color(&self, status: Status) -> &str {
        let s = &self.colors.status;
        match status {
            Status::Healthy => &s.healthy,
            Status::Warning => &s.warning,
            Status::Error => &s.error,
            Status::Unknown => &s.unknown,
        }
    }

    /// The full diverging ramp, negative end first.
    pub fn diverging_ramp(&self) -> Vec<&str> {
        let d = &self.colors.diverging;
        d.negative
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(d.neutral.as_str()))
            .chain(d.positive.iter().map(String::as_str))
            .collect()
    }

    /// Check that every token category is populated.
    pub(crate) fn validate(&self) -> SpecResult<()> {
        if self.layout.width == 0 || self.layout.height == 0 {
            return Err(SpecError::configuration(
                "layout",
                "width and height must be positive",
            ));
        }
        let colors = &self.colors;
        let ramps = [
            ("categorical", colors.categorical.is_empty()),
            ("sequential", colors.sequential.is_empty()),
            ("diverging.negative", colors.diverging.negative.is_empty()),
            ("diverging.positive", colors.diverging.positive.is_empty()),
        ];
        if let Some((name, _)) = ramps.iter().find(|(_, empty)| *empty) {
            return Err(SpecError::configuration(
                "colors",
                format!("`{name}` ramp must not be empty"),
            ));
        }
        let fonts = &self.typography.fonts;
        if fonts.sans.trim().is_empty() || fonts.mono.trim().is_empty() {
            return Err(SpecError::configuration(
                "typography",
                "font stacks must not be empty",
            ));
        }
        Ok(())
    }
}
