use serde_json::{json, Value};
use tracing::debug;

use crate::error::{require, SpecError, SpecResult};
use crate::merge::{to_fragment, Fragment};
use crate::theme::{MarkType, Theme};

/// Data fields bound to position channels, plus the scales they go through.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBindings {
    pub x: String,
    pub y: String,
    /// Baseline field for area and bar marks. Without it the baseline is the
    /// y-scale's zero. Other mark types reject it.
    pub y2: Option<String>,
    /// Defaults to `"x"`.
    pub x_scale: String,
    /// Defaults to `"y"`.
    pub y_scale: String,
}

impl FieldBindings {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            y2: None,
            x_scale: "x".to_string(),
            y_scale: "y".to_string(),
        }
    }

    pub fn y2(mut self, field: impl Into<String>) -> Self {
        self.y2 = Some(field.into());
        self
    }

    pub fn scales(mut self, x_scale: impl Into<String>, y_scale: impl Into<String>) -> Self {
        self.x_scale = x_scale.into();
        self.y_scale = y_scale.into();
        self
    }

    fn validate(&self) -> SpecResult<()> {
        require("x", &self.x)?;
        require("y", &self.y)?;
        require("x_scale", &self.x_scale)?;
        require("y_scale", &self.y_scale)?;
        if let Some(y2) = &self.y2 {
            require("y2", y2)?;
        }
        Ok(())
    }
}

/// Inputs for [`make_mark`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarkOptions {
    pub mark: MarkType,
    /// Name of the data source the mark is drawn from. Required.
    pub data: String,
    pub bindings: FieldBindings,
    /// Series color. Defaults to the first categorical palette entry.
    pub color: Option<String>,
    /// Extra `enter` properties, each wrapped as `{value: ..}`. These replace
    /// theme style and the generated channels of the same name.
    pub overrides: Fragment,
}

impl MarkOptions {
    pub fn new(mark: MarkType, data: impl Into<String>, bindings: FieldBindings) -> Self {
        Self {
            mark,
            data: data.into(),
            bindings,
            color: None,
            overrides: Fragment::new(),
        }
    }

    /// Like [`MarkOptions::new`], with the mark type given by name.
    ///
    /// Unknown names fail with [`crate::error::SpecError::UnknownMarkType`].
    pub fn named(mark: &str, data: impl Into<String>, bindings: FieldBindings) -> SpecResult<Self> {
        Ok(Self::new(mark.parse()?, data, bindings))
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn overrides(mut self, overrides: Fragment) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Build a mark fragment with `enter`, `update` and `hover` encoding states.
///
/// `enter` holds the position channels for the mark type, the color channel,
/// and every theme style property for the mark as a `{value: ..}` channel.
/// Position and color channels win over theme style keys of the same name;
/// `options.overrides` win over both. `update` resets opacity; `hover`
/// applies the theme's hover opacity.
pub fn make_mark(theme: &Theme, options: &MarkOptions) -> SpecResult<Fragment> {
    require("data", &options.data)?;
    options.bindings.validate()?;
    if let Some(color) = &options.color {
        require("color", color)?;
    }

    let mark = options.mark;
    if options.bindings.y2.is_some() && !matches!(mark, MarkType::Area | MarkType::Bar) {
        return Err(SpecError::InvalidArgument { field: "y2" });
    }

    let style = to_fragment(theme.mark_style(mark))?;
    let color = options
        .color
        .as_deref()
        .unwrap_or_else(|| theme.categorical_color(0));

    let mut enter = position_channels(mark, &options.bindings);
    for channel in color_channels(mark) {
        enter.insert(channel.to_string(), json!({ "value": color }));
    }
    for (key, value) in style {
        enter.entry(key).or_insert_with(|| json!({ "value": value }));
    }
    for (key, value) in &options.overrides {
        enter.insert(key.clone(), json!({ "value": value }));
    }

    let mut encode = Fragment::new();
    encode.insert("enter".to_string(), Value::Object(enter));
    encode.insert("update".to_string(), json!({ "opacity": { "value": 1 } }));
    encode.insert(
        "hover".to_string(),
        json!({ "opacity": { "value": theme.interaction().hover.opacity } }),
    );

    let mut fragment = Fragment::new();
    fragment.insert("type".to_string(), Value::from(mark.vega_type()));
    fragment.insert("from".to_string(), json!({ "data": options.data }));
    fragment.insert("encode".to_string(), Value::Object(encode));

    debug!(%mark, data = %options.data, "built mark fragment");
    Ok(fragment)
}

/// Reference line builder: `line` mark over `data` with x/y bound to the
/// `x` and `y` scales.
pub fn make_line_mark(
    theme: &Theme,
    data: &str,
    x_field: &str,
    y_field: &str,
    color: Option<&str>,
) -> SpecResult<Fragment> {
    let mut options = MarkOptions::new(MarkType::Line, data, FieldBindings::new(x_field, y_field));
    options.color = color.map(str::to_string);
    make_mark(theme, &options)
}

fn field(scale: &str, field: &str) -> Value {
    json!({ "scale": scale, "field": field })
}

fn band(scale: &str) -> Value {
    json!({ "scale": scale, "band": 1 })
}

fn baseline(bindings: &FieldBindings) -> Value {
    match &bindings.y2 {
        Some(y2) => field(&bindings.y_scale, y2),
        None => json!({ "scale": bindings.y_scale, "value": 0 }),
    }
}

/// Position encoding per mark type.
fn position_channels(mark: MarkType, b: &FieldBindings) -> Fragment {
    let mut channels = Fragment::new();
    let mut put = |name: &str, value: Value| {
        channels.insert(name.to_string(), value);
    };
    match mark {
        MarkType::Line | MarkType::Point => {
            put("x", field(&b.x_scale, &b.x));
            put("y", field(&b.y_scale, &b.y));
        }
        MarkType::Area => {
            put("x", field(&b.x_scale, &b.x));
            put("y", field(&b.y_scale, &b.y));
            put("y2", baseline(b));
        }
        MarkType::Bar => {
            put("x", field(&b.x_scale, &b.x));
            put("width", band(&b.x_scale));
            put("y", field(&b.y_scale, &b.y));
            put("y2", baseline(b));
        }
        MarkType::Rect => {
            put("x", field(&b.x_scale, &b.x));
            put("width", band(&b.x_scale));
            put("y", field(&b.y_scale, &b.y));
            put("height", band(&b.y_scale));
        }
    }
    channels
}

/// Channels that receive the series color.
fn color_channels(mark: MarkType) -> &'static [&'static str] {
    match mark {
        MarkType::Line => &["stroke"],
        MarkType::Area => &["fill", "stroke"],
        MarkType::Bar | MarkType::Point | MarkType::Rect => &["fill"],
    }
}
