use serde_json::{json, Value};
use tracing::debug;

use crate::error::{require, SpecResult};
use crate::merge::{merge_layers, Fragment};
use crate::theme::Theme;

/// Theme color ramps usable as a scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Categorical,
    Sequential,
    /// Negative ramp, neutral, positive ramp.
    Diverging,
}

/// Output range of a scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleRange {
    /// A named dimension the engine resolves, e.g. `"width"` or `"height"`.
    Named(String),
    /// An explicit array of range values.
    Values(Vec<Value>),
    /// Expanded into the theme's colors for that palette.
    Palette(Palette),
}

impl ScaleRange {
    pub fn width() -> Self {
        ScaleRange::Named("width".to_string())
    }

    pub fn height() -> Self {
        ScaleRange::Named("height".to_string())
    }

    pub fn named(name: impl Into<String>) -> Self {
        ScaleRange::Named(name.into())
    }

    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ScaleRange::Values(values.into_iter().map(Into::into).collect())
    }

    fn resolve(&self, theme: &Theme) -> SpecResult<Value> {
        match self {
            ScaleRange::Named(name) => {
                require("range", name)?;
                Ok(Value::from(name.as_str()))
            }
            ScaleRange::Values(values) => Ok(Value::Array(values.clone())),
            ScaleRange::Palette(palette) => {
                let colors: Vec<&str> = match palette {
                    Palette::Categorical => {
                        theme.colors().categorical.iter().map(String::as_str).collect()
                    }
                    Palette::Sequential => {
                        theme.colors().sequential.iter().map(String::as_str).collect()
                    }
                    Palette::Diverging => theme.diverging_ramp(),
                };
                Ok(json!(colors))
            }
        }
    }
}

/// Input domain of a scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleDomain {
    /// Literal domain values, e.g. `[0, 100]` or a list of categories.
    Values(Vec<Value>),
    /// Reference to a field of a named data source: `{data, field}`.
    Data { data: String, field: String },
}

impl ScaleDomain {
    pub fn data(data: impl Into<String>, field: impl Into<String>) -> Self {
        ScaleDomain::Data {
            data: data.into(),
            field: field.into(),
        }
    }

    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ScaleDomain::Values(values.into_iter().map(Into::into).collect())
    }

    fn resolve(&self) -> SpecResult<Value> {
        match self {
            ScaleDomain::Values(values) => Ok(Value::Array(values.clone())),
            ScaleDomain::Data { data, field } => {
                require("domain.data", data)?;
                require("domain.field", field)?;
                Ok(json!({ "data": data, "field": field }))
            }
        }
    }
}

/// Inputs for [`make_scale`].
///
/// `kind` is passed through as the scale `type`; the engine validates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOptions {
    /// Scale name referenced by axes and marks. Required.
    pub name: String,
    pub kind: String,
    pub range: ScaleRange,
    pub domain: ScaleDomain,
    /// Engine tuning keys (`nice`, `zero`, `clamp`, ...), merged last.
    pub overrides: Fragment,
}

impl ScaleOptions {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        range: ScaleRange,
        domain: ScaleDomain,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            range,
            domain,
            overrides: Fragment::new(),
        }
    }

    pub fn overrides(mut self, overrides: Fragment) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set a single override key.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }
}

/// Build a scale fragment `{name, type, range, domain}` with overrides on top.
pub fn make_scale(theme: &Theme, options: &ScaleOptions) -> SpecResult<Fragment> {
    require("name", &options.name)?;
    require("type", &options.kind)?;

    let mut base = Fragment::new();
    base.insert("name".to_string(), Value::from(options.name.as_str()));
    base.insert("type".to_string(), Value::from(options.kind.as_str()));
    base.insert("range".to_string(), options.range.resolve(theme)?);
    base.insert("domain".to_string(), options.domain.resolve()?);

    let scale = merge_layers([&base, &options.overrides]);
    debug!(name = %options.name, kind = %options.kind, "built scale fragment");
    Ok(scale)
}
