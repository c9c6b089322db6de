use serde_json::Value;
use tracing::debug;

use crate::error::{require, SpecResult};
use crate::merge::{merge_layers, to_fragment, Fragment};
use crate::theme::Theme;

/// Inputs for [`make_axis`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisOptions {
    /// Orientation key into the theme's axis table (`bottom`, `left`, ...).
    /// Unknown orientations use the `left` style.
    pub orient: String,
    /// Name of the scale this axis visualizes. Required.
    pub scale: String,
    /// Axis title. Omitted from the fragment when `None`.
    pub title: Option<String>,
    /// Applied last; each key replaces the theme value wholesale.
    pub overrides: Fragment,
}

impl AxisOptions {
    pub fn new(orient: impl Into<String>, scale: impl Into<String>) -> Self {
        Self {
            orient: orient.into(),
            scale: scale.into(),
            ..Default::default()
        }
    }

    pub fn bottom(scale: impl Into<String>) -> Self {
        Self::new("bottom", scale)
    }

    pub fn left(scale: impl Into<String>) -> Self {
        Self::new("left", scale)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn overrides(mut self, overrides: Fragment) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Build an axis fragment: theme style for the orientation, then `scale` and
/// `title`, then the caller's overrides.
pub fn make_axis(theme: &Theme, options: &AxisOptions) -> SpecResult<Fragment> {
    require("scale", &options.scale)?;

    let style = to_fragment(theme.axis_style(&options.orient))?;

    let mut binding = Fragment::new();
    binding.insert("scale".to_string(), Value::from(options.scale.as_str()));
    if let Some(title) = &options.title {
        binding.insert("title".to_string(), Value::from(title.as_str()));
    }

    let axis = merge_layers([&style, &binding, &options.overrides]);
    debug!(orient = %options.orient, scale = %options.scale, "built axis fragment");
    Ok(axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frag(value: Value) -> Fragment {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_axis_inherits_theme_style() {
        let theme = Theme::default();
        for orient in ["bottom", "left"] {
            let axis = make_axis(&theme, &AxisOptions::new(orient, "x")).unwrap();
            let style = to_fragment(theme.axis_style(orient)).unwrap();
            for (key, value) in &style {
                assert_eq!(&axis[key], value, "key {key} differs for {orient}");
            }
            assert_eq!(axis["scale"], json!("x"));
            assert_eq!(axis.len(), style.len() + 1);
        }
    }

    #[test]
    fn test_axis_title() {
        let theme = Theme::default();
        let axis = make_axis(&theme, &AxisOptions::left("y").title("CPU Usage (%)")).unwrap();
        assert_eq!(axis["title"], json!("CPU Usage (%)"));
        assert_eq!(axis["orient"], json!("left"));
    }

    #[test]
    fn test_axis_without_title_omits_key() {
        let theme = Theme::default();
        let axis = make_axis(&theme, &AxisOptions::bottom("x")).unwrap();
        assert!(!axis.contains_key("title"));
    }

    #[test]
    fn test_axis_overrides_win() {
        let theme = Theme::default();
        let options = AxisOptions::left("y")
            .title("Latency")
            .overrides(frag(json!({"grid": false, "title": "p99", "tickCount": 4})));
        let axis = make_axis(&theme, &options).unwrap();
        assert_eq!(axis["grid"], json!(false));
        assert_eq!(axis["title"], json!("p99"));
        assert_eq!(axis["tickCount"], json!(4));
        // untouched grid sub-fields stay; overrides are shallow
        assert_eq!(axis["gridOpacity"], json!(0.5));
    }

    #[test]
    fn test_override_can_replace_scale() {
        let theme = Theme::default();
        let options = AxisOptions::bottom("x").overrides(frag(json!({"scale": "x2"})));
        let axis = make_axis(&theme, &options).unwrap();
        assert_eq!(axis["scale"], json!("x2"));
    }

    #[test]
    fn test_unknown_orientation_uses_left() {
        let theme = Theme::default();
        let right = make_axis(&theme, &AxisOptions::new("right", "y")).unwrap();
        let left = make_axis(&theme, &AxisOptions::left("y")).unwrap();
        assert_eq!(right, left);
    }

    #[test]
    fn test_axis_requires_scale() {
        let theme = Theme::default();
        let err = make_axis(&theme, &AxisOptions::bottom("")).unwrap_err();
        assert!(err.to_string().contains("`scale`"));
    }
}
