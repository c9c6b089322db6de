//! Theme Resolution
//!
//! Builds a concrete [`Theme`] from the built-in tokens plus caller overrides.
//!
//! Every token category accepts an optional JSON object. Resolution for each
//! category is:
//! 1. Serialize the base category into a fragment
//! 2. Shallow-merge the override object on top (see [`crate::merge`])
//! 3. Decode the result back into the typed category
//!
//! Because the merge is shallow, overriding `padding` or `axis.left` replaces
//! the whole sub-record, so the override must be complete. Decoding failures
//! and empty ramps surface as [`SpecError::Configuration`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{SpecError, SpecResult};
use crate::merge::{overlay, to_fragment, Fragment};
use crate::theme::Theme;

/// Per-category overrides, each shallow-merged over the base theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOverrides {
    pub layout: Option<Fragment>,
    pub colors: Option<Fragment>,
    pub typography: Option<Fragment>,
    pub axis: Option<Fragment>,
    pub marks: Option<Fragment>,
    pub interaction: Option<Fragment>,
    pub legend: Option<Fragment>,
}

impl ThemeOverrides {
    /// Parse overrides from a JSON document such as
    /// `{"layout": {"width": 640}, "colors": {"categorical": ["#fff"]}}`.
    pub fn from_json_str(input: &str) -> SpecResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| SpecError::configuration("overrides", format!("failed to parse overrides: {e}")))
    }

    pub fn is_empty(&self) -> bool {
        *self == ThemeOverrides::default()
    }
}

impl Theme {
    /// Built-in tokens with `overrides` applied.
    pub fn with_overrides(overrides: &ThemeOverrides) -> SpecResult<Theme> {
        Theme::default().apply_overrides(overrides)
    }

    /// Derive a new theme from this one. `self` is left untouched.
    pub fn apply_overrides(&self, overrides: &ThemeOverrides) -> SpecResult<Theme> {
        let theme = Theme {
            layout: resolve_category("layout", &self.layout, overrides.layout.as_ref())?,
            colors: resolve_category("colors", &self.colors, overrides.colors.as_ref())?,
            typography: resolve_category(
                "typography",
                &self.typography,
                overrides.typography.as_ref(),
            )?,
            axis: resolve_category("axis", &self.axis, overrides.axis.as_ref())?,
            marks: resolve_category("marks", &self.marks, overrides.marks.as_ref())?,
            interaction: resolve_category(
                "interaction",
                &self.interaction,
                overrides.interaction.as_ref(),
            )?,
            legend: resolve_category("legend", &self.legend, overrides.legend.as_ref())?,
        };
        theme.validate()?;
        Ok(theme)
    }
}

/// Resolve one category: base record, then the override layer.
fn resolve_category<T>(category: &'static str, base: &T, layer: Option<&Fragment>) -> SpecResult<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Some(layer) = layer else {
        return Ok(base.clone());
    };
    debug!(category, keys = layer.len(), "applying theme overrides");

    let mut merged = to_fragment(base)?;
    overlay(&mut merged, layer);
    serde_json::from_value(Value::Object(merged))
        .map_err(|e| SpecError::configuration(category, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{FontWeight, MarkType};
    use serde_json::json;

    fn overrides(json: &str) -> ThemeOverrides {
        ThemeOverrides::from_json_str(json).unwrap()
    }

    #[test]
    fn test_no_overrides_is_default() {
        let theme = Theme::with_overrides(&ThemeOverrides::default()).unwrap();
        assert_eq!(theme, Theme::default());
        assert!(ThemeOverrides::default().is_empty());
    }

    #[test]
    fn test_layout_scalar_override() {
        let theme = Theme::with_overrides(&overrides(r#"{"layout": {"width": 640}}"#)).unwrap();
        assert_eq!(theme.layout().width, 640);
        assert_eq!(theme.layout().height, 240);
    }

    #[test]
    fn test_nested_override_replaces_whole_record() {
        let theme = Theme::with_overrides(&overrides(
            r#"{"layout": {"padding": {"top": 0, "left": 0, "right": 0, "bottom": 0}}}"#,
        ))
        .unwrap();
        assert_eq!(theme.layout().padding.left, 0);

        // A partial padding record is not deep-merged, so it is incomplete.
        let err = Theme::with_overrides(&overrides(r#"{"layout": {"padding": {"top": 0}}}"#))
            .unwrap_err();
        assert!(matches!(err, SpecError::Configuration { category: "layout", .. }));
    }

    #[test]
    fn test_palette_override() {
        let theme = Theme::with_overrides(&overrides(
            r##"{"colors": {"categorical": ["#ffffff", "#000000"]}}"##,
        ))
        .unwrap();
        assert_eq!(theme.categorical_color(0), "#ffffff");
        assert_eq!(theme.categorical_color(2), "#ffffff");
        assert_eq!(theme.colors().status.healthy, "#34d399");
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = Theme::with_overrides(&overrides(r#"{"colors": {"categorical": []}}"#))
            .unwrap_err();
        assert!(matches!(err, SpecError::Configuration { category: "colors", .. }));
        assert!(err.to_string().contains("categorical"));
    }

    #[test]
    fn test_axis_orientation_can_be_added() {
        let base = Theme::default();
        let mut right = to_fragment(&base.axes().left).unwrap();
        right.insert("orient".to_string(), Value::from("right"));
        let mut axis = Fragment::new();
        axis.insert("right".to_string(), Value::Object(right));

        let theme = base
            .apply_overrides(&ThemeOverrides {
                axis: Some(axis),
                ..ThemeOverrides::default()
            })
            .unwrap();
        assert_eq!(theme.axis_style("right").orient, "right");
        assert_eq!(theme.axes().orientations(), vec!["bottom", "left", "right"]);
        // the source theme is unchanged
        assert_eq!(base.axis_style("right").orient, "left");
    }

    #[test]
    fn test_mark_override_replaces_record() {
        let theme = Theme::with_overrides(&overrides(
            r#"{"marks": {"line": {"strokeWidth": 3, "tension": 0.5}}}"#,
        ))
        .unwrap();
        let line = theme.mark_style(MarkType::Line);
        assert_eq!(line.stroke_width, Some(3.0));
        assert_eq!(line.stroke_cap, None);
        assert_eq!(line.extra["tension"], Value::from(0.5));
        assert_eq!(theme.mark_style(MarkType::Bar).corner_radius, Some(2.0));
    }

    #[test]
    fn test_unknown_mark_category_rejected() {
        let err = Theme::with_overrides(&overrides(r#"{"marks": {"pie": {"opacity": 1}}}"#))
            .unwrap_err();
        assert!(matches!(err, SpecError::Configuration { category: "marks", .. }));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = ThemeOverrides::from_json_str(r#"{"palette": {}}"#).unwrap_err();
        assert!(matches!(err, SpecError::Configuration { category: "overrides", .. }));
    }

    #[test]
    fn test_interaction_override() {
        let theme = Theme::with_overrides(&overrides(
            r#"{"interaction": {"hover": {"opacity": 0.5}}}"#,
        ))
        .unwrap();
        assert_eq!(theme.interaction().hover.opacity, 0.5);
        assert_eq!(theme.interaction().hover.transition, None);
        assert_eq!(theme.interaction().unfocus.opacity, 0.2);
    }

    #[test]
    fn test_legend_accepts_named_font_weight() {
        let theme = Theme::with_overrides(&overrides(
            r#"{"legend": {"titleFontWeight": "bold", "offset": -4, "labelFontSize": 9.5}}"#,
        ))
        .unwrap();
        let legend = theme.legend();
        assert_eq!(legend.title_font_weight, FontWeight::from("bold"));
        assert_eq!(to_fragment(legend).unwrap()["offset"], json!(-4));
        assert_eq!(to_fragment(legend).unwrap()["labelFontSize"], json!(9.5));
    }

    #[test]
    fn test_axis_accepts_fractional_sizes() {
        let base = Theme::default();
        let mut left = to_fragment(&base.axes().left).unwrap();
        left.insert("gridDash".to_string(), json!([2.5, 1]));
        left.insert("domainWidth".to_string(), json!(0.5));
        left.insert("titleFontWeight".to_string(), json!("bold"));
        let mut axis = Fragment::new();
        axis.insert("left".to_string(), Value::Object(left));

        let theme = base
            .apply_overrides(&ThemeOverrides {
                axis: Some(axis),
                ..ThemeOverrides::default()
            })
            .unwrap();
        let style = to_fragment(theme.axis_style("left")).unwrap();
        assert_eq!(style["gridDash"], json!([2.5, 1]));
        assert_eq!(style["domainWidth"], json!(0.5));
        assert_eq!(style["titleFontWeight"], json!("bold"));
        // untouched tokens keep their integer form
        assert_eq!(style["titleFontSize"], json!(11));
    }
}
