use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{require, SpecResult};
use crate::merge::{merge_layers, to_fragment, Fragment};
use crate::theme::Theme;

/// Visual channel a legend explains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendChannel {
    Fill,
    Stroke,
    Size,
    Shape,
    Opacity,
    StrokeDash,
    StrokeWidth,
}

impl LegendChannel {
    pub const ALL: [LegendChannel; 7] = [
        LegendChannel::Fill,
        LegendChannel::Stroke,
        LegendChannel::Size,
        LegendChannel::Shape,
        LegendChannel::Opacity,
        LegendChannel::StrokeDash,
        LegendChannel::StrokeWidth,
    ];

    /// Legend property naming the scale for this channel.
    pub fn key(self) -> &'static str {
        match self {
            LegendChannel::Fill => "fill",
            LegendChannel::Stroke => "stroke",
            LegendChannel::Size => "size",
            LegendChannel::Shape => "shape",
            LegendChannel::Opacity => "opacity",
            LegendChannel::StrokeDash => "strokeDash",
            LegendChannel::StrokeWidth => "strokeWidth",
        }
    }
}

impl fmt::Display for LegendChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Inputs for [`make_legend`].
#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub channel: LegendChannel,
    /// Scale driving the legend entries. Required.
    pub scale: String,
    pub title: Option<String>,
    pub overrides: Fragment,
}

impl LegendOptions {
    pub fn new(channel: LegendChannel, scale: impl Into<String>) -> Self {
        Self {
            channel,
            scale: scale.into(),
            title: None,
            overrides: Fragment::new(),
        }
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

/// Build a legend fragment from the theme's legend record.
pub fn make_legend(theme: &Theme, options: &LegendOptions) -> SpecResult<Fragment> {
    require("scale", &options.scale)?;

    let style = to_fragment(theme.legend())?;

    let mut binding = Fragment::new();
    binding.insert(
        options.channel.key().to_string(),
        Value::from(options.scale.as_str()),
    );
    if let Some(title) = &options.title {
        binding.insert("title".to_string(), Value::from(title.as_str()));
    }

    let legend = merge_layers([&style, &binding, &options.overrides]);
    debug!(channel = %options.channel, scale = %options.scale, "built legend fragment");
    Ok(legend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legend_inherits_theme() {
        let theme = Theme::default();
        let legend = make_legend(&theme, &LegendOptions::new(LegendChannel::Stroke, "color")).unwrap();
        assert_eq!(legend["stroke"], json!("color"));
        assert_eq!(legend["orient"], json!("top-right"));
        assert_eq!(legend["symbolType"], json!("stroke"));
        assert_eq!(legend["titleFontSize"], json!(11));
        assert!(!legend.contains_key("title"));
    }

    #[test]
    fn test_legend_title_and_overrides() {
        let theme = Theme::default();
        let mut overrides = Fragment::new();
        overrides.insert("orient".to_string(), json!("bottom"));
        let options = LegendOptions::new(LegendChannel::Fill, "status")
            .title("Status")
            .overrides(overrides);
        let legend = make_legend(&theme, &options).unwrap();
        assert_eq!(legend["fill"], json!("status"));
        assert_eq!(legend["title"], json!("Status"));
        assert_eq!(legend["orient"], json!("bottom"));
    }

    #[test]
    fn test_legend_requires_scale() {
        let theme = Theme::default();
        assert!(make_legend(&theme, &LegendOptions::new(LegendChannel::Size, "")).is_err());
    }

    #[test]
    fn test_channel_keys() {
        assert_eq!(LegendChannel::StrokeDash.key(), "strokeDash");
        assert_eq!(LegendChannel::StrokeWidth.key(), "strokeWidth");
        assert_eq!(LegendChannel::ALL.len(), 7);
    }
}
