//! Built-in design tokens: the dark "operational data graphics" theme.

use std::collections::BTreeMap;

use serde_json::Number;

use crate::theme::{
    AxisDefaults, AxisStyle, Autosize, BackgroundColors, BorderColors, Colors, DivergingColors,
    FontSizes, FontWeight, FontWeights, Fonts, Interaction, InteractionState, Layout,
    LegendStyle, MarkDefaults, MarkStyle, Padding, StatusColors, TextColors, Theme, Typography,
    UiColors,
};

const UI_FONT: &str = "Inter, system-ui, sans-serif";
const MONO_FONT: &str = "JetBrains Mono, Consolas, Monaco, monospace";
const GRID: &str = "#2a2a2a";
const TEXT_SECONDARY: &str = "#a0a0a0";
const TEXT_TERTIARY: &str = "#888888";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn px(value: u32) -> Number {
    Number::from(value)
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            width: 1000,
            height: 240,
            padding: Padding {
                top: 10,
                left: 60,
                right: 20,
                bottom: 40,
            },
            background: "#1a1a1a".to_string(),
            autosize: Autosize {
                kind: "fit".to_string(),
                contains: "padding".to_string(),
            },
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            background: BackgroundColors {
                canvas: "#0d0d0d".to_string(),
                chart: "#1a1a1a".to_string(),
                elevated: "#2a2a2a".to_string(),
            },
            // blue, green, amber, purple, red
            categorical: strings(&["#60a5fa", "#34d399", "#fbbf24", "#a78bfa", "#f87171"]),
            status: StatusColors {
                healthy: "#34d399".to_string(),
                warning: "#fbbf24".to_string(),
                error: "#f87171".to_string(),
                unknown: "#6b7280".to_string(),
            },
            sequential: strings(&[
                "#1e3a8a", "#1e40af", "#2563eb", "#3b82f6", "#60a5fa", "#93c5fd",
            ]),
            diverging: DivergingColors {
                negative: strings(&["#dc2626", "#ef4444", "#f87171"]),
                neutral: "#6b7280".to_string(),
                positive: strings(&["#10b981", "#34d399", "#6ee7b7"]),
            },
            ui: UiColors {
                text: TextColors {
                    primary: "#f5f5f5".to_string(),
                    secondary: TEXT_SECONDARY.to_string(),
                    tertiary: TEXT_TERTIARY.to_string(),
                    muted: "#6b7280".to_string(),
                },
                border: BorderColors {
                    strong: "#2a2a2a".to_string(),
                    medium: "#1f1f1f".to_string(),
                    subtle: "#171717".to_string(),
                },
                grid: GRID.to_string(),
            },
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Typography {
            fonts: Fonts {
                sans: "Inter, system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif"
                    .to_string(),
                mono: "JetBrains Mono, Consolas, Monaco, 'Courier New', monospace".to_string(),
            },
            sizes: FontSizes {
                title: 14,
                axis_title: 11,
                axis_label: 10,
                tick: 10,
                legend: 10,
                tooltip: 12,
            },
            weights: FontWeights {
                regular: 400,
                medium: 500,
                semibold: 600,
            },
        }
    }
}

/// Shared part of every built-in axis orientation.
fn axis_base(orient: &str, label_font: &str) -> AxisStyle {
    AxisStyle {
        orient: orient.to_string(),
        title_color: TEXT_SECONDARY.to_string(),
        title_font: UI_FONT.to_string(),
        title_font_size: px(11),
        title_font_weight: FontWeight::from(500),
        title_padding: px(12),
        label_color: TEXT_TERTIARY.to_string(),
        label_font: label_font.to_string(),
        label_font_size: px(10),
        label_padding: px(8),
        label_flush: None,
        tick_color: GRID.to_string(),
        tick_size: px(5),
        domain_color: GRID.to_string(),
        domain_width: px(1),
        grid: false,
        grid_color: None,
        grid_opacity: None,
        grid_dash: None,
    }
}

impl Default for AxisDefaults {
    fn default() -> Self {
        let bottom = AxisStyle {
            label_flush: Some(true),
            ..axis_base("bottom", UI_FONT)
        };
        // Value axis: monospace labels and a dotted grid
        let left = AxisStyle {
            grid: true,
            grid_color: Some(GRID.to_string()),
            grid_opacity: Some(0.5),
            grid_dash: Some(vec![px(1), px(3)]),
            ..axis_base("left", MONO_FONT)
        };
        AxisDefaults {
            bottom,
            left,
            extra: BTreeMap::new(),
        }
    }
}

impl Default for MarkDefaults {
    fn default() -> Self {
        MarkDefaults {
            line: MarkStyle {
                stroke_width: Some(1.5),
                stroke_cap: Some("round".to_string()),
                stroke_join: Some("round".to_string()),
                interpolate: Some("linear".to_string()),
                ..MarkStyle::default()
            },
            area: MarkStyle {
                fill_opacity: Some(0.8),
                stroke_width: Some(1.0),
                ..MarkStyle::default()
            },
            bar: MarkStyle {
                corner_radius: Some(2.0),
                opacity: Some(1.0),
                ..MarkStyle::default()
            },
            point: MarkStyle {
                size: Some(50.0),
                opacity: Some(1.0),
                ..MarkStyle::default()
            },
            rect: MarkStyle {
                corner_radius: Some(0.0),
                opacity: Some(1.0),
                ..MarkStyle::default()
            },
        }
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Interaction {
            hover: InteractionState {
                opacity: 0.7,
                transition: Some(200),
                stroke_width: None,
            },
            focus: InteractionState {
                opacity: 1.0,
                transition: None,
                stroke_width: Some(2.0),
            },
            unfocus: InteractionState {
                opacity: 0.2,
                transition: None,
                stroke_width: None,
            },
        }
    }
}

impl Default for LegendStyle {
    fn default() -> Self {
        LegendStyle {
            title_color: TEXT_SECONDARY.to_string(),
            title_font: UI_FONT.to_string(),
            title_font_size: px(11),
            title_font_weight: FontWeight::from(500),
            label_color: TEXT_TERTIARY.to_string(),
            label_font: UI_FONT.to_string(),
            label_font_size: px(10),
            symbol_type: "stroke".to_string(),
            symbol_stroke_width: 2.0,
            symbol_size: 100.0,
            orient: "top-right".to_string(),
            direction: "horizontal".to_string(),
            offset: px(0),
            padding: px(8),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            layout: Layout::default(),
            colors: Colors::default(),
            typography: Typography::default(),
            axis: AxisDefaults::default(),
            marks: MarkDefaults::default(),
            interaction: Interaction::default(),
            legend: LegendStyle::default(),
        }
    }
}
