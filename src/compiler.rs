use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::error::{SpecError, SpecResult};
use crate::fragment::LegendChannel;
use crate::ir::{ChartSpec, Document, VEGA_SCHEMA_V5};
use crate::merge::Fragment;
use crate::theme::Theme;

/// Assemble chart parts into a complete document.
///
/// The factories do not know about each other, so this is where cross
/// references are checked: scale names must be unique, and every axis, legend
/// and mark encoding channel that names a scale must name a declared one.
pub fn compile_spec(theme: &Theme, spec: ChartSpec) -> SpecResult<Document> {
    check_references(&spec)?;

    debug!(
        scales = spec.scales.len(),
        axes = spec.axes.len(),
        marks = spec.marks.len(),
        legends = spec.legends.len(),
        "compiled chart document"
    );

    Ok(Document {
        schema: VEGA_SCHEMA_V5.to_string(),
        layout: theme.layout().clone(),
        data: spec.data,
        scales: spec.scales,
        axes: spec.axes,
        marks: spec.marks,
        legends: spec.legends,
    })
}

/// Verify that every scale reference in `spec` resolves.
pub fn check_references(spec: &ChartSpec) -> SpecResult<()> {
    let declared = declared_scales(&spec.scales)?;

    let resolve = |referrer: String, scale: &str| -> SpecResult<()> {
        if declared.contains(scale) {
            Ok(())
        } else {
            Err(SpecError::UnresolvedScale {
                referrer,
                scale: scale.to_string(),
            })
        }
    };

    for (i, axis) in spec.axes.iter().enumerate() {
        let scale = axis
            .get("scale")
            .and_then(Value::as_str)
            .ok_or(SpecError::InvalidArgument { field: "axis.scale" })?;
        let orient = axis.get("orient").and_then(Value::as_str).unwrap_or("?");
        resolve(format!("axis #{i} ({orient})"), scale)?;
    }

    for (i, legend) in spec.legends.iter().enumerate() {
        for channel in LegendChannel::ALL {
            if let Some(scale) = legend.get(channel.key()).and_then(Value::as_str) {
                resolve(format!("legend #{i} channel {channel}"), scale)?;
            }
        }
    }

    for (i, mark) in spec.marks.iter().enumerate() {
        let kind = mark.get("type").and_then(Value::as_str).unwrap_or("?");
        for (state, channel, scale) in encoding_scales(mark) {
            resolve(format!("mark #{i} ({kind}) channel {state}.{channel}"), scale)?;
        }
    }

    Ok(())
}

fn declared_scales(scales: &[Fragment]) -> SpecResult<HashSet<&str>> {
    let mut names = HashSet::new();
    for scale in scales {
        let name = scale
            .get("name")
            .and_then(Value::as_str)
            .ok_or(SpecError::InvalidArgument { field: "scale.name" })?;
        if !names.insert(name) {
            return Err(SpecError::DuplicateScale(name.to_string()));
        }
    }
    Ok(names)
}

/// Every `(state, channel, scale)` triple in a mark's `encode` block.
///
/// A channel is either a single value reference or a list of production
/// rules, each of which may name a scale.
fn encoding_scales(mark: &Fragment) -> Vec<(&str, &str, &str)> {
    let mut refs = Vec::new();
    let Some(encode) = mark.get("encode").and_then(Value::as_object) else {
        return refs;
    };
    for (state, channels) in encode {
        let Some(channels) = channels.as_object() else {
            continue;
        };
        for (channel, value) in channels {
            let rules: Vec<&Value> = match value {
                Value::Array(rules) => rules.iter().collect(),
                other => vec![other],
            };
            for rule in rules {
                if let Some(scale) = rule.get("scale").and_then(Value::as_str) {
                    refs.push((state.as_str(), channel.as_str(), scale));
                }
            }
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{
        make_axis, make_legend, make_line_mark, make_scale, AxisOptions, LegendOptions,
        ScaleDomain, ScaleOptions, ScaleRange,
    };
    use serde_json::json;

    fn x_scale(theme: &Theme) -> Fragment {
        make_scale(
            theme,
            &ScaleOptions::new("x", "time", ScaleRange::width(), ScaleDomain::data("table", "date")),
        )
        .unwrap()
    }

    fn y_scale(theme: &Theme) -> Fragment {
        make_scale(
            theme,
            &ScaleOptions::new("y", "linear", ScaleRange::height(), ScaleDomain::data("table", "value")),
        )
        .unwrap()
    }

    #[test]
    fn test_compile_resolves_references() {
        let theme = Theme::default();
        let spec = ChartSpec::new()
            .scale(x_scale(&theme))
            .scale(y_scale(&theme))
            .axis(make_axis(&theme, &AxisOptions::bottom("x")).unwrap())
            .mark(make_line_mark(&theme, "table", "date", "value", None).unwrap());
        let doc = compile_spec(&theme, spec).unwrap();
        assert_eq!(doc.schema, VEGA_SCHEMA_V5);
        assert_eq!(doc.scale_names(), vec!["x", "y"]);
        assert_eq!(doc.layout, *theme.layout());
    }

    #[test]
    fn test_compile_rejects_dangling_axis() {
        let theme = Theme::default();
        let spec = ChartSpec::new()
            .scale(x_scale(&theme))
            .axis(make_axis(&theme, &AxisOptions::left("y")).unwrap());
        let err = compile_spec(&theme, spec).unwrap_err();
        match err {
            SpecError::UnresolvedScale { referrer, scale } => {
                assert_eq!(scale, "y");
                assert!(referrer.contains("axis #0"));
            }
            other => panic!("Expected UnresolvedScale, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_rejects_dangling_mark_channel() {
        let theme = Theme::default();
        // y scale missing
        let spec = ChartSpec::new()
            .scale(x_scale(&theme))
            .mark(make_line_mark(&theme, "table", "date", "value", None).unwrap());
        let err = compile_spec(&theme, spec).unwrap_err();
        assert!(err.to_string().contains("enter.y"), "{err}");
    }

    #[test]
    fn test_compile_rejects_dangling_legend() {
        let theme = Theme::default();
        let legend = make_legend(
            &theme,
            &LegendOptions::new(LegendChannel::Stroke, "color"),
        )
        .unwrap();
        let spec = ChartSpec::new().scale(x_scale(&theme)).legend(legend);
        assert!(matches!(
            compile_spec(&theme, spec),
            Err(SpecError::UnresolvedScale { .. })
        ));
    }

    #[test]
    fn test_compile_checks_stroke_width_legend() {
        let theme = Theme::default();
        let legend = make_legend(
            &theme,
            &LegendOptions::new(LegendChannel::StrokeWidth, "weight"),
        )
        .unwrap();
        let spec = ChartSpec::new().scale(x_scale(&theme)).legend(legend);
        let err = compile_spec(&theme, spec).unwrap_err();
        assert!(err.to_string().contains("channel strokeWidth"), "{err}");
    }

    #[test]
    fn test_compile_rejects_duplicate_scales() {
        let theme = Theme::default();
        let spec = ChartSpec::new().scale(x_scale(&theme)).scale(x_scale(&theme));
        let err = compile_spec(&theme, spec).unwrap_err();
        assert!(matches!(err, SpecError::DuplicateScale(ref name) if name == "x"));
    }

    #[test]
    fn test_production_rules_are_checked() {
        let mark = match json!({
            "type": "rect",
            "encode": {
                "update": {
                    "fill": [
                        {"test": "datum.alert", "value": "#f87171"},
                        {"scale": "color", "field": "host"}
                    ]
                }
            }
        }) {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        };
        let refs = encoding_scales(&mark);
        assert_eq!(refs, vec![("update", "fill", "color")]);
    }

    #[test]
    fn test_document_serializes_layout_at_top_level() {
        let theme = Theme::default();
        let spec = ChartSpec::new().scale(x_scale(&theme));
        let doc = compile_spec(&theme, spec).unwrap().to_value().unwrap();
        assert_eq!(doc["$schema"], json!(VEGA_SCHEMA_V5));
        assert_eq!(doc["width"], json!(1000));
        assert_eq!(doc["padding"]["left"], json!(60));
        assert_eq!(doc["autosize"], json!({"type": "fit", "contains": "padding"}));
        assert_eq!(doc["legends"], json!([]));
        assert!(doc.get("data").is_none());
    }

    #[test]
    fn test_data_passes_through() {
        let theme = Theme::default();
        let spec = ChartSpec::new().data(json!({"name": "table", "url": "data/cpu.json"}));
        let doc = compile_spec(&theme, spec).unwrap().to_value().unwrap();
        assert_eq!(doc["data"][0]["name"], json!("table"));
    }
}
