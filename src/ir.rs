use serde::Serialize;
use serde_json::Value;

use crate::error::SpecResult;
use crate::merge::Fragment;
use crate::theme::Layout;

/// Schema identifier required by the rendering engine.
pub const VEGA_SCHEMA_V5: &str = "https://vega.github.io/schema/vega/v5.json";

// =============================================================================
// Input: chart parts
// =============================================================================

/// Fragments collected for one chart, before assembly.
///
/// Fragments usually come from [`crate::fragment`] factories but may be built
/// by hand as long as they follow the same shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpec {
    /// Data source definitions, passed through untouched.
    pub data: Vec<Value>,
    pub scales: Vec<Fragment>,
    pub axes: Vec<Fragment>,
    pub marks: Vec<Fragment>,
    pub legends: Vec<Fragment>,
}

impl ChartSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data.push(data);
        self
    }

    pub fn scale(mut self, scale: Fragment) -> Self {
        self.scales.push(scale);
        self
    }

    pub fn axis(mut self, axis: Fragment) -> Self {
        self.axes.push(axis);
        self
    }

    pub fn mark(mut self, mark: Fragment) -> Self {
        self.marks.push(mark);
        self
    }

    pub fn legend(mut self, legend: Fragment) -> Self {
        self.legends.push(legend);
        self
    }
}

// =============================================================================
// Output: assembled document
// =============================================================================

/// The complete specification handed to the rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(flatten)]
    pub layout: Layout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Value>,
    pub scales: Vec<Fragment>,
    pub axes: Vec<Fragment>,
    pub marks: Vec<Fragment>,
    pub legends: Vec<Fragment>,
}

impl Document {
    pub fn to_value(&self) -> SpecResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Names of the declared scales, in declaration order.
    pub fn scale_names(&self) -> Vec<&str> {
        self.scales
            .iter()
            .filter_map(|s| s.get("name").and_then(Value::as_str))
            .collect()
    }
}
