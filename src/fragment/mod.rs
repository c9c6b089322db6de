// Fragment factories: theme tokens projected into spec fragments

pub mod axis;
pub mod legend;
pub mod mark;
pub mod scale;

// Public API re-exports
pub use axis::{make_axis, AxisOptions};
pub use legend::{make_legend, LegendChannel, LegendOptions};
pub use mark::{make_line_mark, make_mark, FieldBindings, MarkOptions};
pub use scale::{make_scale, Palette, ScaleDomain, ScaleOptions, ScaleRange};
