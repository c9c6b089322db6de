// Library exports for opgraph

pub mod error;
pub mod merge;
pub mod theme;
pub mod tokens;
pub mod theme_resolve;

// Fragment factories and assembly
pub mod fragment;
pub mod ir;
pub mod compiler;

pub use compiler::compile_spec;
pub use error::{SpecError, SpecResult};
pub use ir::{ChartSpec, Document, VEGA_SCHEMA_V5};
pub use merge::Fragment;
pub use theme::{MarkType, Theme};
pub use theme_resolve::ThemeOverrides;
