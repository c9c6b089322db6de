//! Shallow merge of fragment layers.
//!
//! Every factory and the theme override path combine records the same way:
//! layers are applied in order and each key of a later layer replaces the
//! earlier value wholesale. Nested objects are *not* merged recursively, so an
//! override of `grid` or `padding` replaces the entire sub-record.
//!
//! ```text
//! defaults  { a: 1, grid: { color: "#222", opacity: 0.5 } }
//! override  {       grid: { opacity: 1 }, b: true }
//! result    { a: 1, grid: { opacity: 1 }, b: true }
//! ```
//!
//! Keys keep the position of their first appearance; keys new in a later layer
//! are appended.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SpecResult;

/// A single spec fragment: an insertion-ordered JSON object.
pub type Fragment = Map<String, Value>;

/// Apply `layer` on top of `base` in place.
pub fn overlay(base: &mut Fragment, layer: &Fragment) {
    for (key, value) in layer {
        base.insert(key.clone(), value.clone());
    }
}

/// Merge an ordered sequence of layers into a fresh fragment. Later layers win.
pub fn merge_layers<'a, I>(layers: I) -> Fragment
where
    I: IntoIterator<Item = &'a Fragment>,
{
    let mut merged = Fragment::new();
    for layer in layers {
        overlay(&mut merged, layer);
    }
    merged
}

/// Serialize a typed record into a fragment.
///
/// Records that do not serialize to a JSON object yield an empty fragment.
pub fn to_fragment<T: Serialize>(record: &T) -> SpecResult<Fragment> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Fragment::new()),
    }
}
