//! Configuration merging.
//!
//! Implements the deep merge used to lay a caller-supplied override document
//! over the default configuration. The merge works on untyped
//! `serde_json::Value` trees so that a partial override (one that only names
//! the leaves it changes) can be expressed without `Option` on every field.
//!
//! # Merge Rules
//!
//! - When both sides are objects, every key of the override is merged into the
//!   default: keys present on both sides recurse, new keys are inserted.
//! - In every other case the override replaces the default outright. Arrays
//!   are not merged element-wise, and an explicit `null` clears the default.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use swagger_config::merge;
//!
//! let defaults = json!({ "server": { "host": "0.0.0.0", "port": 8080 } });
//! let overrides = json!({ "server": { "port": 3000 } });
//!
//! let merged = merge(defaults, overrides);
//! assert_eq!(merged, json!({ "server": { "host": "0.0.0.0", "port": 3000 } }));
//! ```

use serde_json::Value;

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;

/// Deep-merges `overrides` onto `defaults` and returns the merged tree.
///
/// Recursion only happens when both the default and the override at a given
/// key are objects; any other override value replaces the default.
pub fn merge(defaults: Value, overrides: Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(mut base), Value::Object(layer)) => {
            for (key, value) in layer {
                let merged = match base.remove(&key) {
                    Some(existing) => merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, layer) => layer,
    }
}
