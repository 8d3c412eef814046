//! Structural diff between two JSON documents
//!
//! Paths are rendered relative to the document root: mapping keys are joined
//! with `.` and sequence elements use `[index]`, e.g. `interface.address[0].ip`.
//! Keys that would make a path ambiguous are quoted: `["a.b"]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Values keyed by structural path
pub type PathMap = BTreeMap<String, Value>;

/// Rendered path of the document root itself
pub const ROOT_PATH: &str = "<root>";

/// A value present on both sides that differs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub old_value: Value,
    pub new_value: Value,
}

/// Differences between a current and a desired document
///
/// `added`, `removed` and `changed` are disjoint: each path appears in at
/// most one of them, and a path whose subtree is added or removed as a whole
/// is reported once at its top, not per leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralDiff {
    added: PathMap,
    removed: PathMap,
    changed: BTreeMap<String, ValueChange>,
}

impl StructuralDiff {
    /// Compare `current` against `desired`
    pub fn compute(current: &Value, desired: &Value) -> Self {
        let mut diff = Self::default();
        diff.walk("", current, desired);
        diff
    }

    /// Paths present in desired but not in current
    pub fn added(&self) -> &PathMap {
        &self.added
    }

    /// Paths present in current but not in desired
    pub fn removed(&self) -> &PathMap {
        &self.removed
    }

    /// Paths present in both whose values differ
    pub fn changed(&self) -> &BTreeMap<String, ValueChange> {
        &self.changed
    }

    /// Paths present in both with equal values
    ///
    /// Not tracked; always `None`.
    pub fn unchanged(&self) -> Option<&PathMap> {
        None
    }

    /// Check if the two documents were deeply equal
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of differing paths
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (PathMap, PathMap, BTreeMap<String, ValueChange>) {
        (self.added, self.removed, self.changed)
    }

    fn walk(&mut self, path: &str, current: &Value, desired: &Value) {
        match (current, desired) {
            (Value::Object(cur), Value::Object(want)) => {
                for (key, want_value) in want {
                    let child = key_path(path, key);
                    match cur.get(key) {
                        Some(cur_value) => self.walk(&child, cur_value, want_value),
                        None => {
                            self.added.insert(child, want_value.clone());
                        }
                    }
                }
                for (key, cur_value) in cur {
                    if !want.contains_key(key) {
                        self.removed.insert(key_path(path, key), cur_value.clone());
                    }
                }
            }
            (Value::Array(cur), Value::Array(want)) => {
                for index in 0..cur.len().max(want.len()) {
                    let child = index_path(path, index);
                    match (cur.get(index), want.get(index)) {
                        (Some(c), Some(w)) => self.walk(&child, c, w),
                        (None, Some(w)) => {
                            self.added.insert(child, w.clone());
                        }
                        (Some(c), None) => {
                            self.removed.insert(child, c.clone());
                        }
                        (None, None) => {}
                    }
                }
            }
            (cur, want) if cur != want => {
                let key = if path.is_empty() {
                    ROOT_PATH.to_string()
                } else {
                    path.to_string()
                };
                self.changed.insert(
                    key,
                    ValueChange {
                        old_value: cur.clone(),
                        new_value: want.clone(),
                    },
                );
            }
            _ => {}
        }
    }
}

/// Compute the structural diff of `current` against `desired`
pub fn diff(current: &Value, desired: &Value) -> StructuralDiff {
    StructuralDiff::compute(current, desired)
}

/// Deep equality: same keys and values, mapping order ignored, no coercion
pub fn deep_equal(current: &Value, desired: &Value) -> bool {
    current == desired
}

fn key_path(parent: &str, key: &str) -> String {
    let needs_quoting = key.is_empty() || key.contains(['.', '[', ']', '"']);
    let segment = if needs_quoting {
        format!("[{}]", Value::String(key.to_string()))
    } else {
        key.to_string()
    };

    if parent.is_empty() || needs_quoting {
        format!("{parent}{segment}")
    } else {
        format!("{parent}.{segment}")
    }
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
