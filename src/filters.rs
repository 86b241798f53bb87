//! Template filters for querying data collections.
//!
//! - `select(input, key, value?)` keeps the entries of a mapping or sequence
//!   whose record contains `key`, or whose `record[key] == value`.
//! - `having(input, key, value?)` returns the first element of a sequence
//!   matching the same test, or nothing.
//!
//! A `value` of null is the same as no value: the test is then key
//! presence. Elements are expected to be mappings. A non-mapping element is
//! a type error, reported to the caller rather than skipped.
//!
//! In layouts both are plain Tera filters with named arguments:
//!
//! ```text
//! {% for id, person in site.data.people | select(key="role", value="chair") %}
//! {% set talk = session.talks | having(key="speaker", value=page.id) %}
//! ```

use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("{filter}: expected {expected}, got {found}")]
    NotACollection {
        filter: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{filter}: element {element} is {found}, not a mapping")]
    NotAMapping {
        filter: &'static str,
        element: String,
        found: &'static str,
    },
}

/// Record test shared by both filters.
#[derive(Debug, Clone, Copy)]
struct Condition<'a> {
    key: &'a str,
    value: Option<&'a Value>,
}

impl<'a> Condition<'a> {
    fn new(key: &'a str, value: Option<&'a Value>) -> Self {
        Self {
            key,
            value: value.filter(|v| !v.is_null()),
        }
    }

    fn matches(
        &self,
        filter: &'static str,
        element: impl FnOnce() -> String,
        record: &Value,
    ) -> Result<bool, FilterError> {
        let map = record.as_object().ok_or_else(|| FilterError::NotAMapping {
            filter,
            element: element(),
            found: type_name(record),
        })?;
        Ok(match self.value {
            None => map.contains_key(self.key),
            Some(expected) => map.get(self.key) == Some(expected),
        })
    }
}

/// Keep the entries of `input` whose record contains `key` (when `value` is
/// `None` or null) or has `record[key] == value`. The result has the shape of the
/// input and keeps its order.
pub fn select(input: &Value, key: &str, value: Option<&Value>) -> Result<Value, FilterError> {
    let condition = Condition::new(key, value);
    match input {
        Value::Object(entries) => {
            let mut selected = Map::new();
            for (name, record) in entries {
                if condition.matches("select", || format!("'{name}'"), record)? {
                    selected.insert(name.clone(), record.clone());
                }
            }
            Ok(Value::Object(selected))
        }
        Value::Array(items) => {
            let mut selected = Vec::new();
            for (index, record) in items.iter().enumerate() {
                if condition.matches("select", || index.to_string(), record)? {
                    selected.push(record.clone());
                }
            }
            Ok(Value::Array(selected))
        }
        other => Err(FilterError::NotACollection {
            filter: "select",
            expected: "a mapping or sequence",
            found: type_name(other),
        }),
    }
}

/// First element of the sequence `input` that contains `key` (when `value`
/// is `None` or null) or has `element[key] == value`.
pub fn having(
    input: &Value,
    key: &str,
    value: Option<&Value>,
) -> Result<Option<Value>, FilterError> {
    let items = input.as_array().ok_or_else(|| FilterError::NotACollection {
        filter: "having",
        expected: "a sequence",
        found: type_name(input),
    })?;
    let condition = Condition::new(key, value);
    for (index, record) in items.iter().enumerate() {
        if condition.matches("having", || index.to_string(), record)? {
            return Ok(Some(record.clone()));
        }
    }
    Ok(None)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

// ============================================================================
// Tera bindings
// ============================================================================

/// Register `select` and `having` as filters on a Tera instance.
pub fn register(tera: &mut tera::Tera) {
    tera.register_filter("select", select_filter);
    tera.register_filter("having", having_filter);
}

fn key_arg<'a>(filter: &str, args: &'a HashMap<String, Value>) -> tera::Result<&'a str> {
    args.get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg(format!("{filter}: a string `key` argument is required")))
}

fn select_filter(input: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = key_arg("select", args)?;
    select(input, key, args.get("value")).map_err(tera::Error::msg)
}

/// Not found renders as `null`, which Tera treats as falsy.
fn having_filter(input: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = key_arg("having", args)?;
    having(input, key, args.get("value"))
        .map(Option::unwrap_or_default)
        .map_err(tera::Error::msg)
}
