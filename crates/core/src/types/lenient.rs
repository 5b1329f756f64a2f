//! Deserialization helpers for loosely-typed API payloads.
//!
//! The server hands back whatever its ORM produced: numbers as strings,
//! JSONB columns in several shapes, `null` anywhere. Every helper here
//! coerces what it can and falls back to a default for the rest, so one odd
//! field never fails the record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Exclusive bound of the `i64` range as an `f64` (2^63).
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Keys tried, in order, when a label list entry is an object.
const LABEL_KEYS: [&str; 4] = ["size", "name", "label", "value"];

/// Deserialize any value, falling back to `T::default()` if it does not fit.
pub fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize an optional value, treating anything that does not fit as `None`.
pub fn none_on_error<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a count sent as a number, a numeric string or an integral
/// float; anything else is `0`.
pub fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_int(deserializer)?.unwrap_or_default())
}

/// Like [`lenient_int`] but `None` when no integer can be read
/// (Express echoes `req.query.page` back unparsed).
pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value))
}

/// Read an integer out of a JSON value.
pub fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    let whole = f.is_finite() && f.fract().abs() < f64::EPSILON;
    (whole && (-I64_BOUND..I64_BOUND).contains(&f)).then(|| f as i64)
}

/// Deserialize a flag sent as a bool, `0`/`1` or a `"true"`/`"false"` string.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    };
    Ok(flag)
}

/// Deserialize text; numbers and bools are rendered, anything else is empty.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Deserialize optional text, treating blank strings as `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = text_from_value(Value::deserialize(deserializer)?);
    Ok(text.filter(|s| !s.trim().is_empty()))
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize a list, dropping entries that do not fit `T`.
///
/// A non-array value is an empty list.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let list = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(list)
}

/// Deserialize a list of labels (sizes, tags).
///
/// Entries may be strings, numbers, or objects such as
/// `{"size": "M", "stock": 3}`; for objects the first of `size`, `name`,
/// `label` or `value` is used. Entries with no label are dropped.
pub fn label_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(label_from_value).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    };
    Ok(labels)
}

fn label_from_value(value: Value) -> Option<String> {
    let label = match value {
        Value::Object(mut fields) => LABEL_KEYS
            .iter()
            .find_map(|key| fields.remove(*key).and_then(text_from_value)),
        other => text_from_value(other),
    };
    label.filter(|s| !s.trim().is_empty())
}

/// Deserialize a UUID id, falling back to the nil id for anything that is
/// not a UUID string (numbers, legacy ids, `null`).
pub fn uuid_or_nil<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + From<uuid::Uuid>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| uuid::Uuid::parse_str(s.trim()).ok())
        .map_or_else(T::default, T::from))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Counts {
        #[serde(default, deserialize_with = "lenient_int")]
        stock: i64,
        #[serde(default, deserialize_with = "optional_int")]
        page: Option<i64>,
        #[serde(default, deserialize_with = "lenient_bool")]
        active: bool,
        #[serde(default, deserialize_with = "label_list")]
        sizes: Vec<String>,
    }

    fn counts(value: serde_json::Value) -> Counts {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_int_from_value() {
        assert_eq!(int_from_value(&json!(5)), Some(5));
        assert_eq!(int_from_value(&json!("5")), Some(5));
        assert_eq!(int_from_value(&json!(" 12 ")), Some(12));
        assert_eq!(int_from_value(&json!(1.0)), Some(1));
        assert_eq!(int_from_value(&json!("3.0")), Some(3));
        assert_eq!(int_from_value(&json!(2.5)), None);
        assert_eq!(int_from_value(&json!("many")), None);
        assert_eq!(int_from_value(&json!(1e300)), None);
        assert_eq!(int_from_value(&json!([1])), None);
        assert_eq!(int_from_value(&json!(null)), None);
    }

    #[test]
    fn test_mismatched_types_fall_back() {
        let c = counts(json!({"stock": "lots", "page": {"n": 2}, "active": "maybe", "sizes": 7}));
        assert_eq!(c.stock, 0);
        assert_eq!(c.page, None);
        assert!(!c.active);
        assert!(c.sizes.is_empty());
    }

    #[test]
    fn test_coercions() {
        let c = counts(json!({"stock": "5", "page": 2.0, "active": 1, "sizes": ["S", 42]}));
        assert_eq!(c.stock, 5);
        assert_eq!(c.page, Some(2));
        assert!(c.active);
        assert_eq!(c.sizes, vec!["S".to_string(), "42".to_string()]);
    }

    #[test]
    fn test_label_objects() {
        let c = counts(json!({"sizes": [
            {"size": "M", "stock": 3},
            {"name": "L"},
            {"stock": 1},
            null,
            ""
        ]}));
        assert_eq!(c.sizes, vec!["M".to_string(), "L".to_string()]);
    }
}
