//! Value normalization.
//!
//! Normalization fixes the semantic mapping behind the round-trip
//! guarantee: encoding always operates on `normalize(v)`, and
//! decoding an encoded document yields `normalize(v)` back. The only
//! rewrite in the Rust model is non-finite numbers becoming null
//! (the serde bridge already maps `None` and unit types to null on
//! the way in); arrays and objects are normalized element-wise with
//! key order retained.

use crate::value::Value;

/// Returns the normalized form of `value`.
///
/// Idempotent: `normalize(normalize(v)) == normalize(v)`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{normalize, Value};
///
/// assert_eq!(normalize(&Value::from(f64::NAN)), Value::Null);
/// assert_eq!(normalize(&Value::from(1.5)), Value::from(1.5));
/// ```
#[must_use]
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(n) if !n.is_finite() => Value::Null,
        Value::Array(arr) => Value::Array(arr.iter().map(normalize).collect()),
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    #[test]
    fn non_finite_becomes_null() {
        assert_eq!(normalize(&Value::from(f64::INFINITY)), Value::Null);
        assert_eq!(normalize(&Value::from(f64::NEG_INFINITY)), Value::Null);
        assert_eq!(normalize(&Value::from(f64::NAN)), Value::Null);
    }

    #[test]
    fn recurses_through_containers() {
        let value = toon!({
            "a": [1.0, "x"],
            "b": {"c": true}
        });
        let mut with_nan = value.clone();
        if let Value::Object(obj) = &mut with_nan {
            obj.insert("bad".to_string(), Value::from(f64::NAN));
        }
        let normalized = normalize(&with_nan);
        let obj = normalized.as_object().unwrap();
        assert_eq!(obj.get("bad"), Some(&Value::Null));
        assert_eq!(obj.get("a"), value.as_object().unwrap().get("a"));
    }

    #[test]
    fn idempotent() {
        let value = toon!({"n": 1.5, "s": "x", "arr": [null, true]});
        assert_eq!(normalize(&normalize(&value)), normalize(&value));
    }
}
