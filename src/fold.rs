//! Key folding and path expansion.
//!
//! Folding is a pre-encode rewrite that collapses chains of
//! single-key objects into one dotted key (`a: {b: {c: 1}}` →
//! `a.b.c: 1`). Expansion is the symmetric post-decode rewrite.
//! Both only touch chains whose every segment is a plain identifier,
//! so the dotted form is unambiguous.

use crate::error::{Error, Result};
use crate::lexical::is_identifier_segment;
use crate::options::FlattenDepth;
use crate::value::Value;
use crate::Map;

/// Applies safe key folding throughout a value.
#[must_use]
pub fn fold(value: Value, depth: FlattenDepth) -> Value {
    match value {
        Value::Object(map) => Value::Object(fold_object(map, depth)),
        Value::Array(arr) => Value::Array(arr.into_iter().map(|v| fold(v, depth)).collect()),
        other => other,
    }
}

/// Walks the single-key chain hanging off `key`, bounded by `depth`.
/// Returns the joined segments only when every segment (including
/// `key`) is an identifier and at least one link was followed.
fn chain_segments(key: &str, value: &Value, depth: FlattenDepth) -> Option<Vec<String>> {
    let mut segments = vec![key.to_string()];
    let mut cursor = value;
    while let Value::Object(m) = cursor {
        if m.len() != 1 || !depth.allows(segments.len() + 1) {
            break;
        }
        let (k, v) = m.iter().next().expect("len checked");
        segments.push(k.clone());
        cursor = v;
    }
    if segments.len() >= 2 && segments.iter().all(|s| is_identifier_segment(s)) {
        Some(segments)
    } else {
        None
    }
}

fn fold_object(map: Map, depth: FlattenDepth) -> Map {
    let original_keys: Vec<String> = map.keys().cloned().collect();
    let mut out = Map::with_capacity(map.len());

    for (key, value) in map {
        if let Some(segments) = chain_segments(&key, &value, depth) {
            let dotted = segments.join(".");
            // Folding must not shadow a key that actually exists.
            let collides =
                out.contains_key(&dotted) || original_keys.iter().any(|k| *k == dotted);
            if !collides {
                let mut leaf = value;
                for _ in 1..segments.len() {
                    leaf = match leaf {
                        Value::Object(m) => m.into_iter().next().expect("chain verified").1,
                        _ => unreachable!("chain walks objects only"),
                    };
                }
                out.insert(dotted, fold(leaf, depth));
                continue;
            }
        }
        out.insert(key, fold(value, depth));
    }
    out
}

/// Applies safe path expansion throughout a value. In strict mode a
/// leaf/branch or duplicate-leaf conflict is an error; in lax mode
/// the later write wins.
pub fn expand(value: Value, strict: bool) -> Result<Value> {
    match value {
        Value::Object(map) => expand_object(map, strict).map(Value::Object),
        Value::Array(arr) => arr
            .into_iter()
            .map(|v| expand(v, strict))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

fn is_expandable(key: &str) -> bool {
    key.contains('.') && key.split('.').all(is_identifier_segment)
}

fn expand_object(map: Map, strict: bool) -> Result<Map> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        let value = expand(value, strict)?;
        if is_expandable(&key) {
            let segments: Vec<&str> = key.split('.').collect();
            insert_path(&mut out, &key, &segments, value, strict)?;
        } else {
            // Decoded objects have unique keys, so a collision here
            // means expansion already created this key.
            if strict && out.contains_key(&key) {
                return Err(Error::path_conflict(
                    key.as_str(),
                    "key collides with expanded path",
                ));
            }
            out.insert(key, value);
        }
    }
    Ok(out)
}

fn insert_path(
    out: &mut Map,
    full_key: &str,
    segments: &[&str],
    value: Value,
    strict: bool,
) -> Result<()> {
    let (last, parents) = segments.split_last().expect("dotted key has segments");
    let mut cursor = out;
    for seg in parents {
        let is_branch = matches!(cursor.get(*seg), Some(Value::Object(_)));
        if !is_branch {
            if strict && cursor.contains_key(*seg) {
                return Err(Error::path_conflict(
                    full_key,
                    "path segment collides with a non-object value",
                ));
            }
            cursor.insert((*seg).to_string(), Value::Object(Map::new()));
        }
        cursor = match cursor.get_mut(*seg) {
            Some(Value::Object(m)) => m,
            _ => unreachable!("segment just ensured to be an object"),
        };
    }
    if strict && cursor.contains_key(*last) {
        return Err(Error::path_conflict(full_key, "duplicate leaf"));
    }
    cursor.insert((*last).to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    #[test]
    fn folds_single_key_chain() {
        let value = toon!({"a": {"b": {"c": {"value": 42}}}});
        let folded = fold(value, FlattenDepth::Unbounded);
        let obj = folded.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a.b.c.value"), Some(&Value::from(42)));
    }

    #[test]
    fn depth_limit_caps_segments() {
        let value = toon!({"a": {"b": {"c": 1}}});
        let folded = fold(value, FlattenDepth::Limit(2));
        let obj = folded.as_object().unwrap();
        let inner = obj.get("a.b").unwrap().as_object().unwrap();
        assert_eq!(inner.get("c"), Some(&Value::from(1)));

        let value = toon!({"a": {"b": 1}});
        let folded = fold(value, FlattenDepth::Limit(1));
        assert_eq!(folded, toon!({"a": {"b": 1}}));
    }

    #[test]
    fn non_identifier_segment_blocks_fold() {
        let value = toon!({"a": {"two words": {"b": 1}}});
        let folded = fold(value.clone(), FlattenDepth::Unbounded);
        assert_eq!(folded, value);
    }

    #[test]
    fn fold_skips_colliding_dotted_key() {
        let value = toon!({"a": {"b": 1}, "a.b": 2});
        let folded = fold(value.clone(), FlattenDepth::Unbounded);
        assert_eq!(folded, value);
    }

    #[test]
    fn folds_below_multi_key_objects() {
        let value = toon!({"top": {"x": {"y": 1}, "z": 2}});
        let folded = fold(value, FlattenDepth::Unbounded);
        let top = folded.as_object().unwrap().get("top").unwrap();
        let top = top.as_object().unwrap();
        assert_eq!(top.get("x.y"), Some(&Value::from(1)));
        assert_eq!(top.get("z"), Some(&Value::from(2)));
    }

    #[test]
    fn expands_dotted_keys() {
        let value = toon!({"a.b.c": 1, "a.b.d": 2});
        let expanded = expand(value, false).unwrap();
        assert_eq!(expanded, toon!({"a": {"b": {"c": 1, "d": 2}}}));
    }

    #[test]
    fn expansion_round_trips_fold() {
        let original = toon!({"a": {"b": {"c": {"value": 42}}}});
        let folded = fold(original.clone(), FlattenDepth::Unbounded);
        let back = expand(folded, false).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn lax_conflict_last_write_wins() {
        let value = toon!({"a.b": 1, "a.b.c": 2});
        let expanded = expand(value, false).unwrap();
        assert_eq!(expanded, toon!({"a": {"b": {"c": 2}}}));
    }

    #[test]
    fn strict_conflicts_error() {
        let value = toon!({"a.b": 1, "a.b.c": 2});
        assert!(matches!(
            expand(value, true),
            Err(Error::PathConflict { .. })
        ));

        let value = toon!({"a": {"x": 1}, "a.y": 2});
        // "a" decodes as an ordinary key; expanding "a.y" then walks
        // into the existing object without conflict.
        assert_eq!(
            expand(value, true).unwrap(),
            toon!({"a": {"x": 1, "y": 2}})
        );

        let value = toon!({"a.b": 1, "a": {"b": 2}});
        assert!(matches!(
            expand(value, true),
            Err(Error::PathConflict { .. })
        ));
    }
}
