/// Builds a [`Value`](crate::Value) from inline JSON-like syntax.
///
/// Arrays and objects are walked token by token, so nested
/// structures, trailing commas, and negative number literals all
/// work:
///
/// ```rust
/// use toon_codec::toon;
///
/// let value = toon!({
///     "name": "Ada",
///     "offsets": [-2, 0, 2],
///     "meta": {"depth": 3},
/// });
/// assert!(value.is_object());
/// ```
///
/// Anything that is not `null`, an array, or an object is converted
/// through [`to_value`](crate::to_value); non-serializable
/// expressions fall back to `Value::Null`.
#[macro_export]
macro_rules! toon {
    // Element accumulation for arrays. A leading dash glues onto the
    // following literal so negative numbers stay one element.
    (@seq $vec:ident) => {};
    (@seq $vec:ident - $lit:literal $(, $($rest:tt)*)?) => {
        $vec.push($crate::toon!(- $lit));
        $($crate::toon!(@seq $vec $($rest)*);)?
    };
    (@seq $vec:ident $elem:tt $(, $($rest:tt)*)?) => {
        $vec.push($crate::toon!($elem));
        $($crate::toon!(@seq $vec $($rest)*);)?
    };

    // Entry accumulation for objects.
    (@obj $map:ident) => {};
    (@obj $map:ident $key:literal : - $lit:literal $(, $($rest:tt)*)?) => {
        $map.insert($key.to_string(), $crate::toon!(- $lit));
        $($crate::toon!(@obj $map $($rest)*);)?
    };
    (@obj $map:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $map.insert($key.to_string(), $crate::toon!($value));
        $($crate::toon!(@obj $map $($rest)*);)?
    };

    (null) => {
        $crate::Value::Null
    };

    ([ $($tt:tt)* ]) => {{
        let mut elements: ::std::vec::Vec<$crate::Value> = ::std::vec::Vec::new();
        $crate::toon!(@seq elements $($tt)*);
        $crate::Value::Array(elements)
    }};

    ({ $($tt:tt)* }) => {{
        let mut entries = $crate::Map::new();
        $crate::toon!(@obj entries $($tt)*);
        $crate::Value::Object(entries)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Value};

    #[test]
    fn scalars() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(42), Value::from(42));
        assert_eq!(toon!(-42), Value::from(-42));
        assert_eq!(toon!(3.5), Value::from(3.5));
        assert_eq!(toon!("hello"), Value::from("hello"));
    }

    #[test]
    fn sequences() {
        assert_eq!(toon!([]), Value::Array(vec![]));
        assert_eq!(
            toon!([1, -2, 3.5]),
            Value::Array(vec![Value::from(1), Value::from(-2), Value::from(3.5)])
        );
        assert_eq!(
            toon!(["x", null, true,]),
            Value::Array(vec![Value::from("x"), Value::Null, Value::Bool(true)])
        );
    }

    #[test]
    fn objects() {
        assert_eq!(toon!({}), Value::Object(Map::new()));

        let value = toon!({
            "name": "Ada",
            "delta": -4,
            "nested": {"ok": true},
        });
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("name"), Some(&Value::from("Ada")));
        assert_eq!(map.get("delta"), Some(&Value::from(-4)));
        let nested = map.get("nested").unwrap().as_object().unwrap();
        assert_eq!(nested.get("ok"), Some(&Value::Bool(true)));
    }

    #[test]
    fn expressions() {
        let n = 40 + 2;
        assert_eq!(toon!(n), Value::from(42));
        assert_eq!(toon!((2 * 21)), Value::from(42));

        let inner = toon!([1, 2]);
        assert_eq!(
            toon!({"wrapped": (inner.clone())}),
            toon!({"wrapped": [1, 2]})
        );
    }
}
