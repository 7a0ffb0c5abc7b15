//! [`Value`] → serde conversion.
//!
//! Decoded documents come back as dynamic [`Value`] trees; this
//! module lets them flow into typed Rust data by implementing
//! [`serde::Deserializer`] for `Value`. Whole, in-range doubles
//! surface as integers so ordinary numeric struct fields deserialize
//! without ceremony.
//!
//! ## Usage
//!
//! Most callers go through [`from_str`](crate::from_str) or
//! [`from_value`](crate::from_value):
//!
//! ```rust
//! use serde::Deserialize;
//! use toon_codec::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_str("x: 1\ny: 2").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

use crate::error::{Error, Result};
use crate::value::Value;
use crate::Map;
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => visitor.visit_i64(i),
                None => visitor.visit_f64(n.as_f64()),
            },
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqAccess {
                iter: arr.into_iter(),
            }),
            Value::Object(map) => visitor.visit_map(MapAccess {
                iter: map.into_iter(),
                value: None,
            }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(map) if map.len() == 1 => {
                let (variant, value) = map.into_iter().next().expect("len checked");
                visitor.visit_enum(EnumAccess { variant, value })
            }
            other => Err(Error::Message(format!(
                "cannot deserialize enum from {other:?}"
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str
        string bytes byte_buf unit unit_struct seq tuple tuple_struct
        map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

struct SeqAccess {
    iter: std::vec::IntoIter<Value>,
}

impl<'de> de::SeqAccess<'de> for SeqAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(value).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapAccess {
    iter: <Map as IntoIterator>::IntoIter,
    value: Option<Value>,
}

impl<'de> de::MapAccess<'de> for MapAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(Value::String(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::Message("value requested before key".into()))?;
        seed.deserialize(value)
    }
}

struct EnumAccess {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumAccess {
    type Error = Error;
    type Variant = VariantAccess;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let tag = seed.deserialize(Value::String(self.variant))?;
        Ok((tag, VariantAccess { value: self.value }))
    }
}

struct VariantAccess {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantAccess {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(Error::Message(format!(
                "expected unit variant, found {other:?}"
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.value)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_any(self.value, visitor)
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_any(self.value, visitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{from_value, toon};
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: f64,
    }

    #[test]
    fn typed_extraction() {
        let point: Point = from_value(toon!({"x": 1, "y": 2.5})).unwrap();
        assert_eq!(point, Point { x: 1, y: 2.5 });
    }

    #[test]
    fn whole_doubles_become_integers() {
        let n: u32 = from_value(toon!(7)).unwrap();
        assert_eq!(n, 7);
        let f: f64 = from_value(toon!(7)).unwrap();
        assert_eq!(f, 7.0);
    }

    #[test]
    fn options_map_null() {
        let missing: Option<i32> = from_value(toon!(null)).unwrap();
        assert_eq!(missing, None);
        let present: Option<i32> = from_value(toon!(3)).unwrap();
        assert_eq!(present, Some(3));
    }

    #[test]
    fn unit_enum_from_string() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Status {
            Active,
            Disabled,
        }
        let status: Status = from_value(toon!("Active")).unwrap();
        assert_eq!(status, Status::Active);
    }
}
