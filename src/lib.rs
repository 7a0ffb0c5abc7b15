//! # toon-codec
//!
//! A bidirectional codec between TOON (Token-Oriented Object
//! Notation) text and JSON-style values.
//!
//! ## What is TOON?
//!
//! TOON is a compact, line-oriented data format for JSON-shaped
//! values. It drops the braces, brackets, and redundant quotes of
//! JSON and leans on indentation and array headers instead, which
//! typically cuts token counts by 30-60% for structured data while
//! staying human-readable. See the [`format`] module for the full
//! notation.
//!
//! ## Key features
//!
//! - **Round-trip guarantee**: decoding an encoded value yields the
//!   normalized form of the original
//! - **Tabular arrays**: uniform object arrays compress into a
//!   header plus rows
//! - **Key folding**: single-key chains optionally collapse into
//!   dotted paths and expand back on decode
//! - **Strict mode**: declared counts, field widths, indentation,
//!   and blank-line rules become hard errors on demand
//! - **Serde compatible**: works with `#[derive(Serialize,
//!   Deserialize)]` types on both sides
//!
//! ## Quick start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Ada".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Ada\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Working with dynamic values
//!
//! The [`encode`]/[`decode`] pair operates on [`Value`] trees
//! directly; the [`toon!`] macro builds them in place:
//!
//! ```rust
//! use toon_codec::{encode, toon, EncodeOptions};
//!
//! let value = toon!({
//!     "tags": ["admin", "ops", "dev"]
//! });
//! assert_eq!(
//!     encode(&value, &EncodeOptions::default()),
//!     "tags[3]: admin, ops, dev"
//! );
//! ```
//!
//! ## Options
//!
//! ```rust
//! use toon_codec::{decode, encode, toon, DecodeOptions, Delimiter, EncodeOptions};
//!
//! let value = toon!({"xs": [1, 2, 3]});
//! let opts = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! let text = encode(&value, &opts);
//! assert_eq!(text, "xs[3|]: 1|2|3");
//!
//! let strict = DecodeOptions::new().with_strict(true);
//! assert_eq!(decode(&text, &strict).unwrap(), value);
//! ```

mod de;
mod decode;
mod encode;
pub mod error;
mod fold;
pub mod format;
mod header;
mod lexical;
mod macros;
mod map;
mod normalize;
pub mod options;
mod scan;
mod ser;
mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::{Error, Result};
pub use map::Map;
pub use normalize::normalize;
pub use options::{
    DecodeOptions, Delimiter, EncodeOptions, FlattenDepth, KeyFolding, PathExpansion,
};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serializes any `T: Serialize` to a TOON string with default
/// options.
///
/// # Errors
///
/// Returns an error when `T` cannot be represented as a value tree
/// (non-string map keys, data-carrying enum variants).
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a TOON string with the given
/// options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, Delimiter, EncodeOptions};
///
/// let opts = EncodeOptions::new().with_delimiter(Delimiter::Tab);
/// let text = to_string_with_options(&vec![1, 2, 3], &opts).unwrap();
/// assert_eq!(text, "[3\t]: 1\t2\t3");
/// ```
///
/// # Errors
///
/// Returns an error when `T` cannot be represented as a value tree.
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    Ok(encode(&tree, options))
}

/// Converts any `T: Serialize` into a [`Value`] tree.
///
/// This is the codec's single coercion point: `None` and unit types
/// become null and every numeric type becomes a double here, before
/// encoding ever looks at the data.
///
/// # Errors
///
/// Returns an error when `T` cannot be represented as a value tree.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializes `value` as TOON into a writer.
///
/// # Errors
///
/// Returns an error when serialization fails or the writer does.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serializes `value` as TOON into a writer with the given options.
///
/// # Errors
///
/// Returns an error when serialization fails or the writer does.
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: &EncodeOptions,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::Message(e.to_string()))?;
    Ok(())
}

/// Deserializes a `T` from TOON text with default options.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error when the input is not valid TOON or does not fit
/// `T`.
pub fn from_str<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(input, &DecodeOptions::default())
}

/// Deserializes a `T` from TOON text with the given options.
///
/// # Errors
///
/// Returns an error when the input is not valid TOON or does not fit
/// `T`.
pub fn from_str_with_options<T>(input: &str, options: &DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = decode(input, options)?;
    from_value(value)
}

/// Deserializes a `T` from an already-decoded [`Value`].
///
/// # Errors
///
/// Returns an error when the value does not fit `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}

/// Deserializes a `T` from a reader of TOON text.
///
/// # Errors
///
/// Returns an error when reading fails, the input is not valid TOON,
/// or it does not fit `T`.
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_reader_with_options(reader, &DecodeOptions::default())
}

/// Deserializes a `T` from a reader of TOON text with the given
/// options.
///
/// # Errors
///
/// Returns an error when reading fails, the input is not valid TOON,
/// or it does not fit `T`.
pub fn from_reader_with_options<R, T>(mut reader: R, options: &DecodeOptions) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|e| Error::Message(e.to_string()))?;
    from_str_with_options(&buf, options)
}

/// Deserializes a `T` from TOON bytes.
///
/// # Errors
///
/// Returns an error when the bytes are not UTF-8, not valid TOON, or
/// do not fit `T`.
pub fn from_slice<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(bytes).map_err(|e| Error::Message(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn string_round_trip() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "x: 1\ny: 2");
        let back: Point = from_str(&text).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn writer_and_reader() {
        let point = Point { x: 1, y: 2 };
        let mut buf = Vec::new();
        to_writer(&mut buf, &point).unwrap();
        let back: Point = from_reader(buf.as_slice()).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn slice_entry_point() {
        let point: Point = from_slice(b"x: 1\ny: 2").unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn value_round_trip() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();
        assert!(value.is_object());
        let back: Point = from_value(value).unwrap();
        assert_eq!(point, back);
    }
}
