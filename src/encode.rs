//! The TOON encoder.
//!
//! Encoding walks a normalized value and chooses a form per node:
//!
//! - primitives render as single tokens;
//! - objects render one `key: value` line per entry, recursing into
//!   nested objects and delegating arrays to the array rules;
//! - arrays are classified in order: **tabular** (uniform objects
//!   with primitive fields, emitted as a header plus rows),
//!   **primitive-only** (inline when the line fits the budget,
//!   otherwise one element per line), and **mixed** (header plus one
//!   element block per line).
//!
//! Output lines are joined with `\n` and never end with a trailing
//! newline. Tabular field order is sorted; everything else follows
//! insertion order.

use crate::fold::fold;
use crate::header::write_header;
use crate::lexical;
use crate::normalize::normalize;
use crate::options::{EncodeOptions, KeyFolding};
use crate::value::Value;
use crate::Map;

/// Encodes a value as a TOON document.
///
/// The value is normalized first, so encoding cannot fail: non-finite
/// numbers become `null` before any text is produced.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon, EncodeOptions};
///
/// let value = toon!({"id": 123, "name": "Ada", "active": true});
/// let text = encode(&value, &EncodeOptions::default());
/// assert_eq!(text, "id: 123\nname: Ada\nactive: true");
/// ```
#[must_use]
pub fn encode(value: &Value, options: &EncodeOptions) -> String {
    let normalized = normalize(value);
    let prepared = match options.key_folding {
        KeyFolding::Off => normalized,
        KeyFolding::Safe => fold(normalized, options.flatten_depth),
    };

    let mut encoder = Encoder {
        out: String::new(),
        options: options.clone(),
    };
    encoder.emit_root(&prepared);
    encoder.out
}

struct Encoder {
    out: String,
    options: EncodeOptions,
}

impl Encoder {
    fn line_start(&mut self, depth: usize) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..depth * self.options.indent {
            self.out.push(' ');
        }
    }

    fn scalar_token(&self, value: &Value) -> String {
        let mut token = String::new();
        match value {
            Value::Null => token.push_str("null"),
            Value::Bool(b) => token.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => token.push_str(&lexical::format_number(n.as_f64())),
            Value::String(s) => {
                lexical::write_string_token(&mut token, s, self.options.delimiter)
            }
            Value::Array(_) | Value::Object(_) => {
                unreachable!("containers never render as tokens")
            }
        }
        token
    }

    fn emit_root(&mut self, value: &Value) {
        match value {
            Value::Object(map) => self.emit_object(map, 0),
            Value::Array(arr) => self.emit_array(None, arr, 0),
            primitive => {
                let token = self.scalar_token(primitive);
                self.out.push_str(&token);
            }
        }
    }

    fn emit_object(&mut self, map: &Map, depth: usize) {
        for (key, value) in map {
            match value {
                // Empty objects have no written form.
                Value::Object(m) if m.is_empty() => {}
                Value::Object(m) => {
                    self.line_start(depth);
                    lexical::write_key(&mut self.out, key);
                    self.out.push(':');
                    self.emit_object(m, depth + 1);
                }
                Value::Array(arr) => self.emit_array(Some(key), arr, depth),
                primitive => {
                    self.line_start(depth);
                    lexical::write_key(&mut self.out, key);
                    self.out.push_str(": ");
                    let token = self.scalar_token(primitive);
                    self.out.push_str(&token);
                }
            }
        }
    }

    fn emit_array(&mut self, key: Option<&str>, arr: &[Value], depth: usize) {
        let delimiter = self.options.delimiter;

        if arr.is_empty() {
            self.line_start(depth);
            write_header(&mut self.out, key, 0, delimiter, None);
            self.out.push(' ');
            return;
        }

        if let Some(fields) = tabular_fields(arr) {
            self.line_start(depth);
            write_header(&mut self.out, key, arr.len(), delimiter, Some(&fields));
            for element in arr {
                self.line_start(depth + 1);
                let obj = element.as_object().expect("tabular elements are objects");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(delimiter.joiner());
                    }
                    let token = self.scalar_token(obj.get(field).unwrap_or(&Value::Null));
                    self.out.push_str(&token);
                }
            }
            return;
        }

        if arr.iter().all(Value::is_primitive) {
            let mut payload = String::new();
            for (i, element) in arr.iter().enumerate() {
                if i > 0 {
                    payload.push_str(delimiter.joiner());
                }
                payload.push_str(&self.scalar_token(element));
            }
            let mut header = String::new();
            write_header(&mut header, key, arr.len(), delimiter, None);

            let columns = depth * self.options.indent
                + header.chars().count()
                + 1
                + payload.chars().count();
            if columns < self.options.inline_budget && !payload.contains('\n') {
                self.line_start(depth);
                self.out.push_str(&header);
                self.out.push(' ');
                self.out.push_str(&payload);
            } else {
                self.line_start(depth);
                self.out.push_str(&header);
                for element in arr {
                    self.line_start(depth + 1);
                    let token = self.scalar_token(element);
                    self.out.push_str(&token);
                }
            }
            return;
        }

        // Mixed content: one element per line block.
        self.line_start(depth);
        write_header(&mut self.out, key, arr.len(), delimiter, None);
        for element in arr {
            match element {
                Value::Object(m) => self.emit_object(m, depth + 1),
                Value::Array(a) => self.emit_array(None, a, depth + 1),
                primitive => {
                    self.line_start(depth + 1);
                    let token = self.scalar_token(primitive);
                    self.out.push_str(&token);
                }
            }
        }
    }
}

/// Uniform-object test: every element is a non-empty object over the
/// same key set, all values primitive. Returns the sorted field list
/// driving both the header and the row order.
fn tabular_fields(arr: &[Value]) -> Option<Vec<String>> {
    let first = arr.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let mut fields: Vec<String> = first.keys().cloned().collect();
    fields.sort();

    for element in arr {
        let obj = element.as_object()?;
        if obj.len() != fields.len() {
            return None;
        }
        let mut keys: Vec<&String> = obj.keys().collect();
        keys.sort();
        if !keys.iter().zip(fields.iter()).all(|(a, b)| **a == *b) {
            return None;
        }
        if !obj.values().all(Value::is_primitive) {
            return None;
        }
    }
    Some(fields)
}
