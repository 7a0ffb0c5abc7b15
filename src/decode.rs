//! The TOON decoder.
//!
//! Decoding prepares the input as a vector of (indent, payload)
//! lines, classifies the root, then parses recursively. The parser
//! state is just the prepared lines and a cursor; options flow by
//! value and nothing is shared between calls.
//!
//! Strict mode enforces what lax mode tolerates: declared counts,
//! tabular field widths, indentation discipline, and blank lines
//! inside array bodies.

use crate::error::{Error, Result};
use crate::fold::expand;
use crate::header::{self, ArrayHeader};
use crate::lexical::{self, ascii_trim};
use crate::options::{DecodeOptions, PathExpansion};
use crate::scan::{find_unquoted_colon, split_tokens};
use crate::value::Value;
use crate::Map;

/// Decodes a TOON document into a [`Value`].
///
/// Empty (or all-blank) input decodes to [`Value::Null`].
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, DecodeOptions, Value};
///
/// let value = decode("id: 7\nname: Ada", &DecodeOptions::default()).unwrap();
/// let obj = value.as_object().unwrap();
/// assert_eq!(obj.get("id"), Some(&Value::from(7)));
/// ```
pub fn decode(input: &str, options: &DecodeOptions) -> Result<Value> {
    let lines = prepare_lines(input, options)?;
    let mut parser = Parser {
        lines,
        pos: 0,
        options,
    };
    let value = parser.parse_root()?;
    parser.expect_consumed()?;
    match options.expand_paths {
        PathExpansion::Off => Ok(value),
        PathExpansion::Safe => expand(value, options.strict),
    }
}

struct Line {
    indent: usize,
    content: String,
    number: usize,
}

impl Line {
    fn is_blank(&self) -> bool {
        self.content.is_empty()
    }
}

fn prepare_lines(input: &str, options: &DecodeOptions) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    for (idx, raw) in input.split('\n').enumerate() {
        let number = idx + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let content = ascii_trim(raw).to_string();
        let indent = raw.chars().take_while(|&c| c == ' ').count();

        if options.strict && !content.is_empty() {
            let leading_ws: String = raw.chars().take_while(|c| c.is_ascii_whitespace()).collect();
            if leading_ws.contains('\t') {
                return Err(Error::indentation(number, "tab in leading whitespace"));
            }
            if options.indent > 0 && indent % options.indent != 0 {
                return Err(Error::indentation(
                    number,
                    format!("indent of {indent} is not a multiple of {}", options.indent),
                ));
            }
        }

        lines.push(Line {
            indent,
            content,
            number,
        });
    }
    Ok(lines)
}

struct Parser<'a> {
    lines: Vec<Line>,
    pos: usize,
    options: &'a DecodeOptions,
}

impl Parser<'_> {
    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_blanks(&mut self) {
        while self.lines.get(self.pos).is_some_and(Line::is_blank) {
            self.pos += 1;
        }
    }

    /// (indent, line number, content) of the current line, if any.
    fn current(&self) -> Option<(usize, usize, String)> {
        self.lines
            .get(self.pos)
            .map(|l| (l.indent, l.number, l.content.clone()))
    }

    /// Same, for the next non-blank line, without moving the cursor.
    fn peek_nonblank(&self) -> Option<(usize, usize, String)> {
        self.lines[self.pos..]
            .iter()
            .find(|l| !l.is_blank())
            .map(|l| (l.indent, l.number, l.content.clone()))
    }

    fn expect_consumed(&mut self) -> Result<()> {
        self.skip_blanks();
        match self.current() {
            Some((_, number, _)) => Err(Error::syntax(number, "unexpected trailing content")),
            None => Ok(()),
        }
    }

    fn parse_root(&mut self) -> Result<Value> {
        self.skip_blanks();
        let Some((indent, number, content)) = self.current() else {
            return Ok(Value::Null);
        };

        if header::is_bare_header_start(&content) {
            let parsed = header::parse_header(&content, number)?
                .ok_or_else(|| Error::invalid_header(number, "malformed array header"))?;
            self.advance();
            return self.parse_array(parsed, indent, number);
        }

        let nonblank = self.lines.iter().filter(|l| !l.is_blank()).count();
        if nonblank == 1 && find_unquoted_colon(&content).is_none() {
            self.advance();
            return lexical::parse_scalar(&content, number);
        }

        self.parse_object(indent).map(Value::Object)
    }

    /// Parses `key: value` lines at exactly `expected_indent` until
    /// the indent drops below it.
    fn parse_object(&mut self, expected_indent: usize) -> Result<Map> {
        let mut map = Map::new();
        loop {
            self.skip_blanks();
            let Some((indent, number, content)) = self.current() else {
                break;
            };
            if indent < expected_indent {
                break;
            }
            if indent > expected_indent {
                return Err(Error::syntax(number, "unexpected indentation"));
            }
            self.advance();
            let (key, value) = self.parse_entry(&content, number, expected_indent)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Parses one object line: a keyed array header, `key: token`, or
    /// `key:` introducing a block. The cursor is already past the
    /// line itself.
    fn parse_entry(
        &mut self,
        content: &str,
        number: usize,
        indent: usize,
    ) -> Result<(String, Value)> {
        if let Some(parsed) = header::parse_header(content, number)? {
            return match parsed.key.clone() {
                Some(key) => {
                    let value = self.parse_array(parsed, indent, number)?;
                    Ok((key, value))
                }
                None => Err(Error::syntax(
                    number,
                    "array header without a key in object body",
                )),
            };
        }

        let Some(colon) = find_unquoted_colon(content) else {
            return Err(Error::syntax(number, "expected a key-value pair"));
        };
        let key = lexical::parse_key(ascii_trim(&content[..colon]), number)?;
        let value_part = ascii_trim(&content[colon + 1..]);
        let value = if value_part.is_empty() {
            self.parse_block_value(indent)?
        } else {
            lexical::parse_scalar(value_part, number)?
        };
        Ok((key, value))
    }

    /// Value of a `key:` line with nothing after the colon: a deeper
    /// bare array header, a nested object, or null when nothing
    /// deeper follows.
    fn parse_block_value(&mut self, parent_indent: usize) -> Result<Value> {
        let Some((indent, number, content)) = self.peek_nonblank() else {
            return Ok(Value::Null);
        };
        if indent <= parent_indent {
            return Ok(Value::Null);
        }
        if let Some(parsed) = header::parse_header(&content, number)? {
            if parsed.key.is_none() {
                self.skip_blanks();
                self.advance();
                return self.parse_array(parsed, indent, number);
            }
        }
        self.skip_blanks();
        self.parse_object(indent).map(Value::Object)
    }

    fn parse_array(
        &mut self,
        header: ArrayHeader,
        header_indent: usize,
        header_line: usize,
    ) -> Result<Value> {
        if let Some(payload) = &header.payload {
            if header.fields.is_some() {
                return Err(Error::syntax(
                    header_line,
                    "tabular array cannot carry an inline payload",
                ));
            }
            let tokens = split_tokens(payload, header.delimiter);
            let mut elements = Vec::with_capacity(tokens.len());
            for token in &tokens {
                elements.push(lexical::parse_scalar(token, header_line)?);
            }
            if self.options.strict && elements.len() != header.len {
                return Err(Error::count_mismatch(header_line, header.len, elements.len()));
            }
            return Ok(Value::Array(elements));
        }

        if header.fields.is_some() {
            self.parse_tabular_rows(&header, header_indent, header_line)
        } else {
            self.parse_expanded_elements(&header, header_indent, header_line)
        }
    }

    fn parse_tabular_rows(
        &mut self,
        header: &ArrayHeader,
        header_indent: usize,
        header_line: usize,
    ) -> Result<Value> {
        let fields = header.fields.as_ref().expect("tabular header has fields");
        let mut rows = Vec::new();
        let mut pending_blank: Option<usize> = None;
        let mut row_indent: Option<usize> = None;

        while rows.len() < header.len {
            let Some((indent, number, content)) = self.current() else {
                break;
            };
            if content.is_empty() {
                pending_blank.get_or_insert(number);
                self.advance();
                continue;
            }
            if indent <= header_indent {
                break;
            }
            let expected = *row_indent.get_or_insert(indent);
            if indent != expected {
                return Err(Error::syntax(number, "unexpected indentation in tabular rows"));
            }
            if let Some(blank_line) = pending_blank.take() {
                if self.options.strict {
                    return Err(Error::blank_inside_array(blank_line));
                }
            }
            self.advance();

            let tokens = split_tokens(&content, header.delimiter);
            if self.options.strict && tokens.len() != fields.len() {
                return Err(Error::count_mismatch(number, fields.len(), tokens.len()));
            }
            let mut obj = Map::with_capacity(fields.len());
            for (i, field) in fields.iter().enumerate() {
                let value = match tokens.get(i) {
                    Some(token) => lexical::parse_scalar(token, number)?,
                    None => Value::Null,
                };
                obj.insert(field.clone(), value);
            }
            rows.push(Value::Object(obj));
        }

        if self.options.strict && rows.len() != header.len {
            return Err(Error::count_mismatch(header_line, header.len, rows.len()));
        }
        Ok(Value::Array(rows))
    }

    /// Expanded non-tabular body. Successive `key: value` lines
    /// accumulate into one object element; seeing a key again closes
    /// the element and opens the next. Primitives and bare nested
    /// arrays stand alone and close any open element.
    fn parse_expanded_elements(
        &mut self,
        header: &ArrayHeader,
        header_indent: usize,
        header_line: usize,
    ) -> Result<Value> {
        let mut elements: Vec<Value> = Vec::new();
        let mut acc: Option<Map> = None;
        let mut pending_blank: Option<usize> = None;
        let mut elem_indent: Option<usize> = None;

        loop {
            let Some((indent, number, content)) = self.current() else {
                break;
            };
            if content.is_empty() {
                pending_blank.get_or_insert(number);
                self.advance();
                continue;
            }
            if indent <= header_indent {
                break;
            }
            let expected = *elem_indent.get_or_insert(indent);
            if indent != expected {
                return Err(Error::syntax(number, "unexpected indentation in array body"));
            }
            if let Some(blank_line) = pending_blank.take() {
                if self.options.strict {
                    return Err(Error::blank_inside_array(blank_line));
                }
            }

            if let Some(parsed) = header::parse_header(&content, number)? {
                if let Some(key) = parsed.key.clone() {
                    if acc.as_ref().is_some_and(|m| m.contains_key(&key)) {
                        elements.push(Value::Object(acc.take().expect("checked")));
                    }
                    self.advance();
                    let value = self.parse_array(parsed, expected, number)?;
                    acc.get_or_insert_with(Map::new).insert(key, value);
                    continue;
                }
                if let Some(open) = acc.take() {
                    elements.push(Value::Object(open));
                }
                self.advance();
                elements.push(self.parse_array(parsed, expected, number)?);
                continue;
            }

            if let Some(colon) = find_unquoted_colon(&content) {
                let key = lexical::parse_key(ascii_trim(&content[..colon]), number)?;
                let value_part = ascii_trim(&content[colon + 1..]).to_string();
                if acc.as_ref().is_some_and(|m| m.contains_key(&key)) {
                    elements.push(Value::Object(acc.take().expect("checked")));
                }
                self.advance();
                let value = if value_part.is_empty() {
                    self.parse_block_value(expected)?
                } else {
                    lexical::parse_scalar(&value_part, number)?
                };
                acc.get_or_insert_with(Map::new).insert(key, value);
                continue;
            }

            if let Some(open) = acc.take() {
                elements.push(Value::Object(open));
            }
            self.advance();
            elements.push(lexical::parse_scalar(&content, number)?);
        }

        if let Some(open) = acc.take() {
            elements.push(Value::Object(open));
        }
        if self.options.strict && elements.len() != header.len {
            return Err(Error::count_mismatch(header_line, header.len, elements.len()));
        }
        Ok(Value::Array(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn lax(input: &str) -> Value {
        decode(input, &DecodeOptions::default()).unwrap()
    }

    fn strict(input: &str) -> Result<Value> {
        decode(input, &DecodeOptions::default().with_strict(true))
    }

    #[test]
    fn root_classification() {
        assert_eq!(lax(""), Value::Null);
        assert_eq!(lax("  \n\n"), Value::Null);
        assert_eq!(lax("42"), Value::from(42));
        assert_eq!(lax("hello"), Value::from("hello"));
        assert_eq!(lax("\"a: b\""), Value::from("a: b"));
        assert_eq!(lax("[2]: 1, 2"), toon!([1, 2]));
        assert_eq!(lax("a: 1"), toon!({"a": 1}));
    }

    #[test]
    fn nested_blocks() {
        let value = lax("user:\n  name: Ada\n  meta:\n    ok: true");
        assert_eq!(
            value,
            toon!({"user": {"name": "Ada", "meta": {"ok": true}}})
        );
    }

    #[test]
    fn key_with_no_deeper_lines_is_null() {
        assert_eq!(lax("a:\nb: 1"), toon!({"a": null, "b": 1}));
    }

    #[test]
    fn bare_header_block_value() {
        let value = lax("xs:\n  [2]: 1, 2");
        assert_eq!(value, toon!({"xs": [1, 2]}));
    }

    #[test]
    fn object_element_accumulation() {
        let value = lax("items[2]:\n  id: 1\n  name: a\n  id: 2\n  name: b");
        assert_eq!(
            value,
            toon!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}])
        );
    }

    #[test]
    fn accumulation_keeps_block_valued_keys() {
        let value = lax("items[1]:\n  a: 1\n  b:\n    c: 2");
        assert_eq!(value, toon!([{"a": 1, "b": {"c": 2}}]));
    }

    #[test]
    fn duplicate_block_key_splits_elements() {
        let value = lax("items[2]:\n  b:\n    c: 1\n  b:\n    c: 2");
        assert_eq!(value, toon!([{"b": {"c": 1}}, {"b": {"c": 2}}]));
    }

    #[test]
    fn mixed_body_flushes_around_primitives() {
        let value = lax("[3]:\n  1\n  name: Ada\n  age: 36\n  text");
        // The two fields form one element; the trailing primitive
        // closes it.
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0], Value::from(1));
        assert_eq!(arr[1], toon!({"name": "Ada", "age": 36}));
        assert_eq!(arr[2], Value::from("text"));
    }

    #[test]
    fn nested_bare_arrays() {
        let value = lax("[2]:\n  [2]: 1, 2\n  [1]: 3");
        assert_eq!(value, toon!([[1, 2], [3]]));
    }

    #[test]
    fn strict_rejects_trailing_garbage() {
        assert!(strict("[1]:\n  1\nextra: 2").is_err());
    }

    #[test]
    fn strict_count_checks() {
        assert!(matches!(
            strict("[3]: 1, 2"),
            Err(Error::CountMismatch {
                line: 1,
                expected: 3,
                actual: 2
            })
        ));
        assert!(strict("[2]:\n  1\n  2").is_ok());
        assert!(matches!(
            strict("items[2]:\n  1"),
            Err(Error::CountMismatch { .. })
        ));
    }

    #[test]
    fn strict_indentation_checks() {
        assert!(matches!(
            strict("a:\n\tb: 1"),
            Err(Error::Indentation { line: 2, .. })
        ));
        assert!(matches!(
            strict("a:\n   b: 1"),
            Err(Error::Indentation { line: 2, .. })
        ));
        assert!(lax("a:\n   b: 1").is_object());
    }

    #[test]
    fn strict_blank_inside_array() {
        assert!(matches!(
            strict("[2]:\n  1\n\n  2"),
            Err(Error::BlankInsideArray { line: 3 })
        ));
        // Trailing blanks after the body are not inside it.
        assert!(strict("[2]:\n  1\n  2\n\n").is_ok());
        // Lax mode tolerates the gap.
        assert_eq!(lax("[2]:\n  1\n\n  2"), toon!([1, 2]));
    }

    #[test]
    fn crlf_input() {
        assert_eq!(lax("a: 1\r\nb: 2\r\n"), toon!({"a": 1, "b": 2}));
    }

    #[test]
    fn tabular_rows_follow_declared_field_order() {
        let value = lax("[2]{b, a}:\n  1, 2\n  3, 4");
        let arr = value.as_array().unwrap();
        let first = arr[0].as_object().unwrap();
        let keys: Vec<_> = first.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(first.get("b"), Some(&Value::from(1)));
    }

    #[test]
    fn strict_tabular_width_check() {
        assert!(matches!(
            strict("[1]{a, b}:\n  1"),
            Err(Error::CountMismatch {
                line: 2,
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn lax_ignores_declared_count() {
        assert_eq!(lax("[5]: 1, 2"), toon!([1, 2]));
        assert_eq!(lax("[0]:\n  7"), toon!([7]));
    }
}
