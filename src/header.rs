//! Array header grammar: `key[N<delim>]{fields}:`.
//!
//! A header line declares an array: optional key, element count,
//! delimiter symbol (nothing for comma, a literal tab or pipe
//! otherwise), an optional field list when the array is tabular, and
//! an optional inline payload after the colon.
//!
//! Parsing is deliberately non-committal: a line that merely
//! resembles a header falls back to ordinary key/value handling, so
//! quoted keys containing brackets never trip it.

use crate::error::{Error, Result};
use crate::lexical::{self, ascii_trim};
use crate::options::Delimiter;
use crate::scan::{find_unquoted, find_unquoted_colon, split_tokens};

/// A parsed array header line.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayHeader {
    /// Key the array is bound to; `None` for a bare header (document
    /// root or an element of an enclosing array).
    pub key: Option<String>,
    /// Declared element count.
    pub len: usize,
    /// Delimiter carried by the header symbol.
    pub delimiter: Delimiter,
    /// Field names; present iff the array is tabular.
    pub fields: Option<Vec<String>>,
    /// Inline payload after the colon, when non-blank.
    pub payload: Option<String>,
}

/// Recognizes the bare-header prefix `[N<delim>?]` used for root
/// classification.
#[must_use]
pub fn is_bare_header_start(content: &str) -> bool {
    let b = content.as_bytes();
    if b.first() != Some(&b'[') {
        return false;
    }
    let mut i = 1;
    let digits_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return false;
    }
    if i < b.len() && (b[i] == b'\t' || b[i] == b'|') {
        i += 1;
    }
    i < b.len() && b[i] == b']'
}

/// Byte offset just past the closing quote of a span that starts at
/// byte 0, honoring escapes. `None` when the span never closes.
fn quoted_span_end(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Tries to parse `content` (an already-trimmed line) as an array
/// header. Returns `Ok(None)` when the line is not header-shaped;
/// errors are reserved for lines committed to being headers whose
/// count or field list is malformed.
pub fn parse_header(content: &str, line: usize) -> Result<Option<ArrayHeader>> {
    let (key, bracket_at) = if content.starts_with('"') {
        let Some(end) = quoted_span_end(content) else {
            return Ok(None);
        };
        if content[end..].starts_with('[') {
            let key = lexical::parse_key(&content[..end], line)?;
            (Some(key), end)
        } else {
            return Ok(None);
        }
    } else {
        let Some(lb) = content.find('[') else {
            return Ok(None);
        };
        // A colon before the bracket means the bracket is value text.
        if let Some(colon) = find_unquoted_colon(content) {
            if colon < lb {
                return Ok(None);
            }
        }
        let raw_key = ascii_trim(&content[..lb]);
        let key = if raw_key.is_empty() {
            None
        } else {
            Some(raw_key.to_string())
        };
        (key, lb)
    };

    let rest = &content[bracket_at..];
    debug_assert!(rest.starts_with('['));
    let b = rest.as_bytes();
    let mut i = 1;
    let digits_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return Ok(None);
    }
    let len: usize = rest[digits_start..i]
        .parse()
        .map_err(|_| Error::invalid_header(line, "unparseable element count"))?;

    let delimiter = if i < b.len() && b[i] == b'\t' {
        i += 1;
        Delimiter::Tab
    } else if i < b.len() && b[i] == b'|' {
        i += 1;
        Delimiter::Pipe
    } else {
        Delimiter::Comma
    };

    if i >= b.len() || b[i] != b']' {
        return Ok(None);
    }
    i += 1;

    let fields = if i < b.len() && b[i] == b'{' {
        let after_brace = &rest[i + 1..];
        let Some(close) = find_unquoted(after_brace, '}') else {
            return Ok(None);
        };
        let list = split_tokens(&after_brace[..close], delimiter)
            .into_iter()
            .map(|token| lexical::parse_key(&token, line))
            .collect::<Result<Vec<_>>>()?;
        i += 1 + close + 1;
        Some(list)
    } else {
        None
    };

    if i >= b.len() || b[i] != b':' {
        return Ok(None);
    }
    let payload = ascii_trim(&rest[i + 1..]);
    let payload = if payload.is_empty() {
        None
    } else {
        Some(payload.to_string())
    };

    Ok(Some(ArrayHeader {
        key,
        len,
        delimiter,
        fields,
        payload,
    }))
}

/// Emits a header up to and including the colon.
pub fn write_header(
    out: &mut String,
    key: Option<&str>,
    len: usize,
    delimiter: Delimiter,
    fields: Option<&[String]>,
) {
    if let Some(k) = key {
        lexical::write_key(out, k);
    }
    out.push('[');
    out.push_str(&len.to_string());
    out.push_str(delimiter.header_symbol());
    out.push(']');
    if let Some(list) = fields {
        out.push('{');
        for (i, field) in list.iter().enumerate() {
            if i > 0 {
                out.push_str(delimiter.joiner());
            }
            lexical::write_key(out, field);
        }
        out.push('}');
    }
    out.push(':');
}
