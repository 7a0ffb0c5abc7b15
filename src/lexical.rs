//! Lexical rules shared by the encoder and decoder.
//!
//! Everything that decides how a single token looks lives here: the
//! string quoting predicate, the escape set, canonical number
//! rendering, the key and identifier grammars, and the classification
//! of a decoded token back into a value.
//!
//! The escape set is closed: `\\`, `\"`, `\n`, `\r`, `\t`. Anything
//! else after a backslash is an error on the way in and is never
//! produced on the way out.

use crate::error::{Error, Result};
use crate::options::Delimiter;
use crate::value::{Number, Value};

/// Renders a double in canonical form: positional notation only, no
/// trailing fraction zeros, negative zero as `0`. Non-finite input
/// renders as `null`, mirroring what normalization does to it.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_string();
    }
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    // The std formatter already prints the shortest round-trip digits
    // in positional notation, so no exponent ever appears.
    value.to_string()
}

/// Full-string match of the numeric lexeme
/// `-?\d+(\.\d+)?([eE][+-]?\d+)?`.
#[must_use]
pub fn is_numeric_lexeme(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return false;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == b.len()
}

fn is_leading_zero_run(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() > 1 && b[0] == b'0' && b[1..].iter().all(u8::is_ascii_digit)
}

/// Decides whether a string value must be rendered quoted. `delimiter`
/// is the delimiter active where the token will appear.
#[must_use]
pub fn needs_quoting(s: &str, delimiter: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }
    let first = s.chars().next().unwrap();
    let last = s.chars().next_back().unwrap();
    if first.is_ascii_whitespace() || last.is_ascii_whitespace() {
        return true;
    }
    if matches!(s, "true" | "false" | "null") {
        return true;
    }
    if is_numeric_lexeme(s) || is_leading_zero_run(s) {
        return true;
    }
    if s.contains([':', '"', '\\', '[', ']', '{', '}', '\n', '\r', '\t']) {
        return true;
    }
    // a bare dash, or a dash not introducing a number
    if first == '-' && !s[1..].starts_with(|c: char| c.is_ascii_digit()) {
        return true;
    }
    s.contains(delimiter.as_char())
}

/// Key grammar: keys matching this are emitted bare.
#[must_use]
pub fn is_key_like(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Identifier segment grammar used by key folding: like the key
/// grammar but without dots.
#[must_use]
pub fn is_identifier_segment(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Appends `s` as a quoted, escaped token.
pub fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Appends a string value, quoting it when the predicate requires.
pub fn write_string_token(out: &mut String, s: &str, delimiter: Delimiter) {
    if needs_quoting(s, delimiter) {
        write_quoted(out, s);
    } else {
        out.push_str(s);
    }
}

/// Appends an object key or tabular field name, quoted unless it
/// matches the key grammar.
pub fn write_key(out: &mut String, key: &str) {
    if is_key_like(key) {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

/// Reverses the escape set over the interior of a quoted span.
/// Unknown escapes and a trailing backslash are errors.
pub fn unescape(s: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                return Err(Error::invalid_escape(
                    line,
                    format!("unknown escape sequence \\{other}"),
                ))
            }
            None => return Err(Error::invalid_escape(line, "trailing backslash")),
        }
    }
    Ok(out)
}

/// Trims ASCII whitespace only. Exotic Unicode whitespace is token
/// content and must survive a round trip.
#[must_use]
pub fn ascii_trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Strips a surrounding quote pair, verifying the token is one whole
/// quoted span, and returns the unescaped interior.
fn unquote(token: &str, line: usize) -> Result<String> {
    let inner = &token[1..];
    let mut end = None;
    let mut escaped = false;
    for (i, ch) in inner.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => {
                end = Some(i);
                break;
            }
            _ => {}
        }
    }
    match end {
        Some(i) if i + 1 == inner.len() => unescape(&inner[..i], line),
        Some(_) => Err(Error::syntax(line, "content after closing quote")),
        None => Err(Error::syntax(line, "unterminated quoted string")),
    }
}

/// Classifies one decoded token: quoted string, literal, number, or
/// raw string. The token is expected to be trimmed already.
pub fn parse_scalar(token: &str, line: usize) -> Result<Value> {
    if token.starts_with('"') {
        return unquote(token, line).map(Value::String);
    }
    match token {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }
    if is_numeric_lexeme(token) {
        let parsed = token
            .parse::<f64>()
            .map_err(|_| Error::syntax(line, format!("unparseable number {token:?}")))?;
        return Ok(Value::Number(Number::from(parsed)));
    }
    Ok(Value::String(token.to_string()))
}

/// Parses a decoded key token: a quoted key is unescaped, anything
/// else is taken literally.
pub fn parse_key(token: &str, line: usize) -> Result<String> {
    if token.starts_with('"') {
        unquote(token, line)
    } else {
        Ok(token.to_string())
    }
}
