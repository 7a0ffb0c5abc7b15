//! The TOON notation, as read and written by this crate.
//!
//! TOON (Token-Oriented Object Notation) is a line-oriented,
//! indentation-structured text form for JSON-shaped data. It drops
//! the braces, brackets, and redundant quotes of JSON while keeping
//! the same value model, which makes it markedly cheaper to feed to
//! token-based consumers.
//!
//! # Objects
//!
//! One `key: value` pair per line; nesting by indentation (two
//! spaces per level by default):
//!
//! ```text
//! name: Ada
//! active: true
//! meta:
//!   created: yesterday
//! ```
//!
//! Keys matching `[A-Za-z_][A-Za-z0-9_.]*` are written bare; any
//! other key is quoted: `"user-id": 7`. A key with nothing after its
//! colon and nothing indented beneath it reads back as `null`.
//! Empty objects have no written form and are omitted.
//!
//! # Primitives
//!
//! | Type    | Syntax                         |
//! |---------|--------------------------------|
//! | Null    | `null`                         |
//! | Boolean | `true` / `false`               |
//! | Number  | `-?\d+(\.\d+)?([eE][+-]?\d+)?` |
//! | String  | bare, or `"quoted"`            |
//!
//! Numbers are written canonically: positional notation only (never
//! an exponent), no trailing fraction zeros, and `-0` comes out as
//! `0`. On the way in, any lexeme matching the pattern above parses
//! as a double.
//!
//! Strings stay bare unless quoting is needed to keep them
//! unambiguous. A string is quoted when it:
//!
//! - is empty, or starts/ends with ASCII whitespace;
//! - spells `true`, `false`, or `null`, or looks like a number
//!   (including a bare leading-zero digit run such as `007`);
//! - contains `:`, `"`, `\`, `[`, `]`, `{`, `}`, a newline, a
//!   carriage return, or a tab;
//! - is `-`, or starts with `-` not followed by a digit;
//! - contains the active delimiter.
//!
//! Inside quotes the escape set is exactly `\\`, `\"`, `\n`, `\r`,
//! `\t`; anything else after a backslash is rejected.
//!
//! # Arrays
//!
//! Every array starts with a header carrying its length, an optional
//! delimiter symbol, and an optional field list:
//!
//! ```text
//! key[N]:         comma-delimited
//! key[N|]:        pipe-delimited
//! key[3]{a, b}:   tabular with fields a and b
//! ```
//!
//! (The tab delimiter writes a literal tab after the count.) Headers
//! lose their key at the document root and inside another array.
//!
//! **Inline**: primitive elements joined on the header line, used
//! while the line stays under the inline budget (80 columns by
//! default):
//!
//! ```text
//! tags[3]: admin, ops, dev
//! ```
//!
//! An empty array is the inline form with an empty payload:
//! `tags[0]: `.
//!
//! **Expanded**: one element per line, one level deeper, used when
//! the inline form would run long or elements are not all primitive:
//!
//! ```text
//! items[2]:
//!   first
//!   second
//! ```
//!
//! Object elements are written as bare `key: value` blocks; reading
//! them back, consecutive pairs accumulate into one object until a
//! key repeats, which starts the next element.
//!
//! **Tabular**: arrays of uniform objects (same keys, primitive
//! values) compress into a header with a sorted field list plus one
//! row per element:
//!
//! ```text
//! [2]{price, qty, sku}:
//!   9.99, 2, A1
//!   14.5, 1, B2
//! ```
//!
//! # Key folding
//!
//! With folding enabled, chains of single-key objects collapse into
//! dotted keys, and the matching decode option re-expands them:
//!
//! ```text
//! a.b.c.value: 42
//! ```
//!
//! Only chains whose every segment matches `[A-Za-z_][A-Za-z0-9_]*`
//! fold, so the dotted form is unambiguous.
//!
//! # Strict mode
//!
//! Lax decoding (the default) ignores declared counts, tolerates
//! blank lines anywhere, and accepts any deeper indent for a nested
//! block. Strict decoding turns all of that into errors: declared
//! element counts and tabular widths must match, indentation must be
//! spaces in exact multiples of the indent width, and blank lines
//! may not interrupt an array body.
//!
//! # Document shape
//!
//! Output lines are joined with `\n` and there is no trailing
//! newline. `\r\n` input is accepted. An empty document decodes to
//! `null`; a single line without a colon is a primitive document; a
//! leading `[N]` header makes the document an array; anything else
//! is an object.
