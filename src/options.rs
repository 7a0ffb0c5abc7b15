//! Configuration options for encoding and decoding.
//!
//! Encoding and decoding are configured independently:
//!
//! - [`EncodeOptions`]: indentation width, delimiter, key folding,
//!   inline budget
//! - [`DecodeOptions`]: indentation width, strict mode, path expansion
//!
//! Options are plain values, bound once per call; nothing is shared
//! between invocations.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode, toon, Delimiter, EncodeOptions};
//!
//! let value = toon!({"tags": ["a", "b"]});
//! let opts = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! assert_eq!(encode(&value, &opts), "tags[2|]: a|b");
//! ```

/// Delimiter used between array elements, tabular fields, and row
/// cells. Bound once per document at encode time; carried per array
/// in headers at decode time.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The delimiter character itself.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The delimiter as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// The symbol written inside an array header after the count:
    /// nothing for comma, the literal character for tab and pipe.
    #[must_use]
    pub const fn header_symbol(self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Separator placed between emitted tokens. Comma gets a trailing
    /// space so inline arrays stay readable; tab and pipe are used
    /// bare.
    #[must_use]
    pub const fn joiner(self) -> &'static str {
        match self {
            Delimiter::Comma => ", ",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Whether the encoder collapses single-key object chains into
/// dotted paths (`a: {b: {c: 1}}` → `a.b.c: 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyFolding {
    #[default]
    Off,
    /// Fold only chains whose every segment is a plain identifier, so
    /// the dotted key re-expands unambiguously.
    Safe,
}

/// Whether the decoder expands dotted keys back into nested objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PathExpansion {
    #[default]
    Off,
    /// Expand only keys whose every dot-separated segment is a plain
    /// identifier.
    Safe,
}

/// Cap on how many segments a folded key may join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlattenDepth {
    #[default]
    Unbounded,
    /// Maximum number of dot-joined segments. A fold needs at least
    /// two segments, so `Limit(0)` and `Limit(1)` disable folding.
    Limit(usize),
}

impl FlattenDepth {
    pub(crate) fn allows(self, segments: usize) -> bool {
        match self {
            FlattenDepth::Unbounded => true,
            FlattenDepth::Limit(n) => segments <= n,
        }
    }
}

/// Options controlling [`encode`](crate::encode).
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, EncodeOptions, KeyFolding};
///
/// let opts = EncodeOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_key_folding(KeyFolding::Safe);
/// assert_eq!(opts.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Document delimiter for arrays and tabular rows.
    pub delimiter: Delimiter,
    /// Single-key chain folding.
    pub key_folding: KeyFolding,
    /// Segment cap for folded keys.
    pub flatten_depth: FlattenDepth,
    /// Column limit under which a primitive array is rendered on one
    /// line. Hand-tuned; 80 by default.
    pub inline_budget: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            key_folding: KeyFolding::default(),
            flatten_depth: FlattenDepth::default(),
            inline_budget: 80,
        }
    }
}

impl EncodeOptions {
    /// Default options: 2-space indent, comma delimiter, no folding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the document delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables key folding.
    #[must_use]
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }

    /// Caps folded keys at `flatten_depth` segments.
    #[must_use]
    pub fn with_flatten_depth(mut self, flatten_depth: FlattenDepth) -> Self {
        self.flatten_depth = flatten_depth;
        self
    }

    /// Sets the inline-array column budget.
    #[must_use]
    pub fn with_inline_budget(mut self, inline_budget: usize) -> Self {
        self.inline_budget = inline_budget;
        self
    }
}

/// Options controlling [`decode`](crate::decode).
///
/// # Examples
///
/// ```rust
/// use toon_codec::{DecodeOptions, PathExpansion};
///
/// let opts = DecodeOptions::new()
///     .with_strict(true)
///     .with_path_expansion(PathExpansion::Safe);
/// assert!(opts.strict);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Enforce declared counts, field widths, indentation, and
    /// blank-line rules; lax mode tolerates all of them.
    pub strict: bool,
    /// Dotted-key expansion applied after decoding.
    pub expand_paths: PathExpansion,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            indent: 2,
            strict: false,
            expand_paths: PathExpansion::default(),
        }
    }
}

impl DecodeOptions {
    /// Default options: 2-space indent, lax, no expansion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enables or disables dotted-key expansion.
    #[must_use]
    pub fn with_path_expansion(mut self, expand_paths: PathExpansion) -> Self {
        self.expand_paths = expand_paths;
        self
    }
}
