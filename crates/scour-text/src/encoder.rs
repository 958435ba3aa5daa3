//! Entity encoding for text embedded in markup.
//!
//! One left-to-right pass. Each character is either copied as-is or replaced
//! by its entity:
//!
//! | char | emitted |
//! |------|---------|
//! | `<`  | `&lt;`  |
//! | `>`  | `&gt;`  |
//! | `&`  | `&amp;` |
//! | `"`  | `&quot;` |
//! | `\n` | break fragment (only with newline breaks on), then `\n` |
//!
//! Nothing else is touched: no single-quote escaping, no numeric escapes for
//! non-ASCII. Encoding is not idempotent; `&amp;` becomes `&amp;amp;`.

use std::borrow::Cow;
use std::fmt::Display;

use crate::builder::Builder;

/// Markup line break emitted before each newline when newline breaks are on.
pub const BREAK_FRAGMENT: &str = "<br class='helma-format' />";

/// Escapes markup-significant characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    encode_newline: bool,
    break_fragment: Cow<'static, str>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// An encoder that leaves newlines alone.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            encode_newline: false,
            break_fragment: Cow::Borrowed(BREAK_FRAGMENT),
        }
    }

    /// Turn emission of the break fragment before each newline on or off.
    #[must_use]
    pub const fn with_newline_breaks(mut self, encode_newline: bool) -> Self {
        self.encode_newline = encode_newline;
        self
    }

    /// Replace the fragment emitted before newlines.
    #[must_use]
    pub fn with_break_fragment(mut self, fragment: impl Into<Cow<'static, str>>) -> Self {
        self.break_fragment = fragment.into();
        self
    }

    /// Whether newlines get a break fragment.
    #[must_use]
    pub const fn newline_breaks(&self) -> bool {
        self.encode_newline
    }

    /// The fragment emitted before newlines.
    #[must_use]
    pub fn break_fragment(&self) -> &str {
        &self.break_fragment
    }

    /// Encode `text` on its own.
    ///
    /// Returns the input unchanged (borrowed) when no character needed
    /// replacing, so plain text never allocates.
    #[must_use]
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut builder = Builder::new();
        let tail = self.write_runs(text, &mut builder);
        if tail == 0 {
            return Cow::Borrowed(text);
        }
        builder.push(&text[tail..]);
        Cow::Owned(builder.into_string())
    }

    /// Append the encoded form of `text` to `builder`.
    ///
    /// The return value is the builder's full content after appending, not
    /// just the fragment this call produced. Callers that want one result per
    /// input should pass a fresh builder each time.
    pub fn encode_into<'b>(&self, text: &str, builder: &'b mut Builder) -> &'b str {
        let tail = self.write_runs(text, builder);
        builder.push(&text[tail..]);
        builder.as_str()
    }

    /// Encode the `Display` form of `value`.
    #[must_use]
    pub fn encode_display<T: Display + ?Sized>(&self, value: &T) -> String {
        self.encode(&value.to_string()).into_owned()
    }

    /// Writes every replaced character, plus the unchanged run before it, to
    /// `builder`. Returns the byte offset where the final unchanged run
    /// starts; zero means nothing was replaced and nothing was written.
    fn write_runs(&self, text: &str, builder: &mut Builder) -> usize {
        let mut run_start = 0;
        for (i, c) in text.char_indices() {
            let entity = match c {
                '<' => "&lt;",
                '>' => "&gt;",
                '&' => "&amp;",
                '"' => "&quot;",
                '\n' if self.encode_newline => self.break_fragment.as_ref(),
                _ => continue,
            };
            builder.push(&text[run_start..i]);
            builder.push(entity);
            if c == '\n' {
                builder.push_char('\n');
            }
            run_start = i + c.len_utf8();
        }
        run_start
    }
}

/// Encode `text`, optionally appending into a shared `builder`.
///
/// - `None` in, `None` out, without allocating.
/// - Empty text comes back as itself, even when a builder is supplied.
/// - With a builder, the result borrows the builder's whole content after
///   this call; nothing is copied out of it.
/// - `encode_newline` emits [`BREAK_FRAGMENT`] before every `\n`.
#[must_use]
pub fn encode<'a>(
    text: Option<&'a str>,
    builder: Option<&'a mut Builder>,
    encode_newline: bool,
) -> Option<Cow<'a, str>> {
    let text = text?;
    if text.is_empty() {
        return Some(Cow::Borrowed(text));
    }
    let encoder = Encoder::new().with_newline_breaks(encode_newline);
    Some(match builder {
        Some(builder) => Cow::Borrowed(encoder.encode_into(text, builder)),
        None => encoder.encode(text),
    })
}

/// Like [`encode`], for any value with a text representation.
///
/// With a builder the result borrows the builder's content; without one it
/// owns the encoded text.
#[must_use]
pub fn encode_display<'b, T: Display + ?Sized>(
    value: Option<&T>,
    builder: Option<&'b mut Builder>,
    encode_newline: bool,
) -> Option<Cow<'b, str>> {
    let text = value?.to_string();
    if text.is_empty() {
        return Some(Cow::Borrowed(""));
    }
    let encoder = Encoder::new().with_newline_breaks(encode_newline);
    Some(match builder {
        Some(builder) => Cow::Borrowed(encoder.encode_into(&text, builder)),
        None => {
            let encoded = match encoder.encode(&text) {
                Cow::Borrowed(_) => None,
                Cow::Owned(encoded) => Some(encoded),
            };
            Cow::Owned(encoded.unwrap_or(text))
        }
    })
}
