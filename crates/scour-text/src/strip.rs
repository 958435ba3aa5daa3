//! Tag stripping.
//!
//! A forward scan over the characters with a two-state automaton. For each
//! character, in this order:
//!
//! 1. `<` switches to [`TagState::InsideTag`].
//! 2. The character is kept if the state is [`TagState::Outside`], dropped
//!    otherwise.
//! 3. `>` switches back to [`TagState::Outside`].
//!
//! So both delimiters of a tag are dropped, tags do not nest (`<<a>>` leaves
//! `>`), and an unterminated `<` swallows the rest of the input.

use std::borrow::Cow;

use strum_macros::Display;

/// Where the scan is relative to markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum TagState {
    /// Between tags; characters are kept.
    #[default]
    Outside,
    /// After a `<` with no `>` yet; characters are dropped.
    InsideTag,
}

impl TagState {
    /// Run one character through the automaton.
    ///
    /// Returns the state after the character and whether it is kept.
    #[must_use]
    pub const fn advance(self, c: char) -> (Self, bool) {
        let state = if c == '<' { Self::InsideTag } else { self };
        let keep = matches!(state, Self::Outside);
        let state = if c == '>' { Self::Outside } else { state };
        (state, keep)
    }
}

/// Result of [`TagStripper::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripReport<'a> {
    /// The kept characters. Borrowed when nothing was dropped.
    pub text: Cow<'a, str>,
    /// Number of characters dropped.
    pub dropped: usize,
    /// The input ended inside a tag.
    pub unterminated: bool,
}

impl StripReport<'_> {
    /// Whether the scan dropped anything.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.dropped > 0
    }
}

/// Removes `<...>` spans from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagStripper;

impl TagStripper {
    /// Create a stripper.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Strip tags from `text`, returning it borrowed when nothing was dropped.
    #[must_use]
    pub fn strip(self, text: &str) -> Cow<'_, str> {
        self.scan(text).text
    }

    /// Strip tags and report what happened.
    #[must_use]
    pub fn scan(self, text: &str) -> StripReport<'_> {
        // Every `<` is dropped, so without one the input comes back as is.
        let Some(first_open) = text.find('<') else {
            return StripReport {
                text: Cow::Borrowed(text),
                dropped: 0,
                unterminated: false,
            };
        };

        // Everything before the first `<` is kept in place; kept characters
        // after it are compacted toward the front of the copy.
        let mut chars: Vec<char> = text.chars().collect();
        let mut write = text[..first_open].chars().count();
        let mut state = TagState::Outside;
        for c in text[first_open..].chars() {
            let (next, keep) = state.advance(c);
            if keep {
                chars[write] = c;
                write += 1;
            }
            state = next;
        }

        let dropped = chars.len() - write;
        chars.truncate(write);
        StripReport {
            text: Cow::Owned(chars.into_iter().collect()),
            dropped,
            unterminated: state == TagState::InsideTag,
        }
    }
}

/// Strip tags from `text`. `None` passes through untouched.
#[must_use]
pub fn strip_tags(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(|text| TagStripper::new().strip(text))
}
