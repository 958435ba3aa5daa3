/// An append-only text accumulator.
///
/// Its content is the concatenation of every fragment pushed so far, in order.
/// There is no way to remove text once appended. Pass one builder by `&mut` to
/// several [`Encoder::encode_into`](crate::Encoder::encode_into) calls to build
/// a single document without re-joining on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Builder {
    content: String,
}

impl Builder {
    /// Create an empty builder. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: String::new(),
        }
    }

    /// Create an empty builder with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            content: String::with_capacity(capacity),
        }
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: &str) {
        self.content.push_str(fragment);
    }

    /// Append a single character.
    pub fn push_char(&mut self, c: char) {
        self.content.push(c);
    }

    /// Everything appended so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Length of the content in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Consume the builder and return its content.
    #[must_use]
    pub fn into_string(self) -> String {
        self.content
    }
}
