//! A read position within a pattern.

/// An immutable position in a pattern's source text.
/// Everything before the position has been consumed; everything after it
/// remains. Advancing produces a new Cursor and leaves the old one intact.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Construct a Cursor at the start of \p source.
    pub fn new(source: &'a str) -> Self {
        Cursor { source, offset: 0 }
    }

    /// \return the text already consumed.
    #[inline]
    pub fn consumed(&self) -> &'a str {
        &self.source[..self.offset]
    }

    /// \return the text not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// \return the text consumed between \p start and this cursor.
    /// \p start must be an earlier cursor over the same source.
    pub fn text_since(&self, start: &Cursor<'a>) -> &'a str {
        debug_assert!(start.offset <= self.offset, "Cursor moved backwards");
        &self.source[start.offset..self.offset]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset == self.source.len()
    }

    /// \return the next code point without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// \return whether the remaining text begins with \p s.
    #[inline]
    pub fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    /// \return whether the next code point satisfies \p pred.
    /// This is false at the end of input.
    #[inline]
    pub fn starts_with_char<F: Fn(char) -> bool>(&self, pred: F) -> bool {
        self.peek().map_or(false, pred)
    }

    /// Consume \p s, which the caller has already verified is next.
    pub fn skip_exact(self, s: &str) -> Self {
        assert!(
            self.starts_with(s),
            "skip_exact: {:?} is not next at {:?}",
            s,
            self.remaining()
        );
        self.advance(s.len())
    }

    /// Consume a single code point. At the end of input this does nothing.
    pub fn skip_one(self) -> Self {
        match self.peek() {
            Some(c) => self.advance(c.len_utf8()),
            None => self,
        }
    }

    /// Consume code points while they satisfy \p pred.
    pub fn skip_while<F: Fn(char) -> bool>(self, pred: F) -> Self {
        let len = self
            .remaining()
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.remaining().len(), |(idx, _)| idx);
        self.advance(len)
    }

    /// Consume everything up to (not including) the first occurrence of
    /// either ASCII byte \p a or \p b, or to the end if neither occurs.
    pub fn skip_to_either(self, a: u8, b: u8) -> Self {
        debug_assert!(a.is_ascii() && b.is_ascii(), "Needles must be ASCII");
        let rem = self.remaining().as_bytes();
        let len = memchr::memchr2(a, b, rem).unwrap_or(rem.len());
        self.advance(len)
    }

    #[inline]
    fn advance(self, len: usize) -> Self {
        debug_assert!(self.source.is_char_boundary(self.offset + len));
        Cursor {
            source: self.source,
            offset: self.offset + len,
        }
    }
}
