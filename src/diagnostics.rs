//! Syntax diagnostics collected while analyzing a pattern.

use crate::cursor::Cursor;
use core::fmt;

/// The kind of problem a Diagnostic describes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Input remains where the pattern should have ended, e.g. `a)`.
    EndOfPatternExpected,

    /// A group or lookaround is missing its closing `)`.
    UnterminatedGroup,

    /// A `\` at the end of the pattern.
    AtomEscapeRequired,

    /// `\p` or `\P` not followed by `{`.
    UnicodePropertyBraceRequired,

    /// `\p{...` without the closing `}`.
    UnterminatedUnicodeProperty,

    /// `\c` not followed by an ASCII letter.
    InvalidControlLetter,

    /// `\x` not followed by two hex digits.
    InvalidHexEscape,

    /// `\u{` not followed by a hex digit.
    CodePointDigitsRequired,

    /// `\u{...` without the closing `}`.
    UnterminatedCodePoint,

    /// `\u{...}` beyond U+10FFFF.
    CodePointOutOfRange,

    /// `\u` not followed by four hex digits or a braced code point.
    InvalidUnicodeEscape,

    /// A group name must begin with `<`.
    GroupNameOpenRequired,

    /// A group name must end with `>`.
    GroupNameCloseRequired,

    /// `<` not followed by an identifier.
    GroupNameRequired,

    /// An escape in a group name which does not denote an identifier character.
    InvalidGroupNameCharacter,

    /// `{` not followed by decimal digits.
    QuantifierDigitsRequired,

    /// `{n` or `{n,m` without the closing `}`.
    UnterminatedQuantifier,

    /// `{n,m}` with n greater than m.
    QuantifierRangeOutOfOrder,

    /// `[...` without the closing `]`.
    UnterminatedCharacterClass,

    /// A `\` at the end of the pattern inside a character class.
    ClassEscapeRequired,

    /// A quantifier with nothing to repeat, e.g. `*a` or `a**`.
    NothingToRepeat,
}

impl MessageKind {
    /// \return the human-readable message for this kind.
    pub fn message(self) -> &'static str {
        use MessageKind::*;
        match self {
            EndOfPatternExpected => "Expected end of pattern",
            UnterminatedGroup => "Unbalanced parenthesis: a group must end with ')'",
            AtomEscapeRequired => "Incomplete escape: '\\' must be followed by a character",
            UnicodePropertyBraceRequired => "A Unicode property expression must start with '{'",
            UnterminatedUnicodeProperty => "A Unicode property expression must end with '}'",
            InvalidControlLetter => "'\\c' must be followed by a letter a-z or A-Z",
            InvalidHexEscape => "'\\x' must be followed by two hexadecimal digits",
            CodePointDigitsRequired => "A code point must have at least one hexadecimal digit",
            UnterminatedCodePoint => "A code point must be followed by '}'",
            CodePointOutOfRange => "A code point must not exceed 10FFFF",
            InvalidUnicodeEscape => {
                "'\\u' must be followed by four hexadecimal digits or a code point in braces"
            }
            GroupNameOpenRequired => "A group name must be preceded by '<'",
            GroupNameCloseRequired => "A group name must be followed by '>'",
            GroupNameRequired => "A group name is required",
            InvalidGroupNameCharacter => "Escape does not denote a valid group name character",
            QuantifierDigitsRequired => "A quantifier must contain a number",
            UnterminatedQuantifier => "A quantifier must end with '}'",
            QuantifierRangeOutOfOrder => "Invalid quantifier: numbers out of order",
            UnterminatedCharacterClass => "Unbalanced bracket: a character class must end with ']'",
            ClassEscapeRequired => "Incomplete escape in character class",
            NothingToRepeat => "Nothing to repeat: a quantifier must follow an atom",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One syntax problem, recorded at the position where it was found.
/// `consumed` followed by `remaining` is always the full pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// The pattern text before the problem.
    pub consumed: String,

    /// The pattern text from the problem onwards.
    pub remaining: String,

    /// What went wrong.
    pub message: MessageKind,
}

impl Diagnostic {
    fn at(cursor: &Cursor, message: MessageKind) -> Self {
        Diagnostic {
            consumed: cursor.consumed().to_string(),
            remaining: cursor.remaining().to_string(),
            message,
        }
    }

    /// \return the 1-based column, in code points, of the problem.
    pub fn column(&self) -> usize {
        self.consumed.chars().count() + 1
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at column {}: {}\u{2038}{}",
            self.message,
            self.column(),
            self.consumed,
            self.remaining
        )
    }
}

/// An append-only, ordered log of Diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem of kind \p message at \p cursor.
    pub fn report(&mut self, cursor: &Cursor, message: MessageKind) {
        self.entries.push(Diagnostic::at(cursor, message))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_records_position() {
        let cursor = Cursor::new(".*+").skip_exact(".*");
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        diags.report(&cursor, MessageKind::NothingToRepeat);
        let all = diags.into_vec();
        assert_eq!(all.len(), 1);

        let d = &all[0];
        assert_eq!(d.consumed, ".*");
        assert_eq!(d.remaining, "+");
        assert_eq!(d.column(), 3);
        assert_eq!(
            d.to_string(),
            "Nothing to repeat: a quantifier must follow an atom at column 3: .*\u{2038}+"
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let c = Cursor::new("ab");
        let mut diags = Diagnostics::new();
        diags.report(&c, MessageKind::UnterminatedGroup);
        diags.report(&c.skip_one(), MessageKind::EndOfPatternExpected);
        let kinds: Vec<MessageKind> = diags.into_vec().into_iter().map(|d| d.message).collect();
        assert_eq!(
            kinds,
            vec![
                MessageKind::UnterminatedGroup,
                MessageKind::EndOfPatternExpected
            ]
        );
    }
}
