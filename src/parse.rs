//! Parser which determines the named capture groups of a regex pattern.

use crate::cursor::Cursor;
use crate::diagnostics::{Diagnostics, MessageKind};
use crate::outcome::ParseOutcome;
use crate::scope::ScopeStack;

/// The largest valid code point.
const CODE_POINT_MAX: u32 = 0x10FFFF;

/// Zero-width assertions which contain no Disjunction.
const ANCHORS: &[&str] = &["^", "$", "\\b", "\\B"];

/// Lookaround openers, and whether each is negated.
const LOOKAROUNDS: &[(&str, bool)] = &[("(?=", false), ("(?!", true), ("(?<=", false), ("(?<!", true)];

/// ES6 21.2.1 SyntaxCharacter.
fn is_syntax_char(c: char) -> bool {
    matches!(
        c,
        '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|'
    )
}

fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn is_quantifier_char(c: char) -> bool {
    matches!(c, '*' | '+' | '?' | '{')
}

/// Characters of a UnicodePropertyValueExpression like `Script=Greek`.
fn is_property_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '='
}

/// ES9 IdentifierStartChar. Alphabetic stands in for ID_Start.
fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

/// ES9 IdentifierPartChar. Alphanumeric stands in for ID_Continue.
fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_alphanumeric() || c == '\u{200C}' || c == '\u{200D}'
}

fn is_lead_surrogate(cp: u32) -> bool {
    (0xD800..=0xDBFF).contains(&cp)
}

fn is_trail_surrogate(cp: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&cp)
}

/// \return the value of the four hex digits at the start of \p s, if present.
fn hex4_value(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if digits.chars().all(is_hex_digit) {
        u32::from_str_radix(digits, 16).ok()
    } else {
        None
    }
}

/// A Quantifier.
#[derive(Debug, Copy, Clone)]
struct Quantifier {
    /// Minimum number of iterations, inclusive.
    min: usize,

    /// Maximum number of iterations, inclusive.
    max: usize,
}

/// The result of trying to consume one character of a group name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum IdentifierChar {
    /// An identifier character, literal or escaped.
    Valid,

    /// An escape which is malformed or does not denote an identifier character.
    Invalid,

    /// The group name ends here.
    Absent,
}

/// Represents the state used to analyze a regex.
struct Parser<'a> {
    /// The current position.
    cursor: Cursor<'a>,

    /// Problems found so far.
    diagnostics: Diagnostics,

    /// Named groups per open group.
    scopes: ScopeStack,

    /// Set when a group's `)` has been parsed but its scope is still open,
    /// so that a following quantifier applies before the scope is merged.
    group_exit_pending: bool,
}

impl<'a> Parser<'a> {
    fn report(&mut self, kind: MessageKind) {
        self.diagnostics.report(&self.cursor, kind)
    }

    fn peek(&self) -> Option<char> {
        self.cursor.peek()
    }

    fn skip_one(&mut self) {
        self.cursor = self.cursor.skip_one()
    }

    /// If our contents begin with the string \p s, consume it and return
    /// true. Otherwise return false.
    fn try_consume(&mut self, s: &str) -> bool {
        if self.cursor.starts_with(s) {
            self.cursor = self.cursor.skip_exact(s);
            true
        } else {
            false
        }
    }

    /// Consume \p s, or report \p kind if it is not next.
    /// \return whether \p s was consumed.
    fn expect(&mut self, s: &str, kind: MessageKind) -> bool {
        let found = self.try_consume(s);
        if !found {
            self.report(kind)
        }
        found
    }

    fn try_parse(mut self) -> ParseOutcome {
        self.consume_disjunction();
        // Anything left over is an excess closing paren. Report it and keep
        // going to find any later problems.
        while !self.cursor.is_at_end() {
            self.report(MessageKind::EndOfPatternExpected);
            self.skip_one();
            self.consume_disjunction();
        }
        debug_assert!(self.scopes.depth() == 0, "Unbalanced scopes");
        debug_assert!(!self.group_exit_pending, "Group left open");
        ParseOutcome::synthesize(self.scopes.finish(), self.diagnostics)
    }

    /// ES6 21.2.2.3 Disjunction.
    fn consume_disjunction(&mut self) {
        self.consume_alternative();
        while self.try_consume("|") {
            self.scopes.mark_alternative();
            self.consume_alternative();
        }
    }

    /// ES6 21.2.2.4 Alternative.
    fn consume_alternative(&mut self) {
        loop {
            if self.consume_term() {
                continue;
            }
            if self.cursor.starts_with_char(|c| c == ']' || c == '}') {
                // A stray closing bracket or brace. Skip it so an enclosing
                // group can still find its `)`.
                self.report(MessageKind::EndOfPatternExpected);
                self.skip_one();
                continue;
            }
            if !self.cursor.starts_with_char(is_quantifier_char) {
                // End of input, `|`, or `)`.
                break;
            }
            // A quantifier with nothing before it. Skip it and carry on.
            self.report(MessageKind::NothingToRepeat);
            self.try_consume_quantifier();
        }
    }

    /// ES6 21.2.2.5 Term.
    /// \return false if no term starts here.
    fn consume_term(&mut self) -> bool {
        if self.try_consume_assertion() {
            return true;
        }
        if !self.is_atom_start() {
            return false;
        }
        self.consume_atom();
        let quant = self.try_consume_quantifier();
        if self.group_exit_pending {
            self.group_exit_pending = false;
            if let Some(Quantifier { min: 0, .. }) = quant {
                // Zero iterations capture nothing.
                self.scopes.demote_current();
            }
            self.scopes.exit();
        }
        true
    }

    /// ES6 21.2.2.6 Assertion.
    /// \return whether an assertion was consumed.
    fn try_consume_assertion(&mut self) -> bool {
        for anchor in ANCHORS {
            if self.try_consume(anchor) {
                return true;
            }
        }
        for &(start, negate) in LOOKAROUNDS {
            if self.try_consume(start) {
                self.consume_lookaround(negate);
                return true;
            }
        }
        false
    }

    fn consume_lookaround(&mut self, negate: bool) {
        self.scopes.enter();
        self.consume_disjunction();
        self.scopes.close_alternatives();
        if negate {
            // A negative lookaround only succeeds when its contents fail to
            // match, so its captures are always discarded.
            self.scopes.demote_current();
        }
        self.expect(")", MessageKind::UnterminatedGroup);
        self.scopes.exit();
    }

    fn is_atom_start(&self) -> bool {
        match self.peek() {
            Some(c) => matches!(c, '\\' | '.' | '[' | '(') || !is_syntax_char(c),
            None => false,
        }
    }

    /// ES6 21.2.2.8 Atom.
    fn consume_atom(&mut self) {
        let c = self.peek().expect("Should have a character");
        match c {
            '\\' => {
                self.skip_one();
                self.consume_atom_escape();
            }
            '[' => self.consume_bracket(),
            '(' => self.consume_group(),
            // `.` or a PatternCharacter.
            _ => self.skip_one(),
        }
    }

    /// A capturing or non-capturing group.
    /// On return the group's scope is still open; see group_exit_pending.
    fn consume_group(&mut self) {
        debug_assert!(!self.group_exit_pending, "Nested pending group exit");
        self.cursor = self.cursor.skip_exact("(");
        self.scopes.enter();
        if self.try_consume("?:") {
            // Non-capturing group.
        } else if self.try_consume("?") {
            if let Some(name) = self.consume_group_name() {
                self.scopes.name_current(name);
            }
        }
        self.consume_disjunction();
        self.scopes.close_alternatives();
        self.expect(")", MessageKind::UnterminatedGroup);
        self.group_exit_pending = true;
    }

    /// ES9 GroupName: `<` RegExpIdentifierName `>`.
    /// \return the decoded name, or None if it was malformed.
    fn consume_group_name(&mut self) -> Option<String> {
        if !self.expect("<", MessageKind::GroupNameOpenRequired) {
            return None;
        }
        let mut name = String::new();
        let mut valid = match self.consume_identifier_char(&mut name, is_identifier_start) {
            IdentifierChar::Valid => true,
            IdentifierChar::Invalid => false,
            IdentifierChar::Absent => {
                self.report(MessageKind::GroupNameRequired);
                return None;
            }
        };
        loop {
            match self.consume_identifier_char(&mut name, is_identifier_part) {
                IdentifierChar::Valid => {}
                IdentifierChar::Invalid => valid = false,
                IdentifierChar::Absent => break,
            }
        }
        let closed = self.expect(">", MessageKind::GroupNameCloseRequired);
        if valid && closed {
            Some(name)
        } else {
            None
        }
    }

    /// Try consuming a RegExpIdentifierStart or RegExpIdentifierPart, as
    /// selected by \p accept, appending it to \p name.
    fn consume_identifier_char(
        &mut self,
        name: &mut String,
        accept: fn(char) -> bool,
    ) -> IdentifierChar {
        if self.cursor.starts_with("\\u") {
            let start = self.cursor;
            self.skip_one();
            return match self.consume_unicode_escape().map(char::from_u32) {
                Some(Some(c)) if accept(c) => {
                    name.push(c);
                    IdentifierChar::Valid
                }
                Some(_) => {
                    self.diagnostics
                        .report(&start, MessageKind::InvalidGroupNameCharacter);
                    IdentifierChar::Invalid
                }
                // Already reported.
                None => IdentifierChar::Invalid,
            };
        }
        match self.peek() {
            Some(c) if accept(c) => {
                self.skip_one();
                name.push(c);
                IdentifierChar::Valid
            }
            _ => IdentifierChar::Absent,
        }
    }

    /// ES6 21.2.2.9 AtomEscape, with the `\` already consumed.
    fn consume_atom_escape(&mut self) {
        let c = match self.peek() {
            Some(c) => c,
            None => {
                self.report(MessageKind::AtomEscapeRequired);
                return;
            }
        };
        match c {
            '1'..='9' => {
                // A backreference.
                self.cursor = self.cursor.skip_while(is_decimal_digit);
            }
            'k' => {
                // A named backreference. It does not introduce a group.
                self.skip_one();
                self.consume_group_name();
            }
            _ => self.consume_character_escape(c),
        }
    }

    /// ES6 21.2.2.12 CharacterClassEscape or 21.2.2.10 CharacterEscape,
    /// beginning with \p c. The `\` is already consumed.
    fn consume_character_escape(&mut self, c: char) {
        match c {
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => self.skip_one(),

            'p' | 'P' => {
                self.skip_one();
                self.consume_unicode_property();
            }

            // ControlEscape.
            'f' | 'n' | 'r' | 't' | 'v' => self.skip_one(),

            'c' => {
                self.skip_one();
                if self.cursor.starts_with_char(|c| c.is_ascii_alphabetic()) {
                    self.skip_one();
                } else {
                    self.report(MessageKind::InvalidControlLetter);
                }
            }

            '0' => self.skip_one(),

            'x' => {
                // HexEscapeSequence :: x HexDigit HexDigit
                let rem = self.cursor.remaining();
                let bytes = rem.as_bytes();
                if bytes.len() >= 3 && bytes[1..3].iter().all(u8::is_ascii_hexdigit) {
                    self.cursor = self.cursor.skip_exact(&rem[..3]);
                } else {
                    self.report(MessageKind::InvalidHexEscape);
                }
            }

            'u' => {
                self.consume_unicode_escape();
            }

            // IdentityEscape.
            _ => self.skip_one(),
        }
    }

    /// ES9 `{` UnicodePropertyValueExpression `}`, after `\p` or `\P`.
    /// The property is not checked against any table.
    fn consume_unicode_property(&mut self) {
        if !self.expect("{", MessageKind::UnicodePropertyBraceRequired) {
            return;
        }
        self.cursor = self.cursor.skip_while(is_property_char);
        self.expect("}", MessageKind::UnterminatedUnicodeProperty);
    }

    /// ES9 RegExpUnicodeEscapeSequence, with the `\` already consumed.
    /// A surrogate pair written as two escapes is combined.
    /// \return the code point, or None if the escape was malformed.
    fn consume_unicode_escape(&mut self) -> Option<u32> {
        self.cursor = self.cursor.skip_exact("u");
        if self.try_consume("{") {
            if !self.cursor.starts_with_char(is_hex_digit) {
                self.report(MessageKind::CodePointDigitsRequired);
                self.try_consume("}");
                return None;
            }
            let start = self.cursor;
            self.cursor = self.cursor.skip_while(is_hex_digit);
            let cp = self
                .cursor
                .text_since(&start)
                .chars()
                .filter_map(|c| c.to_digit(16))
                .fold(0u32, |acc, d| acc.saturating_mul(16).saturating_add(d));
            let in_range = cp <= CODE_POINT_MAX;
            if !in_range {
                self.diagnostics
                    .report(&start, MessageKind::CodePointOutOfRange);
            }
            let closed = self.expect("}", MessageKind::UnterminatedCodePoint);
            return if in_range && closed { Some(cp) } else { None };
        }

        let lead = match hex4_value(self.cursor.remaining()) {
            Some(cp) => cp,
            None => {
                self.report(MessageKind::InvalidUnicodeEscape);
                return None;
            }
        };
        self.cursor = self.cursor.skip_exact(&self.cursor.remaining()[..4]);
        if is_lead_surrogate(lead) && self.cursor.starts_with("\\u") {
            if let Some(trail) = hex4_value(&self.cursor.remaining()[2..]) {
                if is_trail_surrogate(trail) {
                    self.cursor = self.cursor.skip_exact(&self.cursor.remaining()[..6]);
                    return Some(0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00));
                }
            }
        }
        Some(lead)
    }

    /// ES6 21.2.2.13 CharacterClass.
    /// Only escapes need attention; everything else up to `]` is skipped.
    fn consume_bracket(&mut self) {
        self.cursor = self.cursor.skip_exact("[");
        self.try_consume("^");
        loop {
            self.cursor = self.cursor.skip_to_either(b']', b'\\');
            match self.peek() {
                None => {
                    self.report(MessageKind::UnterminatedCharacterClass);
                    return;
                }
                Some(']') => {
                    self.skip_one();
                    return;
                }
                _ => {
                    self.cursor = self.cursor.skip_exact("\\");
                    self.consume_class_escape();
                }
            }
        }
    }

    /// ES6 21.2.2.16 ClassEscape, with the `\` already consumed.
    fn consume_class_escape(&mut self) {
        match self.peek() {
            None => self.report(MessageKind::ClassEscapeRequired),
            // Backspace, or an escaped dash.
            Some('b') | Some('-') => self.skip_one(),
            Some(c) => self.consume_character_escape(c),
        }
    }

    /// ES6 21.2.2.7 Quantifier, including a trailing non-greedy `?`.
    /// \return None if there is no quantifier, or it was malformed.
    fn try_consume_quantifier(&mut self) -> Option<Quantifier> {
        let quant = self.try_consume_quantifier_prefix()?;
        self.try_consume("?");
        Some(quant)
    }

    fn try_consume_quantifier_prefix(&mut self) -> Option<Quantifier> {
        match self.peek()? {
            '+' => {
                self.skip_one();
                Some(Quantifier {
                    min: 1,
                    max: usize::MAX,
                })
            }
            '*' => {
                self.skip_one();
                Some(Quantifier {
                    min: 0,
                    max: usize::MAX,
                })
            }
            '?' => {
                self.skip_one();
                Some(Quantifier { min: 0, max: 1 })
            }
            '{' => {
                let start = self.cursor;
                self.skip_one();
                let min = match self.try_consume_decimal_integer_literal() {
                    Some(min) => min,
                    None => {
                        // Skip the rest of something like {,3}.
                        self.report(MessageKind::QuantifierDigitsRequired);
                        self.cursor = self.cursor.skip_while(|c| c == ',' || is_decimal_digit(c));
                        self.try_consume("}");
                        return None;
                    }
                };
                let mut quant = Quantifier { min, max: min };
                if self.try_consume(",") {
                    // Like {3,4} or {3,}.
                    quant.max = self
                        .try_consume_decimal_integer_literal()
                        .unwrap_or(usize::MAX);
                }
                if !self.expect("}", MessageKind::UnterminatedQuantifier) {
                    return None;
                }
                if quant.min > quant.max {
                    self.diagnostics
                        .report(&start, MessageKind::QuantifierRangeOutOfOrder);
                }
                Some(quant)
            }
            _ => None,
        }
    }

    /// ES6 11.8.3 DecimalIntegerLiteral.
    /// If the value would overflow, usize::MAX is returned.
    /// All decimal digits are consumed regardless.
    fn try_consume_decimal_integer_literal(&mut self) -> Option<usize> {
        let start = self.cursor;
        self.cursor = self.cursor.skip_while(is_decimal_digit);
        let digits = self.cursor.text_since(&start);
        if digits.is_empty() {
            return None;
        }
        Some(digits.chars().filter_map(|c| c.to_digit(10)).fold(0usize, |acc, d| {
            acc.saturating_mul(10).saturating_add(d as usize)
        }))
    }
}

/// Analyze a given pattern.
/// Return its named groups, or every syntax problem found.
pub fn try_parse(pattern: &str) -> ParseOutcome {
    let p = Parser {
        cursor: Cursor::new(pattern),
        diagnostics: Diagnostics::new(),
        scopes: ScopeStack::new(),
        group_exit_pending: false,
    };
    p.try_parse()
}
