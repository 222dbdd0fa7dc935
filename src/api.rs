use crate::parse;

use core::{fmt, str::FromStr};
use std::collections::HashMap;
use thiserror::Error;

pub use crate::diagnostics::{Diagnostic, MessageKind};
pub use crate::outcome::ParseOutcome;
pub use crate::scope::{GroupMap, Requiredness};

/// Represents an error from this crate's API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A flag letter appeared more than once.
    #[error("Duplicate flag: {0}")]
    DuplicateFlag(char),

    /// A flag letter is not an EcmaScript flag.
    #[error("Unknown flag: {0}")]
    UnknownFlag(char),

    /// Two flags which may not be combined.
    #[error("Incompatible flags: {0} and {1}")]
    IncompatibleFlags(char, char),

    /// The pattern has syntax problems.
    #[error("Invalid pattern: {}", join_diagnostics(.diagnostics))]
    Syntax {
        /// Every problem found, in order.
        diagnostics: Vec<Diagnostic>,
    },
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The flags of a regex.
/// Flags do not affect which groups a pattern can produce; they are
/// validated and carried along for the engine which executes the pattern.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    /// Equivalent to the 'd' flag in JavaScript.
    pub has_indices: bool,

    /// Equivalent to the 'g' flag in JavaScript.
    pub global: bool,

    /// If set, make the regex case-insensitive.
    /// Equivalent to the 'i' flag in JavaScript.
    pub icase: bool,

    /// If set, ^ and $ match at line separators, not just the input boundaries.
    /// Equivalent to the 'm' flag in JavaScript.
    pub multiline: bool,

    /// If set, . matches at line separators as well as any other character.
    /// Equivalent to the 's' flag in JavaScript.
    pub dot_all: bool,

    /// If set, the regex is interpreted as a Unicode regex.
    /// Equivalent to the 'u' flag in JavaScript.
    pub unicode: bool,

    /// If set, the regex is interpreted as a UnicodeSets regex.
    /// Equivalent to the 'v' flag in JavaScript.
    pub unicode_sets: bool,

    /// Equivalent to the 'y' flag in JavaScript.
    pub sticky: bool,
}

impl Flags {
    /// \return the field for flag letter \p c, or None if it is not a flag.
    fn field_mut(&mut self, c: char) -> Option<&mut bool> {
        Some(match c {
            'd' => &mut self.has_indices,
            'g' => &mut self.global,
            'i' => &mut self.icase,
            'm' => &mut self.multiline,
            's' => &mut self.dot_all,
            'u' => &mut self.unicode,
            'v' => &mut self.unicode_sets,
            'y' => &mut self.sticky,
            _ => return None,
        })
    }
}

impl FromStr for Flags {
    type Err = Error;

    /// Parse flags from a string like "gi", using JavaScript letters.
    /// Each letter may appear at most once.
    fn from_str(s: &str) -> Result<Self, Error> {
        let mut result = Self::default();
        for c in s.chars() {
            let field = result.field_mut(c).ok_or(Error::UnknownFlag(c))?;
            if *field {
                return Err(Error::DuplicateFlag(c));
            }
            *field = true;
        }
        if result.unicode && result.unicode_sets {
            return Err(Error::IncompatibleFlags('u', 'v'));
        }
        Ok(result)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letters = [
            (self.has_indices, "d"),
            (self.global, "g"),
            (self.icase, "i"),
            (self.multiline, "m"),
            (self.dot_all, "s"),
            (self.unicode, "u"),
            (self.unicode_sets, "v"),
            (self.sticky, "y"),
        ];
        for (set, letter) in letters.iter() {
            if *set {
                f.write_str(letter)?;
            }
        }
        Ok(())
    }
}

/// Analyze a pattern, determining its named groups and whether each is
/// guaranteed to participate in a successful match.
///
/// This never executes the pattern and never fails: syntax problems are
/// reported in the returned outcome.
///
/// ```rust
/// use regroups::{analyze, Requiredness};
/// let outcome = analyze(r"(?<year>\d{4})-(?<tz>Z)?");
/// assert_eq!(outcome.group("year"), Some(Requiredness::Required));
/// assert_eq!(outcome.group("tz"), Some(Requiredness::Optional));
/// ```
pub fn analyze(pattern: &str) -> ParseOutcome {
    parse::try_parse(pattern)
}

/// A pattern which has been checked, together with its flags and named groups.
/// This is what should be handed to a regex engine for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedPattern {
    pattern: String,
    flags: Flags,
    groups: GroupMap,
}

impl AnalyzedPattern {
    /// Analyze \p pattern with default flags.
    #[inline]
    pub fn new(pattern: &str) -> Result<AnalyzedPattern, Error> {
        Self::from_parts(pattern, Flags::default())
    }

    /// Analyze \p pattern, and validate \p flags.
    ///
    /// ```rust
    /// use regroups::AnalyzedPattern;
    /// let p = AnalyzedPattern::with_flags("(?<g1>a)|b", "gu").unwrap();
    /// assert_eq!(p.optional_groups().collect::<Vec<_>>(), vec!["g1"]);
    /// assert!(AnalyzedPattern::with_flags("a", "gig").is_err());
    /// ```
    #[inline]
    pub fn with_flags(pattern: &str, flags: &str) -> Result<AnalyzedPattern, Error> {
        Self::from_parts(pattern, flags.parse()?)
    }

    /// Analyze \p pattern with already-parsed \p flags.
    pub fn from_parts(pattern: &str, flags: Flags) -> Result<AnalyzedPattern, Error> {
        let groups = analyze(pattern)
            .into_result()
            .map_err(|diagnostics| Error::Syntax { diagnostics })?;
        Ok(AnalyzedPattern {
            pattern: pattern.to_string(),
            flags,
            groups,
        })
    }

    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// \return every named group.
    #[inline]
    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    /// \return the Requiredness of group \p name, if it exists.
    pub fn group(&self, name: &str) -> Option<Requiredness> {
        self.groups.get(name).copied()
    }

    /// \return whether the pattern has any named groups.
    /// If not, a match has no groups object at all.
    pub fn has_named_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Iterate over the names of groups present on every match.
    pub fn required_groups(&self) -> impl Iterator<Item = &str> {
        self.names_where(Requiredness::Required)
    }

    /// Iterate over the names of groups which may be absent from a match.
    pub fn optional_groups(&self) -> impl Iterator<Item = &str> {
        self.names_where(Requiredness::Optional)
    }

    fn names_where(&self, req: Requiredness) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .filter(move |(_, r)| **r == req)
            .map(|(name, _)| name.as_str())
    }
}

impl fmt::Display for AnalyzedPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

/// Remembers the outcome of analyzing each pattern, so that repeated
/// patterns are analyzed once.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    outcomes: HashMap<Box<str>, ParseOutcome>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// \return the outcome for \p pattern, analyzing it if not yet seen.
    pub fn analyze(&mut self, pattern: &str) -> &ParseOutcome {
        if !self.outcomes.contains_key(pattern) {
            self.outcomes.insert(pattern.into(), analyze(pattern));
        }
        &self.outcomes[pattern]
    }

    /// \return the number of distinct patterns analyzed.
    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn clear(&mut self) {
        self.outcomes.clear()
    }
}
