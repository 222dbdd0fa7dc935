//! The result of analyzing a pattern.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::scope::{GroupMap, Requiredness};

/// The outcome of analyzing a pattern: either the named groups it can
/// produce, or every syntax problem found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The pattern is well formed.
    Success {
        /// Each named group, and whether it always binds.
        groups: GroupMap,
    },

    /// The pattern has at least one syntax problem.
    Failure {
        /// The problems, in the order they were found.
        diagnostics: Vec<Diagnostic>,
    },
}

impl ParseOutcome {
    /// Assemble an outcome from the final parser state.
    /// Any diagnostic at all makes the outcome a Failure.
    pub(crate) fn synthesize(groups: GroupMap, diagnostics: Diagnostics) -> Self {
        if diagnostics.is_empty() {
            ParseOutcome::Success { groups }
        } else {
            ParseOutcome::Failure {
                diagnostics: diagnostics.into_vec(),
            }
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success { .. })
    }

    /// \return the groups, or None on failure.
    pub fn groups(&self) -> Option<&GroupMap> {
        match self {
            ParseOutcome::Success { groups } => Some(groups),
            ParseOutcome::Failure { .. } => None,
        }
    }

    /// \return the Requiredness of the group \p name, or None if the pattern
    /// failed or has no such group.
    pub fn group(&self, name: &str) -> Option<Requiredness> {
        self.groups()?.get(name).copied()
    }

    /// \return the diagnostics, which is empty on success.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ParseOutcome::Success { .. } => &[],
            ParseOutcome::Failure { diagnostics } => diagnostics,
        }
    }

    /// Convert to a Result.
    pub fn into_result(self) -> Result<GroupMap, Vec<Diagnostic>> {
        match self {
            ParseOutcome::Success { groups } => Ok(groups),
            ParseOutcome::Failure { diagnostics } => Err(diagnostics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::diagnostics::MessageKind;

    #[test]
    fn test_any_diagnostic_fails() {
        let mut groups = GroupMap::new();
        groups.insert("g".to_string(), Requiredness::Required);
        let mut diags = Diagnostics::new();
        diags.report(&Cursor::new("("), MessageKind::UnterminatedGroup);

        let outcome = ParseOutcome::synthesize(groups.clone(), diags);
        assert!(!outcome.is_success());
        assert_eq!(outcome.groups(), None);
        assert_eq!(outcome.group("g"), None);
        assert_eq!(outcome.diagnostics().len(), 1);

        let outcome = ParseOutcome::synthesize(groups.clone(), Diagnostics::new());
        assert!(outcome.diagnostics().is_empty());
        assert_eq!(outcome.group("g"), Some(Requiredness::Required));
        assert_eq!(outcome.into_result(), Ok(groups));
    }
}
