//! Tracking of named capture groups across nested groups.

use std::collections::BTreeMap;

/// Whether a named group binds on every successful match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Requiredness {
    /// The group matches whenever the pattern matches.
    Required,

    /// The group may be absent from a successful match.
    Optional,
}

impl Requiredness {
    #[inline]
    pub fn is_required(self) -> bool {
        self == Requiredness::Required
    }
}

/// A map from group name to Requiredness.
pub type GroupMap = BTreeMap<String, Requiredness>;

/// The state for one nesting level: a group, a lookaround, or the pattern
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupScope {
    /// Names captured within this level, including nested levels already
    /// closed.
    pub groups: GroupMap,

    /// Whether a `|` appeared directly at this level.
    pub has_alternative: bool,

    /// The name of the capture which opened this level, if any.
    pub capture_name: Option<String>,
}

impl GroupScope {
    fn demote_all(&mut self) {
        for req in self.groups.values_mut() {
            *req = Requiredness::Optional;
        }
    }
}

/// A stack of GroupScopes. The depth equals the number of open groups.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    current: GroupScope,
    ancestors: Vec<GroupScope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// \return the number of open groups.
    #[inline]
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// \return the innermost scope.
    #[cfg(test)]
    pub fn current(&self) -> &GroupScope {
        &self.current
    }

    /// Open a new, empty scope.
    pub fn enter(&mut self) {
        let parent = std::mem::take(&mut self.current);
        self.ancestors.push(parent);
    }

    /// Record that the innermost scope is a capture named \p name.
    pub fn name_current(&mut self, name: String) {
        self.current.capture_name = Some(name);
    }

    /// Record a `|` directly in the innermost scope.
    pub fn mark_alternative(&mut self) {
        self.current.has_alternative = true;
    }

    /// Finish the contents of the innermost scope: if it had alternatives,
    /// the groups inside it are optional. Then the scope's own capture is
    /// added, which its inner alternatives do not affect.
    pub fn close_alternatives(&mut self) {
        if self.current.has_alternative {
            self.current.demote_all();
        }
        if let Some(name) = self.current.capture_name.take() {
            self.current.groups.insert(name, Requiredness::Required);
        }
    }

    /// Mark every group in the innermost scope as optional.
    pub fn demote_current(&mut self) {
        self.current.demote_all()
    }

    /// Close the innermost scope, merging its groups into its parent.
    /// Groups from the child replace same-named groups in the parent.
    pub fn exit(&mut self) {
        let parent = self
            .ancestors
            .pop()
            .expect("exit() called without a matching enter()");
        let child = std::mem::replace(&mut self.current, parent);
        debug_assert!(child.capture_name.is_none(), "Scope closed without close_alternatives()");
        self.current.groups.extend(child.groups);
    }

    /// Close the outermost scope and return its groups.
    pub fn finish(mut self) -> GroupMap {
        debug_assert!(self.ancestors.is_empty(), "Unclosed scopes at finish()");
        self.close_alternatives();
        self.current.groups
    }
}
