/*!

# regroups - static capture group analysis for EcmaScript regex syntax

This crate inspects a regular expression written in EcmaScript (aka JavaScript) syntax and determines, without running it, which named capture groups it can produce, and whether each group is guaranteed to be present on a successful match.

It is meant to be called before handing a pattern to a regex engine, so that malformed patterns are rejected up front with every problem reported, and so that callers know which groups may be missing from a match.

# Example: finding the named groups

```rust
use regroups::{analyze, Requiredness};
let outcome = analyze(r"(?<year>\d{4})-(?<month>\d{2})(?:-(?<day>\d{2}))?");
let groups = outcome.groups().unwrap();
assert_eq!(groups["year"], Requiredness::Required);
assert_eq!(groups["month"], Requiredness::Required);
assert_eq!(groups["day"], Requiredness::Optional);
```

# Example: reporting syntax problems

Analysis does not stop at the first problem. Each problem is a `Diagnostic` which records the text before and after the point of failure.

```rust
use regroups::{analyze, MessageKind};
let outcome = analyze("(a|b");
let diags = outcome.diagnostics();
assert_eq!(diags.len(), 1);
assert_eq!(diags[0].message, MessageKind::UnterminatedGroup);
assert_eq!(diags[0].consumed, "(a|b");
assert_eq!(diags[0].remaining, "");
println!("{}", diags[0]);
// Output: Unbalanced parenthesis: a group must end with ')' at column 5: (a|b‸
```

# Example: checking a pattern with flags

```rust
use regroups::AnalyzedPattern;
let p = AnalyzedPattern::with_flags(r"(?<word>\w+)|(?<num>\d+)", "gu").unwrap();
assert_eq!(p.optional_groups().collect::<Vec<_>>(), vec!["num", "word"]);
assert_eq!(p.to_string(), r"/(?<word>\w+)|(?<num>\d+)/gu");
assert!(AnalyzedPattern::with_flags("a", "uiu").is_err());
```

# Requiredness rules

A named group is `Optional` if any of the following holds; otherwise it is `Required`:

- It is inside a branch of an alternation `|`, e.g. `(?<g>a)|b`.
- It is inside a group quantified by `*`, `?`, or `{0,n}`, e.g. `(?<g>a)?`.
- It is inside a negative lookaround, e.g. `(?!(?<g>a))`. Captures in a negative lookaround are always discarded.

Positive lookarounds and quantifiers with a nonzero minimum do not affect requiredness.

# Supported Syntax

The grammar is the ES 2018 pattern syntax with the Unicode flag: alternation, groups, named groups, lookahead and lookbehind, quantifiers, character classes, `\p{...}` property escapes, `\u{...}` code points, and named backreferences.

Unicode property names and values are consumed but not checked. Ranges inside character classes are not checked. Duplicate group names are accepted; the last occurrence determines the reported requiredness.

*/

#![warn(clippy::all)]

pub use crate::api::*;

mod api;
mod cursor;
mod diagnostics;
mod outcome;
mod parse;
mod scope;
