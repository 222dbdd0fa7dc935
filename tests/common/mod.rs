#![allow(clippy::uninlined_format_args)]

use regroups::{analyze, Diagnostic, GroupMap, MessageKind, ParseOutcome, Requiredness};

/// Build a GroupMap from (name, requiredness) pairs.
pub fn groups(pairs: &[(&str, Requiredness)]) -> GroupMap {
    pairs
        .iter()
        .map(|&(name, req)| (name.to_string(), req))
        .collect()
}

/// Test that \p pattern parses, producing exactly \p expected.
#[track_caller]
pub fn test_groups(pattern: &str, expected: &[(&str, Requiredness)]) {
    match analyze(pattern) {
        ParseOutcome::Success { groups: actual } => {
            pretty_assertions::assert_eq!(actual, groups(expected), "pattern: {}", pattern)
        }
        ParseOutcome::Failure { diagnostics } => panic!(
            "Pattern should have parsed: {}\n{}",
            pattern,
            render(&diagnostics)
        ),
    }
}

/// Test that \p pattern parses and has no named groups.
#[track_caller]
pub fn test_no_groups(pattern: &str) {
    test_groups(pattern, &[])
}

/// Test that \p pattern fails to parse, returning its diagnostics.
#[track_caller]
pub fn test_parse_fails(pattern: &str) -> Vec<Diagnostic> {
    match analyze(pattern) {
        ParseOutcome::Success { groups } => {
            panic!("Pattern should not have parsed: {} {:?}", pattern, groups)
        }
        ParseOutcome::Failure { diagnostics } => {
            assert!(!diagnostics.is_empty(), "Failure without diagnostics");
            for d in diagnostics.iter() {
                assert_eq!(
                    format!("{}{}", d.consumed, d.remaining),
                    pattern,
                    "Diagnostic does not split the pattern"
                );
            }
            diagnostics
        }
    }
}

/// Test that \p pattern fails with exactly one diagnostic, of kind \p kind,
/// located after the text \p consumed.
#[track_caller]
pub fn test_1_error(pattern: &str, kind: MessageKind, consumed: &str) {
    let diags = test_parse_fails(pattern);
    assert_eq!(
        diags.len(),
        1,
        "Expected one diagnostic for '{}':\n{}",
        pattern,
        render(&diags)
    );
    assert_eq!(diags[0].message, kind, "pattern: {}", pattern);
    assert_eq!(diags[0].consumed, consumed, "pattern: {}", pattern);
}

/// Test that \p pattern fails with exactly the diagnostic kinds \p kinds, in order.
#[track_caller]
pub fn test_errors(pattern: &str, kinds: &[MessageKind]) {
    let actual: Vec<MessageKind> = test_parse_fails(pattern)
        .iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(actual, kinds, "pattern: {}", pattern);
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
