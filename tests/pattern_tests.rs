#![allow(clippy::uninlined_format_args)]

use pretty_assertions::assert_eq;
use regroups::{AnalyzedPattern, Error, Flags, MessageKind, Requiredness};

#[test]
fn test_flags_parse() {
    let flags: Flags = "dgimsuy".parse().unwrap();
    assert!(flags.has_indices);
    assert!(flags.global);
    assert!(flags.icase);
    assert!(flags.multiline);
    assert!(flags.dot_all);
    assert!(flags.unicode);
    assert!(!flags.unicode_sets);
    assert!(flags.sticky);

    assert_eq!("".parse::<Flags>().unwrap(), Flags::default());
    assert!("v".parse::<Flags>().unwrap().unicode_sets);
}

#[test]
fn test_flags_display_is_canonical() {
    let flags: Flags = "yusmig".parse().unwrap();
    assert_eq!(flags.to_string(), "gimsuy");
    assert_eq!("vd".parse::<Flags>().unwrap().to_string(), "dv");
    assert_eq!(Flags::default().to_string(), "");
}

#[test]
fn test_flags_errors() {
    assert_eq!("uiu".parse::<Flags>(), Err(Error::DuplicateFlag('u')));
    assert_eq!("gg".parse::<Flags>(), Err(Error::DuplicateFlag('g')));
    assert_eq!("gx".parse::<Flags>(), Err(Error::UnknownFlag('x')));
    assert_eq!("G".parse::<Flags>(), Err(Error::UnknownFlag('G')));
    assert_eq!("uv".parse::<Flags>(), Err(Error::IncompatibleFlags('u', 'v')));
    assert_eq!(Error::DuplicateFlag('u').to_string(), "Duplicate flag: u");
}

#[test]
fn test_analyzed_pattern() {
    let p = AnalyzedPattern::with_flags("(?<a>x)(?<b>y)?|(?<c>z)", "g").unwrap();
    assert_eq!(p.pattern(), "(?<a>x)(?<b>y)?|(?<c>z)");
    assert!(p.flags().global);
    assert!(p.has_named_groups());
    assert_eq!(p.group("a"), Some(Requiredness::Optional));
    assert_eq!(p.group("nope"), None);
    assert_eq!(p.required_groups().count(), 0);
    assert_eq!(p.optional_groups().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(p.to_string(), "/(?<a>x)(?<b>y)?|(?<c>z)/g");

    let p = AnalyzedPattern::new(r"(?<y>\d{4})-(?<m>\d\d)(?:-(?<d>\d\d))?").unwrap();
    assert_eq!(p.required_groups().collect::<Vec<_>>(), vec!["m", "y"]);
    assert_eq!(p.optional_groups().collect::<Vec<_>>(), vec!["d"]);
    assert_eq!(p.flags(), Flags::default());

    let p = AnalyzedPattern::new("abc").unwrap();
    assert!(!p.has_named_groups());
    assert!(p.groups().is_empty());
}

#[test]
fn test_analyzed_pattern_errors() {
    match AnalyzedPattern::new("(") {
        Err(Error::Syntax { diagnostics }) => {
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].message, MessageKind::UnterminatedGroup);
        }
        other => panic!("Expected a syntax error, got {:?}", other),
    }

    // Flags are checked before the pattern.
    assert_eq!(
        AnalyzedPattern::with_flags("(", "ii"),
        Err(Error::DuplicateFlag('i'))
    );

    let err = AnalyzedPattern::new("a)b(").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid pattern: Expected end of pattern at column 2: a\u{2038})b(, \
         Unbalanced parenthesis: a group must end with ')' at column 5: a)b(\u{2038}"
    );
}
