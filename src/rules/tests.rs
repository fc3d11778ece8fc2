use crate::rules::basic::{doubler, incrementer, repeater};
use crate::rules::release::{increase_fallback, increase_jpp, increase_main, increase_release};
use crate::rules::spec::{
    ChangeLogEntry, bump_release_pattern, changelog_program, global_macro, release_pattern, replace_tag_program, tag,
};
use crate::{Context, Options, bump_release, replace_macro, replace_tag};

#[test]
fn release_bump_examples() {
    // Array of (expected, release)
    let cases: Vec<(&str, &str)> = vec![
        ("4", "3"),
        ("0.2", "0.1"),
        ("1jpp.2", "1jpp.1"),
        ("3.rc1.1", "3.rc1"),
        ("2%{?dist}", "1%{?dist}"),
        ("11.fc9", "10.fc9"),
        ("100", "99"),
        ("0.10.20080101git", "0.9.20080101git"),
        ("0.2.rc1", "0.1.rc1"),
        ("8", "007"),
        ("2jpp.3%{?dist}", "2jpp.2%{?dist}"),
        ("2.x", "1.x"),
        ("abc.1", "abc"),
        ("abc.3", "abc.2"),
        ("x1.fc9.1", "x1.fc9"),
        ("1.rc.3", "1.rc.2"),
    ];

    for (expected, release) in cases {
        assert_eq!(increase_release(release, false), expected, "bumping {release:?}");
    }
}

#[test]
fn rightmost_bump_examples() {
    let cases: Vec<(&str, &str)> = vec![
        ("3.1", "3"),
        ("1.fc9.3", "1.fc9.2"),
        ("1%{?dist}.1", "1%{?dist}"),
        ("0.1.10", "0.1.9"),
        ("2.rc1.1", "2.rc1"),
    ];

    for (expected, release) in cases {
        assert_eq!(increase_release(release, true), expected, "bumping {release:?}");
    }
}

#[test]
fn schemes_individually() {
    assert_eq!(increase_main("3").unwrap(), "4");
    assert_eq!(increase_main("0.1").unwrap(), "0.2");
    assert!(increase_main("3.rc1").is_err());
    assert_eq!(increase_jpp("1jpp.1").unwrap(), "1jpp.2");
    assert_eq!(increase_jpp("0.1jpp.1").unwrap(), "0.1jpp.2");
    assert!(increase_jpp("1jpp.rc").is_err());
    assert_eq!(increase_fallback("3.rc1"), "3.rc1.1");
    assert_eq!(increase_fallback("3.rc1  "), "3.rc1.1");
    assert_eq!(increase_fallback("1.9"), "1.10");
}

#[test]
fn release_field_shapes() {
    // Array of (line, expected release capture)
    let cases: Vec<(&str, Option<&str>)> = vec![
        ("Release: 3%{?dist}\n", Some("3%{?dist}")),
        ("release:1\n", Some("1")),
        ("RELEASE :   12.fc9\n", Some("12.fc9")),
        ("%define rel 4\n", Some("4")),
        ("%define release 5.1\n", Some("5.1")),
        ("%define baserelease 6\n", Some("6")),
        ("Release: %release_func 7\n", Some("7")),
        ("Release: %{baserelease}%{?dist}\n", None),
        ("%DEFINE rel 4\n", None),
        ("%define relnum 4\n", None),
        ("Version: 1.0\n", None),
    ];

    let mut pattern = release_pattern();
    for (line, expected) in cases {
        let m = pattern.matches(Some(line));
        let got = m.captures().and_then(|c| c.name("release"));
        assert_eq!(got, expected, "matching {line:?}");
    }
}

#[test]
fn revision_keyword_blocks_bump() {
    let mut pattern = bump_release_pattern();
    assert!(pattern.matches(Some("Release: 3\n")).is_match());
    assert!(!pattern.matches(Some("Release: 3 # $Revision: 1.4 $\n")).is_match());
}

#[test]
fn bump_program_rewrites_only_release_lines() {
    let input = vec![
        "Name: foo\n",
        "Version: 1.2\n",
        "%define baserelease 6\n",
        "Release: %{baserelease}%{?dist}\n",
        "\n",
        "%changelog\n",
    ];
    let out = bump_release(input, &Options::default());
    assert_eq!(out, vec![
        "Name: foo\n",
        "Version: 1.2\n",
        "%define baserelease 7\n",
        "Release: %{baserelease}%{?dist}\n",
        "\n",
        "%changelog\n",
    ]);
}

#[test]
fn bump_keeps_crlf_and_missing_terminators() {
    let out = bump_release(["Release: 3.rc1\r\n", "Release: 9"], &Options::default());
    assert_eq!(out, vec!["Release: 3.rc1.1\r\n", "Release: 10"]);
}

#[test]
fn tag_pattern_captures_key_and_value() {
    let mut pattern = tag("Version").unwrap();
    let m = pattern.matches(Some("version:   3.0.1\r\n"));
    let caps = m.captures().unwrap();
    assert_eq!(caps.name("key"), Some("version"));
    assert_eq!(caps.name("value"), Some("3.0.1"));

    assert!(!pattern.matches(Some("# Version: 1")).is_match());
}

#[test]
fn tag_names_are_literal() {
    let mut pattern = tag("Source0+").unwrap();
    assert!(pattern.matches(Some("Source0+: x\n")).is_match());
    assert!(!pattern.matches(Some("Source00: x\n")).is_match());
}

#[test]
fn replace_tag_program_rewrites_value_only() {
    let program = replace_tag_program("Release", "5").unwrap();
    let out = program.apply(["Release: 4%{?dist}\r\n", "Summary: Release: 4\n"]);
    assert_eq!(out, vec!["Release: 5\r\n", "Summary: Release: 4\n"]);
}

#[test]
fn global_macro_pattern() {
    let mut pattern = global_macro("alphatag").unwrap();
    let m = pattern.matches(Some("%global alphatag 20080101git\n"));
    assert_eq!(m.captures().and_then(|c| c.name("value")), Some("20080101git"));
    assert!(!pattern.matches(Some("%define alphatag x\n")).is_match());
}

#[test]
fn changelog_program_inserts_entry() {
    let entry = ChangeLogEntry::new("", "Initial build", "me@example.org");
    let out = changelog_program(entry, &Context::default()).apply(["Name: x", "%changelog"]);
    assert_eq!(out, vec!["Name: x", "%changelog", "* Tue Feb 12 2013 me@example.org", "- Initial build", ""]);
}

#[test]
fn changelog_program_with_crlf() {
    let entry = ChangeLogEntry::new("1:2.0-1", "Update", "me@example.org");
    let out = changelog_program(entry, &Context::default()).apply(["%changelog\r\n"]);
    assert_eq!(out, vec![
        "%changelog\r\n",
        "* Tue Feb 12 2013 me@example.org - 1:2.0-1\r\n",
        "- Update\r\n",
        "\r\n"
    ]);
}

#[test]
fn demonstration_programs() {
    let input = ["bar", "baz", "quux"];
    assert_eq!(repeater().apply(input), vec!["bar", "baz", "quux"]);
    assert_eq!(doubler().apply(input), vec!["bar", "bar", "baz", "baz", "quux", "quux"]);
    assert_eq!(incrementer().apply(input), vec!["0: bar", "0: baz", "1: baz", "0: quux", "1: quux", "2: quux"]);
}

#[test]
fn empty_values_stay_on_their_line() {
    let out = replace_tag(["Version:\n", "Release: 1\n"], "Version", "2.0").unwrap();
    assert_eq!(out, vec!["Version:2.0\n", "Release: 1\n"]);

    let out = replace_tag(["Version:  \r\n"], "Version", "2.0").unwrap();
    assert_eq!(out, vec!["Version:  2.0\r\n"]);

    let out = replace_macro(["%global alphatag\n", "Name: foo\n"], "alphatag", "new").unwrap();
    assert_eq!(out, vec!["%global alphatag\n", "Name: foo\n"]);
    assert!(!global_macro("alphatag").unwrap().matches(Some("%global alphatag\n")).is_match());
}

#[test]
fn only_ascii_digits_are_release_numerals() {
    // Array of (line, expected)
    let cases: Vec<(&str, &str)> = vec![
        ("Release: \u{0669}\n", "Release: \u{0669}\n"),
        ("%define rel \u{0663}\n", "%define rel \u{0663}\n"),
        ("Release: 9\u{0669}\n", "Release: 10\u{0669}\n"),
    ];
    for (line, expected) in cases {
        assert_eq!(bump_release([line], &Options::default()), vec![expected], "bumping {line:?}");
    }

    assert!(increase_main("\u{0669}").is_err());
    assert_eq!(increase_release("\u{0669}", false), "\u{0669}.1");
    assert_eq!(increase_release("1.\u{0669}", true), "1.\u{0669}.1");
}
